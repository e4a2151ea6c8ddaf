#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "2.5"
        "0.75"
    }

    tests! {
        trailing_dot in number is ERR(2)
        "[line 1] Error at ';': Expect property name after '.'."
    }
}
