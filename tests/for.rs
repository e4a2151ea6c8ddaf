#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        count in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        initializer_scope in for is OK
        "0"
        "global"
    }

    tests! {
        no_initializer in for is OK
        "0"
        "1"
    }

    tests! {
        closure_sees_final_value in for is OK
        "1"
    }
}
