#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        clock in misc is OK
        "true"
    }

    tests! {
        precedence in misc is OK
        "11"
        "20"
        "true"
        "-6"
        "true"
    }
}
