#[macro_use]
mod common;

#[cfg(test)]
mod print {
    tests! {
        sum in print is OK
        "3"
    }

    tests! {
        string in print is OK
        "hi"
    }

    tests! {
        nil in print is OK
        "nil"
    }

    tests! {
        booleans in print is OK
        "true"
        "false"
    }

    tests! {
        function_name in print is OK
        "<fn f>"
    }

    tests! {
        native_name in print is OK
        "<native fn clock>"
    }
}
