#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        add in function is OK
        "3"
        "<fn add>"
    }

    tests! {
        fib in function is OK
        "55"
    }

    tests! {
        no_return_yields_nil in function is OK
        "nil"
    }

    tests! {
        left_to_right_arguments in function is OK
        "g"
        "h"
        "3"
    }

    tests! {
        close_over_parameter in function is OK
        "param"
    }

    tests! {
        extra_arguments in function is ERR(3)
        "[line 2] Error at ')': Expected 2 arguments but got 3."
    }

    tests! {
        missing_arguments in function is ERR(3)
        "[line 2] Error at ')': Expected 2 arguments but got 1."
    }

    tests! {
        call_number in function is ERR(3)
        "[line 1] Error at ')': Can only call functions and classes."
    }

    tests! {
        call_string in function is ERR(3)
        "[line 1] Error at ')': Can only call functions and classes."
    }
}
