#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        arithmetic in operator is OK
        "3"
        "2"
        "8"
        "2.5"
        "-3"
        "14"
    }

    tests! {
        concat in operator is OK
        "foobar"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "true"
        "true"
        "false"
        "true"
        "false"
        "false"
    }

    tests! {
        divide_by_zero in operator is OK
        "inf"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "false"
        "false"
    }

    tests! {
        add_mixed in operator is ERR(3)
        "[line 1] Error at '+': Operands must be two numbers or two strings."
    }

    tests! {
        subtract_strings in operator is ERR(3)
        "[line 1] Error at '-': Operands must be numbers."
    }

    tests! {
        compare_strings in operator is ERR(3)
        "[line 1] Error at '<': Operands must be numbers."
    }

    tests! {
        negate_string in operator is ERR(3)
        "[line 1] Error at '-': Operand must be a number."
    }
}
