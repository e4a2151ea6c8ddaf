#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        early_return in return is OK
        "early"
    }

    tests! {
        bare_return_yields_nil in return is OK
        "nil"
    }

    tests! {
        from_loop in return is OK
        "loop"
    }

    tests! {
        from_method in return is OK
        "method"
    }

    tests! {
        at_top_level in return is ERR(2)
        "[line 1] Error at 'return': Can't return from top-level code."
    }
}
