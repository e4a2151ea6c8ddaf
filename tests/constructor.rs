#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_sets_fields in constructor is OK
        "hi world"
    }

    tests! {
        call_returns_instance in constructor is OK
        "Foo instance"
    }

    tests! {
        early_return_returns_instance in constructor is OK
        "Foo instance"
    }

    tests! {
        init_called_directly_returns_instance in constructor is OK
        "Foo instance"
    }

    tests! {
        default_arity in constructor is ERR(3)
        "[line 2] Error at ')': Expected 0 arguments but got 1."
    }

    tests! {
        init_arity in constructor is ERR(3)
        "[line 4] Error at ')': Expected 2 arguments but got 1."
    }

    tests! {
        return_value_from_init in constructor is ERR(2)
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }
}
