#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bound_method_value in method is OK
        "bound tight"
    }

    tests! {
        field_shadows_method in method is OK
        "1"
    }

    tests! {
        state_is_per_instance in method is OK
        "1"
        "2"
        "1"
    }
}
