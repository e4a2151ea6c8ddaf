#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
    }

    tests! {
        shared_closure in closure is OK
        "initial"
        "updated"
    }

    tests! {
        close_over_block_locals in closure is OK
        "b"
        "a"
    }

    tests! {
        nested_closure in closure is OK
        "x"
    }
}
