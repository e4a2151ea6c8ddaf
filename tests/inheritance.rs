#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_method in inheritance is OK
        "hello"
    }

    tests! {
        override_method in inheritance is OK
        "derived"
    }

    tests! {
        inherit_init in inheritance is OK
        "x"
    }

    tests! {
        superclass_must_be_class in inheritance is ERR(3)
        "[line 2] Error at 'NotClass': Superclass must be a class."
    }

    tests! {
        inherit_from_itself in inheritance is ERR(2)
        "[line 1] Error at 'Ouro': A class can't inherit from itself."
    }
}
