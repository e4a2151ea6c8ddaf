#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class in class is OK
        "Foo"
    }

    tests! {
        print_instance in class is OK
        "Foo instance"
    }

    tests! {
        fields in class is OK
        "2"
    }

    tests! {
        method in class is OK
        "hello"
    }

    tests! {
        method_references_class in class is OK
        "Factory instance"
    }

    tests! {
        undefined_property in class is ERR(3)
        "[line 2] Error at 'bar': Undefined property 'bar'."
    }

    tests! {
        property_on_number in class is ERR(3)
        "[line 1] Error at 'length': Only instances have properties."
    }

    tests! {
        set_on_number in class is ERR(3)
        "[line 1] Error at 'length': Only instances have fields."
    }
}
