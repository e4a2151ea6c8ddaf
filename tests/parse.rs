#[macro_use]
mod common;

#[cfg(test)]
mod parse {
    tests! {
        missing_semicolon in parse is ERR(2)
        "[line 1] Error at end: Expect ';' after value."
    }

    tests! {
        expect_expression in parse is ERR(2)
        "[line 1] Error at ';': Expect expression."
    }

    tests! {
        unclosed_paren in parse is ERR(2)
        "[line 1] Error at ';': Expect ')' after expression."
    }

    tests! {
        unclosed_block in parse is ERR(2)
        "[line 1] Error at end: Expect '}' after block."
    }
}
