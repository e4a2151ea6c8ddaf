use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::{Report, ScanError};
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Turns a source string into a token stream in a single left-to-right pass.
///
/// `start` and `current` are char indices into the source; the lexeme of the
/// token being scanned is always `source[start..current]`. The char stream
/// itself is consumed through a peekable iterator so the scanner can look one
/// or two characters ahead without buffering the whole input.
pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source and returns the tokens, terminated by a single
    /// end-of-input token. Lexical errors are reported and scanning continues.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));
        self.tokens
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        self.current += 1;
        self.chars.next().expect("advance is only called before the end of the source")
    }

    /// Returns the next character without consuming it, or `'\0'` at the end.
    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after the next one, or `'\0'` past the end.
    fn peek_next(&mut self) -> char {
        self.chars.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Consumes the next character only if it matches.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            return true;
        }

        false
    }

    fn add_token(&mut self, r#type: Type) {
        self.add_literal_token(r#type, None);
    }

    fn add_literal_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.source.substring(self.start, self.current).to_string();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Scans a string literal. Strings may span lines; the line counter keeps
    /// up with every embedded newline.
    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string."),
            }.report();
            return;
        }

        self.advance(); // The closing quote.

        // The literal drops the surrounding quotes, the lexeme keeps them.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_literal_token(Type::String, Some(Literal::String(value)));
    }

    /// Scans a number literal: digits with an optional fractional part. A
    /// trailing `.` with no digit after it is left for the parser to trip on.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // The dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value: f64 = self.source.substring(self.start, self.current)
            .parse()
            .expect("scanned digits to parse as a number");

        self.add_literal_token(Type::Number, Some(Literal::Number(value)));
    }

    /// Scans an identifier or a keyword.
    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let r#type = match self.source.substring(self.start, self.current) {
            "and"    => Type::And,
            "class"  => Type::Class,
            "else"   => Type::Else,
            "false"  => Type::False,
            "for"    => Type::For,
            "fun"    => Type::Fun,
            "if"     => Type::If,
            "nil"    => Type::Nil,
            "or"     => Type::Or,
            "print"  => Type::Print,
            "return" => Type::Return,
            "super"  => Type::Super,
            "this"   => Type::This,
            "true"   => Type::True,
            "var"    => Type::Var,
            "while"  => Type::While,
            _        => Type::Identifier,
        };

        self.add_token(r#type);
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(Type::LeftParen),
            ')' => self.add_token(Type::RightParen),
            '{' => self.add_token(Type::LeftBrace),
            '}' => self.add_token(Type::RightBrace),
            ',' => self.add_token(Type::Comma),
            '.' => self.add_token(Type::Dot),
            '-' => self.add_token(Type::Minus),
            '+' => self.add_token(Type::Plus),
            ';' => self.add_token(Type::Semicolon),
            '*' => self.add_token(Type::Star),

            '!' => {
                let r#type = if self.match_next('=') { Type::BangEqual } else { Type::Bang };
                self.add_token(r#type);
            },
            '=' => {
                let r#type = if self.match_next('=') { Type::EqualEqual } else { Type::Equal };
                self.add_token(r#type);
            },
            '<' => {
                let r#type = if self.match_next('=') { Type::LessEqual } else { Type::Less };
                self.add_token(r#type);
            },
            '>' => {
                let r#type = if self.match_next('=') { Type::GreaterEqual } else { Type::Greater };
                self.add_token(r#type);
            },

            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line and is not emitted.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash);
                }
            },

            ' ' | '\r' | '\t' => (),

            '\n' => self.line += 1,

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                ScanError {
                    line: self.line,
                    message: String::from("Unexpected character."),
                }.report();
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn types(source: &str) -> Vec<Type> {
        Scanner::new(source).scan_tokens().into_iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn scan_punctuation_and_operators() {
        assert_eq!(
            types("(){},.-+;*/! != = == < <= > >="),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
                Type::Star, Type::Slash, Type::Bang, Type::BangEqual, Type::Equal,
                Type::EqualEqual, Type::Less, Type::LessEqual, Type::Greater,
                Type::GreaterEqual, Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_keywords_and_identifiers() {
        let tokens = Scanner::new("var language = nil;").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::Var);
        assert_eq!(tokens[1].r#type, Type::Identifier);
        assert_eq!(tokens[1].lexeme, "language");
        assert_eq!(tokens[2].r#type, Type::Equal);
        assert_eq!(tokens[3].r#type, Type::Nil);
        assert_eq!(tokens[4].r#type, Type::Semicolon);
        assert_eq!(tokens[5].r#type, Type::EOF);
    }

    #[test]
    fn scan_number_literals() {
        let tokens = Scanner::new("12 3.5").scan_tokens();

        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number() {
        let tokens = Scanner::new("123.").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::Number);
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
        assert_eq!(tokens[1].r#type, Type::Dot);
    }

    #[test]
    fn scan_string_literal_drops_quotes() {
        let tokens = Scanner::new("\"hello\"").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello".to_string())));
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens = Scanner::new("\"one\ntwo\" x").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn comments_are_not_emitted() {
        assert_eq!(types("// nothing to see\n1"), vec![Type::Number, Type::EOF]);
    }

    #[test]
    fn underscores_start_identifiers() {
        let tokens = Scanner::new("_private").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::Identifier);
        assert_eq!(tokens[0].lexeme, "_private");
    }
}
