use crate::token::{Token, Type};
use crate::value::Value;

static mut HAD_ERROR: bool = false;
static mut HAD_RUNTIME_ERROR: bool = false;

/// Returns if a scan, parse or resolve error has been reported.
pub fn did_error() -> bool {
    unsafe { HAD_ERROR }
}

/// Returns if a runtime error has been reported.
pub fn did_runtime_error() -> bool {
    unsafe { HAD_RUNTIME_ERROR }
}

/// Clears the error flags. Called between prompt lines so a bad line does not
/// poison the rest of the session.
pub fn reset_error() {
    unsafe {
        HAD_ERROR = false;
        HAD_RUNTIME_ERROR = false;
    }
}

/// Diagnostics format: `[line N] Error<where>: <message>`.
fn print_report(line: usize, location: &str, message: &str) {
    eprintln!("[line {line}] Error{location}: {message}");
}

fn print_report_at(token: &Token, message: &str) {
    if token.r#type == Type::EOF {
        print_report(token.line, " at end", message);
    } else {
        print_report(token.line, &format!(" at '{}'", token.lexeme), message);
    }
}

/// Every diagnostic category implements this trait. `report` prints the
/// diagnostic to stderr and marks the run as failed.
pub trait Report {
    fn report(&self);
}

/// A lexical error: unexpected character or unterminated string. The scanner
/// keeps going after reporting one.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Report for ScanError {
    fn report(&self) {
        print_report(self.line, "", &self.message);

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// A syntactic error. The parser synchronizes and keeps discovering further
/// errors after reporting one.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Report for ParseError {
    fn report(&self) {
        print_report_at(&self.token, &self.message);

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// A scope-sensitive misuse found by the resolver before evaluation. Shares
/// the parse error channel and the parser's recovery posture.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Report for ResolveError {
    fn report(&self) {
        print_report_at(&self.token, &self.message);

        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// An evaluation error. Unwinds to the top level of the current run.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Report for RuntimeError {
    fn report(&self) {
        print_report_at(&self.token, &self.message);

        unsafe {
            HAD_RUNTIME_ERROR = true;
        }
    }
}

/// The two ways statement execution can unwind: a `return` travelling to the
/// nearest enclosing function call, or a runtime error travelling to the top
/// of the run. `return` is not an error; it just rides the same channel.
#[derive(Debug)]
pub enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
