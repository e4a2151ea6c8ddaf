//! A tree-walking interpreter for Lox, a small dynamically typed scripting
//! language with lexical scoping, first-class functions and closures, and
//! single-inheritance classes. The interpreter either runs a script file or
//! reads one line at a time from an interactive prompt.
//!
//! Source text goes through four stages:
//!
//! ## Scanning
//! The [`scanner`] turns the raw character stream into tokens in a single
//! left-to-right pass. Lexical problems (an unterminated string, a stray
//! character) are reported as a [`ScanError`](error::ScanError) and scanning
//! keeps going, so one bad character does not hide the rest.
//!
//! ## Parsing
//! The [`parser`] is a hand-written recursive descent parser producing
//! [`Expr`](expr::Expr) and [`Stmt`](stmt::Stmt) trees. On a syntax error it
//! reports a [`ParseError`](error::ParseError), synchronizes to the next
//! statement boundary and continues, collecting as many diagnostics as the
//! source deserves in one run.
//!
//! ## Resolving
//! The [`resolver`] is a static pre-pass over the finished AST. For every
//! variable use it computes how many lexical frames sit between the use and
//! its binding and stores that distance in the interpreter's resolve table,
//! keyed by node identity. It also rejects the scope-sensitive misuses that
//! are invisible to the parser: `return` at the top level, `this` outside a
//! class, `super` without a superclass, reading a local in its own
//! initializer, redeclaring a local.
//!
//! ## Interpreting
//! The [`interpreter`] walks the tree and evaluates it against a chain of
//! [`Environment`](environment::Environment) frames. Closures capture the
//! frame they were created in; method access binds `this` through a fresh
//! one-deep frame; `return` unwinds through an explicit signal to the
//! nearest call. Type mistakes surface as
//! [`RuntimeError`](error::RuntimeError)s carrying the offending token.
//!
//! If any stage reports an error, the later stages do not run. A script run
//! exits 2 on static errors and 3 on runtime errors; the prompt clears the
//! flags between lines instead so the session recovers.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The interpreter session: one global environment living across `run`
/// invocations, with program output going to the injected sink.
pub struct Lox<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Lox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(output),
        }
    }

    /// Runs a script file, then exits with 2 on a static error and 3 on a
    /// runtime error.
    pub fn run_file(&mut self, path: &str) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Failed to open {path}: {error}");
                process::exit(1);
            }
        };

        self.run(&contents);

        if error::did_error() {
            process::exit(2);
        }
        if error::did_runtime_error() {
            process::exit(3);
        }
    }

    /// Runs the interactive prompt. Each line is scanned, parsed, resolved
    /// and executed independently; the error flags are cleared afterwards so
    /// a bad line does not poison the session. History persists in the
    /// user's home directory across sessions.
    pub fn run_prompt(&mut self) {
        println!("lox v{}", env!("CARGO_PKG_VERSION"));

        let mut editor = DefaultEditor::new().expect("prompt editor to initialize");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            // A missing history file is fine on first launch.
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(&line);

                    self.run(&line);
                    error::reset_error();
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                }
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs a chunk of source through the whole pipeline. Each stage is
    /// skipped if an earlier one reported an error.
    fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();

        if error::did_error() {
            return;
        }

        let statements = Parser::new(tokens).parse();

        if error::did_error() {
            return;
        }

        Resolver::new(&mut self.interpreter).resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
