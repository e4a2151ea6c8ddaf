use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::error::RuntimeError;
use crate::function::{Function, NativeFunction};
use crate::interpreter::Interpreter;
use crate::literal::Literal;

/// The runtime value universe: everything a variable can hold, an expression
/// can produce, or a function can return.
#[derive(Debug, Clone)]
pub enum Value {
    Literal(Literal),
    Function(Rc<Function>),
    Native(NativeFunction),
    Class(Rc<Class>),
    Instance(Rc<RefCell<Instance>>),
}

impl Value {
    pub fn nil() -> Value {
        Value::Literal(Literal::Nil)
    }

    /// `nil` and `false` are falsy, every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Literal(literal) => literal.is_truthy(),
            _ => true,
        }
    }
}

/// Literals compare structurally; functions, classes and instances compare by
/// identity. Values of different kinds are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Literal(left), Value::Literal(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            (Value::Native(left), Value::Native(right)) => left.name == right.name,
            (Value::Class(left), Value::Class(right)) => Rc::ptr_eq(left, right),
            (Value::Instance(left), Value::Instance(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::Literal(literal)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Literal(Literal::Number(number))
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Literal(Literal::Bool(boolean))
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::Literal(Literal::String(string))
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::Literal(Literal::String(string.to_owned()))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(Rc::new(RefCell::new(instance)))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(literal) => write!(f, "{literal}"),
            Value::Function(function) => write!(f, "{function}"),
            Value::Native(native) => write!(f, "{native}"),
            Value::Class(class) => write!(f, "{class}"),
            Value::Instance(instance) => write!(f, "{}", instance.borrow()),
        }
    }
}

/// Anything the call expression can dispatch to: user functions, natives and
/// classes (whose invocation constructs an instance).
pub trait Callable: Debug {
    /// Invokes the callee. The interpreter is passed in so the body can
    /// execute statements and reach the globals.
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value, RuntimeError>;

    /// The number of arguments the callee expects; checked before dispatch.
    fn arity(&self) -> usize;
}
