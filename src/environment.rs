use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// A lexical frame: a name-to-value map plus a link to the enclosing frame.
/// Every frame except the global one has an enclosing link. Frames are shared
/// (`Rc<RefCell<_>>`) because closures keep the frame they were created in
/// alive after the block that introduced it has finished.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Creates a binding in this frame. Always succeeds; defining an existing
    /// name shadows the old value. The resolver forbids redeclaration for
    /// locals, so this leniency is only observable at global scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Reads a binding, walking the chain outwards when the name is absent
    /// locally.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.variables.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Writes an existing binding, walking the chain outwards when the name
    /// is absent locally.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// The frame exactly `distance` enclosing links away. The resolver
    /// guarantees the chain is at least that deep.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .expect("enclosing environment to exist at resolved distance");

        for _ in 1..distance {
            let enclosing = environment.borrow().enclosing.clone()
                .expect("enclosing environment to exist at resolved distance");
            environment = enclosing;
        }

        environment
    }

    /// Reads from the frame exactly `distance` links away, never falling
    /// through to a different frame. The resolver's contract is exactness.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        let value = if distance == 0 {
            self.variables.get(&name.lexeme).cloned()
        } else {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
        };

        value.ok_or_else(|| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Writes into the frame exactly `distance` links away.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Value) {
        if distance == 0 {
            self.variables.insert(name.lexeme.clone(), value);
        } else {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}
