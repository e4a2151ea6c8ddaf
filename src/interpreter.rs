use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{Report, RuntimeError, Unwind};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    NodeId, SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::{Token, Type};
use crate::value::{Callable, Value};

type EvalResult = Result<Value, RuntimeError>;
type ExecResult = Result<(), Unwind>;

/// Walks the AST and evaluates it. Owns the global frame, the current frame,
/// and the resolve table the resolver filled in: for every variable use keyed
/// by node id, the exact number of enclosing links between the use site and
/// its binding. Uses without an entry are global lookups.
///
/// `print` output goes to the injected sink so callers (and tests) decide
/// where program output lands.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::globals() {
            globals.borrow_mut().define(native.name, Value::Native(native.clone()));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes a program. A runtime error unwinds to here, gets reported and
    /// stops the run.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.report(),
                    // The resolver rejects `return` outside a function.
                    Unwind::Return(_) => unreachable!(),
                }
                return;
            }
        }
    }

    /// Records the scope distance for a variable use. Called by the resolver.
    pub fn resolve(&mut self, id: NodeId, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    /// Runs statements inside the given frame, restoring the previous frame
    /// on every exit path: normal completion, return signal, runtime error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn look_up_variable(&self, id: NodeId, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn number_operand(operator: &Token, value: &Value) -> Result<f64, RuntimeError> {
        match value {
            Value::Literal(Literal::Number(number)) => Ok(*number),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
        }
    }

    fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Value::Literal(Literal::Number(left)), Value::Literal(Literal::Number(right))) => {
                Ok((*left, *right))
            }
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
        }
    }
}

impl<'a> ExprVisitor<EvalResult> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> EvalResult {
        Ok(Value::Literal(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> EvalResult {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> EvalResult {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => {
                let number = Self::number_operand(&unary.operator, &right)?;
                Ok(Value::from(-number))
            }
            Type::Bang => Ok(Value::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> EvalResult {
        // Operands evaluate left to right, before any type checking.
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let operator = &binary.operator;
        match operator.r#type {
            Type::Greater => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left > right))
            }
            Type::GreaterEqual => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left >= right))
            }
            Type::Less => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left < right))
            }
            Type::LessEqual => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left <= right))
            }
            Type::Minus => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left - right))
            }
            Type::Slash => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left / right))
            }
            Type::Star => {
                let (left, right) = Self::number_operands(operator, &left, &right)?;
                Ok(Value::from(left * right))
            }
            Type::Plus => match (left, right) {
                (Value::Literal(Literal::Number(left)), Value::Literal(Literal::Number(right))) => {
                    Ok(Value::from(left + right))
                }
                (Value::Literal(Literal::String(left)), Value::Literal(Literal::String(right))) => {
                    Ok(Value::from(left + &right))
                }
                _ => Err(RuntimeError {
                    token: operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },
            Type::EqualEqual => Ok(Value::from(left == right)),
            Type::BangEqual => Ok(Value::from(left != right)),
            _ => unreachable!(),
        }
    }

    /// Short-circuit: the deciding operand comes back as-is, not coerced to
    /// a boolean.
    fn visit_logical_expr(&mut self, logical: &LogicalData) -> EvalResult {
        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> EvalResult {
        self.look_up_variable(variable.id, &variable.name)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> EvalResult {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            }
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            }
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> EvalResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let function: &dyn Callable = match &callee {
            Value::Function(function) => function.as_ref(),
            Value::Native(native) => native,
            Value::Class(class) => class,
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                });
            }
        };

        if arguments.len() != function.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    function.arity(),
                    arguments.len()
                ),
            });
        }

        function.call(self, arguments)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> EvalResult {
        let object = self.evaluate(&get.object)?;

        match &object {
            Value::Instance(instance) => Instance::get(instance, &get.name),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> EvalResult {
        let object = self.evaluate(&set.object)?;

        let Value::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> EvalResult {
        self.look_up_variable(this.id, &this.keyword)
    }

    /// `super.m` reads the superclass from the `super` frame at the resolved
    /// distance, the receiver from the `this` frame one link closer, and
    /// binds the found method to that receiver.
    fn visit_super_expr(&mut self, super_expr: &SuperData) -> EvalResult {
        let Some(distance) = self.locals.get(&super_expr.id).copied() else {
            return Err(RuntimeError {
                token: super_expr.keyword.clone(),
                message: "Undefined variable 'super'.".to_string(),
            });
        };

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword)?;
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let (Value::Class(superclass), Value::Instance(instance)) = (superclass, object) else {
            unreachable!();
        };

        match superclass.find_method(&super_expr.method.lexeme) {
            Some(method) => Ok(Value::from(method.bind(instance))),
            None => Err(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            }),
        }
    }
}

impl<'a> StmtVisitor<ExecResult> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> ExecResult {
        self.evaluate(&expression.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> ExecResult {
        let value = self.evaluate(&print.expr)?;

        writeln!(self.output, "{value}").expect("output sink to be writable");
        self.output.flush().expect("output sink to be flushable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> ExecResult {
        let value = match &var.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Value::nil(),
        };

        self.environment.borrow_mut().define(&var.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> ExecResult {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> ExecResult {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> ExecResult {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            self.execute(&while_stmt.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, function: &Rc<FunctionData>) -> ExecResult {
        // The function captures the environment it is declared in.
        let value = Function::new(Rc::clone(function), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&function.name.lexeme, Value::from(value));

        Ok(())
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> ExecResult {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Value::nil(),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> ExecResult {
        let superclass = match &class.superclass {
            Some(variable) => {
                let value = self.look_up_variable(variable.id, &variable.name)?;
                match value {
                    Value::Class(superclass) => Some(superclass),
                    _ => {
                        return Err(RuntimeError {
                            token: variable.name.clone(),
                            message: "Superclass must be a class.".to_string(),
                        }.into());
                    }
                }
            }
            None => None,
        };

        // Defined up front so method bodies can refer to the class by name.
        self.environment.borrow_mut().define(&class.name.lexeme, Value::nil());

        // Methods of a subclass close over an extra frame holding `super`.
        let previous = Rc::clone(&self.environment);
        if let Some(superclass) = &superclass {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Value::Class(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
        }

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        self.environment = previous;

        let value = Value::Class(Rc::new(Class::new(class.name.lexeme.clone(), superclass, methods)));
        self.environment.borrow_mut().assign(&class.name, value)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, 1)
    }

    fn number(value: f64) -> Expr {
        Expr::Literal(Literal::Number(value))
    }

    fn evaluate(expr: &Expr) -> EvalResult {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.evaluate(expr)
    }

    /// Runs a program end to end and returns what it printed.
    fn run(source: &str) -> String {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let statements = Parser::new(Scanner::new(source).scan_tokens()).parse();
        Resolver::new(&mut interpreter).resolve(&statements);
        interpreter.interpret(&statements);

        drop(interpreter);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn evaluate_arithmetic() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(number(6.0)),
            operator: token(Type::Star, "*"),
            right: Box::new(Expr::Binary(BinaryData {
                left: Box::new(number(1.0)),
                operator: token(Type::Plus, "+"),
                right: Box::new(number(2.0)),
            })),
        });

        assert_eq!(evaluate(&expr).unwrap(), Value::from(18.0));
    }

    #[test]
    fn evaluate_string_concatenation() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("foo"))),
            operator: token(Type::Plus, "+"),
            right: Box::new(Expr::Literal(Literal::from("bar"))),
        });

        assert_eq!(evaluate(&expr).unwrap(), Value::from("foobar"));
    }

    #[test]
    fn adding_string_and_number_fails() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("foo"))),
            operator: token(Type::Plus, "+"),
            right: Box::new(number(1.0)),
        });

        let error = evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn comparison_requires_numbers() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("a"))),
            operator: token(Type::Less, "<"),
            right: Box::new(number(1.0)),
        });

        let error = evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operands must be numbers.");
    }

    #[test]
    fn equality_mixes_types_without_failing() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("a"))),
            operator: token(Type::EqualEqual, "=="),
            right: Box::new(number(1.0)),
        });

        assert_eq!(evaluate(&expr).unwrap(), Value::from(false));
    }

    #[test]
    fn negating_a_string_fails() {
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::from("a"))),
        });

        let error = evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operand must be a number.");
    }

    #[test]
    fn or_returns_the_deciding_value_itself() {
        let expr = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::from("lhs"))),
            operator: token(Type::Or, "or"),
            right: Box::new(Expr::Literal(Literal::from("rhs"))),
        });

        assert_eq!(evaluate(&expr).unwrap(), Value::from("lhs"));
    }

    #[test]
    fn and_short_circuits_on_falsy_left() {
        let expr = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::And, "and"),
            right: Box::new(Expr::Literal(Literal::from("rhs"))),
        });

        assert_eq!(evaluate(&expr).unwrap(), Value::Literal(Literal::Nil));
    }

    #[test]
    fn block_scoping_restores_shadowed_variables() {
        let output = run("var a = 1; { var a = 2; print a; } print a;");
        assert_eq!(output, "2\n1\n");
    }

    #[test]
    fn closures_capture_by_reference() {
        let output = run(
            "fun makeCounter() { \
                 var i = 0; \
                 fun count() { i = i + 1; print i; } \
                 return count; \
             } \
             var counter = makeCounter(); \
             counter(); \
             counter();",
        );
        assert_eq!(output, "1\n2\n");
    }

    #[test]
    fn recursion_reaches_the_function_through_its_closure() {
        let output = run(
            "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } \
             print fib(10);",
        );
        assert_eq!(output, "55\n");
    }

    #[test]
    fn constructor_binds_this_and_returns_the_instance() {
        let output = run(
            "class Point { \
                 init(x) { this.x = x; } \
                 show() { print this.x; } \
             } \
             Point(7).show();",
        );
        assert_eq!(output, "7\n");
    }

    #[test]
    fn super_dispatches_to_the_parent_method() {
        let output = run(
            "class A { m() { print \"A\"; } } \
             class B < A { m() { super.m(); print \"B\"; } } \
             B().m();",
        );
        assert_eq!(output, "A\nB\n");
    }

    #[test]
    fn arguments_evaluate_left_to_right() {
        let output = run(
            "fun first() { print 1; return 0; } \
             fun second() { print 2; return 0; } \
             fun take(a, b) {} \
             take(first(), second());",
        );
        assert_eq!(output, "1\n2\n");
    }
}
