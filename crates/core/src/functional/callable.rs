//! Dynamically typed callables used by runtime composition

use crate::errors::Result;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

type Body = dyn Fn(&[Value]) -> Result<Value>;

/// A named, reference-counted function over dynamic values
///
/// Cloning a `Function` shares the same body, so `ptr_eq` can tell whether two
/// handles denote the very same function.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<Body>,
}

impl Function {
    /// Wrap a closure taking any number of arguments
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Self {
            name: Rc::from(name.into()),
            body: Rc::new(body),
        }
    }

    /// Wrap an infallible single-argument closure
    pub fn unary<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        let name = name.into();
        let target = name.clone();
        Self::new(name, move |args| match args {
            [value] => Ok(body(value.clone())),
            _ => Err(crate::Error::arity(target.as_str(), "1", args.len())),
        })
    }

    /// Invoke the function
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }

    /// Invoke the function with a single argument
    pub fn call1(&self, arg: Value) -> Result<Value> {
        self.call(std::slice::from_ref(&arg))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles share one function body
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// Anything that may be handed to the composer
///
/// Only `Operand::Function` is callable; plain values are rejected when a
/// composition is built.
#[derive(Debug, Clone)]
pub enum Operand {
    Function(Function),
    Value(Value),
}

impl Operand {
    pub fn is_callable(&self) -> bool {
        matches!(self, Operand::Function(_))
    }

    /// Short description used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Function(_) => "function",
            Operand::Value(Value::Null) => "null",
            Operand::Value(Value::Bool(_)) => "bool",
            Operand::Value(Value::Number(_)) => "number",
            Operand::Value(Value::String(_)) => "string",
            Operand::Value(Value::Array(_)) => "array",
            Operand::Value(Value::Object(_)) => "object",
        }
    }
}

impl From<Function> for Operand {
    fn from(function: Function) -> Self {
        Operand::Function(function)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}
