//! Small operator helpers the composer and the lazy proxy are built from

use crate::errors::{Error, Result};
use crate::lazy::Object;
use serde_json::Value;

/// Apply `f` to the result of `g`: `apply_to_result(f, g)(x) == f(g(x))`
pub fn apply_to_result<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |a| f(g(a))
}

/// Identity function
pub fn identity<T>(x: T) -> T {
    x
}

/// Dynamic identity: returns its only argument
pub fn identity_value(args: &[Value]) -> Result<Value> {
    match args {
        [value] => Ok(value.clone()),
        _ => Err(Error::arity("identity", "1", args.len())),
    }
}

/// Turn a method name into a getter that calls that method on an object
pub fn method_caller(
    name: impl Into<String>,
) -> impl Fn(&mut dyn Object, &[Value]) -> Result<Value> + Clone {
    let name = name.into();
    move |object, args| object.call_method(&name, args)
}
