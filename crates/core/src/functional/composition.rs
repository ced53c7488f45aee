//! Function composition for static closures and dynamic `Function`s

use super::callable::{Function, Operand};
use super::operator::identity_value;
use crate::errors::{Error, Result};
use tracing::trace;

/// Function composition trait for closures
pub trait Compose<A, B> {
    /// Run `inner` first, then `self`: `f.compose(g)(x) == f(g(x))`
    fn compose<G, Z>(self, inner: G) -> impl Fn(Z) -> B
    where
        G: Fn(Z) -> A,
        Self: Fn(A) -> B + Sized;

    /// Run `self` first, then `next`: `f.pipe(g)(x) == g(f(x))`
    fn pipe<G, C>(self, next: G) -> impl Fn(A) -> C
    where
        G: Fn(B) -> C,
        Self: Fn(A) -> B + Sized;
}

impl<T, A, B> Compose<A, B> for T
where
    T: Fn(A) -> B,
{
    fn compose<G, Z>(self, inner: G) -> impl Fn(Z) -> B
    where
        G: Fn(Z) -> A,
    {
        move |z| self(inner(z))
    }

    fn pipe<G, C>(self, next: G) -> impl Fn(A) -> C
    where
        G: Fn(B) -> C,
    {
        move |a| next(self(a))
    }
}

/// Compose closures right to left: `compose!(f, g, h)(x) == f(g(h(x)))`
///
/// `compose!()` is the identity function and `compose!(f)` is `f` itself.
#[macro_export]
macro_rules! compose {
    () => {
        $crate::functional::operator::identity
    };
    ($func:expr $(,)?) => {
        $func
    };
    ($func:expr, $($rest:expr),+ $(,)?) => {
        $crate::functional::operator::apply_to_result($func, $crate::compose!($($rest),+))
    };
}

/// Build one function from `operands`, applied right to left
///
/// The innermost (last) function receives every call argument; each outer
/// function receives the previous result. No operand yields the identity
/// function, a single operand is returned as is.
pub fn compose<I>(operands: I) -> Result<Function>
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    let functions = callables(operands, "compose")?;
    Ok(fold(functions))
}

/// Build one function from `operands`, applied left to right
///
/// `pipe([f, g])` behaves like `compose([g, f])`.
pub fn pipe<I>(operands: I) -> Result<Function>
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    let mut functions = callables(operands, "pipe")?;
    functions.reverse();
    Ok(fold(functions))
}

fn callables<I>(operands: I, caller: &str) -> Result<Vec<Function>>
where
    I: IntoIterator,
    I::Item: Into<Operand>,
{
    operands
        .into_iter()
        .enumerate()
        .map(|(index, operand)| match operand.into() {
            Operand::Function(function) => Ok(function),
            other => Err(Error::type_kind(format!(
                "{caller}() argument {index} must be callable, not {}",
                other.kind()
            ))),
        })
        .collect()
}

fn fold(functions: Vec<Function>) -> Function {
    trace!(count = functions.len(), "building composed function");

    let mut functions = functions.into_iter();
    match functions.next() {
        None => Function::new("identity", identity_value),
        Some(outermost) => functions.fold(outermost, apply_to_result),
    }
}

/// Dynamic counterpart of `operator::apply_to_result`
fn apply_to_result(outer: Function, inner: Function) -> Function {
    let name = format!("{} . {}", outer.name(), inner.name());
    Function::new(name, move |args| outer.call1(inner.call(args)?))
}
