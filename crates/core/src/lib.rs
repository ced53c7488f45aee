//! Functional building blocks for the `aptsources-cleanup` tool.
//!
//! ## Key Components
//!
//! - **`functional`**: function composition (`compose`, `pipe`, the
//!   `compose!` macro) and the operator helpers it is built from.
//! - **`lazy`**: `LazyInstance`, a handle that creates an object on first use
//!   and can hand out deferred method calls before the object exists, and
//!   `Lazy` for statically typed values.
//! - **`errors`**: the `Error` enum and `Result` alias shared by both.

pub mod errors;
pub mod functional;
pub mod lazy;

#[cfg(test)]
mod testing;

pub use self::{
    errors::{Error, Result},
    functional::{compose, pipe, Function, Operand},
    lazy::{
        Arity, Attribute, DeferredMethod, Describe, Lazy, LazyInstance, LazyOptions, MethodTarget,
        Object, TypeDescriptor,
    },
};
