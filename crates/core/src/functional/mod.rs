//! Functional programming utilities
//!
//! Function composition over plain closures and over dynamically typed
//! [`Function`]s, plus the small operator helpers they are built from.

pub mod callable;
pub mod composition;
pub mod operator;

pub use callable::{Function, Operand};
pub use composition::{compose, pipe, Compose};
pub use operator::{apply_to_result, identity, method_caller};

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::composition::{pipe, Compose};
    pub use super::operator::*;
    pub use super::{Function, Operand};
    pub use crate::compose;
}
