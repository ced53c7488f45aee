//! The capability set a lazily created object exposes

use super::descriptor::TypeDescriptor;
use crate::errors::Result;
use serde_json::Value;
use std::any::Any;

/// Upcast helper so `dyn Object` can be downcast to its concrete type
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An object whose attributes and methods can be resolved by name
///
/// Implementations report missing names with
/// [`Error::AttributeNotFound`](crate::Error::AttributeNotFound).
pub trait Object: AsAny {
    /// The shape of this object's type
    fn descriptor(&self) -> &TypeDescriptor;

    /// Read a non-method attribute
    fn get_attribute(&self, name: &str) -> Result<Value>;

    /// Invoke a method
    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<Value>;

    fn type_name(&self) -> &str {
        self.descriptor().name()
    }
}
