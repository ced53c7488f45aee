//! Lazy instantiation of expensive or order-sensitive objects
//!
//! [`LazyInstance`] wraps a factory for a dynamically resolved [`Object`] and
//! creates it on first real use. A [`TypeDescriptor`] supplied as type hint
//! lets method lookups hand out [`DeferredMethod`]s without creating the
//! object, and is checked against the factory's product. [`Lazy`] covers the
//! statically typed case.

pub mod deferred;
pub mod descriptor;
pub mod instance;
pub mod object;
pub mod options;
pub mod typed;

pub use deferred::{DeferredMethod, MethodTarget};
pub use descriptor::{Arity, Describe, Member, TypeDescriptor, TypeDescriptorBuilder};
pub use instance::{Attribute, LazyInstance, LazyInstanceBuilder};
pub use object::{AsAny, Object};
pub use options::LazyOptions;
pub use typed::Lazy;
