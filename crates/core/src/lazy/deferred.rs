//! Method calls that wait for their object to exist

use super::instance::LazyInstance;
use super::object::Object;
use crate::errors::{Error, Result};
use crate::functional::operator::method_caller;
use crate::functional::Function;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type Getter = dyn Fn(&mut dyn Object, &[Value]) -> Result<Value>;

/// What a [`DeferredMethod`] calls once the object exists
///
/// Either a method name or an arbitrary getter that performs the call on the
/// real object.
#[derive(Clone)]
pub struct MethodTarget {
    name: Option<String>,
    getter: Rc<Getter>,
}

impl MethodTarget {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            getter: Rc::new(method_caller(name.clone())),
            name: Some(name),
        }
    }

    pub fn getter<F>(getter: F) -> Self
    where
        F: Fn(&mut dyn Object, &[Value]) -> Result<Value> + 'static,
    {
        Self {
            name: None,
            getter: Rc::new(getter),
        }
    }

    /// Method name, if the target was given by name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<&str> for MethodTarget {
    fn from(name: &str) -> Self {
        MethodTarget::named(name)
    }
}

impl From<String> for MethodTarget {
    fn from(name: String) -> Self {
        MethodTarget::named(name)
    }
}

impl fmt::Debug for MethodTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "MethodTarget({name})"),
            None => f.write_str("MethodTarget(<getter>)"),
        }
    }
}

/// A method bound to a [`LazyInstance`] that creates the object only when called
///
/// The target is looked up on the real object at each call, never ahead of
/// time. Once the object exists, calling simply delegates.
#[derive(Clone)]
pub struct DeferredMethod {
    proxy: LazyInstance,
    target: MethodTarget,
}

impl DeferredMethod {
    pub(crate) fn new(proxy: LazyInstance, target: MethodTarget) -> Self {
        trace!(method = ?target, factory = proxy.factory_name(), "binding deferred method");
        Self { proxy, target }
    }

    pub fn target(&self) -> &MethodTarget {
        &self.target
    }

    /// Whether calling would run against an existing object
    pub fn is_resolved(&self) -> bool {
        self.proxy.is_constructed()
    }

    /// Create the object if needed, then call the target with `args`
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        trace!(method = ?self.target, args = args.len(), "invoking deferred method");
        self.proxy.with_instance_mut(|instance| {
            if let Some(name) = self.target.name() {
                if let Some(arity) = instance.descriptor().method_arity(name) {
                    if !arity.accepts(args.len()) {
                        return Err(Error::arity(
                            format!("{}.{name}", instance.type_name()),
                            arity.to_string(),
                            args.len(),
                        ));
                    }
                }
            }
            (self.target.getter)(instance, args)
        })
    }

    /// Wrap into a [`Function`] so it can take part in composition
    pub fn into_function(self) -> Function {
        let name = match self.target.name() {
            Some(name) => name.to_string(),
            None => "<deferred>".to_string(),
        };
        Function::new(name, move |args| self.call(args))
    }
}

impl fmt::Debug for DeferredMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredMethod")
            .field("target", &self.target)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
