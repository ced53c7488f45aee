//! Lazily instantiated objects behind a resolve-by-name proxy

use super::deferred::{DeferredMethod, MethodTarget};
use super::descriptor::{Describe, Member, TypeDescriptor};
use super::object::Object;
use super::options::LazyOptions;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

type Factory = Box<dyn FnOnce() -> Result<Box<dyn Object>>>;

enum State {
    Unconstructed {
        factory: Factory,
        type_hint: Option<TypeDescriptor>,
    },
    /// The factory is running
    Constructing,
    Constructed(Box<dyn Object>),
    /// Instantiation failed; holds the rendered failure
    Poisoned(String),
}

struct Shared {
    factory_name: String,
    options: LazyOptions,
    state: RefCell<State>,
}

/// Result of resolving a name on a [`LazyInstance`]
#[derive(Debug)]
pub enum Attribute {
    Value(Value),
    Method(DeferredMethod),
}

impl Attribute {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Attribute::Value(value) => Some(value),
            Attribute::Method(_) => None,
        }
    }

    pub fn into_method(self) -> Option<DeferredMethod> {
        match self {
            Attribute::Method(method) => Some(method),
            Attribute::Value(_) => None,
        }
    }
}

/// A handle to an object that is created on first use
///
/// The factory runs at most once over the lifetime of the instance. Names
/// that the type hint lists as methods resolve to [`DeferredMethod`]s without
/// creating the object; anything else forces creation and is delegated to the
/// real object. Clones share the same underlying object.
#[derive(Clone)]
pub struct LazyInstance {
    shared: Rc<Shared>,
}

impl LazyInstance {
    /// Wrap an infallible factory with default options and no type hint
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Object,
        F: FnOnce() -> T + 'static,
    {
        Self::builder(factory).build()
    }

    /// Wrap a fallible factory; an error poisons the instance
    pub fn try_new<T, E, F>(factory: F) -> Self
    where
        T: Object,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: FnOnce() -> std::result::Result<T, E> + 'static,
    {
        Self::try_builder(factory).build()
    }

    /// Instantiate `T::default()` lazily, using `T`'s own descriptor as type hint
    pub fn of<T>() -> Result<Self>
    where
        T: Object + Describe + Default,
    {
        Ok(Self::builder(T::default)
            .factory_name(std::any::type_name::<T>())
            .type_hint(T::describe()?)
            .build())
    }

    pub fn builder<T, F>(factory: F) -> LazyInstanceBuilder
    where
        T: Object,
        F: FnOnce() -> T + 'static,
    {
        let factory: Factory = Box::new(move || Ok(Box::new(factory()) as Box<dyn Object>));
        LazyInstanceBuilder::from_factory(std::any::type_name::<F>(), factory)
    }

    pub fn try_builder<T, E, F>(factory: F) -> LazyInstanceBuilder
    where
        T: Object,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: FnOnce() -> std::result::Result<T, E> + 'static,
    {
        let factory_name = std::any::type_name::<F>();
        let factory: Factory = Box::new(move || match factory() {
            Ok(instance) => Ok(Box::new(instance) as Box<dyn Object>),
            Err(error) => {
                let error = error.into();
                let message = error.to_string();
                Err(Error::factory_with_source(factory_name, message, error))
            }
        });
        LazyInstanceBuilder::from_factory(factory_name, factory)
    }

    pub fn options(&self) -> LazyOptions {
        self.shared.options
    }

    pub fn factory_name(&self) -> &str {
        &self.shared.factory_name
    }

    pub fn is_constructed(&self) -> bool {
        matches!(
            self.shared.state.try_borrow().as_deref(),
            Ok(State::Constructed(_))
        )
    }

    pub fn is_poisoned(&self) -> bool {
        matches!(
            self.shared.state.try_borrow().as_deref(),
            Ok(State::Poisoned(_))
        )
    }

    /// The type hint, while the object has not been created yet
    pub fn type_hint(&self) -> Option<TypeDescriptor> {
        match self.shared.state.try_borrow().as_deref() {
            Ok(State::Unconstructed { type_hint, .. }) => type_hint.clone(),
            _ => None,
        }
    }

    /// Create the object now unless that already happened
    pub fn force(&self) -> Result<()> {
        let (factory, type_hint) = {
            let mut state = self.state_mut()?;
            match std::mem::replace(&mut *state, State::Constructing) {
                State::Unconstructed { factory, type_hint } => (factory, type_hint),
                settled => {
                    let outcome = match &settled {
                        State::Constructed(_) => Ok(()),
                        State::Poisoned(reason) => Err(Error::poisoned(reason.clone())),
                        _ => Err(self.reentrant()),
                    };
                    *state = settled;
                    return outcome;
                }
            }
        };

        debug!(
            factory = %self.shared.factory_name,
            type_hint = ?type_hint.as_ref().map(TypeDescriptor::name),
            "instantiating lazy object"
        );
        let _unwind = PoisonOnUnwind(self);
        let outcome = factory().and_then(|instance| self.check_type(instance, type_hint.as_ref()));

        let mut state = self.state_mut()?;
        match outcome {
            Ok(instance) => {
                *state = State::Constructed(instance);
                Ok(())
            }
            Err(error) => {
                debug!(factory = %self.shared.factory_name, %error, "lazy object poisoned");
                *state = State::Poisoned(error.to_string());
                Err(error)
            }
        }
    }

    fn check_type(
        &self,
        instance: Box<dyn Object>,
        type_hint: Option<&TypeDescriptor>,
    ) -> Result<Box<dyn Object>> {
        match type_hint {
            Some(hint) if !hint.is_instance(instance.descriptor()) => Err(Error::type_mismatch(
                self.shared.factory_name.as_str(),
                hint.name(),
                instance.type_name(),
            )),
            _ => Ok(instance),
        }
    }

    /// Borrow the real object, creating it if necessary
    pub fn instance(&self) -> Result<Ref<'_, dyn Object>> {
        self.force()?;
        let state = self
            .shared
            .state
            .try_borrow()
            .map_err(|_| self.reentrant())?;
        Ref::filter_map(state, |state| match state {
            State::Constructed(instance) => Some(&**instance),
            _ => None,
        })
        .map_err(|_| self.reentrant())
    }

    /// Borrow the real object as its concrete type
    pub fn downcast_ref<T: Object>(&self) -> Result<Ref<'_, T>> {
        let instance = self.instance()?;
        let actual = instance.type_name().to_string();
        let expected = std::any::type_name::<T>();
        Ref::filter_map(instance, |object| object.as_any().downcast_ref::<T>())
            .map_err(|_| Error::type_mismatch("downcast", expected, actual))
    }

    /// Run `f` against the real object, creating it if necessary
    pub fn with_instance<R>(&self, f: impl FnOnce(&dyn Object) -> Result<R>) -> Result<R> {
        let instance = self.instance()?;
        f(&*instance)
    }

    /// Run `f` against the real object mutably, creating it if necessary
    pub fn with_instance_mut<R>(&self, f: impl FnOnce(&mut dyn Object) -> Result<R>) -> Result<R> {
        self.force()?;
        let mut state = self.state_mut()?;
        match &mut *state {
            State::Constructed(instance) => f(&mut **instance),
            _ => Err(self.reentrant()),
        }
    }

    /// Resolve `name` to a value or a deferred method
    pub fn resolve(&self, name: &str) -> Result<Attribute> {
        if self.hinted_method(name)? {
            trace!(method = name, "deferring method through type hint");
            return Ok(Attribute::Method(self.bind_method(name)));
        }

        let is_method = self.with_instance(|instance| Ok(instance.descriptor().is_method(name)))?;
        if is_method {
            Ok(Attribute::Method(self.bind_method(name)))
        } else {
            self.with_instance(|instance| instance.get_attribute(name))
                .map(Attribute::Value)
        }
    }

    /// Resolve `name` and call it with `args`
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.resolve(name)? {
            Attribute::Method(method) => method.call(args),
            Attribute::Value(_) => Err(Error::type_kind(format!(
                "attribute '{name}' is not callable"
            ))),
        }
    }

    /// Whether the type hint says `name` is a method
    ///
    /// In strict mode a name the hint does not know is an error; otherwise it is
    /// simply not a method.
    fn hinted_method(&self, name: &str) -> Result<bool> {
        let state = self
            .shared
            .state
            .try_borrow()
            .map_err(|_| self.reentrant())?;
        let State::Unconstructed {
            type_hint: Some(hint),
            ..
        } = &*state
        else {
            return Ok(false);
        };

        match hint.member(name) {
            Some(Member::Method(_)) => Ok(true),
            Some(Member::Attribute) => Ok(false),
            None if self.shared.options.strict => {
                Err(Error::attribute_not_found(hint.name(), name))
            }
            None => Ok(false),
        }
    }

    /// Defer a method call until it is invoked
    pub fn bind_method(&self, target: impl Into<MethodTarget>) -> DeferredMethod {
        DeferredMethod::new(self.clone(), target.into())
    }

    /// Defer several method calls; the deferred methods are produced in order
    pub fn bind_methods<I>(&self, targets: I) -> impl Iterator<Item = DeferredMethod>
    where
        I: IntoIterator,
        I::Item: Into<MethodTarget>,
    {
        let proxy = self.clone();
        targets.into_iter().map(move |target| proxy.bind_method(target))
    }

    fn state_mut(&self) -> Result<RefMut<'_, State>> {
        self.shared
            .state
            .try_borrow_mut()
            .map_err(|_| self.reentrant())
    }

    fn reentrant(&self) -> Error {
        Error::reentrant(self.shared.factory_name.as_str())
    }
}

/// Poisons an instance whose factory unwound instead of returning
struct PoisonOnUnwind<'a>(&'a LazyInstance);

impl Drop for PoisonOnUnwind<'_> {
    fn drop(&mut self) {
        let Ok(mut state) = self.0.shared.state.try_borrow_mut() else {
            return;
        };
        if matches!(*state, State::Constructing) {
            let name = &self.0.shared.factory_name;
            debug!(factory = %name, "lazy object factory panicked");
            *state = State::Poisoned(format!("factory '{name}' panicked"));
        }
    }
}

impl fmt::Debug for LazyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.shared.state.try_borrow().as_deref() {
            Ok(State::Unconstructed { .. }) => "unconstructed",
            Ok(State::Constructing) | Err(_) => "busy",
            Ok(State::Constructed(_)) => "constructed",
            Ok(State::Poisoned(_)) => "poisoned",
        };
        f.debug_struct("LazyInstance")
            .field("factory", &self.shared.factory_name)
            .field("options", &self.shared.options)
            .field("state", &state)
            .finish()
    }
}

/// Builder for [`LazyInstance`]
pub struct LazyInstanceBuilder {
    factory_name: String,
    factory: Factory,
    type_hint: Option<TypeDescriptor>,
    options: LazyOptions,
}

impl LazyInstanceBuilder {
    fn from_factory(factory_name: &str, factory: Factory) -> Self {
        Self {
            factory_name: factory_name.to_string(),
            factory,
            type_hint: None,
            options: LazyOptions::default(),
        }
    }

    /// Expected type of the factory's product
    pub fn type_hint(mut self, type_hint: TypeDescriptor) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn options(mut self, options: LazyOptions) -> Self {
        self.options = options;
        self
    }

    /// Name used for the factory in errors and logs
    pub fn factory_name(mut self, name: impl Into<String>) -> Self {
        self.factory_name = name.into();
        self
    }

    pub fn build(self) -> LazyInstance {
        LazyInstance {
            shared: Rc::new(Shared {
                factory_name: self.factory_name,
                options: self.options,
                state: RefCell::new(State::Unconstructed {
                    factory: self.factory,
                    type_hint: self.type_hint,
                }),
            }),
        }
    }
}
