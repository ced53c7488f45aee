//! Lazy instantiation for statically typed values

use once_cell::unsync;
use std::fmt;
use tracing::debug;

/// A value created by `factory` on first access
///
/// The statically typed counterpart of [`LazyInstance`](super::LazyInstance):
/// the type system already knows which members are methods, so deferred
/// calls are expressed as closures through [`bind`](Lazy::bind).
pub struct Lazy<T, F = fn() -> T> {
    inner: unsync::Lazy<T, F>,
}

impl<T, F> Lazy<T, F>
where
    F: FnOnce() -> T,
{
    pub const fn new(factory: F) -> Self {
        Self {
            inner: unsync::Lazy::new(factory),
        }
    }

    /// Get the value, running the factory on first access
    ///
    /// # Panics
    ///
    /// Panics if an earlier run of the factory panicked.
    pub fn get(&self) -> &T {
        if !self.is_constructed() {
            debug!(ty = std::any::type_name::<T>(), "instantiating lazy value");
        }
        unsync::Lazy::force(&self.inner)
    }

    /// Mutable access, running the factory on first access
    pub fn get_mut(&mut self) -> &mut T {
        if !self.is_constructed() {
            debug!(ty = std::any::type_name::<T>(), "instantiating lazy value");
        }
        unsync::Lazy::force_mut(&mut self.inner)
    }

    pub fn is_constructed(&self) -> bool {
        unsync::Lazy::get(&self.inner).is_some()
    }

    /// Consume the wrapper, creating the value if that has not happened yet
    pub fn into_inner(self) -> T {
        unsync::Lazy::into_value(self.inner).unwrap_or_else(|factory| factory())
    }

    /// Defer `method` until the returned closure is called
    ///
    /// Binding does not create the value; the first call does.
    pub fn bind<'a, A, R, M>(&'a self, method: M) -> impl Fn(A) -> R + 'a
    where
        M: Fn(&T, A) -> R + 'a,
    {
        move |args| method(self.get(), args)
    }
}

impl<T: fmt::Debug, F: FnOnce() -> T> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match unsync::Lazy::get(&self.inner) {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.write_str("Lazy(<unconstructed>)"),
        }
    }
}

impl<T: Default> Default for Lazy<T> {
    fn default() -> Self {
        Lazy::new(T::default as fn() -> T)
    }
}
