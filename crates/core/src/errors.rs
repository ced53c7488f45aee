/// Result type alias for aptsources-cleanup core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the functional and lazy-instantiation utilities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value of the wrong kind was supplied where a callable or a type was expected
    #[error("type error: {message}")]
    TypeKind { message: String },

    /// Attribute lookup failed on a type descriptor or on a real instance
    #[error("'{type_name}' object has no attribute '{attribute}'")]
    AttributeNotFound { type_name: String, attribute: String },

    /// The factory produced an object of a different type than declared
    #[error("factory '{factory}' produced an instance of '{actual}', expected '{expected}'")]
    TypeMismatch {
        factory: String,
        expected: String,
        actual: String,
    },

    /// A callable received the wrong number of arguments
    #[error("{target}() takes {expected} argument(s) but {actual} were given")]
    Arity {
        target: String,
        expected: String,
        actual: usize,
    },

    /// A fallible factory returned an error
    #[error("factory '{factory}' failed: {message}")]
    Factory {
        factory: String,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Instantiation failed earlier and will not be retried
    #[error("lazy instance is unusable: {reason}")]
    Poisoned { reason: String },

    /// The wrapped object was accessed while one of its own methods was running
    #[error("re-entrant access to lazy instance of '{type_name}'")]
    Reentrant { type_name: String },

    /// A method on a wrapped object failed
    #[error("call to '{target}' failed: {message}")]
    Invocation { target: String, message: String },
}

impl Error {
    /// Create a type-kind error
    #[must_use]
    pub fn type_kind(message: impl Into<String>) -> Self {
        Error::TypeKind {
            message: message.into(),
        }
    }

    /// Create an attribute-not-found error
    #[must_use]
    pub fn attribute_not_found(
        type_name: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Error::AttributeNotFound {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a type mismatch error
    #[must_use]
    pub fn type_mismatch(
        factory: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::TypeMismatch {
            factory: factory.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an arity error
    #[must_use]
    pub fn arity(target: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        Error::Arity {
            target: target.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a factory error with a source error
    #[must_use]
    pub fn factory_with_source(
        factory: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Factory {
            factory: factory.into(),
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a poisoned-instance error
    #[must_use]
    pub fn poisoned(reason: impl Into<String>) -> Self {
        Error::Poisoned {
            reason: reason.into(),
        }
    }

    /// Create a re-entrancy error
    #[must_use]
    pub fn reentrant(type_name: impl Into<String>) -> Self {
        Error::Reentrant {
            type_name: type_name.into(),
        }
    }

    /// Create an invocation error
    #[must_use]
    pub fn invocation(target: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Invocation {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the lazy instance can never be used again
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. } | Error::Factory { .. } | Error::Poisoned { .. }
        )
    }
}
