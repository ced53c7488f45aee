use serde::{Deserialize, Serialize};

/// Behaviour switches for a [`LazyInstance`](super::LazyInstance)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyOptions {
    /// Fail on names the type hint does not know instead of instantiating
    pub strict: bool,
}

impl LazyOptions {
    /// Options with strict lookup enabled
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
