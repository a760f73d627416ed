//! Configuration options for encounter derivation.

use serde::{Deserialize, Serialize};

/// Options controlling how a batch of encounters is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveOptions {
    /// Derive encounters on the rayon thread pool.
    ///
    /// Results are always returned in input order.
    pub parallel: bool,
}

impl DeriveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }
}
