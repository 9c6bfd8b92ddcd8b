use serde::{Deserialize, Serialize};

/// The trivial payload exchanged between client and server.
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub value: i64,
}

/// Process-wide read-only fixture backing `GET /resource`.
///
/// Exactly one instance exists per server process; it is created at startup
/// and never mutated.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    default: Resource,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self {
            default: Resource { value: 0 },
        }
    }

    pub fn default_resource(&self) -> Resource {
        self.default
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}
