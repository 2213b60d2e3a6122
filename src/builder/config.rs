//! Model configuration.

use crate::builder::error::BuildError;
use serde::{Deserialize, Serialize};

/// Optional bounds applied when a model is built.
///
/// Every field defaults to `None` (unbounded). Bounds turn what would be an
/// overflow in a fixed-size representation into a
/// [`ModelError::CapacityExceeded`](crate::core::ModelError::CapacityExceeded).
///
/// # Example
///
/// ```rust
/// use unfolding::builder::ModelConfig;
///
/// let config = ModelConfig::from_json(r#"{ "max_transitions_per_actor": 30 }"#).unwrap();
/// assert_eq!(config.max_transitions_per_actor, Some(30));
/// assert_eq!(config.max_mailbox_log, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Longest transition sequence an actor may have
    pub max_transitions_per_actor: Option<usize>,

    /// Most records each send or receive log of a mailbox may hold
    pub max_mailbox_log: Option<usize>,
}

impl ModelConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::Config(e.to_string()))
    }
}
