use serde::{Deserialize, Serialize};

/// How composition treats two descriptors with the same `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The descriptor registered last replaces earlier ones.
    #[default]
    LastWriteWins,
    /// Composition fails with `ActionError::DuplicateType`.
    Reject,
}

/// Options applied when a reducer is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Accept descriptors whose `type` is the empty string (default: true).
    #[serde(default = "default_allow_empty_type")]
    pub allow_empty_type: bool,
}

fn default_allow_empty_type() -> bool {
    true
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            allow_empty_type: default_allow_empty_type(),
        }
    }
}

impl ComposeOptions {
    /// Reject duplicate and empty types.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            allow_empty_type: false,
        }
    }
}
