//! Machine configuration and its validation.
//!
//! Validation uses Stillwater's `Validation` type so every problem with a
//! configuration is reported at once instead of one per attempt.

use crate::builder::error::{BuildError, ConfigViolation};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest accepted machine label, in bytes.
pub const MAX_LABEL_LEN: usize = 64;

/// Largest accepted transition log capacity.
pub const MAX_HISTORY_CAPACITY: usize = 4096;

/// What `init` does on a machine that is already running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinitPolicy {
    /// Reject with `MachineError::AlreadyInitialized`.
    #[default]
    Forbid,

    /// Install the new initial handler and deliver INIT and ENTRY to it. The
    /// previous handler receives nothing.
    Reset,
}

/// Settings for one machine instance.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::builder::{MachineConfig, ReinitPolicy};
///
/// let config = MachineConfig::from_json_str(
///     r#"{ "label": "door", "reinit": "reset", "history_capacity": 8 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.label, "door");
/// assert_eq!(config.reinit, ReinitPolicy::Reset);
/// assert!(config.validate().is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Name attached to every log line of the machine
    pub label: String,
    pub reinit: ReinitPolicy,
    /// Number of transitions retained; 0 disables the log
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: "fsm".to_string(),
            reinit: ReinitPolicy::Forbid,
            history_capacity: 0,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        let label = self.label.trim();
        checks.push(if label.is_empty() {
            Validation::fail(ConfigViolation::EmptyLabel)
        } else {
            Validation::success(())
        });

        checks.push(if self.label.len() > MAX_LABEL_LEN {
            Validation::fail(ConfigViolation::LabelTooLong {
                len: self.label.len(),
                max: MAX_LABEL_LEN,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.history_capacity > MAX_HISTORY_CAPACITY {
            Validation::fail(ConfigViolation::HistoryTooLarge {
                requested: self.history_capacity,
                max: MAX_HISTORY_CAPACITY,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}
