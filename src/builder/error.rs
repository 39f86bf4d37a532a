//! Build errors for machine construction.

use thiserror::Error;

/// A single rule broken by a [`MachineConfig`](crate::builder::MachineConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Machine label must not be empty")]
    EmptyLabel,

    #[error("Machine label is {len} bytes long, at most {max} allowed")]
    LabelTooLong { len: usize, max: usize },

    #[error("History capacity {requested} exceeds the maximum of {max}")]
    HistoryTooLarge { requested: usize, max: usize },
}

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid machine configuration ({} violation(s)): {}", .0.len(), summarize(.0))]
    InvalidConfig(Vec<ConfigViolation>),

    #[error("Failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
