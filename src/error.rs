//! Errors raised while constructing or baking a model.

use thiserror::Error;

/// Errors that can occur when building and baking an HMM.
///
/// Construction errors are returned by the call that caused them
/// (`add_state`, `add_transition`), bake errors by `HmmBuilder::bake`.
/// Sequences the model cannot generate are not errors: they score
/// `Prob::zero()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    #[error("No such state: '{name}' is not registered in model '{model}'")]
    UnknownState { name: String, model: String },

    #[error("State '{name}' is already registered in model '{model}'")]
    DuplicateState { name: String, model: String },

    #[error("Transition {source_name} -> {target_name} touches a reserved endpoint in the wrong direction")]
    ReservedEndpoint {
        source_name: String,
        target_name: String,
    },

    #[error("Invalid weight {weight} for transition {source_name} -> {target_name}. Weights must be finite and nonnegative")]
    InvalidWeight {
        source_name: String,
        target_name: String,
        weight: f64,
    },

    #[error("State '{name}' is unreachable: {reason}")]
    UnreachableState { name: String, reason: String },

    #[error("Silent states form a cycle through '{name}'")]
    SilentCycle { name: String },
}
