//! Error types for ansatz construction.

use quanv_ir::CircuitError;
use thiserror::Error;

/// Errors that can occur while building ansatz layers.
///
/// Degenerate configurations are reported rather than silently
/// producing empty or partial circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnsatzError {
    /// Ansatz layers span at least one qubit.
    #[error("Ansatz must span at least one qubit")]
    ZeroWidth,

    /// At least one rotation-gate kind is required per layer.
    #[error("Rotation gate list must not be empty")]
    NoRotationGates,

    /// At least one repetition is required.
    #[error("Repetition count must be at least 1")]
    ZeroReps,

    /// Unrecognized rotation-gate name.
    #[error("Unknown rotation gate '{0}' (expected one of: rx, ry, rz)")]
    UnknownRotation(String),

    /// Unrecognized entanglement name.
    #[error("Unknown entanglement '{0}' (expected one of: circular, linear, full)")]
    UnknownEntanglement(String),

    /// An underlying circuit operation failed.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Result type for ansatz construction.
pub type AnsatzResult<T> = Result<T, AnsatzError>;
