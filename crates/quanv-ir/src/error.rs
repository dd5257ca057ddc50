//! Error types for the circuit crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building or rewriting circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// Qubit operand outside the circuit's width.
    #[error("Qubit {qubit} out of range for circuit of {num_qubits} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// The circuit width.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit operand outside the circuit's classical width.
    #[error("Classical bit {clbit} out of range for circuit of {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// The classical width.
        num_clbits: u32,
    },

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Composition target list does not match the composed circuit's width.
    #[error("Cannot compose circuit of {expected} qubits onto {got} target qubits")]
    WidthMismatch {
        /// Width of the circuit being composed.
        expected: u32,
        /// Number of target qubits supplied.
        got: u32,
    },

    /// Circuit contains an operation that cannot live inside a gate.
    #[error("Cannot collapse circuit '{circuit}' to a gate: contains '{op}'")]
    NonUnitary {
        /// Name of the circuit.
        circuit: String,
        /// The offending operation.
        op: String,
    },

    /// A symbol was left unbound by a binding map.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// Circuits must span at least one qubit.
    #[error("Circuit '{0}' must have at least one qubit")]
    ZeroWidth(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
