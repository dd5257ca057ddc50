//! Quanv circuit representation
//!
//! This crate provides the data structures quanv ansatz construction is
//! built on: circuits as ordered instruction sequences, a standard gate
//! vocabulary, symbolic parameters, circuit composition, and collapse of
//! a circuit into a reusable opaque gate.
//!
//! # Overview
//!
//! A [`Circuit`] is a flat, append-ordered list of [`Instruction`]s over
//! a fixed number of qubit positions. Construction is validating: wrong
//! arity, out-of-range operands, and duplicate operands are reported as
//! [`CircuitError`]s instead of producing degenerate circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] positional
//!   identifiers
//! - **Gates**: [`StandardGate`] for built-in gates and [`OpaqueGate`]
//!   for named black-box sub-circuits
//! - **Parameters**: [`ParameterExpression`] and [`ParameterVector`]
//!   for symbolic angles in variational circuits
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building a Parameterized Circuit
//!
//! ```rust
//! use quanv_ir::{Circuit, ParameterVector, QubitId};
//!
//! let theta = ParameterVector::new("theta", 2);
//! let mut circuit = Circuit::new("layer", 2).unwrap();
//!
//! circuit.ry(theta[0].clone(), QubitId(0)).unwrap();
//! circuit.ry(theta[1].clone(), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_parameters(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Binding Parameters
//!
//! ```rust
//! use quanv_ir::{Circuit, ParameterVector, QubitId};
//! use std::f64::consts::PI;
//!
//! let theta = ParameterVector::new("theta", 1);
//! let mut circuit = Circuit::new("rot", 1).unwrap();
//! circuit.rx(theta[0].clone(), QubitId(0)).unwrap();
//!
//! let bound = circuit.bind(&theta.bindings(&[PI / 4.0])).unwrap();
//! assert!(!bound.is_parameterized());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P` | 1 | Phase gate |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Pauli gates |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{CircuitError, CircuitResult};
pub use gate::{Gate, GateKind, OpaqueGate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, ParameterVector};
pub use qubit::{ClbitId, QubitId};
