//! Variational ansatz layers for quanvolutional circuits
//!
//! This crate generates the parameterized rotation-and-entanglement
//! layers used as trainable kernels in quanvolutional models. A layer
//! alternates symbolic rotation sub-circuits with a fixed two-qubit
//! coupling pattern; the caller binds concrete angles once an optimizer
//! has produced them.
//!
//! # Overview
//!
//! - [`efficient_su2`] — the layer generator: rotation layers per
//!   configured gate kind, an entanglement layer per repetition, and a
//!   closing set of rotations, all over a freshly allocated
//!   [`ParameterVector`](quanv_ir::ParameterVector).
//! - [`random_layer`] / [`random_layer_gate`] — the same layer packaged
//!   for reuse: expanded with barrier fences, or collapsed into an
//!   opaque gate that drops into a host circuit as a black box.
//! - [`Entanglement`] — circular, linear, or full coupling topology.
//! - [`RotationGate`] — the rotation kinds a layer is built from.
//!
//! # Example
//!
//! ```rust
//! use quanv_ansatz::{efficient_su2, Entanglement, Esu2Config, RotationGate};
//!
//! let config = Esu2Config::default()
//!     .with_gates(vec![RotationGate::Ry, RotationGate::Rz])
//!     .with_entanglement(Entanglement::Linear)
//!     .with_reps(2);
//!
//! let ansatz = efficient_su2(4, &config).unwrap();
//!
//! // (reps + 1) rotation-layer sets, one parameter per gate kind per qubit.
//! assert_eq!(ansatz.num_parameters(), 3 * 2 * 4);
//! assert_eq!(ansatz.circuit.num_parameters(), ansatz.parameters.len());
//! ```

pub mod entanglement;
pub mod error;
pub mod esu2;
pub mod layer;
pub mod rotation;

pub use entanglement::Entanglement;
pub use error::{AnsatzError, AnsatzResult};
pub use esu2::{efficient_su2, Ansatz, Esu2Config};
pub use layer::{random_layer, random_layer_gate, RandomLayerConfig};
pub use rotation::RotationGate;
