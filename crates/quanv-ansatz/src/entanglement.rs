//! Entanglement topologies for ansatz layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quanv_ir::QubitId;

use crate::error::AnsatzError;

/// The pattern of two-qubit couplings within one entanglement layer.
///
/// A topology is chosen once per ansatz and is not mutable afterwards;
/// [`couplings`](Self::couplings) enumerates the control/target pairs a
/// layer applies, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entanglement {
    /// The linear chain plus a wraparound coupling from the last qubit
    /// back to the first, emitted before the chain. `n` couplings.
    Circular,
    /// Nearest-neighbor chain `(0,1), (1,2), …`. `n - 1` couplings.
    Linear,
    /// Every ordered pair `(i, j)` with `i ≠ j`, row-major. Both
    /// directions are emitted, so this is `n(n-1)` couplings, not the
    /// `n(n-1)/2` of an undirected all-to-all pattern.
    Full,
}

impl Entanglement {
    /// The lowercase name of this topology.
    pub fn name(self) -> &'static str {
        match self {
            Entanglement::Circular => "circular",
            Entanglement::Linear => "linear",
            Entanglement::Full => "full",
        }
    }

    /// The control/target pairs of one layer, in emission order.
    ///
    /// Fewer than two qubits admit no coupling: the result is empty and
    /// in particular the circular wraparound never degenerates into a
    /// self-coupling at `num_qubits == 1`.
    pub fn couplings(self, num_qubits: u32) -> Vec<(QubitId, QubitId)> {
        if num_qubits < 2 {
            return vec![];
        }
        let chain = (0..num_qubits - 1).map(|i| (QubitId(i), QubitId(i + 1)));
        match self {
            Entanglement::Linear => chain.collect(),
            Entanglement::Circular => std::iter::once((QubitId(num_qubits - 1), QubitId(0)))
                .chain(chain)
                .collect(),
            Entanglement::Full => (0..num_qubits)
                .flat_map(|i| {
                    (0..num_qubits)
                        .filter(move |&j| j != i)
                        .map(move |j| (QubitId(i), QubitId(j)))
                })
                .collect(),
        }
    }

    /// Number of couplings one layer applies.
    pub fn num_couplings(self, num_qubits: u32) -> usize {
        let n = num_qubits as usize;
        if n < 2 {
            return 0;
        }
        match self {
            Entanglement::Circular => n,
            Entanglement::Linear => n - 1,
            Entanglement::Full => n * (n - 1),
        }
    }
}

impl fmt::Display for Entanglement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entanglement {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circular" => Ok(Entanglement::Circular),
            "linear" => Ok(Entanglement::Linear),
            "full" => Ok(Entanglement::Full),
            other => Err(AnsatzError::UnknownEntanglement(other.to_string())),
        }
    }
}
