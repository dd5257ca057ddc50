//! The EfficientSU2-style layer generator.
//!
//! An ansatz alternates rotation layers (one parameterized rotation per
//! qubit, per requested gate kind) with a fixed entanglement pattern,
//! and closes with one final set of rotation layers. All angles are
//! symbolic: the builder allocates a [`ParameterVector`] and consumes
//! its elements in order, and the caller binds concrete values later.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quanv_ir::{Circuit, ParameterVector, QubitId};

use crate::entanglement::Entanglement;
use crate::error::{AnsatzError, AnsatzResult};
use crate::rotation::RotationGate;

/// Configuration for [`efficient_su2`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Esu2Config {
    /// Rotation-gate kinds per layer, applied in list order.
    pub gates: Vec<RotationGate>,
    /// Number of rotation/entanglement repetitions.
    pub reps: usize,
    /// Two-qubit coupling pattern.
    pub entanglement: Entanglement,
    /// Whether to fence layers with barriers.
    pub insert_barriers: bool,
}

impl Default for Esu2Config {
    fn default() -> Self {
        Self {
            gates: vec![RotationGate::Rx, RotationGate::Rz],
            reps: 1,
            entanglement: Entanglement::Circular,
            insert_barriers: true,
        }
    }
}

impl Esu2Config {
    /// Replace the rotation-gate kinds.
    #[must_use]
    pub fn with_gates(mut self, gates: Vec<RotationGate>) -> Self {
        self.gates = gates;
        self
    }

    /// Replace the repetition count.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Replace the entanglement topology.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    /// Enable or disable barrier insertion.
    #[must_use]
    pub fn with_barriers(mut self, insert_barriers: bool) -> Self {
        self.insert_barriers = insert_barriers;
        self
    }

    /// Number of parameters [`efficient_su2`] will allocate for a
    /// circuit of `num_qubits` under this configuration.
    ///
    /// One parameter per qubit, per gate kind, per rotation-layer set;
    /// there are `reps + 1` sets (each repetition emits one, plus the
    /// closing set after the last entanglement layer). At the default
    /// `reps == 1` this is `2 × |gates| × num_qubits`.
    pub fn num_parameters(&self, num_qubits: u32) -> usize {
        (self.reps + 1) * self.gates.len() * num_qubits as usize
    }
}

/// The product of an ansatz builder: the circuit and the parameter
/// vector it consumes.
///
/// The vector's names are the handle for later binding:
///
/// ```rust
/// use quanv_ansatz::{efficient_su2, Esu2Config};
///
/// let ansatz = efficient_su2(2, &Esu2Config::default()).unwrap();
/// let values = vec![0.1; ansatz.parameters.len()];
/// let bound = ansatz
///     .circuit
///     .bind(&ansatz.parameters.bindings(&values))
///     .unwrap();
/// assert!(!bound.is_parameterized());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ansatz {
    /// The symbolically parameterized circuit.
    pub circuit: Circuit,
    /// The placeholders the circuit consumes, in consumption order.
    pub parameters: ParameterVector,
}

impl Ansatz {
    /// Number of allocated parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }
}

/// Build an EfficientSU2-style ansatz circuit.
///
/// Per repetition: one rotation sub-circuit per configured gate kind,
/// then the entanglement sub-circuit (skipped entirely on a single
/// qubit). The final repetition additionally appends one more set of
/// rotation sub-circuits, separated from the entanglement layer by a
/// barrier when barriers are enabled, and every repetition ends with a
/// barrier when enabled.
///
/// Every element of the returned [`ParameterVector`] is consumed by
/// exactly one rotation, so `ansatz.circuit.num_parameters() ==
/// ansatz.parameters.len()` for every configuration.
///
/// Degenerate requests — zero qubits, an empty gate list, zero
/// repetitions — are errors.
pub fn efficient_su2(num_qubits: u32, config: &Esu2Config) -> AnsatzResult<Ansatz> {
    if num_qubits == 0 {
        return Err(AnsatzError::ZeroWidth);
    }
    if config.gates.is_empty() {
        return Err(AnsatzError::NoRotationGates);
    }
    if config.reps == 0 {
        return Err(AnsatzError::ZeroReps);
    }

    let num_params = config.num_parameters(num_qubits);
    debug!(
        num_qubits,
        reps = config.reps,
        gates = config.gates.len(),
        entanglement = %config.entanglement,
        num_params,
        "building efficient_su2 ansatz"
    );

    let theta = ParameterVector::new("theta", num_params);
    let mut circuit = Circuit::new("efficient_su2", num_qubits)?;
    let all_qubits: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();
    let mut next = 0usize;

    for rep in 0..config.reps {
        for &gate in &config.gates {
            let block = rotation_layer(gate, num_qubits, &theta, next)?;
            circuit.compose(&block, &all_qubits)?;
            next += num_qubits as usize;
        }

        if num_qubits > 1 {
            let block = entanglement_layer(config.entanglement, num_qubits)?;
            circuit.compose(&block, &all_qubits)?;
        }

        if rep == config.reps - 1 {
            if config.insert_barriers {
                circuit.barrier_all()?;
            }
            for &gate in &config.gates {
                let block = rotation_layer(gate, num_qubits, &theta, next)?;
                circuit.compose(&block, &all_qubits)?;
                next += num_qubits as usize;
            }
        }

        if config.insert_barriers {
            circuit.barrier_all()?;
        }
    }

    debug_assert_eq!(next, theta.len());
    Ok(Ansatz {
        circuit,
        parameters: theta,
    })
}

/// One rotation sub-circuit: `gate(theta[offset + i])` on each qubit `i`.
fn rotation_layer(
    gate: RotationGate,
    num_qubits: u32,
    theta: &ParameterVector,
    offset: usize,
) -> AnsatzResult<Circuit> {
    let mut block = Circuit::new(gate.name(), num_qubits)?;
    for i in 0..num_qubits {
        gate.apply(&mut block, theta[offset + i as usize].clone(), QubitId(i))?;
    }
    Ok(block)
}

/// One entanglement sub-circuit: a CX per coupling of the topology.
fn entanglement_layer(entanglement: Entanglement, num_qubits: u32) -> AnsatzResult<Circuit> {
    let mut block = Circuit::new(entanglement.name(), num_qubits)?;
    for (control, target) in entanglement.couplings(num_qubits) {
        block.cx(control, target)?;
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanv_ir::QubitId;

    fn cx_pairs(circuit: &Circuit) -> Vec<(u32, u32)> {
        circuit
            .iter()
            .filter(|inst| inst.name() == "cx")
            .map(|inst| (inst.qubits[0].0, inst.qubits[1].0))
            .collect()
    }

    #[test]
    fn test_default_parameter_count() {
        // Default config: two gate kinds, one repetition.
        let ansatz = efficient_su2(4, &Esu2Config::default()).unwrap();
        assert_eq!(ansatz.num_parameters(), 2 * 2 * 4);
        assert_eq!(ansatz.circuit.num_parameters(), ansatz.parameters.len());
    }

    #[test]
    fn test_every_parameter_consumed_exactly_once() {
        let config = Esu2Config::default()
            .with_gates(vec![RotationGate::Ry])
            .with_reps(3);
        let ansatz = efficient_su2(3, &config).unwrap();

        assert_eq!(ansatz.num_parameters(), (3 + 1) * 1 * 3);
        // Consumption order matches allocation order, with no gaps.
        assert_eq!(ansatz.circuit.parameters(), ansatz.parameters.names());
    }

    #[test]
    fn test_single_qubit_has_no_entanglement() {
        let ansatz = efficient_su2(1, &Esu2Config::default()).unwrap();
        assert_eq!(ansatz.circuit.count_ops("cx"), 0);
        assert_eq!(ansatz.num_parameters(), 2 * 2);
    }

    #[test]
    fn test_circular_includes_wraparound() {
        let ansatz = efficient_su2(4, &Esu2Config::default()).unwrap();
        let pairs = cx_pairs(&ansatz.circuit);
        assert!(pairs.contains(&(3, 0)));
        // Wraparound precedes the chain.
        assert_eq!(pairs, vec![(3, 0), (0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_entanglement_count_per_repetition() {
        let config = Esu2Config::default()
            .with_entanglement(Entanglement::Full)
            .with_reps(2);
        let ansatz = efficient_su2(3, &config).unwrap();
        assert_eq!(ansatz.circuit.count_ops("cx"), 2 * 3 * 2);
    }

    #[test]
    fn test_barrier_placement() {
        // One barrier closes each repetition, plus one more between the
        // last entanglement layer and the closing rotations.
        for reps in 1..4 {
            let config = Esu2Config::default().with_reps(reps);
            let ansatz = efficient_su2(2, &config).unwrap();
            assert_eq!(ansatz.circuit.count_ops("barrier"), reps + 1);
        }

        let bare = Esu2Config::default().with_barriers(false);
        let ansatz = efficient_su2(2, &bare).unwrap();
        assert_eq!(ansatz.circuit.count_ops("barrier"), 0);
    }

    #[test]
    fn test_layer_structure() {
        // 2 qubits, defaults: rx pair, rz pair, circular couplings,
        // barrier, closing rx and rz pairs, barrier.
        let ansatz = efficient_su2(2, &Esu2Config::default()).unwrap();
        let names: Vec<&str> = ansatz.circuit.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "rx", "rx", "rz", "rz", "cx", "cx", "barrier", "rx", "rx", "rz", "rz", "barrier",
            ]
        );

        // First rotation layer consumes theta[0], theta[1] in qubit order.
        let first = ansatz.circuit.instructions()[0].as_gate().unwrap();
        assert_eq!(first.parameters()[0].to_string(), "theta[0]");
        assert_eq!(ansatz.circuit.instructions()[0].qubits, vec![QubitId(0)]);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert!(matches!(
            efficient_su2(0, &Esu2Config::default()),
            Err(AnsatzError::ZeroWidth)
        ));
        assert!(matches!(
            efficient_su2(2, &Esu2Config::default().with_gates(vec![])),
            Err(AnsatzError::NoRotationGates)
        ));
        assert!(matches!(
            efficient_su2(2, &Esu2Config::default().with_reps(0)),
            Err(AnsatzError::ZeroReps)
        ));
    }
}
