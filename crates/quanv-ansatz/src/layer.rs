//! Reusable layer gates.
//!
//! Wraps the [`efficient_su2`](crate::efficient_su2) generator into a
//! form convenient for quanvolutional models: either an expanded
//! circuit with barrier fences, or the same layer collapsed into an
//! opaque gate that drops into a larger circuit as a black box.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quanv_ir::{Circuit, Gate, ParameterVector, QubitId};

use crate::entanglement::Entanglement;
use crate::error::AnsatzResult;
use crate::esu2::{efficient_su2, Ansatz, Esu2Config};
use crate::rotation::RotationGate;

/// Configuration for [`random_layer`] and [`random_layer_gate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomLayerConfig {
    /// Rotation-gate kinds per layer, applied in list order.
    pub gates: Vec<RotationGate>,
    /// Two-qubit coupling pattern.
    pub entanglement: Entanglement,
    /// Number of rotation/entanglement repetitions.
    pub reps: usize,
}

impl Default for RandomLayerConfig {
    fn default() -> Self {
        Self {
            gates: vec![RotationGate::Rx, RotationGate::Rz, RotationGate::Ry],
            entanglement: Entanglement::Linear,
            reps: 1,
        }
    }
}

impl RandomLayerConfig {
    /// Replace the rotation-gate kinds.
    #[must_use]
    pub fn with_gates(mut self, gates: Vec<RotationGate>) -> Self {
        self.gates = gates;
        self
    }

    /// Replace the entanglement topology.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    /// Replace the repetition count.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    fn esu2(&self, insert_barriers: bool) -> Esu2Config {
        Esu2Config {
            gates: self.gates.clone(),
            reps: self.reps,
            entanglement: self.entanglement,
            insert_barriers,
        }
    }
}

/// Build a layer as an expanded circuit.
///
/// The circuit keeps its barrier fences, so downstream passes will not
/// merge rotations across layer boundaries.
pub fn random_layer(num_qubits: u32, config: &RandomLayerConfig) -> AnsatzResult<Ansatz> {
    let inner = efficient_su2(num_qubits, &config.esu2(true))?;

    let all_qubits: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();
    let mut circuit = Circuit::new("random_layer", num_qubits)?;
    circuit.compose(&inner.circuit, &all_qubits)?;

    Ok(Ansatz {
        circuit,
        parameters: inner.parameters,
    })
}

/// Build a layer and collapse it into an opaque gate.
///
/// Barriers are omitted: a barrier cannot live inside a gate, and the
/// collapsed form is already opaque to optimization. The returned
/// [`ParameterVector`] names the gate's symbolic parameters for later
/// binding.
pub fn random_layer_gate(
    num_qubits: u32,
    config: &RandomLayerConfig,
) -> AnsatzResult<(Gate, ParameterVector)> {
    let inner = efficient_su2(num_qubits, &config.esu2(false))?;

    let all_qubits: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();
    let mut circuit = Circuit::new("random_layer", num_qubits)?;
    circuit.compose(&inner.circuit, &all_qubits)?;

    let gate = circuit.to_gate("random layer")?;
    debug!(num_qubits, params = inner.parameters.len(), "collapsed random layer gate");
    Ok((gate, inner.parameters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanv_ir::GateKind;

    #[test]
    fn test_random_layer_keeps_barriers() {
        let ansatz = random_layer(3, &RandomLayerConfig::default()).unwrap();
        assert_eq!(ansatz.circuit.name(), "random_layer");
        assert_eq!(ansatz.circuit.count_ops("barrier"), 2);
        // Three gate kinds, one repetition.
        assert_eq!(ansatz.num_parameters(), 2 * 3 * 3);
    }

    #[test]
    fn test_random_layer_defaults_are_linear() {
        let ansatz = random_layer(4, &RandomLayerConfig::default()).unwrap();
        assert_eq!(
            ansatz.circuit.count_ops("cx"),
            Entanglement::Linear.num_couplings(4)
        );
    }

    #[test]
    fn test_random_layer_gate_is_opaque_and_barrier_free() {
        let (gate, params) = random_layer_gate(3, &RandomLayerConfig::default()).unwrap();

        assert_eq!(gate.name(), "random_layer");
        assert_eq!(gate.num_qubits(), 3);
        assert_eq!(gate.label.as_deref(), Some("random layer"));
        assert_eq!(gate.parameters().len(), params.len());

        let GateKind::Opaque(opaque) = &gate.kind else {
            panic!("expected opaque gate");
        };
        let definition = opaque.definition.as_ref().expect("definition");
        assert_eq!(definition.count_ops("barrier"), 0);
        assert_eq!(definition.num_parameters(), params.len());
    }

    #[test]
    fn test_random_layer_gate_composes_into_host_circuit() {
        let (gate, _params) = random_layer_gate(2, &RandomLayerConfig::default()).unwrap();

        let mut host = Circuit::new("host", 4).unwrap();
        host.append(gate, [QubitId(1), QubitId(2)]).unwrap();

        assert_eq!(host.len(), 1);
        assert!(host.is_parameterized());
    }

    #[test]
    fn test_reps_scale_parameters() {
        let config = RandomLayerConfig::default().with_reps(2);
        let ansatz = random_layer(2, &config).unwrap();
        assert_eq!(ansatz.num_parameters(), (2 + 1) * 3 * 2);
    }
}
