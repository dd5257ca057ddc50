//! Quantum gate types.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
///
/// This is the vocabulary ansatz construction draws from: the
/// single-qubit rotations that carry the variational parameters, the
/// Paulis and Hadamard for state preparation, and the two-qubit
/// couplers used by entanglement layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Rotation around the X axis.
    Rx(ParameterExpression),
    /// Rotation around the Y axis.
    Ry(ParameterExpression),
    /// Rotation around the Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// The lowercase wire name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// The number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::Swap => 2,
        }
    }

    /// Whether any angle of this gate is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// The angle expressions of this gate, empty for fixed gates.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p) => vec![p],
            _ => vec![],
        }
    }

    /// Rewrite every angle with the given binding map.
    pub(crate) fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        match self {
            StandardGate::Rx(p) => StandardGate::Rx(p.bind_all(values)),
            StandardGate::Ry(p) => StandardGate::Ry(p.bind_all(values)),
            StandardGate::Rz(p) => StandardGate::Rz(p.bind_all(values)),
            StandardGate::P(p) => StandardGate::P(p.bind_all(values)),
            _ => self.clone(),
        }
    }
}

/// A named black-box gate.
///
/// Produced by [`Circuit::to_gate`]: the circuit body is carried along
/// as the gate's definition, and the circuit's symbolic parameters
/// become the gate's parameter list. Consumers that only care about the
/// interface (name, width, parameters) can ignore the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Parameters of the gate, in consumption order.
    pub params: Vec<ParameterExpression>,
    /// The defining circuit, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Box<Circuit>>,
}

impl OpaqueGate {
    /// Create a new opaque gate with no parameters and no definition.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            definition: None,
        }
    }

    /// Attach parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParameterExpression>) -> Self {
        self.params = params;
        self
    }

    /// Attach a defining circuit to the gate.
    ///
    /// # Panics
    ///
    /// Panics if the definition's width differs from `num_qubits`.
    #[must_use]
    pub fn with_definition(mut self, definition: Circuit) -> Self {
        assert_eq!(
            definition.num_qubits() as u32,
            self.num_qubits,
            "definition of '{}' spans {} qubits, gate declares {}",
            self.name,
            definition.num_qubits(),
            self.num_qubits,
        );
        self.definition = Some(Box::new(definition));
        self
    }
}

/// A standard or opaque gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A named black-box gate.
    Opaque(OpaqueGate),
}

impl GateKind {
    /// The name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Opaque(g) => &g.name,
        }
    }

    /// The number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Opaque(g) => g.num_qubits,
        }
    }
}

/// A gate with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a gate from an opaque gate.
    pub fn opaque(gate: OpaqueGate) -> Self {
        Self {
            kind: GateKind::Opaque(gate),
            label: None,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// The number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The angle expressions of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match &self.kind {
            GateKind::Standard(g) => g.parameters(),
            GateKind::Opaque(g) => g.params.iter().collect(),
        }
    }

    /// Whether any angle of this gate is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Rewrite every angle with the given binding map.
    pub(crate) fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        let kind = match &self.kind {
            GateKind::Standard(g) => GateKind::Standard(g.bind_all(values)),
            GateKind::Opaque(g) => GateKind::Opaque(OpaqueGate {
                name: g.name.clone(),
                num_qubits: g.num_qubits,
                params: g.params.iter().map(|p| p.bind_all(values)).collect(),
                definition: g
                    .definition
                    .as_ref()
                    .map(|c| Box::new(c.bind_partial(values))),
            }),
        };
        Self {
            kind,
            label: self.label.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<OpaqueGate> for Gate {
    fn from(gate: OpaqueGate) -> Self {
        Gate::opaque(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::Swap.name(), "swap");

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("a")).is_parameterized());
    }

    #[test]
    fn test_gate_label() {
        let g = Gate::standard(StandardGate::H).with_label("prep");
        assert_eq!(g.name(), "h");
        assert_eq!(g.label.as_deref(), Some("prep"));
    }

    #[test]
    fn test_opaque_gate() {
        let g = OpaqueGate::new("kernel", 3)
            .with_params(vec![ParameterExpression::symbol("theta[0]")]);
        assert_eq!(g.name, "kernel");
        assert_eq!(g.num_qubits, 3);
        assert!(g.definition.is_none());

        let gate: Gate = g.into();
        assert!(gate.is_parameterized());
        assert_eq!(gate.num_qubits(), 3);
    }

    #[test]
    fn test_standard_bind_all() {
        let mut values = FxHashMap::default();
        values.insert("a".to_string(), PI / 4.0);

        let g = StandardGate::Ry(ParameterExpression::symbol("a")).bind_all(&values);
        assert!(!g.is_parameterized());
        assert_eq!(g.parameters()[0].as_f64(), Some(PI / 4.0));
    }
}
