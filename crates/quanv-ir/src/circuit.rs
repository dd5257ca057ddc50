//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{CircuitError, CircuitResult};
use crate::gate::{Gate, OpaqueGate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: a named, ordered instruction sequence over a
/// fixed number of qubit positions.
///
/// The builder mutates the circuit in place and hands ownership back to
/// the caller. Every append operation validates its operands and
/// returns `CircuitResult<&mut Self>`, so gates chain fluently with `?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubit positions; fixed at construction.
    num_qubits: u32,
    /// Number of classical bits; grows on demand for measurement.
    num_clbits: u32,
    /// The instructions, in append order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    ///
    /// Zero-width circuits are rejected rather than silently producing
    /// a degenerate template.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> CircuitResult<Self> {
        let name = name.into();
        if num_qubits == 0 {
            return Err(CircuitError::ZeroWidth(name));
        }
        Ok(Self {
            name,
            num_qubits,
            num_clbits: 0,
            instructions: vec![],
        })
    }

    /// Extend the classical width by `n` bits.
    pub fn add_clbits(&mut self, n: u32) {
        self.num_clbits += n;
    }

    fn check_qubits(&self, qubits: &[QubitId], gate_name: Option<&str>) -> CircuitResult<()> {
        for (i, &q) in qubits.iter().enumerate() {
            if q.0 >= self.num_qubits {
                return Err(CircuitError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.map(str::to_string),
                });
            }
            if qubits[..i].contains(&q) {
                return Err(CircuitError::DuplicateQubit {
                    qubit: q,
                    gate_name: gate_name.map(str::to_string),
                });
            }
        }
        Ok(())
    }

    fn push(&mut self, instruction: Instruction) -> CircuitResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let expected = gate.num_qubits();
                let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
                if expected != got {
                    return Err(CircuitError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected,
                        got,
                    });
                }
                self.check_qubits(&instruction.qubits, Some(gate.name()))?;
            }
            InstructionKind::Barrier => {
                self.check_qubits(&instruction.qubits, None)?;
            }
            InstructionKind::Measure => {
                self.check_qubits(&instruction.qubits, Some("measure"))?;
                for &c in &instruction.clbits {
                    if c.0 >= self.num_clbits {
                        return Err(CircuitError::ClbitOutOfRange {
                            clbit: c,
                            num_clbits: self.num_clbits,
                        });
                    }
                }
            }
        }
        self.instructions.push(instruction);
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> CircuitResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::P(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CY, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Append any gate, standard or opaque.
    pub fn append(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> CircuitResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> CircuitResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits, growing the
    /// classical width as needed.
    pub fn measure_all(&mut self) -> CircuitResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            self.num_clbits = self.num_qubits;
        }
        let qubits = (0..self.num_qubits).map(QubitId);
        let clbits = (0..self.num_qubits).map(ClbitId);
        let inst = Instruction::measure_all(qubits, clbits)?;
        self.push(inst)?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> CircuitResult<&mut Self> {
        self.push(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> CircuitResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits).map(QubitId).collect();
        self.push(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Splice another circuit's instructions into this one.
    ///
    /// `targets` maps qubit `i` of `other` onto `targets[i]` of this
    /// circuit; it must name exactly `other.num_qubits()` qubits.
    /// Classical bit operands carry over unmapped and must fit this
    /// circuit's classical width.
    pub fn compose(&mut self, other: &Circuit, targets: &[QubitId]) -> CircuitResult<&mut Self> {
        if targets.len() != other.num_qubits() {
            return Err(CircuitError::WidthMismatch {
                expected: other.num_qubits,
                got: u32::try_from(targets.len()).unwrap_or(u32::MAX),
            });
        }
        self.check_qubits(targets, Some(other.name()))?;
        for inst in &other.instructions {
            let mapped = Instruction {
                kind: inst.kind.clone(),
                qubits: inst.qubits.iter().map(|q| targets[q.index()]).collect(),
                clbits: inst.clbits.clone(),
            };
            self.push(mapped)?;
        }
        Ok(self)
    }

    /// Collapse this circuit into an opaque named gate.
    ///
    /// The gate carries the circuit as its definition and the circuit's
    /// symbolic parameters, in first-appearance order, as its parameter
    /// list. Measurements and barriers cannot live inside a gate and
    /// are reported as [`CircuitError::NonUnitary`].
    pub fn to_gate(&self, label: impl Into<String>) -> CircuitResult<Gate> {
        for inst in &self.instructions {
            if inst.is_measure() || inst.is_barrier() {
                return Err(CircuitError::NonUnitary {
                    circuit: self.name.clone(),
                    op: inst.name().to_string(),
                });
            }
        }
        let params = self
            .parameters()
            .into_iter()
            .map(ParameterExpression::Symbol)
            .collect();
        let opaque = OpaqueGate::new(self.name.clone(), self.num_qubits)
            .with_params(params)
            .with_definition(self.clone());
        Ok(Gate::opaque(opaque).with_label(label))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions, in append order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Count instructions with the given name (e.g. `"cx"`, `"barrier"`).
    pub fn count_ops(&self, name: &str) -> usize {
        self.instructions.iter().filter(|i| i.name() == name).count()
    }

    /// Circuit depth: the longest chain of operations over any wire.
    ///
    /// Barriers synchronize the wires they span but add no depth of
    /// their own.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits as usize];
        let mut clbit_level = vec![0usize; self.num_clbits as usize];

        for inst in &self.instructions {
            match inst.kind {
                InstructionKind::Barrier => {
                    let level = inst
                        .qubits
                        .iter()
                        .map(|q| qubit_level[q.index()])
                        .max()
                        .unwrap_or(0);
                    for q in &inst.qubits {
                        qubit_level[q.index()] = level;
                    }
                }
                _ => {
                    let over_qubits = inst.qubits.iter().map(|q| qubit_level[q.index()]);
                    let over_clbits = inst.clbits.iter().map(|c| clbit_level[c.index()]);
                    let level = over_qubits.chain(over_clbits).max().unwrap_or(0) + 1;
                    for q in &inst.qubits {
                        qubit_level[q.index()] = level;
                    }
                    for c in &inst.clbits {
                        clbit_level[c.index()] = level;
                    }
                }
            }
        }

        qubit_level
            .into_iter()
            .chain(clbit_level)
            .max()
            .unwrap_or(0)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Distinct symbolic parameter names, in first-appearance order.
    pub fn parameters(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut ordered = vec![];
        for inst in &self.instructions {
            let Some(gate) = inst.as_gate() else { continue };
            for expr in gate.parameters() {
                expr.visit_symbols(&mut |name| {
                    if seen.insert(name.to_string()) {
                        ordered.push(name.to_string());
                    }
                });
            }
        }
        ordered
    }

    /// Number of distinct symbolic parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Whether any symbolic parameter remains.
    pub fn is_parameterized(&self) -> bool {
        !self.parameters().is_empty()
    }

    /// Bind every symbolic parameter, returning a new concrete circuit.
    ///
    /// The map must cover the full parameter set; the first missing
    /// symbol is reported as [`CircuitError::UnboundParameter`].
    pub fn bind(&self, values: &FxHashMap<String, f64>) -> CircuitResult<Circuit> {
        for name in self.parameters() {
            if !values.contains_key(&name) {
                return Err(CircuitError::UnboundParameter(name));
            }
        }
        Ok(self.bind_partial(values))
    }

    /// Bind whatever symbols the map covers, leaving the rest symbolic.
    pub(crate) fn bind_partial(&self, values: &FxHashMap<String, f64>) -> Circuit {
        let instructions = self
            .instructions
            .iter()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(gate) => Instruction {
                    kind: InstructionKind::Gate(gate.bind_all(values)),
                    qubits: inst.qubits.clone(),
                    clbits: inst.clbits.clone(),
                },
                _ => inst.clone(),
            })
            .collect();
        Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3).unwrap();
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = Circuit::new("empty", 0).unwrap_err();
        assert!(matches!(err, CircuitError::ZeroWidth(_)));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new("test", 2).unwrap();
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        circuit.measure_all().unwrap();

        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::new("test", 2).unwrap();
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, CircuitError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::new("test", 2).unwrap();
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, CircuitError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_measure_without_clbit() {
        let mut circuit = Circuit::new("test", 1).unwrap();
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert!(matches!(err, CircuitError::ClbitOutOfRange { .. }));

        circuit.add_clbits(1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    }

    #[test]
    fn test_compose_remaps_qubits() {
        let mut block = Circuit::new("block", 2).unwrap();
        block.cx(QubitId(0), QubitId(1)).unwrap();

        let mut circuit = Circuit::new("test", 4).unwrap();
        circuit.compose(&block, &[QubitId(2), QubitId(3)]).unwrap();

        let inst = &circuit.instructions()[0];
        assert_eq!(inst.qubits, vec![QubitId(2), QubitId(3)]);
    }

    #[test]
    fn test_compose_width_mismatch() {
        let block = Circuit::new("block", 2).unwrap();
        let mut circuit = Circuit::new("test", 4).unwrap();
        let err = circuit.compose(&block, &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, CircuitError::WidthMismatch { .. }));
    }

    #[test]
    fn test_depth_with_barrier_sync() {
        let mut circuit = Circuit::new("test", 2).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();

        // The barrier pushes q1 behind q0's Hadamard without counting
        // as a layer itself.
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.count_ops("barrier"), 1);
    }

    #[test]
    fn test_parameters_first_appearance_order() {
        let mut circuit = Circuit::new("test", 2).unwrap();
        circuit
            .rx(ParameterExpression::symbol("b"), QubitId(0))
            .unwrap()
            .ry(ParameterExpression::symbol("a"), QubitId(1))
            .unwrap()
            .rz(ParameterExpression::symbol("b"), QubitId(0))
            .unwrap();

        assert_eq!(circuit.parameters(), vec!["b", "a"]);
        assert_eq!(circuit.num_parameters(), 2);
        assert!(circuit.is_parameterized());
    }

    #[test]
    fn test_bind_complete() {
        let mut circuit = Circuit::new("test", 1).unwrap();
        circuit
            .rx(ParameterExpression::symbol("t"), QubitId(0))
            .unwrap();

        let mut values = FxHashMap::default();
        values.insert("t".to_string(), PI / 2.0);
        let bound = circuit.bind(&values).unwrap();

        assert!(!bound.is_parameterized());
        let gate = bound.instructions()[0].as_gate().unwrap();
        assert!((gate.parameters()[0].as_f64().unwrap() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bind_missing_symbol() {
        let mut circuit = Circuit::new("test", 1).unwrap();
        circuit
            .rx(ParameterExpression::symbol("t"), QubitId(0))
            .unwrap();

        let err = circuit.bind(&FxHashMap::default()).unwrap_err();
        assert!(matches!(err, CircuitError::UnboundParameter(name) if name == "t"));
    }

    #[test]
    fn test_to_gate() {
        let mut circuit = Circuit::new("kernel", 2).unwrap();
        circuit
            .ry(ParameterExpression::symbol("t[0]"), QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let gate = circuit.to_gate("layer").unwrap();
        assert_eq!(gate.name(), "kernel");
        assert_eq!(gate.num_qubits(), 2);
        assert_eq!(gate.label.as_deref(), Some("layer"));
        assert_eq!(gate.parameters().len(), 1);

        let mut outer = Circuit::new("outer", 3).unwrap();
        outer.append(gate, [QubitId(1), QubitId(2)]).unwrap();
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn test_to_gate_rejects_barrier_and_measure() {
        let mut with_barrier = Circuit::new("b", 2).unwrap();
        with_barrier.barrier_all().unwrap();
        let err = with_barrier.to_gate("g").unwrap_err();
        assert!(matches!(err, CircuitError::NonUnitary { ref op, .. } if op == "barrier"));

        let mut with_measure = Circuit::new("m", 1).unwrap();
        with_measure.measure_all().unwrap();
        let err = with_measure.to_gate("g").unwrap_err();
        assert!(matches!(err, CircuitError::NonUnitary { ref op, .. } if op == "measure"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut circuit = Circuit::new("roundtrip", 2).unwrap();
        circuit
            .rx(ParameterExpression::symbol("t[0]"), QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .barrier_all()
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(circuit, back);
    }
}
