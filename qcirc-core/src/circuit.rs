//! Quantum circuit representation

use crate::{GateKind, GateOp, QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};

/// A quantum circuit
///
/// An ordered sequence of [`GateOp`]s over a fixed number of qubits. Every
/// qubit index is validated when the operation is added, so a circuit that
/// exists is always in range for a state of `num_qubits` qubits.
///
/// # Example
/// ```
/// use qcirc_core::Circuit;
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(0).unwrap().cnot(0, 1).unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyCircuit`] if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
        })
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of operations in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append an operation
    ///
    /// # Errors
    /// Returns error if any qubit of `op` is out of range
    pub fn push(&mut self, op: GateOp) -> Result<&mut Self> {
        for qubit in op.qubits() {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        self.operations.push(op);
        Ok(self)
    }

    /// Operations in program order
    pub fn operations(&self) -> impl Iterator<Item = &GateOp> {
        self.operations.iter()
    }

    /// Get a specific operation by index
    pub fn get_operation(&self, index: usize) -> Option<&GateOp> {
        self.operations.get(index)
    }

    /// Remove all operations
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Re-check every operation against the qubit count
    ///
    /// Needed for circuits that did not come through [`Circuit::push`],
    /// e.g. deserialized ones.
    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        for op in &self.operations {
            let qubits = op.qubits();
            for (i, qubit) in qubits.iter().enumerate() {
                if qubit.index() >= self.num_qubits {
                    return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
                }
                if qubits[i + 1..].contains(qubit) {
                    return Err(QuantumError::DuplicateQubit(*qubit));
                }
            }
            if let GateOp::Controlled { kind, controls, .. } = op {
                if !kind.is_controlled() {
                    return Err(QuantumError::invalid_gate_kind(kind.name(), "controlled"));
                }
                if controls.len() != kind.num_controls() {
                    return Err(QuantumError::invalid_qubit_count(
                        kind.name(),
                        kind.num_controls() + 1,
                        controls.len() + 1,
                    ));
                }
            }
            if let GateOp::Single { kind, .. } = op {
                if !kind.is_single_qubit() {
                    return Err(QuantumError::invalid_gate_kind(kind.name(), "single-qubit"));
                }
            }
        }
        Ok(())
    }

    /// Count of operations of a given kind
    pub fn count_kind(&self, kind: GateKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    // Builder shorthands

    /// Append a fixed or default-angle single-qubit gate
    pub fn gate(&mut self, kind: GateKind, target: usize) -> Result<&mut Self> {
        self.push(GateOp::single(kind, QubitId::new(target))?)
    }

    /// Append a rotation bound to `angle`
    pub fn rotation(&mut self, kind: GateKind, target: usize, angle: f64) -> Result<&mut Self> {
        self.push(GateOp::rotation(kind, QubitId::new(target), angle)?)
    }

    /// Append a controlled gate
    pub fn controlled(
        &mut self,
        kind: GateKind,
        controls: &[usize],
        target: usize,
    ) -> Result<&mut Self> {
        let controls: Vec<QubitId> = controls.iter().copied().map(QubitId::new).collect();
        self.push(GateOp::controlled(kind, &controls, QubitId::new(target))?)
    }

    /// Append a Hadamard on `target`
    pub fn h(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::H, target)
    }

    /// Append Pauli-X
    pub fn x(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::X, target)
    }

    /// Append Pauli-Y
    pub fn y(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::Y, target)
    }

    /// Append Pauli-Z
    pub fn z(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::Z, target)
    }

    /// Append the S phase gate
    pub fn s(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::S, target)
    }

    /// Append the T phase gate
    pub fn t(&mut self, target: usize) -> Result<&mut Self> {
        self.gate(GateKind::T, target)
    }

    /// Append RX(angle)
    pub fn rx(&mut self, target: usize, angle: f64) -> Result<&mut Self> {
        self.rotation(GateKind::Rx, target, angle)
    }

    /// Append RY(angle)
    pub fn ry(&mut self, target: usize, angle: f64) -> Result<&mut Self> {
        self.rotation(GateKind::Ry, target, angle)
    }

    /// Append RZ(angle)
    pub fn rz(&mut self, target: usize, angle: f64) -> Result<&mut Self> {
        self.rotation(GateKind::Rz, target, angle)
    }

    /// Append a CNOT
    pub fn cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.controlled(GateKind::Cnot, &[control], target)
    }

    /// Append a controlled-Y
    pub fn cy(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.controlled(GateKind::Cy, &[control], target)
    }

    /// Append a controlled-Z
    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.controlled(GateKind::Cz, &[control], target)
    }

    /// Append a Toffoli with two controls
    pub fn ccx(&mut self, control1: usize, control2: usize, target: usize) -> Result<&mut Self> {
        self.controlled(GateKind::Ccx, &[control1, control2], target)
    }

    /// Append a SWAP of `a` and `b`
    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.push(GateOp::swap(QubitId::new(a), QubitId::new(b))?)
    }

    /// Append a measurement marker; the state is not collapsed
    pub fn measure(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(GateOp::measure(QubitId::new(qubit)))
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a GateOp;
    type IntoIter = std::slice::Iter<'a, GateOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
