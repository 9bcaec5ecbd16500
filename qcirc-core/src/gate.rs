//! Gate kinds and typed gate operations
//!
//! Circuits are sequences of [`GateOp`] values. Each operation is decoded
//! once from whatever the caller uses to describe gates (a name, a grid cell)
//! and carries its target, controls and rotation angle explicitly.

use crate::{QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// The gate vocabulary understood by the simulator
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Hadamard
    H,
    /// Pauli-X (NOT)
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z
    Z,
    /// Phase gate, diag(1, i)
    S,
    /// π/8 gate, diag(1, e^{iπ/4})
    T,
    /// X rotation by θ
    Rx,
    /// Y rotation by θ
    Ry,
    /// Z rotation by θ
    Rz,
    /// Controlled-X
    Cnot,
    /// Controlled-Y
    Cy,
    /// Controlled-Z
    Cz,
    /// Toffoli (doubly controlled X)
    Ccx,
    /// Exchange of two qubits
    Swap,
    /// Measurement marker
    Measure,
}

impl GateKind {
    /// Every kind, in palette order
    pub const ALL: [GateKind; 15] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
        GateKind::Cy,
        GateKind::Cz,
        GateKind::Ccx,
        GateKind::Swap,
        GateKind::Measure,
    ];

    /// Canonical upper-case name ("H", "RX", "CNOT", ...)
    pub const fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Cy => "CY",
            GateKind::Cz => "CZ",
            GateKind::Ccx => "CCX",
            GateKind::Swap => "SWAP",
            GateKind::Measure => "MEASURE",
        }
    }

    /// Whether the gate takes a rotation angle
    pub const fn is_parametric(&self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// Whether the gate acts on a single qubit with no controls
    pub const fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            GateKind::H
                | GateKind::X
                | GateKind::Y
                | GateKind::Z
                | GateKind::S
                | GateKind::T
                | GateKind::Rx
                | GateKind::Ry
                | GateKind::Rz
        )
    }

    /// Number of control qubits the gate requires (0 for uncontrolled gates)
    pub const fn num_controls(&self) -> usize {
        match self {
            GateKind::Cnot | GateKind::Cy | GateKind::Cz => 1,
            GateKind::Ccx => 2,
            _ => 0,
        }
    }

    /// Whether the gate is a controlled gate
    pub const fn is_controlled(&self) -> bool {
        self.num_controls() > 0
    }

    /// For controlled gates, the single-qubit gate applied to the target
    pub const fn target_kind(&self) -> Option<GateKind> {
        match self {
            GateKind::Cnot | GateKind::Ccx => Some(GateKind::X),
            GateKind::Cy => Some(GateKind::Y),
            GateKind::Cz => Some(GateKind::Z),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        GateKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == upper)
            .or(match upper.as_str() {
                "CX" => Some(GateKind::Cnot),
                "TOFFOLI" => Some(GateKind::Ccx),
                _ => None,
            })
            .ok_or_else(|| QuantumError::UnknownGate(s.to_string()))
    }
}

/// A gate applied to specific qubits
///
/// # Example
/// ```
/// use qcirc_core::{GateKind, GateOp, QubitId};
///
/// let op = GateOp::controlled(GateKind::Cnot, &[QubitId::new(0)], QubitId::new(1)).unwrap();
/// assert_eq!(op.kind(), GateKind::Cnot);
/// assert_eq!(op.to_string(), "CNOT(q0 -> q1)");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GateOp {
    /// Single-qubit gate, optionally parameterized
    Single {
        kind: GateKind,
        target: QubitId,
        /// Rotation angle; `None` means "use the caller's default"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle: Option<f64>,
    },
    /// Gate applied to `target` only where every control is |1⟩
    Controlled {
        kind: GateKind,
        controls: SmallVec<[QubitId; 2]>,
        target: QubitId,
    },
    /// Exchange qubits `a` and `b`
    Swap { a: QubitId, b: QubitId },
    /// Measurement marker; leaves the state untouched
    Measure { qubit: QubitId },
}

impl GateOp {
    /// Single-qubit gate without an explicit angle
    ///
    /// # Errors
    /// Returns error if `kind` is not a single-qubit gate
    pub fn single(kind: GateKind, target: QubitId) -> Result<Self> {
        if !kind.is_single_qubit() {
            return Err(QuantumError::invalid_gate_kind(kind.name(), "single-qubit"));
        }
        Ok(GateOp::Single {
            kind,
            target,
            angle: None,
        })
    }

    /// Rotation gate bound to `angle`
    ///
    /// # Errors
    /// Returns error if `kind` is not RX, RY or RZ
    pub fn rotation(kind: GateKind, target: QubitId, angle: f64) -> Result<Self> {
        if !kind.is_parametric() {
            return Err(QuantumError::invalid_gate_kind(kind.name(), "rotation"));
        }
        Ok(GateOp::Single {
            kind,
            target,
            angle: Some(angle),
        })
    }

    /// Controlled gate
    ///
    /// # Errors
    /// Returns error if `kind` is not controlled, the number of controls does
    /// not match the kind, or any qubit appears twice
    pub fn controlled(kind: GateKind, controls: &[QubitId], target: QubitId) -> Result<Self> {
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

        let op = GateOp::Controlled {
            kind,
            controls: SmallVec::from_slice(controls),
            target,
        };
        check_distinct(&op.qubits())?;
        Ok(op)
    }

    /// SWAP of two distinct qubits
    ///
    /// # Errors
    /// Returns error if `a == b`
    pub fn swap(a: QubitId, b: QubitId) -> Result<Self> {
        if a == b {
            return Err(QuantumError::DuplicateQubit(a));
        }
        Ok(GateOp::Swap { a, b })
    }

    /// Measurement marker on one qubit
    pub fn measure(qubit: QubitId) -> Self {
        GateOp::Measure { qubit }
    }

    /// The gate kind of this operation
    pub fn kind(&self) -> GateKind {
        match self {
            GateOp::Single { kind, .. } | GateOp::Controlled { kind, .. } => *kind,
            GateOp::Swap { .. } => GateKind::Swap,
            GateOp::Measure { .. } => GateKind::Measure,
        }
    }

    /// All qubits the operation touches (controls first, then target)
    pub fn qubits(&self) -> SmallVec<[QubitId; 3]> {
        match self {
            GateOp::Single { target, .. } => smallvec::smallvec![*target],
            GateOp::Controlled {
                controls, target, ..
            } => {
                let mut qubits: SmallVec<[QubitId; 3]> = controls.iter().copied().collect();
                qubits.push(*target);
                qubits
            }
            GateOp::Swap { a, b } => smallvec::smallvec![*a, *b],
            GateOp::Measure { qubit } => smallvec::smallvec![*qubit],
        }
    }

    /// Whether the operation changes the state
    pub fn is_unitary(&self) -> bool {
        !matches!(self, GateOp::Measure { .. })
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOp::Single {
                kind,
                target,
                angle: Some(theta),
            } => write!(f, "{}({:.4})({})", kind, theta, target),
            GateOp::Single { kind, target, .. } => write!(f, "{}({})", kind, target),
            GateOp::Controlled {
                kind,
                controls,
                target,
            } => {
                write!(f, "{}(", kind)?;
                for (i, q) in controls.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", q)?;
                }
                write!(f, " -> {})", target)
            }
            GateOp::Swap { a, b } => write!(f, "SWAP({}, {})", a, b),
            GateOp::Measure { qubit } => write!(f, "MEASURE({})", qubit),
        }
    }
}

fn check_distinct(qubits: &[QubitId]) -> Result<()> {
    for i in 0..qubits.len() {
        for j in (i + 1)..qubits.len() {
            if qubits[i] == qubits[j] {
                return Err(QuantumError::DuplicateQubit(qubits[i]));
            }
        }
    }
    Ok(())
}
