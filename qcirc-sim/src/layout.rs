//! Editor grid of a circuit
//!
//! A [`CircuitLayout`] is the column-major grid a circuit editor works on:
//! each column is one time step, each row one qubit. Multi-qubit gates span
//! several cells of the same column and stay linked:
//!
//! - a controlled gate sits on its target row, with a [`Cell::ControlDot`] on
//!   every control row
//! - a SWAP occupies both rows, each [`Cell::Swap`] naming its partner
//!
//! Editing keeps those links consistent; [`CircuitLayout::to_circuit`]
//! decodes the grid into a [`Circuit`] once per run.

use crate::error::{Result, SimulatorError};
use qcirc_core::{Circuit, GateKind, GateOp, QubitId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Largest register an editor layout may hold
pub const MAX_LAYOUT_QUBITS: usize = 10;

/// Rows of a fresh layout
pub const DEFAULT_LAYOUT_QUBITS: usize = 2;

/// Columns of a fresh layout
pub const DEFAULT_LAYOUT_COLUMNS: usize = 6;

/// Contents of one occupied grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    /// Single-qubit gate or measurement marker
    Gate {
        kind: GateKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle: Option<f64>,
    },
    /// Controlled gate anchored on its target row
    Controlled {
        kind: GateKind,
        controls: SmallVec<[usize; 2]>,
        target: usize,
    },
    /// Control of the controlled gate on row `target`
    ControlDot { target: usize },
    /// One end of a SWAP
    Swap { partner: usize },
}

/// Column-major editor grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitLayout {
    num_qubits: usize,
    columns: Vec<Vec<Option<Cell>>>,
}

impl Default for CircuitLayout {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_LAYOUT_QUBITS,
            columns: vec![vec![None; DEFAULT_LAYOUT_QUBITS]; DEFAULT_LAYOUT_COLUMNS],
        }
    }
}

fn check_qubit_count(num_qubits: usize) -> Result<()> {
    if !(1..=MAX_LAYOUT_QUBITS).contains(&num_qubits) {
        return Err(SimulatorError::layout(format!(
            "qubit count must be in 1..={}, got {}",
            MAX_LAYOUT_QUBITS, num_qubits
        )));
    }
    Ok(())
}

impl CircuitLayout {
    /// Empty grid of `num_qubits` rows and `num_columns` columns
    ///
    /// # Errors
    /// Returns error if `num_qubits` is outside `1..=10`
    pub fn new(num_qubits: usize, num_columns: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        Ok(Self {
            num_qubits,
            columns: vec![vec![None; num_qubits]; num_columns],
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Contents of a cell; `None` when empty or out of range
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.columns.get(col)?.get(row)?.as_ref()
    }

    fn check_position(&self, col: usize, row: usize) -> Result<()> {
        if col >= self.columns.len() {
            return Err(SimulatorError::layout(format!(
                "column {} out of range ({} columns)",
                col,
                self.columns.len()
            )));
        }
        if row >= self.num_qubits {
            return Err(SimulatorError::layout(format!(
                "row {} out of range ({} qubits)",
                row, self.num_qubits
            )));
        }
        Ok(())
    }

    fn check_empty(&self, col: usize, row: usize) -> Result<()> {
        self.check_position(col, row)?;
        if self.columns[col][row].is_some() {
            return Err(SimulatorError::layout(format!(
                "cell ({}, {}) is occupied",
                col, row
            )));
        }
        Ok(())
    }

    /// Place a single-qubit gate or a measurement marker
    ///
    /// # Errors
    /// Returns error if the cell is occupied or out of range, the kind spans
    /// several qubits, or an angle is given to a non-rotation gate
    pub fn place_gate(
        &mut self,
        col: usize,
        row: usize,
        kind: GateKind,
        angle: Option<f64>,
    ) -> Result<()> {
        if !kind.is_single_qubit() && kind != GateKind::Measure {
            return Err(SimulatorError::layout(format!(
                "{} is not a single-qubit gate",
                kind
            )));
        }
        if let Some(angle) = angle {
            check_angle(kind, angle)?;
        }
        self.check_empty(col, row)?;

        self.columns[col][row] = Some(Cell::Gate { kind, angle });
        Ok(())
    }

    /// Place a controlled gate on `target` with dots on every control row
    ///
    /// # Errors
    /// Returns error if the kind is not controlled, the number of controls
    /// does not match it, rows repeat, or any involved cell is occupied
    pub fn place_controlled(
        &mut self,
        col: usize,
        kind: GateKind,
        controls: &[usize],
        target: usize,
    ) -> Result<()> {
        if !kind.is_controlled() {
            return Err(SimulatorError::layout(format!(
                "{} is not a controlled gate",
                kind
            )));
        }
        if controls.len() != kind.num_controls() {
            return Err(SimulatorError::layout(format!(
                "{} takes {} control(s), got {}",
                kind,
                kind.num_controls(),
                controls.len()
            )));
        }

        self.check_empty(col, target)?;
        for (i, &control) in controls.iter().enumerate() {
            self.check_empty(col, control)?;
            if control == target || controls[..i].contains(&control) {
                return Err(SimulatorError::layout(format!(
                    "row {} used twice by {}",
                    control, kind
                )));
            }
        }

        for &control in controls {
            self.columns[col][control] = Some(Cell::ControlDot { target });
        }
        self.columns[col][target] = Some(Cell::Controlled {
            kind,
            controls: SmallVec::from_slice(controls),
            target,
        });
        Ok(())
    }

    /// Place a SWAP linking rows `a` and `b`
    ///
    /// # Errors
    /// Returns error if `a == b` or either cell is occupied
    pub fn place_swap(&mut self, col: usize, a: usize, b: usize) -> Result<()> {
        if a == b {
            return Err(SimulatorError::layout(format!(
                "SWAP needs two different rows, got {} twice",
                a
            )));
        }
        self.check_empty(col, a)?;
        self.check_empty(col, b)?;

        self.columns[col][a] = Some(Cell::Swap { partner: b });
        self.columns[col][b] = Some(Cell::Swap { partner: a });
        Ok(())
    }

    /// Drop a gate on `(col, row)`, picking partner rows automatically
    ///
    /// Controls and SWAP partners take the lowest empty rows of the column.
    /// Rotations are left without an angle and run with the simulator
    /// default.
    ///
    /// # Errors
    /// Returns error if the cell is occupied or the column lacks enough
    /// empty rows
    pub fn drop_gate(&mut self, col: usize, row: usize, kind: GateKind) -> Result<()> {
        self.check_empty(col, row)?;

        let needed = match kind {
            GateKind::Swap => 1,
            kind => kind.num_controls(),
        };
        if needed == 0 {
            return self.place_gate(col, row, kind, None);
        }

        let free: SmallVec<[usize; 2]> = (0..self.num_qubits)
            .filter(|&r| r != row && self.columns[col][r].is_none())
            .take(needed)
            .collect();
        if free.len() < needed {
            return Err(SimulatorError::layout(format!(
                "{} needs {} empty qubit line(s) in column {}",
                kind, needed, col
            )));
        }

        match kind {
            GateKind::Swap => self.place_swap(col, row, free[0]),
            kind => self.place_controlled(col, kind, &free, row),
        }
    }

    /// Change the angle of a rotation gate
    ///
    /// # Errors
    /// Returns error if the cell does not hold a rotation gate
    pub fn set_angle(&mut self, col: usize, row: usize, angle: f64) -> Result<()> {
        self.check_position(col, row)?;
        match &mut self.columns[col][row] {
            Some(Cell::Gate {
                kind,
                angle: current,
            }) => {
                check_angle(*kind, angle)?;
                *current = Some(angle);
                Ok(())
            }
            _ => Err(SimulatorError::layout(format!(
                "cell ({}, {}) holds no rotation gate",
                col, row
            ))),
        }
    }

    /// Clear a cell and every cell linked to it
    ///
    /// Removing a control dot removes the whole controlled gate. Returns the
    /// cell that was at `(col, row)`.
    pub fn remove(&mut self, col: usize, row: usize) -> Option<Cell> {
        let cell = self.columns.get_mut(col)?.get_mut(row)?.take()?;

        match &cell {
            Cell::Controlled { controls, .. } => {
                for &control in controls {
                    self.clear_if(col, control, |c| {
                        matches!(c, Cell::ControlDot { target } if *target == row)
                    });
                }
            }
            Cell::ControlDot { target } => {
                let target = *target;
                let owns_dot = matches!(
                    self.cell(col, target),
                    Some(Cell::Controlled { controls, .. }) if controls.contains(&row)
                );
                if owns_dot {
                    self.remove(col, target);
                }
            }
            Cell::Swap { partner } => {
                self.clear_if(col, *partner, |c| {
                    matches!(c, Cell::Swap { partner } if *partner == row)
                });
            }
            Cell::Gate { .. } => {}
        }

        Some(cell)
    }

    fn clear_if(&mut self, col: usize, row: usize, linked: impl Fn(&Cell) -> bool) {
        if let Some(slot) = self.columns.get_mut(col).and_then(|c| c.get_mut(row)) {
            if slot.as_ref().is_some_and(linked) {
                *slot = None;
            }
        }
    }

    /// Empty every cell, keeping the grid size
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.fill(None);
        }
    }

    /// Append an empty column
    pub fn add_column(&mut self) {
        self.columns.push(vec![None; self.num_qubits]);
    }

    /// Resize the register, dropping any gate that touches a removed row
    ///
    /// # Errors
    /// Returns error if `num_qubits` is outside `1..=10`
    pub fn set_num_qubits(&mut self, num_qubits: usize) -> Result<()> {
        check_qubit_count(num_qubits)?;

        for column in &mut self.columns {
            column.resize(num_qubits, None);
        }
        self.num_qubits = num_qubits;

        let dangling: Vec<(usize, usize)> = self
            .positions()
            .filter(|&(col, row)| {
                self.cell(col, row)
                    .is_some_and(|cell| linked_rows(cell).iter().any(|&r| r >= num_qubits))
            })
            .collect();
        for (col, row) in dangling {
            self.remove(col, row);
        }
        Ok(())
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.columns.len()).flat_map(move |col| (0..self.num_qubits).map(move |row| (col, row)))
    }

    /// Decode the grid into a circuit
    ///
    /// Columns run in order and rows ascending within a column. Control dots
    /// emit nothing and each SWAP pair emits one operation.
    ///
    /// # Errors
    /// Returns error if a cell cannot form a valid operation
    pub fn to_circuit(&self) -> Result<Circuit> {
        let mut circuit = Circuit::new(self.num_qubits)?;

        for (col, row) in self.positions() {
            let Some(cell) = self.cell(col, row) else {
                continue;
            };
            match cell {
                Cell::Gate {
                    kind: GateKind::Measure,
                    ..
                } => {
                    circuit.measure(row)?;
                }
                Cell::Gate {
                    kind,
                    angle: Some(angle),
                } if kind.is_parametric() => {
                    circuit.rotation(*kind, row, *angle)?;
                }
                Cell::Gate { kind, .. } => {
                    circuit.gate(*kind, row)?;
                }
                Cell::Controlled {
                    kind,
                    controls,
                    target,
                } => {
                    circuit.controlled(*kind, controls, *target)?;
                }
                Cell::ControlDot { .. } => {}
                Cell::Swap { partner } => {
                    if row < *partner {
                        circuit.push(GateOp::swap(QubitId::new(row), QubitId::new(*partner))?)?;
                    }
                }
            }
        }

        Ok(circuit)
    }

    /// Check grid shape and that every multi-cell gate is fully linked
    ///
    /// # Errors
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<()> {
        check_qubit_count(self.num_qubits)?;

        for (col, column) in self.columns.iter().enumerate() {
            if column.len() != self.num_qubits {
                return Err(SimulatorError::layout(format!(
                    "column {} has {} rows, expected {}",
                    col,
                    column.len(),
                    self.num_qubits
                )));
            }
        }

        for (col, row) in self.positions() {
            let Some(cell) = self.cell(col, row) else {
                continue;
            };
            let consistent = match cell {
                Cell::Gate { kind, angle } => {
                    (kind.is_single_qubit() || *kind == GateKind::Measure)
                        && angle.map_or(true, |a| check_angle(*kind, a).is_ok())
                }
                Cell::Controlled {
                    kind,
                    controls,
                    target,
                } => {
                    kind.is_controlled()
                        && *target == row
                        && controls.len() == kind.num_controls()
                        && controls.iter().all(|&c| {
                            matches!(self.cell(col, c), Some(Cell::ControlDot { target }) if *target == row)
                        })
                }
                Cell::ControlDot { target } => matches!(
                    self.cell(col, *target),
                    Some(Cell::Controlled { controls, .. }) if controls.contains(&row)
                ),
                Cell::Swap { partner } => {
                    *partner != row
                        && matches!(self.cell(col, *partner), Some(Cell::Swap { partner }) if *partner == row)
                }
            };
            if !consistent {
                return Err(SimulatorError::layout(format!(
                    "cell ({}, {}) is inconsistent: {:?}",
                    col, row, cell
                )));
            }
        }

        Ok(())
    }
}

fn check_angle(kind: GateKind, angle: f64) -> Result<()> {
    if !kind.is_parametric() {
        return Err(SimulatorError::layout(format!(
            "{} takes no angle",
            kind
        )));
    }
    if !angle.is_finite() {
        return Err(SimulatorError::layout(format!(
            "angle must be finite, got {}",
            angle
        )));
    }
    Ok(())
}

/// Rows other than its own that a cell refers to
fn linked_rows(cell: &Cell) -> SmallVec<[usize; 2]> {
    match cell {
        Cell::Gate { .. } => SmallVec::new(),
        Cell::Controlled { controls, .. } => controls.clone(),
        Cell::ControlDot { target } => smallvec::smallvec![*target],
        Cell::Swap { partner } => smallvec::smallvec![*partner],
    }
}
