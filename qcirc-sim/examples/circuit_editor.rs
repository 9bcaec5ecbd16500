//! Circuit Editor Demo
//!
//! Builds circuits on an editor grid, runs them and prints counts, the
//! significant basis states and a Bloch readout per qubit.
//!
//! Run with: cargo run --example circuit_editor -p qcirc-sim

use qcirc_core::GateKind;
use qcirc_sim::{CircuitLayout, Result, Simulator, SimulatorConfig};
use std::f64::consts::FRAC_PI_4;

fn main() -> Result<()> {
    println!("=== Circuit Editor Demo ===\n");

    let simulator = Simulator::new(SimulatorConfig::default().with_seed(2024))?;

    // Demo 1: Bell pair on the default 2×6 grid
    println!("1. Bell pair:");
    let mut layout = CircuitLayout::default();
    layout.drop_gate(0, 0, GateKind::H)?;
    layout.drop_gate(1, 1, GateKind::Cnot)?;
    let result = simulator.run(&layout.to_circuit()?)?;
    println!("{}", result);

    // Demo 2: three-qubit GHZ with a rotation tweak
    println!("2. GHZ state with RY(π/4) on q2:");
    let mut layout = CircuitLayout::new(3, 4)?;
    layout.place_gate(0, 0, GateKind::H, None)?;
    layout.place_controlled(1, GateKind::Cnot, &[0], 1)?;
    layout.place_controlled(2, GateKind::Cnot, &[1], 2)?;
    layout.place_gate(3, 2, GateKind::Ry, Some(FRAC_PI_4))?;
    let result = simulator.run(&layout.to_circuit()?)?;
    println!("{}", result);

    for (qubit, bloch) in result.bloch.iter().enumerate() {
        println!("q{}:\n{}", qubit, bloch.describe());
    }

    // Demo 3: edit the grid and rerun
    println!("\n3. Remove the second CNOT:");
    if let Some(cell) = layout.remove(2, 2) {
        println!("removed {:?}", cell);
    }
    let circuit = layout.to_circuit()?;
    for op in circuit.operations() {
        println!("  {}", op);
    }
    let result = simulator.run(&circuit)?;
    println!("{}", result.counts);

    Ok(())
}
