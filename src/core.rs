// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The top-level core flow (`spec.md` §4.6): parse, optionally load inputs
//! and evaluate, then emit constraints. Owns the wire table, instruction
//! list, and constraint system for its lifetime, releasing them together.

use tracing::info;

use crate::constraint_system::ConstraintSystem;
use crate::error::CoreError;
use crate::evaluator;
use crate::field::Field;
use crate::input_loader;
use crate::instruction::Circuit;
use crate::parser;
use crate::wire::{Wire, WireTable};

/// A fully constructed circuit: parsed, optionally evaluated, and with its
/// constraints emitted into the constraint system it owns.
pub struct Core<F: Field, CS: ConstraintSystem<F>> {
    circuit: Circuit<F>,
    wires: WireTable<F>,
    cs: CS,
}

impl<F: Field, CS: ConstraintSystem<F>> Core<F, CS> {
    /// Parses `circuit_source`, registers its public-input count with `cs`,
    /// and, if `input_source` is given, loads inputs and evaluates the
    /// circuit before emitting constraints.
    pub fn new(circuit_source: &str, input_source: Option<&str>, mut cs: CS) -> Result<Self, CoreError> {
        let mut wires = WireTable::new();
        let circuit = parser::parse_circuit(circuit_source, &mut cs, &mut wires)?;
        cs.set_num_public_inputs(circuit.num_inputs());
        info!(
            num_wires = circuit.num_wires,
            num_instructions = circuit.instructions.len(),
            num_inputs = circuit.num_inputs(),
            num_outputs = circuit.num_outputs(),
            "parsed circuit"
        );

        if let Some(input_source) = input_source {
            input_loader::load_inputs(input_source, &mut wires)?;
            evaluator::evaluate(&circuit, &mut wires)?;
            for wire in wires.allocated_wires().collect::<Vec<_>>() {
                if let Some(value) = wires.read_value(wire).cloned() {
                    let variable = wires
                        .variable(wire)
                        .expect("wire came from allocated_wires, so a variable exists");
                    cs.set_value(variable, value);
                }
            }
        }

        crate::emitter::emit_constraints(&circuit, &mut cs, &mut wires)?;

        Ok(Core { circuit, wires, cs })
    }

    pub fn num_inputs(&self) -> usize {
        self.circuit.num_inputs()
    }

    pub fn num_outputs(&self) -> usize {
        self.circuit.num_outputs()
    }

    pub fn output_wire_ids(&self) -> &[Wire] {
        &self.circuit.output_wire_ids
    }

    /// Reads a wire's concrete value, if it has one (only populated after
    /// evaluation, i.e. when an input file was supplied).
    pub fn wire_value(&self, wire: Wire) -> Option<&F> {
        self.wires.read_value(wire)
    }

    /// Whether every emitted constraint is satisfied by the current
    /// assignment. Delegated to the constraint system, per `spec.md` §4.6.
    pub fn is_satisfied(&self) -> bool {
        self.cs.is_satisfied()
    }

    pub fn constraint_system(&self) -> &CS {
        &self.cs
    }
}
