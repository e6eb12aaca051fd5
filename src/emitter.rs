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

//! The R1CS constraint emitter (`spec.md` §4.4, ~30% of core).
//!
//! Walks the instruction stream in order and writes the R1CS triples for
//! each opcode into the constraint system. This is the `circuit()` half of
//! the dual evaluate/emit split; [`crate::evaluator`] is the concrete half.

use tracing::trace;

use crate::constraint_system::{ConstraintSystem, LinearCombination};
use crate::error::ConstraintError;
use crate::field::Field;
use crate::gadgets::{lookup, pack, split, zerop};
use crate::instruction::{Circuit, Opcode};
use crate::wire::{Wire, WireTable};

/// Emits constraints for every instruction in `circuit`, resolving wires to
/// variables through `wires`.
pub fn emit_constraints<F: Field, CS: ConstraintSystem<F>>(
    circuit: &Circuit<F>,
    cs: &mut CS,
    wires: &mut WireTable<F>,
) -> Result<(), ConstraintError> {
    for instruction in &circuit.instructions {
        trace!(opcode = instruction.opcode.name(), "emitting constraint(s)");
        emit_instruction(&instruction.opcode, &instruction.inputs, &instruction.outputs, cs, wires)?;
    }
    Ok(())
}

fn var<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    wires: &mut WireTable<F>,
    wire: Wire,
) -> crate::constraint_system::Variable {
    wires.lookup(cs, wire)
}

fn emit_instruction<F: Field, CS: ConstraintSystem<F>>(
    opcode: &Opcode<F>,
    inputs: &[Wire],
    outputs: &[Wire],
    cs: &mut CS,
    wires: &mut WireTable<F>,
) -> Result<(), ConstraintError> {
    match opcode {
        Opcode::Add => {
            let sum = inputs
                .iter()
                .fold(LinearCombination::zero(), |lc, &w| lc.add_term(F::one(), var(cs, wires, w)));
            let out = var(cs, wires, outputs[0]);
            cs.add_constraint(
                LinearCombination::constant(F::one()),
                sum,
                LinearCombination::from_variable(out),
            )
        }
        Opcode::Mul => {
            let a = var(cs, wires, inputs[0]);
            let b = var(cs, wires, inputs[1]);
            let out = var(cs, wires, outputs[0]);
            cs.add_constraint(
                LinearCombination::from_variable(a),
                LinearCombination::from_variable(b),
                LinearCombination::from_variable(out),
            )
        }
        Opcode::Assert => {
            let a = var(cs, wires, inputs[0]);
            let b = var(cs, wires, inputs[1]);
            let c = var(cs, wires, outputs[0]);
            cs.add_constraint(
                LinearCombination::from_variable(a),
                LinearCombination::from_variable(b),
                LinearCombination::from_variable(c),
            )
        }
        Opcode::Xor => {
            let a = var(cs, wires, inputs[0]);
            let b = var(cs, wires, inputs[1]);
            let out = var(cs, wires, outputs[0]);
            let two = F::one() + F::one();
            cs.add_constraint(
                LinearCombination::from_term(two, a),
                LinearCombination::from_variable(b),
                LinearCombination::from_variable(a)
                    .add_term(F::one(), b)
                    .add_term(-F::one(), out),
            )
        }
        Opcode::Or => {
            let a = var(cs, wires, inputs[0]);
            let b = var(cs, wires, inputs[1]);
            let out = var(cs, wires, outputs[0]);
            cs.add_constraint(
                LinearCombination::from_variable(a),
                LinearCombination::from_variable(b),
                LinearCombination::from_variable(a)
                    .add_term(F::one(), b)
                    .add_term(-F::one(), out),
            )
        }
        Opcode::ConstMul { constant } | Opcode::ConstMulNeg { constant } => {
            let x = var(cs, wires, inputs[0]);
            let out = var(cs, wires, outputs[0]);
            cs.add_constraint(
                LinearCombination::from_variable(x),
                LinearCombination::constant(constant.clone()),
                LinearCombination::from_variable(out),
            )
        }
        Opcode::Split => {
            let x = var(cs, wires, inputs[0]);
            let bits: Vec<_> = outputs.iter().map(|&w| var(cs, wires, w)).collect();
            split::emit(cs, x, &bits)
        }
        Opcode::Pack => {
            let bits: Vec<_> = inputs.iter().map(|&w| var(cs, wires, w)).collect();
            let out = var(cs, wires, outputs[0]);
            pack::emit(cs, &bits, out)
        }
        Opcode::Zerop => {
            let x = var(cs, wires, inputs[0]);
            let m = var(cs, wires, outputs[0]);
            let y = var(cs, wires, outputs[1]);
            zerop::emit(cs, x, m, y)
        }
        Opcode::Table { table } => {
            let in_vars: Vec<_> = inputs.iter().map(|&w| var(cs, wires, w)).collect();
            let out = var(cs, wires, outputs[0]);
            lookup::emit(cs, &in_vars, table, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_system::R1cs;
    use crate::field::PrimeFieldElement;
    use crate::parser::parse_circuit;

    type F = PrimeFieldElement;

    fn run(src: &str, input_values: &[(u32, u64)]) -> R1cs<F> {
        let mut cs = R1cs::<F>::new();
        let mut wires = WireTable::<F>::new();
        let circuit = parse_circuit(src, &mut cs, &mut wires).unwrap();
        cs.set_num_public_inputs(circuit.num_inputs());
        for &(wire, value) in input_values {
            wires.write_value(Wire(wire), F::from_u64(value));
        }
        crate::evaluator::evaluate(&circuit, &mut wires).unwrap();
        for w in wires.allocated_wires().collect::<Vec<_>>() {
            if let Some(value) = wires.read_value(w).cloned() {
                let v = wires.variable(w).unwrap();
                cs.set_value(v, value);
            }
        }
        emit_constraints(&circuit, &mut cs, &mut wires).unwrap();
        cs
    }

    #[test]
    fn dot_product_scenario_satisfies_constraints() {
        let src = "\
total 15
input 2
input 3
input 4
input 5
input 6
input 7
mul in 2 2 5 out 1 8
mul in 2 3 6 out 1 9
mul in 2 4 7 out 1 10
add in 2 8 9 out 1 11
add in 2 11 10 out 1 12
output 12
";
        let cs = run(src, &[(2, 3), (3, 5), (4, 7), (5, 11), (6, 13), (7, 17)]);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn xor_scenario_satisfies_constraints() {
        let src = "total 3\nxor in 2 0 1 out 1 2\n";
        let cs = run(src, &[(0, 1), (1, 1)]);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn const_mul_scenario_satisfies_constraints() {
        let src = "total 2\nconst-mul-ff in 1 0 out 1 1\n";
        let cs = run(src, &[(0, 2)]);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn split_then_pack_round_trip_satisfies_constraints() {
        let src = "\
total 6
input 0
split in 1 0 out 4 1 2 3 4
pack in 4 1 2 3 4 out 1 5
";
        let cs = run(src, &[(0, 13)]);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn zerop_on_nonzero_satisfies_constraints() {
        let src = "total 3\nzerop in 1 0 out 2 1 2\n";
        let cs = run(src, &[(0, 7)]);
        assert!(cs.is_satisfied());
    }

    #[test]
    fn table_scenario_satisfies_constraints() {
        let src = "total 10\ntable 8 0 1 0 1 0 1 0 1 in 1 2 3 out 4\n";
        let cs = run(src, &[(1, 0), (2, 0), (3, 1)]);
        assert!(cs.is_satisfied());
    }
}
