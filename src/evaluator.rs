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

//! The off-circuit evaluator (`spec.md` §4.3, ~20% of core).
//!
//! Walks the instruction stream in order and fills in every derived wire's
//! concrete value, mirroring the concrete-simulation half of a dual
//! evaluate/constrain split: this is the `preprocess()` side, with
//! [`crate::emitter`] the `circuit()` side.

use tracing::trace;

use crate::error::EvalError;
use crate::field::Field;
use crate::instruction::{Circuit, Opcode};
use crate::wire::{Wire, WireTable};

/// Evaluates every instruction in `circuit` against `wires`, in order.
/// Input wires must already carry values (from [`crate::input_loader`]).
pub fn evaluate<F: Field>(circuit: &Circuit<F>, wires: &mut WireTable<F>) -> Result<(), EvalError> {
    for instruction in &circuit.instructions {
        trace!(opcode = instruction.opcode.name(), "evaluating instruction");
        eval_instruction(&instruction.opcode, &instruction.inputs, &instruction.outputs, wires)?;
    }
    Ok(())
}

fn read<F: Field>(wires: &WireTable<F>, wire: Wire) -> Result<F, EvalError> {
    wires
        .read_value(wire)
        .cloned()
        .ok_or(EvalError::UninitializedWire { wire })
}

fn eval_instruction<F: Field>(
    opcode: &Opcode<F>,
    inputs: &[Wire],
    outputs: &[Wire],
    wires: &mut WireTable<F>,
) -> Result<(), EvalError> {
    match opcode {
        Opcode::Add => {
            let mut sum = F::zero();
            for &w in inputs {
                sum = sum + read(wires, w)?;
            }
            wires.write_value(outputs[0], sum);
        }
        Opcode::Mul => {
            let a = read(wires, inputs[0])?;
            let b = read(wires, inputs[1])?;
            wires.write_value(outputs[0], a * b);
        }
        Opcode::Xor => {
            let a = read(wires, inputs[0])?;
            let b = read(wires, inputs[1])?;
            wires.write_value(outputs[0], if a == b { F::zero() } else { F::one() });
        }
        Opcode::Or => {
            let a = read(wires, inputs[0])?;
            let b = read(wires, inputs[1])?;
            let out = if a.is_zero() && b.is_zero() {
                F::zero()
            } else {
                F::one()
            };
            wires.write_value(outputs[0], out);
        }
        Opcode::Assert => {
            // The evaluator is a no-op on the third operand: its value must
            // already be present, either from an input or an earlier
            // instruction. Only the constraint stage enforces the equation.
        }
        Opcode::Zerop => {
            let x = read(wires, inputs[0])?;
            let (m_out, y_out) = match x.inverse() {
                Some(inv) => (inv, F::one()),
                None => (F::zero(), F::zero()),
            };
            wires.write_value(outputs[0], m_out);
            wires.write_value(outputs[1], y_out);
        }
        Opcode::Split => {
            let x = read(wires, inputs[0])?;
            for (i, &bit_wire) in outputs.iter().enumerate() {
                let bit = if x.bit(i as u32) { F::one() } else { F::zero() };
                wires.write_value(bit_wire, bit);
            }
        }
        Opcode::Pack => {
            let mut acc = F::zero();
            let mut weight = F::one();
            let two = F::one() + F::one();
            for &bit_wire in inputs {
                let bit = read(wires, bit_wire)?;
                acc = acc + bit * weight.clone();
                weight = weight * two.clone();
            }
            wires.write_value(outputs[0], acc);
        }
        Opcode::ConstMul { constant } | Opcode::ConstMulNeg { constant } => {
            let x = read(wires, inputs[0])?;
            wires.write_value(outputs[0], x * constant.clone());
        }
        Opcode::Table { table } => {
            let mut idx: u64 = 0;
            for (j, &bit_wire) in inputs.iter().rev().enumerate() {
                let bit = read(wires, bit_wire)?;
                if bit == F::one() {
                    idx |= 1 << j;
                } else if !bit.is_zero() {
                    return Err(EvalError::NonBooleanTableInput { wire: bit_wire });
                }
            }
            wires.write_value(outputs[0], table[idx as usize].clone());
        }
    }
    Ok(())
}
