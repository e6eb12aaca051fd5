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

//! The lookup-table gadgets (`spec.md` §4.4): bilinear-form encodings for
//! 2/4/8-entry tables. Sizes 0, 1 and 16 are rejected at parse time and
//! never reach this module.
//!
//! Input ordering follows the evaluator's index convention exactly
//! (`spec.md` §4.3): for an `n`-input table, the wire at position `n-1-j`
//! contributes bit `j` of the index, so the *first* listed input carries
//! the highest weight and the *last* carries weight `2^0`.

use crate::constraint_system::{ConstraintSystem, LinearCombination, Variable};
use crate::error::ConstraintError;
use crate::field::Field;

/// Emits the constraint(s) encoding a lookup of `values` by `inputs`,
/// writing the result into `out`. `inputs.len()` must be 1, 2, or 3
/// (table sizes 2, 4, 8); this is guaranteed by the parser.
pub fn emit<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    inputs: &[Variable],
    values: &[F],
    out: Variable,
) -> Result<(), ConstraintError> {
    match inputs.len() {
        1 => emit_size2(cs, inputs[0], values, out),
        2 => emit_size4(cs, inputs[0], inputs[1], values, out),
        3 => emit_size8(cs, inputs, values, out),
        n => panic!("lookup gadget invoked with unsupported arity {n}; parser should have rejected this"),
    }
}

fn product_of<F: Field, CS: ConstraintSystem<F>>(cs: &CS, a: Variable, b: Variable) -> Option<F> {
    let a = cs.get_value(a)?.clone();
    let b = cs.get_value(b)?.clone();
    Some(a * b)
}

/// 1-bit LUT: `out = v0 + (v1 − v0) · bit`.
fn emit_size2<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    bit: Variable,
    values: &[F],
    out: Variable,
) -> Result<(), ConstraintError> {
    let (v0, v1) = (values[0].clone(), values[1].clone());
    cs.add_constraint(
        LinearCombination::from_term(v1 - v0.clone(), bit),
        LinearCombination::constant(F::one()),
        LinearCombination {
            terms: vec![(F::one(), out)],
            constant: -v0,
        },
    )
}

/// 2-bit LUT: `out = v0 + (v1−v0)·b0 + (v2−v0)·b1 + (v3−v2−v1+v0)·(b0·b1)`.
/// `b1` carries weight 2, `b0` weight 1.
fn emit_size4<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    b1: Variable,
    b0: Variable,
    values: &[F],
    out: Variable,
) -> Result<(), ConstraintError> {
    let aux = cs.allocate_variable();
    if let Some(product) = product_of(cs, b0, b1) {
        cs.set_value(aux, product);
    }
    cs.add_constraint(
        LinearCombination::from_variable(b0),
        LinearCombination::from_variable(b1),
        LinearCombination::from_variable(aux),
    )?;

    emit_bilinear_combination(cs, b0, b1, aux, values, out)
}

/// Shared bilinear-form constraint for a 2-bit LUT given the `b0·b1`
/// witness `aux`: `v0 + (v1−v0)·b0 + (v2−v0)·b1 + (v3−v2−v1+v0)·aux = out`.
fn emit_bilinear_combination<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    b0: Variable,
    b1: Variable,
    aux: Variable,
    values: &[F],
    out: Variable,
) -> Result<(), ConstraintError> {
    let (v0, v1, v2, v3) = (
        values[0].clone(),
        values[1].clone(),
        values[2].clone(),
        values[3].clone(),
    );
    let coeff_b0 = v1.clone() - v0.clone();
    let coeff_b1 = v2.clone() - v0.clone();
    let coeff_aux = v3 - v2 - v1 + v0.clone();

    let lhs = LinearCombination::constant(v0)
        .add_term(coeff_b0, b0)
        .add_term(coeff_b1, b1)
        .add_term(coeff_aux, aux);

    cs.add_constraint(
        lhs,
        LinearCombination::constant(F::one()),
        LinearCombination::from_variable(out),
    )
}

/// 3-bit LUT: two inner 2-bit LUTs over `values[0..4]` and `values[4..8]`,
/// selected between by the top bit.
fn emit_size8<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    inputs: &[Variable],
    values: &[F],
    out: Variable,
) -> Result<(), ConstraintError> {
    let b2 = inputs[0];
    let b1 = inputs[1];
    let b0 = inputs[2];

    let aux = cs.allocate_variable();
    if let Some(product) = product_of(cs, b0, b1) {
        cs.set_value(aux, product);
    }
    cs.add_constraint(
        LinearCombination::from_variable(b0),
        LinearCombination::from_variable(b1),
        LinearCombination::from_variable(aux),
    )?;

    let lo = cs.allocate_variable();
    if let (Some(b0v), Some(b1v)) = (cs.get_value(b0).cloned(), cs.get_value(b1).cloned()) {
        let idx = (if b1v == F::one() { 2 } else { 0 }) + usize::from(b0v == F::one());
        cs.set_value(lo, values[idx].clone());
    }
    emit_bilinear_combination(cs, b0, b1, aux, &values[0..4], lo)?;

    let hi = cs.allocate_variable();
    if let (Some(b0v), Some(b1v)) = (cs.get_value(b0).cloned(), cs.get_value(b1).cloned()) {
        let idx = (if b1v == F::one() { 2 } else { 0 }) + usize::from(b0v == F::one());
        cs.set_value(hi, values[4 + idx].clone());
    }
    emit_bilinear_combination(cs, b0, b1, aux, &values[4..8], hi)?;

    cs.add_constraint(
        LinearCombination::from_variable(hi).add_term(-F::one(), lo),
        LinearCombination::from_variable(b2),
        LinearCombination::from_variable(out).add_term(-F::one(), lo),
    )
}
