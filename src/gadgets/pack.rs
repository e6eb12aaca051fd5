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

//! The `pack` gadget (`spec.md` §4.4): the inverse of `split`, without
//! re-proving booleanness of its inputs — that is the caller's obligation.

use crate::constraint_system::{ConstraintSystem, LinearCombination, Variable};
use crate::error::ConstraintError;
use crate::field::Field;

/// Emits `out · 1 = Σ_i 2^i · bits[i]`.
pub fn emit<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    bits: &[Variable],
    out: Variable,
) -> Result<(), ConstraintError> {
    let mut sum = LinearCombination::zero();
    let mut weight = F::one();
    let two = F::one() + F::one();
    for &bit in bits {
        sum = sum.add_term(weight.clone(), bit);
        weight = weight * two.clone();
    }

    cs.add_constraint(
        LinearCombination::from_variable(out),
        LinearCombination::constant(F::one()),
        sum,
    )
}
