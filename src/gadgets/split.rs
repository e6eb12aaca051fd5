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

//! The `split` gadget (`spec.md` §4.4): bit decomposition with booleanness
//! proofs, plus the reconstitution constraint tying the bits back to `x`.

use crate::constraint_system::{ConstraintSystem, LinearCombination, Variable};
use crate::error::ConstraintError;
use crate::field::Field;

/// Emits, for input variable `x` and output bit variables `bits` (little
/// endian, `bits[i]` weighted `2^i`):
/// - a boolean constraint `b · (1 − b) = 0` per bit, and
/// - the reconstitution constraint `x · 1 = Σ_i 2^i · bits[i]`.
pub fn emit<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    x: Variable,
    bits: &[Variable],
) -> Result<(), ConstraintError> {
    for &bit in bits {
        cs.add_constraint(
            LinearCombination::from_variable(bit),
            LinearCombination::constant(F::one()).add_term(-F::one(), bit),
            LinearCombination::zero(),
        )?;
    }

    let mut reconstitution = LinearCombination::zero();
    let mut weight = F::one();
    let two = F::one() + F::one();
    for &bit in bits {
        reconstitution = reconstitution.add_term(weight.clone(), bit);
        weight = weight * two.clone();
    }

    cs.add_constraint(
        LinearCombination::from_variable(x),
        LinearCombination::constant(F::one()),
        reconstitution,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_system::R1cs;
    use crate::field::PrimeFieldElement;

    type F = PrimeFieldElement;

    #[test]
    fn split_of_thirteen_into_four_bits_is_satisfied() {
        let mut cs = R1cs::<F>::new();
        let x = cs.allocate_variable();
        let bits: Vec<Variable> = (0..4).map(|_| cs.allocate_variable()).collect();
        cs.set_value(x, F::from_u64(13));
        for (i, &bit) in bits.iter().enumerate() {
            let value = if (13u64 >> i) & 1 == 1 { F::one() } else { F::zero() };
            cs.set_value(bit, value);
        }
        emit(&mut cs, x, &bits).unwrap();
        assert!(cs.is_satisfied());
    }

    #[test]
    fn non_boolean_bit_is_rejected_by_satisfaction_check() {
        let mut cs = R1cs::<F>::new();
        let x = cs.allocate_variable();
        let bit = cs.allocate_variable();
        cs.set_value(x, F::from_u64(2));
        cs.set_value(bit, F::from_u64(2));
        emit(&mut cs, x, std::slice::from_ref(&bit)).unwrap();
        assert!(!cs.is_satisfied());
    }
}
