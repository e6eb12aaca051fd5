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

//! The `zerop` gadget (`spec.md` §4.4): witnesses whether `x` is zero.

use crate::constraint_system::{ConstraintSystem, LinearCombination, Variable};
use crate::error::ConstraintError;
use crate::field::Field;

/// Emits the two constraints that together force `y == 1` iff `x != 0`,
/// given the witnessed inverse `m`:
/// - `x · (1 − y) = 0`
/// - `x · m = y`
pub fn emit<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    x: Variable,
    m: Variable,
    y: Variable,
) -> Result<(), ConstraintError> {
    cs.add_constraint(
        LinearCombination::from_variable(x),
        LinearCombination::constant(F::one()).add_term(-F::one(), y),
        LinearCombination::zero(),
    )?;
    cs.add_constraint(
        LinearCombination::from_variable(x),
        LinearCombination::from_variable(m),
        LinearCombination::from_variable(y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_system::R1cs;
    use crate::field::PrimeFieldElement;

    type F = PrimeFieldElement;

    #[test]
    fn zero_input_is_satisfied() {
        let mut cs = R1cs::<F>::new();
        let x = cs.allocate_variable();
        let m = cs.allocate_variable();
        let y = cs.allocate_variable();
        cs.set_value(x, F::zero());
        cs.set_value(m, F::zero());
        cs.set_value(y, F::zero());
        emit(&mut cs, x, m, y).unwrap();
        assert!(cs.is_satisfied());
    }

    #[test]
    fn nonzero_input_requires_inverse_witness() {
        let mut cs = R1cs::<F>::new();
        let x = cs.allocate_variable();
        let m = cs.allocate_variable();
        let y = cs.allocate_variable();
        let seven = F::from_u64(7);
        cs.set_value(x, seven.clone());
        cs.set_value(m, seven.inverse().unwrap());
        cs.set_value(y, F::one());
        emit(&mut cs, x, m, y).unwrap();
        assert!(cs.is_satisfied());
    }

    #[test]
    fn wrong_y_for_nonzero_input_is_unsatisfied() {
        let mut cs = R1cs::<F>::new();
        let x = cs.allocate_variable();
        let m = cs.allocate_variable();
        let y = cs.allocate_variable();
        cs.set_value(x, F::from_u64(7));
        cs.set_value(m, F::zero());
        cs.set_value(y, F::zero());
        emit(&mut cs, x, m, y).unwrap();
        assert!(!cs.is_satisfied());
    }
}
