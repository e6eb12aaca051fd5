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

//! The constraint-system interface consumed by the emitter (`spec.md` §6),
//! plus one concrete in-memory sink, [`R1cs`], implementing it.

use crate::error::ConstraintError;
use crate::field::Field;

/// An opaque handle to a constraint-system variable. Untyped: every variable
/// holds a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(pub usize);

/// A weighted sum of variables plus a constant, over the field.
#[derive(Debug, Clone)]
pub struct LinearCombination<F: Field> {
    pub terms: Vec<(F, Variable)>,
    pub constant: F,
}

impl<F: Field> LinearCombination<F> {
    pub fn zero() -> Self {
        LinearCombination {
            terms: Vec::new(),
            constant: F::zero(),
        }
    }

    pub fn constant(value: F) -> Self {
        LinearCombination {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn from_variable(var: Variable) -> Self {
        LinearCombination {
            terms: vec![(F::one(), var)],
            constant: F::zero(),
        }
    }

    pub fn from_term(coeff: F, var: Variable) -> Self {
        LinearCombination {
            terms: vec![(coeff, var)],
            constant: F::zero(),
        }
    }

    pub fn add_term(mut self, coeff: F, var: Variable) -> Self {
        self.terms.push((coeff, var));
        self
    }

    /// Evaluates this linear combination against a variable assignment.
    pub fn evaluate(&self, assignment: &[F]) -> F {
        self.terms
            .iter()
            .fold(self.constant.clone(), |acc, (coeff, var)| {
                acc + coeff.clone() * assignment[var.0].clone()
            })
    }
}

/// The sink the emitter writes R1CS triples `(A · B = C)` into, and the
/// source the evaluator reads/writes concrete wire values from.
pub trait ConstraintSystem<F: Field> {
    /// Allocates a fresh variable and returns its handle.
    fn allocate_variable(&mut self) -> Variable;
    /// Assigns a concrete value to a variable (the evaluator's witness).
    fn set_value(&mut self, var: Variable, value: F);
    /// Reads back a previously assigned value.
    fn get_value(&self, var: Variable) -> Option<&F>;
    /// Adds the constraint `a · b = c`.
    fn add_constraint(
        &mut self,
        a: LinearCombination<F>,
        b: LinearCombination<F>,
        c: LinearCombination<F>,
    ) -> Result<(), ConstraintError>;
    /// Fixes the number of public-input variables. May only be called once,
    /// immediately after parsing (`spec.md` §5).
    fn set_num_public_inputs(&mut self, count: usize);
    /// Whether every constraint emitted so far is satisfied by the current
    /// assignment. Not an error: the proving backend may still want to see
    /// an unsatisfying witness.
    fn is_satisfied(&self) -> bool;
}

/// An in-memory R1CS: a variable vector with assigned values, and the
/// constraint list accumulated against it.
pub struct R1cs<F: Field> {
    values: Vec<Option<F>>,
    constraints: Vec<(LinearCombination<F>, LinearCombination<F>, LinearCombination<F>)>,
    num_public_inputs: usize,
}

impl<F: Field> Default for R1cs<F> {
    fn default() -> Self {
        R1cs {
            values: Vec::new(),
            constraints: Vec::new(),
            num_public_inputs: 0,
        }
    }
}

impl<F: Field> R1cs<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_public_inputs(&self) -> usize {
        self.num_public_inputs
    }

    /// The assignment vector, with unassigned variables reported as field
    /// zero for evaluation purposes (mirrors the convention that an
    /// unevaluated run still has a well-defined, if meaningless, R1CS
    /// satisfaction check).
    fn assignment(&self) -> Vec<F> {
        self.values
            .iter()
            .map(|v| v.clone().unwrap_or_else(F::zero))
            .collect()
    }
}

impl<F: Field> ConstraintSystem<F> for R1cs<F> {
    fn allocate_variable(&mut self) -> Variable {
        let id = self.values.len();
        self.values.push(None);
        Variable(id)
    }

    fn set_value(&mut self, var: Variable, value: F) {
        self.values[var.0] = Some(value);
    }

    fn get_value(&self, var: Variable) -> Option<&F> {
        self.values.get(var.0).and_then(|v| v.as_ref())
    }

    fn add_constraint(
        &mut self,
        a: LinearCombination<F>,
        b: LinearCombination<F>,
        c: LinearCombination<F>,
    ) -> Result<(), ConstraintError> {
        let max_var = [&a, &b, &c]
            .iter()
            .flat_map(|lc| lc.terms.iter().map(|(_, v)| v.0))
            .max();
        if let Some(max_var) = max_var {
            if max_var >= self.values.len() {
                return Err(ConstraintError::UnknownVariable);
            }
        }
        self.constraints.push((a, b, c));
        Ok(())
    }

    fn set_num_public_inputs(&mut self, count: usize) {
        self.num_public_inputs = count;
    }

    fn is_satisfied(&self) -> bool {
        let assignment = self.assignment();
        self.constraints
            .iter()
            .all(|(a, b, c)| a.evaluate(&assignment) * b.evaluate(&assignment) == c.evaluate(&assignment))
    }
}
