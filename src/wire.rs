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

//! Wires and the wire table (`spec.md` §3, §4.5).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constraint_system::{ConstraintSystem, Variable};
use crate::field::Field;

/// A global, flat wire identifier naming a position in the circuit's value
/// vector. Wires are never removed once allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wire(pub u32);

impl From<u32> for Wire {
    fn from(v: u32) -> Self {
        Wire(v)
    }
}

impl std::fmt::Display for Wire {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps wires to constraint-system variables, allocating lazily on first
/// reference, and tracks each wire's concrete value once evaluated.
///
/// Many real circuits never declare every intermediate wire up front; the
/// parser allocates a variable the first time it sees a wire referenced at
/// all, and that behaviour is preserved here exactly (`spec.md` §9).
pub struct WireTable<F: Field> {
    variables: HashMap<Wire, Variable>,
    values: HashMap<Wire, F>,
}

impl<F: Field> Default for WireTable<F> {
    fn default() -> Self {
        WireTable {
            variables: HashMap::new(),
            values: HashMap::new(),
        }
    }
}

impl<F: Field> WireTable<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh constraint-system variable for `wire` if it has not
    /// been seen before, otherwise returns the existing one.
    pub fn lookup<CS: ConstraintSystem<F>>(&mut self, cs: &mut CS, wire: Wire) -> Variable {
        *self
            .variables
            .entry(wire)
            .or_insert_with(|| cs.allocate_variable())
    }

    /// Returns the variable for `wire`, if it has already been allocated.
    pub fn variable(&self, wire: Wire) -> Option<Variable> {
        self.variables.get(&wire).copied()
    }

    pub fn write_value(&mut self, wire: Wire, value: F) {
        self.values.insert(wire, value);
    }

    pub fn read_value(&self, wire: Wire) -> Option<&F> {
        self.values.get(&wire)
    }

    /// Every wire that has been allocated a variable so far, in no
    /// particular order.
    pub fn allocated_wires(&self) -> impl Iterator<Item = Wire> + '_ {
        self.variables.keys().copied()
    }
}
