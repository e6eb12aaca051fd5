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

//! The instruction stream data model (`spec.md` §3).

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::wire::Wire;

/// The opcode sum type. A tagged variant per `spec.md` §9: only the payload
/// relevant to each opcode is ever populated, which rules out a whole class
/// of "constant set but unused" bugs a single flat struct would allow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Opcode<F: Field> {
    /// `out = Σ inputs`. At least two inputs, exactly one output.
    Add,
    /// `out = a * b`.
    Mul,
    /// `out = 0` iff `a == b`, else `1`. Assumes boolean inputs; not
    /// enforced at evaluation time.
    Xor,
    /// `out = 0` iff both inputs are zero, else `1`.
    Or,
    /// `a * b = c`. No evaluation effect; the constraint carries the
    /// assertion.
    Assert,
    /// One input `x`, two outputs `(M, Y)`: `Y = 0` iff `x == 0`, and
    /// `M = x⁻¹` when `x != 0`.
    Zerop,
    /// One input, any number (≥ 1) of outputs: the little-endian bit
    /// decomposition of the input.
    Split,
    /// Any number (≥ 1) of inputs, one output: `out = Σ bits[i] * 2^i`.
    Pack,
    /// `out = k * x`, where `k` is the constant carried on the instruction.
    ConstMul { constant: F },
    /// `out = (-k) * x`, where `k` is the constant carried on the
    /// instruction (already negated at parse time).
    ConstMulNeg { constant: F },
    /// A 2/4/8-entry lookup table indexed by the (little-endian) bits of
    /// `inputs`, with `table` holding the entries and one output wire.
    Table { table: Vec<F> },
}

impl<F: Field> Opcode<F> {
    /// A short, stable name used in diagnostics and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Mul => "mul",
            Opcode::Xor => "xor",
            Opcode::Or => "or",
            Opcode::Assert => "assert",
            Opcode::Zerop => "zerop",
            Opcode::Split => "split",
            Opcode::Pack => "pack",
            Opcode::ConstMul { .. } => "const-mul",
            Opcode::ConstMulNeg { .. } => "const-mul-neg",
            Opcode::Table { .. } => "table",
        }
    }
}

/// A single, fully resolved circuit instruction. Immutable after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction<F: Field> {
    pub opcode: Opcode<F>,
    pub inputs: Vec<Wire>,
    pub outputs: Vec<Wire>,
}

impl<F: Field> Instruction<F> {
    pub fn new(opcode: Opcode<F>, inputs: Vec<Wire>, outputs: Vec<Wire>) -> Self {
        Instruction {
            opcode,
            inputs,
            outputs,
        }
    }
}

/// A fully parsed circuit: the instruction stream plus the wire-id lists
/// declared by `input`/`nizkinput`/`output` lines (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit<F: Field> {
    pub num_wires: usize,
    pub instructions: Vec<Instruction<F>>,
    pub public_input_wire_ids: Vec<Wire>,
    pub private_input_wire_ids: Vec<Wire>,
    pub output_wire_ids: Vec<Wire>,
}

impl<F: Field> Circuit<F> {
    pub fn num_inputs(&self) -> usize {
        self.public_input_wire_ids.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.output_wire_ids.len()
    }
}
