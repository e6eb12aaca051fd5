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

//! The error taxonomy surfaced by every stage of the pipeline.
//!
//! Parse and input errors are fatal at their source; evaluation errors are
//! fatal; constraint errors are expected to be unreachable if parsing
//! succeeded. `Unsatisfied` is deliberately not part of this taxonomy — it is
//! a value the caller inspects (see [`crate::constraint_system::ConstraintSystem::is_satisfied`]),
//! not a thrown error, since the proving backend may still want the witness.

use thiserror::Error;

use crate::wire::Wire;

/// A malformed circuit file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing `total <N>` header")]
    MissingTotalHeader { line: usize },

    #[error("line {line}: `total` header must appear as the first non-comment line: {text:?}")]
    TotalHeaderNotFirst { line: usize, text: String },

    #[error("line {line}: unrecognised line: {text:?}")]
    UnrecognisedLine { line: usize, text: String },

    #[error("line {line}: unknown opcode {opcode:?}: {text:?}")]
    UnknownOpcode {
        line: usize,
        opcode: String,
        text: String,
    },

    #[error(
        "line {line}: declared {kind} count {declared} does not match actual count {actual}: {text:?}"
    )]
    ArityMismatch {
        line: usize,
        kind: &'static str,
        declared: usize,
        actual: usize,
        text: String,
    },

    #[error("line {line}: {opcode} expects {expected}, got {actual} input(s): {text:?}")]
    WrongInputArity {
        line: usize,
        opcode: &'static str,
        expected: &'static str,
        actual: usize,
        text: String,
    },

    #[error("line {line}: {opcode} expects {expected}, got {actual} output(s): {text:?}")]
    WrongOutputArity {
        line: usize,
        opcode: &'static str,
        expected: &'static str,
        actual: usize,
        text: String,
    },

    #[error("line {line}: unsupported table size {size} (only 2, 4, 8 are supported): {text:?}")]
    UnsupportedTableSize {
        line: usize,
        size: usize,
        text: String,
    },

    #[error(
        "line {line}: table size {size} is not 2^(number of inputs = {num_inputs}): {text:?}"
    )]
    TableSizeMismatch {
        line: usize,
        size: usize,
        num_inputs: usize,
        text: String,
    },

    #[error("line {line}: table must declare exactly one output wire: {text:?}")]
    TableNeedsOneOutput { line: usize, text: String },

    #[error("line {line}: malformed integer {text:?}: {source}")]
    MalformedInteger {
        line: usize,
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("line {line}: malformed hex constant in opcode {text:?}")]
    MalformedHexConstant { line: usize, text: String },

    #[error("line {line}: malformed decimal field literal {text:?}")]
    MalformedFieldLiteral { line: usize, text: String },
}

/// A malformed input-assignment file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("line {line}: missing `=`/space separator between wire id and value: {text:?}")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: malformed wire id {text:?}")]
    MalformedWireId { line: usize, text: String },

    #[error("line {line}: malformed hex value {text:?}")]
    MalformedHexValue { line: usize, text: String },
}

/// A fault raised while evaluating an instruction stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("wire {wire:?} was read before it was ever written")]
    UninitializedWire { wire: Wire },

    #[error("table lookup input on wire {wire:?} was not boolean")]
    NonBooleanTableInput { wire: Wire },

    #[error("attempted to invert zero while evaluating wire {wire:?}")]
    InverseOfZero { wire: Wire },
}

/// A constraint the constraint system rejected. Should be unreachable if
/// parsing succeeded, since the emitter only ever asks for variables it
/// allocated itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("unknown variable referenced while emitting a constraint")]
    UnknownVariable,
}

/// The union of every fallible stage in the top-level core flow
/// (`spec.md` §4.6). `Unsatisfied` is deliberately absent: satisfaction is
/// a value the caller inspects, not an error any stage throws.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}
