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

//! A compiler front end and evaluator for the Pinocchio arithmetic-circuit
//! textual format: parses a circuit description, evaluates it against an
//! optional input assignment, and emits the corresponding R1CS constraints.
//!
//! The proving backend, key management, and file-system plumbing around
//! this core are out of scope; [`field::Field`] and
//! [`constraint_system::ConstraintSystem`] are the two seams a caller
//! supplies its own implementations for.

#[macro_use]
extern crate tracing;

pub mod constraint_system;
pub mod core;
pub mod emitter;
pub mod error;
pub mod evaluator;
pub mod field;
pub mod gadgets;
pub mod input_loader;
pub mod instruction;
pub mod parser;
pub mod wire;

pub use constraint_system::{ConstraintSystem, LinearCombination, R1cs, Variable};
pub use core::Core;
pub use error::CoreError;
pub use field::{Field, PrimeFieldElement};
pub use instruction::{Circuit, Instruction, Opcode};
pub use wire::{Wire, WireTable};
