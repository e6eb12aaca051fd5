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

//! Black-box end-to-end coverage of the six concrete scenarios in
//! `spec.md` §8, exercised through the public `Core` API only.

use pinocchio_ir::core::Core;
use pinocchio_ir::field::{Field, PrimeFieldElement};
use pinocchio_ir::wire::Wire;
use pinocchio_ir::R1cs;

type F = PrimeFieldElement;

fn build(circuit: &str, input: Option<&str>) -> Core<F, R1cs<F>> {
    Core::new(circuit, input, R1cs::new()).expect("circuit should parse, evaluate and emit cleanly")
}

#[test]
fn scenario_1_dot_product() {
    let circuit = "\
total 15
input 2
input 3
input 4
input 5
input 6
input 7
mul in 2 2 5 out 1 8
mul in 2 3 6 out 1 9
mul in 2 4 7 out 1 10
add in 2 8 9 out 1 11
add in 2 11 10 out 1 12
output 12
";
    let input = "\
2=03
3=05
4=07
5=0b
6=0d
7=11
";
    let core = build(circuit, Some(input));
    assert_eq!(core.wire_value(Wire(12)), Some(&F::from_u64(217)));
    assert!(core.is_satisfied());
}

#[test]
fn scenario_2_xor() {
    let circuit = "total 3\nxor in 2 0 1 out 1 2\n";
    let input = "0=01\n1=01\n";
    let core = build(circuit, Some(input));
    assert_eq!(core.wire_value(Wire(2)), Some(&F::zero()));
    assert!(core.is_satisfied());
}

#[test]
fn scenario_3_three_bit_lookup_table() {
    // idx = val(w3) + 2*val(w2) + 4*val(w1) (spec.md §4.3's reversed
    // input-weight convention for `table`).
    let circuit = "total 10\ntable 8 0 1 0 1 0 1 0 1 in 1 2 3 out 4\n";

    let core = build(circuit, Some("1=00\n2=00\n3=01\n"));
    assert_eq!(core.wire_value(Wire(4)), Some(&F::from_u64(1)));
    assert!(core.is_satisfied());

    let core = build(circuit, Some("1=00\n2=01\n3=01\n"));
    assert_eq!(core.wire_value(Wire(4)), Some(&F::from_u64(1)));
    assert!(core.is_satisfied());

    let core = build(circuit, Some("1=01\n2=00\n3=00\n"));
    assert_eq!(core.wire_value(Wire(4)), Some(&F::from_u64(0)));
    assert!(core.is_satisfied());
}

#[test]
fn scenario_4_zerop_on_zero_and_nonzero() {
    let circuit = "total 3\nzerop in 1 0 out 2 1 2\n";

    let core = build(circuit, Some("0=00\n"));
    assert_eq!(core.wire_value(Wire(2)), Some(&F::zero()));
    assert!(core.is_satisfied());

    let core = build(circuit, Some("0=07\n"));
    assert_eq!(core.wire_value(Wire(2)), Some(&F::one()));
    let m = core.wire_value(Wire(1)).unwrap().clone();
    assert_eq!(F::from_u64(7) * m, F::one());
    assert!(core.is_satisfied());
}

#[test]
fn scenario_5_split_pack_round_trip() {
    let circuit = "\
total 6
input 0
split in 1 0 out 4 1 2 3 4
pack in 4 1 2 3 4 out 1 5
";
    let core = build(circuit, Some("0=0d\n"));
    assert_eq!(core.wire_value(Wire(5)), Some(&F::from_u64(13)));
    assert!(core.is_satisfied());
}

#[test]
fn scenario_6_const_mul_and_const_mul_neg() {
    let core = build("total 2\nconst-mul-ff in 1 0 out 1 1\n", Some("0=02\n"));
    assert_eq!(core.wire_value(Wire(1)), Some(&F::from_u64(510)));
    assert!(core.is_satisfied());

    let core = build("total 2\nconst-mul-neg-ff in 1 0 out 1 1\n", Some("0=02\n"));
    assert_eq!(core.wire_value(Wire(1)), Some(&(-F::from_u64(510))));
    assert!(core.is_satisfied());
}

#[test]
fn public_input_count_excludes_outputs() {
    let circuit = "\
total 4
input 0
input 1
output 2
add in 2 0 1 out 1 2
";
    let core = build(circuit, Some("0=01\n1=01\n"));
    assert_eq!(core.num_inputs(), 2);
    assert_eq!(core.constraint_system().num_public_inputs(), 2);
}

#[test]
fn parse_and_emit_without_evaluation_skips_satisfaction() {
    let circuit = "total 3\nadd in 2 0 1 out 1 2\n";
    let core = build(circuit, None);
    assert_eq!(core.wire_value(Wire(2)), None);
    assert_eq!(core.num_outputs(), 0);
}
