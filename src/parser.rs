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

//! The circuit-file parser (`spec.md` §4.1).
//!
//! Streams the file line by line, recognises the handful of line shapes the
//! format allows, and produces an ordered [`Instruction`] list plus the
//! three wire-id lists. As a side effect of constructing each instruction it
//! allocates a constraint-system variable for every wire it sees referenced
//! for the first time, so later stages can address wires purely by handle
//! (`spec.md` §9's lazy-allocation quirk, preserved exactly).

use tracing::trace;

use crate::constraint_system::ConstraintSystem;
use crate::error::ParseError;
use crate::field::Field;
use crate::instruction::{Circuit, Instruction, Opcode};
use crate::wire::{Wire, WireTable};

/// Parses a full circuit file, allocating constraint-system variables for
/// every wire it references along the way.
pub fn parse_circuit<F: Field, CS: ConstraintSystem<F>>(
    source: &str,
    cs: &mut CS,
    wires: &mut WireTable<F>,
) -> Result<Circuit<F>, ParseError> {
    let mut instructions = Vec::new();
    let mut public_input_wire_ids = Vec::new();
    let mut private_input_wire_ids = Vec::new();
    let mut output_wire_ids = Vec::new();
    let mut num_wires: Option<usize> = None;

    for (line_no, raw_line) in source.lines().enumerate() {
        let line = line_no + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if num_wires.is_none() {
            num_wires = Some(parse_total_header(line, trimmed)?);
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.first().copied() {
            Some("input") => {
                let w = parse_single_wire(line, trimmed, &tokens, "input")?;
                wires.lookup(cs, w);
                public_input_wire_ids.push(w);
            }
            Some("nizkinput") => {
                let w = parse_single_wire(line, trimmed, &tokens, "nizkinput")?;
                wires.lookup(cs, w);
                private_input_wire_ids.push(w);
            }
            Some("output") => {
                let w = parse_single_wire(line, trimmed, &tokens, "output")?;
                wires.lookup(cs, w);
                output_wire_ids.push(w);
            }
            Some("table") => {
                instructions.push(parse_table_line(line, trimmed, &tokens, cs, wires)?);
            }
            Some(op) => {
                instructions.push(parse_opcode_line(line, trimmed, op, &tokens, cs, wires)?);
            }
            None => unreachable!("empty lines are skipped above"),
        }
    }

    let num_wires = num_wires.ok_or(ParseError::MissingTotalHeader { line: 1 })?;

    trace!(
        num_wires,
        num_instructions = instructions.len(),
        num_public_inputs = public_input_wire_ids.len(),
        num_private_inputs = private_input_wire_ids.len(),
        num_outputs = output_wire_ids.len(),
        "parsed circuit"
    );

    Ok(Circuit {
        num_wires,
        instructions,
        public_input_wire_ids,
        private_input_wire_ids,
        output_wire_ids,
    })
}

fn parse_total_header(line: usize, trimmed: &str) -> Result<usize, ParseError> {
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.first() != Some(&"total") || tokens.len() != 2 {
        return Err(ParseError::TotalHeaderNotFirst {
            line,
            text: trimmed.to_string(),
        });
    }
    tokens[1]
        .parse::<usize>()
        .map_err(|source| ParseError::MalformedInteger {
            line,
            text: trimmed.to_string(),
            source,
        })
}

fn parse_single_wire(
    line: usize,
    trimmed: &str,
    tokens: &[&str],
    _keyword: &'static str,
) -> Result<Wire, ParseError> {
    if tokens.len() != 2 {
        return Err(ParseError::UnrecognisedLine {
            line,
            text: trimmed.to_string(),
        });
    }
    parse_wire(line, trimmed, tokens[1])
}

fn parse_wire(line: usize, trimmed: &str, token: &str) -> Result<Wire, ParseError> {
    token
        .parse::<u32>()
        .map(Wire)
        .map_err(|source| ParseError::MalformedInteger {
            line,
            text: trimmed.to_string(),
            source,
        })
}

/// Parses the shared `in <n> <w...> out <m> <w...>` suffix that every opcode
/// line other than `table` uses, returning the declared/actual input and
/// output wire lists.
fn parse_in_out(
    line: usize,
    trimmed: &str,
    tokens: &[&str],
) -> Result<(Vec<Wire>, Vec<Wire>), ParseError> {
    if tokens.len() < 4 || tokens[1] != "in" {
        return Err(ParseError::UnrecognisedLine {
            line,
            text: trimmed.to_string(),
        });
    }
    let declared_n: usize =
        tokens[2]
            .parse()
            .map_err(|source| ParseError::MalformedInteger {
                line,
                text: trimmed.to_string(),
                source,
            })?;
    let in_start = 3;
    let in_end = in_start + declared_n;
    if tokens.len() < in_end + 2 || tokens[in_end] != "out" {
        return Err(ParseError::ArityMismatch {
            line,
            kind: "input",
            declared: declared_n,
            actual: tokens.len().saturating_sub(in_start).min(declared_n),
            text: trimmed.to_string(),
        });
    }
    let inputs = tokens[in_start..in_end]
        .iter()
        .map(|t| parse_wire(line, trimmed, t))
        .collect::<Result<Vec<_>, _>>()?;

    let declared_m: usize = tokens[in_end + 1]
        .parse()
        .map_err(|source| ParseError::MalformedInteger {
            line,
            text: trimmed.to_string(),
            source,
        })?;
    let out_start = in_end + 2;
    let out_end = out_start + declared_m;
    if tokens.len() != out_end {
        return Err(ParseError::ArityMismatch {
            line,
            kind: "output",
            declared: declared_m,
            actual: tokens.len().saturating_sub(out_start),
            text: trimmed.to_string(),
        });
    }
    let outputs = tokens[out_start..out_end]
        .iter()
        .map(|t| parse_wire(line, trimmed, t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((inputs, outputs))
}

fn allocate_all<F: Field, CS: ConstraintSystem<F>>(
    cs: &mut CS,
    wires: &mut WireTable<F>,
    ws: &[Wire],
) {
    for w in ws {
        wires.lookup(cs, *w);
    }
}

fn check_input_arity(
    line: usize,
    trimmed: &str,
    opcode: &'static str,
    expected: &'static str,
    actual: usize,
    ok: bool,
) -> Result<(), ParseError> {
    if ok {
        Ok(())
    } else {
        Err(ParseError::WrongInputArity {
            line,
            opcode,
            expected,
            actual,
            text: trimmed.to_string(),
        })
    }
}

fn check_output_arity(
    line: usize,
    trimmed: &str,
    opcode: &'static str,
    expected: &'static str,
    actual: usize,
    ok: bool,
) -> Result<(), ParseError> {
    if ok {
        Ok(())
    } else {
        Err(ParseError::WrongOutputArity {
            line,
            opcode,
            expected,
            actual,
            text: trimmed.to_string(),
        })
    }
}

fn parse_opcode_line<F: Field, CS: ConstraintSystem<F>>(
    line: usize,
    trimmed: &str,
    op: &str,
    tokens: &[&str],
    cs: &mut CS,
    wires: &mut WireTable<F>,
) -> Result<Instruction<F>, ParseError> {
    let (inputs, outputs) = parse_in_out(line, trimmed, tokens)?;

    let opcode = if let Some(hex) = op.strip_prefix("const-mul-neg-") {
        let constant = parse_hex_constant(line, trimmed, hex)?;
        Opcode::ConstMulNeg { constant: -constant }
    } else if let Some(hex) = op.strip_prefix("const-mul-") {
        let constant = parse_hex_constant(line, trimmed, hex)?;
        Opcode::ConstMul { constant }
    } else {
        match op {
            "add" => Opcode::Add,
            "mul" => Opcode::Mul,
            "xor" => Opcode::Xor,
            "or" => Opcode::Or,
            "assert" => Opcode::Assert,
            "zerop" => Opcode::Zerop,
            "split" => Opcode::Split,
            "pack" => Opcode::Pack,
            other => {
                return Err(ParseError::UnknownOpcode {
                    line,
                    opcode: other.to_string(),
                    text: trimmed.to_string(),
                });
            }
        }
    };

    match &opcode {
        Opcode::Add => {
            check_input_arity(line, trimmed, "add", "at least 2 inputs", inputs.len(), inputs.len() >= 2)?;
            check_output_arity(line, trimmed, "add", "1 output", outputs.len(), outputs.len() == 1)?;
        }
        Opcode::Mul | Opcode::Xor | Opcode::Or | Opcode::Assert => {
            let name = opcode.name();
            check_input_arity(line, trimmed, name, "2 inputs", inputs.len(), inputs.len() == 2)?;
            check_output_arity(line, trimmed, name, "1 output", outputs.len(), outputs.len() == 1)?;
        }
        Opcode::Zerop => {
            check_input_arity(line, trimmed, "zerop", "1 input", inputs.len(), inputs.len() == 1)?;
            check_output_arity(line, trimmed, "zerop", "2 outputs", outputs.len(), outputs.len() == 2)?;
        }
        Opcode::Split => {
            check_input_arity(line, trimmed, "split", "1 input", inputs.len(), inputs.len() == 1)?;
            check_output_arity(
                line,
                trimmed,
                "split",
                "at least 1 output",
                outputs.len(),
                !outputs.is_empty(),
            )?;
        }
        Opcode::Pack => {
            check_input_arity(
                line,
                trimmed,
                "pack",
                "at least 1 input",
                inputs.len(),
                !inputs.is_empty(),
            )?;
            check_output_arity(line, trimmed, "pack", "1 output", outputs.len(), outputs.len() == 1)?;
        }
        Opcode::ConstMul { .. } | Opcode::ConstMulNeg { .. } => {
            let name = opcode.name();
            check_input_arity(line, trimmed, name, "1 input", inputs.len(), inputs.len() == 1)?;
            check_output_arity(line, trimmed, name, "1 output", outputs.len(), outputs.len() == 1)?;
        }
        Opcode::Table { .. } => unreachable!("table lines are parsed by parse_table_line"),
    }

    allocate_all(cs, wires, &inputs);
    allocate_all(cs, wires, &outputs);

    Ok(Instruction::new(opcode, inputs, outputs))
}

fn parse_hex_constant<F: Field>(line: usize, trimmed: &str, hex: &str) -> Result<F, ParseError> {
    F::from_hex_str(hex).ok_or_else(|| ParseError::MalformedHexConstant {
        line,
        text: trimmed.to_string(),
    })
}

/// `table <k> <v0 v1 … v(k-1)> in <w0 … w(m-1)> out <w_out>`.
fn parse_table_line<F: Field, CS: ConstraintSystem<F>>(
    line: usize,
    trimmed: &str,
    tokens: &[&str],
    cs: &mut CS,
    wires: &mut WireTable<F>,
) -> Result<Instruction<F>, ParseError> {
    if tokens.len() < 2 {
        return Err(ParseError::UnrecognisedLine {
            line,
            text: trimmed.to_string(),
        });
    }
    let k: usize = tokens[1]
        .parse()
        .map_err(|source| ParseError::MalformedInteger {
            line,
            text: trimmed.to_string(),
            source,
        })?;
    if !matches!(k, 2 | 4 | 8) {
        return Err(ParseError::UnsupportedTableSize {
            line,
            size: k,
            text: trimmed.to_string(),
        });
    }
    let values_start = 2;
    let values_end = values_start + k;
    if tokens.len() < values_end + 2 || tokens[values_end] != "in" {
        return Err(ParseError::UnrecognisedLine {
            line,
            text: trimmed.to_string(),
        });
    }
    let table = tokens[values_start..values_end]
        .iter()
        .map(|t| {
            F::from_decimal_str(t).ok_or_else(|| ParseError::MalformedFieldLiteral {
                line,
                text: trimmed.to_string(),
            })
        })
        .collect::<Result<Vec<F>, _>>()?;

    // everything between "in" and "out" is the input wire list.
    let in_start = values_end + 1;
    let out_keyword_idx = tokens[in_start..]
        .iter()
        .position(|t| *t == "out")
        .map(|i| i + in_start)
        .ok_or_else(|| ParseError::UnrecognisedLine {
            line,
            text: trimmed.to_string(),
        })?;
    let inputs = tokens[in_start..out_keyword_idx]
        .iter()
        .map(|t| parse_wire(line, trimmed, t))
        .collect::<Result<Vec<_>, _>>()?;

    let num_inputs = inputs.len();
    let expected_size = 1usize << num_inputs;
    if expected_size != k {
        return Err(ParseError::TableSizeMismatch {
            line,
            size: k,
            num_inputs,
            text: trimmed.to_string(),
        });
    }

    let out_tokens = &tokens[out_keyword_idx + 1..];
    if out_tokens.len() != 1 {
        return Err(ParseError::TableNeedsOneOutput {
            line,
            text: trimmed.to_string(),
        });
    }
    let output = parse_wire(line, trimmed, out_tokens[0])?;

    allocate_all(cs, wires, &inputs);
    wires.lookup(cs, output);

    Ok(Instruction::new(
        Opcode::Table { table },
        inputs,
        vec![output],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint_system::R1cs;
    use crate::field::PrimeFieldElement;

    fn parse(src: &str) -> Result<Circuit<PrimeFieldElement>, ParseError> {
        let mut cs = R1cs::<PrimeFieldElement>::new();
        let mut wires = WireTable::<PrimeFieldElement>::new();
        parse_circuit(src, &mut cs, &mut wires)
    }

    #[test]
    fn rejects_missing_total_header() {
        let err = parse("input 0\n").unwrap_err();
        assert!(matches!(err, ParseError::TotalHeaderNotFirst { .. }));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let circuit = parse("# a comment\ntotal 3\n\ninput 0\n").unwrap();
        assert_eq!(circuit.num_wires, 3);
        assert_eq!(circuit.public_input_wire_ids, vec![Wire(0)]);
    }

    #[test]
    fn parses_dot_product_style_circuit() {
        let src = "\
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
        let circuit = parse(src).unwrap();
        assert_eq!(circuit.instructions.len(), 5);
        assert_eq!(circuit.num_inputs(), 6);
        assert_eq!(circuit.output_wire_ids, vec![Wire(12)]);
    }

    #[test]
    fn add_requires_at_least_two_inputs() {
        let src = "total 3\nadd in 1 0 out 1 1\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::WrongInputArity { opcode: "add", .. }));
    }

    #[test]
    fn mul_rejects_wrong_input_count() {
        let src = "total 3\nmul in 1 0 out 1 1\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::WrongInputArity { opcode: "mul", .. }));
    }

    #[test]
    fn zerop_requires_two_outputs() {
        let src = "total 3\nzerop in 1 0 out 1 1\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongOutputArity { opcode: "zerop", .. }
        ));
    }

    #[test]
    fn declared_count_mismatch_is_rejected() {
        let src = "total 3\nadd in 3 0 1 out 1 2\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::ArityMismatch { kind: "input", .. }));
    }

    #[test]
    fn const_mul_parses_hex_constant() {
        let src = "total 2\nconst-mul-ff in 1 0 out 1 1\n";
        let circuit = parse(src).unwrap();
        match &circuit.instructions[0].opcode {
            Opcode::ConstMul { constant } => {
                assert_eq!(*constant, PrimeFieldElement::from_u64(255));
            }
            other => panic!("expected ConstMul, got {other:?}"),
        }
    }

    #[test]
    fn const_mul_neg_negates_constant() {
        let src = "total 2\nconst-mul-neg-ff in 1 0 out 1 1\n";
        let circuit = parse(src).unwrap();
        match &circuit.instructions[0].opcode {
            Opcode::ConstMulNeg { constant } => {
                assert_eq!(*constant, -PrimeFieldElement::from_u64(255));
            }
            other => panic!("expected ConstMulNeg, got {other:?}"),
        }
    }

    #[test]
    fn table_size_one_is_rejected() {
        let src = "total 3\ntable 1 0 in out 1\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedTableSize { size: 1, .. }));
    }

    #[test]
    fn table_size_sixteen_is_rejected() {
        let src = format!(
            "total 20\ntable 16 {} in 0 1 2 3 out 4\n",
            (0..16).map(|i| i.to_string()).collect::<Vec<_>>().join(" ")
        );
        let err = parse(&src).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedTableSize { size: 16, .. }
        ));
    }

    #[test]
    fn table_of_eight_parses() {
        let src = "total 10\ntable 8 0 1 0 1 0 1 0 1 in 1 2 3 out 4\n";
        let circuit = parse(src).unwrap();
        match &circuit.instructions[0].opcode {
            Opcode::Table { table } => assert_eq!(table.len(), 8),
            other => panic!("expected Table, got {other:?}"),
        }
        assert_eq!(circuit.instructions[0].inputs, vec![Wire(1), Wire(2), Wire(3)]);
        assert_eq!(circuit.instructions[0].outputs, vec![Wire(4)]);
    }

    #[test]
    fn table_size_must_match_input_count() {
        let src = "total 10\ntable 8 0 1 0 1 0 1 0 1 in 1 2 out 4\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::TableSizeMismatch { .. }));
    }
}
