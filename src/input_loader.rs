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

//! The input-file loader (`spec.md` §4.2, ~10% of core).
//!
//! Parses `<decimal-wire-id>[= ]<hex-value>` lines and writes each value
//! into the wire table. The separator between id and value is any non-empty
//! run of `=` and/or space characters; this permissiveness is a preserved
//! quirk of the source format, not an oversight.

use tracing::trace;

use crate::error::InputError;
use crate::field::Field;
use crate::wire::{Wire, WireTable};

/// Loads `<wire-id>[= ]<hex-value>` assignment lines into `wires`.
/// Duplicate wire ids are not an error: the last line written wins.
pub fn load_inputs<F: Field>(source: &str, wires: &mut WireTable<F>) -> Result<(), InputError> {
    for (line_no, raw_line) in source.lines().enumerate() {
        let line = line_no + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (id_part, value_part) = split_assignment(line, trimmed)?;

        let wire_id: u32 =
            id_part
                .parse()
                .map_err(|_| InputError::MalformedWireId {
                    line,
                    text: trimmed.to_string(),
                })?;
        let value = F::from_hex_str(value_part).ok_or_else(|| InputError::MalformedHexValue {
            line,
            text: trimmed.to_string(),
        })?;

        trace!(wire = wire_id, line, "loaded input wire");
        wires.write_value(Wire(wire_id), value);
    }
    Ok(())
}

/// Splits a line into its wire-id and hex-value parts at the first run of
/// `=`/space characters, requiring at least one separator character and
/// non-empty content on both sides.
fn split_assignment<'a>(line: usize, trimmed: &'a str) -> Result<(&'a str, &'a str), InputError> {
    let bytes = trimmed.as_bytes();
    let is_sep = |b: u8| b == b'=' || b == b' ';

    let sep_start = bytes
        .iter()
        .position(|&b| is_sep(b))
        .ok_or_else(|| InputError::MissingSeparator {
            line,
            text: trimmed.to_string(),
        })?;
    if sep_start == 0 {
        return Err(InputError::MissingSeparator {
            line,
            text: trimmed.to_string(),
        });
    }
    let sep_end = bytes[sep_start..]
        .iter()
        .position(|&b| !is_sep(b))
        .map(|offset| sep_start + offset)
        .unwrap_or(bytes.len());
    if sep_end == bytes.len() {
        return Err(InputError::MissingSeparator {
            line,
            text: trimmed.to_string(),
        });
    }

    Ok((&trimmed[..sep_start], &trimmed[sep_end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeFieldElement;

    #[test]
    fn loads_equals_separated_line() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        load_inputs("3=ff\n", &mut wires).unwrap();
        assert_eq!(
            wires.read_value(Wire(3)),
            Some(&PrimeFieldElement::from_hex_str("ff").unwrap())
        );
    }

    #[test]
    fn loads_space_separated_line() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        load_inputs("3 ff\n", &mut wires).unwrap();
        assert_eq!(
            wires.read_value(Wire(3)),
            Some(&PrimeFieldElement::from_hex_str("ff").unwrap())
        );
    }

    #[test]
    fn loads_mixed_separator_run() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        load_inputs("3 = ff\n", &mut wires).unwrap();
        assert_eq!(
            wires.read_value(Wire(3)),
            Some(&PrimeFieldElement::from_hex_str("ff").unwrap())
        );
    }

    #[test]
    fn last_write_wins_on_duplicate_wire() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        load_inputs("3=01\n3=ff\n", &mut wires).unwrap();
        assert_eq!(
            wires.read_value(Wire(3)),
            Some(&PrimeFieldElement::from_hex_str("ff").unwrap())
        );
    }

    #[test]
    fn rejects_missing_separator() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        let err = load_inputs("3ff\n", &mut wires).unwrap_err();
        assert!(matches!(err, InputError::MissingSeparator { .. }));
    }

    #[test]
    fn rejects_malformed_hex_value() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        let err = load_inputs("3=zz\n", &mut wires).unwrap_err();
        assert!(matches!(err, InputError::MalformedHexValue { .. }));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let mut wires = WireTable::<PrimeFieldElement>::new();
        load_inputs("\n# a comment\n3=ff\n", &mut wires).unwrap();
        assert_eq!(
            wires.read_value(Wire(3)),
            Some(&PrimeFieldElement::from_hex_str("ff").unwrap())
        );
    }
}
