//! The simplified Bristol layout read by the secure computation engine.
//!
//! ```text
//! ngates wire_count
//! input_bits_0 input_bits_1 output_bits
//!
//! 2 1 left right output AND
//! 1 1 input output INV
//! ```

use anyhow::{anyhow, Context};
use regex::Regex;

use crate::errors::EmpError;
use crate::gate::{EmpGate, Metadata};

/// Render gates and header counts, lines joined with `\n`.
pub fn emit(gates: &[EmpGate], metadata: &Metadata) -> String {
    let mut lines = Vec::with_capacity(gates.len() + 3);
    lines.push(format!("{} {}", gates.len(), metadata.wire_count));
    lines.push(format!(
        "{} {} {}",
        metadata.input_bits_0, metadata.input_bits_1, metadata.output_bits
    ));
    lines.push(String::new());
    for gate in gates {
        lines.push(match *gate {
            EmpGate::And {
                left,
                right,
                output,
            } => format!("2 1 {} {} {} AND", left, right, output),
            EmpGate::Xor {
                left,
                right,
                output,
            } => format!("2 1 {} {} {} XOR", left, right, output),
            EmpGate::Inv { input, output } => format!("1 1 {} {} INV", input, output),
        });
    }
    lines.join("\n")
}

/// Reader for text produced by [`emit`].
pub struct SimplifiedBristol;

fn tokens<'a>(re: &Regex, line: &'a str) -> Vec<&'a str> {
    re.captures_iter(line)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn parse_fields(fields: &[&str], what: &str) -> Result<Vec<usize>, EmpError> {
    let values = fields
        .iter()
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("Failed to parse {}: {}", what, s))
        })
        .collect::<Result<Vec<usize>, _>>()?;
    Ok(values)
}

fn header_line(
    re: &Regex,
    line: Option<&str>,
    expected: usize,
    what: &str,
) -> Result<Vec<usize>, EmpError> {
    let line = line.ok_or_else(|| EmpError::ParsingError(anyhow!("Missing {} line", what)))?;
    let fields = tokens(re, line);
    if fields.len() != expected {
        return Err(EmpError::ParsingError(anyhow!(
            "Expecting {} values in {} line: {}",
            expected,
            what,
            line
        )));
    }
    parse_fields(&fields, what)
}

impl SimplifiedBristol {
    pub fn parse(text: &str) -> Result<(Vec<EmpGate>, Metadata), EmpError> {
        let re = Regex::new(r"(\d+|\S+)\s*").context("Failed to compile regex")?;
        let mut lines = text.lines();

        let counts = header_line(&re, lines.next(), 2, "count")?;
        let io = header_line(&re, lines.next(), 3, "io")?;
        let metadata = Metadata {
            wire_count: counts[1],
            input_bits_0: io[0],
            input_bits_1: io[1],
            output_bits: io[2],
        };
        let wire = |id: usize| -> Result<usize, EmpError> {
            if id >= metadata.wire_count {
                return Err(EmpError::ParsingError(anyhow!(
                    "Wire {} out of range, circuit has {} wires",
                    id,
                    metadata.wire_count
                )));
            }
            Ok(id)
        };

        let mut gates = Vec::with_capacity(counts[0]);
        for line in lines {
            let fields = tokens(&re, line);
            let Some((&tag, operands)) = fields.split_last() else {
                continue;
            };
            let arity: &[usize] = match tag {
                "AND" | "XOR" => &[2, 1],
                "INV" => &[1, 1],
                _ => {
                    return Err(EmpError::ParsingError(anyhow!(
                        "Encountered unsupported gate type: {}",
                        tag
                    )));
                }
            };
            let f = parse_fields(operands, "gate")?;
            if f.len() != 2 + arity[0] + arity[1] || f[..2] != *arity {
                return Err(EmpError::ParsingError(anyhow!("Malformed gate line: {}", line)));
            }
            let gate = match tag {
                "AND" => EmpGate::And {
                    left: wire(f[2])?,
                    right: wire(f[3])?,
                    output: wire(f[4])?,
                },
                "XOR" => EmpGate::Xor {
                    left: wire(f[2])?,
                    right: wire(f[3])?,
                    output: wire(f[4])?,
                },
                _ => EmpGate::Inv {
                    input: wire(f[2])?,
                    output: wire(f[3])?,
                },
            };
            gates.push(gate);
        }

        if gates.len() != counts[0] {
            return Err(EmpError::ParsingError(anyhow!(
                "Expecting {} gates, found {}",
                counts[0],
                gates.len()
            )));
        }
        Ok((gates, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<EmpGate>, Metadata) {
        let gates = vec![
            EmpGate::Xor {
                left: 0,
                right: 1,
                output: 3,
            },
            EmpGate::Inv {
                input: 3,
                output: 4,
            },
            EmpGate::And {
                left: 2,
                right: 4,
                output: 5,
            },
        ];
        (gates, Metadata::new(&[2, 1], 6, 2))
    }

    #[test]
    fn test_emit_layout() {
        let (gates, metadata) = sample();
        assert_eq!(
            emit(&gates, &metadata),
            "3 6\n2 1 2\n\n2 1 0 1 3 XOR\n1 1 3 4 INV\n2 1 2 4 5 AND"
        );
    }

    #[test]
    fn test_parse_emitted() {
        let (gates, metadata) = sample();
        let (parsed, parsed_metadata) = SimplifiedBristol::parse(&emit(&gates, &metadata)).unwrap();
        assert_eq!(parsed, gates);
        assert_eq!(parsed_metadata, metadata);

        let (parsed, _) = SimplifiedBristol::parse("0 2\n2 0 0\n").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_rejects() {
        let bad = [
            "",
            "1 3",
            "1 3\n1 1\n\n2 1 0 1 2 AND",
            "1 3\n2 0 1\n\n2 1 0 1 2 OR",
            "1 3\n2 0 1\n\n2 1 0 2 AND",
            "2 3\n2 0 1\n\n2 1 0 1 2 AND",
            "1 3\n2 0 1\n\n2 1 0 1 3 AND",
            "1 3\n2 0 1\n\nAND",
            "1 3\n2 0 1\n\n2 1 -0 1 2 AND",
            "1 3\n2 0 1\n\n2 1 0 99 2 AND",
            "1 3\n2 0 1\n\n1 1 5 2 INV",
            "1 3\n2 0 1\n\n7 7 0 1 2 AND",
            "1 3\n2 0 1\n\n2 1 0 2 INV",
            "1 3\n2 0 1\n\n1 1 0 2 XOR",
            "1 -3\n2 0 1\n\n2 1 0 1 2 AND",
        ];
        for text in bad {
            assert!(
                matches!(SimplifiedBristol::parse(text), Err(EmpError::ParsingError(_))),
                "accepted {:?}",
                text
            );
        }
    }
}
