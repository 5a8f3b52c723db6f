//! Load Bristol format circuit from files.

use crate::errors::CircuitLoadError;
use crate::gate::{Circuit, Gate};
use anyhow::{anyhow, Context};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

/// Parse captures into a Vec
fn parse_to_vec<'a>(re: &Regex, line: &'a str) -> Vec<&'a str> {
    re.captures_iter(line)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn parse_usize(s: &str, what: &str) -> Result<usize, CircuitLoadError> {
    let v = s
        .parse()
        .with_context(|| format!("Failed to parse {}: {}", what, s))?;
    Ok(v)
}

/// Parse a `count w_0 w_1 ...` header line.
fn parse_group_line(re: &Regex, line: &str, what: &str) -> Result<Vec<usize>, CircuitLoadError> {
    let fields = parse_to_vec(re, line);
    let (count, widths) = fields.split_first().ok_or_else(|| {
        CircuitLoadError::ParsingError(anyhow!("Expecting {} header line: {}", what, line))
    })?;

    let count = parse_usize(count, what)?;
    let widths = widths
        .iter()
        .map(|w| parse_usize(w, what))
        .collect::<Result<Vec<usize>, _>>()?;

    // Check nwires is specified for every group
    if widths.len() != count {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "Expecting wire count to be specified for every {}: {}",
            what,
            line
        )));
    }
    Ok(widths)
}

fn read_header_line<R: BufRead>(reader: &mut R) -> Result<String, CircuitLoadError> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).context("Failed to read line")?;
    if n == 0 {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "Unexpected end of circuit header"
        )));
    }
    Ok(line)
}

impl Circuit {
    /// Load and Parse circuit files in Bristol Fashion format as specified here:
    /// `https://homes.esat.kuleuven.be/~nsmart/MPC/`
    pub fn load(filename: &str) -> Result<Self, CircuitLoadError> {
        let f = File::open(filename)
            .with_context(|| format!("Failed to read circuit from {}", filename))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a Bristol Fashion circuit held in memory.
    pub fn parse(text: &str) -> Result<Self, CircuitLoadError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, CircuitLoadError> {
        // Parse first line: ngates nwires\n
        let line = read_header_line(&mut reader)?;
        let re = Regex::new(r"(\d+)").context("Failed to compile regex")?;
        let line_1 = parse_to_vec(&re, &line);

        // Check first line has 2 values: ngates, nwires
        if line_1.len() != 2 {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting line to be ngates, nwires: {}",
                line
            )));
        }

        let ngates = parse_usize(line_1[0], "ngates")?;
        let nwires = parse_usize(line_1[1], "nwires")?;

        // Parse second line: ninputs input_0_wires input_1_nwires...
        let re = Regex::new(r"(\d+)\s*").context("Failed to compile regex")?;
        let line = read_header_line(&mut reader)?;
        let input_nwires = parse_group_line(&re, &line, "input")?;

        // Parse third line: noutputs output_0_nwires output_1_nwires...
        let line = read_header_line(&mut reader)?;
        let output_nwires = parse_group_line(&re, &line, "output")?;

        let mut circ = Self::new(ngates, nwires, input_nwires, output_nwires);
        if circ.ninput_wires + circ.noutput_wires > nwires {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Circuit declares {} io wires but only {} wires",
                circ.ninput_wires + circ.noutput_wires,
                nwires
            )));
        }

        let re = Regex::new(r"(\d+|\S+)\s*").context("Failed to compile regex")?;
        let wire = |s: &str| -> Result<usize, CircuitLoadError> {
            let id: usize = s.parse().context("Failed to parse gate")?;
            if id >= nwires {
                return Err(CircuitLoadError::ParsingError(anyhow!(
                    "Wire {} out of range, circuit has {} wires",
                    id,
                    nwires
                )));
            }
            Ok(id)
        };

        let mut gate_id = 0;

        // Process gates
        for line in reader.lines() {
            let line = line.context("Failed to read line")?;
            if line.trim().is_empty() {
                continue;
            }
            let gate_info = parse_to_vec(&re, &line);
            let gate_type = gate_info.last().copied().unwrap_or_default();
            let arity = match gate_type {
                "INV" => 4,
                "AND" | "XOR" => 6,
                _ => {
                    return Err(CircuitLoadError::ParsingError(anyhow!(
                        "Encountered unsupported gate type: {}",
                        gate_type
                    )));
                }
            };
            if gate_info.len() != arity {
                return Err(CircuitLoadError::ParsingError(anyhow!(
                    "Malformed gate line: {}",
                    line
                )));
            }
            let gate = match gate_type {
                "INV" => Gate::Inv {
                    gate_id,
                    lin_id: wire(gate_info[2])?,
                    out_id: wire(gate_info[3])?,
                },
                "AND" => Gate::And {
                    gate_id,
                    lin_id: wire(gate_info[2])?,
                    rin_id: wire(gate_info[3])?,
                    out_id: wire(gate_info[4])?,
                },
                _ => Gate::Xor {
                    gate_id,
                    lin_id: wire(gate_info[2])?,
                    rin_id: wire(gate_info[3])?,
                    out_id: wire(gate_info[4])?,
                },
            };
            circ.push_gate(gate);
            gate_id += 1;
        }
        if gate_id != ngates {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting {ngates} gates, parsed {gate_id}"
            )));
        }
        tracing::debug!(
            ngates,
            nwires,
            nand = circ.nand,
            nxor = circ.nxor,
            ninv = circ.ninv,
            "loaded bristol circuit"
        );
        Ok(circ)
    }

    /// Serialize the circuit back into Bristol Fashion text.
    pub fn to_bristol(&self) -> String {
        let groups = |widths: &[usize]| {
            std::iter::once(widths.len())
                .chain(widths.iter().copied())
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mut lines = vec![
            format!("{} {}", self.ngates, self.nwires),
            groups(&self.input_nwires),
            groups(&self.output_nwires),
            String::new(),
        ];
        for gate in self.gates.iter() {
            lines.push(match *gate {
                Gate::Xor {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => format!("2 1 {lin_id} {rin_id} {out_id} XOR"),
                Gate::And {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => format!("2 1 {lin_id} {rin_id} {out_id} AND"),
                Gate::Inv { lin_id, out_id, .. } => format!("1 1 {lin_id} {out_id} INV"),
            });
        }
        lines.join("\n")
    }
}
