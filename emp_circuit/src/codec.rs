//! Convert named values to party bit vectors and output bits back to values.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::EmpError;
use crate::io::{IoType, IoValue, Values};
use crate::remap::Remapping;
use crate::resolver::Resolution;

/// Encode the inputs of `party` in its resolved input order. Numbers are
/// expanded least significant bit first over the descriptor width.
pub fn encode_input(
    resolution: &Resolution,
    party: &str,
    values: &Values,
) -> Result<Vec<bool>, EmpError> {
    let input_names = resolution.party_inputs(party)?;

    if let Some(name) = values.keys().find(|name| !input_names.contains(name)) {
        return Err(EmpError::UnexpectedInput {
            party: party.to_string(),
            input: name.clone(),
        });
    }

    let mut bits = Vec::new();
    for name in input_names {
        let d = resolution.input_info(name)?;
        let value = values
            .get(name)
            .ok_or_else(|| EmpError::MissingValue {
                input: name.clone(),
            })?;
        match (d.ty, value) {
            (IoType::Number, IoValue::Number(n)) => {
                if n.bits() > d.width as u64 {
                    return Err(EmpError::ValueOutOfRange {
                        input: name.clone(),
                        width: d.width,
                    });
                }
                bits.extend((0..d.width as u64).map(|i| n.bit(i)));
            }
            (IoType::Bool, IoValue::Bool(b)) => bits.push(*b),
            (expected, _) => {
                return Err(EmpError::TypeMismatch {
                    input: name.clone(),
                    expected,
                });
            }
        }
    }
    Ok(bits)
}

/// Decode an output-only bit buffer, i.e. the wires from the first output
/// address to the end of the circuit.
pub fn decode_output(
    resolution: &Resolution,
    remapping: &Remapping,
    output_bits: &[bool],
) -> Result<Values, EmpError> {
    if output_bits.len() < remapping.output_bits() {
        return Err(EmpError::OutputBufferTooShort {
            expected: remapping.output_bits(),
            actual: output_bits.len(),
        });
    }
    let first_output_address = remapping.first_output_address();

    let mut outputs = Values::new();
    for d in resolution.outputs() {
        let mut value = BigUint::zero();
        for i in 0..d.width {
            let old = d.address + i;
            let offset = remapping
                .address(old)?
                .checked_sub(first_output_address)
                .ok_or(EmpError::OutputNotInTail(old))?;
            if output_bits[offset] {
                value.set_bit(i as u64, true);
            }
        }
        let value = match d.ty {
            IoType::Number => IoValue::Number(value),
            IoType::Bool => IoValue::Bool(!value.is_zero()),
        };
        outputs.insert(d.name.clone(), value);
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{CircuitInfo, CircuitSource, IoDescriptor, MpcSetting};
    use circuit::CircuitBuilder;

    // alice owns a 5-bit `n` and a flag, bob owns nothing; outputs echo both.
    fn setup() -> (Resolution, Remapping) {
        let mut b = CircuitBuilder::new();
        let n = b.add_input(5);
        let flag = b.add_input(1);
        let circ = b.build(&[n, flag]).unwrap();
        let info = CircuitInfo {
            inputs: vec![IoDescriptor::number("n", 0, 5), IoDescriptor::boolean("flag", 5)],
            outputs: vec![
                IoDescriptor::number("n_out", circ.output_address(0).unwrap(), 5),
                IoDescriptor::boolean("flag_out", circ.output_address(1).unwrap()),
            ],
        };
        let settings = vec![
            MpcSetting::new(Some("alice"), &["flag", "n"], &["n_out", "flag_out"]),
            MpcSetting::new(Some("bob"), &[], &["n_out", "flag_out"]),
        ];
        let source = CircuitSource::new(circ, info, settings);
        let resolution = Resolution::new(&source).unwrap();
        let remapping = Remapping::new(&source.bristol.gates, &resolution).unwrap();
        (resolution, remapping)
    }

    fn values(entries: &[(&str, IoValue)]) -> Values {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_encode_lsb_first() {
        let (res, _) = setup();
        let bits = encode_input(
            &res,
            "alice",
            &values(&[("n", 6u64.into()), ("flag", true.into())]),
        )
        .unwrap();
        assert_eq!(bits, vec![false, true, true, false, false, true]);

        let bits = encode_input(&res, "bob", &Values::new()).unwrap();
        assert!(bits.is_empty());
    }

    #[test]
    fn test_encode_errors() {
        let (res, _) = setup();
        let err = encode_input(&res, "carol", &Values::new()).unwrap_err();
        assert!(matches!(err, EmpError::UnknownParty(_)));

        let err = encode_input(&res, "alice", &values(&[("n", 1u64.into())])).unwrap_err();
        assert!(matches!(err, EmpError::MissingValue { input } if input == "flag"));

        let err = encode_input(
            &res,
            "alice",
            &values(&[("n", true.into()), ("flag", true.into())]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EmpError::TypeMismatch { input, expected: IoType::Number } if input == "n"
        ));
        assert_eq!(
            EmpError::TypeMismatch {
                input: "n".to_string(),
                expected: IoType::Number
            }
            .to_string(),
            "expected input n to be a number"
        );

        let err = encode_input(
            &res,
            "alice",
            &values(&[("n", 32u64.into()), ("flag", false.into())]),
        )
        .unwrap_err();
        assert!(matches!(err, EmpError::ValueOutOfRange { width: 5, .. }));

        let err = encode_input(&res, "bob", &values(&[("n", 1u64.into())])).unwrap_err();
        assert!(matches!(err, EmpError::UnexpectedInput { party, .. } if party == "bob"));
    }

    #[test]
    fn test_decode_reads_through_map() {
        let (res, remap) = setup();
        let n: u64 = 0b10110;
        let mut out = vec![false; remap.output_bits()];
        for i in 0..5 {
            let offset = remap.address(res.output_info("n_out").unwrap().address + i).unwrap()
                - remap.first_output_address();
            out[offset] = (n >> i) & 1 == 1;
        }
        let flag_offset = remap.address(res.output_info("flag_out").unwrap().address).unwrap()
            - remap.first_output_address();
        out[flag_offset] = true;

        let decoded = decode_output(&res, &remap, &out).unwrap();
        assert_eq!(decoded["n_out"], IoValue::from(n));
        assert_eq!(decoded["flag_out"], IoValue::Bool(true));
    }

    #[test]
    fn test_decode_short_buffer() {
        let (res, remap) = setup();
        let err = decode_output(&res, &remap, &[true]).unwrap_err();
        assert!(matches!(
            err,
            EmpError::OutputBufferTooShort {
                expected: 6,
                actual: 1
            }
        ));
    }
}
