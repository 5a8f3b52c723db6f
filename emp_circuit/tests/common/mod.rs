#![allow(dead_code)]

use std::collections::BTreeMap;

use circuit::{gadgets, Circuit, CircuitBuilder, CircuitInput};
use emp_circuit::{
    CircuitInfo, CircuitSource, IoDescriptor, IoType, IoValue, MpcSetting, Values,
};
use num_bigint::BigUint;

/// Name the input and output groups of `circ` in declaration order. Party
/// `k` owns input group `k`, and every party observes every output.
pub fn describe(
    circ: Circuit,
    parties: &[(&str, &str, IoType)],
    outputs: &[(&str, IoType)],
) -> CircuitSource {
    let inputs = parties
        .iter()
        .enumerate()
        .map(|(k, (_, input, ty))| IoDescriptor {
            name: input.to_string(),
            address: circ.input_address(k).unwrap(),
            width: circ.input_nwires[k],
            ty: *ty,
        })
        .collect();
    let output_descriptors = outputs
        .iter()
        .enumerate()
        .map(|(k, (name, ty))| IoDescriptor {
            name: name.to_string(),
            address: circ.output_address(k).unwrap(),
            width: circ.output_nwires[k],
            ty: *ty,
        })
        .collect();
    let output_names: Vec<&str> = outputs.iter().map(|(name, _)| *name).collect();
    let settings = parties
        .iter()
        .map(|(party, input, _)| MpcSetting::new(Some(*party), &[*input], &output_names))
        .collect();
    CircuitSource::new(
        circ,
        CircuitInfo {
            inputs,
            outputs: output_descriptors,
        },
        settings,
    )
}

/// One named value per party, in party order.
pub fn party_inputs(source: &CircuitSource, values: &[IoValue]) -> BTreeMap<String, Values> {
    source
        .mpc_settings
        .iter()
        .zip(values)
        .map(|(setting, value)| {
            let name = setting.name.clone().unwrap();
            let values = Values::from([(setting.inputs[0].clone(), value.clone())]);
            (name, values)
        })
        .collect()
}

/// Evaluate the circuit at its original addresses, without renumbering.
pub fn eval_original(source: &CircuitSource, inputs: &BTreeMap<String, Values>) -> Values {
    let mut wires = Vec::new();
    for values in inputs.values() {
        for (name, value) in values {
            let d = source.info.inputs.iter().find(|d| &d.name == name).unwrap();
            for i in 0..d.width {
                let bit = match value {
                    IoValue::Number(n) => n.bit(i as u64),
                    IoValue::Bool(b) => *b,
                };
                wires.push(CircuitInput {
                    id: d.address + i,
                    value: bit,
                });
            }
        }
    }
    let state = source.bristol.eval_wires(&wires).unwrap();

    let mut outputs = Values::new();
    for d in source.info.outputs.iter() {
        let mut n = BigUint::default();
        for i in 0..d.width {
            if state[d.address + i].unwrap() {
                n.set_bit(i as u64, true);
            }
        }
        let value = match d.ty {
            IoType::Number => IoValue::Number(n),
            IoType::Bool => IoValue::Bool(n.bit(0)),
        };
        outputs.insert(d.name.clone(), value);
    }
    outputs
}

/// `main = a * b` over 4 bits.
pub fn mul_source() -> CircuitSource {
    let mut b = CircuitBuilder::new();
    let x = b.add_input(4);
    let y = b.add_input(4);
    let out = gadgets::mul(&mut b, &x, &y).unwrap();
    let circ = b.build(&[out]).unwrap();
    describe(
        circ,
        &[("alice", "a", IoType::Number), ("bob", "b", IoType::Number)],
        &[("main", IoType::Number)],
    )
}

/// `res = a && b`.
pub fn and_source() -> CircuitSource {
    let mut b = CircuitBuilder::new();
    let x = b.add_input(1);
    let y = b.add_input(1);
    let z = b.and(x[0], y[0]);
    let circ = b.build(&[vec![z]]).unwrap();
    describe(
        circ,
        &[("alice", "a", IoType::Bool), ("bob", "b", IoType::Bool)],
        &[("res", IoType::Bool)],
    )
}

/// Highest and second highest of the bids, and the index of the highest.
/// Ties keep the earlier bidder.
fn auction(b: &mut CircuitBuilder, bids: &[Vec<usize>]) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
    let width = bids[0].len();
    let mut highest = bids[0].clone();
    let mut second = gadgets::constant(b, 0, width).unwrap();
    let mut winner = gadgets::constant(b, 0, 8).unwrap();
    for (i, bid) in bids.iter().enumerate().skip(1) {
        let beats_highest = gadgets::gt(b, bid, &highest).unwrap();
        let beats_second = gadgets::gt(b, bid, &second).unwrap();
        let runner_up = gadgets::mux_bits(b, beats_second, bid, &second).unwrap();
        second = gadgets::mux_bits(b, beats_highest, &highest, &runner_up).unwrap();
        highest = gadgets::mux_bits(b, beats_highest, bid, &highest).unwrap();
        let index = gadgets::constant(b, i as u64, 8).unwrap();
        winner = gadgets::mux_bits(b, beats_highest, &index, &winner).unwrap();
    }
    (highest, second, winner)
}

const BIDDERS: [(&str, &str, IoType); 3] = [
    ("alice", "a", IoType::Number),
    ("bob", "b", IoType::Number),
    ("charlie", "c", IoType::Number),
];

/// `main` is the second highest of three 8-bit numbers.
pub fn middle_source() -> CircuitSource {
    let mut b = CircuitBuilder::new();
    let bids: Vec<Vec<usize>> = (0..3).map(|_| b.add_input(8)).collect();
    let (_, second, _) = auction(&mut b, &bids);
    let circ = b.build(&[second]).unwrap();
    describe(circ, &BIDDERS, &[("main", IoType::Number)])
}

/// Second price auction over three 8-bit bids.
pub fn vickrey_source() -> CircuitSource {
    let mut b = CircuitBuilder::new();
    let bids: Vec<Vec<usize>> = (0..3).map(|_| b.add_input(8)).collect();
    let (_, price, winner) = auction(&mut b, &bids);
    let circ = b.build(&[winner, price]).unwrap();
    describe(
        circ,
        &BIDDERS,
        &[("winner", IoType::Number), ("price", IoType::Number)],
    )
}
