//! Boolean gadgets over little-endian wire vectors.
//!
//! Multi-bit gadgets expect operands of equal width and truncate their
//! result to that width. `mul` and `gt` also need at least one bit.

use crate::builder::CircuitBuilder;
use crate::errors::CircuitBuildError;

fn same_width(xs: &[usize], ys: &[usize]) -> Result<usize, CircuitBuildError> {
    if xs.len() != ys.len() {
        return Err(CircuitBuildError::WidthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    Ok(xs.len())
}

fn nonempty_width(xs: &[usize], ys: &[usize]) -> Result<usize, CircuitBuildError> {
    match same_width(xs, ys)? {
        0 => Err(CircuitBuildError::EmptyOperand),
        n => Ok(n),
    }
}

pub fn or(b: &mut CircuitBuilder, x: usize, y: usize) -> usize {
    let t = b.xor(x, y);
    let u = b.and(x, y);
    b.xor(t, u)
}

/// `sel ? x : y`
pub fn mux(b: &mut CircuitBuilder, sel: usize, x: usize, y: usize) -> usize {
    let d = b.xor(x, y);
    let t = b.and(sel, d);
    b.xor(y, t)
}

pub fn mux_bits(
    b: &mut CircuitBuilder,
    sel: usize,
    xs: &[usize],
    ys: &[usize],
) -> Result<Vec<usize>, CircuitBuildError> {
    same_width(xs, ys)?;
    Ok(xs
        .iter()
        .zip(ys.iter())
        .map(|(&x, &y)| mux(b, sel, x, y))
        .collect())
}

/// Ripple-carry addition modulo `2^width`.
pub fn add(
    b: &mut CircuitBuilder,
    xs: &[usize],
    ys: &[usize],
) -> Result<Vec<usize>, CircuitBuildError> {
    let n = same_width(xs, ys)?;
    let mut carry: Option<usize> = None;
    let mut sum = Vec::with_capacity(n);
    for i in 0..n {
        let t = b.xor(xs[i], ys[i]);
        let s = match carry {
            Some(c) => b.xor(t, c),
            None => t,
        };
        sum.push(s);
        if i + 1 < n {
            // generate and propagate never both hold, so xor acts as or
            let g = b.and(xs[i], ys[i]);
            carry = Some(match carry {
                Some(c) => {
                    let p = b.and(c, t);
                    b.xor(g, p)
                }
                None => g,
            });
        }
    }
    Ok(sum)
}

/// Shift-and-add multiplication modulo `2^width`.
pub fn mul(
    b: &mut CircuitBuilder,
    xs: &[usize],
    ys: &[usize],
) -> Result<Vec<usize>, CircuitBuildError> {
    let n = nonempty_width(xs, ys)?;
    let mut acc: Vec<usize> = xs.iter().map(|&x| b.and(x, ys[0])).collect();
    for i in 1..n {
        let partial: Vec<usize> = xs[..n - i].iter().map(|&x| b.and(x, ys[i])).collect();
        let hi = add(b, &acc[i..], &partial)?;
        acc.truncate(i);
        acc.extend(hi);
    }
    Ok(acc)
}

/// Unsigned `x > y`.
pub fn gt(b: &mut CircuitBuilder, xs: &[usize], ys: &[usize]) -> Result<usize, CircuitBuildError> {
    nonempty_width(xs, ys)?;
    let mut res: Option<usize> = None;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let ny = b.inv(y);
        let bit_gt = b.and(x, ny);
        res = Some(match res {
            Some(prev) => {
                let d = b.xor(x, y);
                let eq = b.inv(d);
                let keep = b.and(eq, prev);
                b.xor(bit_gt, keep)
            }
            None => bit_gt,
        });
    }
    res.ok_or(CircuitBuildError::EmptyOperand)
}

/// Constant `value` as `width` wires.
pub fn constant(
    b: &mut CircuitBuilder,
    value: u64,
    width: usize,
) -> Result<Vec<usize>, CircuitBuildError> {
    (0..width)
        .map(|i| {
            if i < 64 && (value >> i) & 1 == 1 {
                b.one()
            } else {
                b.zero()
            }
        })
        .collect()
}
