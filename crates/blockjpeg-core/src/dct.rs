//! Orthonormal 8x8 DCT-II and its inverse.
//!
//! The 2D transform is separable: the 1D transform runs down every column,
//! then along every row of the result. With orthonormal scaling the basis
//! matrix is orthogonal, so the inverse is its transpose and
//! `inverse_dct(forward_dct(b))` reproduces `b` up to floating-point error.
//! Nothing is rounded here.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::table::{BLOCK_AREA, BLOCK_SIZE};

/// `BASIS[k][n] = s(k) * cos((2n + 1) * k * PI / 16)`, with
/// `s(0) = 1/sqrt(8)` and `s(k > 0) = 1/2`.
static BASIS: OnceLock<[[f64; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();

fn basis() -> &'static [[f64; BLOCK_SIZE]; BLOCK_SIZE] {
    BASIS.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
        for (k, row) in table.iter_mut().enumerate() {
            let norm = if k == 0 {
                (1.0 / BLOCK_SIZE as f64).sqrt()
            } else {
                (2.0 / BLOCK_SIZE as f64).sqrt()
            };
            for (n, cell) in row.iter_mut().enumerate() {
                *cell = norm * ((2 * n + 1) as f64 * k as f64 * PI / 16.0).cos();
            }
        }
        table
    })
}

fn forward_1d(input: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
    let b = basis();
    std::array::from_fn(|k| (0..BLOCK_SIZE).map(|n| b[k][n] * input[n]).sum())
}

fn inverse_1d(input: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
    let b = basis();
    std::array::from_fn(|n| (0..BLOCK_SIZE).map(|k| b[k][n] * input[k]).sum())
}

/// Columns first, then rows.
fn separable(
    block: &[f64; BLOCK_AREA],
    pass: fn(&[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE],
) -> [f64; BLOCK_AREA] {
    let mut temp = [0.0f64; BLOCK_AREA];
    for col in 0..BLOCK_SIZE {
        let column: [f64; BLOCK_SIZE] = std::array::from_fn(|row| block[row * BLOCK_SIZE + col]);
        for (row, value) in pass(&column).into_iter().enumerate() {
            temp[row * BLOCK_SIZE + col] = value;
        }
    }

    let mut out = [0.0f64; BLOCK_AREA];
    for row in 0..BLOCK_SIZE {
        let start = row * BLOCK_SIZE;
        let line: [f64; BLOCK_SIZE] = std::array::from_fn(|col| temp[start + col]);
        out[start..start + BLOCK_SIZE].copy_from_slice(&pass(&line));
    }
    out
}

/// Spatial block to frequency coefficients. Index 0 is the DC term.
pub fn forward_dct(block: &[f64; BLOCK_AREA]) -> [f64; BLOCK_AREA] {
    separable(block, forward_1d)
}

/// Frequency coefficients back to a spatial block.
pub fn inverse_dct(coeffs: &[f64; BLOCK_AREA]) -> [f64; BLOCK_AREA] {
    separable(coeffs, inverse_1d)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn block_strategy() -> impl Strategy<Value = [f64; BLOCK_AREA]> {
        prop::collection::vec(-1000.0f64..1000.0, BLOCK_AREA).prop_map(|v| {
            let mut block = [0.0; BLOCK_AREA];
            block.copy_from_slice(&v);
            block
        })
    }

    proptest! {
        /// Property: The inverse transform undoes the forward transform.
        #[test]
        fn prop_roundtrip_within_tolerance(block in block_strategy()) {
            let back = inverse_dct(&forward_dct(&block));
            for (a, b) in block.iter().zip(back.iter()) {
                prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
            }
        }
    }
}
