//! Quantize/reconstruct stage.
//!
//! Each channel plane of a block is handled on its own:
//!
//! 1. forward DCT
//! 2. divide by the table entry, round half away from zero
//! 3. multiply back by the table entry
//! 4. inverse DCT
//! 5. clip to `[0, 255]` and truncate toward zero
//!
//! Steps 2 and 3 discard everything below the quantization step, so the
//! stage is lossy by construction.

use crate::dct::{forward_dct, inverse_dct};
use crate::table::{QuantizationTable, BLOCK_AREA};

/// Divide coefficients by the table and round half away from zero.
pub fn quantize(coeffs: &[f64; BLOCK_AREA], table: &QuantizationTable) -> [i32; BLOCK_AREA] {
    let steps = table.values();
    std::array::from_fn(|i| (coeffs[i] / steps[i] as f64).round() as i32)
}

/// Multiply quantized levels back by the table.
pub fn dequantize(levels: &[i32; BLOCK_AREA], table: &QuantizationTable) -> [f64; BLOCK_AREA] {
    let steps = table.values();
    std::array::from_fn(|i| levels[i] as f64 * steps[i] as f64)
}

/// Convert a reconstructed value to a display sample.
///
/// Clips first, then drops the fractional part, so `127.9` becomes 127.
#[inline]
fn to_sample(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Run one 64-sample channel plane through the full lossy round trip.
pub fn reconstruct_plane(
    plane: &[u8; BLOCK_AREA],
    table: &QuantizationTable,
) -> [u8; BLOCK_AREA] {
    let spatial: [f64; BLOCK_AREA] = std::array::from_fn(|i| plane[i] as f64);
    let levels = quantize(&forward_dct(&spatial), table);
    let restored = inverse_dct(&dequantize(&levels, table));
    restored.map(to_sample)
}

/// Reconstruct every channel plane of a planar block in place.
///
/// Channels share the table but never influence each other.
pub fn process_block(block: &mut [u8], table: &QuantizationTable) {
    let planes = block
        .chunks_exact_mut(BLOCK_AREA)
        .filter_map(|plane| <&mut [u8; BLOCK_AREA]>::try_from(plane).ok());
    for plane in planes {
        *plane = reconstruct_plane(plane, table);
    }
}
