//! Quantization table derivation.
//!
//! The run's table is the standard JPEG luminance table scaled by a
//! quality-dependent percentage:
//!
//! ```text
//! scale = q >= 50 ? 100 - q : 5000 / q
//! entry = floor((base * scale + 50) / 100)
//! ```
//!
//! Entries that round down to zero (every cell at `q = 100`, many at
//! `q = 99`) are raised to 1 so each cell stays a usable divisor.

use tracing::debug;

use crate::error::CompressError;
use crate::quality::Quality;

/// Side length of a block.
pub const BLOCK_SIZE: usize = 8;
/// Number of cells in a block.
pub const BLOCK_AREA: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Standard 8x8 luminance quantization table, row-major.
pub const BASE_LUMINANCE_TABLE: [u16; BLOCK_AREA] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99, //
];

/// An 8x8 grid of positive quantization divisors, row-major.
///
/// Immutable once built; one table is shared by every block and channel of
/// a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    values: [u16; BLOCK_AREA],
}

impl QuantizationTable {
    /// Derive the table for a validated quality.
    pub fn from_quality(quality: Quality) -> Self {
        let scale = quality.scale();
        let mut values = [0u16; BLOCK_AREA];
        let mut clamped = 0usize;

        for (dst, &base) in values.iter_mut().zip(BASE_LUMINANCE_TABLE.iter()) {
            let scaled = ((base as f64 * scale + 50.0) / 100.0).floor();
            if scaled < 1.0 {
                clamped += 1;
            }
            *dst = scaled.max(1.0) as u16;
        }

        debug!(
            quality = quality.value(),
            scale,
            dc_step = values[0],
            clamped,
            "built quantization table"
        );

        Self { values }
    }

    /// A table with the same divisor in every cell.
    ///
    /// A step of 1 keeps every coefficient to within rounding of its
    /// original value.
    pub fn uniform(step: u16) -> Self {
        Self {
            values: [step.max(1); BLOCK_AREA],
        }
    }

    /// Divisor at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.values[row * BLOCK_SIZE + col]
    }

    /// All 64 divisors in row-major order.
    #[inline]
    pub fn values(&self) -> &[u16; BLOCK_AREA] {
        &self.values
    }

    /// Table as eight rows, for display.
    pub fn rows(&self) -> [[u16; BLOCK_SIZE]; BLOCK_SIZE] {
        let mut rows = [[0u16; BLOCK_SIZE]; BLOCK_SIZE];
        for (row, chunk) in rows.iter_mut().zip(self.values.chunks_exact(BLOCK_SIZE)) {
            row.copy_from_slice(chunk);
        }
        rows
    }
}

/// Validate `quality` and build its quantization table.
///
/// # Errors
///
/// Returns `CompressError::InvalidQuality` before any table work if
/// `quality` is outside `[1, 100]` or not finite.
pub fn build_quantization_table(quality: f64) -> Result<QuantizationTable, CompressError> {
    let quality = Quality::new(quality)?;
    Ok(QuantizationTable::from_quality(quality))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_50_halves_base() {
        let table = build_quantization_table(50.0).unwrap();
        // floor((16 * 50 + 50) / 100) = 8
        assert_eq!(table.get(0, 0), 8);
        // floor((11 * 50 + 50) / 100) = 6
        assert_eq!(table.get(0, 1), 6);
        // floor((10 * 50 + 50) / 100) = 5
        assert_eq!(table.get(0, 2), 5);
        // floor((121 * 50 + 50) / 100) = 61
        assert_eq!(table.get(6, 5), 61);
    }

    #[test]
    fn test_quality_25() {
        let table = build_quantization_table(25.0).unwrap();
        // scale = 200: floor(3250 / 100) = 32
        assert_eq!(table.get(0, 0), 32);
        assert_eq!(table.get(0, 1), 22);
        assert_eq!(table.get(7, 7), 198);
    }

    #[test]
    fn test_quality_75() {
        let table = build_quantization_table(75.0).unwrap();
        // scale = 25: floor(450 / 100) = 4
        assert_eq!(table.get(0, 0), 4);
        // floor(325 / 100) = 3
        assert_eq!(table.get(0, 1), 3);
    }

    #[test]
    fn test_quality_1_is_coarsest() {
        let table = build_quantization_table(1.0).unwrap();
        assert_eq!(table.get(0, 0), 800);
        assert_eq!(table.get(6, 5), 6050);
    }

    #[test]
    fn test_quality_100_all_ones() {
        let table = build_quantization_table(100.0).unwrap();
        assert!(table.values().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_quality_99_clamps_zero_cells() {
        let table = build_quantization_table(99.0).unwrap();
        // floor((16 + 50) / 100) = 0, raised to 1
        assert_eq!(table.get(0, 0), 1);
        // floor((121 + 50) / 100) = 1
        assert_eq!(table.get(6, 5), 1);
        assert!(table.values().iter().all(|&v| v >= 1));
    }

    #[test]
    fn test_fractional_quality() {
        let table = build_quantization_table(33.3).unwrap();
        let scale = 5000.0 / 33.3;
        let expected = ((16.0 * scale + 50.0) / 100.0_f64).floor() as u16;
        assert_eq!(table.get(0, 0), expected);
    }

    #[test]
    fn test_invalid_quality_rejected() {
        assert_eq!(
            build_quantization_table(0.0),
            Err(CompressError::InvalidQuality { value: 0.0 })
        );
        assert!(build_quantization_table(100.5).is_err());
        assert!(build_quantization_table(f64::NAN).is_err());
    }

    #[test]
    fn test_rows_layout() {
        let table = build_quantization_table(50.0).unwrap();
        let rows = table.rows();
        assert_eq!(rows[0][0], table.get(0, 0));
        assert_eq!(rows[6][5], table.get(6, 5));
    }

    #[test]
    fn test_uniform() {
        let table = QuantizationTable::uniform(1);
        assert!(table.values().iter().all(|&v| v == 1));
        // zero is not a usable divisor
        assert!(QuantizationTable::uniform(0).values().iter().all(|&v| v == 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
