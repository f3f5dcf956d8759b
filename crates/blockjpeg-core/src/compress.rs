//! In-memory compression engine.
//!
//! [`Compressor`] owns a validated quality and the table derived from it.
//! Each call to [`Compressor::compress`] partitions the grid, reconstructs
//! every block through the quantize stage, and reassembles the result at the
//! original size. Runs share nothing mutable, so one compressor can serve
//! many threads.

use tracing::debug;

use crate::block::{partition, reassemble};
use crate::error::CompressError;
use crate::grid::PixelGrid;
use crate::quality::Quality;
use crate::quantize::process_block;
use crate::table::QuantizationTable;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A fixed `(quality, table)` pair.
#[derive(Debug, Clone)]
pub struct Compressor {
    quality: Quality,
    table: QuantizationTable,
    parallel: bool,
}

impl Compressor {
    /// Validate `quality` and build its table.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidQuality` if `quality` is outside
    /// `[1, 100]` or not finite.
    pub fn new(quality: f64) -> Result<Self, CompressError> {
        Ok(Self::from_quality(Quality::new(quality)?))
    }

    pub fn from_quality(quality: Quality) -> Self {
        Self {
            quality,
            table: QuantizationTable::from_quality(quality),
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Enable or disable the rayon worker pool.
    ///
    /// Has no effect without the `parallel` feature. Output is identical
    /// either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel && cfg!(feature = "parallel");
        self
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn table(&self) -> &QuantizationTable {
        &self.table
    }

    /// Degrade a grid through the block transform-quantization pipeline.
    ///
    /// The returned grid has the same height, width and channel count.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::BlockOrderMismatch` or
    /// `CompressError::BlockGeometryMismatch` if reassembly sees blocks that
    /// do not match the partition. Neither occurs in correct operation.
    pub fn compress(&self, grid: PixelGrid) -> Result<PixelGrid, CompressError> {
        let (height, width) = (grid.height(), grid.width());
        let mut arena = partition(&grid);
        drop(grid);

        debug!(
            quality = self.quality.value(),
            blocks = arena.len(),
            parallel = self.parallel,
            "reconstructing blocks"
        );

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                arena
                    .par_blocks_mut()
                    .for_each(|(_, block)| process_block(block, &self.table));
                return reassemble(&arena, height, width);
            }
        }

        for (_, block) in arena.blocks_mut() {
            process_block(block, &self.table);
        }
        reassemble(&arena, height, width)
    }
}

/// Compress a grid at `quality` in one call.
///
/// # Errors
///
/// Returns `CompressError::InvalidQuality` before touching the grid if
/// `quality` is invalid.
pub fn compress(grid: PixelGrid, quality: f64) -> Result<PixelGrid, CompressError> {
    Compressor::new(quality)?.compress(grid)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
        (1usize..=24, 1usize..=24, 1usize..=3).prop_flat_map(|(h, w, ch)| {
            prop::collection::vec(any::<u8>(), h * w * ch)
                .prop_map(move |data| PixelGrid::new(h, w, ch, data).unwrap())
        })
    }

    proptest! {
        /// Property: Compression preserves the grid's shape.
        #[test]
        fn prop_shape_preserved(grid in grid_strategy(), quality in 1.0f64..=100.0) {
            let (h, w, ch) = (grid.height(), grid.width(), grid.channels());
            let out = compress(grid, quality).unwrap();
            prop_assert_eq!((out.height(), out.width(), out.channels()), (h, w, ch));
        }

        /// Property: Compression is deterministic.
        #[test]
        fn prop_deterministic(grid in grid_strategy(), quality in 1.0f64..=100.0) {
            let a = compress(grid.clone(), quality).unwrap();
            let b = compress(grid, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: Invalid quality fails regardless of the grid.
        #[test]
        fn prop_invalid_quality(grid in grid_strategy(), quality in 100.5f64..1000.0) {
            let is_invalid = matches!(
                compress(grid, quality),
                Err(CompressError::InvalidQuality { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
