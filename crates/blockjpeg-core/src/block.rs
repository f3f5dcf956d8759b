//! Block partitioning and reassembly.
//!
//! An image is cut into 8x8 tiles in raster order (row-start positions
//! outer, column-start positions inner). Tiles that overhang the right or
//! bottom edge are zero-padded to full size. All tiles of an image live in
//! one contiguous [`BlockArena`]; each tile records its pixel origin so
//! reassembly can verify that it consumes tiles in the order they were cut.
//!
//! Within the arena a block is stored planar: `channels` planes of 64
//! samples each, and sample `(r, c)` of a plane sits at `r * 8 + c`.

use std::fmt;

use tracing::debug;

use crate::error::CompressError;
use crate::grid::{sample_count, PixelGrid};
use crate::table::{BLOCK_AREA, BLOCK_SIZE};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pixel coordinates of a block's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPosition {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of blocks needed to cover `len` pixels.
#[inline]
pub fn blocks_along(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

/// Contiguous storage for every block of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockArena {
    height: usize,
    width: usize,
    channels: usize,
    origins: Vec<BlockPosition>,
    samples: Vec<u8>,
}

impl BlockArena {
    /// Assemble an arena from externally produced blocks.
    ///
    /// Only buffer sizes are checked here. Block order is verified by
    /// [`reassemble`], which is where a misordered arena must be caught.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidDimensions` for a zero or overflowing
    /// dimension and `CompressError::InvalidPixelData` if `samples` does not
    /// hold exactly `origins.len()` blocks.
    pub fn from_parts(
        height: usize,
        width: usize,
        channels: usize,
        origins: Vec<BlockPosition>,
        samples: Vec<u8>,
    ) -> Result<Self, CompressError> {
        sample_count(height, width, channels)?;
        let expected = origins
            .len()
            .checked_mul(BLOCK_AREA)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(CompressError::InvalidDimensions {
                height,
                width,
                channels,
            })?;
        if samples.len() != expected {
            return Err(CompressError::InvalidPixelData {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            height,
            width,
            channels,
            origins,
            samples,
        })
    }

    /// Height of the source image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the source image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Samples per block across all channels.
    #[inline]
    pub fn block_len(&self) -> usize {
        BLOCK_AREA * self.channels
    }

    /// Origin of block `index`.
    pub fn origin(&self, index: usize) -> BlockPosition {
        self.origins[index]
    }

    /// All samples of block `index`, planar by channel.
    pub fn block(&self, index: usize) -> &[u8] {
        let len = self.block_len();
        &self.samples[index * len..(index + 1) * len]
    }

    /// The 64 samples of one channel of block `index`.
    pub fn plane(&self, index: usize, channel: usize) -> &[u8] {
        let start = channel * BLOCK_AREA;
        &self.block(index)[start..start + BLOCK_AREA]
    }

    /// Iterate blocks in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPosition, &[u8])> + '_ {
        self.origins
            .iter()
            .copied()
            .zip(self.samples.chunks_exact(self.block_len()))
    }

    /// Iterate blocks mutably in storage order.
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = (BlockPosition, &mut [u8])> + '_ {
        let len = self.block_len();
        self.origins
            .iter()
            .copied()
            .zip(self.samples.chunks_exact_mut(len))
    }

    /// Parallel mutable iteration; each worker owns a disjoint block.
    #[cfg(feature = "parallel")]
    pub fn par_blocks_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (BlockPosition, &mut [u8])> + '_ {
        let len = self.block_len();
        self.origins
            .par_iter()
            .copied()
            .zip(self.samples.par_chunks_exact_mut(len))
    }

    /// Decompose into `(origins, samples)`.
    pub fn into_parts(self) -> (Vec<BlockPosition>, Vec<u8>) {
        (self.origins, self.samples)
    }
}

/// Cut a grid into zero-padded 8x8 blocks in raster order.
///
/// A grid smaller than 8 in both dimensions yields exactly one block.
pub fn partition(grid: &PixelGrid) -> BlockArena {
    let (height, width, channels) = (grid.height(), grid.width(), grid.channels());
    let blocks_tall = blocks_along(height);
    let blocks_wide = blocks_along(width);
    let block_len = BLOCK_AREA * channels;

    let mut origins = Vec::with_capacity(blocks_tall * blocks_wide);
    let mut samples = vec![0u8; blocks_tall * blocks_wide * block_len];

    for (index, block) in samples.chunks_exact_mut(block_len).enumerate() {
        let origin = BlockPosition {
            row: (index / blocks_wide) * BLOCK_SIZE,
            col: (index % blocks_wide) * BLOCK_SIZE,
        };
        let rows = BLOCK_SIZE.min(height - origin.row);
        let cols = BLOCK_SIZE.min(width - origin.col);

        for r in 0..rows {
            let src = grid.row(origin.row + r);
            for c in 0..cols {
                let px = (origin.col + c) * channels;
                for ch in 0..channels {
                    block[ch * BLOCK_AREA + r * BLOCK_SIZE + c] = src[px + ch];
                }
            }
        }
        origins.push(origin);
    }

    debug!(
        height,
        width,
        channels,
        blocks = origins.len(),
        "partitioned grid"
    );

    BlockArena {
        height,
        width,
        channels,
        origins,
        samples,
    }
}

/// Write blocks back into a grid of the original size, dropping padding.
///
/// # Errors
///
/// Returns `CompressError::BlockGeometryMismatch` if the arena was cut from
/// an image of different size or holds the wrong number of blocks, and
/// `CompressError::BlockOrderMismatch` at the first block whose origin is
/// not the next raster position.
pub fn reassemble(
    arena: &BlockArena,
    height: usize,
    width: usize,
) -> Result<PixelGrid, CompressError> {
    if arena.height != height || arena.width != width {
        return Err(CompressError::BlockGeometryMismatch {
            stage: "reassemble",
            expected: format!("{height}x{width}"),
            found: format!("{}x{}", arena.height, arena.width),
        });
    }

    let blocks_wide = blocks_along(width);
    let expected_blocks = blocks_along(height) * blocks_wide;
    if arena.len() != expected_blocks {
        return Err(CompressError::BlockGeometryMismatch {
            stage: "reassemble",
            expected: format!("{expected_blocks} blocks"),
            found: format!("{} blocks", arena.len()),
        });
    }

    let channels = arena.channels;
    let mut grid = PixelGrid::zeroed(height, width, channels);

    for (index, (origin, block)) in arena.iter().enumerate() {
        let expected = BlockPosition {
            row: (index / blocks_wide) * BLOCK_SIZE,
            col: (index % blocks_wide) * BLOCK_SIZE,
        };
        if origin != expected {
            return Err(CompressError::BlockOrderMismatch {
                index,
                expected,
                found: origin,
            });
        }

        let rows = BLOCK_SIZE.min(height - origin.row);
        let cols = BLOCK_SIZE.min(width - origin.col);
        for r in 0..rows {
            let dst = grid.row_mut(origin.row + r);
            for c in 0..cols {
                let px = (origin.col + c) * channels;
                for ch in 0..channels {
                    dst[px + ch] = block[ch * BLOCK_AREA + r * BLOCK_SIZE + c];
                }
            }
        }
    }

    Ok(grid)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
