//! Blockjpeg Core - JPEG-style lossy compression simulator
//!
//! This crate approximates the JPEG pixel-domain pipeline: an image is cut
//! into 8x8 blocks, each block is moved into frequency space, high-frequency
//! detail is discarded by a quality-scaled quantization table, and the
//! blocks are transformed back and reassembled into a visibly degraded
//! image. No bitstream is produced; the degraded pixels are handed to a
//! regular image encoder, configured with the same quality.
//!
//! # Module Structure
//!
//! - `quality` / `table` - quality validation and quantization tables
//! - `grid` / `block` - pixel grids, partitioning and reassembly
//! - `dct` / `quantize` - the transform and the lossy quantize stage
//! - `compress` - the in-memory engine
//! - `decode` / `encode` - image file collaborators
//! - `pipeline` - file-level runs, batches and size checks

pub mod block;
pub mod compress;
pub mod config;
pub mod dct;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod quality;
pub mod quantize;
pub mod table;

pub use block::{partition, reassemble, BlockArena, BlockPosition};
pub use compress::{compress, Compressor};
pub use config::CompressionConfig;
pub use dct::{forward_dct, inverse_dct};
pub use error::CompressError;
pub use grid::PixelGrid;
pub use pipeline::{
    compress_batch, compress_bytes, compress_file, inspect_file, BatchReport, FileSizeReport,
    PipelineError, QualityResult,
};
pub use quality::Quality;
pub use table::{build_quantization_table, QuantizationTable, BASE_LUMINANCE_TABLE};
