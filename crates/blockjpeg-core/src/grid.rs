//! Interleaved 8-bit pixel grids.

use crate::error::CompressError;

/// Number of samples in a `height x width x channels` buffer.
///
/// # Errors
///
/// Returns `CompressError::InvalidDimensions` if any dimension is zero or the
/// product does not fit in `usize`.
pub(crate) fn sample_count(
    height: usize,
    width: usize,
    channels: usize,
) -> Result<usize, CompressError> {
    let invalid = CompressError::InvalidDimensions {
        height,
        width,
        channels,
    };
    if height == 0 || width == 0 || channels == 0 {
        return Err(invalid);
    }
    height
        .checked_mul(width)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(invalid)
}

/// A `height x width x channels` grid of 8-bit samples.
///
/// Samples are stored interleaved in row-major order, so the sample for
/// `(row, col, channel)` lives at `(row * width + col) * channels + channel`.
/// Dimensions are fixed for the grid's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an interleaved sample buffer.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidDimensions` if any dimension is zero or
    /// the sample count overflows, and `CompressError::InvalidPixelData` if
    /// `data` has the wrong length.
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, CompressError> {
        let expected = sample_count(height, width, channels)?;
        if data.len() != expected {
            return Err(CompressError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(
        height: usize,
        width: usize,
        channels: usize,
        value: u8,
    ) -> Result<Self, CompressError> {
        let len = sample_count(height, width, channels)?;
        Self::new(height, width, channels, vec![value; len])
    }

    /// Zero-filled grid; dimensions are already validated by the caller.
    pub(crate) fn zeroed(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
            data: vec![0; height * width * channels],
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    /// Sample at `(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[self.offset(row, col, channel)]
    }

    /// Overwrite the sample at `(row, col, channel)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let idx = self.offset(row, col, channel);
        self.data[idx] = value;
    }

    /// Interleaved samples of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[row * stride..(row + 1) * stride]
    }

    /// Mutable interleaved samples of one row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let stride = self.width * self.channels;
        &mut self.data[row * stride..(row + 1) * stride]
    }

    /// Borrow the interleaved sample buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Take the interleaved sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Check whether `other` has the same height, width and channel count.
    pub fn same_shape(&self, other: &PixelGrid) -> bool {
        self.height == other.height && self.width == other.width && self.channels == other.channels
    }

    /// Mean absolute per-sample difference against a grid of the same shape.
    ///
    /// Returns `None` when the shapes differ.
    pub fn mean_absolute_difference(&self, other: &PixelGrid) -> Option<f64> {
        if !self.same_shape(other) {
            return None;
        }
        let total: u64 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a.abs_diff(b) as u64)
            .sum();
        Some(total as f64 / self.data.len() as f64)
    }
}
