//! Validated compression quality.
//!
//! Quality drives two separate degradations: the quantization table used on
//! the pixel grid, and the hint handed to the output encoder. Both come from
//! the same [`Quality`] value so they always agree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// Lowest accepted quality.
pub const MIN_QUALITY: f64 = 1.0;
/// Highest accepted quality.
pub const MAX_QUALITY: f64 = 100.0;

/// A quality level in `[1, 100]`; fractional values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quality(f64);

impl Quality {
    /// Validate a raw quality value.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidQuality` for NaN, infinities and any
    /// value outside `[1, 100]`.
    pub fn new(value: f64) -> Result<Self, CompressError> {
        if !value.is_finite() || !(MIN_QUALITY..=MAX_QUALITY).contains(&value) {
            return Err(CompressError::InvalidQuality { value });
        }
        Ok(Self(value))
    }

    /// The raw quality value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Quantization scale factor in percent.
    ///
    /// `100 - q` for `q >= 50`, otherwise `5000 / q`.
    pub fn scale(self) -> f64 {
        if self.0 < 50.0 {
            5000.0 / self.0
        } else {
            100.0 - self.0
        }
    }

    /// Quality passed to the output encoder, rounded to the nearest integer.
    pub fn encoder_hint(self) -> u8 {
        self.0.round().clamp(MIN_QUALITY, MAX_QUALITY) as u8
    }
}

impl TryFrom<f64> for Quality {
    type Error = CompressError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for f64 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    /// Integral qualities print without a fractional part (`25`, not `25.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
