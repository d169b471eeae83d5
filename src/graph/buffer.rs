//! Image buffer carried by pins.
//!
//! `ImageBuffer` is a plain interleaved `f32` buffer. It is a value type:
//! `Clone` is a deep copy, and that is the only way data crosses from one
//! node to another. Values are not clamped; nodes decide their own range.

use crate::graph::error::{NodeError, NodeResult};

/// Interleaved, row-major image with `channels` floats per pixel.
#[derive(Clone, PartialEq, Default)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl ImageBuffer {
    /// Create a zero-filled image.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self::filled(width, height, channels, 0.0)
    }

    /// Create an image with every sample set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the sample count overflows `usize`. Sizes from user input go
    /// through [`ImageBuffer::try_filled`].
    pub fn filled(width: usize, height: usize, channels: usize, value: f32) -> Self {
        let len = sample_count(width, height, channels)
            .unwrap_or_else(|e| panic!("ImageBuffer::filled: {}", e));
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }

    /// Like `filled`, but fails instead of overflowing when the sample count
    /// does not fit in `usize`.
    pub fn try_filled(width: usize, height: usize, channels: usize, value: f32) -> NodeResult<Self> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Wrap existing samples. Fails if `data` does not match the dimensions.
    pub fn from_data(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> NodeResult<Self> {
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(NodeError::InvalidParam {
                key: "data".to_string(),
                reason: format!("expected {} samples, got {}", expected, data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// An image with no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, c: usize) -> usize {
        (y * self.width + x) * self.channels + c
    }

    /// Sample at `(x, y, c)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<f32> {
        if x < self.width && y < self.height && c < self.channels {
            Some(self.data[self.offset(x, y, c)])
        } else {
            None
        }
    }

    /// Sample with coordinates clamped to the image border.
    pub fn get_clamped(&self, x: isize, y: isize, c: usize) -> f32 {
        if self.width == 0 || self.height == 0 || c >= self.channels {
            return 0.0;
        }
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[self.offset(cx, cy, c)]
    }

    /// Set the sample at `(x, y, c)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: f32) {
        if x < self.width && y < self.height && c < self.channels {
            let i = self.offset(x, y, c);
            self.data[i] = value;
        }
    }

    /// New image of the same shape with `f` applied to every sample.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Extract one channel as a single-channel image.
    pub fn channel(&self, c: usize) -> Option<Self> {
        if c >= self.channels {
            return None;
        }
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| px[c])
            .collect();
        Some(Self {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        })
    }

    /// Rec. 601 luminance as a single-channel image. Images with fewer than
    /// three channels use channel 0.
    pub fn luminance(&self) -> Self {
        let data = if self.channels >= 3 {
            self.data
                .chunks_exact(self.channels)
                .map(|px| 0.299 * px[0] + 0.587 * px[1] + 0.114 * px[2])
                .collect()
        } else {
            self.data.chunks_exact(self.channels.max(1)).map(|px| px[0]).collect()
        };
        Self {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        }
    }

    /// Whether both images have the same width, height and channel count.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }
}

/// `width * height * channels`, or `InvalidParam` on overflow.
fn sample_count(width: usize, height: usize, channels: usize) -> NodeResult<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| NodeError::InvalidParam {
            key: "size".to_string(),
            reason: format!("{}x{}x{} samples overflow", width, height, channels),
        })
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
