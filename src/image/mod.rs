//! Pixel buffer views and owned images.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer of interleaved samples
//! with an explicit stride. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than `width * channels` represents
//! padded rows. ROI slices are zero-copy views into the same backing slice and
//! retain the original stride.

use crate::util::{ImgSearchError, ImgSearchResult};

pub mod integral;
#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Pixel sample types accepted by the matcher.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Converts the sample to `f32` without rescaling.
    fn to_f32(self) -> f32;
}

impl Sample for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl Sample for u16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl Sample for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

/// Borrowed 2D image view with interleaved channels and an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous single-channel view.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ImgSearchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a single-channel view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> ImgSearchResult<Self> {
        Self::new_interleaved(data, width, height, 1, stride)
    }

    /// Creates a contiguous view with `channels` interleaved samples per pixel.
    pub fn with_channels(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> ImgSearchResult<Self> {
        let stride = width
            .checked_mul(channels)
            .ok_or(ImgSearchError::EmptyBuffer { width, height })?;
        Self::new_interleaved(data, width, height, channels, stride)
    }

    /// Creates an interleaved view with an explicit stride in samples.
    pub fn new_interleaved(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> ImgSearchResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(ImgSearchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in samples between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of samples in one row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the samples of the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?;
        self.data.get(start..start + self.channels)
    }

    /// Returns the samples of row `y` (length `width * channels`).
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.row_len())?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ImgSearchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(ImgSearchError::EmptyBuffer { width, height });
        }

        let out_of_bounds = ImgSearchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x * self.channels;
        let data = self
            .data
            .get(start..)
            .ok_or(ImgSearchError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new_interleaved(data, width, height, self.channels, self.stride)
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> ImgSearchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ImgSearchError::EmptyBuffer { width, height });
    }
    if channels == 0 {
        return Err(ImgSearchError::InvalidChannels { channels });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(ImgSearchError::EmptyBuffer { width, height })?;
    if stride < row_len {
        return Err(ImgSearchError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(ImgSearchError::EmptyBuffer { width, height })
}
