use crate::image::{ImageView, Sample};
use crate::util::{ImgSearchError, ImgSearchResult};

/// Owned contiguous image buffer with interleaved channels.
#[derive(Clone, Debug)]
pub struct OwnedImage<T = u8> {
    data: Vec<T>,
    width: usize,
    height: usize,
    channels: usize,
}

impl<T: Sample> OwnedImage<T> {
    /// Wraps a contiguous buffer of exactly `width * height * channels` samples.
    pub fn new(data: Vec<T>, width: usize, height: usize, channels: usize) -> ImgSearchResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImgSearchError::EmptyBuffer { width, height });
        }
        if channels == 0 {
            return Err(ImgSearchError::InvalidChannels { channels });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(ImgSearchError::EmptyBuffer { width, height })?;
        if data.len() < needed {
            return Err(ImgSearchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ImgSearchError::InvalidInput(
                "buffer is longer than width * height * channels",
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Copies a (possibly strided) view into a contiguous owned buffer.
    pub fn from_view(view: ImageView<'_, T>) -> ImgSearchResult<Self> {
        let mut data = Vec::with_capacity(view.row_len() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(ImgSearchError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height(), view.channels())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
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

    /// Returns the contiguous sample buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}
