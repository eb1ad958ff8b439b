//! Dense score surface storage.

use crate::util::{ImgSearchError, ImgSearchResult};

/// Grid of scores, one per template placement, stored row-major.
///
/// Cell `(x, y)` scores the placement whose top-left corner is `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScoreSurface {
    /// Wraps a row-major buffer of exactly `width * height` scores.
    ///
    /// Zero-area surfaces are allowed here; scanning them fails with
    /// `EmptySurface`.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> ImgSearchResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(ImgSearchError::InvalidInput("surface size overflows"))?;
        if data.len() != needed {
            return Err(ImgSearchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Returns the number of placements along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placements along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the surface has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns all scores in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the scores of row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        self.data.get(y * self.width..(y + 1) * self.width)
    }

    /// Returns the score at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Overwrites the score at `(x, y)`; returns false when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.width + x] = value;
        true
    }
}
