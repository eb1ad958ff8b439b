//! Template plan precomputation shared by all metrics.

use crate::image::{ImageView, Sample};
use crate::util::math::centered_sum_sq;
use crate::util::{ImgSearchError, ImgSearchResult};

/// Precomputed samples and statistics for a template.
///
/// Samples are stored row-major with interleaved channels, so row `ty` spans
/// `samples[ty * row_len()..(ty + 1) * row_len()]`. Statistics are kept in
/// `f64`.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<f32>,
    sum: f64,
    sum_sq: f64,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view<T: Sample>(tpl: ImageView<'_, T>) -> ImgSearchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let channels = tpl.channels();

        let mut samples = Vec::with_capacity(tpl.row_len() * height);
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).ok_or(ImgSearchError::BufferTooSmall {
                needed: (y + 1) * tpl.stride(),
                got: tpl.as_slice().len(),
            })?;
            for &value in row {
                let v = value.to_f32();
                sum += f64::from(v);
                sum_sq += f64::from(v) * f64::from(v);
                samples.push(v);
            }
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
            sum,
            sum_sq,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the number of samples in one template row.
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Returns the total number of samples.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Returns the raw template samples in row-major order.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Returns the sum of all samples.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the mean over all samples.
    pub fn mean(&self) -> f64 {
        self.sum / self.count() as f64
    }

    /// Returns the sum of squared samples.
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_sum(&self) -> f64 {
        centered_sum_sq(self.sum, self.sum_sq, self.count() as f64)
    }
}
