//! Integral images for constant-time window sums.
//!
//! Each pixel contributes the sum of its channels (and the sum of its squared
//! channels), so a window sum covers every sample the template overlaps.

use crate::image::{ImageView, Sample};

/// Per-placement sums of samples and squared samples over a fixed window.
pub struct WindowStats {
    cols: usize,
    win_width: usize,
    win_height: usize,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl WindowStats {
    /// Builds the integral tables for `image` and a `win_width x win_height` window.
    pub fn new<T: Sample>(image: ImageView<'_, T>, win_width: usize, win_height: usize) -> Self {
        let cols = image.width() + 1;
        let rows = image.height() + 1;
        let channels = image.channels();
        let mut sum = vec![0.0f64; cols * rows];
        let mut sum_sq = vec![0.0f64; cols * rows];

        for y in 0..image.height() {
            let row = image.row(y).unwrap_or(&[]);
            let mut run = 0.0f64;
            let mut run_sq = 0.0f64;
            for (x, px) in row.chunks_exact(channels).enumerate() {
                for &value in px {
                    let v = f64::from(value.to_f32());
                    run += v;
                    run_sq += v * v;
                }
                let above = y * cols + x + 1;
                let idx = (y + 1) * cols + x + 1;
                sum[idx] = sum[above] + run;
                sum_sq[idx] = sum_sq[above] + run_sq;
            }
        }

        Self {
            cols,
            win_width,
            win_height,
            sum,
            sum_sq,
        }
    }

    /// Returns the window size in pixels.
    pub fn window(&self) -> (usize, usize) {
        (self.win_width, self.win_height)
    }

    /// Sum of all samples in the window with top-left corner `(x, y)`.
    #[inline]
    pub fn sum_at(&self, x: usize, y: usize) -> f64 {
        self.rect(&self.sum, x, y)
    }

    /// Sum of all squared samples in the window with top-left corner `(x, y)`.
    #[inline]
    pub fn sum_sq_at(&self, x: usize, y: usize) -> f64 {
        self.rect(&self.sum_sq, x, y)
    }

    #[inline]
    fn rect(&self, table: &[f64], x: usize, y: usize) -> f64 {
        let x1 = x + self.win_width;
        let y1 = y + self.win_height;
        table[y1 * self.cols + x1] - table[y * self.cols + x1] - table[y1 * self.cols + x]
            + table[y * self.cols + x]
    }
}
