//! Inner accumulation kernels for score evaluation.
//!
//! Kernels compute the raw per-placement terms (`Σ w·I` and `Σ (I - t)²`);
//! metric normalization happens in the surface computer on top of them.
//! Sums are returned in `f64` so an exact copy normalizes to exactly one.

use crate::image::{ImageView, Sample};

/// Kernel trait for the per-placement accumulation loops.
///
/// `weights` / `tpl` hold template samples row-major with `row_len` samples
/// per row; the window starts at pixel `(x, y)` of `image`. A window that
/// does not fit the image yields `NaN`.
pub trait Kernel {
    /// Accumulates `Σ weights · I` over the window.
    fn dot_at<T: Sample>(
        image: ImageView<'_, T>,
        weights: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64;

    /// Accumulates `Σ (I - tpl)²` over the window.
    fn sse_at<T: Sample>(
        image: ImageView<'_, T>,
        tpl: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64;
}

/// Fills `data` row by row, calling `fill(y, row)` for each row of `width` cells.
pub(crate) fn fill_rows<F>(data: &mut [f32], width: usize, fill: F)
where
    F: Fn(usize, &mut [f32]),
{
    for (y, row) in data.chunks_mut(width).enumerate() {
        fill(y, row);
    }
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
