//! SIMD-accelerated kernels using the `wide` crate.
//!
//! The inner template row loop is vectorized to process 8 samples at a time
//! using `f32x8`, with a scalar remainder per row. Lane sums are folded into
//! an `f64` total once per template row.

use crate::image::{ImageView, Sample};
use crate::kernel::Kernel;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 samples and convert to f32x8.
#[inline]
fn load_samples<T: Sample>(slice: &[T]) -> f32x8 {
    f32x8::from([
        slice[0].to_f32(),
        slice[1].to_f32(),
        slice[2].to_f32(),
        slice[3].to_f32(),
        slice[4].to_f32(),
        slice[5].to_f32(),
        slice[6].to_f32(),
        slice[7].to_f32(),
    ])
}

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Horizontal sum of f32x8, widened to f64.
#[inline]
fn hsum(v: f32x8) -> f64 {
    v.to_array().iter().map(|&lane| f64::from(lane)).sum()
}

/// SIMD kernel for dot and squared-difference accumulation.
pub struct SimdKernel;

impl Kernel for SimdKernel {
    fn dot_at<T: Sample>(
        image: ImageView<'_, T>,
        weights: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let offset = x * image.channels();
        let simd_end = row_len / LANES * LANES;
        let mut total = 0.0f64;

        for (ty, w_row) in weights.chunks_exact(row_len).enumerate() {
            let Some(window) = image
                .row(y + ty)
                .and_then(|row| row.get(offset..offset + row_len))
            else {
                return f64::NAN;
            };

            let mut acc = f32x8::ZERO;
            let mut i = 0;
            while i < simd_end {
                acc += load_f32x8(&w_row[i..]) * load_samples(&window[i..]);
                i += LANES;
            }
            total += hsum(acc);
            while i < row_len {
                total += f64::from(w_row[i]) * f64::from(window[i].to_f32());
                i += 1;
            }
        }

        total
    }

    fn sse_at<T: Sample>(
        image: ImageView<'_, T>,
        tpl: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let offset = x * image.channels();
        let simd_end = row_len / LANES * LANES;
        let mut total = 0.0f64;

        for (ty, t_row) in tpl.chunks_exact(row_len).enumerate() {
            let Some(window) = image
                .row(y + ty)
                .and_then(|row| row.get(offset..offset + row_len))
            else {
                return f64::NAN;
            };

            let mut acc = f32x8::ZERO;
            let mut i = 0;
            while i < simd_end {
                let diff = load_samples(&window[i..]) - load_f32x8(&t_row[i..]);
                acc += diff * diff;
                i += LANES;
            }
            total += hsum(acc);
            while i < row_len {
                let diff = f64::from(window[i].to_f32()) - f64::from(t_row[i]);
                total += diff * diff;
                i += 1;
            }
        }

        total
    }
}
