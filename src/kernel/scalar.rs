//! Scalar reference kernels.

use crate::image::{ImageView, Sample};
use crate::kernel::Kernel;

/// Scalar kernel; the reference implementation for every metric.
pub struct ScalarKernel;

impl Kernel for ScalarKernel {
    fn dot_at<T: Sample>(
        image: ImageView<'_, T>,
        weights: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let offset = x * image.channels();
        let mut dot = 0.0f64;
        for (ty, w_row) in weights.chunks_exact(row_len).enumerate() {
            let Some(window) = image
                .row(y + ty)
                .and_then(|row| row.get(offset..offset + row_len))
            else {
                return f64::NAN;
            };
            for (&w, &value) in w_row.iter().zip(window) {
                dot += f64::from(w) * f64::from(value.to_f32());
            }
        }
        dot
    }

    fn sse_at<T: Sample>(
        image: ImageView<'_, T>,
        tpl: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let offset = x * image.channels();
        let mut sse = 0.0f64;
        for (ty, t_row) in tpl.chunks_exact(row_len).enumerate() {
            let Some(window) = image
                .row(y + ty)
                .and_then(|row| row.get(offset..offset + row_len))
            else {
                return f64::NAN;
            };
            for (&t, &value) in t_row.iter().zip(window) {
                let diff = f64::from(value.to_f32()) - f64::from(t);
                sse += diff * diff;
            }
        }
        sse
    }
}

#[cfg(test)]
mod tests {
    use super::{Kernel, ScalarKernel};
    use crate::ImageView;

    fn pattern(width: usize, height: usize, channels: usize, seed: usize) -> Vec<u8> {
        (0..width * height * channels)
            .map(|i| ((i * 17 + seed * 29 + (i / 3) * 5) & 0xFF) as u8)
            .collect()
    }

    #[test]
    fn scalar_accumulators_match_bruteforce() {
        let (img_width, img_height, channels) = (9, 6, 3);
        let image = pattern(img_width, img_height, channels, 1);
        let view = ImageView::with_channels(&image, img_width, img_height, channels).unwrap();

        let (tpl_width, tpl_height) = (4, 3);
        let tpl: Vec<f32> = pattern(tpl_width, tpl_height, channels, 7)
            .into_iter()
            .map(f32::from)
            .collect();
        let row_len = tpl_width * channels;

        for y in 0..=(img_height - tpl_height) {
            for x in 0..=(img_width - tpl_width) {
                let mut dot = 0.0f64;
                let mut sse = 0.0f64;
                for ty in 0..tpl_height {
                    for tx in 0..tpl_width {
                        let px = view.pixel(x + tx, y + ty).unwrap();
                        for c in 0..channels {
                            let t = f64::from(tpl[ty * row_len + tx * channels + c]);
                            let i = f64::from(px[c]);
                            dot += t * i;
                            sse += (i - t) * (i - t);
                        }
                    }
                }
                let got_dot = <ScalarKernel as Kernel>::dot_at(view, &tpl, row_len, x, y);
                let got_sse = <ScalarKernel as Kernel>::sse_at(view, &tpl, row_len, x, y);
                assert_eq!(got_dot, dot);
                assert_eq!(got_sse, sse);
            }
        }
    }

    #[test]
    fn large_window_sums_stay_exact() {
        // Σ t·I for a 64x48 window is far above 2^24.
        let (width, height) = (80, 60);
        let image = pattern(width, height, 1, 3);
        let view = ImageView::from_slice(&image, width, height).unwrap();
        let tpl_view = view.roi(9, 5, 64, 48).unwrap();
        let tpl: Vec<f32> = (0..48)
            .flat_map(|y| tpl_view.row(y).unwrap().iter().map(|&v| f32::from(v)))
            .collect();

        let expected: u64 = tpl.iter().map(|&v| (v as u64) * (v as u64)).sum();
        assert!(expected > 1 << 24);
        let dot = <ScalarKernel as Kernel>::dot_at(view, &tpl, 64, 9, 5);
        assert_eq!(dot, expected as f64);
        assert_eq!(<ScalarKernel as Kernel>::sse_at(view, &tpl, 64, 9, 5), 0.0);
    }

    #[test]
    fn window_outside_image_is_nan() {
        let image = vec![1u8; 4 * 4];
        let view = ImageView::from_slice(&image, 4, 4).unwrap();
        let tpl = vec![1.0f32; 2 * 2];
        assert!(<ScalarKernel as Kernel>::dot_at(view, &tpl, 2, 3, 0).is_nan());
        assert!(<ScalarKernel as Kernel>::sse_at(view, &tpl, 2, 0, 3).is_nan());
    }
}
