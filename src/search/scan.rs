//! Dense scan producing a score surface.
//!
//! Every placement is scored independently: kernels accumulate the raw
//! correlation or squared-difference term, window statistics come from
//! integral images, and the metric decides how the two are combined.

use crate::image::integral::WindowStats;
use crate::image::{ImageView, Sample};
use crate::kernel::{fill_rows, Kernel};
use crate::search::surface::ScoreSurface;
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::math::{centered_sum_sq, normalized_ratio, DEGENERATE_EPS};
use crate::util::{ImgSearchError, ImgSearchResult};

#[cfg(feature = "rayon")]
use crate::kernel::rayon::fill_rows_par;
#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ScalarKernel as ActiveKernel;
#[cfg(feature = "simd")]
use crate::kernel::simd::SimdKernel as ActiveKernel;

/// Checks that `template` fits inside `image` with the same channel layout.
pub(crate) fn validate_pair<T>(
    template: &ImageView<'_, T>,
    image: &ImageView<'_, T>,
) -> ImgSearchResult<()> {
    if template.width() > image.width() || template.height() > image.height() {
        return Err(ImgSearchError::InvalidDimensions {
            tpl_width: template.width(),
            tpl_height: template.height(),
            img_width: image.width(),
            img_height: image.height(),
        });
    }
    if template.channels() != image.channels() {
        return Err(ImgSearchError::ChannelMismatch {
            template: template.channels(),
            image: image.channels(),
        });
    }
    Ok(())
}

/// Computes the score surface of `template` over `image` for `metric`.
///
/// The surface has `(W - w + 1) x (H - h + 1)` cells. Fails with
/// `InvalidDimensions` when the template is larger than the image in either
/// axis and with `ChannelMismatch` when the channel counts differ.
pub fn compute_surface<T: Sample>(
    template: ImageView<'_, T>,
    image: ImageView<'_, T>,
    metric: Metric,
) -> ImgSearchResult<ScoreSurface> {
    compute_surface_with(template, image, metric, false)
}

/// Same as [`compute_surface`], optionally scanning rows in parallel.
///
/// `parallel` is ignored without the `rayon` feature.
pub(crate) fn compute_surface_with<T: Sample>(
    template: ImageView<'_, T>,
    image: ImageView<'_, T>,
    metric: Metric,
    parallel: bool,
) -> ImgSearchResult<ScoreSurface> {
    validate_pair(&template, &image)?;

    let plan = TemplatePlan::from_view(template)?;
    let stats = WindowStats::new(image, plan.width(), plan.height());
    let out_width = image.width() - plan.width() + 1;
    let out_height = image.height() - plan.height() + 1;

    let _span = trace_span!(
        "compute_surface",
        metric = metric.name(),
        width = out_width,
        height = out_height,
        parallel = parallel
    )
    .entered();

    let scorer = Scorer {
        image,
        plan: &plan,
        stats: &stats,
        metric,
    };
    let mut surface = ScoreSurface::zeroed(out_width, out_height);
    let fill = |y: usize, row: &mut [f32]| scorer.score_row::<ActiveKernel>(y, row);

    #[cfg(feature = "rayon")]
    {
        if parallel {
            fill_rows_par(surface.as_mut_slice(), out_width, fill);
        } else {
            fill_rows(surface.as_mut_slice(), out_width, fill);
        }
    }
    #[cfg(not(feature = "rayon"))]
    {
        let _ = parallel;
        fill_rows(surface.as_mut_slice(), out_width, fill);
    }

    trace_event!("surface_ready", cells = out_width * out_height);
    Ok(surface)
}

struct Scorer<'a, T> {
    image: ImageView<'a, T>,
    plan: &'a TemplatePlan,
    stats: &'a WindowStats,
    metric: Metric,
}

impl<T: Sample> Scorer<'_, T> {
    fn score_row<K: Kernel>(&self, y: usize, row: &mut [f32]) {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = self.score_at::<K>(x, y);
        }
    }

    fn score_at<K: Kernel>(&self, x: usize, y: usize) -> f32 {
        let plan = self.plan;
        let row_len = plan.row_len();
        match self.metric {
            Metric::SqDiff => K::sse_at(self.image, plan.samples(), row_len, x, y) as f32,
            Metric::CrossCorrelation => {
                K::dot_at(self.image, plan.samples(), row_len, x, y) as f32
            }
            Metric::Ncc => {
                let dot = K::dot_at(self.image, plan.samples(), row_len, x, y);
                let norm = plan.sum_sq() * self.stats.sum_sq_at(x, y);
                normalized_ratio(dot, norm).map_or(0.0, |r| r.clamp(-1.0, 1.0) as f32)
            }
            Metric::SqDiffNormed => {
                let sse = K::sse_at(self.image, plan.samples(), row_len, x, y);
                let norm = plan.sum_sq() * self.stats.sum_sq_at(x, y);
                match normalized_ratio(sse, norm) {
                    Some(r) => r.clamp(0.0, 1.0) as f32,
                    None if sse <= DEGENERATE_EPS => 0.0,
                    None => 1.0,
                }
            }
            Metric::Zncc => {
                // Covariance from raw sums: Σ t·I - Σt·ΣI / n.
                let dot = K::dot_at(self.image, plan.samples(), row_len, x, y);
                let n = plan.count() as f64;
                let sum_i = self.stats.sum_at(x, y);
                let cov = dot - plan.sum() * sum_i / n;
                let var_i = centered_sum_sq(sum_i, self.stats.sum_sq_at(x, y), n);
                normalized_ratio(cov, plan.var_sum() * var_i)
                    .map_or(0.0, |r| r.clamp(-1.0, 1.0) as f32)
            }
        }
    }
}
