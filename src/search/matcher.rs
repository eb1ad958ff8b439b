use crate::candidate::extremes::locate_best;
use crate::candidate::suppress::suppress_region;
use crate::image::{ImageView, Sample};
use crate::search::scan::compute_surface_with;
use crate::search::surface::ScoreSurface;
use crate::search::{MatchConfig, MatchPoint, Metric};
use crate::trace::{trace_event, trace_span};
use crate::util::ImgSearchResult;

/// Template matcher bound to a fixed configuration.
///
/// A matcher holds no per-call state: every search builds and owns its own
/// score surface, so one matcher can serve concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher using `metric` and default settings otherwise.
    pub fn new(metric: Metric) -> Self {
        Self {
            cfg: MatchConfig {
                metric,
                ..MatchConfig::default()
            },
        }
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the configured metric.
    pub fn metric(&self) -> Metric {
        self.cfg.metric
    }

    /// Computes the full score surface of `template` over `image`.
    pub fn surface<T: Sample>(
        &self,
        template: ImageView<'_, T>,
        image: ImageView<'_, T>,
    ) -> ImgSearchResult<ScoreSurface> {
        compute_surface_with(template, image, self.cfg.metric, self.cfg.parallel)
    }

    /// Returns the single best placement of `template` in `image`.
    ///
    /// With `return_center`, the coordinate is shifted by half the template
    /// size (integer division) to name the template center.
    pub fn find_best<T: Sample>(
        &self,
        template: ImageView<'_, T>,
        image: ImageView<'_, T>,
        return_center: bool,
    ) -> ImgSearchResult<MatchPoint> {
        let _span = trace_span!("find_best", metric = self.cfg.metric.name()).entered();

        let surface = self.surface(template, image)?;
        let best = locate_best(&surface, self.cfg.metric.polarity())?;
        let point = to_point(best.x, best.y, best.value, &template, return_center);

        trace_event!("best_match", x = point.x, y = point.y, score = point.score);
        Ok(point)
    }

    /// Returns up to `max_count` non-overlapping matches, best first.
    ///
    /// Extraction stops at the first candidate that fails `threshold`
    /// (`score >= threshold` for maximizing metrics, `score <= threshold` for
    /// minimizing ones). `max_count == 0` returns an empty list without
    /// inspecting the inputs.
    pub fn find_all<T: Sample>(
        &self,
        template: ImageView<'_, T>,
        image: ImageView<'_, T>,
        max_count: usize,
        threshold: f32,
        return_center: bool,
    ) -> ImgSearchResult<Vec<MatchPoint>> {
        if max_count == 0 {
            return Ok(Vec::new());
        }
        self.cfg.suppression.validate()?;

        let _span = trace_span!(
            "find_all",
            metric = self.cfg.metric.name(),
            max_count = max_count,
            threshold = threshold
        )
        .entered();

        let polarity = self.cfg.metric.polarity();
        let tpl_size = (template.width(), template.height());
        let mut surface = self.surface(template, image)?;
        let mut matches = Vec::new();

        while matches.len() < max_count {
            let best = locate_best(&surface, polarity)?;
            if best.value == polarity.worst() {
                trace_event!("surface_exhausted", found = matches.len());
                break;
            }
            if !polarity.accepts(best.value, threshold) {
                trace_event!("match_rejected", score = best.value);
                break;
            }

            suppress_region(
                &mut surface,
                (best.x, best.y),
                tpl_size,
                self.cfg.suppression,
                polarity,
            );
            let point = to_point(best.x, best.y, best.value, &template, return_center);
            trace_event!("match_accepted", x = point.x, y = point.y, score = point.score);
            matches.push(point);
        }

        Ok(matches)
    }
}

fn to_point<T>(
    x: usize,
    y: usize,
    score: f32,
    template: &ImageView<'_, T>,
    return_center: bool,
) -> MatchPoint {
    if return_center {
        MatchPoint {
            x: x + template.width() / 2,
            y: y + template.height() / 2,
            score,
        }
    } else {
        MatchPoint { x, y, score }
    }
}

#[cfg(test)]
mod tests {
    use super::Matcher;
    use crate::search::{MatchConfig, Metric};
    use crate::{ImageView, Suppression};

    fn ramp(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .map(|i| ((i % width) * 7 + (i / width) * 13) as u8)
            .collect()
    }

    #[test]
    fn center_shift_uses_integer_half_size() {
        let image = ramp(20, 15);
        let image = ImageView::from_slice(&image, 20, 15).unwrap();
        // Strided view straight into the search image.
        let tpl = image.roi(6, 4, 5, 3).unwrap();

        let matcher = Matcher::new(Metric::SqDiff);
        let top_left = matcher.find_best(tpl, image, false).unwrap();
        let center = matcher.find_best(tpl, image, true).unwrap();
        assert_eq!(top_left.position(), (6, 4));
        assert_eq!(center.position(), (8, 5));
        assert_eq!(top_left.score, 0.0);
    }

    #[test]
    fn find_all_zero_count_skips_validation() {
        let image = vec![0u8; 4];
        let tpl = vec![0u8; 9];
        let image = ImageView::from_slice(&image, 2, 2).unwrap();
        let tpl = ImageView::from_slice(&tpl, 3, 3).unwrap();
        let matches = Matcher::default().find_all(tpl, image, 0, 0.5, true).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn find_all_stops_when_surface_is_exhausted() {
        // 2x2 surface, rectangle suppression covers everything after one hit.
        let image = ramp(4, 4);
        let image = ImageView::from_slice(&image, 4, 4).unwrap();
        let tpl = image.roi(0, 0, 3, 3).unwrap();

        let matcher = Matcher::default().with_config(MatchConfig {
            metric: Metric::SqDiff,
            suppression: Suppression::radius(5, 5),
            parallel: false,
        });
        let matches = matcher.find_all(tpl, image, 10, f32::INFINITY, false).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position(), (0, 0));
    }

    #[test]
    fn invalid_suppression_fails_before_scanning() {
        let image = ramp(8, 8);
        let image = ImageView::from_slice(&image, 8, 8).unwrap();
        let matcher = Matcher::default().with_config(MatchConfig {
            suppression: Suppression::FloodFill { tolerance: -1.0 },
            ..MatchConfig::default()
        });
        assert!(matcher.find_all(image, image, 3, 0.5, false).is_err());
    }
}
