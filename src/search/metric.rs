//! Similarity metrics and their polarity.

use crate::util::ImgSearchError;
use std::fmt;
use std::str::FromStr;

/// Whether a metric's best value is its maximum or its minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Higher scores are better (correlation metrics).
    Maximize,
    /// Lower scores are better (difference metrics).
    Minimize,
}

impl Polarity {
    /// Returns true if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f32, b: f32) -> bool {
        match self {
            Polarity::Maximize => a > b,
            Polarity::Minimize => a < b,
        }
    }

    /// Returns true if `score` passes `threshold`.
    #[inline]
    pub fn accepts(self, score: f32, threshold: f32) -> bool {
        match self {
            Polarity::Maximize => score >= threshold,
            Polarity::Minimize => score <= threshold,
        }
    }

    /// Sentinel written into suppressed cells; never better than any score.
    #[inline]
    pub fn worst(self) -> f32 {
        match self {
            Polarity::Maximize => f32::NEG_INFINITY,
            Polarity::Minimize => f32::INFINITY,
        }
    }
}

/// Similarity metric used to build the score surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Normalized cross-correlation, `Σ I·T / sqrt(Σ I² · Σ T²)`.
    #[default]
    Ncc,
    /// Raw cross-correlation, `Σ I·T`. Unbounded.
    CrossCorrelation,
    /// Squared difference normalized by `sqrt(Σ I² · Σ T²)`, clamped to `[0, 1]`.
    SqDiffNormed,
    /// Raw squared difference, `Σ (I - T)²`.
    SqDiff,
    /// Zero-mean normalized cross-correlation (correlation coefficient) in `[-1, 1]`.
    Zncc,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 5] = [
        Metric::Ncc,
        Metric::CrossCorrelation,
        Metric::SqDiffNormed,
        Metric::SqDiff,
        Metric::Zncc,
    ];

    /// Returns the polarity of the metric.
    pub fn polarity(self) -> Polarity {
        match self {
            Metric::Ncc | Metric::CrossCorrelation | Metric::Zncc => Polarity::Maximize,
            Metric::SqDiffNormed | Metric::SqDiff => Polarity::Minimize,
        }
    }

    /// Returns true for metrics with a fixed score range.
    pub fn is_normalized(self) -> bool {
        matches!(self, Metric::Ncc | Metric::SqDiffNormed | Metric::Zncc)
    }

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Ncc => "ncc",
            Metric::CrossCorrelation => "cross_correlation",
            Metric::SqDiffNormed => "sqdiff_normed",
            Metric::SqDiff => "sqdiff",
            Metric::Zncc => "zncc",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ImgSearchError;

    /// Parses a metric name; unknown names fail with `InvalidMetricConfiguration`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "ncc" | "ccorr_normed" => Ok(Metric::Ncc),
            "cross_correlation" | "ccorr" => Ok(Metric::CrossCorrelation),
            "sqdiff_normed" => Ok(Metric::SqDiffNormed),
            "sqdiff" => Ok(Metric::SqDiff),
            "zncc" | "ccoeff_normed" => Ok(Metric::Zncc),
            _ => Err(ImgSearchError::InvalidMetricConfiguration {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Metric, Polarity};
    use crate::util::ImgSearchError;

    #[test]
    fn every_metric_has_one_polarity() {
        let max: Vec<_> = Metric::ALL
            .iter()
            .filter(|m| m.polarity() == Polarity::Maximize)
            .collect();
        assert_eq!(max, [&Metric::Ncc, &Metric::CrossCorrelation, &Metric::Zncc]);
        assert_eq!(Metric::SqDiff.polarity(), Polarity::Minimize);
        assert_eq!(Metric::SqDiffNormed.polarity(), Polarity::Minimize);
    }

    #[test]
    fn names_round_trip_and_aliases_parse() {
        for metric in Metric::ALL {
            assert_eq!(metric.name().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!("CCORR_NORMED".parse::<Metric>().unwrap(), Metric::Ncc);
        assert_eq!("ccoeff-normed".parse::<Metric>().unwrap(), Metric::Zncc);
    }

    #[test]
    fn unknown_metric_fails_fast() {
        let err = "hamming".parse::<Metric>().unwrap_err();
        assert_eq!(
            err,
            ImgSearchError::InvalidMetricConfiguration {
                name: "hamming".to_string()
            }
        );
    }

    #[test]
    fn polarity_threshold_and_sentinel() {
        assert!(Polarity::Maximize.accepts(0.95, 0.95));
        assert!(!Polarity::Maximize.accepts(0.94, 0.95));
        assert!(Polarity::Minimize.accepts(0.05, 0.05));
        assert!(!Polarity::Minimize.accepts(0.06, 0.05));
        assert!(!Polarity::Maximize.accepts(f32::NAN, 0.0));

        assert!(Polarity::Maximize.is_better(1.0, Polarity::Maximize.worst()));
        assert!(Polarity::Minimize.is_better(1e30, Polarity::Minimize.worst()));
    }
}
