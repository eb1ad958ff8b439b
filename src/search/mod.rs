//! Template search: metrics, score surfaces and the high-level matcher.
//!
//! The scan module computes dense score surfaces; the matcher turns them
//! into best-first match points.

mod matcher;
mod metric;
pub(crate) mod scan;
pub(crate) mod surface;

pub use matcher::Matcher;
pub use metric::{Metric, Polarity};

use crate::candidate::suppress::Suppression;

/// A reported match location and its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchPoint {
    /// X coordinate: template top-left corner, or its center when requested.
    pub x: usize,
    /// Y coordinate: template top-left corner, or its center when requested.
    pub y: usize,
    /// Metric score at the placement.
    pub score: f32,
}

impl MatchPoint {
    /// Returns `(x, y)`.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

impl From<MatchPoint> for (usize, usize) {
    fn from(value: MatchPoint) -> Self {
        value.position()
    }
}

/// Configuration for a [`Matcher`].
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Similarity metric; also fixes the polarity.
    pub metric: Metric,
    /// How reported matches are blanked during `find_all`.
    pub suppression: Suppression,
    /// Scan surface rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            suppression: Suppression::default(),
            parallel: false,
        }
    }
}
