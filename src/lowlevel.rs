//! Low-level building blocks for custom matching pipelines.
//!
//! These expose the score surface, extremum location, suppression and
//! kernel pieces that `Matcher` is assembled from. Most users should prefer
//! `Matcher::find_best` and `Matcher::find_all`.

pub use crate::candidate::extremes::{locate_best, locate_extremes, Extremes, Extremum};
pub use crate::candidate::suppress::suppress_region;
pub use crate::image::integral::WindowStats;
pub use crate::kernel::scalar::ScalarKernel;
pub use crate::kernel::Kernel;
pub use crate::search::scan::compute_surface;
pub use crate::search::surface::ScoreSurface;
pub use crate::template::TemplatePlan;

#[cfg(feature = "simd")]
pub use crate::kernel::simd::SimdKernel;
