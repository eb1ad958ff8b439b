//! imgsearch locates a small template image inside a larger search image.
//!
//! The engine computes a dense score surface for one of several similarity
//! metrics, picks the best placement, and can extract several
//! non-overlapping matches by suppressing regions that were already
//! reported. Matching is single-scale, deterministic and CPU-only, with
//! optional row parallelism via the `rayon` feature and SIMD inner loops via
//! the `simd` feature.
//!
//! ```
//! use imgsearch::{ImageView, Matcher, Metric};
//!
//! let image: Vec<u8> = (0..64u32).map(|i| (i * 37 % 251) as u8).collect();
//! let image = ImageView::from_slice(&image, 8, 8).unwrap();
//! let template = image.roi(3, 2, 3, 3).unwrap();
//!
//! let best = Matcher::new(Metric::SqDiff)
//!     .find_best(template, image, false)
//!     .unwrap();
//! assert_eq!(best.position(), (3, 2));
//! ```

mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage, Sample};
pub use search::{MatchConfig, MatchPoint, Matcher, Metric, Polarity};
pub use util::{ImgSearchError, ImgSearchResult};

pub use candidate::suppress::Suppression;
pub use search::scan::compute_surface;
pub use search::surface::ScoreSurface;
