//! Error types for imgsearch.

use thiserror::Error;

/// Result alias for imgsearch operations.
pub type ImgSearchResult<T> = std::result::Result<T, ImgSearchError>;

/// Errors that can occur when building buffers or running a search.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ImgSearchError {
    /// The template does not fit inside the search image.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit inside image {img_width}x{img_height}"
    )]
    InvalidDimensions {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A score surface with no selectable cell was scanned.
    #[error("score surface is empty")]
    EmptySurface,
    /// The metric name is not one of the supported metrics.
    #[error("unrecognized matching metric: {name:?}")]
    InvalidMetricConfiguration { name: String },
    /// Template and image have a different number of channels.
    #[error("channel mismatch: template has {template}, image has {image}")]
    ChannelMismatch { template: usize, image: usize },
    /// A buffer was described with a zero width or height.
    #[error("empty buffer: {width}x{height}")]
    EmptyBuffer { width: usize, height: usize },
    /// A buffer was described with zero channels.
    #[error("invalid channel count: {channels}")]
    InvalidChannels { channels: usize },
    /// The stride is shorter than one row of samples.
    #[error("stride {stride} is smaller than row length {row_len}")]
    InvalidStride { row_len: usize, stride: usize },
    /// The backing slice is too short for the described layout.
    #[error("buffer too small: need {needed} samples, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest leaves the image bounds.
    #[error(
        "roi {width}x{height}+{x}+{y} is out of bounds for image {img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
