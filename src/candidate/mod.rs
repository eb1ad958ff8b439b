//! Candidate selection on a score surface.
//!
//! Includes extremum location and region suppression for repeated
//! extraction.

pub(crate) mod extremes;
pub(crate) mod suppress;
