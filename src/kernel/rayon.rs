//! Rayon-parallel row driver (feature-gated).
//!
//! Rows of the score surface are independent, so each worker fills whole
//! rows with the same per-cell code path as the sequential driver. Results
//! are identical to the sequential scan.

use rayon::prelude::*;

/// Row-parallel counterpart of [`fill_rows`](crate::kernel::fill_rows).
pub(crate) fn fill_rows_par<F>(data: &mut [f32], width: usize, fill: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill(y, row));
}
