//! Global extremum location on a score surface.

use crate::search::surface::ScoreSurface;
use crate::search::Polarity;
use crate::util::{ImgSearchError, ImgSearchResult};

/// A surface value and the placement where it occurs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremum {
    /// Score at the placement.
    pub value: f32,
    /// X coordinate (column) of the placement.
    pub x: usize,
    /// Y coordinate (row) of the placement.
    pub y: usize,
}

/// Global minimum and maximum of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    /// Lowest cell; the first one in row-major order on ties.
    pub min: Extremum,
    /// Highest cell; the first one in row-major order on ties.
    pub max: Extremum,
}

impl Extremes {
    /// Returns the extreme that is best for `polarity`.
    pub fn best(&self, polarity: Polarity) -> Extremum {
        match polarity {
            Polarity::Maximize => self.max,
            Polarity::Minimize => self.min,
        }
    }
}

/// Finds the minimum and maximum of `surface`.
///
/// Cells are scanned row-major; ties keep the first occurrence and NaN cells
/// are skipped. Fails with `EmptySurface` when no comparable cell exists.
pub fn locate_extremes(surface: &ScoreSurface) -> ImgSearchResult<Extremes> {
    let mut out: Option<Extremes> = None;
    for (x, y, value) in cells(surface) {
        let here = Extremum { value, x, y };
        match out.as_mut() {
            None => out = Some(Extremes { min: here, max: here }),
            Some(ext) => {
                if value < ext.min.value {
                    ext.min = here;
                }
                if value > ext.max.value {
                    ext.max = here;
                }
            }
        }
    }
    out.ok_or(ImgSearchError::EmptySurface)
}

/// Finds the best cell of `surface` for `polarity`.
///
/// Same scan order and tie-breaking as [`locate_extremes`].
pub fn locate_best(surface: &ScoreSurface, polarity: Polarity) -> ImgSearchResult<Extremum> {
    let mut best: Option<Extremum> = None;
    for (x, y, value) in cells(surface) {
        if best.map_or(true, |b| polarity.is_better(value, b.value)) {
            best = Some(Extremum { value, x, y });
        }
    }
    best.ok_or(ImgSearchError::EmptySurface)
}

fn cells(surface: &ScoreSurface) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
    let width = surface.width().max(1);
    surface
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(move |(idx, &v)| (idx % width, idx / width, v))
}

#[cfg(test)]
mod tests {
    use super::{locate_best, locate_extremes, Extremum};
    use crate::search::surface::ScoreSurface;
    use crate::search::Polarity;
    use crate::util::ImgSearchError;

    #[test]
    fn finds_min_and_max_with_locations() {
        #[rustfmt::skip]
        let data = vec![
            0.2, 0.5, 0.1,
            0.9, -0.3, 0.4,
        ];
        let surface = ScoreSurface::from_vec(data, 3, 2).unwrap();
        let ext = locate_extremes(&surface).unwrap();
        assert_eq!(ext.max, Extremum { value: 0.9, x: 0, y: 1 });
        assert_eq!(ext.min, Extremum { value: -0.3, x: 1, y: 1 });
        assert_eq!(ext.best(Polarity::Maximize), ext.max);
        assert_eq!(ext.best(Polarity::Minimize), ext.min);
    }

    #[test]
    fn ties_keep_first_in_row_major_order() {
        #[rustfmt::skip]
        let data = vec![
            0.0, 1.0, 0.0,
            1.0, 0.0, 1.0,
        ];
        let surface = ScoreSurface::from_vec(data, 3, 2).unwrap();
        let best = locate_best(&surface, Polarity::Maximize).unwrap();
        assert_eq!((best.x, best.y), (1, 0));
        let best = locate_best(&surface, Polarity::Minimize).unwrap();
        assert_eq!((best.x, best.y), (0, 0));
    }

    #[test]
    fn nan_cells_are_skipped() {
        let data = vec![f32::NAN, 0.3, f32::NAN, 0.7];
        let surface = ScoreSurface::from_vec(data, 2, 2).unwrap();
        let best = locate_best(&surface, Polarity::Minimize).unwrap();
        assert_eq!(best, Extremum { value: 0.3, x: 1, y: 0 });
        let ext = locate_extremes(&surface).unwrap();
        assert_eq!(ext.max, Extremum { value: 0.7, x: 1, y: 1 });
    }

    #[test]
    fn empty_surface_is_an_error() {
        let surface = ScoreSurface::from_vec(Vec::new(), 0, 4).unwrap();
        assert_eq!(locate_extremes(&surface), Err(ImgSearchError::EmptySurface));
        assert_eq!(
            locate_best(&surface, Polarity::Maximize),
            Err(ImgSearchError::EmptySurface)
        );
    }
}
