//! Region suppression for repeated extraction.
//!
//! After a placement is reported, a bounded region around it is overwritten
//! with the polarity's worst value so later scans cannot select it again.

use crate::search::surface::ScoreSurface;
use crate::search::Polarity;
use crate::util::{ImgSearchError, ImgSearchResult};
use std::collections::VecDeque;

/// Strategy used to blank a reported match on the score surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Suppression {
    /// Rectangle of half-extent `(template_width / 2, template_height / 2)`
    /// centered on the match.
    #[default]
    Window,
    /// Rectangle with explicit half-extents centered on the match.
    Radius { x: usize, y: usize },
    /// 4-connected fill over cells within `tolerance` of the seed score,
    /// bounded to the template footprint around the seed.
    FloodFill { tolerance: f32 },
}

impl Suppression {
    /// Rectangle with explicit half-extents.
    pub fn radius(x: usize, y: usize) -> Self {
        Suppression::Radius { x, y }
    }

    /// Value-connected fill; `tolerance` must be finite and non-negative.
    pub fn flood_fill(tolerance: f32) -> ImgSearchResult<Self> {
        let strategy = Suppression::FloodFill { tolerance };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Checks the strategy parameters.
    pub fn validate(&self) -> ImgSearchResult<()> {
        match *self {
            Suppression::FloodFill { tolerance } if !(tolerance.is_finite() && tolerance >= 0.0) => {
                Err(ImgSearchError::InvalidInput(
                    "flood fill tolerance must be finite and non-negative",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Overwrites the region around `seed` with `polarity.worst()`.
///
/// `template_size` is `(width, height)` of the template that produced the
/// surface. The seed cell is always included and the region never extends
/// past the template footprint. Returns the number of cells overwritten.
pub fn suppress_region(
    surface: &mut ScoreSurface,
    seed: (usize, usize),
    template_size: (usize, usize),
    strategy: Suppression,
    polarity: Polarity,
) -> usize {
    let (sx, sy) = seed;
    if sx >= surface.width() || sy >= surface.height() {
        return 0;
    }
    let (tpl_width, tpl_height) = template_size;
    match strategy {
        Suppression::Window => blank_rect(surface, seed, (tpl_width / 2, tpl_height / 2), polarity),
        Suppression::Radius { x, y } => blank_rect(surface, seed, (x, y), polarity),
        Suppression::FloodFill { tolerance } => {
            let reach = (tpl_width.saturating_sub(1), tpl_height.saturating_sub(1));
            flood_fill(surface, seed, reach, tolerance, polarity)
        }
    }
}

fn blank_rect(
    surface: &mut ScoreSurface,
    (sx, sy): (usize, usize),
    (rx, ry): (usize, usize),
    polarity: Polarity,
) -> usize {
    let x0 = sx.saturating_sub(rx);
    let y0 = sy.saturating_sub(ry);
    let x1 = sx.saturating_add(rx).min(surface.width() - 1);
    let y1 = sy.saturating_add(ry).min(surface.height() - 1);
    let fill = polarity.worst();

    let width = surface.width();
    let data = surface.as_mut_slice();
    for y in y0..=y1 {
        data[y * width + x0..=y * width + x1].fill(fill);
    }
    (x1 - x0 + 1) * (y1 - y0 + 1)
}

fn flood_fill(
    surface: &mut ScoreSurface,
    (sx, sy): (usize, usize),
    (rx, ry): (usize, usize),
    tolerance: f32,
    polarity: Polarity,
) -> usize {
    let x0 = sx.saturating_sub(rx);
    let y0 = sy.saturating_sub(ry);
    let x1 = sx.saturating_add(rx).min(surface.width() - 1);
    let y1 = sy.saturating_add(ry).min(surface.height() - 1);
    let box_width = x1 - x0 + 1;
    let mut visited = vec![false; box_width * (y1 - y0 + 1)];
    let mark = |visited: &mut [bool], x: usize, y: usize| -> bool {
        let idx = (y - y0) * box_width + (x - x0);
        !std::mem::replace(&mut visited[idx], true)
    };

    let fill = polarity.worst();
    let seed_value = surface.get(sx, sy).unwrap_or(fill);
    let mut queue = VecDeque::new();
    mark(&mut visited, sx, sy);
    queue.push_back((sx, sy));

    let mut filled = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        surface.set(x, y, fill);
        filled += 1;

        let neighbors = [
            (x > x0).then(|| (x - 1, y)),
            (x < x1).then(|| (x + 1, y)),
            (y > y0).then(|| (x, y - 1)),
            (y < y1).then(|| (x, y + 1)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            let Some(value) = surface.get(nx, ny) else {
                continue;
            };
            if !value.is_finite() || (value - seed_value).abs() > tolerance {
                continue;
            }
            if mark(&mut visited, nx, ny) {
                queue.push_back((nx, ny));
            }
        }
    }
    filled
}
