//! The obstacle map: a boolean occupancy grid with 8-way neighbor queries.

use crate::geom::Point;

/// A 2D occupancy grid. `true` cells are blocked (walls), `false` cells are
/// open.
///
/// The grid is meant to be edited freely before a search and left untouched
/// while one runs; the search engine takes its own copy for the duration of
/// a run, so a host cannot accidentally mutate the map out from under it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a fully open grid. Non-positive dimensions yield a grid with
    /// no cells.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![false; len],
        }
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Whether the cell at `p` is blocked. Out-of-bounds positions report
    /// `false`; use [`is_passable`](Self::is_passable) for traversability.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.index(p)]
    }

    /// Whether `p` is in bounds and open.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.contains(p) && !self.cells[self.index(p)]
    }

    /// Block or clear the cell at `p`. Does nothing if out of bounds.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        if self.contains(p) {
            let idx = self.index(p);
            self.cells[idx] = blocked;
        }
    }

    /// Set every cell to `blocked`.
    pub fn fill(&mut self, blocked: bool) {
        self.cells.fill(blocked);
    }

    /// Append the traversable neighbors of `p` to `buf` (cleared first).
    ///
    /// Up to eight offsets `(dx, dy) ∈ {-1, 0, 1}² \ {(0, 0)}` are
    /// considered, dx-major, and kept when the target cell is in bounds and
    /// open. A diagonal is additionally rejected when either of the two
    /// orthogonally-adjacent corner cells is blocked, so paths cannot
    /// squeeze between two walls that touch only at a corner.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.clear();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = p.shift(dx, dy);
                if !self.is_passable(n) {
                    continue;
                }
                if dx != 0
                    && dy != 0
                    && (self.is_blocked(Point::new(p.x + dx, p.y))
                        || self.is_blocked(Point::new(p.x, p.y + dy)))
                {
                    continue;
                }
                buf.push(n);
            }
        }
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(4, 2);
        g.set_blocked(Point::new(3, 1), true);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
