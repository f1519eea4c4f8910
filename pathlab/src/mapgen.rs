//! Random obstacle-field generation.
//!
//! Scatters walls using a jittered sine-product field, which produces
//! loose diagonal ridges rather than uniform noise. The neighborhoods of
//! both endpoints, the top and bottom rows, and one randomly chosen column
//! are always left open.

use gridstar_core::{Grid, Point};
use rand::{Rng, RngExt};

/// Euclidean distance around the endpoints kept free of generated walls.
const CLEAR_RADIUS: f64 = 5.0;
/// Field value above which a cell becomes a wall.
const WALL_CUTOFF: f64 = 0.4;
/// Amplitude of the per-cell coordinate jitter.
const JITTER: f64 = 10.0;

/// Obstacle-field generator, generic over its randomness source so tests
/// can run it seeded.
pub struct FieldGen<R: Rng> {
    rng: R,
}

impl<R: Rng> FieldGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Overwrite `grid` with a fresh obstacle field, keeping `start` and
    /// `goal` reachable-friendly as described above. Returns the number of
    /// walls placed.
    pub fn scatter(&mut self, grid: &mut Grid, start: Point, goal: Point) -> usize {
        grid.fill(false);
        let (w, h) = (grid.width(), grid.height());
        if w <= 0 || h <= 0 {
            return 0;
        }
        let open_column = self.rng.random_range(0..w);
        let mut walls = 0;
        for x in 0..w {
            for y in 0..h {
                let xx = x as f64 + self.rng.random::<f64>() * JITTER;
                let yy = y as f64 + self.rng.random::<f64>() * JITTER;
                let z = xx.sin() * (2.0 * yy).sin() - (2.0 * xx).cos() * yy.cos();
                let p = Point::new(x, y);
                if z >= WALL_CUTOFF
                    && p.dist(start) > CLEAR_RADIUS
                    && p.dist(goal) > CLEAR_RADIUS
                    && y != 0
                    && y != h - 1
                    && x != open_column
                {
                    grid.set_blocked(p, true);
                    walls += 1;
                }
            }
        }
        walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(seed: u64, w: i32, h: i32) -> (Grid, usize) {
        let mut grid = Grid::new(w, h);
        let start = Point::ZERO;
        let goal = Point::new(w - 1, h - 1);
        let walls = FieldGen::new(StdRng::seed_from_u64(seed)).scatter(&mut grid, start, goal);
        (grid, walls)
    }

    #[test]
    fn same_seed_same_field() {
        let (a, walls_a) = generate(7, 40, 30);
        let (b, walls_b) = generate(7, 40, 30);
        assert_eq!(a, b);
        assert_eq!(walls_a, walls_b);
        assert!(walls_a > 0);
    }

    #[test]
    fn endpoints_and_their_neighborhoods_stay_open() {
        let (grid, _) = generate(42, 40, 30);
        let start = Point::ZERO;
        let goal = Point::new(39, 29);
        for y in 0..30 {
            for x in 0..40 {
                let p = Point::new(x, y);
                if p.dist(start) <= CLEAR_RADIUS || p.dist(goal) <= CLEAR_RADIUS {
                    assert!(grid.is_passable(p), "wall at {p} inside clear radius");
                }
            }
        }
    }

    #[test]
    fn top_and_bottom_rows_stay_open() {
        let (grid, _) = generate(3, 40, 30);
        for x in 0..40 {
            assert!(grid.is_passable(Point::new(x, 0)));
            assert!(grid.is_passable(Point::new(x, 29)));
        }
    }

    #[test]
    fn wall_count_matches_grid_contents() {
        let (grid, walls) = generate(11, 40, 30);
        let mut counted = 0;
        for y in 0..30 {
            for x in 0..40 {
                if grid.is_blocked(Point::new(x, y)) {
                    counted += 1;
                }
            }
        }
        assert_eq!(walls, counted);
    }

    #[test]
    fn degenerate_grid_is_left_alone() {
        let mut grid = Grid::new(0, 0);
        let walls =
            FieldGen::new(StdRng::seed_from_u64(0)).scatter(&mut grid, Point::ZERO, Point::ZERO);
        assert_eq!(walls, 0);
    }
}
