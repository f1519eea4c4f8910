use gridstar_core::{EventSink, Grid, Point, SearchEvent};

use crate::error::{Endpoint, SearchError};

/// Outcome of a single [`Search::advance`] call.
///
/// `Completed` and `Exhausted` are terminal: once returned, every further
/// `advance` returns the same value again without touching any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    /// A cell was finalized; the goal has not been reached yet.
    InProgress,
    /// The goal was finalized; the path is available.
    Completed,
    /// The frontier is empty; no path exists.
    Exhausted,
}

/// Construction input for a [`Search`]: the grid to run over and the two
/// endpoints.
///
/// The engine takes ownership of the grid, freezing the obstacle layout for
/// the whole run; hosts keep their own copy for editing between runs.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,
}

/// An incremental A* search over an occupancy grid.
///
/// Cost, predecessor and frontier-membership tables are flat row-major
/// arrays indexed by cell, so logically equal coordinates always share one
/// entry. The frontier itself is kept in insertion order; selection scans
/// for the smallest `f = cost + heuristic` and resolves ties in favor of
/// the earliest-inserted entry, which makes whole runs reproducible.
#[derive(Debug)]
pub struct Search {
    grid: Grid,
    start: Point,
    goal: Point,
    width: usize,
    /// Best known accumulated cost per cell; `f64::INFINITY` = unset.
    cost: Vec<f64>,
    /// Predecessor cell index; `usize::MAX` = none (permanent for start).
    parent: Vec<usize>,
    /// Frontier membership flags, parallel to `frontier`.
    queued: Vec<bool>,
    /// Frontier cells in insertion order.
    frontier: Vec<usize>,
    status: StepResult,
    nbuf: Vec<Point>,
}

impl Search {
    /// Validate the configuration and set up a fresh run.
    ///
    /// Rejects zero-sized grids and endpoints that are out of bounds or
    /// blocked, so a run that constructs successfully can only end in
    /// [`StepResult::Completed`] or [`StepResult::Exhausted`].
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let SearchConfig { grid, start, goal } = config;

        if grid.width() <= 0 || grid.height() <= 0 {
            return Err(SearchError::EmptyGrid {
                width: grid.width(),
                height: grid.height(),
            });
        }
        for (which, pos) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !grid.contains(pos) {
                return Err(SearchError::OutOfBounds { which, pos });
            }
            if grid.is_blocked(pos) {
                return Err(SearchError::Blocked { which, pos });
            }
        }

        let len = grid.width() as usize * grid.height() as usize;
        let width = grid.width() as usize;
        let mut search = Self {
            grid,
            start,
            goal,
            width,
            cost: vec![f64::INFINITY; len],
            parent: vec![usize::MAX; len],
            queued: vec![false; len],
            frontier: Vec::new(),
            status: StepResult::InProgress,
            nbuf: Vec::with_capacity(8),
        };
        let si = search.idx(start);
        search.cost[si] = 0.0;
        search.queued[si] = true;
        search.frontier.push(si);
        Ok(search)
    }

    /// Perform one search step: finalize the best frontier cell and relax
    /// its neighbors.
    ///
    /// Progress is reported through `sink`; the return value is the run
    /// status after the step. Calls after a terminal status are no-ops
    /// that emit nothing and return the same status again.
    pub fn advance<S: EventSink>(&mut self, sink: &mut S) -> StepResult {
        match self.status {
            StepResult::InProgress => {}
            done => return done,
        }

        let Some(pos) = self.best_frontier_pos() else {
            self.status = StepResult::Exhausted;
            log::debug!("frontier exhausted before reaching {}", self.goal);
            sink.emit(SearchEvent::Exhausted);
            return StepResult::Exhausted;
        };
        // Plain remove keeps insertion order, so later ties still resolve
        // toward older entries.
        let ci = self.frontier.remove(pos);
        self.queued[ci] = false;
        let current = self.point(ci);
        sink.emit(SearchEvent::Finalized(current));

        if current == self.goal {
            self.status = StepResult::Completed;
            let path = self.backtrack();
            log::debug!(
                "reached {} at cost {:.3} ({} cells)",
                self.goal,
                self.cost[ci],
                path.len()
            );
            sink.emit(SearchEvent::Completed(path));
            return StepResult::Completed;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        self.grid.neighbors(current, &mut nbuf);
        for &np in nbuf.iter() {
            let ni = self.idx(np);
            let tentative = self.cost[ci] + current.dist(np);
            if tentative < self.cost[ni] {
                if !self.queued[ni] {
                    self.queued[ni] = true;
                    self.frontier.push(ni);
                    sink.emit(SearchEvent::Discovered(np));
                }
                self.cost[ni] = tentative;
                self.parent[ni] = ci;
            }
        }
        self.nbuf = nbuf;

        StepResult::InProgress
    }

    /// Drive [`advance`](Self::advance) until the run ends, returning the
    /// terminal status.
    pub fn run_to_completion<S: EventSink>(&mut self, sink: &mut S) -> StepResult {
        loop {
            match self.advance(sink) {
                StepResult::InProgress => continue,
                done => return done,
            }
        }
    }

    /// The path from the goal back to the start, one coordinate per cell.
    ///
    /// Only available after the run completed; callers wanting start → goal
    /// order reverse it themselves.
    pub fn reconstruct_path(&self) -> Result<Vec<Point>, SearchError> {
        if self.status != StepResult::Completed {
            return Err(SearchError::NotReady);
        }
        Ok(self.backtrack())
    }

    /// Current run status without advancing.
    #[inline]
    pub fn status(&self) -> StepResult {
        self.status
    }

    /// Start cell of this run.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Goal cell of this run.
    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Best known accumulated cost to `p`, if it has been reached.
    pub fn cost_to(&self, p: Point) -> Option<f64> {
        if !self.grid.contains(p) {
            return None;
        }
        let c = self.cost[self.idx(p)];
        c.is_finite().then_some(c)
    }

    /// Whether `p` currently sits in the frontier.
    pub fn queued(&self, p: Point) -> bool {
        self.grid.contains(p) && self.queued[self.idx(p)]
    }

    /// Position in `frontier` of the entry minimizing `f`; ties keep the
    /// earliest-inserted entry because the comparison is strict.
    fn best_frontier_pos(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &ci) in self.frontier.iter().enumerate() {
            let f = self.cost[ci] + self.point(ci).dist(self.goal);
            if best.is_none_or(|(_, bf)| f < bf) {
                best = Some((pos, f));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn backtrack(&self) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = self.idx(self.goal);
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.parent[ci];
        }
        path
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_result_round_trip() {
        for status in [
            StepResult::InProgress,
            StepResult::Completed,
            StepResult::Exhausted,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: StepResult = serde_json::from_str(&json).unwrap();
            assert_eq!(status, back);
        }
    }
}
