//! **gridstar-search** — an incremental, step-driven A* engine over
//! occupancy grids.
//!
//! Unlike a one-shot pathfinder, [`Search`] exposes single-step granularity:
//! each [`advance`](Search::advance) call finalizes exactly one frontier
//! cell and relaxes its neighbors, pushing [`SearchEvent`]s into the
//! caller's [`EventSink`] so a host can animate the run at whatever pace it
//! likes. The engine targets uniform-cost 8-connected grids with Euclidean
//! step costs and the Euclidean goal heuristic, which is admissible and
//! consistent there, so the first path that reaches the goal is
//! cost-optimal.
//!
//! [`SearchEvent`]: gridstar_core::SearchEvent
//! [`EventSink`]: gridstar_core::EventSink
//!
//! ```
//! use gridstar_core::{Grid, Point, SearchEvent};
//! use gridstar_search::{Search, SearchConfig, StepResult};
//!
//! let mut grid = Grid::new(5, 5);
//! grid.set_blocked(Point::new(2, 2), true);
//!
//! let mut search = Search::new(SearchConfig {
//!     grid,
//!     start: Point::new(0, 0),
//!     goal: Point::new(4, 4),
//! })?;
//!
//! let mut events: Vec<SearchEvent> = Vec::new();
//! while search.advance(&mut events) == StepResult::InProgress {}
//!
//! let path = search.reconstruct_path()?; // ordered goal → start
//! assert_eq!(path.last(), Some(&Point::new(0, 0)));
//! # Ok::<(), gridstar_search::SearchError>(())
//! ```

mod engine;
mod error;

pub use engine::{Search, SearchConfig, StepResult};
pub use error::{Endpoint, SearchError};
