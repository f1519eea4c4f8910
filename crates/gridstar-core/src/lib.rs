//! **gridstar-core** — grid model and event types for the gridstar
//! pathfinding visualizer.
//!
//! This crate provides the pieces shared between the search engine and its
//! hosts:
//!
//! - [`Point`] — 2D integer coordinates with value equality.
//! - [`Grid`] — a boolean occupancy map with corner-respecting 8-way
//!   neighbor queries.
//! - [`SearchEvent`] / [`EventSink`] — the push-based event stream a
//!   renderer consumes while a search runs.

pub mod events;
pub mod geom;
pub mod grid;

pub use events::{EventSink, SearchEvent};
pub use geom::Point;
pub use grid::Grid;
