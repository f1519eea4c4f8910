//! Error types for the search engine.

use std::fmt;

use gridstar_core::Point;
use thiserror::Error;

/// Which endpoint of a run an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Search engine error type.
///
/// The first three variants are construction failures: the run never
/// starts, and the caller must rebuild with valid input. [`NotReady`]
/// (path requested before completion) is recoverable by stepping further.
/// Frontier exhaustion is *not* an error; it is reported as a terminal
/// [`StepResult`](crate::StepResult).
///
/// [`NotReady`]: SearchError::NotReady
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("grid has no cells ({width}x{height})")]
    EmptyGrid { width: i32, height: i32 },

    #[error("{which} cell {pos} is outside the grid")]
    OutOfBounds { which: Endpoint, pos: Point },

    #[error("{which} cell {pos} is blocked")]
    Blocked { which: Endpoint, pos: Point },

    #[error("no path is available before the search completes")]
    NotReady,
}
