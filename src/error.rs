//! Error types for u-antpath.

use thiserror::Error;

/// Errors surfaced by graph construction, configuration, and the colony loop.
///
/// Construction failures of individual ants are not errors: they are
/// retried silently by the batch generator and only counted. An error is
/// raised when a run cannot make progress at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// The cost matrix or its labels are malformed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A pheromone matrix has the wrong shape or invalid values.
    #[error("invalid pheromone matrix: {0}")]
    InvalidPheromones(String),

    /// A configuration parameter is out of its domain.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No path connects `start` to `goal` through existing edges.
    #[error("goal node {goal} is unreachable from start node {start}")]
    UnreachableGoal {
        /// Start node index.
        start: usize,
        /// Goal node index.
        goal: usize,
    },

    /// An ant failed to complete a route within the retry cap.
    #[error("route construction failed {attempts} times in a row")]
    ConstructionExhausted {
        /// Number of consecutive failed attempts.
        attempts: usize,
    },

    /// A route must contain at least one node.
    #[error("route must contain at least one node")]
    EmptyRoute,
}
