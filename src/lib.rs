//! Ant Colony Optimization for finding low-cost routes between two nodes
//! of a small weighted graph with missing edges.
//!
//! - [`aco::CostGraph`]: immutable cost matrix with a [`aco::NO_EDGE`] sentinel.
//! - [`aco::PheromoneMatrix`]: trail intensities, evaporated and reinforced
//!   once per iteration.
//! - [`aco::AcoRunner`]: the colony loop, driven by an immutable
//!   [`aco::AcoConfig`].
//!
//! # Architecture
//!
//! The search is single-threaded and fully reproducible under a fixed
//! seed. With the `parallel` feature, the ants of one batch are built
//! concurrently against a frozen pheromone snapshot; results are identical
//! to the serial run.

pub mod aco;
pub mod error;
pub mod random;

pub use error::AcoError;
