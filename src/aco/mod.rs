//! Ant Colony Optimization (ACO) for start-to-goal routing.
//!
//! A colony of ants repeatedly walks from a start node toward a goal node.
//! Each step is sampled with probability proportional to
//! `pheromone^alpha * (1 / cost)^beta`. After every batch, trails evaporate
//! and each ant reinforces the edges it used in proportion to the inverse
//! of its route cost, so short routes attract more ants over time.
//!
//! Missing edges carry the [`NO_EDGE`] sentinel and are never traversed.
//!
//! # References
//!
//! - Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system:
//!   optimization by a colony of cooperating agents", *IEEE Trans. SMC-B*
//!   26(1), 29-41.
//! - Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*. MIT Press.

mod config;
mod construct;
mod graph;
mod pheromone;
mod report;
mod runner;
mod transition;
mod types;

pub use config::AcoConfig;
pub use construct::build_route;
pub use graph::{CostGraph, NO_EDGE};
pub use pheromone::PheromoneMatrix;
pub use report::{format_distance, format_route};
pub use runner::{
    generate_batch, generate_batch_with_cancel, AcoResult, AcoRunner, Batch, Improvement,
};
pub use transition::{is_stuck, sample_next, transition_probabilities};
pub use types::{route_cost, Construction, FailureReason, Route};
