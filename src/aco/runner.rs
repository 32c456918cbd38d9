//! Colony execution loop.
//!
//! # Algorithm
//!
//! 1. Check that the goal is reachable, initialize pheromones uniformly
//! 2. Collect an initial batch and seed the best route from its first ant
//! 3. Each iteration:
//!    a. Collect a batch of valid routes against the current pheromones
//!    b. Evaporate, then reinforce every edge of every route by `Q / cost`
//!    c. Replace the best route on strict improvement
//! 4. Stop after `max_iterations` rounds
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::AcoConfig;
use super::construct::build_route;
use super::graph::CostGraph;
use super::pheromone::PheromoneMatrix;
use super::types::{Construction, Route};
use crate::error::AcoError;
use crate::random::{create_rng, rng_from_option};

/// A strict improvement of the best route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Iteration (0-based) in which the better route was found.
    pub iteration: usize,
    /// Cost of the new best route.
    pub cost: f64,
}

/// Result of an ant colony run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best route found. `None` when `num_ants` is 0 or the run was
    /// cancelled before the initial batch completed.
    pub best: Option<Route>,

    /// Cost of the best route, `f64::INFINITY` when there is none.
    pub best_cost: f64,

    /// Iteration at which the best route was found; `None` when it came
    /// from the initial batch.
    pub best_iteration: Option<usize>,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Best cost after the initial batch, then after each iteration. Empty
    /// if cancelled during the initial batch.
    pub cost_history: Vec<f64>,

    /// Every strict improvement, in order.
    pub improvements: Vec<Improvement>,

    /// Total discarded route constructions.
    pub failed_constructions: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Pheromone matrix at the end of the run.
    pub pheromones: PheromoneMatrix,
}

/// Valid routes gathered for one iteration.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    /// One valid route per ant.
    pub routes: Vec<Route>,
    /// Constructions discarded while filling the batch.
    pub failures: usize,
}

/// Executes the ant colony.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for `graph`, if
    /// the goal is unreachable from the start, or if an ant exhausts
    /// `max_attempts_per_ant`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_antpath::aco::{AcoConfig, AcoRunner, CostGraph};
    ///
    /// let graph = CostGraph::from_edges(
    ///     4,
    ///     &[(0, 1, 2.0), (0, 2, 6.0), (1, 2, 9.0), (1, 3, 5.0), (2, 3, 9.0)],
    /// )
    /// .unwrap();
    /// let config = AcoConfig::new(0, 3).with_seed(0);
    ///
    /// let result = AcoRunner::run(&graph, &config).unwrap();
    /// assert_eq!(result.best_cost, 7.0);
    /// ```
    pub fn run(graph: &CostGraph, config: &AcoConfig) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(graph, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// The flag is polled before every iteration and before every route
    /// construction attempt. A batch interrupted by cancellation is
    /// discarded without updating the pheromones.
    pub fn run_with_cancel(
        graph: &CostGraph,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        config.validate_for(graph.node_count())?;
        if !graph.is_reachable(config.start, config.goal) {
            return Err(AcoError::UnreachableGoal {
                start: config.start,
                goal: config.goal,
            });
        }

        tracing::debug!(
            nodes = graph.node_count(),
            ants = config.num_ants,
            iterations = config.max_iterations,
            start = config.start,
            goal = config.goal,
            "starting ant colony"
        );

        let mut rng = rng_from_option(config.seed);
        let mut pheromones = PheromoneMatrix::new(graph.node_count(), config.initial_pheromone);
        let cancel = cancel.as_deref();

        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        let mut improvements = Vec::new();
        let mut iterations = 0usize;
        let mut failed_constructions = 0usize;
        let mut best = None;
        let mut best_cost = f64::INFINITY;
        let mut best_iteration = None;
        let mut cancelled = false;

        // Initial batch seeds the best route without touching pheromones.
        match generate_batch_with_cancel(graph, &pheromones, config, &mut rng, cancel)? {
            Some(initial) => {
                failed_constructions = initial.failures;
                best = initial.routes.into_iter().next();
                best_cost = best.as_ref().map_or(f64::INFINITY, |r| r.cost(graph));
                cost_history.push(best_cost);
            }
            None => cancelled = true,
        }

        for iteration in 0..config.max_iterations {
            if cancelled || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            // A batch interrupted by cancellation is dropped whole, so the
            // pheromones only ever see complete batches.
            let Some(batch) =
                generate_batch_with_cancel(graph, &pheromones, config, &mut rng, cancel)?
            else {
                cancelled = true;
                break;
            };
            failed_constructions += batch.failures;

            pheromones.update(
                &batch.routes,
                graph,
                config.evaporation_rate,
                config.deposit,
                config.pheromone_floor,
            );

            for route in batch.routes {
                let cost = route.cost(graph);
                if cost < best_cost {
                    tracing::info!(iteration, cost, "new best route");
                    best_cost = cost;
                    best = Some(route);
                    best_iteration = Some(iteration);
                    improvements.push(Improvement { iteration, cost });
                }
            }

            cost_history.push(best_cost);
            iterations += 1;
        }

        tracing::debug!(
            best_cost,
            iterations,
            failed_constructions,
            cancelled,
            "ant colony finished"
        );

        Ok(AcoResult {
            best,
            best_cost,
            best_iteration,
            iterations,
            cost_history,
            improvements,
            failed_constructions,
            cancelled,
            pheromones,
        })
    }
}

/// Collects `config.num_ants` valid routes against a frozen pheromone
/// snapshot.
///
/// Each ant draws its own seed from `rng` up front, so the batch is the
/// same whether ants are built serially or in parallel. Failed
/// constructions are retried up to `max_attempts_per_ant` times.
///
/// # Errors
///
/// Returns [`AcoError::InvalidConfig`] if the endpoints fall outside
/// `graph` or `pheromones` does not match its size, and
/// [`AcoError::ConstructionExhausted`] when an ant hits the retry cap.
pub fn generate_batch<R: Rng>(
    graph: &CostGraph,
    pheromones: &PheromoneMatrix,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<Batch, AcoError> {
    let batch = generate_batch_with_cancel(graph, pheromones, config, rng, None)?;
    Ok(batch.unwrap_or_default())
}

/// Like [`generate_batch`], but polls `cancel` before every construction
/// attempt. Returns `Ok(None)` once the flag is observed; the partial batch
/// is discarded.
pub fn generate_batch_with_cancel<R: Rng>(
    graph: &CostGraph,
    pheromones: &PheromoneMatrix,
    config: &AcoConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<Option<Batch>, AcoError> {
    config.validate_for(graph.node_count())?;
    if pheromones.size() != graph.node_count() {
        return Err(AcoError::InvalidConfig(format!(
            "pheromone matrix is {0}x{0}, graph has {1} nodes",
            pheromones.size(),
            graph.node_count()
        )));
    }

    let seeds: Vec<u64> = (0..config.num_ants).map(|_| rng.random()).collect();

    #[cfg(feature = "parallel")]
    let slots: Vec<Result<Option<(Route, usize)>, AcoError>> = if config.parallel {
        use rayon::prelude::*;
        seeds
            .par_iter()
            .map(|&seed| construct_ant(seed, graph, pheromones, config, cancel))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| construct_ant(seed, graph, pheromones, config, cancel))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let slots: Vec<Result<Option<(Route, usize)>, AcoError>> = seeds
        .iter()
        .map(|&seed| construct_ant(seed, graph, pheromones, config, cancel))
        .collect();

    let mut batch = Batch {
        routes: Vec::with_capacity(slots.len()),
        failures: 0,
    };
    for slot in slots {
        let Some((route, failures)) = slot? else {
            return Ok(None);
        };
        batch.routes.push(route);
        batch.failures += failures;
    }
    Ok(Some(batch))
}

/// Builds one ant's route, retrying on failure. `Ok(None)` means the
/// cancellation flag was raised.
fn construct_ant(
    seed: u64,
    graph: &CostGraph,
    pheromones: &PheromoneMatrix,
    config: &AcoConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Option<(Route, usize)>, AcoError> {
    let mut rng = create_rng(seed);

    for attempt in 0..config.max_attempts_per_ant {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Ok(None);
        }
        match build_route(config.start, config.goal, pheromones, graph, config, &mut rng) {
            Construction::Success(route) => return Ok(Some((route, attempt))),
            Construction::Failed { reason } => {
                tracing::trace!(?reason, attempt, "route construction failed");
            }
        }
    }

    Err(AcoError::ConstructionExhausted {
        attempts: config.max_attempts_per_ant,
    })
}
