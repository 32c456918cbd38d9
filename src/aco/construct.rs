//! Single-ant route construction.

use rand::Rng;

use super::config::AcoConfig;
use super::graph::CostGraph;
use super::pheromone::PheromoneMatrix;
use super::transition::{is_stuck, sample_next, transition_probabilities};
use super::types::{Construction, FailureReason, Route};

/// Walks one ant from `start` until it reaches `goal` or gets trapped.
///
/// The ant starts at `start` with `start` marked visited. Each step samples
/// the next node from [`transition_probabilities`]. Construction fails when
/// the distribution is empty, when the sample is already visited, or when
/// the sampled step has no edge. The visited set bounds the walk to
/// `node_count` steps.
///
/// `start == goal` succeeds immediately with a single-node route.
///
/// # Panics
///
/// Panics if `start` is outside `graph`, or if `pheromones` is smaller than
/// `graph`. [`generate_batch`](super::generate_batch) checks both and
/// returns [`AcoError::InvalidConfig`](crate::AcoError::InvalidConfig)
/// instead.
pub fn build_route<R: Rng>(
    start: usize,
    goal: usize,
    pheromones: &PheromoneMatrix,
    graph: &CostGraph,
    config: &AcoConfig,
    rng: &mut R,
) -> Construction {
    let mut route = Route::single(start);
    let mut visited = vec![false; graph.node_count()];
    visited[start] = true;
    let mut current = start;

    while current != goal {
        let probs =
            transition_probabilities(current, &visited, pheromones, graph, config.alpha, config.beta);
        if is_stuck(&probs) {
            return Construction::Failed {
                reason: FailureReason::Stuck { at: current },
            };
        }

        let next = sample_next(&probs, rng);
        if visited[next] {
            return Construction::Failed {
                reason: FailureReason::Revisit { node: next },
            };
        }
        if !graph.has_edge(current, next) {
            return Construction::Failed {
                reason: FailureReason::MissingEdge {
                    from: current,
                    to: next,
                },
            };
        }

        route.push(next);
        visited[next] = true;
        current = next;
    }

    Construction::Success(route)
}
