//! Transition probabilities and roulette-wheel sampling.

use rand::Rng;

use super::graph::CostGraph;
use super::pheromone::PheromoneMatrix;

/// Probability of moving from `current` to each node.
///
/// Node `i` gets mass `tau(current, i)^alpha * (1 / cost(current, i))^beta`
/// unless it is `current`, already visited, or not connected, in which
/// case its mass is 0. Masses are normalized to sum to 1.
///
/// Masses are formed in log space and shifted by their maximum before
/// exponentiation, so large exponents neither underflow nor overflow.
///
/// When no node is eligible the all-zero vector is returned; callers treat
/// it as the ant being stuck.
pub fn transition_probabilities(
    current: usize,
    visited: &[bool],
    pheromones: &PheromoneMatrix,
    graph: &CostGraph,
    alpha: f64,
    beta: f64,
) -> Vec<f64> {
    let n = graph.node_count();
    let mut log_masses = vec![f64::NEG_INFINITY; n];
    let mut max_log = f64::NEG_INFINITY;

    for (i, log_mass) in log_masses.iter_mut().enumerate() {
        if i == current || visited[i] || !graph.has_edge(current, i) {
            continue;
        }
        *log_mass = weighted_ln(pheromones.get(current, i), alpha)
            - weighted_ln(graph.cost(current, i), beta);
        max_log = max_log.max(*log_mass);
    }

    let mut probs = vec![0.0; n];
    if max_log == f64::NEG_INFINITY {
        return probs;
    }

    let mut sum = 0.0;
    for (p, &log_mass) in probs.iter_mut().zip(&log_masses) {
        if log_mass != f64::NEG_INFINITY {
            *p = (log_mass - max_log).exp();
            sum += *p;
        }
    }
    for p in &mut probs {
        *p /= sum;
    }
    probs
}

/// `exponent * ln(base)`, with a zero exponent contributing nothing even
/// when `base` is 0.
fn weighted_ln(base: f64, exponent: f64) -> f64 {
    if exponent == 0.0 {
        0.0
    } else {
        exponent * base.ln()
    }
}

/// Whether `distribution` carries no mass at all.
pub fn is_stuck(distribution: &[f64]) -> bool {
    distribution.iter().all(|&p| p == 0.0)
}

/// Draws a node index from `distribution`.
///
/// A uniform `r` in `[0, 1)` selects the node whose cumulative interval
/// `[acc_i, acc_i + p_i)` contains it. If rounding leaves `r` past the
/// last interval the last index is returned.
pub fn sample_next<R: Rng>(distribution: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.random_range(0.0..1.0);
    select_index(distribution, r)
}

fn select_index(distribution: &[f64], r: f64) -> usize {
    let mut acc = 0.0;
    for (i, &p) in distribution.iter().enumerate() {
        let next = acc + p;
        if r >= acc && r < next {
            return i;
        }
        acc = next;
    }
    distribution.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn graph() -> CostGraph {
        CostGraph::from_edges(
            4,
            &[(0, 1, 2.0), (0, 2, 6.0), (1, 2, 9.0), (1, 3, 5.0), (2, 3, 9.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_probabilities_normalized() {
        let g = graph();
        let p = PheromoneMatrix::new(4, 0.01);
        let mut visited = vec![false; 4];
        visited[0] = true;

        let probs = transition_probabilities(0, &visited, &p, &g, 3.0, 2.0);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(probs[0], 0.0);
        assert_eq!(probs[3], 0.0, "no edge from A to D");

        // Uniform pheromone: ratio follows (1/2)^2 : (1/6)^2 = 9 : 1
        assert!((probs[1] - 0.9).abs() < 1e-12);
        assert!((probs[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_visited_nodes_get_no_mass() {
        let g = graph();
        let p = PheromoneMatrix::new(4, 0.01);
        let visited = vec![true, true, false, false];

        let probs = transition_probabilities(1, &visited, &p, &g, 1.0, 1.0);
        assert_eq!(probs[0], 0.0);
        assert_eq!(probs[1], 0.0);
        assert!(probs[2] > 0.0 && probs[3] > 0.0);
    }

    #[test]
    fn test_stuck_returns_all_zero() {
        let g = graph();
        let p = PheromoneMatrix::new(4, 0.01);
        let visited = vec![true, true, true, false];

        // From A, only B and C are neighbours and both are visited.
        let probs = transition_probabilities(0, &visited, &p, &g, 3.0, 2.0);
        assert!(is_stuck(&probs));
    }

    #[test]
    fn test_zero_exponents_are_uniform() {
        let g = graph();
        let p = PheromoneMatrix::new(4, 0.01);
        let visited = vec![false, true, false, false];

        let probs = transition_probabilities(1, &visited, &p, &g, 0.0, 0.0);
        assert!((probs[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((probs[2] - 1.0 / 3.0).abs() < 1e-12);
        assert!((probs[3] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_alpha_keeps_distribution() {
        let g = graph();
        let p = PheromoneMatrix::new(4, 0.01);
        let mut visited = vec![false; 4];
        visited[0] = true;

        // 0.01^200 underflows f64; the ratio still follows the heuristic.
        let probs = transition_probabilities(0, &visited, &p, &g, 200.0, 2.0);
        assert!(!is_stuck(&probs));
        assert_eq!(probs[0], 0.0);
        assert!((probs[1] - 0.9).abs() < 1e-12, "got {probs:?}");
        assert!((probs[2] - 0.1).abs() < 1e-12, "got {probs:?}");
        assert_eq!(probs[3], 0.0);
    }

    #[test]
    fn test_large_exponents_favor_strongest_trail() {
        let g = graph();
        let mut p = PheromoneMatrix::new(4, 0.01);
        p.deposit(&crate::aco::Route::try_from(vec![0, 2]).unwrap(), 1.0, true);
        let visited = vec![true, false, false, false];

        let probs = transition_probabilities(0, &visited, &p, &g, 500.0, 500.0);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[2] > 0.99, "got {probs:?}");
    }

    #[test]
    fn test_select_index_intervals() {
        let dist = [0.0, 0.25, 0.75, 0.0];
        assert_eq!(select_index(&dist, 0.0), 1);
        assert_eq!(select_index(&dist, 0.2499), 1);
        assert_eq!(select_index(&dist, 0.25), 2);
        assert_eq!(select_index(&dist, 0.9999), 2);
    }

    #[test]
    fn test_select_index_falls_back_to_last() {
        let dist = [0.3, 0.3, 0.3];
        assert_eq!(select_index(&dist, 0.95), 2);
        assert_eq!(select_index(&[0.0, 0.0], 0.5), 1);
    }

    #[test]
    fn test_sample_next_never_picks_zero_mass() {
        let mut rng = create_rng(42);
        let dist = [0.0, 0.5, 0.0, 0.5];
        for _ in 0..1000 {
            let i = sample_next(&dist, &mut rng);
            assert!(i == 1 || i == 3, "sampled zero-mass node {i}");
        }
    }

    #[test]
    fn test_sample_next_frequencies() {
        let mut rng = create_rng(7);
        let dist = [0.9, 0.1];
        let hits = (0..10_000)
            .filter(|_| sample_next(&dist, &mut rng) == 0)
            .count();
        let ratio = hits as f64 / 10_000.0;
        assert!((ratio - 0.9).abs() < 0.03, "expected ~0.9, got {ratio}");
    }
}
