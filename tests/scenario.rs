//! End-to-end runs on the four-city reference graph.
//!
//! ```text
//!   A --2-- B
//!   |     / |
//!   6   9   5
//!   | /     |
//!   C --9-- D        (no A-D edge)
//! ```

use u_antpath::aco::{
    format_distance, format_route, generate_batch, AcoConfig, AcoRunner, CostGraph,
    PheromoneMatrix, NO_EDGE,
};
use u_antpath::random::create_rng;

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;

fn reference_graph() -> CostGraph {
    CostGraph::new(vec![
        vec![0.0, 2.0, 6.0, NO_EDGE],
        vec![2.0, 0.0, 9.0, 5.0],
        vec![6.0, 9.0, 0.0, 9.0],
        vec![NO_EDGE, 5.0, 9.0, 0.0],
    ])
    .unwrap()
    .with_labels(["A", "B", "C", "D"])
    .unwrap()
}

#[test]
fn test_reference_converges_to_a_b_d() {
    let graph = reference_graph();
    let config = AcoConfig::new(A, D).with_seed(0);

    let result = AcoRunner::run(&graph, &config).unwrap();
    let best = result.best.expect("ants were dispatched");

    assert_eq!(best.nodes(), &[A, B, D]);
    assert_eq!(format_route(&best, &graph), "A-->B-->D");
    assert_eq!(format_distance(result.best_cost), "7.0");
}

#[test]
fn test_reference_converges_for_many_seeds() {
    let graph = reference_graph();
    for seed in 0..20 {
        let config = AcoConfig::new(A, D).with_max_iterations(50).with_seed(seed);
        let result = AcoRunner::run(&graph, &config).unwrap();
        assert!(
            (result.best_cost - 7.0).abs() < 1e-10,
            "seed {seed}: expected 7, got {}",
            result.best_cost
        );
    }
}

#[test]
fn test_reference_routes_use_only_allowed_shapes() {
    let graph = reference_graph();
    let config = AcoConfig::new(A, D)
        .with_num_ants(200)
        .with_alpha(0.0)
        .with_beta(0.0);
    let pheromones = PheromoneMatrix::new(4, config.initial_pheromone);
    let mut rng = create_rng(17);

    let batch = generate_batch(&graph, &pheromones, &config, &mut rng).unwrap();

    let allowed: [&[usize]; 4] = [&[A, B, D], &[A, B, C, D], &[A, C, D], &[A, C, B, D]];
    for route in &batch.routes {
        assert!(
            allowed.contains(&route.nodes()),
            "unexpected route {:?}",
            route.nodes()
        );
        assert!(route.cost(&graph).is_finite());
    }
}

#[test]
fn test_reference_reinforces_shortest_route() {
    let graph = reference_graph();
    let config = AcoConfig::new(A, D).with_seed(3);

    let result = AcoRunner::run(&graph, &config).unwrap();

    // A-B carries the bulk of deposits; A-C should trail it.
    assert!(result.pheromones.get(A, B) > result.pheromones.get(A, C));
    assert!(result.pheromones.get(B, D) > result.pheromones.get(C, D));
    assert_eq!(result.pheromones.get(A, B), result.pheromones.get(B, A));
}
