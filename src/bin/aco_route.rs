//! Runs the colony on the four-city reference graph and prints the route.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_antpath::aco::{format_distance, format_route, AcoConfig, AcoRunner, CostGraph};
use u_antpath::AcoError;

#[derive(Debug, Parser)]
#[command(name = "aco-route", about = "Ant colony routing from A to D")]
struct Args {
    /// Ants (valid routes) per iteration.
    #[arg(long, default_value_t = 10)]
    ants: usize,

    /// Pheromone-update rounds.
    #[arg(long, default_value_t = 200)]
    iterations: usize,

    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Build the ants of a batch in parallel (requires the `parallel` feature).
    #[arg(long)]
    parallel: bool,
}

fn reference_graph() -> Result<CostGraph, AcoError> {
    CostGraph::from_edges(
        4,
        &[(0, 1, 2.0), (0, 2, 6.0), (1, 2, 9.0), (1, 3, 5.0), (2, 3, 9.0)],
    )?
    .with_labels(["A", "B", "C", "D"])
}

fn main() -> Result<(), AcoError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let graph = reference_graph()?;
    let config = AcoConfig::new(0, 3)
        .with_num_ants(args.ants)
        .with_max_iterations(args.iterations)
        .with_parallel(args.parallel)
        .with_seed(args.seed);

    println!(
        "------- ACO over cities A-D, start at {} and goal at {} -------",
        graph.label(config.start),
        graph.label(config.goal)
    );

    let result = AcoRunner::run(&graph, &config)?;

    for improvement in &result.improvements {
        println!(
            "New best length: {} at iteration {}",
            improvement.cost, improvement.iteration
        );
    }

    println!("\n--- Best route found ---");
    match &result.best {
        Some(route) => {
            println!("{}", format_route(route, &graph));
            println!("Total distance: {} km", format_distance(result.best_cost));
        }
        None => println!("no ants were dispatched"),
    }

    Ok(())
}
