//! Text rendering of routes and distances.

use super::graph::CostGraph;
use super::types::Route;

/// Joins the node labels of `route` with `-->`.
///
/// ```
/// use u_antpath::aco::{format_route, CostGraph, Route};
///
/// let g = CostGraph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)])
///     .unwrap()
///     .with_labels(["A", "B", "C"])
///     .unwrap();
/// let route = Route::try_from(vec![0, 1, 2]).unwrap();
/// assert_eq!(format_route(&route, &g), "A-->B-->C");
/// ```
pub fn format_route(route: &Route, graph: &CostGraph) -> String {
    route
        .nodes()
        .iter()
        .map(|&n| graph.label(n))
        .collect::<Vec<_>>()
        .join("-->")
}

/// Renders a distance with one decimal place.
pub fn format_distance(cost: f64) -> String {
    format!("{cost:.1}")
}
