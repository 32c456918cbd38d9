//! Routes, route evaluation, and construction outcomes.

use super::graph::{CostGraph, NO_EDGE};
use crate::error::AcoError;

/// An ordered, non-empty sequence of node indices.
///
/// A route is *valid* for a `(start, goal)` pair when it begins at
/// `start`, ends at `goal`, repeats no node, and uses only existing edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    /// A route consisting of a single node.
    pub fn single(node: usize) -> Self {
        Self { nodes: vec![node] }
    }

    pub(crate) fn push(&mut self, node: usize) {
        self.nodes.push(node);
    }

    /// The visited nodes in order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of nodes (not edges).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the route has no nodes; never true for a constructed route.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node.
    pub fn first(&self) -> usize {
        self.nodes[0]
    }

    /// Last node.
    pub fn last(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Consecutive `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total cost on `graph`; see [`route_cost`].
    pub fn cost(&self, graph: &CostGraph) -> f64 {
        route_cost(&self.nodes, graph)
    }

    /// Checks the validity conditions against `graph`.
    pub fn is_valid(&self, start: usize, goal: usize, graph: &CostGraph) -> bool {
        if self.first() != start || self.last() != goal {
            return false;
        }
        let n = graph.node_count();
        let mut seen = vec![false; n];
        for &node in &self.nodes {
            if node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        self.edges().all(|(a, b)| graph.has_edge(a, b))
    }
}

impl TryFrom<Vec<usize>> for Route {
    type Error = AcoError;

    fn try_from(nodes: Vec<usize>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            return Err(AcoError::EmptyRoute);
        }
        Ok(Self { nodes })
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.nodes
    }
}

/// Total cost of walking `nodes` on `graph`.
///
/// A single node costs 0. If any step uses a missing edge the result is
/// [`NO_EDGE`], never a finite partial sum.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::{route_cost, CostGraph, NO_EDGE};
///
/// let g = CostGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 5.0)]).unwrap();
/// assert_eq!(route_cost(&[0, 1, 2], &g), 7.0);
/// assert_eq!(route_cost(&[0, 2], &g), NO_EDGE);
/// ```
pub fn route_cost(nodes: &[usize], graph: &CostGraph) -> f64 {
    let mut total = 0.0;
    for w in nodes.windows(2) {
        let c = graph.cost(w[0], w[1]);
        if c == NO_EDGE {
            return NO_EDGE;
        }
        total += c;
    }
    total
}

/// Why a single route construction was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Every neighbour of `at` is visited or unreachable.
    Stuck {
        /// Node the ant was standing on.
        at: usize,
    },
    /// The sampled node was already on the route.
    Revisit {
        /// The repeated node.
        node: usize,
    },
    /// The sampled step has no edge.
    MissingEdge {
        /// Current node.
        from: usize,
        /// Sampled node.
        to: usize,
    },
}

/// Outcome of one route construction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Construction {
    /// A valid route from start to goal.
    Success(Route),
    /// The ant got trapped; the partial route is discarded.
    Failed {
        /// Cause of the failure.
        reason: FailureReason,
    },
}

impl Construction {
    /// Returns the route on success.
    pub fn into_route(self) -> Option<Route> {
        match self {
            Construction::Success(route) => Some(route),
            Construction::Failed { .. } => None,
        }
    }

    /// Whether construction reached the goal.
    pub fn is_success(&self) -> bool {
        matches!(self, Construction::Success(_))
    }
}
