//! Immutable cost graph.

use std::collections::VecDeque;

use crate::error::AcoError;

/// Sentinel cost marking a missing edge.
pub const NO_EDGE: f64 = f64::INFINITY;

/// An N×N matrix of edge costs with optional display labels.
///
/// Missing edges carry [`NO_EDGE`]. The diagonal is always zero and every
/// existing off-diagonal edge has a strictly positive cost, so the
/// heuristic `1 / cost` is always finite.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::{CostGraph, NO_EDGE};
///
/// let graph = CostGraph::new(vec![
///     vec![0.0, 2.0, NO_EDGE],
///     vec![2.0, 0.0, 5.0],
///     vec![NO_EDGE, 5.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(graph.node_count(), 3);
/// assert!(graph.has_edge(0, 1));
/// assert!(!graph.has_edge(0, 2));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CostGraphRepr", into = "CostGraphRepr"))]
pub struct CostGraph {
    costs: Vec<Vec<f64>>,
    labels: Vec<String>,
    symmetric: bool,
}

impl CostGraph {
    /// Builds a graph from a full cost matrix.
    ///
    /// Fails if the matrix is empty or not square, if a diagonal entry is
    /// non-zero, or if an off-diagonal entry is NaN, negative, or zero.
    pub fn new(costs: Vec<Vec<f64>>) -> Result<Self, AcoError> {
        let n = costs.len();
        if n == 0 {
            return Err(AcoError::InvalidGraph("graph must have at least one node".into()));
        }

        for (i, row) in costs.iter().enumerate() {
            if row.len() != n {
                return Err(AcoError::InvalidGraph(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &c) in row.iter().enumerate() {
                if i == j {
                    if c != 0.0 {
                        return Err(AcoError::InvalidGraph(format!(
                            "diagonal cost at ({i}, {i}) must be 0, got {c}"
                        )));
                    }
                } else if c.is_nan() || c <= 0.0 {
                    return Err(AcoError::InvalidGraph(format!(
                        "edge cost at ({i}, {j}) must be positive, got {c}"
                    )));
                }
            }
        }

        let symmetric = (0..n).all(|i| (i + 1..n).all(|j| costs[i][j] == costs[j][i]));
        let labels = (0..n).map(|i| i.to_string()).collect();

        Ok(Self {
            costs,
            labels,
            symmetric,
        })
    }

    /// Builds an undirected graph on `n` nodes from `(i, j, cost)` triples.
    ///
    /// Pairs that are not listed have no edge.
    pub fn from_edges(n: usize, edges: &[(usize, usize, f64)]) -> Result<Self, AcoError> {
        let mut costs = vec![vec![NO_EDGE; n]; n];
        for (i, row) in costs.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for &(i, j, c) in edges {
            if i >= n || j >= n {
                return Err(AcoError::InvalidGraph(format!(
                    "edge ({i}, {j}) references a node outside 0..{n}"
                )));
            }
            if i == j {
                return Err(AcoError::InvalidGraph(format!("self-loop on node {i}")));
            }
            costs[i][j] = c;
            costs[j][i] = c;
        }
        Self::new(costs)
    }

    /// Attaches display labels, one per node.
    pub fn with_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, AcoError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.node_count() {
            return Err(AcoError::InvalidGraph(format!(
                "expected {} labels, got {}",
                self.node_count(),
                labels.len()
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.costs.len()
    }

    /// Cost of the edge `from → to`, [`NO_EDGE`] when absent.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from][to]
    }

    /// Whether `from → to` is an existing edge.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.costs[from][to] != NO_EDGE
    }

    /// Whether `cost(i, j) == cost(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Display label of a node.
    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Whether `goal` can be reached from `start` over existing edges.
    pub fn is_reachable(&self, start: usize, goal: usize) -> bool {
        let n = self.node_count();
        if start >= n || goal >= n {
            return false;
        }
        if start == goal {
            return true;
        }

        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for next in 0..n {
                if seen[next] || next == node || !self.has_edge(node, next) {
                    continue;
                }
                if next == goal {
                    return true;
                }
                seen[next] = true;
                queue.push_back(next);
            }
        }
        false
    }
}

/// Serialized form; the symmetry flag is recomputed on load.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CostGraphRepr {
    costs: Vec<Vec<f64>>,
    labels: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<CostGraphRepr> for CostGraph {
    type Error = AcoError;

    fn try_from(repr: CostGraphRepr) -> Result<Self, Self::Error> {
        CostGraph::new(repr.costs)?.with_labels(repr.labels)
    }
}

#[cfg(feature = "serde")]
impl From<CostGraph> for CostGraphRepr {
    fn from(graph: CostGraph) -> Self {
        Self {
            costs: graph.costs,
            labels: graph.labels,
        }
    }
}
