//! Pheromone matrix: evaporation and reinforcement.

use super::graph::CostGraph;
use super::types::Route;
use crate::error::AcoError;

/// N×N matrix of strictly positive trail intensities.
///
/// Values never drop below the configured floor, so transition masses
/// over existing edges are never all zero before the visited set is
/// exhausted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PheromoneRepr", into = "PheromoneRepr"))]
pub struct PheromoneMatrix {
    n: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n`×`n` matrix filled with `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            values: vec![initial; n * n],
        }
    }

    /// Rebuilds an `n`×`n` matrix from row-major `values`.
    ///
    /// Fails unless there are exactly `n * n` values, all finite and
    /// non-negative.
    pub fn from_values(n: usize, values: Vec<f64>) -> Result<Self, AcoError> {
        if values.len() != n * n {
            return Err(AcoError::InvalidPheromones(format!(
                "expected {} values for a {n}x{n} matrix, got {}",
                n * n,
                values.len()
            )));
        }
        if let Some(v) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(AcoError::InvalidPheromones(format!(
                "pheromone values must be finite and non-negative, got {v}"
            )));
        }
        Ok(Self { n, values })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Trail intensity on `from → to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }

    /// Iterates over all cells in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Multiplies every cell by `1 - rho`, clamping at `floor`.
    pub fn evaporate(&mut self, rho: f64, floor: f64) {
        let keep = 1.0 - rho;
        for v in &mut self.values {
            *v = (*v * keep).max(floor);
        }
    }

    /// Adds `amount` to every edge of `route`; mirrored onto the reverse
    /// cell when `symmetric`.
    pub fn deposit(&mut self, route: &Route, amount: f64, symmetric: bool) {
        for (a, b) in route.edges() {
            self.values[a * self.n + b] += amount;
            if symmetric {
                self.values[b * self.n + a] += amount;
            }
        }
    }

    /// Applies one round of evaporation followed by `deposit / cost`
    /// reinforcement from each route of `batch`.
    ///
    /// An empty batch leaves the matrix untouched. Routes over a missing
    /// edge or with zero cost deposit nothing.
    pub fn update(
        &mut self,
        batch: &[Route],
        graph: &CostGraph,
        evaporation_rate: f64,
        deposit: f64,
        floor: f64,
    ) {
        if batch.is_empty() {
            return;
        }

        self.evaporate(evaporation_rate, floor);

        let symmetric = graph.is_symmetric();
        for route in batch {
            let cost = route.cost(graph);
            if !cost.is_finite() || cost <= 0.0 {
                continue;
            }
            self.deposit(route, deposit / cost, symmetric);
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PheromoneRepr {
    n: usize,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<PheromoneRepr> for PheromoneMatrix {
    type Error = AcoError;

    fn try_from(repr: PheromoneRepr) -> Result<Self, Self::Error> {
        Self::from_values(repr.n, repr.values)
    }
}

#[cfg(feature = "serde")]
impl From<PheromoneMatrix> for PheromoneRepr {
    fn from(m: PheromoneMatrix) -> Self {
        Self {
            n: m.n,
            values: m.values,
        }
    }
}
