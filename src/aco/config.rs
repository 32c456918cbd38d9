//! ACO configuration.

use crate::error::AcoError;

/// Configuration for the ant colony.
///
/// All exponents and constants live here and are passed into the runner
/// as an immutable value. Defaults reproduce the classic small-graph
/// setting: 10 ants, 200 iterations, `alpha = 3`, `beta = 2`,
/// `rho = 0.01`, `Q = 2`, initial pheromone 0.01.
///
/// # Examples
///
/// ```
/// use u_antpath::aco::AcoConfig;
///
/// let config = AcoConfig::new(0, 3)
///     .with_num_ants(20)
///     .with_max_iterations(100)
///     .with_alpha(1.0)
///     .with_beta(2.5)
///     .with_evaporation_rate(0.1)
///     .with_seed(42);
/// assert_eq!(config.num_ants, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Node the ants start from.
    pub start: usize,

    /// Node the ants must reach.
    pub goal: usize,

    /// Valid routes collected per iteration (batch size).
    pub num_ants: usize,

    /// Number of pheromone-update rounds.
    pub max_iterations: usize,

    /// Pheromone weight exponent. Must be non-negative.
    pub alpha: f64,

    /// Heuristic (`1 / cost`) weight exponent. Must be non-negative.
    pub beta: f64,

    /// Evaporation rate `rho` in (0, 1). Each round every cell is
    /// multiplied by `1 - rho`.
    pub evaporation_rate: f64,

    /// Deposit constant `Q`. A route of cost `L` deposits `Q / L` on
    /// each of its edges.
    pub deposit: f64,

    /// Uniform starting pheromone level. Must be positive.
    pub initial_pheromone: f64,

    /// Lower bound applied after evaporation. Must be positive and not
    /// above `initial_pheromone`.
    pub pheromone_floor: f64,

    /// Consecutive failed constructions tolerated per ant before the run
    /// aborts with [`AcoError::ConstructionExhausted`].
    pub max_attempts_per_ant: usize,

    /// Whether to construct the routes of a batch in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl AcoConfig {
    /// Creates a configuration routing from `start` to `goal`.
    pub fn new(start: usize, goal: usize) -> Self {
        Self {
            start,
            goal,
            num_ants: 10,
            max_iterations: 200,
            alpha: 3.0,
            beta: 2.0,
            evaporation_rate: 0.01,
            deposit: 2.0,
            initial_pheromone: 0.01,
            pheromone_floor: 1e-12,
            max_attempts_per_ant: 10_000,
            parallel: false,
            seed: None,
        }
    }

    pub fn with_endpoints(mut self, start: usize, goal: usize) -> Self {
        self.start = start;
        self.goal = goal;
        self
    }

    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    pub fn with_deposit(mut self, q: f64) -> Self {
        self.deposit = q;
        self
    }

    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    pub fn with_pheromone_floor(mut self, floor: f64) -> Self {
        self.pheromone_floor = floor;
        self
    }

    pub fn with_max_attempts_per_ant(mut self, n: usize) -> Self {
        self.max_attempts_per_ant = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates parameter domains.
    pub fn validate(&self) -> Result<(), AcoError> {
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(invalid(format!("alpha must be non-negative, got {}", self.alpha)));
        }
        if !(self.beta >= 0.0 && self.beta.is_finite()) {
            return Err(invalid(format!("beta must be non-negative, got {}", self.beta)));
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(invalid(format!(
                "evaporation_rate must be in (0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !(self.deposit > 0.0 && self.deposit.is_finite()) {
            return Err(invalid(format!("deposit must be positive, got {}", self.deposit)));
        }
        if !(self.initial_pheromone > 0.0 && self.initial_pheromone.is_finite()) {
            return Err(invalid(format!(
                "initial_pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        if !(self.pheromone_floor > 0.0) {
            return Err(invalid(format!(
                "pheromone_floor must be positive, got {}",
                self.pheromone_floor
            )));
        }
        if self.pheromone_floor > self.initial_pheromone {
            return Err(invalid(
                "pheromone_floor must not exceed initial_pheromone".into(),
            ));
        }
        if self.max_attempts_per_ant == 0 {
            return Err(invalid("max_attempts_per_ant must be at least 1".into()));
        }
        Ok(())
    }

    /// Validates parameters and checks that both endpoints exist in a
    /// graph of `node_count` nodes.
    pub fn validate_for(&self, node_count: usize) -> Result<(), AcoError> {
        self.validate()?;
        if self.start >= node_count {
            return Err(invalid(format!(
                "start node {} out of range 0..{node_count}",
                self.start
            )));
        }
        if self.goal >= node_count {
            return Err(invalid(format!(
                "goal node {} out of range 0..{node_count}",
                self.goal
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> AcoError {
    AcoError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::new(0, 3);
        assert_eq!(config.num_ants, 10);
        assert_eq!(config.max_iterations, 200);
        assert!((config.alpha - 3.0).abs() < 1e-10);
        assert!((config.beta - 2.0).abs() < 1e-10);
        assert!((config.evaporation_rate - 0.01).abs() < 1e-10);
        assert!((config.deposit - 2.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 0.01).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::new(0, 1).validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AcoConfig::new(0, 1)
            .with_endpoints(2, 3)
            .with_num_ants(5)
            .with_max_iterations(50)
            .with_deposit(10.0)
            .with_initial_pheromone(0.5)
            .with_pheromone_floor(1e-6)
            .with_max_attempts_per_ant(20)
            .with_parallel(true)
            .with_seed(123);

        assert_eq!((config.start, config.goal), (2, 3));
        assert_eq!(config.num_ants, 5);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.max_attempts_per_ant, 20);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate_bad_evaporation() {
        assert!(AcoConfig::new(0, 1).with_evaporation_rate(0.0).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_evaporation_rate(1.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_exponents() {
        assert!(AcoConfig::new(0, 1).with_alpha(-1.0).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_beta(f64::NAN).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_alpha(0.0).with_beta(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_pheromone() {
        assert!(AcoConfig::new(0, 1).with_deposit(0.0).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_initial_pheromone(0.0).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_pheromone_floor(0.0).validate().is_err());
        assert!(AcoConfig::new(0, 1).with_pheromone_floor(1.0).validate().is_err());
    }

    #[test]
    fn test_validate_for_node_range() {
        let config = AcoConfig::new(0, 4);
        assert!(config.validate_for(5).is_ok());
        assert!(matches!(
            config.validate_for(4),
            Err(AcoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_attempts() {
        assert!(AcoConfig::new(0, 1).with_max_attempts_per_ant(0).validate().is_err());
    }
}
