//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the initial assignment is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Global cheapest insertion over every vehicle and position.
    #[default]
    CheapestInsertion,
    /// Each vehicle extends its path to the nearest node that still fits.
    PathCheapestArc,
}

/// What happens after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImprovementStrategy {
    /// Return the constructed routes as they are.
    ConstructionOnly,
    /// Apply improving moves until none is left or the budget runs out.
    LocalSearch {
        /// Maximum number of applied moves.
        max_iterations: usize,
    },
}

impl Default for ImprovementStrategy {
    fn default() -> Self {
        ImprovementStrategy::LocalSearch {
            max_iterations: 1000,
        }
    }
}

/// Parameters of one solve call.
///
/// # Examples
///
/// ```
/// use u_delivery::search::{FirstSolutionStrategy, ImprovementStrategy, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_first_solution(FirstSolutionStrategy::PathCheapestArc)
///     .with_max_iterations(50)
///     .with_time_limit_ms(200);
/// assert_eq!(
///     config.improvement,
///     ImprovementStrategy::LocalSearch { max_iterations: 50 }
/// );
/// assert_eq!(config.time_limit_ms, Some(200));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Construction heuristic.
    pub first_solution: FirstSolutionStrategy,
    /// Improvement phase.
    pub improvement: ImprovementStrategy,
    /// Wall-clock ceiling for the improvement phase, in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl SearchConfig {
    /// Configuration that skips the improvement phase.
    pub fn construction_only() -> Self {
        Self {
            improvement: ImprovementStrategy::ConstructionOnly,
            ..Self::default()
        }
    }

    /// Sets the construction heuristic.
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    /// Sets the improvement phase.
    pub fn with_improvement(mut self, strategy: ImprovementStrategy) -> Self {
        self.improvement = strategy;
        self
    }

    /// Enables local search with the given iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.improvement = ImprovementStrategy::LocalSearch { max_iterations };
        self
    }

    /// Sets a wall-clock ceiling for the improvement phase.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// The time limit as a [`Duration`].
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
