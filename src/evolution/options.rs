//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of one run:
//! population and elite sizes, operator rates and kinds, the iteration budget,
//! the evaluation backend and its worker count, an optional seed and the
//! logging level.
//!
//! ## Example
//!
//! ```rust
//! use gaforge::evolution::options::{EvolutionOptions, LogLevel};
//! use gaforge::selection::SelectionKind;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(40)
//!     .elite_size(2)
//!     .selection(SelectionKind::Tournament { size: 3 })
//!     .max_iterations(200)
//!     .seed(7)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_population_size(), 40);
//! ```
//!
//! ## Validation
//!
//! `validate` rejects, with a configuration error, a zero population size, an
//! elite larger than the population, rates outside `[0, 1]`, a tournament of
//! size 0, a zero iteration budget and a zero worker count. The launcher
//! validates before the first generation runs, skipping the tournament size
//! when a custom selection strategy replaces the configured one.

use crate::crossover::CrossoverKind;
use crate::error::{GeneticError, Result};
use crate::evaluation::EvaluationBackend;
use crate::selection::SelectionKind;

/// How much the driver reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Generation statistics plus every individual.
    Verbose,
    /// Generation statistics only.
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    elite_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    crossover: CrossoverKind,
    selection: SelectionKind,
    max_iterations: usize,
    backend: EvaluationBackend,
    worker_count: usize,
    seed: Option<u64>,
    log_level: LogLevel,
}

impl EvolutionOptions {
    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elite_size(&self) -> usize {
        self.elite_size
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover(&self) -> CrossoverKind {
        self.crossover
    }

    pub fn get_selection(&self) -> SelectionKind {
        self.selection
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_backend(&self) -> EvaluationBackend {
        self.backend
    }

    pub fn get_worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Number of offspring bred per generation.
    pub fn get_num_offspring(&self) -> usize {
        self.population_size.saturating_sub(self.elite_size)
    }

    /// Checks every option against its allowed range.
    pub fn validate(&self) -> Result<()> {
        self.validate_run()?;
        self.validate_selection()
    }

    /// Checks everything except the selection kind, which only matters when
    /// the launcher builds the selection strategy from these options.
    pub(crate) fn validate_run(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.elite_size > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elite size ({}) cannot exceed population size ({})",
                self.elite_size, self.population_size
            )));
        }

        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GeneticError::Configuration(format!(
                "Crossover rate {} is outside [0, 1]",
                self.crossover_rate
            )));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate {} is outside [0, 1]",
                self.mutation_rate
            )));
        }

        if self.max_iterations == 0 {
            return Err(GeneticError::Configuration(
                "Maximum iterations cannot be zero".to_string(),
            ));
        }

        if self.worker_count == 0 {
            return Err(GeneticError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn validate_selection(&self) -> Result<()> {
        if let SelectionKind::Tournament { size: 0 } = self.selection {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        EvolutionOptionsBuilder::default().build()
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the defaults of the reference experiment: population 100,
/// elite 10, crossover rate 0.8, mutation rate 0.005, one-point crossover,
/// roulette selection, 1000 iterations, a worker pool sized to the machine.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    elite_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    crossover: Option<CrossoverKind>,
    selection: Option<SelectionKind>,
    max_iterations: Option<usize>,
    backend: Option<EvaluationBackend>,
    worker_count: Option<usize>,
    seed: Option<u64>,
    log_level: Option<LogLevel>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn elite_size(mut self, value: usize) -> Self {
        self.elite_size = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover(mut self, value: CrossoverKind) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn selection(mut self, value: SelectionKind) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    pub fn backend(mut self, value: EvaluationBackend) -> Self {
        self.backend = Some(value);
        self
    }

    pub fn worker_count(mut self, value: usize) -> Self {
        self.worker_count = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance. Call `validate` (or let the
    /// launcher do it) before running.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(100),
            elite_size: self.elite_size.unwrap_or(10),
            crossover_rate: self.crossover_rate.unwrap_or(0.8),
            mutation_rate: self.mutation_rate.unwrap_or(0.005),
            crossover: self.crossover.unwrap_or_default(),
            selection: self.selection.unwrap_or_default(),
            max_iterations: self.max_iterations.unwrap_or(1000),
            backend: self.backend.unwrap_or_default(),
            worker_count: self.worker_count.unwrap_or_else(default_worker_count),
            seed: self.seed,
            log_level: self.log_level.unwrap_or_default(),
        }
    }
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
