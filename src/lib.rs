//! # gaforge
//!
//! A generic genetic-algorithm engine. Problems plug in through the
//! [`Solution`] trait; the engine supplies chromosomes over a declared
//! alphabet, crossover, mutation, selection, population statistics, a
//! parallel fitness evaluator and a generational driver that yields each
//! settled population lazily.
//!
//! ```rust
//! use gaforge::chromosome::{Binary, BinaryChromosome, Chromosome};
//! use gaforge::evaluation::EvaluationBackend;
//! use gaforge::evolution::{EvolutionLauncher, EvolutionOptions};
//! use gaforge::rng::RandomNumberGenerator;
//! use gaforge::Solution;
//!
//! #[derive(Clone, Debug, Default)]
//! struct OneMax {
//!     bits: Vec<u8>,
//! }
//!
//! impl Solution for OneMax {
//!     type Alphabet = Binary;
//!
//!     fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> BinaryChromosome {
//!         Chromosome::initialize(8, Binary, rng)
//!     }
//!
//!     fn encode(&self) -> BinaryChromosome {
//!         Chromosome::from_genes(Binary, self.bits.clone()).unwrap()
//!     }
//!
//!     fn decode(&mut self, chromosome: &BinaryChromosome) {
//!         self.bits = chromosome.genes().to_vec();
//!     }
//! }
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(20)
//!     .elite_size(2)
//!     .max_iterations(10)
//!     .backend(EvaluationBackend::Sequential)
//!     .seed(1)
//!     .build();
//!
//! let launcher = EvolutionLauncher::<OneMax>::builder()
//!     .with_options(options)
//!     .with_factory(OneMax::default)
//!     .with_fitness_task(|genes: &[u8]| genes.iter().map(|&g| g as f64).sum::<f64>())
//!     .build()
//!     .unwrap();
//!
//! for step in launcher.run().unwrap() {
//!     let (population, generation) = step.unwrap();
//!     let best = population.best_individual().unwrap();
//!     if best.fitness() == Some(8.0) {
//!         println!("solved in generation {}", generation);
//!         break;
//!     }
//! }
//! ```

pub mod chromosome;
pub mod crossover;
pub mod error;
pub mod evaluation;
pub mod evolution;
pub mod mutation;
pub mod population;
pub mod rng;
pub mod selection;
pub mod solution;

// Re-export commonly used types for convenience
pub use chromosome::{Alphabet, Binary, Chromosome, IntegerRange};
pub use crossover::{Crossover, CrossoverKind};
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evaluation::{EvaluationBackend, Evaluator, FitnessTask};
pub use evolution::{EvolutionLauncher, EvolutionOptions, Generations, LogLevel};
pub use mutation::Mutation;
pub use population::Population;
pub use rng::RandomNumberGenerator;
pub use selection::{SelectionKind, SelectionStrategy};
pub use solution::{Individual, Solution, SolutionFactory};
