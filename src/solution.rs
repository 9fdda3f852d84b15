//! # Solution and Individual
//!
//! A problem plugs into the engine by implementing [`Solution`]: it knows how
//! to seed a chromosome, how to encode its own state as a chromosome and how to
//! decode a chromosome back into state. The engine wraps each solution in an
//! [`Individual`], which owns the chromosome and caches the fitness.
//!
//! ## Example
//!
//! ```rust
//! use gaforge::chromosome::{Binary, BinaryChromosome, Chromosome};
//! use gaforge::rng::RandomNumberGenerator;
//! use gaforge::solution::{Individual, Solution};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Switches {
//!     on: Vec<bool>,
//! }
//!
//! impl Solution for Switches {
//!     type Alphabet = Binary;
//!
//!     fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> BinaryChromosome {
//!         Chromosome::initialize(4, Binary, rng)
//!     }
//!
//!     fn encode(&self) -> BinaryChromosome {
//!         let genes = self.on.iter().map(|&b| b as u8).collect();
//!         Chromosome::from_genes(Binary, genes).unwrap()
//!     }
//!
//!     fn decode(&mut self, chromosome: &BinaryChromosome) {
//!         self.on = chromosome.genes().iter().map(|&g| g == 1).collect();
//!     }
//! }
//!
//! let chromosome = Chromosome::from_genes(Binary, vec![1, 0, 1, 1]).unwrap();
//! let individual = Individual::new(Switches::default(), chromosome);
//! assert_eq!(individual.solution().on, vec![true, false, true, true]);
//! assert!(individual.fitness().is_none());
//! ```

use std::fmt::Debug;

use crate::chromosome::{Alphabet, Chromosome};
use crate::error::{GeneticError, Result};
use crate::evaluation::FitnessTask;
use crate::rng::RandomNumberGenerator;

/// Gene type of a solution's alphabet.
pub type GeneOf<S> = <<S as Solution>::Alphabet as Alphabet>::Gene;

/// Problem-specific state that can be encoded as a chromosome.
pub trait Solution: Clone + Debug + Send + Sync {
    /// Alphabet of the chromosomes this solution encodes to.
    type Alphabet: Alphabet;

    /// Produces a random chromosome for the initial population.
    fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> Chromosome<Self::Alphabet>;

    /// Encodes the current problem state.
    fn encode(&self) -> Chromosome<Self::Alphabet>;

    /// Replaces the problem state with the one described by `chromosome`.
    fn decode(&mut self, chromosome: &Chromosome<Self::Alphabet>);
}

/// Produces fresh, unevaluated solutions of one concrete type.
pub trait SolutionFactory<S: Solution>: Send + Sync {
    fn create(&self) -> S;
}

impl<S, F> SolutionFactory<S> for F
where
    S: Solution,
    F: Fn() -> S + Send + Sync,
{
    fn create(&self) -> S {
        self()
    }
}

/// A chromosome, its decoded solution and a lazily computed fitness.
#[derive(Debug, Clone)]
pub struct Individual<S: Solution> {
    solution: S,
    chromosome: Chromosome<S::Alphabet>,
    fitness: Option<f64>,
}

impl<S: Solution> Individual<S> {
    /// Decodes `chromosome` into `solution`. The fitness starts unset.
    pub fn new(mut solution: S, chromosome: Chromosome<S::Alphabet>) -> Self {
        solution.decode(&chromosome);
        Self {
            solution,
            chromosome,
            fitness: None,
        }
    }

    /// Builds an individual from existing problem state.
    pub fn from_solution(solution: S) -> Self {
        let chromosome = solution.encode();
        Self {
            solution,
            chromosome,
            fitness: None,
        }
    }

    /// Creates a new individual of the same concrete type from a chromosome.
    pub fn offspring(&self, chromosome: Chromosome<S::Alphabet>) -> Self {
        Self::new(self.solution.clone(), chromosome)
    }

    /// Replaces the chromosome and invalidates the cached fitness.
    pub fn decode(&mut self, chromosome: Chromosome<S::Alphabet>) {
        self.solution.decode(&chromosome);
        self.chromosome = chromosome;
        self.fitness = None;
    }

    pub fn solution(&self) -> &S {
        &self.solution
    }

    pub fn chromosome(&self) -> &Chromosome<S::Alphabet> {
        &self.chromosome
    }

    /// The cached fitness, if it has been computed.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// The cached fitness.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationFailure` if the fitness was never settled.
    pub fn try_fitness(&self) -> Result<f64> {
        self.fitness.ok_or_else(|| {
            GeneticError::EvaluationFailure(format!(
                "Fitness of {:?} has not been computed",
                self.solution
            ))
        })
    }

    /// Returns the cached fitness, computing it with `task` on first use.
    pub fn evaluate_with<T>(&mut self, task: &T) -> Result<f64>
    where
        T: FitnessTask<GeneOf<S>> + ?Sized,
    {
        if let Some(fitness) = self.fitness {
            return Ok(fitness);
        }
        let fitness = task.evaluate(self.chromosome.genes())?;
        self.fitness = Some(fitness);
        Ok(fitness)
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}
