//! # Crossover
//!
//! A crossover operator recombines two parent chromosomes into two offspring
//! chromosomes. With probability `rate` the operator-specific [`recombine`]
//! step runs; otherwise the offspring are independent copies of the parents.
//!
//! Both provided operators cut the parents at points picked on the first
//! parent, so the parents must have equal length.
//!
//! [`recombine`]: Crossover::recombine
//!
//! ## Example
//!
//! ```rust
//! use gaforge::chromosome::{Binary, Chromosome};
//! use gaforge::crossover::{Crossover, OnePointCrossover};
//! use gaforge::rng::RandomNumberGenerator;
//!
//! let mut crossover = OnePointCrossover::new(1.0, RandomNumberGenerator::from_seed(3)).unwrap();
//! let ones = Chromosome::from_genes(Binary, vec![1; 6]).unwrap();
//! let zeros = Chromosome::from_genes(Binary, vec![0; 6]).unwrap();
//!
//! let (first, second) = crossover.run(&ones, &zeros, None).unwrap();
//! assert_eq!(first.len(), 6);
//! assert_ne!(first, ones);
//! assert_ne!(second, zeros);
//! ```

pub mod one_point;
pub mod two_point;

pub use one_point::OnePointCrossover;
pub use two_point::TwoPointCrossover;

use std::fmt::Debug;

use crate::chromosome::{Alphabet, Chromosome};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::solution::{Individual, Solution};

/// Which built-in crossover the launcher uses.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverKind {
    #[default]
    OnePoint,
    TwoPoint,
}

impl CrossoverKind {
    /// Builds the operator for chromosomes over `A`.
    pub fn build<A: Alphabet>(
        self,
        rate: f64,
        rng: RandomNumberGenerator,
    ) -> Result<Box<dyn Crossover<A>>> {
        let crossover: Box<dyn Crossover<A>> = match self {
            CrossoverKind::OnePoint => Box::new(OnePointCrossover::new(rate, rng)?),
            CrossoverKind::TwoPoint => Box::new(TwoPointCrossover::new(rate, rng)?),
        };
        Ok(crossover)
    }
}

/// Probabilistic recombination of two parent chromosomes.
pub trait Crossover<A: Alphabet>: Debug + Send {
    /// The configured recombination probability.
    fn rate(&self) -> f64;

    /// The operator's private generator.
    fn rng(&mut self) -> &mut RandomNumberGenerator;

    /// Operator-specific recombination, applied unconditionally.
    fn recombine(
        &mut self,
        parent1: &Chromosome<A>,
        parent2: &Chromosome<A>,
    ) -> Result<(Chromosome<A>, Chromosome<A>)>;

    /// Recombines with probability `rate`, falling back to the configured
    /// rate when `None`; otherwise returns copies of the parents.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a rate outside `[0, 1]`, and
    /// propagates recombination errors such as a chromosome shorter than two
    /// genes.
    fn run(
        &mut self,
        parent1: &Chromosome<A>,
        parent2: &Chromosome<A>,
        rate: Option<f64>,
    ) -> Result<(Chromosome<A>, Chromosome<A>)> {
        let rate = match rate {
            Some(rate) => validate_rate(rate)?,
            None => self.rate(),
        };

        if self.rng().gen_probability() < rate {
            self.recombine(parent1, parent2)
        } else {
            Ok((parent1.clone(), parent2.clone()))
        }
    }
}

/// Crosses two individuals and wraps the offspring chromosomes into new
/// individuals of the same concrete type as the parents.
pub fn mate<S: Solution>(
    crossover: &mut dyn Crossover<S::Alphabet>,
    parent1: &Individual<S>,
    parent2: &Individual<S>,
    rate: Option<f64>,
) -> Result<(Individual<S>, Individual<S>)> {
    let (chromosome1, chromosome2) =
        crossover.run(parent1.chromosome(), parent2.chromosome(), rate)?;
    Ok((parent1.offspring(chromosome1), parent2.offspring(chromosome2)))
}

pub(crate) fn validate_rate(rate: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GeneticError::Configuration(format!(
            "Crossover rate {} is outside [0, 1]",
            rate
        )));
    }
    Ok(rate)
}
