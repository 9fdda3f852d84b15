use crate::chromosome::{Alphabet, Chromosome};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Per-gene point mutation applied to offspring.
#[derive(Debug, Clone)]
pub struct Mutation {
    rate: f64,
    rng: RandomNumberGenerator,
}

impl Mutation {
    /// Creates a mutation operator resampling each gene with probability `rate`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `rate` is outside `[0, 1]`.
    pub fn new(rate: f64, rng: RandomNumberGenerator) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate {} is outside [0, 1]",
                rate
            )));
        }
        Ok(Self { rate, rng })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns a mutated copy of `chromosome`.
    pub fn apply<A: Alphabet>(&mut self, chromosome: &Chromosome<A>) -> Chromosome<A> {
        chromosome.mutate(self.rate, &mut self.rng)
    }
}
