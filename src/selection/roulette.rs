use crate::error::{GeneticError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;
use crate::solution::{Individual, Solution};

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// each individual with probability equal to its share of the population's
/// total fitness.
///
/// This strategy requires all fitness values to be non-negative. When the total
/// fitness is zero every individual is equally likely.
#[derive(Debug, Clone)]
pub struct RouletteWheelSelection {
    rng: RandomNumberGenerator,
}

impl RouletteWheelSelection {
    pub fn new(rng: RandomNumberGenerator) -> Self {
        Self { rng }
    }

    /// Spins the wheel once and returns the index of the selected individual.
    ///
    /// # Errors
    ///
    /// Returns an error if `fitness` is empty or contains a negative value.
    fn spin(&mut self, fitness: &[f64]) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        // Check for negative fitness values
        if fitness.iter().any(|&f| f < 0.0) {
            return Err(GeneticError::Configuration(
                "Roulette wheel selection requires non-negative fitness values".to_string(),
            ));
        }

        let max = fitness.iter().copied().fold(0.0, f64::max);
        if max == 0.0 {
            return Ok(self.rng.gen_index(fitness.len()));
        }

        // Slices are measured relative to the largest value so the wheel's
        // circumference stays finite even when the raw sum would overflow.
        let total: f64 = fitness.iter().map(|&f| f / max).sum();
        let target = self.rng.gen_probability() * total;
        let mut cumulative = 0.0;
        for (index, &f) in fitness.iter().enumerate() {
            cumulative += f / max;
            if cumulative > target {
                return Ok(index);
            }
        }

        // Rounding can leave the target at the very end of the wheel; it
        // belongs to the last slice with a non-zero width.
        Ok(fitness.iter().rposition(|&f| f > 0.0).unwrap_or(fitness.len() - 1))
    }
}

impl Default for RouletteWheelSelection {
    fn default() -> Self {
        Self::new(RandomNumberGenerator::new())
    }
}

impl<S: Solution> SelectionStrategy<S> for RouletteWheelSelection {
    fn select<'a>(&mut self, population: &'a Population<S>) -> Result<&'a Individual<S>> {
        let fitness = population.fitness_values()?;
        let index = self.spin(&fitness)?;
        Ok(&population.individuals()[index])
    }
}
