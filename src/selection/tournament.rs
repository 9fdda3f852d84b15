use crate::error::{GeneticError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;
use crate::solution::{Individual, Solution};

/// A selection strategy that selects individuals through tournament selection.
///
/// Each draw picks `tournament_size` individuals uniformly at random, with
/// replacement, and returns the fittest of them:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// A tournament size of 1 is plain uniform random selection. When several
/// participants share the best fitness, the one drawn first wins.
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    rng: RandomNumberGenerator,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize, rng: RandomNumberGenerator) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            rng,
        })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(&mut self, fitness: &[f64]) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut best_idx = self.rng.gen_index(fitness.len());
        for _ in 1..self.tournament_size {
            let idx = self.rng.gen_index(fitness.len());
            if fitness[idx] > fitness[best_idx] {
                best_idx = idx;
            }
        }

        Ok(best_idx)
    }
}

impl<S: Solution> SelectionStrategy<S> for TournamentSelection {
    fn select<'a>(&mut self, population: &'a Population<S>) -> Result<&'a Individual<S>> {
        let fitness = population.fitness_values()?;
        let winner_idx = self.run_tournament(&fitness)?;
        Ok(&population.individuals()[winner_idx])
    }
}
