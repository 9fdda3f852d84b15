//! # Population
//!
//! One generation's individuals in order, tagged with the generation index.
//! Statistics are derived from the current members on every call rather than
//! cached, so replacing members can never leave them stale.

use std::cmp::Ordering;

use crate::error::{GeneticError, OptionExt, Result};
use crate::solution::{Individual, Solution};

#[derive(Debug, Clone)]
pub struct Population<S: Solution> {
    individuals: Vec<Individual<S>>,
    generation: usize,
}

impl<S: Solution> Population<S> {
    pub fn new(individuals: Vec<Individual<S>>, generation: usize) -> Self {
        Self {
            individuals,
            generation,
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn individuals(&self) -> &[Individual<S>] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<S>> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Fitness of every member, in population order.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationFailure` if a member has no settled fitness.
    pub fn fitness_values(&self) -> Result<Vec<f64>> {
        self.individuals.iter().map(Individual::try_fitness).collect()
    }

    /// The member with the highest fitness; the first one wins ties.
    pub fn best_individual(&self) -> Result<&Individual<S>> {
        self.extreme_by(Ordering::Greater)
    }

    /// The member with the lowest fitness; the first one wins ties.
    pub fn worst_individual(&self) -> Result<&Individual<S>> {
        self.extreme_by(Ordering::Less)
    }

    /// Arithmetic mean of the members' fitness.
    pub fn average_fitness(&self) -> Result<f64> {
        if self.individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let total: f64 = self.fitness_values()?.iter().sum();
        Ok(total / self.individuals.len() as f64)
    }

    /// Copies of the `count` fittest members, best first. Members with equal
    /// fitness keep their population order.
    pub fn fittest(&self, count: usize) -> Result<Vec<Individual<S>>> {
        let fitness = self.fitness_values()?;
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        // `sort_by` is stable
        order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
        Ok(order
            .into_iter()
            .take(count)
            .map(|i| self.individuals[i].clone())
            .collect())
    }

    fn extreme_by(&self, wanted: Ordering) -> Result<&Individual<S>> {
        let mut members = self.individuals.iter();
        let mut extreme = members
            .next()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let mut extreme_fitness = extreme.try_fitness()?;

        for individual in members {
            let fitness = individual.try_fitness()?;
            if fitness.total_cmp(&extreme_fitness) == wanted {
                extreme = individual;
                extreme_fitness = fitness;
            }
        }
        Ok(extreme)
    }
}

impl<'a, S: Solution> IntoIterator for &'a Population<S> {
    type Item = &'a Individual<S>;
    type IntoIter = std::slice::Iter<'a, Individual<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
