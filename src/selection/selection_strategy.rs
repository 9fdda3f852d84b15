use std::fmt::Debug;

use crate::error::Result;
use crate::population::Population;
use crate::solution::{Individual, Solution};

/// Trait for parent selection strategies.
///
/// A strategy draws one parent per call from a settled population, reading
/// only the members' fitness. The driver calls it twice per mating event.
///
/// # Examples
///
/// ```
/// use gaforge::chromosome::{Binary, BinaryChromosome, Chromosome};
/// use gaforge::population::Population;
/// use gaforge::rng::RandomNumberGenerator;
/// use gaforge::selection::{SelectionStrategy, TournamentSelection};
/// use gaforge::solution::{Individual, Solution};
/// use gaforge::error::Result;
///
/// #[derive(Clone, Debug, Default)]
/// struct Bits(Vec<u8>);
///
/// impl Solution for Bits {
///     type Alphabet = Binary;
///     fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> BinaryChromosome {
///         Chromosome::initialize(4, Binary, rng)
///     }
///     fn encode(&self) -> BinaryChromosome {
///         Chromosome::from_genes(Binary, self.0.clone()).unwrap()
///     }
///     fn decode(&mut self, chromosome: &BinaryChromosome) {
///         self.0 = chromosome.genes().to_vec();
///     }
/// }
///
/// fn main() -> Result<()> {
///     let population = Population::new(Vec::<Individual<Bits>>::new(), 0);
///     let mut selection = TournamentSelection::new(2, RandomNumberGenerator::from_seed(1))?;
///
///     // Nothing to draw from
///     assert!(selection.select(&population).is_err());
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<S: Solution>: Debug + Send {
    /// Draws one individual from `population`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for a population with no members and
    /// `EvaluationFailure` if a member's fitness is not settled.
    fn select<'a>(&mut self, population: &'a Population<S>) -> Result<&'a Individual<S>>;
}
