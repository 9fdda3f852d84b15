pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use roulette::RouletteWheelSelection;
pub use selection_strategy::SelectionStrategy;
pub use tournament::TournamentSelection;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::solution::Solution;

/// Which built-in selection strategy the launcher uses.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    #[default]
    Roulette,
    Tournament { size: usize },
}

impl SelectionKind {
    /// Builds the strategy. A tournament of size 0 is a configuration error.
    pub fn build<S: Solution>(
        self,
        rng: RandomNumberGenerator,
    ) -> Result<Box<dyn SelectionStrategy<S>>> {
        let strategy: Box<dyn SelectionStrategy<S>> = match self {
            SelectionKind::Roulette => Box::new(RouletteWheelSelection::new(rng)),
            SelectionKind::Tournament { size } => Box::new(TournamentSelection::new(size, rng)?),
        };
        Ok(strategy)
    }
}
