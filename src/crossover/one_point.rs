use super::{validate_rate, Crossover};
use crate::chromosome::{Alphabet, Chromosome};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Cuts both parents at one point and swaps the tails.
///
/// ```text
/// parent1:    | 1111 | 1111 |      offspring1: | 1111 | 2222 |
/// parent2:    | 2222 | 2222 |      offspring2: | 2222 | 1111 |
/// ```
#[derive(Debug, Clone)]
pub struct OnePointCrossover {
    rate: f64,
    rng: RandomNumberGenerator,
}

impl OnePointCrossover {
    pub fn new(rate: f64, rng: RandomNumberGenerator) -> Result<Self> {
        Ok(Self {
            rate: validate_rate(rate)?,
            rng,
        })
    }
}

impl<A: Alphabet> Crossover<A> for OnePointCrossover {
    fn rate(&self) -> f64 {
        self.rate
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(
        &mut self,
        parent1: &Chromosome<A>,
        parent2: &Chromosome<A>,
    ) -> Result<(Chromosome<A>, Chromosome<A>)> {
        let point = parent1.pick_split_point(&mut self.rng)?;
        let (head1, tail1) = parent1.split_at(point)?;
        let (head2, tail2) = parent2.split_at(point)?;
        Ok((head1.concat(&tail2)?, head2.concat(&tail1)?))
    }
}
