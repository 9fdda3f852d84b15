use super::{validate_rate, Crossover};
use crate::chromosome::{Alphabet, Chromosome};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Cuts both parents at two points and swaps the middle segments.
///
/// ```text
/// parent1:    | 1111 | 1111 | 1111 |      offspring1: | 1111 | 2222 | 1111 |
/// parent2:    | 2222 | 2222 | 2222 |      offspring2: | 2222 | 1111 | 2222 |
/// ```
///
/// The two points are drawn independently and may coincide, in which case
/// the middle segment is empty and the offspring equal their parents.
#[derive(Debug, Clone)]
pub struct TwoPointCrossover {
    rate: f64,
    rng: RandomNumberGenerator,
}

impl TwoPointCrossover {
    pub fn new(rate: f64, rng: RandomNumberGenerator) -> Result<Self> {
        Ok(Self {
            rate: validate_rate(rate)?,
            rng,
        })
    }
}

impl<A: Alphabet> Crossover<A> for TwoPointCrossover {
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
        let first = parent1.pick_split_point(&mut self.rng)?;
        let second = parent1.pick_split_point(&mut self.rng)?;
        let points = [first.min(second), first.max(second)];

        let segments1 = parent1.split(&points)?;
        let segments2 = parent2.split(&points)?;

        let offspring1 = segments1[0].concat(&segments2[1])?.concat(&segments1[2])?;
        let offspring2 = segments2[0].concat(&segments1[1])?.concat(&segments2[2])?;
        Ok((offspring1, offspring2))
    }
}
