//! # Chromosome
//!
//! A `Chromosome` is a fixed-length gene sequence over a declared
//! [`Alphabet`]. Every operator returns a new chromosome; none of them modify
//! the receiver, so a parent that is also carried over as an elite is never
//! disturbed by its offspring.
//!
//! ## Example
//!
//! ```rust
//! use gaforge::chromosome::{Binary, Chromosome};
//! use gaforge::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(5);
//! let chromosome = Chromosome::initialize(8, Binary, &mut rng);
//!
//! let (head, tail) = chromosome.split_at(3).unwrap();
//! assert_eq!(head.len(), 3);
//! assert_eq!(head.concat(&tail).unwrap(), chromosome);
//! ```

pub mod alphabet;

pub use alphabet::{Alphabet, Binary, IntegerRange};

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Ordered, fixed-length sequence of genes drawn from an alphabet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "A: serde::Serialize, A::Gene: serde::Serialize",
        deserialize = "A: serde::Deserialize<'de>, A::Gene: serde::Deserialize<'de>"
    ))
)]
#[cfg_attr(feature = "serde", serde(try_from = "RawChromosome<A>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<A: Alphabet> {
    alphabet: A,
    genes: Vec<A::Gene>,
}

/// Serialized form whose genes have not been checked against the alphabet.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "A: serde::Deserialize<'de>, A::Gene: serde::Deserialize<'de>"))]
struct RawChromosome<A: Alphabet> {
    alphabet: A,
    genes: Vec<A::Gene>,
}

#[cfg(feature = "serde")]
impl<A: Alphabet> TryFrom<RawChromosome<A>> for Chromosome<A> {
    type Error = GeneticError;

    fn try_from(raw: RawChromosome<A>) -> Result<Self> {
        Chromosome::from_genes(raw.alphabet, raw.genes)
    }
}

/// Chromosome over `{0, 1}`.
pub type BinaryChromosome = Chromosome<Binary>;

/// Chromosome over an integer range.
pub type IntegerChromosome = Chromosome<IntegerRange>;

impl<A: Alphabet> Chromosome<A> {
    /// Creates a chromosome of `length` genes, each drawn independently and
    /// uniformly from `alphabet`.
    pub fn initialize(length: usize, alphabet: A, rng: &mut RandomNumberGenerator) -> Self {
        let genes = (0..length).map(|_| alphabet.sample(rng)).collect();
        Self { alphabet, genes }
    }

    /// Wraps existing genes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if any gene lies outside `alphabet`.
    pub fn from_genes(alphabet: A, genes: Vec<A::Gene>) -> Result<Self> {
        if let Some(position) = genes.iter().position(|gene| !alphabet.contains(gene)) {
            return Err(GeneticError::InvalidOperation(format!(
                "Gene {:?} at position {} is outside alphabet {:?}",
                genes[position], position, alphabet
            )));
        }
        Ok(Self { alphabet, genes })
    }

    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    pub fn genes(&self) -> &[A::Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Picks a crossover cut point uniformly from `1..len`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when the chromosome has fewer than two genes,
    /// since there is no interior cut point.
    pub fn pick_split_point(&self, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if self.genes.len() < 2 {
            return Err(GeneticError::InvalidOperation(format!(
                "Cannot pick a split point on a chromosome of length {}",
                self.genes.len()
            )));
        }
        Ok(rng.gen_range(1..self.genes.len()))
    }

    /// Splits into the prefix `[0, point)` and the suffix `[point, len)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if `point > len`.
    pub fn split_at(&self, point: usize) -> Result<(Self, Self)> {
        if point > self.genes.len() {
            return Err(GeneticError::InvalidOperation(format!(
                "Split point {} is beyond chromosome length {}",
                point,
                self.genes.len()
            )));
        }
        let (head, tail) = self.genes.split_at(point);
        Ok((self.with_genes(head.to_vec()), self.with_genes(tail.to_vec())))
    }

    /// Splits at every point in `points`, producing `points.len() + 1`
    /// contiguous segments. Equal points yield empty segments.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the points are not sorted or the last one
    /// is beyond the chromosome length.
    pub fn split(&self, points: &[usize]) -> Result<Vec<Self>> {
        if points.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(GeneticError::InvalidOperation(format!(
                "Split points {:?} are not sorted",
                points
            )));
        }
        if let Some(&last) = points.last() {
            if last > self.genes.len() {
                return Err(GeneticError::InvalidOperation(format!(
                    "Split point {} is beyond chromosome length {}",
                    last,
                    self.genes.len()
                )));
            }
        }

        let mut segments = Vec::with_capacity(points.len() + 1);
        let mut start = 0;
        for &point in points {
            segments.push(self.with_genes(self.genes[start..point].to_vec()));
            start = point;
        }
        segments.push(self.with_genes(self.genes[start..].to_vec()));
        Ok(segments)
    }

    /// Returns a new chromosome holding this chromosome's genes followed by
    /// `other`'s.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the alphabets differ.
    pub fn concat(&self, other: &Self) -> Result<Self> {
        if self.alphabet != other.alphabet {
            return Err(GeneticError::InvalidOperation(format!(
                "Cannot concatenate chromosomes over {:?} and {:?}",
                self.alphabet, other.alphabet
            )));
        }
        let mut genes = Vec::with_capacity(self.genes.len() + other.genes.len());
        genes.extend_from_slice(&self.genes);
        genes.extend_from_slice(&other.genes);
        Ok(self.with_genes(genes))
    }

    /// Returns a copy where each gene is independently replaced by a fresh
    /// sample with probability `rate`. The replacement may equal the old gene.
    pub fn mutate(&self, rate: f64, rng: &mut RandomNumberGenerator) -> Self {
        let genes = self
            .genes
            .iter()
            .map(|&gene| {
                if rng.gen_probability() < rate {
                    self.alphabet.sample(rng)
                } else {
                    gene
                }
            })
            .collect();
        self.with_genes(genes)
    }

    fn with_genes(&self, genes: Vec<A::Gene>) -> Self {
        Self {
            alphabet: self.alphabet.clone(),
            genes,
        }
    }
}
