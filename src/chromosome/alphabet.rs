use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// The set of symbols a chromosome's genes are drawn from.
///
/// Alphabets are compared by value: two chromosomes may only be concatenated
/// when their alphabets are equal.
pub trait Alphabet: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The gene type. Genes are plain values so they can be copied to workers.
    type Gene: Copy + Debug + PartialEq + Send + Sync + 'static;

    /// Draws one gene uniformly from the alphabet.
    fn sample(&self, rng: &mut RandomNumberGenerator) -> Self::Gene;

    /// Returns whether `gene` belongs to the alphabet.
    fn contains(&self, gene: &Self::Gene) -> bool;
}

/// Two-symbol alphabet; genes are `0` or `1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary;

impl Alphabet for Binary {
    type Gene = u8;

    fn sample(&self, rng: &mut RandomNumberGenerator) -> u8 {
        rng.gen_index(2) as u8
    }

    fn contains(&self, gene: &u8) -> bool {
        *gene <= 1
    }
}

/// Integers in the closed range `[min, max]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RangeBounds"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRange {
    min: i64,
    max: i64,
}

/// Unchecked bounds as read from a serialized range.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RangeBounds {
    min: i64,
    max: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeBounds> for IntegerRange {
    type Error = GeneticError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        IntegerRange::new(bounds.min, bounds.max)
    }
}

impl IntegerRange {
    /// Creates the alphabet `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(GeneticError::Configuration(format!(
                "Integer alphabet lower bound {} exceeds upper bound {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Alphabet for IntegerRange {
    type Gene = i64;

    fn sample(&self, rng: &mut RandomNumberGenerator) -> i64 {
        rng.gen_range(self.min..=self.max)
    }

    fn contains(&self, gene: &i64) -> bool {
        (self.min..=self.max).contains(gene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_samples_are_bits() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let samples: Vec<u8> = (0..200).map(|_| Binary.sample(&mut rng)).collect();
        assert!(samples.iter().all(|g| Binary.contains(g)));
        // Both symbols show up
        assert!(samples.contains(&0));
        assert!(samples.contains(&1));
        assert!(!Binary.contains(&2));
    }

    #[test]
    fn test_integer_range_bounds() {
        let alphabet = IntegerRange::new(1, 4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);
        for _ in 0..500 {
            let gene = alphabet.sample(&mut rng);
            assert!((1..=4).contains(&gene));
        }
        assert!(!alphabet.contains(&0));
        assert!(!alphabet.contains(&5));
    }

    #[test]
    fn test_single_value_range() {
        let alphabet = IntegerRange::new(3, 3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);
        assert_eq!(alphabet.sample(&mut rng), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            IntegerRange::new(5, 1),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_range_is_checked() {
        let range: IntegerRange = serde_json::from_str(r#"{"min":1,"max":5}"#).unwrap();
        assert_eq!(range, IntegerRange::new(1, 5).unwrap());

        let inverted = serde_json::from_str::<IntegerRange>(r#"{"min":5,"max":1}"#);
        let err = inverted.unwrap_err().to_string();
        assert!(err.contains("lower bound 5 exceeds upper bound 1"), "{}", err);
    }
}
