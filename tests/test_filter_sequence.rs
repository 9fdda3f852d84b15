use std::sync::Arc;

use gaforge::{
    chromosome::{Chromosome, IntegerChromosome, IntegerRange},
    evaluation::{EvaluationBackend, FitnessTask},
    evolution::{EvolutionLauncher, EvolutionOptions},
    rng::RandomNumberGenerator,
    Result, Solution,
};

const SEQUENCE_LENGTH: usize = 4;

type Signal = Vec<i64>;
type Filter = fn(&[i64]) -> Signal;

fn median3(signal: &[i64]) -> Signal {
    (0..signal.len())
        .map(|i| {
            if i == 0 || i + 1 == signal.len() {
                return signal[i];
            }
            let mut window = [signal[i - 1], signal[i], signal[i + 1]];
            window.sort_unstable();
            window[1]
        })
        .collect()
}

fn mean3(signal: &[i64]) -> Signal {
    (0..signal.len())
        .map(|i| {
            if i == 0 || i + 1 == signal.len() {
                return signal[i];
            }
            (signal[i - 1] + signal[i] + signal[i + 1]) / 3
        })
        .collect()
}

fn invert(signal: &[i64]) -> Signal {
    signal.iter().map(|&v| 255 - v).collect()
}

fn brighten(signal: &[i64]) -> Signal {
    signal.iter().map(|&v| (v + 40).min(255)).collect()
}

const FILTERS: [Filter; 4] = [median3, mean3, invert, brighten];

/// Sequence of filter indexes. The index one past the last filter is a no-op,
/// which lets sequences be effectively shorter than the chromosome.
#[derive(Clone, Debug, Default)]
struct FilterSequence {
    sequence: Vec<i64>,
}

fn alphabet() -> IntegerRange {
    IntegerRange::new(0, FILTERS.len() as i64).unwrap()
}

impl Solution for FilterSequence {
    type Alphabet = IntegerRange;

    fn initialize_chromosome(&self, rng: &mut RandomNumberGenerator) -> IntegerChromosome {
        Chromosome::initialize(SEQUENCE_LENGTH, alphabet(), rng)
    }

    fn encode(&self) -> IntegerChromosome {
        Chromosome::from_genes(alphabet(), self.sequence.clone()).unwrap()
    }

    fn decode(&mut self, chromosome: &IntegerChromosome) {
        self.sequence = chromosome.genes().to_vec();
    }
}

/// Scores a filter sequence by how closely it restores clean signals from
/// their noisy versions.
struct Restoration {
    inputs: Vec<Signal>,
    targets: Vec<Signal>,
}

impl Restoration {
    fn new() -> Self {
        let targets: Vec<Signal> = vec![
            (0..32).map(|i| i * 8).collect(),
            (0..32).map(|i| 200 - i * 4).collect(),
        ];
        let inputs = targets
            .iter()
            .map(|clean| {
                clean
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| match i % 5 {
                        2 => 255,
                        4 => 0,
                        _ => v,
                    })
                    .collect()
            })
            .collect();
        Self { inputs, targets }
    }

    fn apply(&self, input: &[i64], sequence: &[i64]) -> Signal {
        sequence
            .iter()
            .filter_map(|&index| FILTERS.get(index as usize))
            .fold(input.to_vec(), |signal, filter| filter(signal.as_slice()))
    }

    fn score(input: &[i64], target: &[i64]) -> f64 {
        let diff: i64 = input.iter().zip(target).map(|(a, b)| (a - b).abs()).sum();
        1.0 - diff as f64 / (target.len() as f64 * 255.0)
    }

    /// Fitness of leaving the noisy inputs untouched.
    fn baseline(&self) -> f64 {
        let total: f64 = self
            .inputs
            .iter()
            .zip(&self.targets)
            .map(|(input, target)| Self::score(input, target))
            .sum();
        total / self.inputs.len() as f64
    }
}

impl FitnessTask<i64> for Restoration {
    fn evaluate(&self, sequence: &[i64]) -> Result<f64> {
        let total: f64 = self
            .inputs
            .iter()
            .zip(&self.targets)
            .map(|(input, target)| Self::score(&self.apply(input, sequence), target))
            .sum();
        Ok(total / self.inputs.len() as f64)
    }
}

#[test]
fn test_median_restores_impulse_noise() {
    let task = Restoration::new();
    let median_only = task.evaluate(&[0, 4, 4, 4]).unwrap();
    let untouched = task.evaluate(&[4, 4, 4, 4]).unwrap();
    assert_eq!(untouched, task.baseline());
    assert!(median_only > untouched);
    assert!(task.evaluate(&[2, 4, 4, 4]).unwrap() < untouched);
}

#[test]
fn test_evolves_restoring_sequence() {
    let task: Arc<dyn FitnessTask<i64>> = Arc::new(Restoration::new());
    let baseline = Restoration::new().baseline();
    let mut beat_baseline = false;

    for seed in 0..3 {
        let options = EvolutionOptions::builder()
            .population_size(30)
            .elite_size(3)
            .mutation_rate(0.05)
            .max_iterations(30)
            .backend(EvaluationBackend::WorkerPool)
            .worker_count(3)
            .seed(seed)
            .build();

        let launcher = EvolutionLauncher::<FilterSequence>::builder()
            .with_options(options)
            .with_factory(FilterSequence::default)
            .with_shared_fitness_task(Arc::clone(&task))
            .build()
            .unwrap();

        let generations = launcher.run().unwrap();
        assert_eq!(generations.worker_count(), 3);

        let mut best = Vec::new();
        for step in generations {
            let (population, _) = step.unwrap();
            let leader = population.best_individual().unwrap();
            assert!(leader
                .solution()
                .sequence
                .iter()
                .all(|&g| (0..=FILTERS.len() as i64).contains(&g)));
            best.push(leader.fitness().unwrap());
        }

        assert!(best.windows(2).all(|pair| pair[1] >= pair[0]));
        beat_baseline |= *best.last().unwrap() > baseline;
    }

    assert!(beat_baseline);
    // Every run has released its reference to the task.
    assert_eq!(Arc::strong_count(&task), 1);
}
