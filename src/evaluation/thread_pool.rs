use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{score_guarded, Evaluator, FitnessTask};
use crate::error::{GeneticError, Result, ResultExt};

/// Scores batches on a dedicated rayon pool.
///
/// The pool is owned by the evaluator and torn down with it. Rayon's indexed
/// collect keeps the scores in batch order.
pub struct ThreadPoolEvaluator<G> {
    pool: ThreadPool,
    task: Arc<dyn FitnessTask<G>>,
}

impl<G: Send + Sync> ThreadPoolEvaluator<G> {
    /// Builds a pool with `worker_count` threads.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `worker_count` is zero, or a wrapped
    /// rayon error if the pool cannot be built.
    pub fn new(worker_count: usize, task: Arc<dyn FitnessTask<G>>) -> Result<Self> {
        if worker_count == 0 {
            return Err(GeneticError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("gaforge-pool-{}", i))
            .build()
            .context("Failed to build evaluation thread pool")?;

        Ok(Self { pool, task })
    }
}

impl<G: Send + Sync> Evaluator<G> for ThreadPoolEvaluator<G> {
    fn evaluate(&mut self, batch: Vec<Vec<G>>) -> Result<Vec<f64>> {
        let task = self.task.as_ref();
        self.pool.install(|| {
            batch
                .par_iter()
                .enumerate()
                .map(|(index, genes)| score_guarded(task, index, genes))
                .collect::<Result<Vec<f64>>>()
        })
    }

    fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_in_batch_order() {
        let task: Arc<dyn FitnessTask<u32>> = Arc::new(|genes: &[u32]| genes.len() as f64);
        let mut evaluator = ThreadPoolEvaluator::new(3, task).unwrap();
        let batch: Vec<Vec<u32>> = (0..100).map(|n| vec![0; n]).collect();
        let scores = evaluator.evaluate(batch).unwrap();
        let expected: Vec<f64> = (0..100).map(|n| n as f64).collect();
        assert_eq!(scores, expected);
        assert_eq!(evaluator.worker_count(), 3);
    }

    #[test]
    fn test_failure_propagates() {
        let task: Arc<dyn FitnessTask<u32>> = Arc::new(|genes: &[u32]| {
            if genes.is_empty() {
                f64::INFINITY
            } else {
                1.0
            }
        });
        let mut evaluator = ThreadPoolEvaluator::new(2, task).unwrap();
        assert!(matches!(
            evaluator.evaluate(vec![vec![1], vec![]]),
            Err(GeneticError::EvaluationFailure(_))
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let task: Arc<dyn FitnessTask<u32>> = Arc::new(|_: &[u32]| 0.0);
        assert!(matches!(
            ThreadPoolEvaluator::new(0, task),
            Err(GeneticError::Configuration(_))
        ));
    }
}
