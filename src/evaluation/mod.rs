//! # Fitness Evaluation
//!
//! Fitness is computed by a [`FitnessTask`]: a pure function from gene content
//! to a score. An [`Evaluator`] scores whole batches and hands the scores back
//! in batch order. Three backends are provided:
//!
//! - [`SequentialEvaluator`] scores in the calling thread.
//! - [`Parallelizer`] runs a fixed pool of worker threads fed over channels.
//! - [`ThreadPoolEvaluator`] runs the batch on a dedicated rayon pool.
//!
//! Workers only ever see copies of gene content and return only a score. A
//! task that fails, panics or produces a non-finite score fails the whole
//! batch with `EvaluationFailure`.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gaforge::evaluation::{Evaluator, FitnessTask, Parallelizer};
//!
//! let ones = |genes: &[u8]| genes.iter().filter(|&&g| g == 1).count() as f64;
//! let task: Arc<dyn FitnessTask<u8>> = Arc::new(ones);
//!
//! let mut parallelizer = Parallelizer::new(2, task).unwrap();
//! let scores = parallelizer
//!     .evaluate(vec![vec![1, 1, 0], vec![0, 0, 0], vec![1, 1, 1]])
//!     .unwrap();
//! assert_eq!(scores, vec![2.0, 0.0, 3.0]);
//! ```

pub mod parallelizer;
pub mod thread_pool;

pub use parallelizer::Parallelizer;
pub use thread_pool::ThreadPoolEvaluator;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{GeneticError, Result};

/// A pure fitness function over gene content.
///
/// Implementations must not rely on shared mutable state: they run on worker
/// threads that share nothing with the driver but the task itself.
pub trait FitnessTask<G>: Send + Sync {
    fn evaluate(&self, genes: &[G]) -> Result<f64>;
}

impl<G, F> FitnessTask<G> for F
where
    F: Fn(&[G]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[G]) -> Result<f64> {
        Ok(self(genes))
    }
}

/// Scores batches of gene sequences.
pub trait Evaluator<G>: Send {
    /// Scores every entry of `batch`. The returned scores are in batch order.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationFailure` if any entry could not be scored; no
    /// partial result is returned.
    fn evaluate(&mut self, batch: Vec<Vec<G>>) -> Result<Vec<f64>>;

    /// Number of execution contexts scoring in parallel.
    fn worker_count(&self) -> usize;
}

/// Which evaluator the launcher builds from `EvolutionOptions`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationBackend {
    /// Score in the driver thread; the worker count is ignored.
    Sequential,
    /// [`Parallelizer`] with `worker_count` threads.
    #[default]
    WorkerPool,
    /// [`ThreadPoolEvaluator`] with `worker_count` threads.
    ThreadPool,
}

/// Scores each entry in the calling thread.
pub struct SequentialEvaluator<G> {
    task: Arc<dyn FitnessTask<G>>,
}

impl<G> SequentialEvaluator<G> {
    pub fn new(task: Arc<dyn FitnessTask<G>>) -> Self {
        Self { task }
    }
}

impl<G> Evaluator<G> for SequentialEvaluator<G> {
    fn evaluate(&mut self, batch: Vec<Vec<G>>) -> Result<Vec<f64>> {
        batch
            .iter()
            .enumerate()
            .map(|(index, genes)| score_guarded(self.task.as_ref(), index, genes))
            .collect()
    }

    fn worker_count(&self) -> usize {
        1
    }
}

/// Runs `task` on one entry, turning panics and non-finite scores into
/// `EvaluationFailure`.
pub(crate) fn score_guarded<G>(task: &dyn FitnessTask<G>, index: usize, genes: &[G]) -> Result<f64> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.evaluate(genes))).map_err(|payload| {
        GeneticError::EvaluationFailure(format!(
            "Fitness task panicked on individual {}: {}",
            index,
            panic_message(payload.as_ref())
        ))
    })?;

    let score = match outcome {
        Ok(score) => score,
        Err(GeneticError::EvaluationFailure(msg)) => {
            return Err(GeneticError::EvaluationFailure(msg));
        }
        Err(other) => {
            return Err(GeneticError::EvaluationFailure(format!(
                "Individual {}: {}",
                index, other
            )));
        }
    };

    if !score.is_finite() {
        return Err(GeneticError::EvaluationFailure(format!(
            "Non-finite fitness score {} for individual {}",
            score, index
        )));
    }

    Ok(score)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
