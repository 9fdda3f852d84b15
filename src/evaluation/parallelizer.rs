//! # Parallelizer
//!
//! A master/worker pool for fitness evaluation. The master pushes
//! `(index, genes)` jobs onto a task channel; each worker scores the jobs it
//! pulls and pushes `(index, outcome)` onto a result channel. The master waits
//! for every job of the batch, then re-sequences the scores by index, so the
//! caller sees batch order whatever order the workers finish in.
//!
//! Workers are spawned in [`Parallelizer::new`] and joined when the
//! `Parallelizer` is dropped, including when a run stops on an error.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use super::{score_guarded, Evaluator, FitnessTask};
use crate::error::{GeneticError, Result};

struct Job<G> {
    index: usize,
    genes: Vec<G>,
}

type JobOutcome = (usize, Result<f64>);

/// Fixed-size pool of evaluation workers fed over channels.
pub struct Parallelizer<G> {
    jobs: Option<Sender<Job<G>>>,
    outcomes: Receiver<JobOutcome>,
    workers: Vec<JoinHandle<()>>,
}

impl<G: Send + 'static> Parallelizer<G> {
    /// Spawns `worker_count` workers sharing `task`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `worker_count` is zero, or an I/O
    /// error if a worker thread cannot be spawned.
    pub fn new(worker_count: usize, task: Arc<dyn FitnessTask<G>>) -> Result<Self> {
        if worker_count == 0 {
            return Err(GeneticError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job<G>>();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<JobOutcome>();

        let mut parallelizer = Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            workers: Vec::with_capacity(worker_count),
        };

        for worker_id in 0..worker_count {
            let job_rx = job_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let task = Arc::clone(&task);

            // On spawn failure `parallelizer` drops here and joins the workers
            // already started.
            let handle = thread::Builder::new()
                .name(format!("gaforge-eval-{}", worker_id))
                .spawn(move || run_worker(job_rx, outcome_tx, task))?;
            parallelizer.workers.push(handle);
        }

        debug!(worker_count, "evaluation workers started");
        Ok(parallelizer)
    }
}

impl<G> Parallelizer<G> {
    fn shutdown(&mut self) {
        // Closing the task channel ends every worker loop.
        self.jobs.take();
        let worker_count = self.workers.len();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("evaluation worker exited with a panic");
            }
        }
        debug!(worker_count, "evaluation workers stopped");
    }
}

fn run_worker<G>(jobs: Receiver<Job<G>>, outcomes: Sender<JobOutcome>, task: Arc<dyn FitnessTask<G>>) {
    while let Ok(job) = jobs.recv() {
        let outcome = score_guarded(task.as_ref(), job.index, &job.genes);
        if outcomes.send((job.index, outcome)).is_err() {
            break;
        }
    }
}

impl<G: Send + 'static> Evaluator<G> for Parallelizer<G> {
    fn evaluate(&mut self, batch: Vec<Vec<G>>) -> Result<Vec<f64>> {
        let size = batch.len();
        let jobs = self.jobs.as_ref().ok_or_else(|| {
            GeneticError::EvaluationFailure("Evaluation workers are shut down".to_string())
        })?;

        let mut submitted = 0;
        for (index, genes) in batch.into_iter().enumerate() {
            if jobs.send(Job { index, genes }).is_err() {
                break;
            }
            submitted += 1;
        }

        // Drain every submitted job before returning so no stale outcome
        // leaks into the next batch.
        let mut scores: Vec<Option<f64>> = vec![None; size];
        let mut failure: Option<(usize, GeneticError)> = None;
        for _ in 0..submitted {
            let (index, outcome) = self.outcomes.recv().map_err(|_| {
                GeneticError::EvaluationFailure(
                    "Evaluation workers disconnected before the batch completed".to_string(),
                )
            })?;
            match outcome {
                Ok(score) => scores[index] = Some(score),
                Err(err) => {
                    // Report the lowest failing index so failures are deterministic.
                    if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                        failure = Some((index, err));
                    }
                }
            }
        }

        if let Some((index, err)) = failure {
            warn!(index, batch_size = size, "fitness evaluation failed");
            return Err(err);
        }

        if submitted < size {
            return Err(GeneticError::EvaluationFailure(format!(
                "Only {} of {} individuals could be submitted to the workers",
                submitted, size
            )));
        }

        scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| {
                score.ok_or_else(|| {
                    GeneticError::EvaluationFailure(format!(
                        "No fitness returned for individual {}",
                        index
                    ))
                })
            })
            .collect()
    }

    fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl<G> Drop for Parallelizer<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
