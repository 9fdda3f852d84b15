use std::sync::Arc;

use crate::crossover::Crossover;
use crate::error::{GeneticError, Result};
use crate::evaluation::{Evaluator, FitnessTask};
use crate::selection::SelectionStrategy;
use crate::solution::{GeneOf, Solution, SolutionFactory};

use super::launcher::{EvolutionLauncher, FitnessSource};
use super::options::EvolutionOptions;

/// Assembles an [`EvolutionLauncher`].
///
/// A factory and either a fitness task or a ready-made evaluator are
/// required. Unset options fall back to `EvolutionOptions::default()`; unset
/// operators are built from the options when the run starts.
pub struct EvolutionLauncherBuilder<S: Solution> {
    options: Option<EvolutionOptions>,
    factory: Option<Box<dyn SolutionFactory<S>>>,
    task: Option<Arc<dyn FitnessTask<GeneOf<S>>>>,
    evaluator: Option<Box<dyn Evaluator<GeneOf<S>>>>,
    crossover: Option<Box<dyn Crossover<S::Alphabet>>>,
    selection: Option<Box<dyn SelectionStrategy<S>>>,
}

impl<S: Solution> EvolutionLauncherBuilder<S> {
    pub fn new() -> Self {
        Self {
            options: None,
            factory: None,
            task: None,
            evaluator: None,
            crossover: None,
            selection: None,
        }
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: SolutionFactory<S> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn with_fitness_task<T>(mut self, task: T) -> Self
    where
        T: FitnessTask<GeneOf<S>> + 'static,
    {
        self.task = Some(Arc::new(task));
        self
    }

    /// Uses a task that is also shared with other owners.
    pub fn with_shared_fitness_task(mut self, task: Arc<dyn FitnessTask<GeneOf<S>>>) -> Self {
        self.task = Some(task);
        self
    }

    /// Uses `evaluator` instead of one built from the configured backend.
    /// Takes precedence over a fitness task.
    pub fn with_evaluator<E>(mut self, evaluator: E) -> Self
    where
        E: Evaluator<GeneOf<S>> + 'static,
    {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    pub fn with_crossover<C>(mut self, crossover: C) -> Self
    where
        C: Crossover<S::Alphabet> + 'static,
    {
        self.crossover = Some(Box::new(crossover));
        self
    }

    /// Uses `selection` instead of the strategy named in the options. The
    /// options' selection kind is then ignored, so an otherwise invalid
    /// tournament size does not fail the build.
    pub fn with_selection<T>(mut self, selection: T) -> Self
    where
        T: SelectionStrategy<S> + 'static,
    {
        self.selection = Some(Box::new(selection));
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<S>> {
        let factory = self
            .factory
            .ok_or_else(|| GeneticError::Configuration("Solution factory not specified".to_string()))?;

        let fitness = match (self.evaluator, self.task) {
            (Some(evaluator), _) => FitnessSource::Evaluator(evaluator),
            (None, Some(task)) => FitnessSource::Task(task),
            (None, None) => {
                return Err(GeneticError::Configuration(
                    "Fitness task not specified".to_string(),
                ))
            }
        };

        EvolutionLauncher::from_parts(
            self.options.unwrap_or_default(),
            factory,
            fitness,
            self.crossover,
            self.selection,
        )
    }
}

impl<S: Solution> Default for EvolutionLauncherBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
