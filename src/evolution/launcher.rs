use std::mem;
use std::sync::Arc;

use tracing::{debug, info};

use super::builder::EvolutionLauncherBuilder;
use super::options::{EvolutionOptions, LogLevel};
use crate::crossover::{self, Crossover};
use crate::error::{GeneticError, Result};
use crate::evaluation::{
    EvaluationBackend, Evaluator, FitnessTask, Parallelizer, SequentialEvaluator,
    ThreadPoolEvaluator,
};
use crate::mutation::Mutation;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;
use crate::solution::{GeneOf, Individual, Solution, SolutionFactory};

/// Represents the outcome of a full run: the best individual of the last
/// generation.
#[derive(Debug, Clone)]
pub struct EvolutionResult<S: Solution> {
    /// The best individual of the final generation.
    pub individual: Individual<S>,
    /// Its fitness score.
    pub score: f64,
    /// Index of the final generation.
    pub generation: usize,
}

/// Where fitness comes from: a task the launcher builds an evaluator around,
/// or a ready-made evaluator.
pub(crate) enum FitnessSource<G> {
    Task(Arc<dyn FitnessTask<G>>),
    Evaluator(Box<dyn Evaluator<G>>),
}

/// Configured, validated run that has not started yet.
pub struct EvolutionLauncher<S: Solution> {
    options: EvolutionOptions,
    factory: Box<dyn SolutionFactory<S>>,
    fitness: FitnessSource<GeneOf<S>>,
    crossover: Option<Box<dyn Crossover<S::Alphabet>>>,
    selection: Option<Box<dyn SelectionStrategy<S>>>,
}

impl<S: Solution> EvolutionLauncher<S> {
    /// Returns a builder for the launcher.
    pub fn builder() -> EvolutionLauncherBuilder<S> {
        EvolutionLauncherBuilder::new()
    }

    pub(crate) fn from_parts(
        options: EvolutionOptions,
        factory: Box<dyn SolutionFactory<S>>,
        fitness: FitnessSource<GeneOf<S>>,
        crossover: Option<Box<dyn Crossover<S::Alphabet>>>,
        selection: Option<Box<dyn SelectionStrategy<S>>>,
    ) -> Result<Self> {
        options.validate_run()?;
        if selection.is_none() {
            options.validate_selection()?;
        }
        Ok(Self {
            options,
            factory,
            fitness,
            crossover,
            selection,
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Builds the operators, starts the evaluator and returns the lazy
    /// sequence of generations.
    ///
    /// With a seed set, the initialization, crossover, selection and mutation
    /// generators are derived from it in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if an operator rejects its parameters or the
    /// evaluator cannot be started.
    pub fn run(self) -> Result<Generations<S>> {
        let options = self.options;
        let mut master = match options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        let init_rng = master.derive();
        let crossover_rng = master.derive();
        let selection_rng = master.derive();
        let mutation_rng = master.derive();

        let crossover = match self.crossover {
            Some(crossover) => crossover,
            None => options
                .get_crossover()
                .build(options.get_crossover_rate(), crossover_rng)?,
        };
        let selection = match self.selection {
            Some(selection) => selection,
            None => options.get_selection().build(selection_rng)?,
        };
        let mutation = Mutation::new(options.get_mutation_rate(), mutation_rng)?;

        let evaluator: Box<dyn Evaluator<GeneOf<S>>> = match self.fitness {
            FitnessSource::Evaluator(evaluator) => evaluator,
            FitnessSource::Task(task) => match options.get_backend() {
                EvaluationBackend::Sequential => Box::new(SequentialEvaluator::new(task)),
                EvaluationBackend::WorkerPool => {
                    Box::new(Parallelizer::new(options.get_worker_count(), task)?)
                }
                EvaluationBackend::ThreadPool => {
                    Box::new(ThreadPoolEvaluator::new(options.get_worker_count(), task)?)
                }
            },
        };

        Ok(Generations {
            options,
            factory: self.factory,
            crossover,
            selection,
            mutation,
            init_rng,
            evaluator: Some(evaluator),
            state: RunState::Pending,
            next_index: 0,
        })
    }

    /// Runs every generation and returns the best individual of the last one.
    pub fn evolve(self) -> Result<EvolutionResult<S>> {
        let mut last = None;
        for step in self.run()? {
            last = Some(step?);
        }
        let (population, generation) = last.ok_or_else(|| {
            GeneticError::Configuration("Maximum iterations cannot be zero".to_string())
        })?;
        let individual = population.best_individual()?.clone();
        let score = individual.try_fitness()?;
        Ok(EvolutionResult {
            individual,
            score,
            generation,
        })
    }
}

enum RunState<S: Solution> {
    Pending,
    Running(Population<S>),
    Finished,
}

/// Lazy, finite sequence of settled generations.
///
/// Yields `max_iterations` snapshots; the first is the evaluated seed
/// population with index 0. The caller may stop early at any point. After an
/// error is yielded the sequence ends. The evaluator is released as soon as
/// the sequence ends, or when it is dropped.
pub struct Generations<S: Solution> {
    options: EvolutionOptions,
    factory: Box<dyn SolutionFactory<S>>,
    crossover: Box<dyn Crossover<S::Alphabet>>,
    selection: Box<dyn SelectionStrategy<S>>,
    mutation: Mutation,
    init_rng: RandomNumberGenerator,
    evaluator: Option<Box<dyn Evaluator<GeneOf<S>>>>,
    state: RunState<S>,
    next_index: usize,
}

impl<S: Solution> Generations<S> {
    /// Number of evaluation workers, or 0 once the evaluator is released.
    pub fn worker_count(&self) -> usize {
        self.evaluator.as_ref().map_or(0, |e| e.worker_count())
    }

    fn seed_population(&mut self) -> Result<Population<S>> {
        let size = self.options.get_population_size();
        let mut individuals = Vec::with_capacity(size);
        for _ in 0..size {
            let solution = self.factory.create();
            let chromosome = solution.initialize_chromosome(&mut self.init_rng);
            individuals.push(Individual::new(solution, chromosome));
        }
        self.settle(&mut individuals)?;
        Ok(Population::new(individuals, 0))
    }

    fn next_generation(&mut self, previous: &Population<S>, index: usize) -> Result<Population<S>> {
        let needed = self.options.get_num_offspring();
        let mut members = Vec::with_capacity(self.options.get_population_size());

        while members.len() < needed {
            let parent1 = self.selection.select(previous)?;
            let parent2 = self.selection.select(previous)?;
            let (mut child1, mut child2) =
                crossover::mate(self.crossover.as_mut(), parent1, parent2, None)?;
            child1.decode(self.mutation.apply(child1.chromosome()));
            child2.decode(self.mutation.apply(child2.chromosome()));

            members.push(child1);
            // With an odd offspring count the last pair's second child is dropped.
            if members.len() < needed {
                members.push(child2);
            }
        }
        self.settle(&mut members)?;

        // Elites keep their cached fitness.
        members.extend(previous.fittest(self.options.get_elite_size())?);
        Ok(Population::new(members, index))
    }

    /// Scores every individual without a cached fitness in one batch.
    fn settle(&mut self, individuals: &mut [Individual<S>]) -> Result<()> {
        let pending: Vec<usize> = individuals
            .iter()
            .enumerate()
            .filter(|(_, individual)| !individual.is_evaluated())
            .map(|(index, _)| index)
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let batch = pending
            .iter()
            .map(|&index| individuals[index].chromosome().genes().to_vec())
            .collect();
        let evaluator = self.evaluator.as_mut().ok_or_else(|| {
            GeneticError::EvaluationFailure("Evaluator has been released".to_string())
        })?;
        let scores = evaluator.evaluate(batch)?;

        if scores.len() != pending.len() {
            return Err(GeneticError::EvaluationFailure(format!(
                "Evaluator returned {} scores for {} individuals",
                scores.len(),
                pending.len()
            )));
        }
        for (index, score) in pending.into_iter().zip(scores) {
            individuals[index].set_fitness(score);
        }
        Ok(())
    }

    fn report(&self, population: &Population<S>) -> Result<()> {
        let log_level = self.options.get_log_level();
        if log_level == LogLevel::None {
            return Ok(());
        }

        let best = population.best_individual()?.try_fitness()?;
        let worst = population.worst_individual()?.try_fitness()?;
        let average = population.average_fitness()?;
        info!(
            generation = population.generation(),
            best, worst, average, "generation settled"
        );

        if log_level == LogLevel::Verbose {
            for individual in population {
                debug!(
                    generation = population.generation(),
                    fitness = ?individual.fitness(),
                    solution = ?individual.solution(),
                    "individual"
                );
            }
        }
        Ok(())
    }

    fn step(&mut self, previous: Option<Population<S>>, index: usize) -> Result<Population<S>> {
        let population = match previous {
            None => self.seed_population()?,
            Some(previous) => self.next_generation(&previous, index)?,
        };
        self.report(&population)?;
        Ok(population)
    }

    fn finish(&mut self) {
        self.state = RunState::Finished;
        self.evaluator = None;
    }
}

impl<S: Solution> Iterator for Generations<S> {
    type Item = Result<(Population<S>, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.options.get_max_iterations() {
            self.finish();
            return None;
        }

        let previous = match mem::replace(&mut self.state, RunState::Finished) {
            RunState::Finished => return None,
            RunState::Pending => None,
            RunState::Running(population) => Some(population),
        };

        let index = self.next_index;
        match self.step(previous, index) {
            Ok(population) => {
                self.state = RunState::Running(population.clone());
                self.next_index += 1;
                Some(Ok((population, index)))
            }
            Err(err) => {
                self.finish();
                Some(Err(err))
            }
        }
    }
}
