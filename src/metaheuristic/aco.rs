mod ant;
mod message;
mod params;
mod pheromone_update;
mod supervisor;

pub use ant::{Ant, ZERO_WEIGHT_EPSILON};
pub use message::IterationReport;
pub use params::Params;
pub use pheromone_update::{PheromoneUpdate, UpdateSummary};
pub use supervisor::CsvSupervisor;

use crate::graph::{GraphError, NodeId, PheromoneGraph};
use crate::metaheuristic::supervisor::{Supervisor, SupervisorError};
use crate::metaheuristic::Solution;
use crate::rng::{rng64, RandomSource};

use oorandom::Rand64;
use std::collections::BTreeSet;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

#[derive(Error, Debug)]
pub enum AcoError<IndexType: Debug + Display> {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Graph(#[from] GraphError<IndexType>),
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

/// Requests a running optimization to halt at the next iteration boundary.
/// Clones share the same flag and may be moved to other threads.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Outcome of [`Aco::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary<IndexType> {
    pub iterations: usize,
    pub best: Option<Solution<IndexType>>,
    pub stopped: bool,
}

impl<IndexType: PartialEq + Copy> RunSummary<IndexType> {
    pub fn best_length(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Solution::length)
    }
}

/// Ant colony optimization of shortest paths from a start node to any of a set of targets.
///
/// The scheduler owns the graph. Every iteration lets `num_ants` ants walk on
/// the current pheromone levels, then evaporates and reinforces pheromones.
/// Iterations run strictly one after another, the ants of one iteration are
/// independent of each other.
///
/// ```
/// use spp_with_aco::graph::PheromoneGraph;
/// use spp_with_aco::metaheuristic::aco::{Aco, IterationReport, Params};
///
/// let graph = PheromoneGraph::from_edge_list(&[(1, 2, 2.0), (2, 3, 2.0), (1, 3, 5.0)]).unwrap();
/// let mut aco = Aco::new(graph);
/// aco.start(Params::default().with_seed(1), 1, vec![3]).unwrap();
/// let summary = aco.run(&mut |_: &IterationReport<i32>| {}).unwrap();
///
/// assert_eq!(summary.best.unwrap().nodes(), &[1, 2, 3]);
/// ```
pub struct Aco<IndexType> {
    graph: PheromoneGraph<IndexType>,
    params: Params,
    update: PheromoneUpdate,
    start: Option<IndexType>,
    targets: BTreeSet<IndexType>,
    state: RunState,
    iteration: usize,
    best: Option<Solution<IndexType>>,
    rng: Rand64,
    stop: StopHandle,
}

impl<IndexType: NodeId> Aco<IndexType> {
    pub fn new(graph: PheromoneGraph<IndexType>) -> Self {
        let params = Params::default();
        Aco {
            graph,
            update: PheromoneUpdate::from_params(&params),
            rng: rng64(params.seed),
            params,
            start: None,
            targets: BTreeSet::new(),
            state: RunState::Idle,
            iteration: 0,
            best: None,
            stop: StopHandle::default(),
        }
    }

    /// Validates the run configuration and enters `Running`.
    /// On error nothing is changed, a previous run keeps going.
    pub fn start(
        &mut self,
        params: Params,
        start: IndexType,
        targets: impl IntoIterator<Item = IndexType>,
    ) -> Result<(), AcoError<IndexType>> {
        let targets: BTreeSet<IndexType> = targets.into_iter().collect();
        params.validate().map_err(AcoError::InvalidConfiguration)?;
        self.validate_route(start, &targets)?;

        self.graph.set_min_pheromone(params.min_pheromone);
        self.graph.initialize_pheromones();
        self.update = PheromoneUpdate::from_params(&params);
        self.rng = rng64(params.seed);
        self.params = params;
        self.start = Some(start);
        self.targets = targets;
        self.iteration = 0;
        self.best = None;
        self.stop.clear();
        self.state = RunState::Running;

        info!(
            start = %start,
            targets = ?self.targets,
            ants = self.params.num_ants,
            iterations = self.params.num_iterations,
            seed = %self.params.seed,
            "starting optimization"
        );
        Ok(())
    }

    fn validate_route(&self, start: IndexType, targets: &BTreeSet<IndexType>) -> Result<(), AcoError<IndexType>> {
        if !self.graph.has_node(start) {
            return Err(AcoError::InvalidConfiguration(format!(
                "start node {} is not in the graph",
                start
            )));
        }
        if targets.is_empty() {
            return Err(AcoError::InvalidConfiguration("no target nodes given".into()));
        }
        if let Some(missing) = targets.iter().find(|&&t| !self.graph.has_node(t)) {
            return Err(AcoError::InvalidConfiguration(format!(
                "target node {} is not in the graph",
                missing
            )));
        }
        if targets.contains(&start) {
            return Err(AcoError::InvalidConfiguration(format!(
                "start node {} is also a target",
                start
            )));
        }
        Ok(())
    }

    /// Runs one iteration: construct all paths, track the best path, update pheromones.
    ///
    /// Returns `None` without doing anything if no run is active. A pending stop
    /// request is honored here, before any ant walks.
    pub fn single_iteration(&mut self) -> Result<Option<IterationReport<IndexType>>, AcoError<IndexType>> {
        if self.state != RunState::Running {
            return Ok(None);
        }
        if self.stop.is_stopped() {
            info!(iteration = self.iteration, "optimization stopped");
            self.state = RunState::Stopped;
            return Ok(None);
        }
        let start = match self.start {
            Some(start) if self.iteration < self.params.num_iterations => start,
            _ => {
                self.state = RunState::Idle;
                return Ok(None);
            }
        };

        // drawn up front so the outcome does not depend on the order ants finish in
        let seeds: Vec<u128> = (0..self.params.num_ants)
            .map(|_| self.rng.next_seed())
            .collect();
        let start_time = Instant::now();
        let solutions = self.construct(start, &seeds)?;
        let cpu_time = start_time.elapsed();
        self.iteration += 1;

        for (ant, solution) in solutions.iter().enumerate() {
            debug!(
                iteration = self.iteration,
                ant,
                length = solution.length(),
                "path {}",
                solution
            );
        }

        let mut improved = false;
        if let Some(candidate) = message::iteration_best(&solutions) {
            if candidate.length() < self.best_length() {
                info!(
                    iteration = self.iteration,
                    length = candidate.length(),
                    "found shorter path {}",
                    candidate
                );
                self.best = Some(candidate.clone());
                improved = true;
            }
        }

        let summary = self
            .update
            .apply(&mut self.graph, &solutions, self.best.as_ref())?;
        trace!(
            iteration = self.iteration,
            evaporated = summary.evaporated,
            deposited = summary.deposited,
            reinforced = summary.reinforced_paths,
            "pheromones updated"
        );

        if self.iteration >= self.params.num_iterations {
            self.state = RunState::Idle;
        }

        Ok(Some(IterationReport {
            iteration: self.iteration,
            solutions,
            best: self.best.clone(),
            improved,
            cpu_time,
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn construct(&self, start: IndexType, seeds: &[u128]) -> Result<Vec<Solution<IndexType>>, GraphError<IndexType>> {
        let ant = Ant::new(&self.graph, start, &self.targets, self.params.alpha, self.params.beta);
        seeds
            .iter()
            .map(|&seed| ant.get_solution(&mut rng64(seed)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn construct(&self, start: IndexType, seeds: &[u128]) -> Result<Vec<Solution<IndexType>>, GraphError<IndexType>> {
        use rayon::prelude::*;

        let ant = Ant::new(&self.graph, start, &self.targets, self.params.alpha, self.params.beta);
        seeds
            .par_iter()
            .map(|&seed| ant.get_solution(&mut rng64(seed)))
            .collect()
    }

    /// Iterates until the iteration bound or a stop request, handing every report to the supervisor.
    pub fn run<S>(&mut self, supervisor: &mut S) -> Result<RunSummary<IndexType>, AcoError<IndexType>>
    where
        S: Supervisor<IndexType> + ?Sized,
    {
        while let Some(report) = self.single_iteration()? {
            supervisor.iteration_complete(&report)?;
        }
        supervisor.finish()?;

        match &self.best {
            Some(best) => info!(
                iterations = self.iteration,
                length = best.length(),
                "optimization finished with {}",
                best
            ),
            None => warn!(
                iterations = self.iteration,
                "optimization finished without reaching any target"
            ),
        }

        Ok(RunSummary {
            iterations: self.iteration,
            best: self.best.clone(),
            stopped: self.state == RunState::Stopped,
        })
    }

    /// Requests a halt at the next iteration boundary.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Discards the run state and restores the initial pheromone levels.
    pub fn reset(&mut self) {
        self.graph.initialize_pheromones();
        self.start = None;
        self.targets.clear();
        self.iteration = 0;
        self.best = None;
        self.stop.clear();
        self.state = RunState::Idle;
    }

    /// Replaces the graph. Any run on the old graph is discarded.
    pub fn load_graph(&mut self, graph: PheromoneGraph<IndexType>) -> PheromoneGraph<IndexType> {
        let old = std::mem::replace(&mut self.graph, graph);
        self.reset();
        old
    }

    pub fn graph(&self) -> &PheromoneGraph<IndexType> {
        &self.graph
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of finished iterations of the current run.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn best(&self) -> Option<&Solution<IndexType>> {
        self.best.as_ref()
    }

    pub fn best_length(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Solution::length)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}
