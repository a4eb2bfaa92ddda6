use crate::experiment_config::{ExperimentConfig, ExperimentConfigError};
use crate::metaheuristic::aco::{CsvSupervisor, IterationReport};
use crate::metaheuristic::{Aco, AcoError, RunSummary, Supervisor, SupervisorError};

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ExperimentConfigError),
    #[error(transparent)]
    Aco(#[from] AcoError<usize>),
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    #[error("could not create output: {0}")]
    Io(#[from] std::io::Error),
}

/// Forwards reports to the statistics writer and advances the progress bar.
struct ProgressSupervisor<'a, W: Write> {
    statistics: CsvSupervisor<W>,
    progress: Option<&'a ProgressBar>,
}

impl<'a, W: Write> Supervisor<usize> for ProgressSupervisor<'a, W> {
    fn iteration_complete(&mut self, report: &IterationReport<usize>) -> Result<(), SupervisorError> {
        if let Some(progress) = self.progress {
            progress.inc(1);
            if report.improved {
                progress.set_message(&format!("best {}", report.best_length()));
            }
        }
        self.statistics.iteration_complete(report)
    }

    fn finish(&mut self) -> Result<(), SupervisorError> {
        Supervisor::<usize>::finish(&mut self.statistics)
    }
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{prefix} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .progress_chars("=> "),
    );
    progress
}

/// Runs a single experiment and writes its statistics as CSV into `writer`.
/// Finished experiments are skipped and yield `None`.
pub fn run_experiment<W: Write>(
    config: &ExperimentConfig,
    writer: W,
    progress: Option<&ProgressBar>,
) -> Result<Option<RunSummary<usize>>, ExperimentError> {
    let experiment = config.experiment.cfg();
    if experiment.finished {
        return Ok(None);
    }

    let params = config.params()?;
    let graph = config.graph()?;
    let problem = config.route.problem();
    info!(
        nodes = graph.order(),
        edges = graph.size(),
        "graph ready"
    );

    let mut aco = Aco::new(graph);
    aco.start(params, problem.start, problem.targets)?;

    let mut supervisor = ProgressSupervisor {
        statistics: CsvSupervisor::from_writer(experiment.aggregation_rate, writer),
        progress,
    };
    let summary = aco.run(&mut supervisor)?;

    Ok(Some(summary))
}

/// Loads the config at `path` and writes `<output_dir>/<file stem>.csv`.
pub fn run_experiment_file(
    path: &Path,
    output_dir: &Path,
    quiet: bool,
) -> Result<Option<RunSummary<usize>>, ExperimentError> {
    let config = ExperimentConfig::from_file(path)?;
    if config.experiment.cfg().finished {
        info!(config = %path.display(), "skipping finished experiment");
        return Ok(None);
    }

    fs::create_dir_all(output_dir)?;
    let output = output_file(path, output_dir);
    let file = File::create(&output)?;

    let progress = if quiet {
        None
    } else {
        let progress = progress_bar(config.algorithm.aco().num_iterations as u64);
        progress.set_prefix(&path.display().to_string());
        Some(progress)
    };

    let summary = run_experiment(&config, file, progress.as_ref())?;
    if let Some(progress) = progress {
        progress.finish();
    }
    info!(config = %path.display(), output = %output.display(), "experiment done");

    Ok(summary)
}

fn output_file(config: &Path, output_dir: &Path) -> PathBuf {
    let stem = config
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "experiment".to_string());
    output_dir.join(format!("{}.csv", stem))
}
