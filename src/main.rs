use clap::Parser;
use glob::glob;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

use spp_with_aco::experiment::run_experiment_file;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Finds short paths with ant colony optimization.", long_about = None)]
struct Cli {
    /// Glob patterns of experiment configs (.yaml or .ron)
    #[clap(required = true)]
    patterns: Vec<String>,

    /// Directory the CSV statistics are written to
    #[clap(short, long, default_value = "results")]
    output_dir: PathBuf,

    /// Hide progress bars
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut failed = false;
    for pattern in &cli.patterns {
        let paths = match glob(pattern) {
            Ok(paths) => paths,
            Err(err) => {
                error!(pattern = %pattern, "invalid pattern: {}", err);
                failed = true;
                continue;
            }
        };

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!("skipping unreadable path: {}", err);
                    continue;
                }
            };

            match run_experiment_file(&path, &cli.output_dir, cli.quiet) {
                Ok(Some(summary)) => match &summary.best {
                    Some(best) => println!("{}: {} (length {})", path.display(), best, best.length()),
                    None => println!("{}: no path found", path.display()),
                },
                Ok(None) => {}
                Err(err) => {
                    error!(config = %path.display(), "experiment failed: {}", err);
                    failed = true;
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
