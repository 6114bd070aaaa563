//! Arena generation orchestrator.
//!
//! Generates one artifact per (example spec × model) pair by invoking
//! vendor AI CLIs inside isolated sandboxes, validating each artifact
//! in a headless browser, retrying on detected defects, and bounding
//! how many invocations run concurrently.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod config;
mod generate;
mod plan;
mod pool;
mod prompt;
mod report;
mod sandbox;
mod validate;

use arena_agent_cli::ProcessRunner;
use arena_core::{default_registry, load_registry, load_specs};

use config::GenerateOptions;
use generate::Generator;
use validate::{ArtifactValidator, HeadlessChrome, NoBrowser};

/// Generate arena apps by driving vendor AI CLIs in sandboxes.
#[derive(Parser, Debug)]
#[command(name = "arena-gen")]
#[command(about = "Generate one artifact per (spec x model) pair", long_about = None)]
struct Cli {
    /// Model ids to generate for (default: every registered model)
    #[arg(value_name = "MODEL_ID")]
    models: Vec<String>,

    /// Force regeneration of the named spec ids
    #[arg(long, value_name = "SPEC_ID", num_args = 1..)]
    force: Vec<String>,

    /// Force regeneration of every spec
    #[arg(long)]
    force_all: bool,

    /// Number of generations to run in parallel
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: u32,

    /// Repair attempts per defective artifact
    #[arg(long, default_value_t = 2)]
    max_retries: u32,

    /// Directory of example spec YAML files
    #[arg(long, default_value = "examples", value_name = "DIR")]
    examples_dir: PathBuf,

    /// Root directory artifacts are published under
    #[arg(long, default_value = "public/apps", value_name = "DIR")]
    output_root: PathBuf,

    /// JSON file overriding the built-in model registry
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "starting arena generation run");

    // Pre-flight: any error from here until scheduling is a fatal
    // configuration error and exits nonzero before any task runs.
    let registry = match &cli.registry {
        Some(path) => load_registry(path)?,
        None => default_registry(),
    };
    let specs = load_specs(&cli.examples_dir)?;
    let tasks = plan::plan(&registry, &specs, &cli.models)?;

    info!(specs = specs.len(), models = registry.len(), "inputs loaded");
    if cli.models.is_empty() {
        info!("generating for: all models");
    } else {
        info!(models = %cli.models.join(", "), "generating for selected models");
    }
    info!(
        combinations = tasks.len(),
        concurrency = cli.concurrency,
        "run planned"
    );
    if cli.force_all {
        info!("force regenerating: everything");
    } else if !cli.force.is_empty() {
        info!(specs = %cli.force.join(", "), "force regenerating");
    }

    let validator: Arc<dyn ArtifactValidator> = match HeadlessChrome::discover() {
        Some(chrome) => Arc::new(chrome),
        None => {
            warn!(
                "no headless browser found; validation is skipped for this \
                 run and every artifact is accepted unchecked (fail-open)"
            );
            Arc::new(NoBrowser)
        }
    };

    let options = GenerateOptions {
        force: cli.force.iter().cloned().collect::<HashSet<_>>(),
        force_all: cli.force_all,
        max_retries: cli.max_retries,
        output_root: cli.output_root.clone(),
    };
    let generator = Arc::new(Generator::new(options, validator, Arc::new(ProcessRunner)));

    let started = Instant::now();
    let stats = pool::run_all(tasks, cli.concurrency as usize, move |task| {
        let generator = Arc::clone(&generator);
        async move { generator.run_task(&task).await }
    })
    .await;

    report::print_summary(&stats, started.elapsed());

    // Per-task failures are already folded into the stats; a completed
    // run exits 0 regardless of them.
    Ok(())
}
