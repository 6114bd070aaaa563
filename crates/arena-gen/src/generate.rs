//! Per-task generation pipeline.
//!
//! Drives one task through its whole state machine: skip check, sandbox
//! creation, initial CLI invocation, headless validation, the bounded
//! repair loop, and artifact publication. Every per-task error is
//! converted to the tri-state [`GenerationResult`] at this boundary so
//! no single task can abort the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use arena_agent_cli::{build_invocation, AgentCliError, CliInvoker};
use arena_core::{GenerationResult, Task};

use crate::config::GenerateOptions;
use crate::prompt;
use crate::sandbox::Sandbox;
use crate::validate::{ArtifactValidator, ValidationOutcome};

/// Per-task failures, folded into [`GenerationResult::Failed`] at the
/// task boundary.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to create sandbox: {0}")]
    Sandbox(#[from] std::io::Error),

    #[error(transparent)]
    Process(#[from] AgentCliError),

    #[error("CLI exited cleanly but produced no output/index.html")]
    ArtifactMissing,

    #[error("failed to publish artifact to '{dest}': {source}")]
    Publish {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs tasks to their terminal result.
pub struct Generator {
    options: GenerateOptions,
    validator: Arc<dyn ArtifactValidator>,
    invoker: Arc<dyn CliInvoker>,
}

impl Generator {
    pub fn new(
        options: GenerateOptions,
        validator: Arc<dyn ArtifactValidator>,
        invoker: Arc<dyn CliInvoker>,
    ) -> Self {
        Self {
            options,
            validator,
            invoker,
        }
    }

    /// Drive one task to a terminal result. Infallible by design:
    /// failures become [`GenerationResult::Failed`], nothing escapes.
    pub async fn run_task(&self, task: &Task) -> GenerationResult {
        let dest = task.artifact_path(&self.options.output_root);

        if !self.options.forces(&task.spec.id) && self.skippable(task, &dest).await {
            info!(task = %task.key(), "skipped (artifact exists and validates)");
            return GenerationResult::Skipped;
        }

        match self.generate(task, &dest).await {
            Ok(()) => GenerationResult::Generated,
            Err(e) => {
                error!(task = %task.key(), error = %e, "generation failed");
                GenerationResult::Failed
            }
        }
    }

    /// Skip only when the existing destination artifact passes the same
    /// validation a fresh one would undergo. An existing-but-broken
    /// artifact is regenerated even without a force flag.
    async fn skippable(&self, task: &Task, dest: &Path) -> bool {
        if !dest.exists() {
            return false;
        }

        match self.validator.check(dest).await {
            ValidationOutcome::Checked(result) if result.passed() => true,
            ValidationOutcome::Checked(result) => {
                info!(
                    task = %task.key(),
                    defects = result.errors.len(),
                    "existing artifact fails validation; regenerating"
                );
                false
            }
            ValidationOutcome::Unavailable => {
                warn!(
                    task = %task.key(),
                    "validation unavailable; treating existing artifact as valid (fail-open)"
                );
                true
            }
        }
    }

    async fn generate(&self, task: &Task, dest: &Path) -> Result<(), GenerateError> {
        let sandbox = Sandbox::create().await?;
        info!(task = %task.key(), sandbox = %sandbox.path().display(), "sandbox ready");

        let outcome = self.generate_in(task, &sandbox, dest).await;

        // Exactly once, on every terminal path.
        sandbox.cleanup();
        outcome
    }

    async fn generate_in(
        &self,
        task: &Task,
        sandbox: &Sandbox,
        dest: &Path,
    ) -> Result<(), GenerateError> {
        let invocation = build_invocation(&task.model, &prompt::initial(&task.spec));
        self.invoker.invoke(&invocation, sandbox.path()).await?;

        let artifact = sandbox.artifact_path();
        if !artifact.exists() {
            return Err(GenerateError::ArtifactMissing);
        }

        self.repair_loop(task, sandbox, &artifact).await;

        publish(&artifact, dest)?;
        info!(task = %task.key(), dest = %dest.display(), "artifact published");
        Ok(())
    }

    /// Validate and, on defects, re-invoke the same tool in the same
    /// sandbox with a fix prompt, up to `max_retries` times.
    ///
    /// Exhausted attempts are a soft outcome: the best-effort artifact
    /// is still published afterwards, with a persistent-defect warning.
    async fn repair_loop(&self, task: &Task, sandbox: &Sandbox, artifact: &Path) {
        let mut attempts = 0u32;
        loop {
            let errors = match self.validator.check(artifact).await {
                ValidationOutcome::Unavailable => {
                    warn!(
                        task = %task.key(),
                        "validation unavailable; accepting artifact unchecked (fail-open)"
                    );
                    return;
                }
                ValidationOutcome::Checked(result) if result.passed() => {
                    info!(task = %task.key(), attempts, "artifact validates clean");
                    return;
                }
                ValidationOutcome::Checked(result) => result.errors,
            };

            if attempts >= self.options.max_retries {
                warn!(
                    task = %task.key(),
                    attempts,
                    defects = errors.len(),
                    "defects persist after repair attempts; publishing best-effort artifact"
                );
                return;
            }

            attempts += 1;
            info!(
                task = %task.key(),
                attempt = attempts,
                defects = errors.len(),
                "validation failed; requesting in-place fix"
            );

            let fix = build_invocation(&task.model, &prompt::fix(&task.spec, &errors));
            if let Err(e) = self.invoker.invoke(&fix, sandbox.path()).await {
                // The artifact already exists; a failed repair run
                // degrades to delivering it as-is rather than failing
                // the task.
                warn!(
                    task = %task.key(),
                    error = %e,
                    "repair invocation failed; publishing best-effort artifact"
                );
                return;
            }
        }
    }
}

/// Copy the sandboxed artifact to its deterministic destination.
fn publish(artifact: &Path, dest: &Path) -> Result<(), GenerateError> {
    let copy = || -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(artifact, dest)?;
        Ok(())
    };
    copy().map_err(|source| GenerateError::Publish {
        dest: dest.to_path_buf(),
        source,
    })
}
