//! Pass-through subprocess execution of vendor CLI invocations.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::command::CliInvocation;
use crate::error::AgentCliError;

/// Seam over subprocess execution.
///
/// Production code uses [`ProcessRunner`]; tests inject scripted
/// invokers that fabricate artifacts without spawning anything.
#[async_trait]
pub trait CliInvoker: Send + Sync {
    /// Run one invocation to completion with `working_dir` as its CWD.
    async fn invoke(&self, invocation: &CliInvocation, working_dir: &Path)
        -> Result<(), AgentCliError>;
}

/// Spawns the vendor CLI with inherited stdio.
///
/// The child's stdout/stderr pass straight through to the
/// orchestrator's own streams; nothing is captured or parsed. Success
/// is exit code 0 and nothing else — whether a useful artifact exists
/// is decided later by the presence check and the validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CliInvoker for ProcessRunner {
    async fn invoke(
        &self,
        invocation: &CliInvocation,
        working_dir: &Path,
    ) -> Result<(), AgentCliError> {
        info!(
            program = invocation.program,
            working_dir = %working_dir.display(),
            "spawning vendor CLI"
        );
        debug!(args = ?invocation.args, "full invocation");

        let mut cmd = Command::new(invocation.program);
        cmd.args(&invocation.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|source| AgentCliError::Spawn {
            program: invocation.program.to_string(),
            source,
        })?;

        let status = child.wait().await.map_err(|source| AgentCliError::Spawn {
            program: invocation.program.to_string(),
            source,
        })?;

        match status.code() {
            Some(0) => {
                info!(program = invocation.program, "vendor CLI exited cleanly");
                Ok(())
            }
            Some(code) => Err(AgentCliError::ExitStatus {
                program: invocation.program.to_string(),
                code,
            }),
            None => Err(AgentCliError::Terminated {
                program: invocation.program.to_string(),
            }),
        }
    }
}
