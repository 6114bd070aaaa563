//! Error types for vendor CLI invocation.

use thiserror::Error;

/// Errors from spawning or waiting on a vendor CLI process.
///
/// All of these are per-task failures; none abort the run.
#[derive(Debug, Error)]
pub enum AgentCliError {
    /// The vendor CLI could not be spawned (missing binary, permission
    /// denial).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The vendor CLI ran but exited non-zero.
    #[error("'{program}' exited with code {code}")]
    ExitStatus { program: String, code: i32 },

    /// The vendor CLI was terminated by a signal and left no exit code.
    #[error("'{program}' terminated without an exit code")]
    Terminated { program: String },
}
