//! Command building: (model, prompt) -> subprocess invocation.
//!
//! Each CLI family has a fixed, known flag grammar: non-interactive
//! batch mode, explicit model selection, and an unattended
//! permission-bypass flag. The family set is a closed enum, so an
//! unrecognized family can never fall through to a default here; it is
//! rejected as a typed configuration error at registry-parse time.

use arena_core::{CliFamily, ModelDescriptor};

/// Claude Code caps its output at a default token limit; full artifacts
/// routinely exceed it, so the limit is raised for every invocation.
const CLAUDE_MAX_OUTPUT_TOKENS: &str = "64000";

/// A fully resolved vendor-CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInvocation {
    /// Executable name, looked up on `PATH`.
    pub program: &'static str,

    /// Argument list, prompt included.
    pub args: Vec<String>,

    /// Environment overrides layered on the inherited environment.
    pub env: Vec<(String, String)>,
}

/// Build the invocation for one model and prompt.
///
/// Pure: no filesystem or process state is touched.
pub fn build_invocation(model: &ModelDescriptor, prompt: &str) -> CliInvocation {
    let program = model.cli.program();
    match model.cli {
        CliFamily::Claude => CliInvocation {
            program,
            args: vec![
                "-p".to_string(),
                "--model".to_string(),
                model.model.clone(),
                "--dangerously-skip-permissions".to_string(),
                "--permission-mode".to_string(),
                "bypassPermissions".to_string(),
                prompt.to_string(),
            ],
            env: vec![(
                "CLAUDE_CODE_MAX_OUTPUT_TOKENS".to_string(),
                CLAUDE_MAX_OUTPUT_TOKENS.to_string(),
            )],
        },
        CliFamily::Codex => CliInvocation {
            program,
            args: vec![
                "exec".to_string(),
                "--model".to_string(),
                model.model.clone(),
                "--full-auto".to_string(),
                prompt.to_string(),
            ],
            env: Vec::new(),
        },
        CliFamily::Gemini => CliInvocation {
            program,
            args: vec![
                "--model".to_string(),
                model.model.clone(),
                "--approval-mode".to_string(),
                "yolo".to_string(),
                prompt.to_string(),
            ],
            env: Vec::new(),
        },
    }
}
