//! Vendor AI CLI invocation for the arena generator.
//!
//! This crate maps a model descriptor plus prompt to a concrete
//! subprocess invocation (one fixed flag grammar per CLI family) and
//! runs that invocation with inherited stdio, resolving on exit code.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use arena_core::{CliFamily, ModelDescriptor};
//! use arena_agent_cli::{build_invocation, ProcessRunner, CliInvoker};
//!
//! async fn run_one() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = ModelDescriptor::new("opus-4.5", "Opus 4.5", CliFamily::Claude, "claude-opus-4-5");
//!     let invocation = build_invocation(&model, "Build a pomodoro timer.");
//!     ProcessRunner.invoke(&invocation, Path::new("/tmp/sandbox")).await?;
//!     Ok(())
//! }
//! ```

mod command;
mod error;
mod runner;

// Re-export main types
pub use command::{build_invocation, CliInvocation};
pub use error::AgentCliError;
pub use runner::{CliInvoker, ProcessRunner};
