//! Arena Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - The async runtime
//! - Subprocess execution
//! - The filesystem layout of any particular run
//!
//! All types here represent the core business domain of the arena
//! generator: example specs, the model registry, the (model, spec) task
//! pairing, and per-task generation results.

pub mod error;
pub mod model;
pub mod result;
pub mod spec;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{default_registry, load_registry, resolve_models, CliFamily, ModelDescriptor};
pub use result::{GenerationResult, RunStats};
pub use spec::{load_specs, ExampleSpec};
pub use task::Task;
