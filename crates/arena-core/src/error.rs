//! Core domain errors.
//!
//! Everything here is a pre-flight configuration error: it is raised
//! before any task executes and aborts the whole run. Per-task failures
//! are represented separately as [`crate::GenerationResult::Failed`].

use thiserror::Error;

/// Configuration errors for the arena generator.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A model-id filter named a model that is not in the registry.
    #[error("unknown model id '{id}'; valid choices: {}", .valid.join(", "))]
    UnknownModel { id: String, valid: Vec<String> },

    /// A registry entry carried a CLI-family tag outside the supported set.
    #[error("unknown CLI family '{0}'; supported: claude, codex, gemini")]
    UnknownCliFamily(String),

    /// An example spec file could not be read.
    #[error("failed to read spec file '{path}': {source}")]
    SpecRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An example spec file was not valid YAML for [`crate::ExampleSpec`].
    #[error("failed to parse spec file '{path}': {source}")]
    SpecParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The model registry override file could not be read.
    #[error("failed to read model registry '{path}': {source}")]
    RegistryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The model registry override file was not a valid descriptor array.
    #[error("failed to parse model registry '{path}': {source}")]
    RegistryParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
