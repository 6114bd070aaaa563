//! The (model, spec) task pairing.

use std::path::{Path, PathBuf};

use crate::model::ModelDescriptor;
use crate::spec::ExampleSpec;

/// One generation task: a single (model, spec) pairing.
///
/// Identity is `(model.id, spec.id)`, unique within a run. A task is
/// created by the planner, consumed exactly once by the scheduler, and
/// terminal once a [`crate::GenerationResult`] is recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub model: ModelDescriptor,
    pub spec: ExampleSpec,
}

impl Task {
    pub fn new(model: ModelDescriptor, spec: ExampleSpec) -> Self {
        Self { model, spec }
    }

    /// Log prefix, `<model-id>/<spec-id>`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.model.id, self.spec.id)
    }

    /// Deterministic destination path for this task's artifact under the
    /// model-scoped output root.
    pub fn artifact_path(&self, output_root: &Path) -> PathBuf {
        output_root
            .join(&self.model.id)
            .join(&self.spec.id)
            .join("index.html")
    }
}
