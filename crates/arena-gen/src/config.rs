//! Resolved run options shared by every task.

use std::collections::HashSet;
use std::path::PathBuf;

/// Options for one generation run, resolved from the CLI surface.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Spec ids whose artifacts are regenerated even if present and valid.
    pub force: HashSet<String>,

    /// Regenerate every artifact regardless of what exists.
    pub force_all: bool,

    /// Repair attempts per defective artifact.
    pub max_retries: u32,

    /// Root directory artifacts are published under.
    pub output_root: PathBuf,
}

impl GenerateOptions {
    /// Whether a force flag targets this spec.
    pub fn forces(&self, spec_id: &str) -> bool {
        self.force_all || self.force.contains(spec_id)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            force: HashSet::new(),
            force_all: false,
            max_retries: 2,
            output_root: PathBuf::from("public/apps"),
        }
    }
}
