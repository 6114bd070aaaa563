//! Example specs: the content side of every (spec × model) pairing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One example app specification, loaded from a YAML file.
///
/// Specs are immutable once loaded; the generator only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSpec {
    /// Unique identifier used in paths (e.g. "pomodoro-timer").
    pub id: String,

    /// Human-readable title shown in prompts and logs.
    pub title: String,

    /// The full prompt text describing what to build.
    pub prompt: String,

    /// Optional tag set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Load every `*.yaml` / `*.yml` spec in `dir`, sorted by id.
pub fn load_specs(dir: &Path) -> Result<Vec<ExampleSpec>, CoreError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CoreError::SpecRead {
        path: dir.display().to_string(),
        source,
    })?;

    let mut specs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::SpecRead {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yaml" || e == "yml");
        if !is_yaml {
            continue;
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| CoreError::SpecRead {
            path: path.display().to_string(),
            source,
        })?;
        let spec: ExampleSpec =
            serde_yaml::from_str(&contents).map_err(|source| CoreError::SpecParse {
                path: path.display().to_string(),
                source,
            })?;
        specs.push(spec);
    }

    specs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_spec(dir: &Path, file: &str, contents: &str) {
        std::fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn loads_yaml_specs_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        write_spec(
            dir.path(),
            "b.yaml",
            "id: zebra\ntitle: Zebra\nprompt: Build a zebra.\n",
        );
        write_spec(
            dir.path(),
            "a.yml",
            "id: ant\ntitle: Ant\nprompt: Build an ant.\ntags: [animals, tiny]\n",
        );
        write_spec(dir.path(), "notes.txt", "not a spec");

        let specs = load_specs(dir.path()).unwrap();
        let ids: Vec<_> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ant", "zebra"]);
        assert_eq!(specs[0].tags, vec!["animals", "tiny"]);
        assert!(specs[1].tags.is_empty());
    }

    #[test]
    fn invalid_yaml_names_the_offending_file() {
        let dir = tempfile::tempdir().unwrap();
        write_spec(dir.path(), "broken.yaml", "id: [unterminated\n");

        let err = load_specs(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn missing_directory_is_a_read_error() {
        let err = load_specs(Path::new("/nonexistent/specs-dir")).unwrap_err();
        assert!(matches!(err, CoreError::SpecRead { .. }));
    }
}
