//! Model registry and CLI-family tags.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Vendor command-line tool used to drive a model.
///
/// This is a closed set: an unrecognized tag in a registry file is a
/// fatal configuration error at parse time, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CliFamily {
    Claude,
    Codex,
    Gemini,
}

impl CliFamily {
    /// Executable name looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for CliFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for CliFamily {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(Self::Claude),
            "codex" => Ok(Self::Codex),
            "gemini" => Ok(Self::Gemini),
            other => Err(CoreError::UnknownCliFamily(other.to_string())),
        }
    }
}

impl TryFrom<String> for CliFamily {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CliFamily> for String {
    fn from(family: CliFamily) -> Self {
        family.program().to_string()
    }
}

/// One entry in the model registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique identifier used in paths and CLI arguments (e.g. "gpt-5.1").
    pub id: String,

    /// Human-readable display name (e.g. "GPT-5.1").
    pub name: String,

    /// Vendor CLI that drives this model.
    pub cli: CliFamily,

    /// Model identifier passed to the vendor CLI.
    pub model: String,
}

impl ModelDescriptor {
    /// Create a new descriptor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cli: CliFamily,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cli,
            model: model.into(),
        }
    }
}

/// The built-in model registry.
pub fn default_registry() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("gpt-5", "GPT-5", CliFamily::Codex, "gpt-5"),
        ModelDescriptor::new("gpt-5.1", "GPT-5.1", CliFamily::Codex, "gpt-5.1"),
        ModelDescriptor::new("gpt-5.2", "GPT-5.2", CliFamily::Codex, "gpt-5.2"),
        ModelDescriptor::new("opus-4.1", "Opus 4.1", CliFamily::Claude, "claude-opus-4-1"),
        ModelDescriptor::new("opus-4.5", "Opus 4.5", CliFamily::Claude, "claude-opus-4-5"),
        ModelDescriptor::new(
            "sonnet-4.5",
            "Sonnet 4.5",
            CliFamily::Claude,
            "claude-sonnet-4-5",
        ),
        ModelDescriptor::new("gemini-3", "Gemini 3", CliFamily::Gemini, "gemini-3-pro-preview"),
        ModelDescriptor::new(
            "gemini-3-flash",
            "Gemini 3 Flash",
            CliFamily::Gemini,
            "gemini-3-flash-preview",
        ),
    ]
}

/// Load a registry override from a JSON file (an array of descriptors).
pub fn load_registry(path: &Path) -> Result<Vec<ModelDescriptor>, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::RegistryRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CoreError::RegistryParse {
        path: path.display().to_string(),
        source,
    })
}

/// Resolve a model-id filter against the registry.
///
/// An empty filter selects every registered model. Any id that matches no
/// registered model is a configuration error listing the valid choices.
pub fn resolve_models(
    registry: &[ModelDescriptor],
    filter: &[String],
) -> Result<Vec<ModelDescriptor>, CoreError> {
    if filter.is_empty() {
        return Ok(registry.to_vec());
    }

    let mut selected = Vec::with_capacity(filter.len());
    for id in filter {
        match registry.iter().find(|m| &m.id == id) {
            Some(model) => selected.push(model.clone()),
            None => {
                return Err(CoreError::UnknownModel {
                    id: id.clone(),
                    valid: registry.iter().map(|m| m.id.clone()).collect(),
                })
            }
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_family_parses_known_tags() {
        assert_eq!("claude".parse::<CliFamily>().unwrap(), CliFamily::Claude);
        assert_eq!("codex".parse::<CliFamily>().unwrap(), CliFamily::Codex);
        assert_eq!("gemini".parse::<CliFamily>().unwrap(), CliFamily::Gemini);
    }

    #[test]
    fn cli_family_rejects_unknown_tag() {
        let err = "cursor".parse::<CliFamily>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCliFamily(tag) if tag == "cursor"));
    }

    #[test]
    fn registry_json_rejects_unknown_family() {
        let json = r#"[{"id": "x", "name": "X", "cli": "cursor", "model": "x-1"}]"#;
        let err = serde_json::from_str::<Vec<ModelDescriptor>>(json).unwrap_err();
        assert!(err.to_string().contains("unknown CLI family 'cursor'"));
    }

    #[test]
    fn registry_json_round_trips() {
        let json = r#"[{"id": "opus-4.5", "name": "Opus 4.5", "cli": "claude", "model": "claude-opus-4-5"}]"#;
        let parsed: Vec<ModelDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].cli, CliFamily::Claude);
        assert_eq!(parsed[0].model, "claude-opus-4-5");
    }

    #[test]
    fn empty_filter_selects_all_models() {
        let registry = default_registry();
        let selected = resolve_models(&registry, &[]).unwrap();
        assert_eq!(selected.len(), registry.len());
    }

    #[test]
    fn filter_preserves_request_order() {
        let registry = default_registry();
        let filter = vec!["gemini-3".to_string(), "gpt-5".to_string()];
        let selected = resolve_models(&registry, &filter).unwrap();
        let ids: Vec<_> = selected.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gemini-3", "gpt-5"]);
    }

    #[test]
    fn unknown_filter_id_lists_valid_choices() {
        let registry = default_registry();
        let filter = vec!["unknown-id".to_string()];
        let err = resolve_models(&registry, &filter).unwrap_err();
        match err {
            CoreError::UnknownModel { id, valid } => {
                assert_eq!(id, "unknown-id");
                assert_eq!(valid.len(), registry.len());
                assert!(valid.contains(&"opus-4.5".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
