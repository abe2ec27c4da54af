//! Configuration: optional TOML file, then environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phenomix_graph::GraphConfig;
use phenomix_llm::LlmConfig;
use serde::Deserialize;

/// Default config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "phenomix.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhenomixConfig {
    pub graph: GraphConfig,
    pub llm: LlmConfig,
    pub guard: GuardConfig,
}

/// Screening of generated queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Run generated queries even when they contain write clauses.
    pub allow_writes: bool,
}

impl PhenomixConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load with priority: environment > file > defaults.
    ///
    /// An explicit path must exist; otherwise `./phenomix.toml` and then
    /// `<config dir>/phenomix/config.toml` are tried.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => match default_locations().into_iter().find(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("Loading configuration from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment variables.
    ///
    /// - NEO4J_URI, NEO4J_USER, NEO4J_PASSWORD, NEO4J_DATABASE
    /// - OPENAI_API_KEY, OPENAI_BASE_URL, PHENOMIX_MODEL
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = lookup("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Some(database) = lookup("NEO4J_DATABASE") {
            self.graph.database = database;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup("PHENOMIX_MODEL") {
            self.llm.model = model;
        }
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("phenomix").join("config.toml"));
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PhenomixConfig::default();
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.graph.database, "neo4j");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.timeout_secs, 120);
        assert!(config.llm.api_key.is_none());
        assert!(!config.guard.allow_writes);
    }

    #[test]
    fn test_partial_toml() {
        let config = PhenomixConfig::from_toml(
            r#"
[graph]
uri = "bolt://graph.internal:7687"
password = "secret"

[llm]
model = "gpt-4o"
timeout_secs = 30

[guard]
allow_writes = true
"#,
        )
        .unwrap();
        assert_eq!(config.graph.uri, "bolt://graph.internal:7687");
        assert_eq!(config.graph.password, "secret");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert!(config.guard.allow_writes);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = PhenomixConfig::from_toml("[graph]\nuri = \"bolt://file:7687\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("NEO4J_URI", "bolt://env:7687"),
            ("NEO4J_PASSWORD", "pw"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PHENOMIX_MODEL", ""),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.graph.uri, "bolt://env:7687");
        assert_eq!(config.graph.password, "pw");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        // Blank values do not override.
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(PhenomixConfig::load(Some(Path::new("/nonexistent/phenomix.toml"))).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(PhenomixConfig::from_toml("[graph\nuri = 1").is_err());
    }
}
