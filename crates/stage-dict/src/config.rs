use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DictError, DictResult};

/// Raw OpenCC dictionary directory.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/BYVoid/OpenCC/refs/heads/master/data/dictionary/";

/// One merged output file and the sources concatenated into it, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictOutput {
    pub name: String,
    pub sources: Vec<String>,
}

impl DictOutput {
    pub fn new(name: impl Into<String>, sources: &[&str]) -> Self {
        Self {
            name: name.into(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Configuration for the dictionary updater.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictConfig {
    /// Prefix joined with each source name to form its URL.
    pub base_url: String,
    /// Directory the merged files are written to.
    pub output_dir: PathBuf,
    pub outputs: Vec<DictOutput>,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            output_dir: PathBuf::from("public"),
            outputs: vec![
                DictOutput::new("s2t.txt", &["STCharacters.txt", "STPhrases.txt"]),
                DictOutput::new("t2s.txt", &["TSCharacters.txt", "TSPhrases.txt"]),
            ],
        }
    }
}

impl DictConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> DictResult<Self> {
        toml::from_str(s).map_err(|e| DictError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> DictResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DictError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Path an output is written to.
    pub fn output_path(&self, output: &DictOutput) -> PathBuf {
        self.output_dir.join(&output.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DictConfig::default();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.output_dir, PathBuf::from("public"));
        assert_eq!(c.outputs.len(), 2);
        assert_eq!(c.outputs[0].name, "s2t.txt");
        assert_eq!(c.outputs[0].sources, vec!["STCharacters.txt", "STPhrases.txt"]);
        assert_eq!(c.outputs[1].name, "t2s.txt");
        assert_eq!(c.outputs[1].sources, vec!["TSCharacters.txt", "TSPhrases.txt"]);
        assert_eq!(c.output_path(&c.outputs[1]), PathBuf::from("public/t2s.txt"));
    }

    #[test]
    fn toml_overrides_outputs() {
        let c = DictConfig::from_toml_str(
            r#"
            output_dir = "assets/dict"

            [[outputs]]
            name = "hk.txt"
            sources = ["HKVariants.txt"]
            "#,
        )
        .unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.output_dir, PathBuf::from("assets/dict"));
        assert_eq!(c.outputs, vec![DictOutput::new("hk.txt", &["HKVariants.txt"])]);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            DictConfig::from_toml_str("mirror = \"x\""),
            Err(DictError::Config(_))
        ));
    }
}
