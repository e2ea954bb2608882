use crate::errors::{IoError, ParseError};
use extkind::{Catalog, Classifier};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(vfile::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse classification config")]
    #[diagnostic(code(vfile::config::parse))]
    Parse(#[from] ParseError),
}

/// An extension list written either as a TOML array or as a comma-joined string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtensionList {
    Joined(String),
    Tokens(Vec<String>),
}
impl Default for ExtensionList {
    fn default() -> Self {
        Self::Tokens(Vec::new())
    }
}
impl ExtensionList {
    pub fn to_catalog(&self) -> Catalog {
        match self {
            Self::Joined(joined) => Catalog::parse(joined),
            Self::Tokens(tokens) => Catalog::from_tokens(tokens),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Extensions {
    #[serde(default)]
    pub text: ExtensionList,
    #[serde(default)]
    pub output_ignore: ExtensionList,
}

/// Classification settings, read once at startup and never mutated afterwards.
///
/// ```toml
/// [extensions]
/// text = ["html", "css", "scss"]
/// output_ignore = "psd,ai"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extensions: Extensions,
}
impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::read(path, error))?;

        let parsed = toml::from_str(&content)
            .map_err(|error| ParseError::new(path, error))?;

        log::debug!("loaded classification config from: {}", path.display());

        Ok(parsed)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|error| ParseError::new("<inline>", error).into())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(
            self.extensions.text.to_catalog(),
            self.extensions.output_ignore.to_catalog(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_and_joined_strings() {
        let config = Config::from_toml_str(
            r#"
            [extensions]
            text = ["html", "vm", "CSS", "scss"]
            output_ignore = "psd, ai"
            "#,
        )
        .unwrap();

        let classifier = config.classifier();

        assert!(classifier.is_text_extension("css"));
        assert!(classifier.is_text_extension("SCSS"));
        assert!(!classifier.is_text_extension("png"));
        assert!(classifier.is_output_ignored("ai"));
        assert!(!classifier.is_output_ignored("a"));
    }

    #[test]
    fn test_missing_catalogs_match_nothing() {
        let config = Config::from_toml_str("").unwrap();
        let classifier = config.classifier();

        assert!(classifier.text.is_empty());
        assert!(classifier.output_ignored.is_empty());
        assert!(!classifier.is_text_extension("css"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("[extensions\ntext = 1");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfile.toml");
        fs::write(&path, "[extensions]\ntext = \"js,css\"\n").unwrap();

        let classifier = Config::from_file(&path).unwrap().classifier();

        assert_eq!(classifier.text.to_string(), "js,css");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = Config::from_file(dir.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
