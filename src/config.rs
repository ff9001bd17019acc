use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub html: HtmlConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlConfig {
    /// Caption rendered above code blocks
    pub code_label: String,
    pub language_class: bool,
    pub striped_tables: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            code_label: "Code".to_string(),
            language_class: true,
            striped_tables: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TextConfig {
    pub bullet: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            bullet: "-".to_string(),
        }
    }
}

impl Config {
    /// The configuration embedded at build time.
    pub fn compiled_default() -> Self {
        // build.rs has already checked that the embedded file parses.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, falling back to the compiled default
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::compiled_default());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
