//! Rune text configuration
//!
//! Loads text-processing settings from `rune.toml`, with environment
//! variables taking precedence over file values.

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IntlConfig {
    /// Property data settings
    pub properties: PropertiesConfig,
    /// Bidirectional text settings
    pub bidi: BidiConfig,
    /// Line breaking settings
    pub line: LineConfig,
    /// Word segmentation settings
    pub word: WordConfig,
    /// Locale fallback settings
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PropertiesConfig {
    /// TOML document layered over the compiled property tables
    pub overrides: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefaultDirection {
    /// Detect the paragraph direction from its first strong character
    #[default]
    Auto,
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BidiConfig {
    pub default_direction: DefaultDirection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineStrictness {
    Loose,
    Normal,
    #[default]
    Strict,
    Anywhere,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LineWordOption {
    #[default]
    Normal,
    BreakAll,
    KeepAll,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LineConfig {
    pub strictness: LineStrictness,
    pub word_option: LineWordOption,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WordConfig {
    /// Locale of the text being segmented (e.g. "sv"); enables tailorings
    pub content_locale: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackOrder {
    #[default]
    RegionFirst,
    LanguageFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FallbackConfig {
    pub priority: FallbackOrder,
}

/// Parses an environment value with the same spelling the TOML file uses.
fn parse_setting<T: DeserializeOwned>(name: &str, val: &str) -> Option<T> {
    match T::deserialize(StrDeserializer::<ValueError>::new(val)) {
        Ok(setting) => Some(setting),
        Err(err) => {
            tracing::warn!(variable = name, value = val, error = %err, "ignoring invalid setting");
            None
        }
    }
}

fn env_setting<T: DeserializeOwned>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|val| parse_setting(name, &val))
}

impl IntlConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `rune.toml` in the current directory, or
    /// return the default configuration if it is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::warn!(file = CONFIG_FILE, "config file not found, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "config file rejected, using defaults");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that do not parse are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(path) = std::env::var("RUNE_PROPERTY_OVERRIDES") {
            self.properties.overrides = Some(PathBuf::from(path));
        }
        if let Some(direction) = env_setting("RUNE_BIDI_DIRECTION") {
            self.bidi.default_direction = direction;
        }
        if let Some(strictness) = env_setting("RUNE_LINE_STRICTNESS") {
            self.line.strictness = strictness;
        }
        if let Some(word_option) = env_setting("RUNE_LINE_WORD_OPTION") {
            self.line.word_option = word_option;
        }
        if let Ok(locale) = std::env::var("RUNE_CONTENT_LOCALE") {
            self.word.content_locale = Some(locale);
        }
        if let Some(priority) = env_setting("RUNE_FALLBACK_PRIORITY") {
            self.fallback.priority = priority;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
