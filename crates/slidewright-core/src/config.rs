//! Pipeline configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::MetadataDefaults,
};

/// Component names registered with the rendering layer.
pub const DEFAULT_COMPONENTS: [&str; 11] = [
    "Hero",
    "MetricGrid",
    "ChartSection",
    "CalloutBox",
    "ImageGallery",
    "Timeline",
    "Section",
    "TextCard",
    "BulletList",
    "TextHeavy",
    "DarkSection",
];

/// Main configuration structure for Slidewright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Document namespace settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Metadata normalizer defaults.
    #[serde(default)]
    pub metadata: MetadataDefaults,

    /// Body linter settings.
    #[serde(default)]
    pub lint: LintConfig,
}

/// Document namespace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the documents.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// File extension of documents, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Linter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Component names the linter accepts.
    #[serde(default = "default_components")]
    pub components: Vec<String>,
}

// Default value functions
fn default_content_dir() -> PathBuf {
    PathBuf::from("presentations")
}

fn default_extension() -> String {
    "mdx".to_string()
}

fn default_components() -> Vec<String> {
    DEFAULT_COMPONENTS.iter().map(|c| c.to_string()).collect()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `SLIDEWRIGHT__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("SLIDEWRIGHT").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.dir.as_os_str().is_empty() {
            return Err(CoreError::config("content.dir cannot be empty"));
        }

        if self.content.extension.is_empty() {
            return Err(CoreError::config("content.extension cannot be empty"));
        }

        if self.content.extension.starts_with('.') {
            return Err(CoreError::config(
                "content.extension must not start with a dot",
            ));
        }

        if self.metadata.default_title.is_empty() || self.metadata.default_kind.is_empty() {
            return Err(CoreError::config("metadata defaults cannot be empty"));
        }

        if self.lint.components.is_empty() {
            tracing::warn!("lint.components is empty, every component will be reported");
        }

        Ok(())
    }

    /// File name a document identifier is stored under.
    pub fn filename_for(&self, identifier: &str) -> String {
        format!("{identifier}.{}", self.content.extension)
    }
}
