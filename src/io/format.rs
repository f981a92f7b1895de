//! Artifact serialization formats

use serde::{Deserialize, Serialize};

/// Supported artifact serialization formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// JSON format (human-readable, the default)
    #[default]
    Json,

    /// YAML format (human-readable, easier to diff)
    Yaml,
}

impl ArtifactFormat {
    /// All formats, in the order the loader probes for them
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Json, ArtifactFormat::Yaml];

    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Yaml => "yaml",
        }
    }

    /// Extensions accepted on load
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            ArtifactFormat::Json => &["json"],
            ArtifactFormat::Yaml => &["yaml", "yml"],
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ArtifactFormat::Json),
            "yaml" | "yml" => Some(ArtifactFormat::Yaml),
            _ => None,
        }
    }
}

/// Configuration for saving artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfig {
    /// Serialization format
    pub format: ArtifactFormat,

    /// Whether to pretty-print JSON
    pub pretty: bool,
}

impl SaveConfig {
    /// Create new save config with format
    pub fn new(format: ArtifactFormat) -> Self {
        Self {
            format,
            pretty: true,
        }
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::new(ArtifactFormat::Json)
    }
}
