//! Document records produced by the processing pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized presentation metadata.
///
/// `title`, `date` and `kind` are always populated; the normalizer supplies
/// defaults when a document leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationMetadata {
    /// Presentation title.
    pub title: String,

    /// Presentation date, ISO-8601-ish (`YYYY-MM-DD` when defaulted).
    pub date: String,

    /// Presentation kind, written as `type` in documents.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// Optional summary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Every other metadata key, passed through untouched.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

/// Which extraction tier produced a document's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataSource {
    /// A `---` delimited header block at the top of the document.
    HeaderBlock,
    /// An `export const metadata = { ... }` literal inside the document.
    EmbeddedExpression,
    /// Nothing usable was found; every field is defaulted.
    Defaults,
}

impl MetadataSource {
    /// Human readable label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HeaderBlock => "header block",
            Self::EmbeddedExpression => "embedded metadata expression",
            Self::Defaults => "defaults",
        }
    }
}

/// A fully processed document ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Identifier derived from the storage name.
    pub identifier: String,

    /// Normalized metadata.
    pub metadata: PresentationMetadata,

    /// Body text handed to the renderer.
    pub body: String,

    /// Tier that produced the metadata.
    pub source: MetadataSource,
}

impl DocumentRecord {
    /// Page title used by the rendering layer.
    pub fn page_title(&self) -> String {
        format!("{} | Presentation", self.metadata.title)
    }

    /// Description for listings and meta tags, synthesized when absent.
    pub fn summary(&self) -> String {
        match &self.metadata.description {
            Some(description) if !description.is_empty() => description.clone(),
            _ => format!(
                "{} presentation: {}",
                self.metadata.kind, self.metadata.title
            ),
        }
    }

    /// Number of whitespace separated words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}
