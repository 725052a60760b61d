//! Frontmatter extraction and metadata normalization.
//!
//! Metadata is located with a three tier strategy, first match wins:
//!
//! 1. A YAML header block delimited by `---` lines at the very start of the text.
//! 2. An embedded `export const metadata = { ... }` object literal, parsed with
//!    [`crate::literal`] and never evaluated.
//! 3. Nothing: every field is defaulted.
//!
//! Whatever was found is passed through [`normalize_metadata`], which only fills
//! in defaults and never fails.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    content::{MetadataSource, PresentationMetadata},
    error::{CoreError, Result},
    literal::{self, LiteralError},
};

/// Header block delimiter.
pub const DELIMITER: &str = "---";

/// Default title for documents that do not declare one.
pub const DEFAULT_TITLE: &str = "Untitled Presentation";

/// Default kind for documents that do not declare one.
pub const DEFAULT_KIND: &str = "presentation";

/// Keys consumed by the normalizer; everything else lands in `extra`.
const KNOWN_KEYS: [&str; 5] = ["title", "date", "type", "kind", "description"];

static METADATA_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+const\s+metadata\s*=\s*").expect("valid metadata expression regex")
});

/// Defaults applied by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDefaults {
    /// Title used when a document has none.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Kind used when a document has none.
    #[serde(default = "default_kind")]
    pub default_kind: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_kind() -> String {
    DEFAULT_KIND.to_string()
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            default_kind: default_kind(),
        }
    }
}

/// Raw metadata and body pulled out of a document, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrontmatter<'a> {
    /// Extracted key/value mapping (empty for the defaults tier).
    pub fields: Map<String, Value>,
    /// Body text.
    pub body: &'a str,
    /// Tier that produced `fields`.
    pub source: MetadataSource,
}

/// Split a leading `---` header block from the body.
///
/// The opening marker must be the first line of the text and a later line must
/// consist of the marker alone. Returns `(header, body)` where the body starts
/// after the closing marker's line break. Text without a closing marker has no
/// header.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(DELIMITER)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Locate and parse an embedded `export const metadata = { ... }` literal.
///
/// Returns `None` when the document has no such declaration, and the parse error
/// when the declaration is present but is not a plain object literal.
pub fn find_metadata_expression(
    content: &str,
) -> Option<std::result::Result<Map<String, Value>, LiteralError>> {
    let found = METADATA_EXPRESSION.find(content)?;
    let tail = &content[found.end()..];
    if !tail.starts_with('{') {
        return None;
    }

    let parsed = literal::parse_literal_prefix(tail).and_then(|(value, _)| match value {
        Value::Object(map) => Ok(map),
        _ => Err(LiteralError {
            offset: found.end(),
            message: "metadata is not an object literal".to_string(),
        }),
    });
    Some(parsed)
}

/// Run the tiered extraction over raw document text.
///
/// Only a malformed header block is an error. A malformed embedded expression
/// silently falls through to defaults.
pub fn extract_raw<'a>(content: &'a str, identifier: &str) -> Result<RawFrontmatter<'a>> {
    if let Some((header, body)) = split_frontmatter(content) {
        debug!(id = identifier, "found header block");
        return Ok(RawFrontmatter {
            fields: parse_header(header, identifier)?,
            body,
            source: MetadataSource::HeaderBlock,
        });
    }

    match find_metadata_expression(content) {
        Some(Ok(fields)) => {
            debug!(id = identifier, "found embedded metadata expression");
            return Ok(RawFrontmatter {
                fields,
                body: content,
                source: MetadataSource::EmbeddedExpression,
            });
        }
        Some(Err(e)) => {
            debug!(id = identifier, error = %e, "ignoring malformed metadata expression");
        }
        None => {}
    }

    Ok(RawFrontmatter {
        fields: Map::new(),
        body: content,
        source: MetadataSource::Defaults,
    })
}

/// Extract normalized metadata and body from raw document text.
pub fn extract_frontmatter(
    content: &str,
    identifier: &str,
    defaults: &MetadataDefaults,
) -> Result<(PresentationMetadata, String, MetadataSource)> {
    let raw = extract_raw(content, identifier)?;
    let metadata = normalize_metadata(&raw.fields, defaults, today());
    Ok((metadata, raw.body.to_string(), raw.source))
}

fn parse_header(header: &str, identifier: &str) -> Result<Map<String, Value>> {
    if header.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_yaml::from_str(header)
        .map_err(|e| CoreError::frontmatter(identifier, e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => {
            debug!(id = identifier, "header block is not a mapping");
            Ok(Map::new())
        }
    }
}

/// Current UTC date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fill in defaults for a possibly partial metadata mapping.
///
/// Title, date and kind take the first truthy value present and fall back to
/// `defaults` (or `today` for the date). The kind is read from `type`, then
/// `kind`. Description is passed through; unknown keys go to `extra`.
pub fn normalize_metadata(
    fields: &Map<String, Value>,
    defaults: &MetadataDefaults,
    today: NaiveDate,
) -> PresentationMetadata {
    let title = fields
        .get("title")
        .and_then(truthy_text)
        .unwrap_or_else(|| defaults.default_title.clone());

    let date = fields
        .get("date")
        .and_then(truthy_text)
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

    let kind = ["type", "kind"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(truthy_text))
        .unwrap_or_else(|| defaults.default_kind.clone());

    let description = fields.get("description").and_then(|value| match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    });

    let extra = fields
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    PresentationMetadata {
        title,
        date,
        kind,
        description,
        extra,
    }
}

/// Text for a truthy scalar, `None` for anything that should be defaulted.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
