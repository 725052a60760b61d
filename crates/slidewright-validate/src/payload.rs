//! Typed payloads consumed by rendering components.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    fallback,
    schema::{FieldKind, FieldSpec, PayloadSchema, ValidationOutcome},
};

/// A payload record with a fixed validation schema.
pub trait Payload: Serialize + DeserializeOwned + Sized {
    /// Schema enforced on untyped input.
    const SCHEMA: PayloadSchema;

    /// Deterministic placeholder used when validation fails.
    fn fallback() -> Vec<Self>;

    /// Validate untyped input into sanitized records.
    fn validate(input: &Value) -> ValidationOutcome<Vec<Self>> {
        let outcome = Self::SCHEMA.validate(input);
        if !outcome.valid {
            debug!(
                kind = Self::SCHEMA.kind_label,
                errors = outcome.errors.len(),
                "payload rejected"
            );
        }
        outcome
    }

    /// Validated records, or the fallback when validation fails.
    fn validate_or_fallback(input: &Value) -> Vec<Self> {
        Self::validate(input).data_or_else(Self::fallback)
    }
}

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesItem {
    pub name: String,
    pub value: f64,
}

impl ChartSeriesItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A headline metric card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Signed percentage change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// Progress state of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineStatus {
    Completed,
    Current,
    Upcoming,
}

impl TimelineStatus {
    /// Every accepted status name.
    pub const NAMES: &'static [&'static str] = &["completed", "current", "upcoming"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }
}

/// One milestone on a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TimelineStatus>,
}

/// One image of a gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Payload for ChartSeriesItem {
    const SCHEMA: PayloadSchema = PayloadSchema {
        kind_label: "Chart",
        item_label: "Item",
        fields: &[
            FieldSpec::required("name", FieldKind::String),
            FieldSpec::required("value", FieldKind::Number),
        ],
    };

    fn fallback() -> Vec<Self> {
        fallback::chart_fallback(Default::default())
    }
}

impl Payload for MetricCard {
    const SCHEMA: PayloadSchema = PayloadSchema {
        kind_label: "Metric",
        item_label: "Metric",
        fields: &[
            FieldSpec::required("label", FieldKind::String),
            FieldSpec::required("value", FieldKind::Number),
            FieldSpec::optional("unit", FieldKind::String),
            FieldSpec::optional("change", FieldKind::Number),
        ],
    };

    fn fallback() -> Vec<Self> {
        fallback::metrics_fallback()
    }
}

impl Payload for TimelineEntry {
    const SCHEMA: PayloadSchema = PayloadSchema {
        kind_label: "Timeline",
        item_label: "Timeline item",
        fields: &[
            FieldSpec::required("title", FieldKind::String),
            FieldSpec::optional("description", FieldKind::String),
            FieldSpec::optional("date", FieldKind::String),
            FieldSpec::optional("status", FieldKind::Enum(TimelineStatus::NAMES)),
        ],
    };

    fn fallback() -> Vec<Self> {
        fallback::timeline_fallback()
    }
}

impl Payload for ImageItem {
    const SCHEMA: PayloadSchema = PayloadSchema {
        kind_label: "Image",
        item_label: "Image",
        fields: &[
            FieldSpec::required("src", FieldKind::String),
            FieldSpec::required("alt", FieldKind::String),
            FieldSpec::optional("caption", FieldKind::String),
        ],
    };

    fn fallback() -> Vec<Self> {
        fallback::image_fallback()
    }
}

/// Validate chart series data: `{name: string, value: number}[]`.
pub fn validate_chart_data(input: &Value) -> ValidationOutcome<Vec<ChartSeriesItem>> {
    ChartSeriesItem::validate(input)
}

/// Validate metric cards: `{label, value, unit?, change?}[]`.
pub fn validate_metric_data(input: &Value) -> ValidationOutcome<Vec<MetricCard>> {
    MetricCard::validate(input)
}

/// Validate timeline entries: `{title, description?, date?, status?}[]`.
pub fn validate_timeline_data(input: &Value) -> ValidationOutcome<Vec<TimelineEntry>> {
    TimelineEntry::validate(input)
}

/// Validate gallery images: `{src, alt, caption?}[]`.
pub fn validate_image_data(input: &Value) -> ValidationOutcome<Vec<ImageItem>> {
    ImageItem::validate(input)
}

/// The four payload kinds, for callers that pick one at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Chart,
    Metrics,
    Timeline,
    Images,
}

/// Unrecognized payload kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payload kind '{0}' (expected chart, metrics, timeline or images)")]
pub struct UnknownPayloadKind(pub String);

impl PayloadKind {
    pub const ALL: [PayloadKind; 4] = [Self::Chart, Self::Metrics, Self::Timeline, Self::Images];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Metrics => "metrics",
            Self::Timeline => "timeline",
            Self::Images => "images",
        }
    }

    /// Schema enforced for this kind.
    pub fn schema(&self) -> &'static PayloadSchema {
        match self {
            Self::Chart => &ChartSeriesItem::SCHEMA,
            Self::Metrics => &MetricCard::SCHEMA,
            Self::Timeline => &TimelineEntry::SCHEMA,
            Self::Images => &ImageItem::SCHEMA,
        }
    }

    /// Validate untyped input, returning sanitized data as JSON.
    ///
    /// Sanitized records keep the input's values verbatim, so integers stay
    /// integers.
    pub fn validate(&self, input: &Value) -> ValidationOutcome<Value> {
        match self.schema().sanitize(input) {
            Ok(records) => {
                ValidationOutcome::valid(Value::Array(records.into_iter().map(Value::Object).collect()))
            }
            Err(errors) => {
                debug!(kind = self.as_str(), errors = errors.len(), "payload rejected");
                ValidationOutcome::invalid(errors)
            }
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = UnknownPayloadKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" | "data" => Ok(Self::Chart),
            "metrics" | "metric" => Ok(Self::Metrics),
            "timeline" | "items" => Ok(Self::Timeline),
            "images" | "image" => Ok(Self::Images),
            other => Err(UnknownPayloadKind(other.to_string())),
        }
    }
}
