//! Slidewright Validate Library
//!
//! Runtime validation for the typed payloads embedded in presentation documents
//! (chart series, metric cards, timeline entries, image sets), deterministic
//! fallback data for when validation fails, and closed-set prop normalizers.
//!
//! # Modules
//!
//! - [`schema`] - Table driven, fail-closed object-array validator
//! - [`payload`] - Payload record types and per-kind validators
//! - [`fallback`] - Placeholder payloads
//! - [`props`] - Layout, emphasis, chart type and color scheme props
//! - [`coerce`] - Lenient alias-based reshaping of chart and metric records
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use slidewright_validate::{ChartType, chart_fallback, validate_chart_data};
//!
//! let outcome = validate_chart_data(&json!([{ "name": "Q1", "value": "bad" }]));
//! assert!(!outcome.valid);
//!
//! let series = outcome.data_or_else(|| chart_fallback(ChartType::Line));
//! assert_eq!(series.len(), 2);
//! ```

pub mod coerce;
pub mod fallback;
pub mod payload;
pub mod props;
pub mod schema;

mod proptests;

pub use coerce::{coerce_chart_data, coerce_metric_data, coerce_payload};
pub use fallback::{chart_fallback, fallback_for, image_fallback, metrics_fallback, timeline_fallback};
pub use payload::{
    ChartSeriesItem, ImageItem, MetricCard, Payload, PayloadKind, TimelineEntry, TimelineStatus,
    UnknownPayloadKind, validate_chart_data, validate_image_data, validate_metric_data,
    validate_timeline_data,
};
pub use props::{ChartType, ColorScheme, Emphasis, Layout, PropEnum};
pub use schema::{FieldKind, FieldSpec, PayloadSchema, ValidationOutcome};
