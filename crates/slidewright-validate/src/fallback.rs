//! Deterministic placeholder payloads.
//!
//! Renderers substitute these when validation fails, so a component always has
//! well-typed data to draw. The tables are constants; every call builds the same
//! records.

use serde_json::Value;

use crate::{
    payload::{ChartSeriesItem, ImageItem, MetricCard, PayloadKind, TimelineEntry, TimelineStatus},
    props::ChartType,
};

const CONTINUOUS_SERIES: &[(&str, f64)] = &[("Start", 0.0), ("End", 0.0)];
const PART_OF_WHOLE_SERIES: &[(&str, f64)] = &[("No Data", 100.0)];
const BAR_SERIES: &[(&str, f64)] = &[("Data", 0.0)];
const SCATTER_SERIES: &[(&str, f64)] = &[("Point", 0.0)];

const METRIC_LABEL: &str = "Data Unavailable";
const TIMELINE_TITLE: &str = "No Timeline Data";
const IMAGE_ALT: &str = "Image unavailable";

fn series_table(chart_type: ChartType) -> &'static [(&'static str, f64)] {
    if chart_type.is_continuous() {
        CONTINUOUS_SERIES
    } else if chart_type.is_part_of_whole() {
        PART_OF_WHOLE_SERIES
    } else if chart_type == ChartType::Scatter {
        SCATTER_SERIES
    } else {
        BAR_SERIES
    }
}

/// Placeholder series for a chart family.
pub fn chart_fallback(chart_type: ChartType) -> Vec<ChartSeriesItem> {
    series_table(chart_type)
        .iter()
        .map(|(name, value)| ChartSeriesItem::new(*name, *value))
        .collect()
}

/// Placeholder metric grid.
pub fn metrics_fallback() -> Vec<MetricCard> {
    vec![MetricCard {
        label: METRIC_LABEL.to_string(),
        value: 0.0,
        unit: Some(String::new()),
        change: Some(0.0),
    }]
}

/// Placeholder timeline.
pub fn timeline_fallback() -> Vec<TimelineEntry> {
    vec![TimelineEntry {
        title: TIMELINE_TITLE.to_string(),
        description: None,
        date: None,
        status: Some(TimelineStatus::Upcoming),
    }]
}

/// Placeholder gallery.
pub fn image_fallback() -> Vec<ImageItem> {
    vec![ImageItem {
        src: String::new(),
        alt: IMAGE_ALT.to_string(),
        caption: None,
    }]
}

/// Placeholder for `kind` as untyped JSON. Charts use the default family.
pub fn fallback_for(kind: PayloadKind) -> Value {
    let encoded = match kind {
        PayloadKind::Chart => serde_json::to_value(chart_fallback(ChartType::default())),
        PayloadKind::Metrics => serde_json::to_value(metrics_fallback()),
        PayloadKind::Timeline => serde_json::to_value(timeline_fallback()),
        PayloadKind::Images => serde_json::to_value(image_fallback()),
    };
    // Plain structs of strings and finite floats always encode.
    encoded.unwrap_or(Value::Null)
}
