//! Lenient reshaping of loosely keyed records.
//!
//! Unlike the validators these never reject anything. Fields are looked up
//! under common aliases and missing ones take placeholder values. Use them to
//! adapt foreign data, then validate the result as usual.

use serde_json::Value;

use crate::payload::{ChartSeriesItem, MetricCard, PayloadKind};

const CHART_NAME_KEYS: &[&str] = &["name", "label", "category", "period"];
const CHART_VALUE_KEYS: &[&str] = &["value", "amount", "count", "revenue"];
const METRIC_LABEL_KEYS: &[&str] = &["label", "name"];
const METRIC_VALUE_KEYS: &[&str] = &["value", "amount"];

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_METRIC: &str = "Metric";

/// Reshape records into chart points.
///
/// The name is the first truthy of `name`, `label`, `category` or `period`,
/// else `Unknown`. The value is the first numeric of `value`, `amount`,
/// `count` or `revenue`, else 0. Non-array input yields no points.
pub fn coerce_chart_data(input: &Value) -> Vec<ChartSeriesItem> {
    records(input)
        .map(|item| {
            let name = first_truthy(item, CHART_NAME_KEYS)
                .map_or_else(|| UNKNOWN_NAME.to_string(), stringify);
            let value = CHART_VALUE_KEYS
                .iter()
                .find_map(|key| item.get(key).and_then(finite_number))
                .unwrap_or(0.0);
            ChartSeriesItem::new(name, value)
        })
        .collect()
}

/// Reshape records into metric cards.
///
/// The label is the first truthy of `label` or `name`, else `Metric`. The
/// value is the first truthy of `value` or `amount`, read as a number, else 0.
/// `unit` is kept when truthy and `change` when numeric.
pub fn coerce_metric_data(input: &Value) -> Vec<MetricCard> {
    records(input)
        .map(|item| MetricCard {
            label: first_truthy(item, METRIC_LABEL_KEYS)
                .map_or_else(|| UNKNOWN_METRIC.to_string(), stringify),
            value: first_truthy(item, METRIC_VALUE_KEYS)
                .and_then(numeric)
                .unwrap_or(0.0),
            unit: item.get("unit").filter(|v| truthy(v)).map(stringify),
            change: item.get("change").and_then(finite_number),
        })
        .collect()
}

/// Coerce `input` for `kind`, as untyped JSON.
///
/// Only chart and metric payloads have aliases; other kinds return `None`.
pub fn coerce_payload(kind: PayloadKind, input: &Value) -> Option<Value> {
    let encoded = match kind {
        PayloadKind::Chart => serde_json::to_value(coerce_chart_data(input)),
        PayloadKind::Metrics => serde_json::to_value(coerce_metric_data(input)),
        PayloadKind::Timeline | PayloadKind::Images => return None,
    };
    encoded.ok()
}

fn records(input: &Value) -> impl Iterator<Item = &Value> {
    input.as_array().into_iter().flatten()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .find(|value| truthy(value))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        other => finite_number(other),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::payload::validate_chart_data;

    #[test]
    fn test_chart_aliases() {
        let points = coerce_chart_data(&json!([
            {"category": "North", "amount": 12},
            {"period": 2024, "revenue": 3.5},
            {"label": "", "name": "Q1", "value": "7", "count": 4},
            {},
            "loose",
        ]));

        assert_eq!(
            points,
            vec![
                ChartSeriesItem::new("North", 12.0),
                ChartSeriesItem::new("2024", 3.5),
                ChartSeriesItem::new("Q1", 4.0),
                ChartSeriesItem::new("Unknown", 0.0),
                ChartSeriesItem::new("Unknown", 0.0),
            ]
        );
    }

    #[test]
    fn test_coerced_chart_data_validates() {
        let coerced = coerce_payload(PayloadKind::Chart, &json!([{"period": "Q1", "count": 3}]))
            .expect("chart coercion");
        let outcome = validate_chart_data(&coerced);
        assert!(outcome.valid);
    }

    #[test]
    fn test_metric_aliases() {
        let cards = coerce_metric_data(&json!([
            {"name": "Churn", "amount": "1.5", "unit": "%", "change": -2},
            {"label": "Seats", "value": 0, "amount": 40, "unit": "", "change": "up"},
            {"value": "n/a"},
        ]));

        assert_eq!(
            cards,
            vec![
                MetricCard {
                    label: "Churn".to_string(),
                    value: 1.5,
                    unit: Some("%".to_string()),
                    change: Some(-2.0),
                },
                MetricCard {
                    label: "Seats".to_string(),
                    value: 40.0,
                    unit: None,
                    change: None,
                },
                MetricCard {
                    label: "Metric".to_string(),
                    value: 0.0,
                    unit: None,
                    change: None,
                },
            ]
        );
    }

    #[test]
    fn test_non_array_input() {
        assert!(coerce_chart_data(&json!({"name": "x"})).is_empty());
        assert!(coerce_metric_data(&Value::Null).is_empty());
    }

    #[test]
    fn test_only_chart_and_metrics_coerce() {
        assert!(coerce_payload(PayloadKind::Timeline, &json!([])).is_none());
        assert!(coerce_payload(PayloadKind::Images, &json!([])).is_none());
        assert_eq!(coerce_payload(PayloadKind::Metrics, &json!([])), Some(json!([])));
    }
}
