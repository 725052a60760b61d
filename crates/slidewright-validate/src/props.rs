//! Closed-set component props with deterministic defaults.
//!
//! Props arrive untyped from document bodies. Anything outside a prop's allowed
//! set resolves to its default instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A prop whose value is one of a fixed set of names.
pub trait PropEnum: Copy + Default + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Name as written in documents.
    fn as_str(&self) -> &'static str;

    /// Look a variant up by name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == name)
    }

    /// Resolve an untyped prop value, falling back to the default.
    fn from_prop(value: &Value) -> Self {
        value
            .as_str()
            .and_then(Self::from_name)
            .unwrap_or_default()
    }
}

/// Section layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    FullWidth,
    #[default]
    Centered,
    Sidebar,
    TextChart,
    Grid,
}

impl PropEnum for Layout {
    const VARIANTS: &'static [Self] = &[
        Self::FullWidth,
        Self::Centered,
        Self::Sidebar,
        Self::TextChart,
        Self::Grid,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::FullWidth => "full-width",
            Self::Centered => "centered",
            Self::Sidebar => "sidebar",
            Self::TextChart => "text-chart",
            Self::Grid => "grid",
        }
    }
}

/// Callout emphasis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emphasis {
    Highlight,
    #[default]
    Callout,
    Success,
    Warning,
    Subtle,
}

impl PropEnum for Emphasis {
    const VARIANTS: &'static [Self] = &[
        Self::Highlight,
        Self::Callout,
        Self::Success,
        Self::Warning,
        Self::Subtle,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Callout => "callout",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Subtle => "subtle",
        }
    }
}

/// Chart family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
}

impl ChartType {
    /// Continuous families plot a series over an axis.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Line | Self::Area)
    }

    /// Part-of-whole families show shares of a total.
    pub fn is_part_of_whole(&self) -> bool {
        matches!(self, Self::Pie)
    }
}

impl PropEnum for ChartType {
    const VARIANTS: &'static [Self] = &[
        Self::Bar,
        Self::Line,
        Self::Pie,
        Self::Area,
        Self::Scatter,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Area => "area",
            Self::Scatter => "scatter",
        }
    }
}

/// Chart color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    Primary,
    Success,
    Warning,
    Error,
}

impl PropEnum for ColorScheme {
    const VARIANTS: &'static [Self] = &[Self::Primary, Self::Success, Self::Warning, Self::Error];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_known_values_resolve() {
        assert_eq!(Layout::from_prop(&json!("text-chart")), Layout::TextChart);
        assert_eq!(Emphasis::from_prop(&json!("warning")), Emphasis::Warning);
        assert_eq!(ChartType::from_prop(&json!("pie")), ChartType::Pie);
        assert_eq!(ColorScheme::from_prop(&json!("error")), ColorScheme::Error);
    }

    #[test]
    fn test_unknown_values_default() {
        assert_eq!(Layout::from_prop(&json!("diagonal")), Layout::Centered);
        assert_eq!(Emphasis::from_prop(&json!("normal")), Emphasis::Callout);
        assert_eq!(ChartType::from_prop(&json!(3)), ChartType::Bar);
        assert_eq!(ColorScheme::from_prop(&json!(null)), ColorScheme::Primary);
    }

    #[test]
    fn test_names_match_serde() {
        for layout in Layout::VARIANTS {
            assert_eq!(serde_json::to_value(layout).expect("encode"), json!(layout.as_str()));
        }
        for chart in ChartType::VARIANTS {
            assert_eq!(serde_json::to_value(chart).expect("encode"), json!(chart.as_str()));
        }
    }

    #[test]
    fn test_chart_families() {
        assert!(ChartType::Line.is_continuous());
        assert!(ChartType::Area.is_continuous());
        assert!(ChartType::Pie.is_part_of_whole());
        assert!(!ChartType::Bar.is_continuous());
        assert!(!ChartType::Scatter.is_part_of_whole());
    }
}
