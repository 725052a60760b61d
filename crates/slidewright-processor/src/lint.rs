//! Advisory structural linting of document bodies.
//!
//! The linter never blocks rendering. It reports component tags the renderer
//! does not know about and inline payload literals that will not validate, so
//! tooling can surface them before a deck is shown.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use slidewright_core::{DocumentRecord, MetadataSource, config::DEFAULT_COMPONENTS, literal};
use slidewright_validate::PayloadKind;
use tracing::debug;

static COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z]\w*)").expect("valid component tag regex"));

static INLINE_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(data|metrics|items|images)=\{\s*\[").expect("valid inline payload regex")
});

/// Typed payload attributes and the component that receives each. The same
/// attribute name on any other component has a different shape and is skipped.
const TYPED_ATTRIBUTES: &[(&str, &str, PayloadKind)] = &[
    ("metrics", "MetricGrid", PayloadKind::Metrics),
    ("items", "Timeline", PayloadKind::Timeline),
    ("images", "ImageGallery", PayloadKind::Images),
];

/// Findings of one lint pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// True when no issues were found.
    pub valid: bool,
    /// Issues in document order, component issues first.
    pub issues: Vec<String>,
}

impl LintReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Body linter with a fixed component whitelist.
#[derive(Debug, Clone)]
pub struct Linter {
    components: HashSet<String>,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENTS)
    }
}

impl Linter {
    /// Create a linter accepting `components`.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is a known component.
    pub fn knows(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    /// Lint `body`.
    pub fn lint(&self, body: &str) -> LintReport {
        let mut issues = Vec::new();
        self.check_components(body, &mut issues);
        check_inline_payloads(body, &mut issues);
        LintReport::from_issues(issues)
    }

    /// Lint a processed document.
    ///
    /// Adds document level checks to [`Linter::lint`]: the document must
    /// declare metadata and use at least one known component.
    pub fn lint_document(&self, record: &DocumentRecord) -> LintReport {
        let mut issues = Vec::new();
        if record.source == MetadataSource::Defaults {
            issues.push("Missing frontmatter section".to_string());
        }

        let known = self.check_components(&record.body, &mut issues);
        if known == 0 {
            issues.push("No valid components found".to_string());
        }

        check_inline_payloads(&record.body, &mut issues);
        LintReport::from_issues(issues)
    }

    /// Report unknown tags and return how many known ones were seen.
    fn check_components(&self, body: &str, issues: &mut Vec<String>) -> usize {
        let mut known = 0;
        for captures in COMPONENT_TAG.captures_iter(body) {
            let name = &captures[1];
            if self.knows(name) {
                known += 1;
            } else {
                issues.push(format!("Unknown component: {name}"));
            }
        }
        known
    }
}

/// Lint `body` against the default component whitelist.
pub fn lint(body: &str) -> LintReport {
    Linter::default().lint(body)
}

fn check_inline_payloads(body: &str, issues: &mut Vec<String>) {
    for captures in INLINE_PAYLOAD.captures_iter(body) {
        let attribute = captures.get(1).map_or("data", |m| m.as_str());
        let Some(whole) = captures.get(0) else {
            continue;
        };

        let kind = if attribute == "data" {
            None
        } else {
            let tag = enclosing_tag(body, whole.start());
            match typed_payload(attribute, tag) {
                Some(kind) => Some(kind),
                None => {
                    debug!(attribute, ?tag, "payload attribute is not typed for this component");
                    continue;
                }
            }
        };

        // The match ends just past the opening bracket.
        let literal_start = whole.end() - 1;

        let parsed = literal::parse_literal_prefix(&body[literal_start..]).and_then(|(value, used)| {
            let rest = body[literal_start + used..].trim_start();
            if rest.starts_with('}') {
                Ok(value)
            } else {
                Err(literal::LiteralError {
                    offset: literal_start + used,
                    message: "expected '}' after inline literal".to_string(),
                })
            }
        });

        match (parsed, kind) {
            (Ok(value), None) => check_chart_literal(&value, issues),
            (Ok(value), Some(kind)) => check_typed_literal(attribute, kind, &value, issues),
            (Err(e), _) => {
                debug!(attribute, error = %e, "inline payload is not a literal");
                if attribute == "data" {
                    issues.push("Invalid chart data syntax".to_string());
                } else {
                    issues.push(format!("Invalid {attribute} data syntax"));
                }
            }
        }
    }
}

fn check_chart_literal(value: &Value, issues: &mut Vec<String>) {
    let Value::Array(items) = value else {
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let has_name = ["name", "label"]
            .iter()
            .any(|key| item.get(key).is_some_and(Value::is_string));
        let has_value = item
            .get("value")
            .and_then(Value::as_f64)
            .is_some_and(f64::is_finite);

        if !(item.is_object() && has_name && has_value) {
            issues.push(format!(
                "Invalid chart data format at index {index}: requires {{name: string, value: number}}"
            ));
        }
    }
}

/// Name of the component tag that `offset` sits inside, if any.
fn enclosing_tag(body: &str, offset: usize) -> Option<&str> {
    let open = body[..offset].rfind('<')?;
    let captures = COMPONENT_TAG.captures(&body[open..])?;
    if captures.get(0)?.start() != 0 {
        return None;
    }
    captures.get(1).map(|m| m.as_str())
}

fn typed_payload(attribute: &str, tag: Option<&str>) -> Option<PayloadKind> {
    TYPED_ATTRIBUTES
        .iter()
        .find(|(name, component, _)| *name == attribute && Some(*component) == tag)
        .map(|&(_, _, kind)| kind)
}

fn check_typed_literal(attribute: &str, kind: PayloadKind, value: &Value, issues: &mut Vec<String>) {
    let outcome = kind.validate(value);
    issues.extend(
        outcome
            .errors
            .into_iter()
            .map(|error| format!("{attribute}: {error}")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_body_is_valid() {
        let body = r#"
<Hero title="Q4 Results" highlight="34%" />

<ChartSection title="Revenue" type="line" data={[{name: "Q1", value: 1.2}, {name: "Q2", value: 1.8}]}>
  Revenue kept growing.
</ChartSection>

<MetricGrid metrics={[{label: "Revenue", value: 2.4, unit: "M", change: 34}]} />
"#;
        let report = lint(body);
        assert!(report.valid, "unexpected issues: {:?}", report.issues);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_unknown_components() {
        let report = lint("<Hero />\n<Carousel>\n</Carousel>\n<div>x</div>");
        assert!(!report.valid);
        assert_eq!(
            report.issues,
            vec!["Unknown component: Carousel", "Unknown component: div"]
        );
    }

    #[test]
    fn test_comparisons_are_not_tags() {
        let report = lint("Growth was < 5% and 3<4 in every quarter.");
        assert!(report.valid);
    }

    #[test]
    fn test_custom_whitelist() {
        let linter = Linter::new(["Slide"]);
        assert!(linter.lint("<Slide>").valid);
        assert!(!linter.lint("<Hero />").valid);
        assert!(linter.knows("Slide"));
    }

    #[test]
    fn test_bad_chart_items() {
        let report = lint(r#"<ChartSection data={[{name: "Q1", value: 10}, {name: "Q2", value: "bad"}, 7]} />"#);
        assert_eq!(
            report.issues,
            vec![
                "Invalid chart data format at index 1: requires {name: string, value: number}",
                "Invalid chart data format at index 2: requires {name: string, value: number}",
            ]
        );
    }

    #[test]
    fn test_chart_items_accept_label() {
        let report = lint(r#"<ChartSection data={[{label: "Q1", value: 10}]} />"#);
        assert!(report.valid);
    }

    #[test]
    fn test_chart_syntax_error() {
        let report = lint("<ChartSection data={[{name: 'Q1', value: compute()}]} />");
        assert_eq!(report.issues, vec!["Invalid chart data syntax"]);
    }

    #[test]
    fn test_variable_references_are_skipped() {
        let report = lint("<ChartSection data={quarterly} />");
        assert!(report.valid);
    }

    #[test]
    fn test_typed_payloads_are_validated() {
        let body = r#"<Timeline items={[{title: "Launch", status: "shipped"}]} />
<ImageGallery images={[{src: "/a.png"}]} />"#;
        let report = lint(body);
        assert_eq!(
            report.issues,
            vec![
                "items: Timeline item at index 0 'status' must be one of: completed, current, upcoming",
                "images: Image at index 0 must have an 'alt' property of type string",
            ]
        );
    }

    #[test]
    fn test_typed_payload_syntax_error() {
        let report = lint("<MetricGrid metrics={[{label: 'x', value: 1}} />");
        assert_eq!(report.issues, vec!["Invalid metrics data syntax"]);
    }

    #[test]
    fn test_items_on_bullet_list_are_not_timeline_items() {
        let report = lint(r#"<BulletList items={[{content: "Fast onboarding", icon: "🚀"}]} />"#);
        assert!(report.valid, "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn test_untyped_attribute_syntax_is_not_checked() {
        let report = lint("<TextHeavy items={[renderPoint(1)]} />");
        assert!(report.valid, "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn test_enclosing_tag() {
        let body = r#"<Hero title="x" />
<MetricGrid columns={3} metrics={[]} />"#;
        let offset = body.find("metrics=").expect("attribute present");
        assert_eq!(enclosing_tag(body, offset), Some("MetricGrid"));
        assert_eq!(enclosing_tag("metrics={[]}", 0), None);
    }

    fn record(body: &str, source: MetadataSource) -> DocumentRecord {
        DocumentRecord {
            identifier: "deck".to_string(),
            metadata: slidewright_core::PresentationMetadata {
                title: "Deck".to_string(),
                date: "2024-01-01".to_string(),
                kind: "presentation".to_string(),
                description: None,
                extra: Default::default(),
            },
            body: body.to_string(),
            source,
        }
    }

    #[test]
    fn test_lint_document_clean() {
        let linter = Linter::default();
        let report = linter.lint_document(&record("<Hero title=\"Hi\" />\n", MetadataSource::HeaderBlock));
        assert!(report.valid, "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn test_lint_document_requires_metadata_and_components() {
        let linter = Linter::default();
        let report = linter.lint_document(&record("Just prose, no components.", MetadataSource::Defaults));
        assert_eq!(
            report.issues,
            vec!["Missing frontmatter section", "No valid components found"]
        );

        let report = linter.lint_document(&record("<Hero />", MetadataSource::EmbeddedExpression));
        assert!(report.valid);
    }
}
