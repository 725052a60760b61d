//! Validate command - check a JSON payload against a payload kind

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use serde_json::Value;
use slidewright_validate::{PayloadKind, coerce_payload, fallback_for};

/// Run the validate command.
///
/// Prints the sanitized payload when `file` validates as `kind`, otherwise
/// every error followed by the placeholder data a renderer would show. With
/// `coerce`, aliased chart and metric fields are reshaped first.
pub fn run(kind: &str, file: &Path, coerce: bool) -> Result<()> {
    let kind: PayloadKind = kind.parse()?;
    tracing::info!(%kind, ?file, "Validating payload");

    let text = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let mut input: Value = serde_json::from_str(&text)
        .wrap_err_with(|| format!("{} is not valid JSON", file.display()))?;

    if coerce {
        let Some(coerced) = coerce_payload(kind, &input) else {
            bail!("{kind} payloads have no field aliases to coerce");
        };
        tracing::debug!(%kind, "coerced payload fields");
        input = coerced;
    }

    let outcome = kind.validate(&input);
    if let Some(data) = outcome.data.as_ref().filter(|_| outcome.valid) {
        let count = data.as_array().map_or(0, Vec::len);
        println!("✓ {kind} payload is valid ({count} item(s))");
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    println!("Errors:");
    for err in &outcome.errors {
        println!("  ✗ {err}");
    }
    println!();
    println!("Fallback:");
    println!("{}", serde_json::to_string_pretty(&fallback_for(kind))?);

    bail!(
        "{kind} payload failed validation with {} error(s)",
        outcome.errors.len()
    );
}
