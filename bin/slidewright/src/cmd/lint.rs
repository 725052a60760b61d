//! Lint command - check document bodies for unknown components and bad payloads

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use slidewright_processor::ProcessingResult;

/// Lint findings across the checked documents.
#[derive(Debug, Default)]
struct LintSummary {
    checked: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl LintSummary {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the lint command.
///
/// Lints `identifier`, or every document when it is `None`. Documents that
/// cannot be processed are errors; lint issues are warnings unless `strict`.
pub fn run(config_path: &Path, identifier: Option<&str>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, ?identifier, strict, "Linting documents");

    let processor = crate::processor(config_path)?;
    let identifiers = match identifier {
        Some(id) => vec![id.to_string()],
        None => processor.list(),
    };

    let mut summary = LintSummary::default();
    if identifiers.is_empty() {
        summary.add_warning(format!(
            "No documents found in {}",
            processor.store().dir().display()
        ));
    }

    println!("Linting documents...");
    for id in &identifiers {
        summary.checked += 1;
        let record = match processor.process(id) {
            ProcessingResult::Success(record) => record,
            ProcessingResult::Failure { error } => {
                println!("  ✗ {id}");
                summary.add_error(error);
                continue;
            }
        };

        let report = processor.lint_record(&record);
        if report.valid {
            println!("  ✓ {id}");
        } else {
            println!("  ⚠ {id} ({} issue(s))", report.issues.len());
            for issue in report.issues {
                summary.add_warning(format!("{id}: {issue}"));
            }
        }
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Documents: {}", summary.checked);
    println!("  Errors:    {}", summary.errors.len());
    println!("  Warnings:  {}", summary.warnings.len());

    if summary.has_errors() {
        println!();
        println!("Errors:");
        for err in &summary.errors {
            println!("  ✗ {err}");
        }
    }

    if summary.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &summary.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if summary.has_errors() {
        bail!("Lint failed with {} error(s)", summary.errors.len());
    }

    if strict && summary.has_warnings() {
        bail!(
            "Lint failed with {} warning(s) (strict mode)",
            summary.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}
