//! List command - enumerate the document namespace

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use serde_json::json;
use slidewright_processor::ProcessingResult;

/// Run the list command.
///
/// Prints every identifier with its title and kind. Documents that fail to
/// process are still listed, with the failure in place of their metadata.
pub fn run(config_path: &Path, json_output: bool) -> Result<()> {
    let processor = crate::processor(config_path)?;
    let identifiers = processor.list();
    tracing::info!(count = identifiers.len(), "Listing documents");

    if json_output {
        let entries: Vec<_> = identifiers
            .iter()
            .map(|id| match processor.process(id) {
                ProcessingResult::Success(record) => json!({
                    "id": id,
                    "title": record.metadata.title,
                    "date": record.metadata.date,
                    "type": record.metadata.kind,
                }),
                ProcessingResult::Failure { error } => json!({ "id": id, "error": error }),
            })
            .collect();
        let rendered =
            serde_json::to_string_pretty(&entries).wrap_err("Failed to encode document list")?;
        println!("{rendered}");
        return Ok(());
    }

    if identifiers.is_empty() {
        println!(
            "No documents found in {}",
            processor.store().dir().display()
        );
        return Ok(());
    }

    for id in &identifiers {
        match processor.process(id) {
            ProcessingResult::Success(record) => println!(
                "  {id:<24} {} ({}, {})",
                record.metadata.title, record.metadata.kind, record.metadata.date
            ),
            ProcessingResult::Failure { error } => println!("  {id:<24} ✗ {error}"),
        }
    }

    println!();
    println!("{} document(s)", identifiers.len());

    Ok(())
}
