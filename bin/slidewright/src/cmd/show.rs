//! Show command - print one processed document

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use slidewright_processor::ProcessingResult;

/// Run the show command.
pub fn run(config_path: &Path, identifier: &str, json_output: bool, body: bool) -> Result<()> {
    let processor = crate::processor(config_path)?;

    let record = match processor.process(identifier) {
        ProcessingResult::Success(record) => record,
        ProcessingResult::Failure { error } => bail!(error),
    };

    if json_output {
        let rendered =
            serde_json::to_string_pretty(&record).wrap_err("Failed to encode document")?;
        println!("{rendered}");
        return Ok(());
    }

    let metadata = &record.metadata;
    println!("{}", record.page_title());
    println!();
    println!("  Identifier:  {}", record.identifier);
    println!("  Title:       {}", metadata.title);
    println!("  Date:        {}", metadata.date);
    println!("  Type:        {}", metadata.kind);
    println!("  Description: {}", record.summary());
    println!("  Source:      {}", record.source.label());
    println!("  Words:       {}", record.word_count());

    if !metadata.extra.is_empty() {
        println!();
        println!("Extra metadata:");
        for (key, value) in &metadata.extra {
            println!("  {key}: {value}");
        }
    }

    if body {
        println!();
        println!("{}", record.body);
    }

    Ok(())
}
