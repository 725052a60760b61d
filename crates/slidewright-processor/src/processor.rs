//! Turning raw documents into renderable records.

use serde::Serialize;
use slidewright_core::{
    Config, CoreError, DocumentRecord, MetadataDefaults, Result, frontmatter,
};
use tracing::{debug, info, warn};

use crate::{
    lint::{LintReport, Linter},
    store::{DocumentStore, FsDocumentStore},
};

/// Outcome of processing one document.
///
/// Processing never panics or returns `Err`; every failure is captured here
/// with a human readable message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessingResult {
    /// The document was read and its metadata normalized.
    Success(DocumentRecord),
    /// The document could not be processed.
    Failure {
        /// Why processing failed.
        error: String,
    },
}

impl ProcessingResult {
    /// Whether processing succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The processed record, if any.
    pub fn record(&self) -> Option<&DocumentRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure { .. } => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> std::result::Result<DocumentRecord, String> {
        match self {
            Self::Success(record) => Ok(record),
            Self::Failure { error } => Err(error),
        }
    }

    fn failure(error: &CoreError) -> Self {
        let error = if error.is_not_found() {
            error.to_string()
        } else {
            format!("Failed to process document: {error}")
        };
        Self::Failure { error }
    }
}

/// Document processor over a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct Processor<S> {
    store: S,
    defaults: MetadataDefaults,
    linter: Linter,
}

impl<S: DocumentStore> Processor<S> {
    /// Create a processor with default metadata and lint settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            defaults: MetadataDefaults::default(),
            linter: Linter::default(),
        }
    }

    /// Create a processor using the metadata and lint sections of `config`.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            defaults: config.metadata.clone(),
            linter: Linter::new(config.lint.components.iter().cloned()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and normalize the document named `identifier`.
    pub fn process(&self, identifier: &str) -> ProcessingResult {
        match self.try_process(identifier) {
            Ok(record) => {
                info!(
                    id = identifier,
                    title = %record.metadata.title,
                    source = record.source.label(),
                    "processed document"
                );
                ProcessingResult::Success(record)
            }
            Err(e) => {
                warn!(id = identifier, error = %e, "failed to process document");
                ProcessingResult::failure(&e)
            }
        }
    }

    fn try_process(&self, identifier: &str) -> Result<DocumentRecord> {
        let text = self.store.read(identifier)?;
        let (metadata, body, source) =
            frontmatter::extract_frontmatter(&text, identifier, &self.defaults)?;
        debug!(id = identifier, ?source, "extracted metadata");

        Ok(DocumentRecord {
            identifier: identifier.to_string(),
            metadata,
            body,
            source,
        })
    }

    /// Every identifier in the namespace, sorted.
    pub fn list(&self) -> Vec<String> {
        self.store.list()
    }

    /// Whether `identifier` resolves to a document.
    pub fn exists(&self, identifier: &str) -> bool {
        self.store.exists(identifier)
    }

    /// Lint a body with this processor's component whitelist.
    pub fn lint(&self, body: &str) -> LintReport {
        self.linter.lint(body)
    }

    /// Lint a processed record, including the document level checks.
    pub fn lint_record(&self, record: &DocumentRecord) -> LintReport {
        self.linter.lint_document(record)
    }

    /// Process `identifier` and lint the result.
    ///
    /// Returns the processing failure message when the document cannot be read.
    pub fn lint_document(&self, identifier: &str) -> std::result::Result<LintReport, String> {
        let record = self.process(identifier).into_result()?;
        Ok(self.lint_record(&record))
    }
}

impl Processor<FsDocumentStore> {
    /// Create a filesystem backed processor from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_config(FsDocumentStore::from_config(config), config)
    }
}

#[cfg(test)]
mod tests {
    use slidewright_core::MetadataSource;

    use super::*;
    use crate::store::MemoryDocumentStore;

    const HEADER_DOC: &str = "---\ntitle: Q4 Review\ndate: 2024-01-15\ntype: quarterly\ndescription: Results\n---\n\n<Hero title=\"Q4\" />\n";

    fn processor() -> Processor<MemoryDocumentStore> {
        let store = MemoryDocumentStore::default()
            .with_document("q4-review", HEADER_DOC)
            .with_document(
                "embedded",
                "export const metadata = { title: 'Roadmap', type: 'strategy' }\n\n# Plan\n",
            )
            .with_document("bare", "# Nothing here\n")
            .with_document("broken", "---\ntitle: [unclosed\n---\nbody\n");
        Processor::new(store)
    }

    #[test]
    fn test_process_header_document() {
        let result = processor().process("q4-review");
        assert!(result.is_success());

        let record = result.record().expect("record");
        assert_eq!(record.identifier, "q4-review");
        assert_eq!(record.metadata.title, "Q4 Review");
        assert_eq!(record.metadata.date, "2024-01-15");
        assert_eq!(record.metadata.kind, "quarterly");
        assert_eq!(record.metadata.description.as_deref(), Some("Results"));
        assert_eq!(record.body, "\n<Hero title=\"Q4\" />\n");
        assert_eq!(record.source, MetadataSource::HeaderBlock);
    }

    #[test]
    fn test_process_embedded_expression() {
        let record = processor()
            .process("embedded")
            .into_result()
            .expect("record");
        assert_eq!(record.metadata.title, "Roadmap");
        assert_eq!(record.metadata.kind, "strategy");
        assert_eq!(record.source, MetadataSource::EmbeddedExpression);
        assert!(record.body.contains("export const metadata"));
    }

    #[test]
    fn test_process_defaults() {
        let record = processor().process("bare").into_result().expect("record");
        assert_eq!(record.metadata.title, "Untitled Presentation");
        assert_eq!(record.metadata.kind, "presentation");
        assert_eq!(record.body, "# Nothing here\n");
        assert_eq!(record.source, MetadataSource::Defaults);
    }

    #[test]
    fn test_process_missing_document() {
        let processor = Processor::new(MemoryDocumentStore::default());
        let result = processor.process("missing-id");

        assert!(!result.is_success());
        assert!(result.record().is_none());
        let error = result.error().expect("error message");
        assert!(error.contains("missing-id"));
        assert_eq!(error, "Document not found: missing-id (expected missing-id.mdx)");
    }

    #[test]
    fn test_process_malformed_header() {
        let result = processor().process("broken");
        let error = result.error().expect("error message");
        assert!(error.starts_with("Failed to process document: "));
        assert!(error.contains("broken"));
    }

    #[test]
    fn test_with_config_defaults() {
        let mut config = Config::default();
        config.metadata.default_title = "Draft".to_string();
        config.metadata.default_kind = "memo".to_string();
        config.lint.components = vec!["Slide".to_string()];

        let store = MemoryDocumentStore::default().with_document("d", "<Slide>\n<Hero />\n");
        let processor = Processor::with_config(store, &config);

        let record = processor.process("d").into_result().expect("record");
        assert_eq!(record.metadata.title, "Draft");
        assert_eq!(record.metadata.kind, "memo");

        let report = processor.lint_document("d").expect("lint");
        assert_eq!(
            report.issues,
            vec!["Missing frontmatter section", "Unknown component: Hero"]
        );
    }

    #[test]
    fn test_list_and_exists() {
        let processor = processor();
        assert_eq!(
            processor.list(),
            vec!["bare", "broken", "embedded", "q4-review"]
        );
        assert!(processor.exists("bare"));
        assert!(!processor.exists("Bare"));
    }

    #[test]
    fn test_lint_document_missing() {
        let err = processor().lint_document("nope").unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_result_serializes_with_status() {
        let failure = ProcessingResult::Failure {
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&failure).expect("serialize");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "boom");
    }
}
