//! Slidewright Processor Library
//!
//! Resolves document identifiers against a namespace, runs tiered metadata
//! extraction over the raw text, and lints document bodies.
//!
//! # Modules
//!
//! - [`store`] - Document namespaces (filesystem and in-memory)
//! - [`processor`] - Identifier to [`DocumentRecord`] pipeline
//! - [`lint`] - Advisory body linting
//!
//! [`DocumentRecord`]: slidewright_core::DocumentRecord

pub mod lint;
pub mod processor;
pub mod store;

pub use lint::{LintReport, Linter, lint};
pub use processor::{ProcessingResult, Processor};
pub use store::{DocumentStore, FsDocumentStore, MemoryDocumentStore};
