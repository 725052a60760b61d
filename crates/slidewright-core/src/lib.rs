//! Slidewright Core Library
//!
//! Core types, configuration, error handling and frontmatter extraction for the
//! Slidewright presentation pipeline.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod literal;

pub use config::Config;
pub use content::{DocumentRecord, MetadataSource, PresentationMetadata};
pub use error::{CoreError, Result};
pub use frontmatter::MetadataDefaults;
pub use literal::{LiteralError, parse_literal};
