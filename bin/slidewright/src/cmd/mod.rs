//! CLI command implementations.

pub mod lint;
pub mod list;
pub mod show;
pub mod validate;
