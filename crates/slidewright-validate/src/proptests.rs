//! Property-based tests for payload validation.
