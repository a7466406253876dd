//! errors.rs - Custom error types for the chatguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! The filtering path itself is total and never surfaces these; they exist
//! only at the configuration and compilation boundary.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `chatguard-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChatFilterError {
    #[error("Duplicate word category name found: '{0}'")]
    DuplicateCategory(String),

    #[error("A word category has an empty `name` field")]
    EmptyCategoryName,

    #[error("Failed to render mask template '{0}': {1}")]
    MaskTemplateError(String, String),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
