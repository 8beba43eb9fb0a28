//! Construction-time configuration errors.

use thiserror::Error;

/// Error returned when a styled node, scale, or theme registry is built from
/// malformed arguments.
///
/// Construction either succeeds completely or fails with one of these; no
/// partially-built value is ever returned. Data-level problems discovered at
/// render time (missing tokens, empty values) are never errors and are
/// silently omitted instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A custom tag name is empty or contains characters not allowed in an
    /// element name.
    #[error("invalid tag name '{tag}'")]
    InvalidTag { tag: String },

    /// The `$` self-reference tag was used without a styled node to extend.
    #[error("\"$\" tag name can only be used while extending from a styled node")]
    SelfReferenceWithoutBase,

    /// Class names were neither a string nor a sequence of strings.
    #[error("class names must be a string or an array of strings, found {found}")]
    InvalidClassNames { found: &'static str },

    /// A token scale was declared with an empty prefix.
    #[error("token scale prefix must not be empty")]
    EmptyScalePrefix,

    /// A token scale was declared with no steps.
    #[error("token scale '{prefix}' must have at least one step")]
    ZeroSteps { prefix: String },

    /// A theme overlay document could not be parsed.
    #[error("invalid theme overlay document: {0}")]
    InvalidOverlayDocument(#[from] serde_yaml::Error),
}
