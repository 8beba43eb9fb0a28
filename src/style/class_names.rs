//! Class name merging across an extension chain.

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::ConfigError;

/// One contribution to a merged class name.
///
/// A source is absent, a single (possibly multi-token) string, or a list of
/// optional strings. Tokens are split on whitespace when merged.
///
/// # Example
///
/// ```rust
/// use stylesmith::{merge_class_names, ClassSource};
///
/// let merged = merge_class_names(&[
///     ClassSource::from("card  elevated"),
///     ClassSource::from(vec![Some("card"), None, Some(" primary ")]),
///     ClassSource::None,
/// ]);
/// assert_eq!(merged, "card elevated primary");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassSource {
    #[default]
    None,
    One(String),
    Many(Vec<Option<String>>),
}

impl ClassSource {
    /// Iterates the trimmed, non-empty tokens of this source in order.
    pub fn tokens(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            ClassSource::None => Box::new(std::iter::empty()),
            ClassSource::One(s) => Box::new(s.split_whitespace()),
            ClassSource::Many(items) => Box::new(
                items
                    .iter()
                    .flatten()
                    .flat_map(|item| item.split_whitespace()),
            ),
        }
    }

    /// Returns `true` if the source contributes no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens().next().is_none()
    }
}

impl From<&str> for ClassSource {
    fn from(value: &str) -> Self {
        ClassSource::One(value.to_string())
    }
}

impl From<String> for ClassSource {
    fn from(value: String) -> Self {
        ClassSource::One(value)
    }
}

impl From<Option<&str>> for ClassSource {
    fn from(value: Option<&str>) -> Self {
        value.map_or(ClassSource::None, ClassSource::from)
    }
}

impl From<Option<String>> for ClassSource {
    fn from(value: Option<String>) -> Self {
        value.map_or(ClassSource::None, ClassSource::One)
    }
}

impl From<Vec<String>> for ClassSource {
    fn from(value: Vec<String>) -> Self {
        ClassSource::Many(value.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for ClassSource {
    fn from(value: Vec<&str>) -> Self {
        ClassSource::Many(value.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for ClassSource {
    fn from(value: Vec<Option<&str>>) -> Self {
        ClassSource::Many(
            value
                .into_iter()
                .map(|s| s.map(str::to_string))
                .collect(),
        )
    }
}

impl<const N: usize> From<[&str; N]> for ClassSource {
    fn from(value: [&str; N]) -> Self {
        ClassSource::from(value.to_vec())
    }
}

/// Class names arriving as dynamic data (for example from a deserialized
/// component definition). Anything other than null, a string, or an array of
/// strings and nulls is rejected.
impl TryFrom<&Value> for ClassSource {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(ClassSource::None),
            Value::String(s) => Ok(ClassSource::One(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok(None),
                    Value::String(s) => Ok(Some(s.clone())),
                    other => Err(ConfigError::InvalidClassNames {
                        found: json_kind(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ClassSource::Many),
            other => Err(ConfigError::InvalidClassNames {
                found: json_kind(other),
            }),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Merges class name sources into a single space-separated string.
///
/// Tokens keep the order of their first occurrence; duplicates and empty
/// tokens are dropped. The result depends only on the inputs.
pub fn merge_class_names<'a, I>(sources: I) -> String
where
    I: IntoIterator<Item = &'a ClassSource>,
{
    let tokens: IndexSet<&str> = sources.into_iter().flat_map(ClassSource::tokens).collect();
    tokens.into_iter().collect::<Vec<_>>().join(" ")
}
