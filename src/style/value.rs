//! Style fragment data model.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Suffix naming the unsuffixed entry of a variant group.
pub const BASE_VARIANT: &str = "base";

/// A scalar CSS value: literal text or a number.
///
/// Numbers display in their shortest form (`1`, `0.5`), text verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssValue {
    Text(String),
    Number(f64),
}

impl CssValue {
    /// Returns `true` for values that should not be emitted: empty text and
    /// non-finite numbers.
    pub fn is_empty(&self) -> bool {
        match self {
            CssValue::Text(s) => s.is_empty(),
            CssValue::Number(n) => !n.is_finite(),
        }
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Text(s) => f.write_str(s),
            CssValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A value assigned to one key of a [`StyleFragment`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Explicitly unset; dropped when formatted.
    Unset,
    /// A single value for the key.
    Value(CssValue),
    /// Values grouped by variant suffix (`base`, `hover`, ...).
    Variants(IndexMap<String, Option<CssValue>>),
}

impl StyleValue {
    /// Builds a variant group from `(suffix, value)` pairs.
    ///
    /// ```rust
    /// use stylesmith::StyleValue;
    ///
    /// let border = StyleValue::variants([("base", "1px"), ("hover", "2px")]);
    /// assert!(matches!(border, StyleValue::Variants(ref v) if v.len() == 2));
    /// ```
    pub fn variants<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<CssValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        StyleValue::Variants(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }

    /// Builds a variant group whose entries may be absent.
    pub fn variants_opt<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<CssValue>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        StyleValue::Variants(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }

    /// Returns `true` if nothing would be emitted for this value.
    pub fn is_empty(&self) -> bool {
        match self {
            StyleValue::Unset => true,
            StyleValue::Value(v) => v.is_empty(),
            StyleValue::Variants(group) => group
                .values()
                .all(|v| v.as_ref().map_or(true, CssValue::is_empty)),
        }
    }
}

macro_rules! impl_css_value_from {
    (text: $($t:ty),*; number: $($n:ty),*) => {
        $(
            impl From<$t> for CssValue {
                fn from(value: $t) -> Self {
                    CssValue::Text(value.into())
                }
            }

            impl From<$t> for StyleValue {
                fn from(value: $t) -> Self {
                    StyleValue::Value(value.into())
                }
            }
        )*
        $(
            impl From<$n> for CssValue {
                fn from(value: $n) -> Self {
                    CssValue::Number(value as f64)
                }
            }

            impl From<$n> for StyleValue {
                fn from(value: $n) -> Self {
                    StyleValue::Value(value.into())
                }
            }
        )*
    };
}

impl_css_value_from!(text: &str, String, &String; number: f64, f32, i32, i64, u32, u64, usize);

impl From<CssValue> for StyleValue {
    fn from(value: CssValue) -> Self {
        StyleValue::Value(value)
    }
}

impl<T: Into<CssValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Unset, |v| StyleValue::Value(v.into()))
    }
}

/// One level's property contribution to a node's style.
///
/// Keys prefixed with `_` name literal CSS properties; all other keys name
/// design tokens and are emitted as custom properties. Keys keep their
/// insertion order, and overwriting a key keeps its original position.
///
/// # Example
///
/// ```rust
/// use stylesmith::{StyleFragment, StyleValue};
///
/// let fragment = StyleFragment::new()
///     .set("color", "red")
///     .set("_display", "flex")
///     .set("border", StyleValue::variants([("base", "1px"), ("hover", "2px")]));
/// assert_eq!(fragment.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleFragment {
    entries: IndexMap<String, StyleValue>,
}

impl StyleFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, returning the fragment for chaining.
    pub fn set<V: Into<StyleValue>>(mut self, key: impl Into<String>, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a key in place.
    pub fn insert<V: Into<StyleValue>>(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlays `other` onto this fragment; keys present in both take the
    /// value from `other`.
    pub fn merge(&mut self, other: StyleFragment) {
        self.entries.extend(other.entries);
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleFragment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for StyleFragment {
    type Item = (String, StyleValue);
    type IntoIter = indexmap::map::IntoIter<String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
