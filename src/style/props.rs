//! Render-time prop bags and their normalization.
//!
//! A host hands every render a flat bag of props. Keys starting with
//! [`STYLE_PROP_PREFIX`] are style props owned by the styled node; the
//! `className` and `style` keys are merged with the node's computed output;
//! everything else passes through to the host element untouched.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::class_names::{json_kind, ClassSource};

/// Prefix marking a prop as input to the style functions.
pub const STYLE_PROP_PREFIX: char = '$';

/// Prop carrying a caller-supplied class name.
pub const CLASS_NAME_PROP: &str = "className";

/// Prop carrying caller-supplied inline style entries.
pub const INLINE_STYLE_PROP: &str = "style";

/// Props as seen by style functions, keyed without the style prefix.
pub type Props = IndexMap<String, Value>;

/// Formatted style entries, property name to CSS text.
pub type StyleMap = IndexMap<String, String>;

/// The raw prop bag for a single render.
///
/// # Example
///
/// ```rust
/// use stylesmith::RenderProps;
///
/// let props = RenderProps::new()
///     .css("tone", "danger")
///     .class_name("wide")
///     .style("margin", "0")
///     .attr("id", "save");
///
/// let normalized = props.normalize();
/// assert_eq!(normalized.style_props["tone"], "danger");
/// assert_eq!(normalized.attributes["id"], "save");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderProps {
    raw: IndexMap<String, Value>,
}

impl RenderProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing raw bag.
    pub fn from_map(raw: IndexMap<String, Value>) -> Self {
        Self { raw }
    }

    /// Builds a bag from a JSON object. Any other JSON value yields an empty
    /// bag.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                raw: map.into_iter().collect(),
            },
            other => {
                debug!(kind = json_kind(&other), "ignoring non-object prop bag");
                Self::default()
            }
        }
    }

    /// Sets a style prop; the key is stored with the style prefix.
    pub fn css(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.raw
            .insert(format!("{}{}", STYLE_PROP_PREFIX, key), value.into());
        self
    }

    /// Sets the caller class name.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.raw
            .insert(CLASS_NAME_PROP.to_string(), Value::String(class_name.into()));
        self
    }

    /// Adds one caller inline style entry.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let entry = self
            .raw
            .entry(INLINE_STYLE_PROP.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        if !entry.is_object() {
            *entry = Value::Object(Default::default());
        }
        if let Value::Object(map) = entry {
            map.insert(property.into(), Value::String(value.into()));
        }
        self
    }

    /// Sets a pass-through attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw.insert(key.into(), value.into());
        self
    }

    /// Raw access, as the host supplied it.
    pub fn raw(&self) -> &IndexMap<String, Value> {
        &self.raw
    }

    /// Splits the bag into style props, pass-through attributes, and the
    /// caller's class name and inline style.
    pub fn normalize(&self) -> NormalizedProps {
        let mut normalized = NormalizedProps::default();

        for (key, value) in &self.raw {
            if let Some(name) = key.strip_prefix(STYLE_PROP_PREFIX) {
                normalized.style_props.insert(name.to_string(), value.clone());
            } else if key == CLASS_NAME_PROP {
                normalized.class_name = match ClassSource::try_from(value) {
                    Ok(source) => source,
                    Err(err) => {
                        debug!(%err, "dropping caller class name");
                        ClassSource::None
                    }
                };
            } else if key == INLINE_STYLE_PROP {
                normalized.inline_style = inline_style_entries(value);
            } else {
                normalized.attributes.insert(key.clone(), value.clone());
            }
        }

        normalized.bag = normalized.attributes.clone();
        normalized.bag.extend(
            normalized
                .style_props
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        normalized
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RenderProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            raw: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A prop bag split by role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedProps {
    /// Style props with the prefix stripped.
    pub style_props: Props,
    /// Everything forwarded to the host element.
    pub attributes: Props,
    /// Caller class name, merged with the node's own.
    pub class_name: ClassSource,
    /// Caller inline style, applied over the computed style.
    pub inline_style: StyleMap,
    bag: Props,
}

impl NormalizedProps {
    /// The full bag style functions receive: attributes overlaid with the
    /// stripped style props.
    pub fn bag(&self) -> &Props {
        &self.bag
    }
}

fn inline_style_entries(value: &Value) -> StyleMap {
    let Value::Object(map) = value else {
        if !value.is_null() {
            debug!(kind = json_kind(value), "dropping non-object inline style");
        }
        return StyleMap::new();
    };

    map.iter()
        .filter_map(|(property, value)| match value {
            Value::String(s) if !s.is_empty() => Some((property.clone(), s.clone())),
            Value::Number(n) => Some((property.clone(), n.to_string())),
            Value::Null | Value::String(_) => None,
            other => {
                debug!(property = %property, kind = json_kind(other), "dropping inline style entry");
                None
            }
        })
        .collect()
}
