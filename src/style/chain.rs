//! Ordered style functions merged by override.

use std::fmt;
use std::sync::Arc;

use super::props::Props;
use super::value::StyleFragment;

/// A pure function from the normalized prop bag to a style fragment.
pub type StyleFn = Arc<dyn Fn(&Props) -> Option<StyleFragment> + Send + Sync>;

/// Wraps a closure as a [`StyleFn`].
///
/// ```rust
/// use stylesmith::{style_fn, StyleFragment};
///
/// let tone = style_fn(|props| {
///     let tone = props.get("tone")?.as_str()?;
///     Some(StyleFragment::new().set("color", format!("var(--{tone})")))
/// });
/// ```
pub fn style_fn<F>(f: F) -> StyleFn
where
    F: Fn(&Props) -> Option<StyleFragment> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The style functions of an extension chain, base first.
///
/// Chains are stored flat: extending a chain copies its functions and
/// appends, so a node's chain never nests.
#[derive(Clone, Default)]
pub struct StyleChain {
    functions: Vec<StyleFn>,
}

impl StyleChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain from optional functions, skipping absent entries.
    pub fn from_functions<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = Option<StyleFn>>,
    {
        Self {
            functions: functions.into_iter().flatten().collect(),
        }
    }

    /// Returns a new chain with `function` appended, if present.
    pub fn extended(&self, function: Option<StyleFn>) -> Self {
        let mut functions = self.functions.clone();
        functions.extend(function);
        Self { functions }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Evaluates every function against the full bag and merges the results;
    /// later functions override same-named keys from earlier ones.
    pub fn evaluate(&self, props: &Props) -> StyleFragment {
        self.functions
            .iter()
            .filter_map(|f| f(props))
            .fold(StyleFragment::new(), |mut merged, fragment| {
                merged.merge(fragment);
                merged
            })
    }
}

impl fmt::Debug for StyleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleChain")
            .field("functions", &self.functions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::value::StyleValue;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Props {
        match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => Props::new(),
        }
    }

    #[test]
    fn test_later_function_wins() {
        let chain = StyleChain::from_functions([
            Some(style_fn(|_| Some(StyleFragment::new().set("color", "red").set("gap", 1)))),
            None,
            Some(style_fn(|_| Some(StyleFragment::new().set("color", "blue")))),
        ]);
        assert_eq!(chain.len(), 2);

        let fragment = chain.evaluate(&Props::new());
        assert_eq!(fragment.get("color"), Some(&StyleValue::from("blue")));
        assert_eq!(fragment.get("gap"), Some(&StyleValue::from(1)));
    }

    #[test]
    fn test_every_function_sees_full_bag() {
        let chain = StyleChain::new()
            .extended(Some(style_fn(|p| {
                Some(StyleFragment::new().set("a", p.get("x")?.as_str()?))
            })))
            .extended(Some(style_fn(|p| {
                Some(StyleFragment::new().set("b", p.get("y")?.as_i64()?))
            })));

        let fragment = chain.evaluate(&props(json!({"x": "one", "y": 2})));
        assert_eq!(fragment.get("a"), Some(&StyleValue::from("one")));
        assert_eq!(fragment.get("b"), Some(&StyleValue::from(2i64)));
    }

    #[test]
    fn test_absent_output_contributes_nothing() {
        let chain = StyleChain::new()
            .extended(Some(style_fn(|_| None)))
            .extended(None);
        assert_eq!(chain.len(), 1);
        assert!(chain.evaluate(&Props::new()).is_empty());
    }

    #[test]
    fn test_extended_leaves_original_untouched() {
        let base = StyleChain::new().extended(Some(style_fn(|_| None)));
        let derived = base.extended(Some(style_fn(|_| None)));
        assert_eq!(base.len(), 1);
        assert_eq!(derived.len(), 2);
    }
}
