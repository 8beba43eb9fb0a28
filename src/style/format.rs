//! Formatting merged fragments into style entries.

use super::props::StyleMap;
use super::value::{CssValue, StyleFragment, StyleValue, BASE_VARIANT};

/// Prefix marking a fragment key as a literal CSS property name.
pub const RAW_PROPERTY_PREFIX: char = '_';

/// Separator between a key and its variant suffix.
pub const VARIANT_SEPARATOR: char = '_';

/// Maps a fragment key to the emitted property name.
///
/// `_display` becomes `display`; `gap` becomes `--gap`.
pub fn property_name(key: &str) -> String {
    match key.strip_prefix(RAW_PROPERTY_PREFIX) {
        Some(raw) => raw.to_string(),
        None => format!("--{}", key),
    }
}

/// Formats a merged fragment into style entries.
///
/// Variant groups expand into one entry per suffix: `base` keeps the plain
/// property name, other suffixes append `_suffix`. Unset and empty values
/// are dropped.
///
/// ```rust
/// use stylesmith::{format_fragment, StyleFragment, StyleValue};
///
/// let fragment = StyleFragment::new()
///     .set("border", StyleValue::variants([("base", "1px"), ("hover", "2px")]))
///     .set("_display", "grid");
/// let style = format_fragment(&fragment);
///
/// assert_eq!(style["--border"], "1px");
/// assert_eq!(style["--border_hover"], "2px");
/// assert_eq!(style["display"], "grid");
/// ```
pub fn format_fragment(fragment: &StyleFragment) -> StyleMap {
    let mut style = StyleMap::new();

    for (key, value) in fragment.iter() {
        let name = property_name(key);
        match value {
            StyleValue::Unset => {}
            StyleValue::Value(v) => push_entry(&mut style, name, Some(v)),
            StyleValue::Variants(group) => {
                for (suffix, v) in group {
                    let variant_name = if suffix == BASE_VARIANT {
                        name.clone()
                    } else {
                        format!("{}{}{}", name, VARIANT_SEPARATOR, suffix)
                    };
                    push_entry(&mut style, variant_name, v.as_ref());
                }
            }
        }
    }

    style
}

fn push_entry(style: &mut StyleMap, name: String, value: Option<&CssValue>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        style.insert(name, value.to_string());
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn raw_keys_never_get_custom_prefix(name in "[a-z][a-z-]{0,12}", value in "[a-z0-9]{1,8}") {
            let raw_key = format!("_{}", name);
            let fragment = StyleFragment::new()
                .set(raw_key.as_str(), value.as_str())
                .set(name.as_str(), value.as_str());
            let style = format_fragment(&fragment);

            prop_assert!(style.contains_key(&name));
            let custom = format!("--{}", name);
            prop_assert!(style.contains_key(&custom));
            prop_assert_eq!(style.len(), 2);
        }

        #[test]
        fn unmarked_keys_always_get_custom_prefix(name in "[a-z][a-z0-9-]{0,12}") {
            let fragment = StyleFragment::new().set(name.as_str(), "1");
            let style = format_fragment(&fragment);
            for key in style.keys() {
                prop_assert!(key.starts_with("--"));
            }
        }
    }
}
