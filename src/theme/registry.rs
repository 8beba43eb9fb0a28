//! Theme registry and root CSS emission.
//!
//! A [`ThemeRegistry`] combines global token scales, individual global
//! variables, and named theme overlays. [`ThemeRegistry::to_css_string`]
//! renders one `:root{...}` block for a theme id:
//!
//! - every global variable, scales expanded across their full step range
//! - the requested theme's overlay entries, in the order the overlay keys
//!   were first declared by any theme
//!
//! Each variable is emitted once. A name declared again (by a later global or
//! by the active overlay) keeps its first position and takes the later value.
//!
//! Overlay entries that are missing, empty, or belong to an unknown theme are
//! left out without error.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::ConfigError;
use crate::tokens::Scale;

/// Variable name to value for one theme.
pub type Overlay = IndexMap<String, Option<String>>;

#[derive(Debug)]
enum GlobalEntry {
    Scale(Scale),
    Var(String, String),
}

impl GlobalEntry {
    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        match self {
            GlobalEntry::Scale(scale) => Box::new(scale.keys()),
            GlobalEntry::Var(name, _) => Box::new(std::iter::once(name.clone())),
        }
    }
}

/// Global scales and per-theme overlays emitted as root custom properties.
///
/// # Example
///
/// ```rust
/// use stylesmith::{ScaleConfig, ThemeRegistry};
///
/// let registry = ThemeRegistry::new()
///     .scale(ScaleConfig::size("sz").steps(2).build().unwrap())
///     .global_var("font-body", "Inter, sans-serif")
///     .theme("light", [("bg", "white"), ("fg", "black")])
///     .theme("dark", [("bg", "black")]);
///
/// assert_eq!(
///     registry.to_css_string(Some("dark")),
///     ":root{--sz-1:0.25rem;--sz-2:0.50rem;--font-body:Inter, sans-serif;--bg:black;}"
/// );
/// assert_eq!(registry.var("fg").as_deref(), Some("var(--fg)"));
/// ```
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    globals: Vec<GlobalEntry>,
    overlays: IndexMap<String, Overlay>,
    overlay_keys: IndexSet<String>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a global token scale.
    pub fn scale(mut self, scale: Scale) -> Self {
        self.globals.push(GlobalEntry::Scale(scale));
        self
    }

    /// Adds a single global variable.
    pub fn global_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.push(GlobalEntry::Var(name.into(), value.into()));
        self
    }

    /// Adds (or extends) a theme overlay.
    pub fn theme<K, V, I>(self, theme_id: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.theme_opt(
            theme_id,
            entries.into_iter().map(|(k, v)| (k, Some(v))),
        )
    }

    /// Adds a theme overlay whose entries may be absent.
    pub fn theme_opt<K, V, I>(mut self, theme_id: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        let overlay = self.overlays.entry(theme_id.into()).or_default();
        for (key, value) in entries {
            let key = key.into();
            self.overlay_keys.insert(key.clone());
            overlay.insert(key, value.map(Into::into));
        }
        self
    }

    /// Adds overlays from a YAML document mapping theme ids to variables:
    ///
    /// ```yaml
    /// light:
    ///   bg: white
    /// dark:
    ///   bg: black
    ///   accent: ~
    /// ```
    pub fn themes_from_yaml(mut self, document: &str) -> Result<Self, ConfigError> {
        let themes: IndexMap<String, Overlay> = serde_yaml::from_str(document)?;
        for (theme_id, overlay) in themes {
            self = self.theme_opt(theme_id, overlay);
        }
        Ok(self)
    }

    /// Registered theme ids in registration order.
    pub fn theme_ids(&self) -> impl Iterator<Item = &str> {
        self.overlays.keys().map(String::as_str)
    }

    pub fn has_theme(&self, theme_id: &str) -> bool {
        self.overlays.contains_key(theme_id)
    }

    /// Union of overlay keys across all themes, in first-declared order.
    pub fn overlay_keys(&self) -> impl Iterator<Item = &str> {
        self.overlay_keys.iter().map(String::as_str)
    }

    /// Every global variable name, scales expanded.
    pub fn global_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.globals.iter().flat_map(GlobalEntry::keys)
    }

    /// Returns `true` if `key` is a global variable or an overlay key of
    /// any theme.
    pub fn declares(&self, key: &str) -> bool {
        self.overlay_keys.contains(key)
            || self.globals.iter().any(|entry| match entry {
                GlobalEntry::Scale(scale) => scale.index_of(key).is_some(),
                GlobalEntry::Var(name, _) => name == key,
            })
    }

    /// A `var(--key)` reference for a declared key.
    pub fn var(&self, key: &str) -> Option<String> {
        self.declares(key).then(|| format!("var(--{})", key))
    }

    /// Looks up the value `key` has under `theme_id`; overlays take
    /// precedence over globals.
    pub fn resolve(&self, key: &str, theme_id: Option<&str>) -> Option<String> {
        let themed = theme_id
            .and_then(|id| self.overlays.get(id))
            .and_then(|overlay| overlay.get(key))
            .and_then(|value| value.as_deref())
            .filter(|value| !value.is_empty());
        if let Some(value) = themed {
            return Some(value.to_string());
        }
        self.globals.iter().rev().find_map(|entry| match entry {
            GlobalEntry::Scale(scale) => scale.get(key).map(|value| value.to_string()),
            GlobalEntry::Var(name, value) => (name == key && !value.is_empty()).then(|| value.clone()),
        })
    }

    /// Renders the root block for `theme_id`.
    pub fn to_css_string(&self, theme_id: Option<&str>) -> String {
        let mut declarations = Declarations::default();

        for entry in &self.globals {
            match entry {
                GlobalEntry::Scale(scale) => {
                    for (key, value) in scale.entries() {
                        declarations.set(key, &value);
                    }
                }
                GlobalEntry::Var(name, value) => declarations.set(name.clone(), value),
            }
        }

        match theme_id.map(|id| (id, self.overlays.get(id))) {
            Some((_, Some(overlay))) => {
                for key in &self.overlay_keys {
                    if let Some(value) = overlay.get(key).and_then(|v| v.as_deref()) {
                        declarations.set(key.clone(), value);
                    }
                }
            }
            Some((id, None)) => debug!(theme = id, "no overlay registered for theme"),
            None => {}
        }

        declarations.to_css()
    }
}

/// Root declarations keyed by variable name, in first-declared order.
#[derive(Default)]
struct Declarations(IndexMap<String, String>);

impl Declarations {
    fn set(&mut self, name: String, value: &str) {
        if !value.is_empty() {
            self.0.insert(name, value.to_string());
        }
    }

    fn to_css(&self) -> String {
        let mut css = String::from(":root{");
        for (name, value) in &self.0 {
            css.push_str("--");
            css.push_str(name);
            css.push(':');
            css.push_str(value);
            css.push(';');
        }
        css.push('}');
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ScaleConfig, SizeCalc};

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new()
            .scale(ScaleConfig::size("sz").steps(3).build().unwrap())
            .theme("light", [("bg", "white"), ("fg", "black")])
            .theme_opt("dark", [("fg", Some("white")), ("bg", Some("")), ("accent", None::<&str>)])
            .theme("contrast", [("accent", "yellow")])
    }

    #[test]
    fn test_theme_ids_in_order() {
        let registry = registry();
        let ids: Vec<_> = registry.theme_ids().collect();
        assert_eq!(ids, vec!["light", "dark", "contrast"]);
    }

    #[test]
    fn test_overlay_key_union() {
        let registry = registry();
        let keys: Vec<_> = registry.overlay_keys().collect();
        assert_eq!(keys, vec!["bg", "fg", "accent"]);
    }

    #[test]
    fn test_css_for_light() {
        assert_eq!(
            registry().to_css_string(Some("light")),
            ":root{--sz-1:0.25rem;--sz-2:0.50rem;--sz-3:0.75rem;--bg:white;--fg:black;}"
        );
    }

    #[test]
    fn test_css_omits_empty_and_missing_entries() {
        assert_eq!(
            registry().to_css_string(Some("dark")),
            ":root{--sz-1:0.25rem;--sz-2:0.50rem;--sz-3:0.75rem;--fg:white;}"
        );
    }

    #[test]
    fn test_css_without_or_unknown_theme() {
        let expected = ":root{--sz-1:0.25rem;--sz-2:0.50rem;--sz-3:0.75rem;}";
        assert_eq!(registry().to_css_string(None), expected);
        assert_eq!(registry().to_css_string(Some("sepia")), expected);
    }

    #[test]
    fn test_empty_registry() {
        assert_eq!(ThemeRegistry::new().to_css_string(None), ":root{}");
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let registry = registry();
        let first = registry.to_css_string(Some("light"));
        assert_eq!(first, registry.to_css_string(Some("light")));
    }

    #[test]
    fn test_var_references() {
        let registry = registry().global_var("font", "serif");
        assert_eq!(registry.var("sz-2").as_deref(), Some("var(--sz-2)"));
        assert_eq!(registry.var("accent").as_deref(), Some("var(--accent)"));
        assert_eq!(registry.var("font").as_deref(), Some("var(--font)"));
        assert_eq!(registry.var("sz-4"), None);
        assert_eq!(registry.var("nope"), None);
    }

    #[test]
    fn test_resolve_prefers_overlay() {
        let registry = registry().global_var("bg", "grey");
        assert_eq!(registry.resolve("bg", Some("light")).as_deref(), Some("white"));
        assert_eq!(registry.resolve("bg", Some("dark")).as_deref(), Some("grey"));
        assert_eq!(registry.resolve("sz-3", None).as_deref(), Some("0.75rem"));
        assert_eq!(registry.resolve("fg", None), None);
    }

    #[test]
    fn test_overlay_replaces_global_in_place() {
        let registry = ThemeRegistry::new()
            .scale(ScaleConfig::size("sz").steps(1).build().unwrap())
            .global_var("bg", "grey")
            .global_var("fg", "black")
            .theme("light", [("bg", "white")])
            .theme_opt("dark", [("bg", Some(""))]);

        assert_eq!(
            registry.to_css_string(Some("light")),
            ":root{--sz-1:0.25rem;--bg:white;--fg:black;}"
        );
        assert_eq!(
            registry.to_css_string(Some("dark")),
            ":root{--sz-1:0.25rem;--bg:grey;--fg:black;}"
        );
    }

    #[test]
    fn test_repeated_global_names_emit_once() {
        let registry = ThemeRegistry::new()
            .scale(ScaleConfig::size("sz").steps(2).build().unwrap())
            .scale(ScaleConfig::new("sz", SizeCalc::default().unit("px")).steps(3).build().unwrap())
            .global_var("sz-1", "1px");

        assert_eq!(
            registry.to_css_string(None),
            ":root{--sz-1:1px;--sz-2:0.50px;--sz-3:0.75px;}"
        );
    }

    #[test]
    fn test_global_keys() {
        let registry = registry().global_var("font", "serif");
        let keys: Vec<_> = registry.global_keys().collect();
        assert_eq!(keys, vec!["sz-1", "sz-2", "sz-3", "font"]);
    }

    #[test]
    fn test_themes_from_yaml() {
        let registry = ThemeRegistry::new()
            .themes_from_yaml("light:\n  bg: white\ndark:\n  bg: black\n  accent: ~\n")
            .unwrap();
        assert!(registry.has_theme("dark"));
        assert_eq!(registry.to_css_string(Some("dark")), ":root{--bg:black;}");
        assert!(registry.declares("accent"));
    }

    #[test]
    fn test_themes_from_invalid_yaml() {
        let err = ThemeRegistry::new()
            .themes_from_yaml("- just\n- a list\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverlayDocument(_)));
    }
}
