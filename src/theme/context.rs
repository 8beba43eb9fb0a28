//! The theme state a host UI shares with its components.

use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use super::adaptive::AdaptiveThemeIds;
use super::registry::ThemeRegistry;

/// Current theme id plus the stylesheet to mount for it.
///
/// A context starts detached: `is_loading` is `true` and theme changes are
/// ignored, matching what components see before the host provides one.
/// [`ThemeContext::provide`] marks it live. The stylesheet is computed once
/// per active theme id.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use stylesmith::{ThemeContext, ThemeRegistry};
///
/// let registry = Arc::new(
///     ThemeRegistry::new()
///         .theme("light", [("bg", "white")])
///         .theme("dark", [("bg", "black")]),
/// );
///
/// let mut ctx = ThemeContext::new(registry, "light").provide();
/// assert_eq!(ctx.stylesheet(), ":root{--bg:white;}");
///
/// ctx.set_theme_id("dark");
/// assert_eq!(ctx.theme_id(), "dark");
/// assert_eq!(ctx.style_element(), "<style>:root{--bg:black;}</style>");
/// ```
#[derive(Debug)]
pub struct ThemeContext {
    registry: Arc<ThemeRegistry>,
    theme_id: String,
    is_loading: bool,
    stylesheet: OnceCell<String>,
}

impl ThemeContext {
    pub fn new(registry: Arc<ThemeRegistry>, default_theme_id: impl Into<String>) -> Self {
        Self {
            registry,
            theme_id: default_theme_id.into(),
            is_loading: true,
            stylesheet: OnceCell::new(),
        }
    }

    /// A context whose default theme follows the OS color mode.
    pub fn adaptive(registry: Arc<ThemeRegistry>, ids: &AdaptiveThemeIds) -> Self {
        Self::new(registry, ids.resolve())
    }

    /// Marks the context as provided by the host.
    pub fn provide(mut self) -> Self {
        self.is_loading = false;
        self
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Switches the active theme. Returns `true` if the id changed.
    ///
    /// Detached contexts ignore the call.
    pub fn set_theme_id(&mut self, theme_id: impl Into<String>) -> bool {
        let theme_id = theme_id.into();
        if self.is_loading {
            debug!(theme = %theme_id, "ignoring theme change on detached context");
            return false;
        }
        if theme_id == self.theme_id {
            return false;
        }

        if !self.registry.has_theme(&theme_id) {
            debug!(theme = %theme_id, "switching to theme without overlay");
        }
        debug!(from = %self.theme_id, to = %theme_id, "theme changed");
        self.theme_id = theme_id;
        self.stylesheet = OnceCell::new();
        true
    }

    /// The root CSS for the active theme.
    pub fn stylesheet(&self) -> &str {
        self.stylesheet
            .get_or_init(|| self.registry.to_css_string(Some(self.theme_id.as_str())))
    }

    /// The stylesheet wrapped in a `<style>` element.
    pub fn style_element(&self) -> String {
        format!("<style>{}</style>", self.stylesheet())
    }
}
