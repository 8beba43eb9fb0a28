//! Default theme selection that follows the OS color mode.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use tracing::trace;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

/// A pair of theme ids picked between by the OS color mode.
///
/// # Example
///
/// ```rust
/// use stylesmith::{set_theme_detector, AdaptiveThemeIds, ColorMode};
///
/// set_theme_detector(|| ColorMode::Dark);
/// let ids = AdaptiveThemeIds::new("paper", "night");
/// assert_eq!(ids.resolve(), "night");
/// # stylesmith::reset_theme_detector();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveThemeIds {
    light: String,
    dark: String,
}

impl AdaptiveThemeIds {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// The theme id for the current color mode.
    pub fn resolve(&self) -> &str {
        self.for_mode(detect_color_mode())
    }

    pub fn for_mode(&self, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

/// Replaces the OS query, when set.
static DETECTOR_OVERRIDE: Lazy<Mutex<Option<ThemeDetector>>> = Lazy::new(|| Mutex::new(None));

/// Makes [`detect_color_mode`] report whatever `detector` returns instead of
/// asking the OS, e.g. when the host UI tracks the color mode itself.
pub fn set_theme_detector(detector: ThemeDetector) {
    *DETECTOR_OVERRIDE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(detector);
}

/// Goes back to asking the OS.
pub fn reset_theme_detector() {
    *DETECTOR_OVERRIDE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
}

/// The color mode that picks between light and dark theme ids.
pub fn detect_color_mode() -> ColorMode {
    let detector = *DETECTOR_OVERRIDE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let mode = match detector {
        Some(detector) => detector(),
        None => os_color_mode(),
    };
    trace!(?mode, overridden = detector.is_some(), "detected color mode");
    mode
}

fn os_color_mode() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}
