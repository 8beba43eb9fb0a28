//! Themes and root stylesheet generation.
//!
//! This module provides:
//!
//! - [`ThemeRegistry`]: global scales plus per-theme overlays, emitted as CSS
//! - [`ThemeContext`]: the active theme id and its mountable stylesheet
//! - [`AdaptiveThemeIds`]: light/dark theme ids chosen by OS color mode
//! - [`ColorMode`]: Light or dark color mode enum

mod adaptive;
mod context;
mod registry;

pub use adaptive::{
    detect_color_mode, reset_theme_detector, set_theme_detector, AdaptiveThemeIds, ColorMode,
};
pub use context::ThemeContext;
pub use registry::{Overlay, ThemeRegistry};
