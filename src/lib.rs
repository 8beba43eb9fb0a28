//! # Stylesmith - Runtime Styles and Design Tokens for Declarative UIs
//!
//! `stylesmith` lets UI components own their CSS at runtime. A component is a
//! [`StyledNode`]: a tag, class names, and a chain of pure style functions.
//! Each render turns the caller's prop bag into a [`NodeDescriptor`] (tag,
//! class name, style entries, pass-through attributes) for the host UI to
//! mount.
//!
//! Style functions emit design-token names by default, which become CSS
//! custom properties (`--tone`), so the values cascade. A leading `_` marks a
//! literal CSS property (`_display`). The tokens themselves come from
//! generated [`Scale`]s and per-theme overlays collected in a
//! [`ThemeRegistry`], which emits a single `:root{...}` block.
//!
//! ## Quick Start
//!
//! ```rust
//! use stylesmith::{styled, RenderProps, ScaleConfig, StyleFragment, StyleValue, ThemeRegistry};
//!
//! let registry = ThemeRegistry::new()
//!     .scale(ScaleConfig::size("sm-size").steps(4).build().unwrap())
//!     .theme("light", [("surface", "white")])
//!     .theme("dark", [("surface", "black")]);
//! assert!(registry.to_css_string(Some("dark")).ends_with("--surface:black;}"));
//!
//! let card = styled("section")
//!     .class_names("card")
//!     .style(|props| {
//!         let pad = props.get("pad").and_then(|v| v.as_u64()).unwrap_or(2);
//!         Some(
//!             StyleFragment::new()
//!                 .set("_padding", format!("var(--sm-size-{pad})"))
//!                 .set("shadow", StyleValue::variants([("base", "none"), ("hover", "0 1px 2px")])),
//!         )
//!     })
//!     .build()
//!     .unwrap();
//!
//! let node = card.render(&RenderProps::new().css("pad", 3).class_name("wide"));
//! assert_eq!(node.class_name.as_deref(), Some("wide card"));
//! assert_eq!(node.style["padding"], "var(--sm-size-3)");
//! assert_eq!(node.style["--shadow_hover"], "0 1px 2px");
//! ```
//!
//! ## Errors
//!
//! Malformed construction arguments fail immediately with a [`ConfigError`].
//! Missing data (unknown scale keys, absent overlay entries, empty values) is
//! silently left out.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for construction and theme
//! changes, `trace` per render and per computed token) and never installs a
//! subscriber.

mod error;
pub mod style;
pub mod theme;
pub mod tokens;

pub use error::ConfigError;
pub use style::{
    create, elements, format_fragment, merge_class_names, style_fn, styled, ClassSource, CssValue,
    Extension, NodeDescriptor, PrimitiveTag, Props, RenderProps, StyleChain, StyleFn,
    StyleFragment, StyleMap, StyleValue, StyledBuilder, StyledNode, Tag,
};
pub use theme::{
    detect_color_mode, reset_theme_detector, set_theme_detector, AdaptiveThemeIds, ColorMode,
    ThemeContext, ThemeRegistry,
};
pub use tokens::{HslaCalc, Scale, ScaleConfig, ScaleKind, SizeCalc};
