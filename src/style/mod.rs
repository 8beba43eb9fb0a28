//! Style composition for styled nodes.
//!
//! This module provides the per-render pipeline:
//!
//! - [`merge_class_names`]: de-duplicated class name union
//! - [`StyleChain`]: ordered style functions merged by override
//! - [`RenderProps`]: the raw prop bag and its normalization
//! - [`format_fragment`]: fragment to style entries, custom properties by default
//! - [`StyledNode`]: the node factory tying these together
//!
//! Nodes are defined once and extended by appending to their chain; every
//! render evaluates the whole chain against the caller's props.

mod chain;
mod class_names;
mod format;
mod node;
mod props;
mod tag;
mod value;

pub use chain::{style_fn, StyleChain, StyleFn};
pub use class_names::{merge_class_names, ClassSource};
pub use format::{format_fragment, property_name, RAW_PROPERTY_PREFIX, VARIANT_SEPARATOR};
pub use node::{create, elements, styled, Extension, NodeDescriptor, StyledBuilder, StyledNode};
pub use props::{
    NormalizedProps, Props, RenderProps, StyleMap, CLASS_NAME_PROP, INLINE_STYLE_PROP,
    STYLE_PROP_PREFIX,
};
pub use tag::{PrimitiveTag, Tag, SELF_REFERENCE_TAG};
pub use value::{CssValue, StyleFragment, StyleValue, BASE_VARIANT};
