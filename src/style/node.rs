//! Styled node factory.
//!
//! A [`StyledNode`] is built once at setup from a tag, an optional base
//! node, class names, and a style function. Each render turns a
//! [`RenderProps`] bag into a [`NodeDescriptor`] for the host renderer:
//!
//! 1. the bag is normalized into style props and pass-through attributes
//! 2. the node's style chain is evaluated against the full bag
//! 3. the merged fragment is formatted into style entries
//! 4. caller inline style is applied on top, and the caller class name is
//!    merged with the node's own
//!
//! # Example
//!
//! ```rust
//! use stylesmith::{styled, RenderProps, StyleFragment};
//!
//! let button = styled("button")
//!     .class_names("btn")
//!     .style(|props| {
//!         let size = props.get("size")?.as_u64()?;
//!         Some(StyleFragment::new().set("_padding", format!("var(--sm-size-{size})")))
//!     })
//!     .build()
//!     .unwrap();
//!
//! let primary = button
//!     .skin()
//!     .class_names("btn-primary")
//!     .style(|_| Some(StyleFragment::new().set("tone", "var(--sm-color-blue-5)")))
//!     .build()
//!     .unwrap();
//!
//! let node = primary.render(&RenderProps::new().css("size", 2).attr("type", "submit"));
//! assert_eq!(node.tag, "button");
//! assert_eq!(node.class_name.as_deref(), Some("btn btn-primary"));
//! assert_eq!(node.style["padding"], "var(--sm-size-2)");
//! assert_eq!(node.style["--tone"], "var(--sm-color-blue-5)");
//! assert_eq!(node.attributes["type"], "submit");
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::chain::{StyleChain, StyleFn};
use super::class_names::{merge_class_names, ClassSource};
use super::format::format_fragment;
use super::props::{Props, RenderProps, StyleMap};
use super::tag::Tag;
use super::value::StyleFragment;
use crate::error::ConfigError;

/// What a new styled node builds on.
#[derive(Debug, Clone, Default)]
pub enum Extension {
    #[default]
    None,
    /// Base class names without a base node.
    ClassNames(ClassSource),
    /// An existing styled node whose tag, class name, and style chain are
    /// inherited.
    Node(StyledNode),
}

impl From<StyledNode> for Extension {
    fn from(node: StyledNode) -> Self {
        Extension::Node(node)
    }
}

impl From<&StyledNode> for Extension {
    fn from(node: &StyledNode) -> Self {
        Extension::Node(node.clone())
    }
}

impl From<ClassSource> for Extension {
    fn from(class_names: ClassSource) -> Self {
        Extension::ClassNames(class_names)
    }
}

/// The output of one render, handed to the host renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    /// Resolved element tag.
    pub tag: String,
    /// Merged class name; `None` when no tokens remain.
    pub class_name: Option<String>,
    /// Computed style with caller inline style applied on top.
    pub style: StyleMap,
    /// Pass-through attributes.
    pub attributes: Props,
}

#[derive(Debug)]
struct NodeInner {
    tag: String,
    class_name: String,
    chain: StyleChain,
    display_name: String,
}

/// A reusable, immutable styled element definition.
///
/// Cloning is cheap and clones share the definition.
#[derive(Debug, Clone)]
pub struct StyledNode {
    inner: Arc<NodeInner>,
}

impl StyledNode {
    /// The resolved element tag.
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// The merged class name of the whole extension chain.
    pub fn class_name(&self) -> &str {
        &self.inner.class_name
    }

    /// `Styled_<base>` where base is the extended node's display name or the
    /// tag.
    pub fn display_name(&self) -> &str {
        &self.inner.display_name
    }

    pub fn style_chain(&self) -> &StyleChain {
        &self.inner.chain
    }

    /// Runs the merged style function against a normalized bag.
    pub fn evaluate(&self, props: &Props) -> StyleFragment {
        self.inner.chain.evaluate(props)
    }

    /// Starts a builder for a variant that reuses this node's tag.
    pub fn skin(&self) -> StyledBuilder {
        StyledBuilder::new(Tag::Extend).extends(self)
    }

    /// Renders one prop bag into a node descriptor.
    pub fn render(&self, props: &RenderProps) -> NodeDescriptor {
        let normalized = props.normalize();
        let fragment = self.evaluate(normalized.bag());

        let mut style = format_fragment(&fragment);
        style.extend(normalized.inline_style.clone());

        let own = ClassSource::One(self.inner.class_name.clone());
        let class_name = merge_class_names([&normalized.class_name, &own]);

        trace!(
            node = %self.inner.display_name,
            entries = style.len(),
            "rendered styled node"
        );

        NodeDescriptor {
            tag: self.inner.tag.clone(),
            class_name: (!class_name.is_empty()).then_some(class_name),
            style,
            attributes: normalized.attributes,
        }
    }
}

/// Creates a styled node.
///
/// Fails when `tag` is the self-reference marker and `extension` is not a
/// node. With a node extension the new node appends `style` to the base
/// chain and unions its class names after the base's.
pub fn create(
    tag: Tag,
    extension: Extension,
    class_names: ClassSource,
    style: Option<StyleFn>,
) -> Result<StyledNode, ConfigError> {
    let base = match &extension {
        Extension::Node(node) => Some(node),
        _ => None,
    };

    if let Tag::Custom(name) = &tag {
        Tag::custom(name.as_str())?;
    }

    let tag_name = match (tag.name(), base) {
        (Some(name), _) => name.to_string(),
        (None, Some(base)) => base.tag().to_string(),
        (None, None) => return Err(ConfigError::SelfReferenceWithoutBase),
    };

    let (base_classes, chain) = match &extension {
        Extension::None => (ClassSource::None, StyleChain::new()),
        Extension::ClassNames(classes) => (classes.clone(), StyleChain::new()),
        Extension::Node(node) => (
            ClassSource::One(node.class_name().to_string()),
            node.style_chain().clone(),
        ),
    };

    let class_name = merge_class_names([&base_classes, &class_names]);
    let chain = chain.extended(style);
    let display_name = format!(
        "Styled_{}",
        base.map_or(tag_name.as_str(), StyledNode::display_name)
    );

    debug!(
        node = %display_name,
        tag = %tag_name,
        class_name = %class_name,
        functions = chain.len(),
        "created styled node"
    );

    Ok(StyledNode {
        inner: Arc::new(NodeInner {
            tag: tag_name,
            class_name,
            chain,
            display_name,
        }),
    })
}

/// Starts a builder from a tag string (`"div"`, `"my-widget"`, or `"$"`).
///
/// An invalid tag is reported by [`StyledBuilder::build`].
pub fn styled(tag: &str) -> StyledBuilder {
    StyledBuilder {
        tag: Tag::parse(tag),
        extension: Extension::None,
        class_names: Ok(ClassSource::None),
        style: None,
    }
}

/// Fluent construction of a [`StyledNode`].
pub struct StyledBuilder {
    tag: Result<Tag, ConfigError>,
    extension: Extension,
    class_names: Result<ClassSource, ConfigError>,
    style: Option<StyleFn>,
}

impl StyledBuilder {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: Ok(tag.into()),
            extension: Extension::None,
            class_names: Ok(ClassSource::None),
            style: None,
        }
    }

    /// Extends an existing node, or base class names.
    pub fn extends(mut self, extension: impl Into<Extension>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn class_names(mut self, class_names: impl Into<ClassSource>) -> Self {
        self.class_names = Ok(class_names.into());
        self
    }

    /// Class names from dynamic data; malformed values fail the build.
    pub fn class_names_json(mut self, class_names: &Value) -> Self {
        self.class_names = ClassSource::try_from(class_names);
        self
    }

    pub fn style<F>(self, f: F) -> Self
    where
        F: Fn(&Props) -> Option<StyleFragment> + Send + Sync + 'static,
    {
        self.style_fn(Arc::new(f))
    }

    pub fn style_fn(mut self, f: StyleFn) -> Self {
        self.style = Some(f);
        self
    }

    pub fn build(self) -> Result<StyledNode, ConfigError> {
        create(self.tag?, self.extension, self.class_names?, self.style)
    }
}

macro_rules! element_builders {
    ($($fn_name:ident => $variant:ident),* $(,)?) => {
        /// Shorthand builders for primitive tags.
        pub mod elements {
            use super::StyledBuilder;
            use crate::style::tag::PrimitiveTag;

            $(
                pub fn $fn_name() -> StyledBuilder {
                    StyledBuilder::new(PrimitiveTag::$variant)
                }
            )*
        }
    };
}

element_builders! {
    a => A,
    article => Article,
    aside => Aside,
    button => Button,
    div => Div,
    footer => Footer,
    form => Form,
    h1 => H1,
    h2 => H2,
    h3 => H3,
    header => Header,
    img => Img,
    input => Input,
    label => Label,
    li => Li,
    main => Main,
    nav => Nav,
    p => P,
    section => Section,
    span => Span,
    ul => Ul,
}
