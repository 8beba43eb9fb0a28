//! Element tags for styled nodes.

use std::fmt;

use crate::error::ConfigError;

/// Tag marker meaning "reuse the tag of the node being extended".
pub const SELF_REFERENCE_TAG: &str = "$";

macro_rules! primitive_tags {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// The closed set of primitive element tags.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PrimitiveTag {
            $($variant,)*
        }

        impl PrimitiveTag {
            /// Every primitive tag, in declaration order.
            pub const ALL: &'static [PrimitiveTag] = &[$(PrimitiveTag::$variant,)*];

            /// The element name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(PrimitiveTag::$variant => $name,)*
                }
            }

            /// Looks up a primitive tag by element name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(PrimitiveTag::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

primitive_tags! {
    A => "a",
    Article => "article",
    Aside => "aside",
    Button => "button",
    Code => "code",
    Div => "div",
    Footer => "footer",
    Form => "form",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    H4 => "h4",
    H5 => "h5",
    H6 => "h6",
    Header => "header",
    Img => "img",
    Input => "input",
    Label => "label",
    Li => "li",
    Main => "main",
    Nav => "nav",
    Ol => "ol",
    P => "p",
    Pre => "pre",
    Section => "section",
    Select => "select",
    Span => "span",
    Strong => "strong",
    Svg => "svg",
    Table => "table",
    Td => "td",
    Textarea => "textarea",
    Th => "th",
    Tr => "tr",
    Ul => "ul",
}

impl fmt::Display for PrimitiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag argument of a styled node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Primitive(PrimitiveTag),
    /// A custom element name, validated by [`Tag::custom`].
    Custom(String),
    /// The self-reference marker; only valid when extending a styled node.
    Extend,
}

impl Tag {
    /// Validates a custom element name.
    ///
    /// Names must start with an ASCII letter and contain only ASCII
    /// alphanumerics, `-`, `_`, `.` or `:`.
    pub fn custom(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if valid_start && valid_rest {
            Ok(Tag::Custom(name))
        } else {
            Err(ConfigError::InvalidTag { tag: name })
        }
    }

    /// Parses a tag string: `$` is the self-reference marker, known element
    /// names are primitives, anything else must be a valid custom name.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        if name == SELF_REFERENCE_TAG {
            return Ok(Tag::Extend);
        }
        match PrimitiveTag::from_name(name) {
            Some(tag) => Ok(Tag::Primitive(tag)),
            None => Tag::custom(name),
        }
    }

    /// The element name, or `None` for the self-reference marker.
    pub fn name(&self) -> Option<&str> {
        match self {
            Tag::Primitive(tag) => Some(tag.as_str()),
            Tag::Custom(name) => Some(name),
            Tag::Extend => None,
        }
    }
}

impl From<PrimitiveTag> for Tag {
    fn from(tag: PrimitiveTag) -> Self {
        Tag::Primitive(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(SELF_REFERENCE_TAG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive() {
        assert_eq!(Tag::parse("div").unwrap(), Tag::Primitive(PrimitiveTag::Div));
        assert_eq!(Tag::parse("h3").unwrap(), Tag::Primitive(PrimitiveTag::H3));
    }

    #[test]
    fn test_parse_marker() {
        assert_eq!(Tag::parse("$").unwrap(), Tag::Extend);
        assert_eq!(Tag::Extend.name(), None);
        assert_eq!(Tag::Extend.to_string(), "$");
    }

    #[test]
    fn test_parse_custom() {
        assert_eq!(
            Tag::parse("my-widget").unwrap(),
            Tag::Custom("my-widget".into())
        );
        assert_eq!(Tag::parse("svg:g").unwrap().name(), Some("svg:g"));
    }

    #[test]
    fn test_invalid_custom_tags() {
        for bad in ["", "9col", "-x", "a b", "x<y"] {
            assert!(
                matches!(Tag::parse(bad), Err(ConfigError::InvalidTag { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_primitive_round_trip_names() {
        for tag in PrimitiveTag::ALL {
            assert_eq!(PrimitiveTag::from_name(tag.as_str()), Some(*tag));
        }
    }
}
