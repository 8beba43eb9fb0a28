//! End-to-end tests: token generation, theme emission, and styled nodes.

use std::sync::Arc;

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use once_cell::sync::Lazy;
use serde_json::json;
use stylesmith::{
    create, elements, styled, ClassSource, ConfigError, Extension, RenderProps, Scale,
    ScaleConfig, StyleFragment, StyleValue, Tag, ThemeContext, ThemeRegistry,
};

static SIZES: Lazy<Scale> = Lazy::new(|| {
    Scale::size("sm-size")
        .steps(5)
        .build()
        .expect("valid size scale")
});

fn parse_declarations<'i, 't>(
    block: &mut Parser<'i, 't>,
) -> Result<Vec<(String, String)>, ParseError<'i, ()>> {
    let mut declarations = Vec::new();
    while !block.is_exhausted() {
        let name: String = (**block.expect_ident()?).to_owned();
        block.expect_colon()?;

        let start = block.position();
        block.parse_until_before(Delimiter::Semicolon, |value| {
            while value.next().is_ok() {}
            Ok::<_, ParseError<'i, ()>>(())
        })?;
        let end = block.position();
        block.expect_semicolon()?;
        declarations.push((name, block.slice(start..end).to_string()));
    }
    Ok(declarations)
}

/// Tokenizes a `:root{...}` block and returns its declarations.
fn root_declarations(css: &str) -> Vec<(String, String)> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    assert!(matches!(parser.next(), Ok(Token::Colon)));
    assert!(matches!(parser.next(), Ok(Token::Ident(name)) if &**name == "root"));
    assert!(matches!(parser.next(), Ok(Token::CurlyBracketBlock)));

    let declarations = parser
        .parse_nested_block(parse_declarations)
        .expect("well-formed declarations");
    assert!(parser.is_exhausted(), "trailing input after root block");
    declarations
}

fn design_tokens() -> ThemeRegistry {
    ThemeRegistry::new()
        .scale(ScaleConfig::size("sm-size").steps(5).build().unwrap())
        .scale(
            ScaleConfig::hsla("sm-color-red", 0.0, 100.0)
                .steps(9)
                .build()
                .unwrap(),
        )
        .theme("light", [("surface", "white"), ("text", "var(--sm-color-red-9)")])
        .theme_opt(
            "dark",
            [("surface", Some("black")), ("text", None), ("border", Some("1px solid"))],
        )
}

#[test]
fn size_scale_resolves_documented_step() {
    assert_eq!(SIZES.get("sm-size-3").as_deref(), Some("0.75rem"));
    assert_eq!(SIZES.get("sm-size-3").as_deref(), Some("0.75rem"));
    assert_eq!(SIZES.get("sm-size-6"), None);
}

#[test]
fn color_scale_starts_at_min_lightness() {
    let reds = Scale::hsla("sm-color-red", 0.0, 100.0)
        .steps(9)
        .build()
        .unwrap();
    assert_eq!(reds.get("sm-color-red-1").as_deref(), Some("hsla(0,100%,10.00%,1)"));
}

#[test]
fn emitted_css_is_well_formed() {
    let registry = design_tokens();
    for theme in [Some("light"), Some("dark"), Some("missing"), None] {
        let css = registry.to_css_string(theme);
        let declarations = root_declarations(&css);
        assert!(declarations.iter().all(|(name, _)| name.starts_with("--")));
    }
}

#[test]
fn emitted_css_lists_globals_then_theme_keys_once() {
    let registry = design_tokens();

    let names: Vec<_> = root_declarations(&registry.to_css_string(Some("dark")))
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let mut expected: Vec<String> = (1..=5).map(|i| format!("--sm-size-{i}")).collect();
    expected.extend((1..=9).map(|i| format!("--sm-color-red-{i}")));
    expected.push("--surface".into());
    expected.push("--border".into());
    assert_eq!(names, expected);

    let light = root_declarations(&registry.to_css_string(Some("light")));
    assert_eq!(light[0], ("--sm-size-1".to_string(), "0.25rem".to_string()));
    let text = light.iter().find(|(name, _)| name == "--text").unwrap();
    assert_eq!(text.1, "var(--sm-color-red-9)");
    assert!(!light.iter().any(|(name, _)| name == "--border"));
}

#[test]
fn themed_global_is_declared_once() {
    let registry = design_tokens()
        .global_var("surface", "grey")
        .theme("light", [("sm-size-2", "0.4rem")]);

    let light = root_declarations(&registry.to_css_string(Some("light")));
    let names: Vec<_> = light.iter().map(|(name, _)| name.as_str()).collect();
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), names.len());

    assert_eq!(light[1], ("--sm-size-2".to_string(), "0.4rem".to_string()));
    let surface = light.iter().position(|(name, _)| name == "--surface").unwrap();
    assert_eq!(surface, 5 + 9);
    assert_eq!(light[surface].1, "white");

    let bare = root_declarations(&registry.to_css_string(None));
    assert_eq!(bare.last().unwrap(), &("--surface".to_string(), "grey".to_string()));
}

#[test]
fn extended_node_overrides_color_and_unions_classes() {
    let a = styled("div")
        .class_names("a")
        .style(|_| Some(StyleFragment::new().set("_color", "red")))
        .build()
        .unwrap();
    let b = styled("$")
        .extends(&a)
        .class_names("b")
        .style(|_| Some(StyleFragment::new().set("_color", "blue")))
        .build()
        .unwrap();

    let node = b.render(&RenderProps::new());
    assert_eq!(node.tag, "div");
    assert_eq!(node.class_name.as_deref(), Some("a b"));
    assert_eq!(node.style["color"], "blue");
}

#[test]
fn variant_groups_become_suffixed_custom_properties() {
    let node = elements::div()
        .style(|_| {
            Some(StyleFragment::new().set(
                "border",
                StyleValue::variants([("base", "1px"), ("hover", "2px")]),
            ))
        })
        .build()
        .unwrap();

    let rendered = node.render(&RenderProps::new());
    assert_eq!(rendered.style.len(), 2);
    assert_eq!(rendered.style["--border"], "1px");
    assert_eq!(rendered.style["--border_hover"], "2px");
}

#[test]
fn nodes_reference_theme_tokens() {
    let registry = Arc::new(design_tokens());
    let mut ctx = ThemeContext::new(registry.clone(), "light").provide();

    let lookup = registry.clone();
    let panel = styled("section")
        .class_names(vec!["panel", "panel"])
        .style(move |props| {
            let size = props.get("size")?.as_u64()?;
            let token = format!("sm-size-{size}");
            let reference = lookup.var(&token)?;
            Some(
                StyleFragment::new()
                    .set("_padding", reference)
                    .set("surface", lookup.var("surface")),
            )
        })
        .build()
        .unwrap();

    let rendered = panel.render(
        &RenderProps::from_json(json!({
            "$size": 2,
            "id": "main",
            "className": "wide",
            "style": {"padding": "0"},
        })),
    );
    assert_eq!(rendered.class_name.as_deref(), Some("wide panel"));
    assert_eq!(rendered.style["padding"], "0");
    assert_eq!(rendered.style["--surface"], "var(--surface)");
    assert_eq!(rendered.attributes["id"], json!("main"));

    let missing = panel.render(&RenderProps::new().css("size", 42));
    assert!(missing.style.is_empty());

    assert!(ctx.stylesheet().contains("--surface:white;"));
    ctx.set_theme_id("dark");
    assert!(ctx.stylesheet().contains("--surface:black;"));
    assert!(!ctx.stylesheet().contains("--text:"));
}

#[test]
fn construction_errors_fail_fast() {
    assert!(matches!(
        create(Tag::Extend, Extension::None, ClassSource::None, None),
        Err(ConfigError::SelfReferenceWithoutBase)
    ));
    assert!(matches!(
        styled("div").class_names_json(&json!(true)).build(),
        Err(ConfigError::InvalidClassNames { found: "boolean" })
    ));
    assert!(matches!(
        styled("not a tag").build(),
        Err(ConfigError::InvalidTag { .. })
    ));
    assert!(matches!(
        ScaleConfig::size("").build(),
        Err(ConfigError::EmptyScalePrefix)
    ));
}

#[test]
fn styled_nodes_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<stylesmith::StyledNode>();
    assert_send_sync::<Scale>();
    assert_send_sync::<ThemeRegistry>();
}
