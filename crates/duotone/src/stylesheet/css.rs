//! CSS theme tables.
//!
//! Class rules map to roles, declarations map to [`Property`] values, and
//! dark overrides use the same scoping a utility-class stylesheet does:
//!
//! ```css
//! .color-is-selected {
//!     background: green-500;
//!     color: white;
//!     layer: state;
//! }
//!
//! /* Dark overrides: scoped under the .dark class... */
//! .dark .color-is-selected {
//!     background: green-400;
//!     color: slate-200;
//! }
//!
//! /* ...or inside a color-scheme media query. */
//! @media (prefers-color-scheme: dark) {
//!     .disabled { background: zinc-600; }
//! }
//!
//! /* Composition */
//! .progress-bar-fill {
//!     composes: color-is-selected;
//!     border-radius: full;
//! }
//! ```
//!
//! - Selector lists (`.a, .b`) apply the block to each role.
//! - Type selectors (`button.primary`) are ignored; the class names the role.
//! - Compound class selectors other than the `.dark` scope are rejected.
//! - Values are kept as written, so `1px solid` or `scale-110` pass through.
//! - A later block for the same role and mode overrides earlier declarations.
//! - `composes` and `layer` describe the role in both modes, so they are only
//!   accepted in light rules; a dark rule that sets them is an error.
//!
//! Parsing is built on `cssparser`, so comments, escapes and nesting of
//! blocks are handled by a real CSS tokenizer.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use indexmap::IndexMap;

use crate::error::ThemeError;
use crate::style::{AttributeSet, Property, StyleRole};
use crate::theme::{Layer, ThemeEntry};

/// Class name that scopes a rule to dark mode.
pub const DARK_SCOPE_CLASS: &str = "dark";

/// Parses a CSS theme table into entries, in order of first appearance.
///
/// # Errors
///
/// Returns `Parse` with a line and column for syntax errors, unsupported
/// selectors and unknown properties.
pub fn parse_css(css: &str) -> Result<Vec<ThemeEntry>, ThemeError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let mut sheet = SheetParser {
        rules: IndexMap::new(),
        scope: Scope::Light,
    };

    let rule_list = cssparser::StyleSheetParser::new(&mut parser, &mut sheet);
    for result in rule_list {
        if let Err((error, _)) = result {
            return Err(convert_error(error));
        }
    }

    Ok(sheet.into_entries())
}

fn custom<'i>(input: &Parser<'i, '_>, message: impl Into<String>) -> ParseError<'i, String> {
    input.new_custom_error::<String, String>(message.into())
}

fn convert_error(error: ParseError<'_, String>) -> ThemeError {
    let message = match error.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };
    ThemeError::parse(format!(
        "line {}, column {}: {}",
        error.location.line + 1,
        error.location.column,
        message
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Light,
    Dark,
}

/// One selector's target: a role, in light or dark scope.
struct Target {
    role: String,
    scope: Scope,
}

#[derive(Default)]
struct PendingRule {
    includes: Vec<StyleRole>,
    layer: Option<Layer>,
    light: AttributeSet,
    dark: Option<AttributeSet>,
}

struct SheetParser {
    rules: IndexMap<String, PendingRule>,
    scope: Scope,
}

impl SheetParser {
    fn apply(&mut self, target: &Target, declarations: &[Declaration]) {
        let rule = self.rules.entry(target.role.clone()).or_default();
        for declaration in declarations {
            match declaration {
                Declaration::Attribute(property, value) => {
                    let attributes = match target.scope {
                        Scope::Light => &mut rule.light,
                        Scope::Dark => rule.dark.get_or_insert_with(AttributeSet::new),
                    };
                    attributes.set(*property, value.clone());
                }
                Declaration::Composes(roles) => rule.includes.extend(roles.iter().cloned()),
                Declaration::Layer(layer) => rule.layer = Some(*layer),
            }
        }
    }

    fn into_entries(self) -> Vec<ThemeEntry> {
        self.rules
            .into_iter()
            .map(|(role, rule)| {
                let mut entry = ThemeEntry::new(role)
                    .with_includes(rule.includes)
                    .with_layer(rule.layer.unwrap_or_default())
                    .with_light_attributes(rule.light);
                if let Some(dark) = rule.dark {
                    entry = entry.with_dark_attributes(dark);
                }
                entry
            })
            .collect()
    }
}

fn selector_target(classes: &[String], scope: Scope) -> Result<Target, String> {
    let scoped_dark = classes.len() > 1 && classes.iter().any(|c| c == DARK_SCOPE_CLASS);
    let roles: Vec<&String> = if scoped_dark {
        classes.iter().filter(|c| *c != DARK_SCOPE_CLASS).collect()
    } else {
        classes.iter().collect()
    };

    match roles.as_slice() {
        [role] => Ok(Target {
            role: (*role).clone(),
            scope: if scoped_dark { Scope::Dark } else { scope },
        }),
        [] => Err("selector does not name a style role".to_string()),
        _ => Err(format!(
            "compound selector '.{}' is not supported",
            classes.join(".")
        )),
    }
}

impl<'i> QualifiedRuleParser<'i> for SheetParser {
    type Prelude = Vec<Target>;
    type QualifiedRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut targets = Vec::new();
        let mut classes: Vec<String> = Vec::new();

        loop {
            let token = match input.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            match token {
                Token::Delim('.') => {
                    let name = input.expect_ident()?.clone();
                    classes.push(name.to_string());
                }
                Token::Comma => {
                    let target = selector_target(&classes, self.scope)
                        .map_err(|message| custom(input, message))?;
                    targets.push(target);
                    classes.clear();
                }
                // Type selectors such as `button` do not change the role.
                Token::Ident(_) => {}
                other => {
                    return Err(custom(input, format!(
                        "unsupported selector token {:?}",
                        other
                    )))
                }
            }
        }

        let target =
            selector_target(&classes, self.scope).map_err(|message| custom(input, message))?;
        targets.push(target);
        Ok(targets)
    }

    fn parse_block<'t>(
        &mut self,
        targets: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut declaration_parser = StyleDeclarationParser;
        let mut declarations = Vec::new();
        for item in RuleBodyParser::new(input, &mut declaration_parser) {
            declarations.push(item.map_err(|(error, _)| error)?);
        }

        for target in &targets {
            if target.scope == Scope::Dark {
                if let Some(name) = declarations.iter().find_map(Declaration::structural_name) {
                    return Err(custom(
                        input,
                        format!(
                            "'{}' is not allowed in dark rule for '{}'; set it in the light rule",
                            name, target.role
                        ),
                    ));
                }
            }
        }

        for target in &targets {
            self.apply(target, &declarations);
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for SheetParser {
    type Prelude = Scope;
    type AtRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if !name.eq_ignore_ascii_case("media") {
            return Err(custom(input, format!("unsupported at-rule '@{}'", name)));
        }

        let mut found = None;
        loop {
            let token = match input.next() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            if let Token::ParenthesisBlock = token {
                let scope = input.parse_nested_block(|input| -> Result<Scope, ParseError<'i, String>> {
                    input.expect_ident_matching("prefers-color-scheme")?;
                    input.expect_colon()?;
                    let value = input.expect_ident()?.clone();
                    match &*value {
                        "dark" => Ok(Scope::Dark),
                        "light" => Ok(Scope::Light),
                        other => Err(custom(input, format!(
                            "unknown color scheme '{}'",
                            other
                        ))),
                    }
                })?;
                found = Some(scope);
            }
        }

        found.ok_or_else(|| {
            custom(input, "only prefers-color-scheme media queries are supported".to_string())
        })
    }

    fn parse_block<'t>(
        &mut self,
        scope: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let outer = std::mem::replace(&mut self.scope, scope);

        let mut outcome = Ok(());
        for result in cssparser::StyleSheetParser::new(input, self) {
            if let Err((error, _)) = result {
                outcome = Err(error);
                break;
            }
        }

        self.scope = outer;
        outcome
    }
}

enum Declaration {
    Attribute(Property, String),
    Composes(Vec<StyleRole>),
    Layer(Layer),
}

impl Declaration {
    /// The declaration name when it describes the role rather than a mode.
    fn structural_name(&self) -> Option<&'static str> {
        match self {
            Declaration::Attribute(..) => None,
            Declaration::Composes(_) => Some("composes"),
            Declaration::Layer(_) => Some("layer"),
        }
    }
}

struct StyleDeclarationParser;

impl<'i> DeclarationParser<'i> for StyleDeclarationParser {
    type Declaration = Declaration;
    type Error = String;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(start).trim();

        if value.is_empty() {
            return Err(custom(input, format!("empty value for '{}'", name)));
        }

        match &*name {
            "composes" | "includes" => Ok(Declaration::Composes(
                value.split_whitespace().map(StyleRole::new).collect(),
            )),
            "layer" => value
                .parse::<Layer>()
                .map(Declaration::Layer)
                .map_err(|err| custom(input, err.to_string())),
            attribute => match Property::from_name(attribute) {
                Some(property) => Ok(Declaration::Attribute(property, value.to_string())),
                None => Err(custom(input, format!("unknown attribute '{}'", attribute))),
            },
        }
    }
}

impl<'i> AtRuleParser<'i> for StyleDeclarationParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = String;
}

impl<'i> QualifiedRuleParser<'i> for StyleDeclarationParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = String;
}

impl<'i> RuleBodyItemParser<'i, Declaration, String> for StyleDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorMode;

    fn find<'a>(entries: &'a [ThemeEntry], role: &str) -> &'a ThemeEntry {
        entries
            .iter()
            .find(|e| e.role().as_str() == role)
            .unwrap_or_else(|| panic!("missing role {role}"))
    }

    #[test]
    fn test_parse_simple() {
        let entries = parse_css(".title-header { font-weight: bold; background: blue-800; }").unwrap();
        assert_eq!(entries.len(), 1);
        let light = entries[0].light();
        assert_eq!(light.get(Property::FontWeight), Some("bold"));
        assert_eq!(light.get(Property::Background), Some("blue-800"));
        assert!(entries[0].dark().is_none());
    }

    #[test]
    fn test_dark_scope_class() {
        let entries = parse_css(
            r#"
            .color-is-selected { background-color: green-500; color: white; }
            .dark .color-is-selected { background-color: green-400; color: slate-200; }
            "#,
        )
        .unwrap();

        let entry = find(&entries, "color-is-selected");
        assert_eq!(entry.light().get(Property::Text), Some("white"));
        assert_eq!(
            entry.attributes(ColorMode::Dark).get(Property::Background),
            Some("green-400")
        );
    }

    #[test]
    fn test_dark_media_query() {
        let entries = parse_css(
            ".text { color: red-500; } @media (prefers-color-scheme: dark) { .text { color: red-300; } }",
        )
        .unwrap();
        let entry = find(&entries, "text");
        assert_eq!(entry.attributes(ColorMode::Light).get(Property::Text), Some("red-500"));
        assert_eq!(entry.attributes(ColorMode::Dark).get(Property::Text), Some("red-300"));
    }

    #[test]
    fn test_light_media_query_is_light_scope() {
        let entries =
            parse_css("@media (prefers-color-scheme: light) { .panel { background: white; } }").unwrap();
        assert_eq!(
            find(&entries, "panel").light().get(Property::Background),
            Some("white")
        );
    }

    #[test]
    fn test_dark_rule_before_light_rule() {
        let entries = parse_css(
            ".dark .badge { background: zinc-700; } .badge { background: zinc-100; }",
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.light().get(Property::Background), Some("zinc-100"));
        assert_eq!(
            entry.dark().and_then(|d| d.get(Property::Background)),
            Some("zinc-700")
        );
    }

    #[test]
    fn test_selector_list() {
        let entries = parse_css(".a, .b { color: blue-500; }").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(find(&entries, "b").light().get(Property::Text), Some("blue-500"));
    }

    #[test]
    fn test_type_selector_ignored() {
        let entries = parse_css("button.primary { cursor: pointer; }").unwrap();
        assert_eq!(entries[0].role().as_str(), "primary");
    }

    #[test]
    fn test_composes_and_layer() {
        let entries = parse_css(
            r#"
            .disabled { layer: disabled; background: gray-300; }
            .progress-bar-fill { composes: color-is-selected rounded; opacity: 90; }
            "#,
        )
        .unwrap();

        assert_eq!(find(&entries, "disabled").layer(), Layer::Disabled);
        let fill = find(&entries, "progress-bar-fill");
        let includes: Vec<&str> = fill.includes().iter().map(StyleRole::as_str).collect();
        assert_eq!(includes, vec!["color-is-selected", "rounded"]);
        assert_eq!(fill.light().get(Property::Opacity), Some("90"));
    }

    #[test]
    fn test_raw_values_preserved() {
        let entries = parse_css(
            ".numeric-overlay { border-style: 1px solid; transform: scale-110 -translate-y-1; } /* comment */",
        )
        .unwrap();
        let light = entries[0].light();
        assert_eq!(light.get(Property::BorderStyle), Some("1px solid"));
        assert_eq!(light.get(Property::Transform), Some("scale-110 -translate-y-1"));
    }

    #[test]
    fn test_later_block_overrides() {
        let entries = parse_css(".x { color: a; padding: 1; } .x { color: b; }").unwrap();
        let light = entries[0].light();
        assert_eq!(light.get(Property::Text), Some("b"));
        assert_eq!(light.get(Property::Padding), Some("1"));
    }

    #[test]
    fn test_structural_declarations_rejected_in_dark_scope() {
        for css in [
            ".base { color: red; } .dark .x { composes: base; }",
            ".dark .x { layer: disabled; }",
            "@media (prefers-color-scheme: dark) { .x { composes: base; } }",
            ".y, .dark .x { layer: state; }",
        ] {
            let err = parse_css(css).unwrap_err();
            assert!(
                matches!(err, ThemeError::Parse { ref message, .. } if message.contains("dark rule for 'x'")),
                "{css}: {err:?}"
            );
        }
    }

    #[test]
    fn test_structural_declarations_allowed_in_light_media_block() {
        let entries =
            parse_css("@media (prefers-color-scheme: light) { .x { layer: state; } }").unwrap();
        assert_eq!(entries[0].layer(), Layer::State);
    }

    #[test]
    fn test_unknown_property_is_an_error() {
        let err = parse_css(".x {\n  animation: spin;\n}").unwrap_err();
        match err {
            ThemeError::Parse { message, .. } => {
                assert!(message.contains("animation"), "{message}");
                assert!(message.starts_with("line 2"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_selector_rejected() {
        let err = parse_css(".color-is-selected.disabled { color: red; }").unwrap_err();
        assert!(matches!(err, ThemeError::Parse { ref message, .. } if message.contains("compound")));
    }

    #[test]
    fn test_unsupported_at_rule_rejected() {
        assert!(parse_css("@font-face { font-family: x; }").is_err());
        assert!(parse_css("@media (max-width: 600px) { .x { color: red; } }").is_err());
    }

    #[test]
    fn test_pseudo_class_rejected() {
        assert!(parse_css(".x:hover { color: red; }").is_err());
    }

    #[test]
    fn test_empty_stylesheet() {
        assert!(parse_css("").unwrap().is_empty());
        assert!(parse_css("/* nothing */").unwrap().is_empty());
    }
}
