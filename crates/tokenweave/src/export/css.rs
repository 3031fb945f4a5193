//! CSS custom property output.
//!
//! One stylesheet holds every theme. Shared tokens (raw colors by default)
//! are emitted once in a plain `:root` block; each theme then gets a block
//! selected by `[data-theme="<name>"]`, with the default theme also selected
//! by `:root`. Theme values keep references visible as `var(--…)` using the
//! one-hop resolution.

use std::fmt::Write as _;

use tokenweave_core::path::TokenPath;
use tokenweave_parser::ResolvedToken;

use super::{Artifact, root_build};
use crate::{config::CssConfig, pipeline::ThemeBuild};

const OUTPUT_PATH: &str = "css/tokens.css";

/// Renders `css/tokens.css`, or nothing if no theme succeeded.
pub fn render(builds: &[ThemeBuild], config: &CssConfig) -> Option<Artifact> {
    root_build(builds)?;
    Some(Artifact::new(OUTPUT_PATH, render_document(builds, config)))
}

/// Renders the stylesheet text.
pub fn render_document(builds: &[ThemeBuild], config: &CssConfig) -> String {
    let strip = config.strip_prefixes();
    let shared = config.shared_prefixes();
    let is_shared =
        |token: &ResolvedToken| shared.iter().any(|prefix| token.path().starts_with(prefix));

    let mut out = String::new();
    let themes: Vec<&str> = builds.iter().map(|build| build.theme().as_str()).collect();
    writeln!(
        out,
        "/**\n * Design tokens generated by tokenweave. Do not edit.\n * Themes: {}\n */",
        themes.join(", ")
    )
    .expect("Writing to String buffer is infallible");

    if let Some(root) = root_build(builds) {
        let shared_tokens: Vec<&ResolvedToken> =
            root.one_hop().iter().filter(|t| is_shared(t)).collect();
        if !shared_tokens.is_empty() {
            out.push('\n');
            write_block(&mut out, ":root", shared_tokens, &strip);
        }
    }

    for build in builds {
        let selector = theme_selector(build, config.selector_attribute());
        let tokens = build.one_hop().iter().filter(|t| !is_shared(t)).collect();
        out.push('\n');
        write_block(&mut out, &selector, tokens, &strip);
    }

    out
}

fn theme_selector(build: &ThemeBuild, attribute: &str) -> String {
    let selector = format!("[{attribute}=\"{}\"]", build.theme());
    if build.theme().is_default() {
        format!(":root,\n{selector}")
    } else {
        selector
    }
}

fn write_block(
    out: &mut String,
    selector: &str,
    tokens: Vec<&ResolvedToken>,
    strip: &[TokenPath],
) {
    writeln!(out, "{selector} {{").expect("Writing to String buffer is infallible");
    for token in tokens {
        writeln!(
            out,
            "  --{}: {};",
            variable_name(token.path(), strip),
            display_value(token, strip)
        )
        .expect("Writing to String buffer is infallible");
    }
    out.push_str("}\n");
}

/// The value shown for a token: `var(--…)` for references, the literal
/// otherwise, or the authored placeholder text when resolution failed.
fn display_value(token: &ResolvedToken, strip: &[TokenPath]) -> String {
    match token.alias() {
        Some(target) => format!("var(--{})", variable_name(target, strip)),
        None => token.output_value().to_string(),
    }
}

/// Builds a custom property name (without the leading `--`).
///
/// The first matching prefix in `strip` is removed, then every segment is
/// converted to kebab-case and joined with `-`.
///
/// # Examples
///
/// ```
/// use tokenweave::export::css::variable_name;
/// use tokenweave_core::path::TokenPath;
///
/// let strip = [TokenPath::parse("color.rawColors")];
/// assert_eq!(variable_name(&TokenPath::parse("color.rawColors.blue.500"), &strip), "blue-500");
/// assert_eq!(
///     variable_name(&TokenPath::parse("fontSize.foundation.base"), &strip),
///     "font-size-foundation-base"
/// );
/// ```
pub fn variable_name(path: &TokenPath, strip: &[TokenPath]) -> String {
    let segments = strip
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix).filter(|rest| !rest.is_empty()))
        .unwrap_or(path.segments());

    segments
        .iter()
        .map(|segment| kebab_case(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn kebab_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (index, &c) in chars.iter().enumerate() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && index > 0 {
                let previous = chars[index - 1];
                let next_is_lower = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
                let boundary = previous.is_ascii_lowercase()
                    || previous.is_ascii_digit()
                    || (previous.is_ascii_uppercase() && next_is_lower);
                if boundary && !out.ends_with('-') {
                    out.push('-');
                }
            }
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use tokenweave_core::theme::Theme;
    use tokenweave_parser::{Token, TokenSet};

    use super::*;

    fn build(theme: Theme, entries: &[(&str, &str)]) -> ThemeBuild {
        let set: TokenSet = entries
            .iter()
            .map(|(path, value)| Token::new(TokenPath::parse(path), *value))
            .collect();
        ThemeBuild::resolve(theme, &set)
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("rawColors"), "raw-colors");
        assert_eq!(kebab_case("500"), "500");
        assert_eq!(kebab_case("primary_hover"), "primary-hover");
        assert_eq!(kebab_case("UIColor"), "ui-color");
        assert_eq!(kebab_case("B"), "b");
    }

    #[test]
    fn test_reference_displays_as_var() {
        let builds = [build(Theme::ClassicLight, &[("A", "{B}"), ("B", "#000000")])];
        let css = render_document(&builds, &CssConfig::default());

        assert!(css.contains("  --a: var(--b);\n"), "{css}");
        assert!(css.contains("  --b: #000000;\n"), "{css}");
    }

    #[test]
    fn test_chained_reference_shows_next_hop() {
        let builds = [build(
            Theme::ClassicLight,
            &[("a", "{b}"), ("b", "{c}"), ("c", "#000000")],
        )];
        let css = render_document(&builds, &CssConfig::default());

        assert!(css.contains("  --a: var(--b);\n"), "{css}");
        assert!(css.contains("  --b: var(--c);\n"), "{css}");
        assert!(css.contains("  --c: #000000;\n"), "{css}");
        assert!(!css.contains("--a: #000000"), "{css}");
    }

    #[test]
    fn test_raw_colors_emitted_once() {
        let entries = [
            ("color.rawColors.blue.500", "#2196F3"),
            ("color.primary", "{color.rawColors.blue.500}"),
        ];
        let builds = [
            build(Theme::ClassicLight, &entries),
            build(Theme::ClassicDark, &entries),
        ];
        let css = render_document(&builds, &CssConfig::default());

        assert_eq!(css.matches("--blue-500: #2196F3;").count(), 1, "{css}");
        assert_eq!(css.matches("--color-primary: var(--blue-500);").count(), 2, "{css}");
    }

    #[test]
    fn test_default_theme_owns_root_selector() {
        let builds = [
            build(Theme::ClassicLight, &[("size.sm", "4px")]),
            build(Theme::AdvanceDark, &[("size.sm", "6px")]),
        ];
        let css = render_document(&builds, &CssConfig::default());

        assert!(
            css.contains(":root,\n[data-theme=\"classic-light\"] {\n  --size-sm: 4px;\n}"),
            "{css}"
        );
        assert!(css.contains("[data-theme=\"advance-dark\"] {\n  --size-sm: 6px;\n}"), "{css}");
        assert!(!css.contains("classic-dark"));
    }

    #[test]
    fn test_blocks_sorted_by_natural_path_order() {
        let builds = [build(
            Theme::ClassicLight,
            &[("size.100", "8px"), ("size.50", "2px"), ("size.200", "16px")],
        )];
        let css = render_document(&builds, &CssConfig::default());

        let positions: Vec<usize> = ["--size-50:", "--size-100:", "--size-200:"]
            .iter()
            .map(|name| css.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{css}");
    }

    #[test]
    fn test_unresolved_keeps_placeholder() {
        let builds = [build(Theme::ClassicLight, &[("color.bg", "{color.missing}")])];
        let css = render_document(&builds, &CssConfig::default());

        assert!(css.contains("--color-bg: {color.missing};"), "{css}");
    }

    #[test]
    fn test_render_without_builds_is_empty() {
        assert!(render(&[], &CssConfig::default()).is_none());
    }
}
