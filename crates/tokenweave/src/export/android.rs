//! Android XML resource output.
//!
//! Colors are theme specific: each successful theme gets its own colors
//! file, with the default theme writing the canonical `colors.xml`. Sizes and
//! typography are shared and taken from the same theme as the CSS root.
//! Tokens outside the known categories, such as component tokens, are routed
//! by their resolved value.

use std::fmt::Write as _;

use log::trace;

use tokenweave_core::{
    category::Category, color::Color, path::TokenPath, theme::Theme, value::TokenValue,
};
use tokenweave_parser::{ResolvedToken, error::Diagnostic, syntax::value_dimension};

use super::{Artifact, Named, escape_xml, root_build, unique_names};
use crate::pipeline::ThemeBuild;

/// A single entry inside `<resources>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Color(String),
    Dimen(String),
    /// A unitless dimension stored as `<item format="float" type="dimen">`.
    FloatDimen(String),
    Integer(String),
    String(String),
}

/// The resource file a token is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFile {
    /// The theme's own `colors.xml` or `colors_<theme>.xml`.
    Colors,
    /// Shared `dimens.xml`.
    Dimens,
    /// Shared `font_dimens.xml`.
    FontDimens,
}

impl ResourceFile {
    const ALL: [ResourceFile; 3] = [
        ResourceFile::Colors,
        ResourceFile::Dimens,
        ResourceFile::FontDimens,
    ];

    /// Path of this file for `theme`, relative to the output directory.
    pub fn path(self, theme: Theme) -> String {
        match self {
            ResourceFile::Colors if theme.is_default() => "android/colors.xml".to_string(),
            ResourceFile::Colors => format!("android/colors_{}.xml", theme.snake_name()),
            ResourceFile::Dimens => "android/dimens.xml".to_string(),
            ResourceFile::FontDimens => "android/font_dimens.xml".to_string(),
        }
    }

    fn subject(self, theme: Theme) -> String {
        match self {
            ResourceFile::Colors => format!("theme {theme}"),
            ResourceFile::Dimens => "dimensions".to_string(),
            ResourceFile::FontDimens => "typography".to_string(),
        }
    }
}

/// Renders every Android resource file for the successful builds.
pub fn render(builds: &[ThemeBuild]) -> Vec<Artifact> {
    let mut artifacts: Vec<Artifact> = builds
        .iter()
        .map(|build| render_file(build, ResourceFile::Colors))
        .collect();

    if let Some(root) = root_build(builds) {
        artifacts.push(render_file(root, ResourceFile::Dimens));
        artifacts.push(render_file(root, ResourceFile::FontDimens));
    }

    artifacts
}

/// Reports every token of `build` left out of an Android file because its
/// resource name is already taken.
///
/// The shared files are checked for every theme, since any successful theme
/// can end up providing them.
pub(crate) fn name_collisions(build: &ThemeBuild) -> Vec<Diagnostic> {
    ResourceFile::ALL
        .into_iter()
        .flat_map(|file| entries(build, file).1)
        .collect()
}

/// Picks the file and resource for a token, or `None` if it has no Android
/// representation.
pub fn classify(token: &ResolvedToken) -> Option<(ResourceFile, Resource)> {
    match token.category() {
        Category::Color => Some((
            ResourceFile::Colors,
            Resource::Color(color_value(token.output_value())),
        )),
        Category::Size | Category::LineHeight => {
            dimension_resource(token).map(|resource| (ResourceFile::Dimens, resource))
        }
        Category::FontSize | Category::FontWeight | Category::FontFamily => {
            dimension_resource(token).map(|resource| (ResourceFile::FontDimens, resource))
        }
        Category::Other => value_resource(token.output_value()),
    }
}

/// Routes a token outside the known categories: colors go to the theme's
/// colors file, pixel and unitless amounts to `dimens.xml`.
fn value_resource(value: &TokenValue) -> Option<(ResourceFile, Resource)> {
    if let Some(color) = value.as_text().and_then(|text| Color::new(text).ok()) {
        return Some((ResourceFile::Colors, Resource::Color(color.to_android_hex())));
    }

    let resource = match value_dimension(value)? {
        d if d.is_px() => Resource::Dimen(d.with_unit("dp").to_string()),
        d if d.is_unitless() => Resource::FloatDimen(d.to_string()),
        _ => return None,
    };
    Some((ResourceFile::Dimens, resource))
}

fn entries(build: &ThemeBuild, file: ResourceFile) -> (Vec<Named<'_, Resource>>, Vec<Diagnostic>) {
    let routed = build
        .full()
        .iter()
        .filter_map(|token| match classify(token) {
            Some((target, resource)) if target == file => Some((token, resource)),
            _ => None,
        });
    unique_names(routed, resource_name, &file.path(build.theme()))
}

fn render_file(build: &ThemeBuild, file: ResourceFile) -> Artifact {
    let (named, _) = entries(build, file);
    Artifact::new(
        file.path(build.theme()),
        document(&file.subject(build.theme()), &named),
    )
}

fn document(subject: &str, resources: &[Named<'_, Resource>]) -> String {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)
        .expect("Writing to String buffer is infallible");
    writeln!(
        out,
        "<!-- Generated by tokenweave ({}). Do not edit. -->",
        subject.replace("--", "- -")
    )
    .expect("Writing to String buffer is infallible");
    out.push_str("<resources>\n");

    for Named { name, token, value } in resources {
        trace!(token = token.path().to_string(), name = name.as_str(); "Android resource");
        let line = match value {
            Resource::Color(value) => {
                format!(r#"<color name="{name}">{}</color>"#, escape_xml(value))
            }
            Resource::Dimen(value) => {
                format!(r#"<dimen name="{name}">{}</dimen>"#, escape_xml(value))
            }
            Resource::FloatDimen(value) => format!(
                r#"<item name="{name}" format="float" type="dimen">{}</item>"#,
                escape_xml(value)
            ),
            Resource::Integer(value) => {
                format!(r#"<integer name="{name}">{}</integer>"#, escape_xml(value))
            }
            Resource::String(value) => format!(
                r#"<string name="{name}">{}</string>"#,
                escape_xml(&escape_android_string(value))
            ),
        };
        writeln!(out, "    {line}").expect("Writing to String buffer is infallible");
    }

    out.push_str("</resources>\n");
    out
}

/// Builds a resource name: segments joined with `_`, lower-cased, with any
/// character other than an ASCII letter or digit replaced by `_`.
///
/// # Examples
///
/// ```
/// use tokenweave::export::android::resource_name;
/// use tokenweave_core::path::TokenPath;
///
/// assert_eq!(
///     resource_name(&TokenPath::parse("color.rawColors.blue-grey.500")),
///     "color_rawcolors_blue_grey_500"
/// );
/// ```
pub fn resource_name(path: &TokenPath) -> String {
    path.segments()
        .join("_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Converts a color literal to `#AARRGGBB`; anything that is not a
/// supported color passes through unchanged.
///
/// # Examples
///
/// ```
/// use tokenweave::export::android::color_value;
/// use tokenweave_core::value::TokenValue;
///
/// assert_eq!(color_value(&TokenValue::from("#2196F3")), "#FF2196F3");
/// assert_eq!(color_value(&TokenValue::from("rgba(33, 150, 243, 0.5)")), "#802196F3");
/// assert_eq!(color_value(&TokenValue::from("currentColor")), "currentColor");
/// ```
pub fn color_value(value: &TokenValue) -> String {
    value
        .as_text()
        .and_then(|text| Color::new(text).ok())
        .map(Color::to_android_hex)
        .unwrap_or_else(|| value.to_string())
}

/// Maps a size or typography token to its resource.
///
/// Returns `None` for categories that have no Android representation.
pub fn dimension_resource(token: &ResolvedToken) -> Option<Resource> {
    let value = token.output_value();
    let dimension = value_dimension(value);

    let resource = match token.category() {
        Category::Size | Category::FontSize => {
            let unit = if token.category() == Category::FontSize {
                "sp"
            } else {
                "dp"
            };
            match dimension {
                Some(d) if d.is_px() || d.is_unitless() => {
                    Resource::Dimen(d.with_unit(unit).to_string())
                }
                _ => Resource::Dimen(value.to_string()),
            }
        }
        Category::LineHeight => match dimension {
            Some(d) if d.is_unitless() => Resource::FloatDimen(d.to_string()),
            Some(d) if d.is_px() => Resource::Dimen(d.with_unit("dp").to_string()),
            _ => Resource::Dimen(value.to_string()),
        },
        Category::FontWeight => match dimension {
            Some(d) if d.is_unitless() && d.amount().fract() == 0.0 => {
                Resource::Integer(d.to_string())
            }
            _ => Resource::String(value.to_string()),
        },
        Category::FontFamily => Resource::String(value.to_string()),
        Category::Color | Category::Other => return None,
    };

    Some(resource)
}

fn escape_android_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '@' if escaped.is_empty() => escaped.push_str("\\@"),
            '?' if escaped.is_empty() => escaped.push_str("\\?"),
            _ => escaped.push(c),
        }
    }
    escaped
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn alpha_strategy() -> impl Strategy<Value = f64> {
        (0u32..=1000).prop_map(|milli| f64::from(milli) / 1000.0)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Converting the same color twice gives the same `#AARRGGBB` string.
    fn check_color_value_is_deterministic(
        r: u8,
        g: u8,
        b: u8,
        alpha: f64,
    ) -> Result<(), TestCaseError> {
        let value = TokenValue::from(format!("rgba({r}, {g}, {b}, {alpha})"));
        let first = color_value(&value);
        let second = color_value(&value);

        let channels = format!("{r:02X}{g:02X}{b:02X}");

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 9, "unexpected output {}", first);
        prop_assert!(first.ends_with(&channels));
        Ok(())
    }

    /// Six-digit hex colors keep their channels and become fully opaque.
    fn check_hex_gains_opaque_alpha(r: u8, g: u8, b: u8) -> Result<(), TestCaseError> {
        let value = TokenValue::from(format!("#{r:02x}{g:02x}{b:02x}"));
        prop_assert_eq!(color_value(&value), format!("#FF{r:02X}{g:02X}{b:02X}"));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn color_value_is_deterministic(r: u8, g: u8, b: u8, alpha in alpha_strategy()) {
            check_color_value_is_deterministic(r, g, b, alpha)?;
        }

        #[test]
        fn hex_gains_opaque_alpha(r: u8, g: u8, b: u8) {
            check_hex_gains_opaque_alpha(r, g, b)?;
        }
    }
}
