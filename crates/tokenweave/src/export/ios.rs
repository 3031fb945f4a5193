//! iOS Swift output.
//!
//! Each successful theme becomes one file containing a `public struct` of
//! `public static let` constants. The default theme uses the configured type
//! name, other themes append their PascalCase name
//! (`DesignTokensClassicDark`).

use std::fmt::Write as _;

use tokenweave_core::{color::Color, path::TokenPath, theme::Theme, value::TokenValue};
use tokenweave_parser::{error::Diagnostic, syntax::value_dimension};

use super::{Artifact, Named, unique_names};
use crate::{config::IosConfig, pipeline::ThemeBuild};

/// A Swift constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum SwiftValue {
    /// Normalized `[red, green, blue, alpha]` components.
    Color([f64; 4]),
    Float(f64),
    String(String),
}

impl SwiftValue {
    /// Picks the Swift representation of a resolved value.
    ///
    /// Supported colors become `UIColor`, pixel and unitless numbers become
    /// `CGFloat`, and everything else is kept as a string.
    pub fn from_value(value: &TokenValue) -> Self {
        if let Some(color) = value.as_text().and_then(|text| Color::new(text).ok()) {
            return SwiftValue::Color(color.to_unit_components());
        }
        match value_dimension(value) {
            Some(d) if d.is_px() || d.is_unitless() => SwiftValue::Float(d.amount()),
            _ => SwiftValue::String(value.to_string()),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            SwiftValue::Color(_) => "UIColor",
            SwiftValue::Float(_) => "CGFloat",
            SwiftValue::String(_) => "String",
        }
    }

    fn literal(&self) -> String {
        match self {
            SwiftValue::Color([red, green, blue, alpha]) => format!(
                "UIColor(red: {}, green: {}, blue: {}, alpha: {})",
                float_literal(*red),
                float_literal(*green),
                float_literal(*blue),
                float_literal(*alpha)
            ),
            SwiftValue::Float(amount) => float_literal(*amount),
            SwiftValue::String(text) => format!("\"{}\"", escape_swift_string(text)),
        }
    }
}

/// Renders one Swift file per successful build.
pub fn render(builds: &[ThemeBuild], config: &IosConfig) -> Vec<Artifact> {
    builds
        .iter()
        .map(|build| {
            let type_name = struct_name(build.theme(), config);
            Artifact::new(file_path(build.theme(), config), render_struct(&type_name, build))
        })
        .collect()
}

/// Path of the Swift file for `theme`, relative to the output directory.
pub fn file_path(theme: Theme, config: &IosConfig) -> String {
    format!("ios/{}.swift", struct_name(theme, config))
}

fn struct_name(theme: Theme, config: &IosConfig) -> String {
    if theme.is_default() {
        config.type_name().to_string()
    } else {
        format!("{}{}", config.type_name(), theme.pascal_name())
    }
}

/// Reports every token of `build` left out of its struct because its
/// property name is already taken.
pub(crate) fn name_collisions(build: &ThemeBuild) -> Vec<Diagnostic> {
    constants(build).1
}

fn constants(build: &ThemeBuild) -> (Vec<Named<'_, SwiftValue>>, Vec<Diagnostic>) {
    let entries = build
        .full()
        .iter()
        .map(|token| (token, SwiftValue::from_value(token.output_value())));
    let target = format!("the Swift struct for theme {}", build.theme());
    unique_names(entries, property_name, &target)
}

/// Renders the Swift source for one theme.
///
/// A token whose property name repeats an earlier one is left out.
pub fn render_struct(type_name: &str, build: &ThemeBuild) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated by tokenweave for theme {}. Do not edit.", build.theme())
        .expect("Writing to String buffer is infallible");
    out.push('\n');
    out.push_str("import UIKit\n\n");
    writeln!(out, "public struct {type_name} {{").expect("Writing to String buffer is infallible");

    let (named, _) = constants(build);
    for (index, constant) in named.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_constant(&mut out, constant);
    }

    out.push_str("}\n");
    out
}

fn write_constant(out: &mut String, constant: &Named<'_, SwiftValue>) {
    if let Some(description) = constant.token.token().description() {
        for line in description.lines() {
            writeln!(out, "    /// {}", line.trim_end())
                .expect("Writing to String buffer is infallible");
        }
    }
    writeln!(
        out,
        "    public static let {}: {} = {}",
        constant.name,
        constant.value.type_name(),
        constant.value.literal()
    )
    .expect("Writing to String buffer is infallible");
}

/// Builds a lower camel case Swift identifier from a token path.
///
/// # Examples
///
/// ```
/// use tokenweave::export::ios::property_name;
/// use tokenweave_core::path::TokenPath;
///
/// assert_eq!(
///     property_name(&TokenPath::parse("color.rawColors.blue.500")),
///     "colorRawColorsBlue500"
/// );
/// assert_eq!(property_name(&TokenPath::parse("2xl.size")), "_2xlSize");
/// ```
pub fn property_name(path: &TokenPath) -> String {
    let mut name = String::new();

    let words = path
        .segments()
        .iter()
        .flat_map(|segment| segment.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|word| !word.is_empty());

    for (index, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                name.push(first.to_ascii_lowercase());
            } else {
                name.push(first.to_ascii_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) || name.is_empty() {
        name.insert(0, '_');
    }
    name
}

/// Formats a number so Swift reads it as a floating point literal.
fn float_literal(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn escape_swift_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
