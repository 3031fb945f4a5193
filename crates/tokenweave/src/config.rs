//! Configuration types for tokenweave builds.
//!
//! This module provides the configuration structures that control where
//! tokens are read from, which platforms are generated, and how each
//! formatter names and groups its output. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file, and every
//! section falls back to defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`InputConfig`] - Input directory and the ordered list of token sources.
//! - [`OutputConfig`] - Output directory and enabled [`Platform`]s.
//! - [`CssConfig`] - Selector attribute and prefix handling for CSS.
//! - [`IosConfig`] - Swift type naming.
//! - [`BuildConfig`] - Strict mode.
//!
//! # Example
//!
//! ```
//! # use tokenweave::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.input().directory().to_str(), Some("tokens"));
//! assert_eq!(config.input().sources().len(), 3);
//! assert!(!config.build().strict());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use tokenweave_core::path::TokenPath;
use tokenweave_parser::SourceSpec;

use crate::{TokenweaveError, export::Platform};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Input configuration section.
    #[serde(default)]
    input: InputConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// CSS formatter section.
    #[serde(default)]
    css: CssConfig,

    /// iOS formatter section.
    #[serde(default)]
    ios: IosConfig,

    /// Build behavior section.
    #[serde(default)]
    build: BuildConfig,
}

impl AppConfig {
    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn css(&self) -> &CssConfig {
        &self.css
    }

    pub fn ios(&self) -> &IosConfig {
        &self.ios
    }

    pub fn build(&self) -> &BuildConfig {
        &self.build
    }

    /// Overrides the input directory.
    pub fn with_input_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.input.directory = directory.into();
        self
    }

    /// Overrides the output directory.
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Overrides the enabled platforms.
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.output.platforms = platforms;
        self
    }

    /// Overrides the token sources.
    pub fn with_sources(mut self, sources: Vec<SourceConfig>) -> Self {
        self.input.sources = sources;
        self
    }

    /// Overrides strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.build.strict = strict;
        self
    }

    /// Checks values that deserialize fine but cannot produce a build.
    ///
    /// # Errors
    ///
    /// Returns [`TokenweaveError::Config`] when no sources are configured or
    /// the Swift type name is not a valid identifier.
    pub fn validate(&self) -> Result<(), TokenweaveError> {
        if self.input.sources.is_empty() {
            return Err(TokenweaveError::Config(
                "at least one entry in `input.sources` is required".to_string(),
            ));
        }

        if let Some(source) = self.input.sources.iter().find(|s| s.pattern.trim().is_empty()) {
            return Err(TokenweaveError::Config(format!(
                "source pattern must not be empty (prefix: {:?})",
                source.prefix
            )));
        }

        let type_name = self.ios.type_name();
        let valid_identifier = type_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && type_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_identifier {
            return Err(TokenweaveError::Config(format!(
                "`ios.type_name` must be a Swift identifier, got `{type_name}`"
            )));
        }

        Ok(())
    }
}

/// Where tokens are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Directory that source patterns are relative to.
    directory: PathBuf,

    /// Ordered source list; later sources override earlier ones.
    sources: Vec<SourceConfig>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("tokens"),
            sources: vec![
                SourceConfig::new("core/**/*.json", false),
                SourceConfig::new("themes/{theme}.json", true),
                SourceConfig::new("components/**/*.json", false),
            ],
        }
    }
}

impl InputConfig {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Returns the sources as loader specs.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.sources.iter().map(SourceConfig::to_spec).collect()
    }
}

/// One `[[input.sources]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// File path or glob, may contain `{theme}`, `{family}` and `{mode}`.
    pattern: String,

    #[serde(default)]
    required: bool,

    /// Dotted path the file content is mounted under.
    #[serde(default)]
    prefix: Option<String>,
}

impl SourceConfig {
    pub fn new(pattern: impl Into<String>, required: bool) -> Self {
        Self {
            pattern: pattern.into(),
            required,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn to_spec(&self) -> SourceSpec {
        let spec = if self.required {
            SourceSpec::required(self.pattern.as_str())
        } else {
            SourceSpec::optional(self.pattern.as_str())
        };
        match &self.prefix {
            Some(prefix) => spec.with_prefix(TokenPath::parse(prefix)),
            None => spec,
        }
    }
}

/// Where outputs go and which platforms are generated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    directory: PathBuf,
    platforms: Vec<Platform>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("build"),
            platforms: Platform::ALL.to_vec(),
        }
    }
}

impl OutputConfig {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Returns `true` if `platform` is enabled.
    pub fn is_enabled(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// CSS formatter options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CssConfig {
    /// Attribute used in theme selectors, e.g. `[data-theme="classic-dark"]`.
    selector_attribute: String,

    /// Prefixes removed from token paths before building variable names.
    strip_prefixes: Vec<String>,

    /// Prefixes of tokens emitted once in the shared `:root` block.
    shared_prefixes: Vec<String>,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            selector_attribute: "data-theme".to_string(),
            strip_prefixes: vec!["color.rawColors".to_string()],
            shared_prefixes: vec!["color.rawColors".to_string()],
        }
    }
}

impl CssConfig {
    pub fn selector_attribute(&self) -> &str {
        &self.selector_attribute
    }

    pub fn strip_prefixes(&self) -> Vec<TokenPath> {
        parse_prefixes(&self.strip_prefixes)
    }

    pub fn shared_prefixes(&self) -> Vec<TokenPath> {
        parse_prefixes(&self.shared_prefixes)
    }
}

fn parse_prefixes(prefixes: &[String]) -> Vec<TokenPath> {
    prefixes
        .iter()
        .map(|prefix| TokenPath::parse(prefix))
        .filter(|prefix| !prefix.is_empty())
        .collect()
}

/// iOS formatter options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IosConfig {
    /// Name of the default theme's struct; other themes append their name.
    type_name: String,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            type_name: "DesignTokens".to_string(),
        }
    }
}

impl IosConfig {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Build behavior.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Fail a theme on token errors instead of emitting degraded values.
    strict: bool,
}

impl BuildConfig {
    pub fn strict(&self) -> bool {
        self.strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = AppConfig::default();
        let specs = config.input().source_specs();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1].pattern(), "themes/{theme}.json");
        assert!(specs[1].is_required());
        assert!(!specs[0].is_required());
    }

    #[test]
    fn test_default_css() {
        let css = CssConfig::default();
        assert_eq!(css.selector_attribute(), "data-theme");
        assert_eq!(css.strip_prefixes(), vec![TokenPath::parse("color.rawColors")]);
    }

    #[test]
    fn test_source_prefix_becomes_mount_point() {
        let source = SourceConfig::new("raw/colors.json", true).with_prefix("color.rawColors");
        let spec = source.to_spec();
        assert_eq!(spec.prefix(), Some(&TokenPath::parse("color.rawColors")));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_input_directory("in")
            .with_output_directory("out")
            .with_platforms(vec![Platform::Css])
            .with_strict(true);

        assert_eq!(config.input().directory(), Path::new("in"));
        assert_eq!(config.output().directory(), Path::new("out"));
        assert!(config.output().is_enabled(Platform::Css));
        assert!(!config.output().is_enabled(Platform::Ios));
        assert!(config.build().strict());
    }

    #[test]
    fn test_validate_rejects_empty_sources() {
        let config = AppConfig::default().with_sources(Vec::new());
        assert!(matches!(config.validate(), Err(TokenweaveError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
