//! Theme orchestration.
//!
//! [`Pipeline::build`] loads, flattens and resolves each theme independently.
//! A theme that fails to load (or, in strict mode, has any diagnostic) becomes
//! a [`ThemeFailure`]; the other themes still build. [`Pipeline::write_outputs`]
//! renders the enabled platforms from the successful themes and writes every
//! file atomically, removing files left behind by themes that failed.

use std::path::PathBuf;

use log::{error, info, warn};

use tokenweave_core::theme::Theme;
use tokenweave_parser::{
    Depth, ResolvedSet, Resolver, TokenSet,
    error::{Diagnostic, ParseError},
};

use crate::{
    TokenweaveError,
    config::AppConfig,
    export::{self, Artifact, Platform},
};

/// A successfully built theme.
#[derive(Debug, Clone)]
pub struct ThemeBuild {
    theme: Theme,
    full: ResolvedSet,
    one_hop: ResolvedSet,
    sources: Vec<PathBuf>,
    warnings: Vec<Diagnostic>,
    collisions: Vec<Diagnostic>,
}

impl ThemeBuild {
    /// Resolves `set` at both depths.
    pub fn resolve(theme: Theme, set: &TokenSet) -> Self {
        let resolver = Resolver::new(set);
        Self {
            theme,
            full: resolver.resolve_all(Depth::Full),
            one_hop: resolver.resolve_all(Depth::OneHop),
            sources: Vec::new(),
            warnings: Vec::new(),
            collisions: Vec::new(),
        }
    }

    fn with_load_info(mut self, sources: Vec<PathBuf>, warnings: Vec<Diagnostic>) -> Self {
        self.sources = sources;
        self.warnings = warnings;
        self
    }

    fn with_collisions(mut self, collisions: Vec<Diagnostic>) -> Self {
        self.collisions = collisions;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Tokens resolved to their final literals.
    pub fn full(&self) -> &ResolvedSet {
        &self.full
    }

    /// Tokens resolved one hop, keeping references as aliases.
    pub fn one_hop(&self) -> &ResolvedSet {
        &self.one_hop
    }

    /// Files that contributed tokens, in merge order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Loader warnings, then one error per unresolvable token, then one
    /// error per token left out of an output by a name collision.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.warnings.clone();
        diagnostics.extend(self.full.diagnostics());
        diagnostics.extend(self.collisions.iter().cloned());
        diagnostics
    }

    /// Returns `true` if any token was degraded, skipped or left out.
    pub fn has_errors(&self) -> bool {
        self.full.has_errors() || !self.collisions.is_empty()
    }
}

/// A theme that produced no output.
#[derive(Debug)]
pub struct ThemeFailure {
    theme: Theme,
    error: TokenweaveError,
}

impl ThemeFailure {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn error(&self) -> &TokenweaveError {
        &self.error
    }
}

/// Overall outcome of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// Every theme built without token errors.
    Success,
    /// Some themes failed or some tokens could not be resolved.
    Partial,
    /// No theme built.
    Failed,
}

/// Per-theme outcomes of [`Pipeline::build`].
#[derive(Debug, Default)]
pub struct BuildReport {
    builds: Vec<ThemeBuild>,
    failures: Vec<ThemeFailure>,
}

impl BuildReport {
    /// Successful themes in build order.
    pub fn builds(&self) -> &[ThemeBuild] {
        &self.builds
    }

    pub fn failures(&self) -> &[ThemeFailure] {
        &self.failures
    }

    pub fn build_for(&self, theme: Theme) -> Option<&ThemeBuild> {
        self.builds.iter().find(|build| build.theme() == theme)
    }

    pub fn failure_for(&self, theme: Theme) -> Option<&ThemeFailure> {
        self.failures.iter().find(|failure| failure.theme() == theme)
    }

    pub fn succeeded(&self) -> Vec<Theme> {
        self.builds.iter().map(ThemeBuild::theme).collect()
    }

    pub fn failed(&self) -> Vec<Theme> {
        self.failures.iter().map(ThemeFailure::theme).collect()
    }

    pub fn status(&self) -> BuildStatus {
        if self.builds.is_empty() {
            BuildStatus::Failed
        } else if !self.failures.is_empty() || self.builds.iter().any(ThemeBuild::has_errors) {
            BuildStatus::Partial
        } else {
            BuildStatus::Success
        }
    }
}

/// Builds every theme and writes the enabled platform outputs.
///
/// # Examples
///
/// ```rust,no_run
/// use tokenweave::{Pipeline, config::AppConfig};
///
/// let pipeline = Pipeline::new(AppConfig::default());
/// let report = pipeline.build();
/// let written = pipeline.write_outputs(&report).expect("Failed to write outputs");
/// println!("{} files written, status {:?}", written.len(), report.status());
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds all four themes in order.
    pub fn build(&self) -> BuildReport {
        let mut report = BuildReport::default();

        for theme in Theme::ALL {
            match self.build_theme(theme) {
                Ok(build) => {
                    info!(
                        theme = theme.as_str(),
                        sources = build.sources().len(),
                        tokens = build.full().len(),
                        failed = build.full().failed().len(),
                        collisions = build.collisions.len();
                        "Theme built"
                    );
                    report.builds.push(build);
                }
                Err(err) => {
                    error!(theme = theme.as_str(), error = err.to_string(); "Theme failed");
                    report.failures.push(ThemeFailure { theme, error: err });
                }
            }
        }

        info!(
            succeeded = report.builds.len(),
            failed = report.failures.len(),
            status:? = report.status();
            "Build finished"
        );
        report
    }

    /// Builds a single theme.
    ///
    /// # Errors
    ///
    /// Returns [`TokenweaveError::Parse`] if the theme's sources cannot be
    /// loaded, or if strict mode is on and the theme has any warning or
    /// token error.
    pub fn build_theme(&self, theme: Theme) -> Result<ThemeBuild, TokenweaveError> {
        let input = self.config.input();
        let tokens = tokenweave_parser::parse(input.directory(), &input.source_specs(), theme)
            .map_err(|err| TokenweaveError::new_parse_error(theme, err))?;

        for warning in tokens.warnings() {
            warn!(theme = theme.as_str(), warning = warning.to_string(); "Token source warning");
        }

        let build = ThemeBuild::resolve(theme, tokens.set())
            .with_load_info(tokens.files().to_vec(), tokens.warnings().to_vec());
        let collisions = Platform::ALL
            .into_iter()
            .filter(|platform| self.config.output().is_enabled(*platform))
            .flat_map(|platform| platform.name_collisions(&build))
            .collect();
        let build = build.with_collisions(collisions);

        if self.config.build().strict() && (build.has_errors() || !build.warnings.is_empty()) {
            return Err(TokenweaveError::new_parse_error(
                theme,
                ParseError::new(build.diagnostics()),
            ));
        }

        Ok(build)
    }

    /// Renders every enabled platform for the successful themes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenweaveError::Export`] if a formatter fails.
    pub fn render(&self, report: &BuildReport) -> Result<Vec<Artifact>, TokenweaveError> {
        let mut artifacts = Vec::new();
        for platform in self.config.output().platforms() {
            artifacts.extend(platform.render(report.builds(), &self.config)?);
        }
        Ok(artifacts)
    }

    /// Renders and writes all outputs, returning the written paths.
    ///
    /// Nothing is written when no theme succeeded. Theme specific files of
    /// failed themes (their Android colors file and Swift struct) are
    /// removed so a previous run's output is not mistaken for current.
    ///
    /// # Errors
    ///
    /// Returns [`TokenweaveError::Export`] if rendering, writing or removing
    /// a file fails.
    pub fn write_outputs(&self, report: &BuildReport) -> Result<Vec<PathBuf>, TokenweaveError> {
        let output_dir = self.config.output().directory();
        let artifacts = self.render(report)?;

        let written = artifacts
            .iter()
            .map(|artifact| export::write_atomic(output_dir, artifact))
            .collect::<Result<Vec<_>, _>>()?;

        for theme in report.failed() {
            for platform in self.config.output().platforms() {
                for path in platform.theme_paths(theme, &self.config) {
                    if let Some(removed) = export::remove_stale(output_dir, &path)? {
                        warn!(
                            theme = theme.as_str(),
                            path = removed.display().to_string();
                            "Removed output of failed theme"
                        );
                    }
                }
            }
        }

        info!(
            files = written.len(),
            directory = output_dir.display().to_string();
            "Outputs written"
        );
        Ok(written)
    }

    /// Builds all themes and writes their outputs.
    ///
    /// # Errors
    ///
    /// Returns [`TokenweaveError`] if the configuration is invalid or the
    /// outputs cannot be written. Theme failures are reported in the
    /// returned [`BuildReport`] instead.
    pub fn run(&self) -> Result<BuildReport, TokenweaveError> {
        self.config.validate()?;
        let report = self.build();
        self.write_outputs(&report)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use tokenweave_core::path::TokenPath;
    use tokenweave_parser::{Token, error::ErrorCode};

    use super::*;

    fn build(theme: Theme, entries: &[(&str, &str)]) -> ThemeBuild {
        let set: TokenSet = entries
            .iter()
            .map(|(path, value)| Token::new(TokenPath::parse(path), *value))
            .collect();
        ThemeBuild::resolve(theme, &set)
    }

    fn failure(theme: Theme) -> ThemeFailure {
        ThemeFailure {
            theme,
            error: TokenweaveError::Config("boom".to_string()),
        }
    }

    #[test]
    fn test_status_success() {
        let report = BuildReport {
            builds: vec![build(Theme::ClassicLight, &[("size.sm", "4px")])],
            failures: Vec::new(),
        };
        assert_eq!(report.status(), BuildStatus::Success);
    }

    #[test]
    fn test_status_partial_on_failed_theme() {
        let report = BuildReport {
            builds: vec![build(Theme::ClassicLight, &[("size.sm", "4px")])],
            failures: vec![failure(Theme::ClassicDark)],
        };
        assert_eq!(report.status(), BuildStatus::Partial);
        assert_eq!(report.failed(), [Theme::ClassicDark]);
    }

    #[test]
    fn test_status_partial_on_token_errors() {
        let report = BuildReport {
            builds: vec![build(Theme::ClassicLight, &[("color.a", "{color.b}")])],
            failures: Vec::new(),
        };
        assert_eq!(report.status(), BuildStatus::Partial);

        let diagnostics = report.builds()[0].diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_status_partial_on_name_collision() {
        let build = build(
            Theme::ClassicLight,
            &[("color.primary-hover", "#000000"), ("color.primary_hover", "#FFFFFF")],
        );
        assert!(!build.has_errors());

        let collisions = Platform::Android.name_collisions(&build);
        let report = BuildReport {
            builds: vec![build.with_collisions(collisions)],
            failures: Vec::new(),
        };
        assert_eq!(report.status(), BuildStatus::Partial);

        let diagnostics = report.builds()[0].diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_status_failed_without_builds() {
        let report = BuildReport {
            builds: Vec::new(),
            failures: Theme::ALL.into_iter().map(failure).collect(),
        };
        assert_eq!(report.status(), BuildStatus::Failed);
    }

    #[test]
    fn test_render_without_builds_is_empty() {
        let pipeline = Pipeline::default();
        let artifacts = pipeline.render(&BuildReport::default()).unwrap();
        assert!(artifacts.is_empty());
    }
}
