//! Platform formatters and output writing.
//!
//! Each formatter is a pure function from the successful theme builds to a
//! list of [`Artifact`]s. Nothing here touches the file system except
//! [`write_atomic`] and [`remove_stale`], which the pipeline calls once
//! rendering has succeeded.

pub mod android;
pub mod css;
pub mod ios;
pub mod json;

use std::{
    collections::HashMap,
    fmt,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use tokenweave_core::{path::TokenPath, theme::Theme};
use tokenweave_parser::{
    ResolvedToken,
    error::{Diagnostic, ErrorCode},
};

use crate::{config::AppConfig, pipeline::ThemeBuild};

/// Errors raised while rendering or writing artifacts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove `{path}`: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize JSON output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Css,
    Android,
    Ios,
    Json,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Css,
        Platform::Android,
        Platform::Ios,
        Platform::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Css => "css",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Json => "json",
        }
    }

    /// Renders this platform's artifacts for the given builds.
    ///
    /// `builds` holds only successful themes, in build order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the JSON document cannot be produced.
    pub fn render(
        self,
        builds: &[ThemeBuild],
        config: &AppConfig,
    ) -> Result<Vec<Artifact>, Error> {
        let artifacts = match self {
            Platform::Css => css::render(builds, config.css()).into_iter().collect(),
            Platform::Android => android::render(builds),
            Platform::Ios => ios::render(builds, config.ios()),
            Platform::Json => json::render(builds)?.into_iter().collect(),
        };
        debug!(platform = self.as_str(), artifacts = artifacts.len(); "Rendered platform");
        Ok(artifacts)
    }

    /// Reports tokens of `build` that this platform drops because their
    /// generated identifier repeats an earlier token's.
    pub fn name_collisions(self, build: &ThemeBuild) -> Vec<Diagnostic> {
        match self {
            Platform::Android => android::name_collisions(build),
            Platform::Ios => ios::name_collisions(build),
            Platform::Css | Platform::Json => Vec::new(),
        }
    }

    /// Paths of the files this platform writes for `theme` alone, relative
    /// to the output directory.
    ///
    /// Shared files such as `css/tokens.css` are not included.
    pub fn theme_paths(self, theme: Theme, config: &AppConfig) -> Vec<PathBuf> {
        match self {
            Platform::Android => vec![android::ResourceFile::Colors.path(theme).into()],
            Platform::Ios => vec![ios::file_path(theme, config.ios()).into()],
            Platform::Css | Platform::Json => Vec::new(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    contents: String,
}

impl Artifact {
    /// Creates an artifact at `path`, relative to the output directory.
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    /// Path relative to the output directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Returns the build whose shared tokens are emitted once: the default
/// theme if it succeeded, otherwise the first successful theme.
pub(crate) fn root_build(builds: &[ThemeBuild]) -> Option<&ThemeBuild> {
    builds
        .iter()
        .find(|build| build.theme().is_default())
        .or_else(|| builds.first())
}

/// A token that keeps its generated identifier, with its rendered value.
pub(crate) struct Named<'a, T> {
    pub name: String,
    pub token: &'a ResolvedToken,
    pub value: T,
}

/// Names every entry with `name`, keeping the first token for each name.
///
/// Later tokens that repeat a name are dropped and returned as `E300`
/// diagnostics mentioning `target`, the file being generated.
pub(crate) fn unique_names<'a, T>(
    entries: impl IntoIterator<Item = (&'a ResolvedToken, T)>,
    name: impl Fn(&TokenPath) -> String,
    target: &str,
) -> (Vec<Named<'a, T>>, Vec<Diagnostic>) {
    let mut seen: HashMap<String, &'a TokenPath> = HashMap::new();
    let mut named = Vec::new();
    let mut collisions = Vec::new();

    for (token, value) in entries {
        let generated = name(token.path());
        if let Some(first) = seen.get(&generated) {
            let diagnostic = Diagnostic::error(format!(
                "`{}` and `{first}` both become `{generated}` in {target}",
                token.path()
            ))
            .with_code(ErrorCode::E300)
            .with_token(token.path().clone())
            .with_help("rename one of the tokens; the later one is left out");
            collisions.push(match token.token().source() {
                Some(source) => diagnostic.with_source(source),
                None => diagnostic,
            });
            continue;
        }
        seen.insert(generated.clone(), token.path());
        named.push(Named {
            name: generated,
            token,
            value,
        });
    }

    (named, collisions)
}

/// Writes `artifact` under `output_dir` without ever leaving a partial file.
///
/// The contents go to a temporary file in the destination directory which is
/// then renamed over the target.
///
/// # Errors
///
/// Returns [`Error::Write`] if the directory cannot be created or the file
/// cannot be written or persisted.
pub fn write_atomic(output_dir: &Path, artifact: &Artifact) -> Result<PathBuf, Error> {
    let target = output_dir.join(artifact.path());
    let write_error = |source: io::Error| Error::Write {
        path: target.clone(),
        source,
    };

    let parent = target.parent().unwrap_or(output_dir);
    std::fs::create_dir_all(parent).map_err(write_error)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(artifact.contents().as_bytes())
        .map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(&target)
        .map_err(|err| write_error(err.error))?;

    debug!(path = target.display().to_string(); "Wrote output file");
    Ok(target)
}

/// Removes a previously generated file under `output_dir`.
///
/// Returns the removed path, or `None` if there was no such file.
///
/// # Errors
///
/// Returns [`Error::Remove`] if the file exists but cannot be removed.
pub fn remove_stale(output_dir: &Path, relative: &Path) -> Result<Option<PathBuf>, Error> {
    let target = output_dir.join(relative);
    match std::fs::remove_file(&target) {
        Ok(()) => Ok(Some(target)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Remove {
            path: target,
            source,
        }),
    }
}

/// Escapes text for XML element content.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
