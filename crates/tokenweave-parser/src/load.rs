//! Source loading and merging.
//!
//! A theme's token set is assembled from an ordered list of [`SourceSpec`]s.
//! Each source names a file or glob pattern relative to the input directory and
//! may contain the placeholders `{theme}`, `{family}` and `{mode}`, which are
//! rewritten for the theme being built. Matched files are parsed, optionally
//! mounted under a path prefix, and deep-merged in order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde_json::Value;

use tokenweave_core::{path::TokenPath, theme::Theme};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    node::Node,
};

/// One entry in the ordered list of token sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pattern: String,
    prefix: Option<TokenPath>,
    required: bool,
}

impl SourceSpec {
    /// A source that must match at least one file.
    pub fn required(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            prefix: None,
            required: true,
        }
    }

    /// A source that is treated as empty when nothing matches.
    pub fn optional(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            prefix: None,
            required: false,
        }
    }

    /// Mounts the content of matched files under `prefix`.
    pub fn with_prefix(mut self, prefix: TokenPath) -> Self {
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn prefix(&self) -> Option<&TokenPath> {
        self.prefix.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Rewrites theme placeholders in the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenweave_core::theme::Theme;
    /// use tokenweave_parser::SourceSpec;
    ///
    /// let spec = SourceSpec::required("themes/{family}/{mode}.json");
    /// assert_eq!(spec.pattern_for(Theme::AdvanceDark), "themes/advance/dark.json");
    /// ```
    pub fn pattern_for(&self, theme: Theme) -> String {
        self.pattern
            .replace("{theme}", theme.as_str())
            .replace("{family}", theme.family().as_str())
            .replace("{mode}", theme.mode().as_str())
    }
}

/// The merged tree for one theme plus everything learned while loading it.
#[derive(Debug)]
pub struct Loaded {
    tree: Node,
    files: Vec<PathBuf>,
    warnings: Vec<Diagnostic>,
}

impl Loaded {
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Files that contributed to the tree, in merge order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Non-fatal diagnostics such as skipped malformed nodes.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Node, Vec<PathBuf>, Vec<Diagnostic>) {
        (self.tree, self.files, self.warnings)
    }
}

/// Loads and merges every source for `theme`.
///
/// # Errors
///
/// Returns [`ParseError`] listing every fatal problem: required sources that
/// matched nothing, unreadable files, invalid JSON, invalid patterns, and
/// files whose root is not an object. Malformed token nodes are warnings.
pub fn load(input_dir: &Path, sources: &[SourceSpec], theme: Theme) -> Result<Loaded, ParseError> {
    info!(theme = theme.as_str(), sources = sources.len(); "Loading token sources");

    let mut collector = DiagnosticCollector::new();
    let mut tree = Node::empty();
    let mut files = Vec::new();

    for spec in sources {
        let pattern = spec.pattern_for(theme);
        let matched = match match_files(input_dir, &pattern) {
            Ok(matched) => matched,
            Err(diagnostic) => {
                collector.emit(diagnostic);
                continue;
            }
        };

        if matched.is_empty() {
            if spec.is_required() {
                collector.emit(
                    Diagnostic::error(format!(
                        "required source `{pattern}` not found for theme `{theme}`"
                    ))
                    .with_code(ErrorCode::E001)
                    .with_source(input_dir.join(&pattern))
                    .with_help("create the file or mark the source as optional"),
                );
            } else {
                debug!(pattern = pattern.as_str(); "Optional source matched no files");
            }
            continue;
        }

        for file in matched {
            let Some(node) = read_source(&file, &mut collector) else {
                continue;
            };
            let node = match spec.prefix() {
                Some(prefix) => node.mount(prefix),
                None => node,
            };
            debug!(file:? = file; "Merging token source");
            tree = tree.merge(node, &TokenPath::default());
            files.push(file);
        }
    }

    let warnings = collector.finish()?;

    info!(
        theme = theme.as_str(),
        files = files.len(),
        warnings = warnings.len();
        "Token sources loaded"
    );

    Ok(Loaded {
        tree,
        files,
        warnings,
    })
}

/// Resolves a pattern to the sorted list of existing files it names.
fn match_files(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, Diagnostic> {
    if !is_glob(pattern) {
        let file = input_dir.join(pattern);
        return Ok(if file.is_file() { vec![file] } else { Vec::new() });
    }

    let escaped_dir = glob::Pattern::escape(&input_dir.to_string_lossy());
    let full_pattern = format!("{escaped_dir}/{pattern}");

    let paths = glob::glob(&full_pattern).map_err(|err| {
        Diagnostic::error(format!("invalid source pattern `{pattern}`: {}", err.msg))
            .with_code(ErrorCode::E004)
    })?;

    let mut matched = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => matched.push(path),
            Ok(_) => {}
            Err(err) => {
                return Err(Diagnostic::error(format!(
                    "cannot read `{}`: {}",
                    err.path().display(),
                    err.error()
                ))
                .with_code(ErrorCode::E002)
                .with_source(err.path()));
            }
        }
    }

    matched.sort();
    Ok(matched)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Reads and converts one source file. Problems are emitted to `collector`.
fn read_source(file: &Path, collector: &mut DiagnosticCollector) -> Option<Node> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => {
            collector.emit(
                Diagnostic::error(format!("cannot read `{}`: {err}", file.display()))
                    .with_code(ErrorCode::E002)
                    .with_source(file),
            );
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            collector.emit(
                Diagnostic::error(format!(
                    "invalid JSON in `{}` at line {}, column {}: {err}",
                    file.display(),
                    err.line(),
                    err.column()
                ))
                .with_code(ErrorCode::E003)
                .with_source(file),
            );
            return None;
        }
    };

    match value {
        Value::Object(object) => Some(Node::from_json_object(object, file, collector)),
        _ => {
            collector.emit(
                Diagnostic::error(format!("`{}` must contain a JSON object", file.display()))
                    .with_code(ErrorCode::E005)
                    .with_source(file),
            );
            None
        }
    }
}
