//! Token resolution engine for tokenweave.
//!
//! This crate turns JSON token sources into resolved token sets:
//!
//! 1. [`load`] reads and deep-merges the sources for one theme into a
//!    [`Node`] tree.
//! 2. [`flatten`] turns the tree into a [`TokenSet`] keyed by dotted path.
//! 3. [`Resolver`] follows `{dotted.path}` references, either fully or one
//!    hop at a time, with cycle and missing-reference detection.
//!
//! [`parse`] runs the first two steps for a theme.

pub mod error;
pub mod syntax;

mod flatten;
mod load;
mod node;
mod resolve;

pub use flatten::{Token, TokenSet, flatten};
pub use load::{Loaded, SourceSpec, load};
pub use node::{Node, TokenNode};
pub use resolve::{Depth, Resolution, ResolveError, ResolvedSet, ResolvedToken, Resolver};

use std::path::{Path, PathBuf};

use log::debug;

use tokenweave_core::theme::Theme;

use error::{Diagnostic, ParseError};

/// The flattened token set for one theme.
#[derive(Debug)]
pub struct ThemeTokens {
    theme: Theme,
    set: TokenSet,
    files: Vec<PathBuf>,
    warnings: Vec<Diagnostic>,
}

impl ThemeTokens {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&self) -> &TokenSet {
        &self.set
    }

    /// Files that contributed to the set, in merge order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Non-fatal diagnostics from loading.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns a resolver over this theme's tokens.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.set)
    }
}

/// Loads, merges and flattens the token sources for `theme`.
///
/// # Errors
///
/// Returns [`ParseError`] if any source could not be loaded; see [`load`].
pub fn parse(
    input_dir: &Path,
    sources: &[SourceSpec],
    theme: Theme,
) -> Result<ThemeTokens, ParseError> {
    let loaded = load(input_dir, sources, theme)?;
    let set = flatten(loaded.tree());

    debug!(
        theme = theme.as_str(),
        tokens = set.len(),
        files = loaded.files().len(),
        warnings = loaded.warnings().len();
        "Flattened token set"
    );

    let (_, files, warnings) = loaded.into_parts();

    Ok(ThemeTokens {
        theme,
        set,
        files,
        warnings,
    })
}
