//! Reference resolution.
//!
//! A token's value may be a `{dotted.path}` reference to another token in the
//! same [`TokenSet`]. The [`Resolver`] follows such chains to their literal
//! end. It supports two depths that share one walk:
//!
//! - [`Depth::Full`] returns the literal at the end of the chain. Android and
//!   iOS output use this because those platforms have no variable syntax.
//! - [`Depth::OneHop`] validates the whole chain exactly like `Full` but
//!   returns only the first referenced path, so CSS output can keep the chain
//!   visible as `var(--…)`.
//!
//! Chains are followed iteratively with a visited set, so arbitrarily long
//! chains cannot overflow the stack and cycles always terminate with
//! [`ResolveError::Circular`].

use std::{collections::HashMap, fmt};

use indexmap::IndexSet;
use log::{debug, trace, warn};
use thiserror::Error;

use tokenweave_core::{category::Category, path::TokenPath, value::TokenValue};

use crate::{
    error::{Diagnostic, ErrorCode},
    flatten::{Token, TokenSet},
    syntax::{ValueSyntax, classify},
};

/// How far a reference is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Follow the chain to its final literal.
    Full,
    /// Stop after the first reference.
    OneHop,
}

/// The result of resolving one token.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A literal value.
    Literal(TokenValue),
    /// The path a reference points to (only produced by [`Depth::OneHop`]).
    Alias(TokenPath),
}

/// Reasons a token could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("token `{0}` does not exist")]
    MissingToken(TokenPath),

    #[error("`{path}` has malformed reference value `{value}`")]
    MalformedReference { path: TokenPath, value: String },

    #[error("`{path}` references `{{{reference}}}`, which does not exist")]
    Unresolved {
        path: TokenPath,
        reference: TokenPath,
    },

    #[error("circular reference: {}", Chain(.chain))]
    Circular { chain: Vec<TokenPath> },
}

impl ResolveError {
    /// Returns the diagnostic error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::MissingToken(_) | ResolveError::Unresolved { .. } => ErrorCode::E200,
            ResolveError::MalformedReference { .. } => ErrorCode::E101,
            ResolveError::Circular { .. } => ErrorCode::E201,
        }
    }

    /// Builds a diagnostic for `token`, the token whose resolution failed.
    pub fn to_diagnostic(&self, token: &Token) -> Diagnostic {
        let help = match self {
            ResolveError::MissingToken(_) | ResolveError::Unresolved { .. } => {
                "check the spelling or define the referenced token in every theme"
            }
            ResolveError::MalformedReference { .. } => {
                "a reference must be exactly one `{dotted.path}` filling the whole value"
            }
            ResolveError::Circular { .. } => {
                "break the cycle by giving one of the tokens a literal value"
            }
        };

        let diagnostic = Diagnostic::error(self.to_string())
            .with_code(self.code())
            .with_token(token.path().clone())
            .with_help(help);

        match token.source() {
            Some(source) => diagnostic.with_source(source),
            None => diagnostic,
        }
    }
}

struct Chain<'a>(&'a [TokenPath]);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, path) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

/// Resolves references within one [`TokenSet`].
///
/// # Examples
///
/// ```
/// use tokenweave_core::{path::TokenPath, value::TokenValue};
/// use tokenweave_parser::{Depth, Resolution, Resolver, Token, TokenSet};
///
/// let set: TokenSet = [
///     Token::new(TokenPath::parse("A"), "{B}"),
///     Token::new(TokenPath::parse("B"), "#000000"),
/// ]
/// .into_iter()
/// .collect();
///
/// let resolver = Resolver::new(&set);
/// assert_eq!(
///     resolver.resolve(&TokenPath::parse("A"), Depth::Full),
///     Ok(Resolution::Literal(TokenValue::from("#000000")))
/// );
/// assert_eq!(
///     resolver.resolve(&TokenPath::parse("A"), Depth::OneHop),
///     Ok(Resolution::Alias(TokenPath::parse("B")))
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    set: &'a TokenSet,
}

impl<'a> Resolver<'a> {
    pub fn new(set: &'a TokenSet) -> Self {
        Self { set }
    }

    /// Resolves the token at `path` to the given depth.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the token does not exist, if any value
    /// along the chain is a malformed reference, if the chain points at a
    /// missing token, or if the chain is circular. The same checks apply to
    /// both depths.
    pub fn resolve(&self, path: &TokenPath, depth: Depth) -> Result<Resolution, ResolveError> {
        let literal = self.walk(path, &mut HashMap::new())?;
        self.finish(path, literal, depth)
    }

    /// Resolves every token in the set, memoizing shared chain tails.
    ///
    /// Tokens whose own value is a malformed reference are set aside as
    /// skipped; every other failure is kept as a degraded entry.
    pub fn resolve_all(&self, depth: Depth) -> ResolvedSet {
        let mut cache = HashMap::new();
        let mut tokens = Vec::new();
        let mut skipped = Vec::new();

        for token in self.set.iter() {
            let resolution = self
                .walk(token.path(), &mut cache)
                .and_then(|literal| self.finish(token.path(), literal, depth));
            let resolved = ResolvedToken {
                token: token.clone(),
                resolution,
            };

            if resolved.is_malformed() {
                warn!(token = token.path().to_string(); "Skipping token with malformed reference");
                skipped.push(resolved);
                continue;
            }
            if let Err(err) = &resolved.resolution {
                warn!(
                    token = token.path().to_string(),
                    error = err.to_string();
                    "Leaving token unresolved"
                );
            }
            tokens.push(resolved);
        }

        tokens.sort_by(|a, b| a.token.path().cmp(b.token.path()));
        skipped.sort_by(|a, b| a.token.path().cmp(b.token.path()));

        debug!(
            tokens = tokens.len(),
            depth:?,
            unresolved = tokens.iter().filter(|t| t.is_degraded()).count(),
            skipped = skipped.len();
            "Resolved token set"
        );

        ResolvedSet { tokens, skipped }
    }

    /// Shapes a fully resolved literal into the result for `depth`.
    fn finish(
        &self,
        path: &TokenPath,
        literal: TokenValue,
        depth: Depth,
    ) -> Result<Resolution, ResolveError> {
        if depth == Depth::OneHop {
            let token = self.token(path)?;
            if let ValueSyntax::Reference(target) = classify(token.value()) {
                return Ok(Resolution::Alias(target));
            }
        }
        Ok(Resolution::Literal(literal))
    }

    /// Follows the chain starting at `start` to its literal.
    ///
    /// Successful walks record the literal for every path on the chain so
    /// later walks stop as soon as they reach a known tail. Failures are not
    /// memoized; each start reports its own chain.
    fn walk(
        &self,
        start: &TokenPath,
        cache: &mut HashMap<TokenPath, TokenValue>,
    ) -> Result<TokenValue, ResolveError> {
        let mut visited: IndexSet<TokenPath> = IndexSet::new();
        let mut current = start.clone();

        let literal = loop {
            if let Some(cached) = cache.get(&current) {
                break cached.clone();
            }

            let token = match self.token(&current) {
                Ok(token) => token,
                Err(err) => {
                    return Err(match visited.last() {
                        Some(previous) => ResolveError::Unresolved {
                            path: previous.clone(),
                            reference: current,
                        },
                        None => err,
                    });
                }
            };

            trace!(token = current.to_string(); "Following reference chain");
            visited.insert(current.clone());

            match classify(token.value()) {
                ValueSyntax::Literal => break token.value().clone(),
                ValueSyntax::Malformed => {
                    return Err(ResolveError::MalformedReference {
                        path: current,
                        value: token.value().to_string(),
                    });
                }
                ValueSyntax::Reference(next) => {
                    if visited.contains(&next) {
                        let mut chain: Vec<TokenPath> = visited.into_iter().collect();
                        chain.push(next);
                        return Err(ResolveError::Circular { chain });
                    }
                    current = next;
                }
            }
        };

        for path in visited {
            cache.insert(path, literal.clone());
        }

        Ok(literal)
    }

    fn token(&self, path: &TokenPath) -> Result<&'a Token, ResolveError> {
        self.set
            .get(path)
            .ok_or_else(|| ResolveError::MissingToken(path.clone()))
    }
}

/// A token together with the outcome of resolving it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    token: Token,
    resolution: Result<Resolution, ResolveError>,
}

impl ResolvedToken {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn path(&self) -> &TokenPath {
        self.token.path()
    }

    pub fn category(&self) -> Category {
        self.token.category()
    }

    pub fn resolution(&self) -> Result<&Resolution, &ResolveError> {
        self.resolution.as_ref()
    }

    /// Returns `true` when resolution failed and the raw value stands in.
    pub fn is_degraded(&self) -> bool {
        self.resolution.is_err()
    }

    /// Returns `true` when this token's own value is a malformed reference.
    fn is_malformed(&self) -> bool {
        matches!(
            &self.resolution,
            Err(ResolveError::MalformedReference { path, .. }) if path == self.token.path()
        )
    }

    /// The value to emit: the resolved literal, or the authored value
    /// (placeholder text included) when resolution failed.
    pub fn output_value(&self) -> &TokenValue {
        match &self.resolution {
            Ok(Resolution::Literal(value)) => value,
            Ok(Resolution::Alias(_)) | Err(_) => self.token.value(),
        }
    }

    /// The referenced path for one-hop resolutions.
    pub fn alias(&self) -> Option<&TokenPath> {
        match &self.resolution {
            Ok(Resolution::Alias(path)) => Some(path),
            _ => None,
        }
    }
}

/// All tokens of a theme after resolution, sorted by path.
///
/// Tokens with a malformed reference value are not part of the set; they are
/// only reported through [`ResolvedSet::failed`] and the diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSet {
    tokens: Vec<ResolvedToken>,
    skipped: Vec<ResolvedToken>,
}

impl ResolvedSet {
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, path: &TokenPath) -> Option<&ResolvedToken> {
        self.tokens
            .binary_search_by(|token| token.path().cmp(path))
            .ok()
            .map(|index| &self.tokens[index])
    }

    /// Degraded and skipped tokens, sorted by path.
    pub fn failed(&self) -> Vec<&ResolvedToken> {
        let mut failed: Vec<&ResolvedToken> = self
            .tokens
            .iter()
            .filter(|token| token.is_degraded())
            .chain(&self.skipped)
            .collect();
        failed.sort_by(|a, b| a.path().cmp(b.path()));
        failed
    }

    /// Returns `true` if any token failed to resolve or was skipped.
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty() || self.tokens.iter().any(ResolvedToken::is_degraded)
    }

    /// One diagnostic per degraded or skipped token.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.failed()
            .into_iter()
            .filter_map(|resolved| {
                resolved
                    .resolution
                    .as_ref()
                    .err()
                    .map(|err| err.to_diagnostic(&resolved.token))
            })
            .collect()
    }
}
