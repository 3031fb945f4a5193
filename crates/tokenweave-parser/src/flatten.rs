//! Flattening of the merged tree into a token set.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use tokenweave_core::{category::Category, path::TokenPath, value::TokenValue};

use crate::node::Node;

/// A single flattened token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    path: TokenPath,
    value: TokenValue,
    metadata: IndexMap<String, Value>,
    source: Option<PathBuf>,
}

impl Token {
    /// Creates a token without metadata or source information.
    pub fn new(path: TokenPath, value: impl Into<TokenValue>) -> Self {
        Self {
            path,
            value: value.into(),
            metadata: IndexMap::new(),
            source: None,
        }
    }

    pub fn path(&self) -> &TokenPath {
        &self.path
    }

    /// The value as authored, possibly a `{…}` reference.
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn category(&self) -> Category {
        self.path.category()
    }

    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    /// The file the winning definition came from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the `description` (or `$description`) annotation.
    pub fn description(&self) -> Option<&str> {
        self.annotation("description")
    }

    /// Returns the declared `type` (or `$type`) annotation.
    pub fn declared_type(&self) -> Option<&str> {
        self.annotation("type")
    }

    fn annotation(&self, name: &str) -> Option<&str> {
        self.metadata
            .get(name)
            .or_else(|| self.metadata.get(&format!("${name}")))
            .and_then(Value::as_str)
    }
}

/// The flat mapping from path to token for one theme.
///
/// Iteration follows flattening order: depth-first, keys in authored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    tokens: IndexMap<TokenPath, Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token, replacing any token already at the same path.
    pub fn insert(&mut self, token: Token) {
        self.tokens.insert(token.path.clone(), token);
    }

    pub fn get(&self, path: &TokenPath) -> Option<&Token> {
        self.tokens.get(path)
    }

    pub fn contains(&self, path: &TokenPath) -> bool {
        self.tokens.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// Flattens a merged tree into a [`TokenSet`].
pub fn flatten(tree: &Node) -> TokenSet {
    let mut set = TokenSet::new();
    flatten_into(tree, &TokenPath::default(), &mut set);
    set
}

fn flatten_into(node: &Node, path: &TokenPath, set: &mut TokenSet) {
    match node {
        Node::Token(token) => set.insert(Token {
            path: path.clone(),
            value: token.value().clone(),
            metadata: token.metadata().clone(),
            source: token.source().map(Path::to_path_buf),
        }),
        Node::Group(children) => {
            for (key, child) in children {
                flatten_into(child, &path.join(key.as_str()), set);
            }
        }
    }
}
