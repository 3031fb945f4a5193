//! The merged token tree.
//!
//! Token sources are JSON objects nested arbitrarily deep. Each object is
//! either a token definition or a group of further nodes. [`Node`] makes that
//! distinction explicit at the JSON boundary so later stages never have to
//! guess whether a key called `value` is a token value or a child group.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map, Value};

use tokenweave_core::{path::TokenPath, value::TokenValue};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// Keys that hold a token's value. `$value` follows the W3C draft format.
const VALUE_KEYS: [&str; 2] = ["value", "$value"];

/// A node of the merged token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A terminal token definition.
    Token(TokenNode),
    /// An intermediate grouping node.
    Group(IndexMap<String, Node>),
}

/// A token definition as it appears in a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenNode {
    value: TokenValue,
    metadata: IndexMap<String, Value>,
    source: Option<PathBuf>,
}

impl TokenNode {
    pub fn new(value: TokenValue) -> Self {
        Self {
            value,
            metadata: IndexMap::new(),
            source: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Group(IndexMap::new())
    }
}

impl Node {
    /// Creates an empty group.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts the root object of a source file into a tree.
    ///
    /// Nodes that are neither groups nor usable tokens are reported to
    /// `collector` as warnings and left out of the tree.
    pub(crate) fn from_json_object(
        object: Map<String, Value>,
        source: &Path,
        collector: &mut DiagnosticCollector,
    ) -> Self {
        group_from_object(object, &TokenPath::default(), source, collector)
    }

    /// Wraps this node so it sits at `prefix` in the tree.
    pub fn mount(self, prefix: &TokenPath) -> Self {
        prefix.segments().iter().rev().fold(self, |node, segment| {
            let mut children = IndexMap::new();
            children.insert(segment.clone(), node);
            Node::Group(children)
        })
    }

    /// Merges `incoming` over `self`.
    ///
    /// An incoming token replaces whatever was there. Two groups merge key by
    /// key, keeping the position of keys that already existed and appending
    /// new ones. A group arriving over a token replaces the token.
    pub fn merge(self, incoming: Node, path: &TokenPath) -> Node {
        match (self, incoming) {
            (_, token @ Node::Token(_)) => token,
            (Node::Group(mut existing), Node::Group(children)) => {
                for (key, child) in children {
                    match existing.get_mut(&key) {
                        Some(slot) => {
                            let current = std::mem::take(slot);
                            *slot = current.merge(child, &path.join(key.as_str()));
                        }
                        None => {
                            existing.insert(key, child);
                        }
                    }
                }
                Node::Group(existing)
            }
            (Node::Token(_), group @ Node::Group(_)) => {
                warn!(path = path.to_string(); "Group replaces previously defined token");
                group
            }
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Group(children) => Some(children),
            Node::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&TokenNode> {
        match self {
            Node::Token(token) => Some(token),
            Node::Group(_) => None,
        }
    }
}

fn group_from_object(
    object: Map<String, Value>,
    path: &TokenPath,
    source: &Path,
    collector: &mut DiagnosticCollector,
) -> Node {
    let mut children = IndexMap::new();

    for (key, value) in object {
        let child_path = path.join(key.as_str());
        match value {
            Value::Object(child) => {
                if let Some(node) = node_from_object(child, &child_path, source, collector) {
                    children.insert(key, node);
                }
            }
            _ if key.starts_with('$') => {
                debug!(path = child_path.to_string(); "Ignoring group-level annotation");
            }
            other => {
                collector.emit(
                    Diagnostic::warning(format!(
                        "`{child_path}` is {}, expected a group or a token object",
                        describe(&other)
                    ))
                    .with_code(ErrorCode::E100)
                    .with_token(child_path)
                    .with_source(source)
                    .with_help("wrap the literal as `{ \"value\": … }`"),
                );
            }
        }
    }

    Node::Group(children)
}

fn node_from_object(
    mut object: Map<String, Value>,
    path: &TokenPath,
    source: &Path,
    collector: &mut DiagnosticCollector,
) -> Option<Node> {
    let Some(value_key) = VALUE_KEYS.into_iter().find(|key| object.contains_key(*key)) else {
        return Some(group_from_object(object, path, source, collector));
    };

    // A `value` key holding an object is a child group that happens to be
    // called `value`, not a token definition.
    if object.get(value_key).is_some_and(Value::is_object) {
        return Some(group_from_object(object, path, source, collector));
    }

    let raw = object.shift_remove(value_key).unwrap_or(Value::Null);
    let value = match raw {
        Value::String(text) => TokenValue::Text(text),
        Value::Number(number) => match number.as_f64() {
            Some(number) => TokenValue::Number(number),
            None => {
                emit_malformed(path, "a number out of range", source, collector);
                return None;
            }
        },
        other => {
            emit_malformed(path, describe(&other), source, collector);
            return None;
        }
    };

    Some(Node::Token(TokenNode {
        value,
        metadata: object.into_iter().collect(),
        source: Some(source.to_path_buf()),
    }))
}

fn emit_malformed(
    path: &TokenPath,
    found: &str,
    source: &Path,
    collector: &mut DiagnosticCollector,
) {
    collector.emit(
        Diagnostic::warning(format!("token `{path}` has {found} as its value"))
            .with_code(ErrorCode::E100)
            .with_token(path.clone())
            .with_source(source)
            .with_help("token values must be strings or numbers"),
    );
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
