//! Nested JSON dump of every resolved token, keyed by theme.

use log::warn;
use serde_json::{Map, Number, Value};

use tokenweave_core::value::TokenValue;

use super::{Artifact, Error};
use crate::pipeline::ThemeBuild;

/// Renders `json/tokens.json`, or nothing if no theme succeeded.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if serialization fails.
pub fn render(builds: &[ThemeBuild]) -> Result<Option<Artifact>, Error> {
    if builds.is_empty() {
        return Ok(None);
    }
    let document = serde_json::to_string_pretty(&document(builds))?;
    Ok(Some(Artifact::new("json/tokens.json", document + "\n")))
}

/// Builds `{ "<theme>": { …nested resolved values… } }`.
pub fn document(builds: &[ThemeBuild]) -> Value {
    let mut root = Map::new();
    for build in builds {
        let mut tree = Map::new();
        for token in build.full().iter() {
            insert(&mut tree, token.path().segments(), json_value(token.output_value()));
        }
        root.insert(build.theme().to_string(), Value::Object(tree));
    }
    Value::Object(root)
}

fn insert(tree: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = tree;
    for segment in parents {
        let entry = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(children) => node = children,
            _ => {
                warn!(segment = segment.as_str(); "Token path passes through a value, skipping");
                return;
            }
        }
    }
    node.insert(last.clone(), value);
}

fn json_value(value: &TokenValue) -> Value {
    match value {
        TokenValue::Text(text) => Value::String(text.clone()),
        TokenValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
            Value::Number(Number::from(*number as i64))
        }
        TokenValue::Number(number) => Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
    }
}
