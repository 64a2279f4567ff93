//! Token scanning and dotted-path lookup.
//!
//! Resolution is purely textual and single pass: tokens found in the input
//! are replaced left to right, and replacement text is never re-scanned, so
//! a default whose value happens to contain `<...>` cannot trigger another
//! round of substitution.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::TemplateError;

/// `<dotted.key>` — dots navigate nested mappings.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"<([A-Za-z0-9_][A-Za-z0-9_.\-]*)>").expect("token pattern is valid")
    })
}

/// Walk `tree` along a dotted key (`repo.default_branch`), descending one
/// mapping per segment. Returns `None` as soon as a segment is missing or
/// the current node is not a mapping.
pub fn deep_get<'a>(tree: &'a Value, dotted: &str) -> Option<&'a Value> {
    let mut node = tree;
    for segment in dotted.split('.') {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Replace every `<dotted.key>` token in `input` with its scalar value from
/// `defaults`.
///
/// Fails with [`TemplateError::UnknownKey`] when a token's path does not
/// resolve, and [`TemplateError::NotScalar`] when it lands on a mapping,
/// array, or null.
pub fn resolve(input: &str, defaults: &Value) -> Result<String, TemplateError> {
    let pattern = token_pattern();
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for found in pattern.find_iter(input) {
        // Trim the surrounding angle brackets to get the dotted key.
        let token = &input[found.start() + 1..found.end() - 1];

        let value = deep_get(defaults, token).ok_or_else(|| TemplateError::UnknownKey {
            token: token.to_owned(),
        })?;
        let text = scalar_text(value).ok_or_else(|| TemplateError::NotScalar {
            token: token.to_owned(),
        })?;

        output.push_str(&input[cursor..found.start()]);
        output.push_str(&text);
        cursor = found.end();
    }
    output.push_str(&input[cursor..]);
    Ok(output)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
