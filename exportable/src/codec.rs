//! JSON text boundary for plain data trees.

use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Widest indentation honoured by [`encode_with`]; wider requests are clamped.
pub const MAX_INDENT: usize = 10;

/// Rewrites values before encoding.
///
/// Called with `("", root)` first, then with each property name or array
/// index. `None` drops an object property, or encodes null in an array slot.
pub type Replacer<'a> = &'a dyn Fn(&str, &Value) -> Option<Value>;

/// Encodes a tree as JSON text; `indent` of `None` or 0 is compact.
pub fn encode(tree: &Value, indent: Option<usize>) -> Result<String> {
    encode_with(tree, None, indent)
}

/// Encodes a tree, optionally passing every value through `replacer` first.
///
/// A replacer that drops the root still yields text: the literal `null`.
/// There is no "no output" result.
pub fn encode_with(tree: &Value, replacer: Option<Replacer<'_>>, indent: Option<usize>) -> Result<String> {
    let replaced;
    let tree = match replacer {
        Some(replacer) => {
            replaced = replace("", tree, replacer).unwrap_or(Value::Null);
            &replaced
        }
        None => tree,
    };

    match indent.map(|n| n.min(MAX_INDENT)).filter(|n| *n > 0) {
        None => serde_json::to_string(tree).map_err(Error::Encode),
        Some(width) => {
            let pad = vec![b' '; width];
            let mut out = Vec::new();
            let mut ser =
                serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&pad));
            tree.serialize(&mut ser).map_err(Error::Encode)?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        }
    }
}

/// Parses JSON text into a tree. Malformed text is an [`Error::Decode`].
pub fn decode(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(Error::Decode)
}

fn replace(key: &str, value: &Value, replacer: Replacer<'_>) -> Option<Value> {
    let value = replacer(key, value)?;
    let value = match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| replace(&i.to_string(), item, replacer).unwrap_or(Value::Null))
                .collect(),
        ),
        Value::Object(entries) => {
            let mut out = Map::new();
            for (name, item) in &entries {
                if let Some(item) = replace(name, item, replacer) {
                    out.insert(name.clone(), item);
                }
            }
            Value::Object(out)
        }
        other => other,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replacer_sees_root_first() {
        let seen = std::cell::RefCell::new(Vec::new());
        let replacer = |key: &str, value: &Value| {
            seen.borrow_mut().push(key.to_string());
            Some(value.clone())
        };
        encode_with(&json!({"a": [1]}), Some(&replacer), None).unwrap();
        assert_eq!(*seen.borrow(), vec!["", "a", "0"]);
    }

    #[test]
    fn indent_is_clamped() {
        let text = encode(&json!({"a": 1}), Some(40)).unwrap();
        assert_eq!(text, format!("{{\n{}\"a\": 1\n}}", " ".repeat(MAX_INDENT)));
    }
}
