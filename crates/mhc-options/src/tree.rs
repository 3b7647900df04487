//! The options tree value model.

use serde_json::{Map, Value};

/// A mapping from option names to values.
///
/// Values are primitives (`Null`, `Bool`, `Number`, `String`), sequences
/// (`Array`) or nested trees (`Object`). Iteration follows insertion order.
/// `Value::clone` copies structurally, so a cloned tree shares nothing with
/// its origin.
///
/// There is no opaque variant. Binary payloads such as the raw style sheet
/// never go into a tree; adapters hand them to their engine directly.
pub type Tree = Map<String, Value>;

/// Whether a value takes part in recursive merging.
///
/// Only nested trees do. Arrays, null and primitives are replaced wholesale.
pub fn is_plain_tree(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Borrow a value as a tree, if it is one.
pub fn as_tree(value: &Value) -> Option<&Tree> {
    value.as_object()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_tree_detection() {
        assert!(is_plain_tree(&json!({})));
        assert!(is_plain_tree(&json!({"lib": "lightningcss"})));

        assert!(!is_plain_tree(&json!([1, 2])));
        assert!(!is_plain_tree(&json!(null)));
        assert!(!is_plain_tree(&json!(true)));
        assert!(!is_plain_tree(&json!(0)));
        assert!(!is_plain_tree(&json!("all")));
    }

    #[test]
    fn test_as_tree() {
        let value = json!({"a": 1});
        assert_eq!(as_tree(&value).map(|t| t.len()), Some(1));
        assert!(as_tree(&json!([])).is_none());
    }
}
