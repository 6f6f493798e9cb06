#![forbid(unsafe_code)]

//! Deep merge for JSON option documents.
//!
//! Objects merge key by key, recursively. Everything else, arrays included,
//! replaces the base value wholesale; arrays are never merged element-wise,
//! no matter how deep they sit.

use serde_json::{Map, Value};

/// Merge `overlay` into `base` in place.
///
/// When `overlay` is an object and `base` is not, `base` becomes an empty
/// object first so sibling keys from later layers can land in it.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Object(entries) => {
            if !base.is_object() {
                *base = Value::Object(Map::new());
            }
            if let Value::Object(target) = base {
                for (key, value) in entries {
                    deep_merge(target.entry(key).or_insert(Value::Null), value);
                }
            }
        }
        other => *base = other,
    }
}

/// Merge a stack of layers, later layers winning.
pub fn merge_layers<I>(layers: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut merged = Value::Object(Map::new());
    for layer in layers {
        deep_merge(&mut merged, layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_siblings_survive_partial_override() {
        let mut base = json!({ "a": { "b": 1, "c": 2 } });
        deep_merge(&mut base, json!({ "a": { "b": 5 } }));
        assert_eq!(base, json!({ "a": { "b": 5, "c": 2 } }));
    }

    #[test]
    fn scalars_overwrite() {
        let mut base = json!({ "event": "click", "close": false });
        deep_merge(&mut base, json!({ "close": true }));
        assert_eq!(base, json!({ "event": "click", "close": true }));
    }

    #[test]
    fn arrays_overwrite_wholesale_at_any_depth() {
        let mut base = json!({ "list": [1, 2, 3], "deep": { "inner": { "list": [1, 2] } } });
        deep_merge(
            &mut base,
            json!({ "list": [9], "deep": { "inner": { "list": [7] } } }),
        );
        assert_eq!(
            base,
            json!({ "list": [9], "deep": { "inner": { "list": [7] } } })
        );
    }

    #[test]
    fn object_over_scalar_starts_fresh() {
        let mut base = json!({ "a": 3 });
        deep_merge(&mut base, json!({ "a": { "b": 1 } }));
        assert_eq!(base, json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn null_overwrites() {
        let mut base = json!({ "a": { "b": 1 } });
        deep_merge(&mut base, json!({ "a": null }));
        assert_eq!(base, json!({ "a": null }));
    }

    #[test]
    fn new_keys_are_added() {
        let mut base = json!({ "a": 1 });
        deep_merge(&mut base, json!({ "b": { "c": true } }));
        assert_eq!(base, json!({ "a": 1, "b": { "c": true } }));
    }

    #[test]
    fn layers_apply_in_order() {
        let merged = merge_layers([
            json!({ "name": "tooltip", "nested": { "x": 1, "y": 1 } }),
            json!({ "nested": { "y": 2 } }),
            json!({ "name": "hint" }),
        ]);
        assert_eq!(
            merged,
            json!({ "name": "hint", "nested": { "x": 1, "y": 2 } })
        );
    }
}
