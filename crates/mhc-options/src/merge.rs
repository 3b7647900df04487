//! Option tree merge logic
//!
//! Layers a source tree (user overrides) on top of a target tree (defaults):
//! - Trees: deep-merge by key
//! - Arrays: REPLACE (source wins entirely)
//! - Scalars and null: override (source wins)
//!
//! Disabled keys and the override callback only apply to the top level of
//! the outermost call.

use serde_json::Value;
use tracing::trace;

use crate::tree::{as_tree, Tree};

/// Per-key override hook.
///
/// Called as `(key, target_value, source_value, target, source)` for every
/// top-level source key that is not disabled. Returning `Some(value)` stores
/// `value` and skips the merge rules for that key; `Some(Value::Null)` and
/// `Some(false)` are overrides like any other. `None` falls through to the
/// normal merge.
pub type OnKey<'a> = dyn Fn(&str, Option<&Value>, &Value, &Tree, &Tree) -> Option<Value> + 'a;

/// Merge `source` into a copy of `target`.
///
/// Neither input is modified. Source keys listed in `disabled` are ignored,
/// leaving the target's value (if any) in place. Keys that only exist in the
/// target are carried over and never reach `on_key`.
pub fn merge_options(
    target: &Tree,
    source: &Tree,
    disabled: &[&str],
    on_key: Option<&OnKey<'_>>,
) -> Tree {
    let mut merged = target.clone();

    for (key, source_value) in source {
        if disabled.contains(&key.as_str()) {
            trace!(key = %key, "ignoring disabled option");
            continue;
        }

        let target_value = target.get(key);

        if let Some(on_key) = on_key {
            if let Some(value) = on_key(key, target_value, source_value, target, source) {
                trace!(key = %key, "option overridden by callback");
                merged.insert(key.clone(), value);
                continue;
            }
        }

        let value = match (target_value.and_then(as_tree), as_tree(source_value)) {
            (Some(target_tree), Some(source_tree)) => Value::Object(deep_merge(target_tree, source_tree)),
            // Arrays, scalars, null, or a tree with nothing to merge into
            _ => source_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    merged
}

/// Merge two trees with no disabled keys and no callback.
///
/// This is what nested trees get: the protections of the outer call do not
/// reach below the top level.
pub fn deep_merge(target: &Tree, source: &Tree) -> Tree {
    merge_options(target, source, &[], None)
}

/// Reusable merge configuration.
///
/// ```
/// use mhc_options::{MergeOptions, Tree};
/// use serde_json::{json, Value};
///
/// let defaults: Tree = json!({"minify": true, "filename": ""})
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// let user: Tree = json!({"minify": false, "filename": "evil.css"})
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
///
/// let merged = MergeOptions::new().disable(&["filename"]).merge(&defaults, &user);
/// assert_eq!(merged["minify"], Value::Bool(false));
/// assert_eq!(merged["filename"], "");
/// ```
#[derive(Default)]
pub struct MergeOptions<'a> {
    disabled: &'a [&'a str],
    on_key: Option<Box<OnKey<'a>>>,
}

impl<'a> MergeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level source keys to ignore.
    pub fn disable(mut self, keys: &'a [&'a str]) -> Self {
        self.disabled = keys;
        self
    }

    /// Install the per-key override hook.
    pub fn on_key<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, Option<&Value>, &Value, &Tree, &Tree) -> Option<Value> + 'a,
    {
        self.on_key = Some(Box::new(f));
        self
    }

    pub fn merge(&self, target: &Tree, source: &Tree) -> Tree {
        merge_options(target, source, self.disabled, self.on_key.as_deref())
    }
}

impl std::fmt::Debug for MergeOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeOptions")
            .field("disabled", &self.disabled)
            .field("on_key", &self.on_key.is_some())
            .finish()
    }
}
