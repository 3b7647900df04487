//! HTML fragment minification.
//!
//! User options are merged over [`default_options`] with the parser wiring
//! keys in [`DISABLED_OPTIONS`] protected, then translated for `minify-html`.

mod options;

pub use options::{CollapseWhitespaces, Diagnostic, JsonMinify, MarkupOptions, RedundantAttributes};

use mhc_options::{MergeOptions, Tree};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::MinifyError;

/// Keys that control how the fragment is parsed; users cannot set them.
pub const DISABLED_OPTIONS: &[&str] = &[
    "context-element",
    "filename",
    "forceSetHtml5Doctype",
    "form_element",
    "iframeSrcdoc",
    "mode",
    "scriptingEnabled",
    "selfClosingVoidElements",
];

/// Result of minifying a fragment.
#[derive(Debug, Clone, Serialize)]
pub struct HtmlOutput {
    pub code: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
}

/// Baseline options every minification starts from.
pub fn default_options() -> Tree {
    Tree::from_iter([
        ("collapseWhitespaces".to_string(), json!("all")),
        ("sortSpaceSeparatedAttributeValues".to_string(), json!(false)),
        ("minifyCss".to_string(), json!({"lib": "lightningcss"})),
        ("tagOmission".to_string(), json!(false)),
    ])
}

/// `minifyCss: true` keeps the default CSS configuration instead of the
/// bare boolean; anything else switches embedded CSS minification off.
fn keep_css_config(
    key: &str,
    target_value: Option<&Value>,
    source_value: &Value,
    _target: &Tree,
    _source: &Tree,
) -> Option<Value> {
    if key != "minifyCss" {
        return None;
    }
    if source_value == &Value::Bool(true) {
        target_value.cloned()
    } else {
        Some(Value::Bool(false))
    }
}

/// Merge `user_options` over the defaults.
pub fn merged_options(user_options: Option<&Tree>) -> Tree {
    let defaults = default_options();
    match user_options {
        Some(user) => MergeOptions::new()
            .disable(DISABLED_OPTIONS)
            .on_key(keep_css_config)
            .merge(&defaults, user),
        None => defaults,
    }
}

/// Minify an HTML fragment.
///
/// ```
/// let result = minify_html_css::html::minify_html("<p>   Hello World!         </p>", None).unwrap();
/// assert_eq!(result.code, "<p>Hello World!</p>");
/// ```
pub fn minify_html(input: &str, user_options: Option<&Tree>) -> Result<HtmlOutput, MinifyError> {
    let merged = merged_options(user_options);
    let options: MarkupOptions = serde_json::from_value(Value::Object(merged))?;
    transform(input, &options)
}

/// Run the engine with already-resolved options.
pub fn transform(input: &str, options: &MarkupOptions) -> Result<HtmlOutput, MinifyError> {
    let (cfg, errors) = options.to_engine_config()?;
    for diagnostic in &errors {
        warn!(%diagnostic, "markup option ignored");
    }

    debug!(
        bytes = input.len(),
        keep_closing_tags = cfg.keep_closing_tags,
        minify_css = cfg.minify_css,
        "minifying HTML fragment"
    );

    let minified = ::minify_html::minify(input.as_bytes(), &cfg);
    let code = String::from_utf8(minified)?;

    Ok(HtmlOutput { code, errors })
}
