//! Style sheet minification.
//!
//! User options are merged over [`default_options`] with the engine wiring
//! keys in [`DISABLED_OPTIONS`] protected, then handed to `lightningcss`.

mod options;

pub use options::{
    AnalyzeDependencies, BrowserTargets, CssModules, Drafts, NonStandard, PseudoClassNames,
    StyleOptions,
};

use std::fmt::Display;
use std::sync::{Arc, PoisonError, RwLock};

use lightningcss::css_modules::{CssModuleExports, CssModuleReference};
use lightningcss::dependencies::Dependency;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use mhc_options::{MergeOptions, Tree};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::MinifyError;

/// Keys that control how the engine is wired up; users cannot set them.
pub const DISABLED_OPTIONS: &[&str] = &[
    "filename",
    "code",
    "sourceMap",
    "inputSourceMap",
    "projectRoot",
    "include",
    "exclude",
    "visitor",
    "customAtRules",
];

/// Result of minifying a style sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssOutput {
    pub code: String,

    /// CSS module exports, when `cssModules` is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Value>,

    /// `@import` and `url()` dependencies, when `analyzeDependencies` is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Value>,

    /// Rules dropped under `errorRecovery`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Baseline options every minification starts from.
pub fn default_options() -> Tree {
    Tree::from_iter([
        ("filename".to_string(), json!("")),
        ("minify".to_string(), json!(true)),
        ("sourceMap".to_string(), json!(false)),
    ])
}

/// Merge `user_options` over the defaults.
pub fn merged_options(user_options: Option<&Tree>) -> Tree {
    let defaults = default_options();
    match user_options {
        Some(user) => MergeOptions::new()
            .disable(DISABLED_OPTIONS)
            .merge(&defaults, user),
        None => defaults,
    }
}

/// Minify a style sheet.
///
/// ```
/// let result = minify_html_css::css::minify_css("body {   color  :   red  ;  }", None).unwrap();
/// assert_eq!(result.code, "body{color:red}");
/// ```
pub fn minify_css(input: &str, user_options: Option<&Tree>) -> Result<CssOutput, MinifyError> {
    let merged = merged_options(user_options);
    let options: StyleOptions = serde_json::from_value(Value::Object(merged))?;
    transform(input, &options)
}

/// Run the engine with already-resolved options.
pub fn transform(input: &str, options: &StyleOptions) -> Result<CssOutput, MinifyError> {
    debug!(
        bytes = input.len(),
        minify = options.minify,
        "minifying style sheet"
    );

    let targets = options.targets();
    let warnings = options
        .error_recovery
        .then(|| Arc::new(RwLock::new(Vec::new())));

    let parser_options = ParserOptions {
        filename: options.filename.clone(),
        css_modules: options.css_modules_config()?,
        error_recovery: options.error_recovery,
        flags: options.parser_flags(),
        warnings: warnings.clone(),
        ..ParserOptions::default()
    };

    let mut stylesheet = StyleSheet::parse(input, parser_options)
        .map_err(|e| MinifyError::Parse(e.to_string()))?;

    // Always run the minify pass; `minify` only changes how the result is printed.
    stylesheet
        .minify(MinifyOptions {
            targets: targets.clone(),
            unused_symbols: options.unused_symbols.iter().cloned().collect(),
            ..MinifyOptions::default()
        })
        .map_err(|e| MinifyError::Minify(e.to_string()))?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: options.minify,
            targets,
            analyze_dependencies: options.dependency_options(),
            pseudo_classes: options.pseudo_classes(),
            ..PrinterOptions::default()
        })
        .map_err(|e| MinifyError::Print(e.to_string()))?;

    let warnings = warnings
        .map(|collected| collected_warnings(&*collected))
        .unwrap_or_default();
    for warning in &warnings {
        warn!(%warning, "invalid CSS skipped");
    }

    Ok(CssOutput {
        code: result.code,
        exports: result.exports.as_ref().map(exports_to_value),
        dependencies: result.dependencies.as_deref().map(dependencies_to_value),
        warnings,
    })
}

/// Render what the parser collected, even if a writer panicked mid-parse.
fn collected_warnings<E: Display>(collected: &RwLock<Vec<E>>) -> Vec<String> {
    let list = collected.read().unwrap_or_else(PoisonError::into_inner);
    list.iter().map(ToString::to_string).collect()
}

fn exports_to_value(exports: &CssModuleExports) -> Value {
    let mut names: Vec<&String> = exports.keys().collect();
    names.sort();

    let map: Tree = names
        .into_iter()
        .map(|local| {
            let export = &exports[local];
            let composes: Vec<Value> = export
                .composes
                .iter()
                .map(|reference| match reference {
                    CssModuleReference::Local { name } => json!({"type": "local", "name": name}),
                    CssModuleReference::Global { name } => json!({"type": "global", "name": name}),
                    CssModuleReference::Dependency { name, specifier } => {
                        json!({"type": "dependency", "name": name, "specifier": specifier})
                    }
                })
                .collect();
            (
                local.clone(),
                json!({
                    "name": export.name,
                    "composes": composes,
                    "isReferenced": export.is_referenced,
                }),
            )
        })
        .collect();

    Value::Object(map)
}

fn dependencies_to_value(dependencies: &[Dependency]) -> Value {
    dependencies
        .iter()
        .map(|dependency| match dependency {
            Dependency::Import(import) => json!({"type": "import", "url": import.url}),
            Dependency::Url(url) => {
                json!({"type": "url", "url": url.url, "placeholder": url.placeholder})
            }
        })
        .collect()
}
