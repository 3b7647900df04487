//! Typed view of the merged markup options and their translation into the
//! engine's configuration.

use ::minify_html::Cfg;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MinifyError;
use crate::toggle::Toggle;
use mhc_options::Tree;
use serde_json::Value;

/// Options understood by the markup adapter.
///
/// Unset fields fall back to the engine's own behaviour. Keys this adapter
/// does not know are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkupOptions {
    pub collapse_whitespaces: Option<CollapseWhitespaces>,
    pub remove_empty_metadata_elements: Option<bool>,
    pub remove_comments: Option<bool>,
    pub preserve_comments: Option<Vec<String>>,
    pub minify_conditional_comments: Option<bool>,
    pub remove_empty_attributes: Option<bool>,
    pub remove_redundant_attributes: Option<RedundantAttributes>,
    pub collapse_boolean_attributes: Option<bool>,
    pub normalize_attributes: Option<bool>,
    pub minify_json: Option<Toggle<JsonMinify>>,
    pub minify_js: Option<Toggle<Tree>>,
    pub minify_css: Option<Toggle<Tree>>,
    /// `[typePattern, minifier]` pairs; taken as raw values so odd shapes
    /// are reported rather than rejected
    pub minify_additional_scripts_content: Option<Value>,
    pub minify_additional_attributes: Option<Value>,
    pub sort_space_separated_attribute_values: Option<bool>,
    pub sort_attributes: Option<bool>,
    pub tag_omission: Option<bool>,
    pub quotes: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapseWhitespaces {
    None,
    All,
    Smart,
    Conservative,
    AdvancedConservative,
    OnlyMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedundantAttributes {
    None,
    All,
    Smart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonMinify {
    pub pretty: bool,
}

/// A recoverable problem found while preparing or running a minification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Option the problem relates to
    pub option: String,
    pub message: String,
}

impl Diagnostic {
    fn ignored(option: &str, message: &str) -> Self {
        Self {
            option: option.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.option, self.message)
    }
}

/// Engine switches that are always on and cannot be turned off.
const ALWAYS_ON: &[&str] = &[
    "removeEmptyMetadataElements",
    "minifyConditionalComments",
    "removeEmptyAttributes",
    "collapseBooleanAttributes",
    "normalizeAttributes",
];

impl MarkupOptions {
    /// Build the engine configuration.
    ///
    /// Requests the engine cannot honor but can safely ignore come back as
    /// diagnostics. Requests that would change the output in a way the
    /// engine cannot deliver are errors.
    pub fn to_engine_config(&self) -> Result<(Cfg, Vec<Diagnostic>), MinifyError> {
        let mut diagnostics = Vec::new();

        match self.collapse_whitespaces {
            Some(CollapseWhitespaces::None) => {
                return Err(MinifyError::UnsupportedOption {
                    key: "collapseWhitespaces",
                    reason: "whitespace is always collapsed; \"none\" cannot be honored".to_string(),
                });
            }
            Some(CollapseWhitespaces::OnlyMetadata) => {
                return Err(MinifyError::UnsupportedOption {
                    key: "collapseWhitespaces",
                    reason: "body whitespace is always collapsed; \"only-metadata\" cannot be honored"
                        .to_string(),
                });
            }
            Some(CollapseWhitespaces::Smart)
            | Some(CollapseWhitespaces::Conservative)
            | Some(CollapseWhitespaces::AdvancedConservative) => {
                diagnostics.push(Diagnostic::ignored(
                    "collapseWhitespaces",
                    "only \"all\" is supported; whitespace collapsed as \"all\"",
                ));
            }
            Some(CollapseWhitespaces::All) | None => {}
        }

        let always_on = [
            self.remove_empty_metadata_elements,
            self.minify_conditional_comments,
            self.remove_empty_attributes,
            self.collapse_boolean_attributes,
            self.normalize_attributes,
        ];
        for (name, value) in ALWAYS_ON.iter().zip(always_on) {
            if value == Some(false) {
                diagnostics.push(Diagnostic::ignored(name, "cannot be disabled; ignored"));
            }
        }

        if self.remove_redundant_attributes == Some(RedundantAttributes::None) {
            diagnostics.push(Diagnostic::ignored(
                "removeRedundantAttributes",
                "redundant attributes are always removed; ignored",
            ));
        }

        let remove_comments = self.remove_comments.unwrap_or(true);
        if remove_comments && self.preserve_comments.as_ref().is_some_and(|p| !p.is_empty()) {
            diagnostics.push(Diagnostic::ignored(
                "preserveComments",
                "comment patterns are not supported; all comments are removed",
            ));
        }

        match &self.minify_json {
            Some(Toggle::Config(json)) if json.pretty => {
                diagnostics.push(Diagnostic::ignored("minifyJson", "pretty printing is not supported; ignored"));
            }
            Some(Toggle::Enabled(false)) => {
                diagnostics.push(Diagnostic::ignored(
                    "minifyJson",
                    "JSON handling cannot be switched off separately; ignored",
                ));
            }
            _ => {}
        }

        let minify_js = self.minify_js.as_ref().map_or(true, Toggle::is_enabled);
        if let Some(Toggle::Config(_)) = &self.minify_js {
            diagnostics.push(Diagnostic::ignored(
                "minifyJs",
                "script minifier settings are not supported; using engine defaults",
            ));
        }

        let additional = [
            ("minifyAdditionalScriptsContent", &self.minify_additional_scripts_content),
            ("minifyAdditionalAttributes", &self.minify_additional_attributes),
        ];
        for (name, value) in additional {
            if value.as_ref().is_some_and(requests_something) {
                diagnostics.push(Diagnostic::ignored(name, "additional minification targets are not supported; ignored"));
            }
        }

        let minify_css = self.minify_css.as_ref().map_or(true, Toggle::is_enabled);
        if let Some(Toggle::Config(css)) = &self.minify_css {
            if css.get("lib").and_then(|lib| lib.as_str()).is_some_and(|lib| lib != "lightningcss") {
                diagnostics.push(Diagnostic::ignored(
                    "minifyCss",
                    "only the lightningcss library is available; using it instead",
                ));
            }
        }

        if self.sort_space_separated_attribute_values == Some(true) {
            diagnostics.push(Diagnostic::ignored(
                "sortSpaceSeparatedAttributeValues",
                "attribute value sorting is not supported; ignored",
            ));
        }
        if self.sort_attributes == Some(true) {
            diagnostics.push(Diagnostic::ignored("sortAttributes", "attribute sorting is not supported; ignored"));
        }
        if self.quotes == Some(true) {
            diagnostics.push(Diagnostic::ignored("quotes", "forced attribute quoting is not supported; ignored"));
        }

        let keep_tags = !self.tag_omission.unwrap_or(true);

        let cfg = Cfg {
            keep_closing_tags: keep_tags,
            keep_html_and_head_opening_tags: keep_tags,
            keep_comments: !remove_comments,
            minify_css,
            minify_js,
            ..Cfg::default()
        };

        Ok((cfg, diagnostics))
    }
}

/// Anything but `null` or an empty list counts as a request.
fn requests_something(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(entries) => !entries.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> MarkupOptions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_options_use_engine_behaviour() {
        let (cfg, diagnostics) = parse(json!({})).to_engine_config().unwrap();

        assert!(diagnostics.is_empty());
        assert!(!cfg.keep_closing_tags);
        assert!(!cfg.keep_comments);
        assert!(cfg.minify_css);
        assert!(cfg.minify_js);
    }

    #[test]
    fn test_tag_omission_off_keeps_tags() {
        let (cfg, _) = parse(json!({"tagOmission": false})).to_engine_config().unwrap();
        assert!(cfg.keep_closing_tags);
        assert!(cfg.keep_html_and_head_opening_tags);
    }

    #[test]
    fn test_minify_css_forms() {
        let (cfg, _) = parse(json!({"minifyCss": false})).to_engine_config().unwrap();
        assert!(!cfg.minify_css);

        let (cfg, diagnostics) = parse(json!({"minifyCss": {"lib": "lightningcss"}}))
            .to_engine_config()
            .unwrap();
        assert!(cfg.minify_css);
        assert!(diagnostics.is_empty());

        let (cfg, diagnostics) = parse(json!({"minifyCss": {"lib": "swc"}}))
            .to_engine_config()
            .unwrap();
        assert!(cfg.minify_css);
        assert_eq!(diagnostics[0].option, "minifyCss");
    }

    #[test]
    fn test_collapse_none_is_an_error() {
        let result = parse(json!({"collapseWhitespaces": "none"})).to_engine_config();
        assert!(matches!(
            result,
            Err(MinifyError::UnsupportedOption { key: "collapseWhitespaces", .. })
        ));

        assert!(parse(json!({"collapseWhitespaces": "advanced-conservative"}))
            .to_engine_config()
            .is_ok());
    }

    #[test]
    fn test_collapse_only_metadata_is_an_error() {
        let result = parse(json!({"collapseWhitespaces": "only-metadata"})).to_engine_config();
        assert!(matches!(
            result,
            Err(MinifyError::UnsupportedOption { key: "collapseWhitespaces", .. })
        ));
    }

    #[test]
    fn test_collapse_modes_other_than_all_reported() {
        for mode in ["smart", "conservative", "advanced-conservative"] {
            let (_, diagnostics) = parse(json!({"collapseWhitespaces": mode}))
                .to_engine_config()
                .unwrap();
            assert_eq!(diagnostics.len(), 1, "{mode}");
            assert_eq!(diagnostics[0].option, "collapseWhitespaces");
        }

        let (_, diagnostics) = parse(json!({"collapseWhitespaces": "all"}))
            .to_engine_config()
            .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_minify_js_forms() {
        let (cfg, diagnostics) = parse(json!({"minifyJs": false})).to_engine_config().unwrap();
        assert!(!cfg.minify_js);
        assert!(diagnostics.is_empty());

        let (cfg, diagnostics) = parse(json!({"minifyJs": {"minifier": {}}}))
            .to_engine_config()
            .unwrap();
        assert!(cfg.minify_js);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].option, "minifyJs");
    }

    #[test]
    fn test_json_and_additional_targets_reported() {
        let options = parse(json!({
            "minifyJson": false,
            "minifyAdditionalScriptsContent": [["text/template", "html"]],
            "minifyAdditionalAttributes": [["x", "css"]],
        }));

        let (_, diagnostics) = options.to_engine_config().unwrap();
        let names: Vec<&str> = diagnostics.iter().map(|d| d.option.as_str()).collect();

        assert_eq!(
            names,
            vec!["minifyJson", "minifyAdditionalScriptsContent", "minifyAdditionalAttributes"]
        );
    }

    #[test]
    fn test_empty_additional_targets_are_quiet() {
        let options = parse(json!({
            "minifyJson": true,
            "minifyAdditionalScriptsContent": [],
            "minifyAdditionalAttributes": null,
        }));

        let (_, diagnostics) = options.to_engine_config().unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_collapse_mode_rejected() {
        let result: Result<MarkupOptions, _> =
            serde_json::from_value(json!({"collapseWhitespaces": "everything"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unsupported_requests_become_diagnostics() {
        let options = parse(json!({
            "sortAttributes": true,
            "quotes": true,
            "normalizeAttributes": false,
            "preserveComments": ["^!"],
        }));

        let (_, diagnostics) = options.to_engine_config().unwrap();
        let names: Vec<&str> = diagnostics.iter().map(|d| d.option.as_str()).collect();

        assert!(names.contains(&"sortAttributes"));
        assert!(names.contains(&"quotes"));
        assert!(names.contains(&"normalizeAttributes"));
        assert!(names.contains(&"preserveComments"));
    }

    #[test]
    fn test_keep_comments() {
        let (cfg, diagnostics) = parse(json!({"removeComments": false, "preserveComments": ["x"]}))
            .to_engine_config()
            .unwrap();
        assert!(cfg.keep_comments);
        assert!(diagnostics.is_empty());
    }
}
