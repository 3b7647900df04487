//! Typed view of the merged style sheet options.
//!
//! Field names follow the camelCase option names users write in their
//! option trees. Keys this adapter does not know are ignored.

use lightningcss::css_modules::{Config as CssModulesConfig, Pattern};
use lightningcss::dependencies::DependencyOptions;
use lightningcss::printer::PseudoClasses;
use lightningcss::stylesheet::ParserFlags;
use lightningcss::targets::{Browsers, Targets};
use serde::Deserialize;

use crate::error::MinifyError;
use crate::toggle::Toggle;

/// Options understood by the style sheet engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    pub filename: String,
    pub minify: bool,
    pub targets: Option<BrowserTargets>,
    pub drafts: Drafts,
    pub non_standard: NonStandard,
    pub css_modules: Option<Toggle<CssModules>>,
    pub analyze_dependencies: Option<Toggle<AnalyzeDependencies>>,
    pub pseudo_classes: Option<PseudoClassNames>,
    pub unused_symbols: Vec<String>,
    pub error_recovery: bool,
}

/// Minimum browser versions, encoded as `major << 16 | minor << 8 | patch`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BrowserTargets {
    pub android: Option<u32>,
    pub chrome: Option<u32>,
    pub edge: Option<u32>,
    pub firefox: Option<u32>,
    pub ie: Option<u32>,
    pub ios_saf: Option<u32>,
    pub opera: Option<u32>,
    pub safari: Option<u32>,
    pub samsung: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Drafts {
    pub custom_media: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NonStandard {
    pub deep_selector_combinator: bool,
}

/// CSS modules settings. Unset switches keep the engine defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CssModules {
    pub pattern: Option<String>,
    pub dashed_idents: Option<bool>,
    pub animation: Option<bool>,
    pub grid: Option<bool>,
    pub container: Option<bool>,
    pub custom_idents: Option<bool>,
    pub pure: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeDependencies {
    pub preserve_imports: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PseudoClassNames {
    pub hover: Option<String>,
    pub active: Option<String>,
    pub focus: Option<String>,
    pub focus_visible: Option<String>,
    pub focus_within: Option<String>,
}

impl StyleOptions {
    pub fn targets(&self) -> Targets {
        match self.targets {
            Some(t) => Targets::from(Browsers {
                android: t.android,
                chrome: t.chrome,
                edge: t.edge,
                firefox: t.firefox,
                ie: t.ie,
                ios_saf: t.ios_saf,
                opera: t.opera,
                safari: t.safari,
                samsung: t.samsung,
            }),
            None => Targets::default(),
        }
    }

    pub fn parser_flags(&self) -> ParserFlags {
        let mut flags = ParserFlags::empty();
        if self.drafts.custom_media {
            flags |= ParserFlags::CUSTOM_MEDIA;
        }
        if self.non_standard.deep_selector_combinator {
            flags |= ParserFlags::DEEP_SELECTOR_COMBINATOR;
        }
        flags
    }

    pub fn css_modules_config(&self) -> Result<Option<CssModulesConfig<'_>>, MinifyError> {
        let modules = match &self.css_modules {
            None | Some(Toggle::Enabled(false)) => return Ok(None),
            Some(Toggle::Enabled(true)) => return Ok(Some(CssModulesConfig::default())),
            Some(Toggle::Config(modules)) => modules,
        };
        let mut config = CssModulesConfig::default();
        if let Some(source) = modules.pattern.as_deref() {
            config.pattern =
                Pattern::parse(source).map_err(|e| MinifyError::CssModulePattern(e.to_string()))?;
        }

        let switches = [
            (modules.dashed_idents, &mut config.dashed_idents),
            (modules.animation, &mut config.animation),
            (modules.grid, &mut config.grid),
            (modules.container, &mut config.container),
            (modules.custom_idents, &mut config.custom_idents),
            (modules.pure, &mut config.pure),
        ];
        for (value, field) in switches {
            if let Some(value) = value {
                *field = value;
            }
        }

        Ok(Some(config))
    }

    pub fn dependency_options(&self) -> Option<DependencyOptions> {
        self.analyze_dependencies
            .clone()
            .and_then(Toggle::into_config)
            .map(|deps| DependencyOptions {
                remove_imports: !deps.preserve_imports,
            })
    }

    pub fn pseudo_classes(&self) -> Option<PseudoClasses<'_>> {
        self.pseudo_classes.as_ref().map(|names| PseudoClasses {
            hover: names.hover.as_deref(),
            active: names.active.as_deref(),
            focus: names.focus.as_deref(),
            focus_visible: names.focus_visible.as_deref(),
            focus_within: names.focus_within.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> StyleOptions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = parse(json!({"minify": true, "notAnOption": [1, 2]}));
        assert!(options.minify);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result: Result<StyleOptions, _> = serde_json::from_value(json!({"minify": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle_forms() {
        let options = parse(json!({"cssModules": true}));
        assert!(options.css_modules_config().unwrap().is_some());

        let options = parse(json!({"cssModules": false}));
        assert!(options.css_modules_config().unwrap().is_none());

        let options = parse(json!({"cssModules": {"dashedIdents": true, "pattern": "[local]-x"}}));
        let config = options.css_modules_config().unwrap().unwrap();
        assert!(config.dashed_idents);
    }

    #[test]
    fn test_invalid_pattern() {
        let options = parse(json!({"cssModules": {"pattern": "[nope]"}}));
        assert!(matches!(
            options.css_modules_config(),
            Err(MinifyError::CssModulePattern(_))
        ));
    }

    #[test]
    fn test_parser_flags() {
        let options = parse(json!({
            "drafts": {"customMedia": true},
            "nonStandard": {"deepSelectorCombinator": true}
        }));
        let flags = options.parser_flags();
        assert!(flags.contains(ParserFlags::CUSTOM_MEDIA));
        assert!(flags.contains(ParserFlags::DEEP_SELECTOR_COMBINATOR));

        assert!(parse(json!({})).parser_flags().is_empty());
    }

    #[test]
    fn test_dependency_options() {
        let options = parse(json!({"analyzeDependencies": true}));
        assert!(options.dependency_options().unwrap().remove_imports);

        let options = parse(json!({"analyzeDependencies": {"preserveImports": true}}));
        assert!(!options.dependency_options().unwrap().remove_imports);

        assert!(parse(json!({})).dependency_options().is_none());
    }

    #[test]
    fn test_targets() {
        let options = parse(json!({"targets": {"chrome": 95 << 16, "ios_saf": 13 << 16}}));
        let targets = options.targets.unwrap();
        assert_eq!(targets.chrome, Some(95 << 16));
        assert_eq!(targets.ios_saf, Some(13 << 16));
        assert!(targets.firefox.is_none());
    }
}
