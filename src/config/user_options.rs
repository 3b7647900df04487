//! User option files
//!
//! An option file holds one table per adapter:
//!
//! ```toml
//! [css]
//! minify = true
//! unusedSymbols = ["legacy"]
//!
//! [html]
//! removeComments = false
//! ```
//!
//! TOML is the default format; files ending in `.json` are read as JSON
//! with the same shape.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::file_type::FileType;
use mhc_options::{as_tree, is_plain_tree, Tree};

/// Per-adapter user options loaded from a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserOptions {
    /// Options for the style sheet adapter
    pub css: Option<Tree>,

    /// Options for the markup adapter
    pub html: Option<Tree>,

    /// File the options came from (None when built in code)
    pub path: Option<PathBuf>,
}

impl UserOptions {
    /// Load an option file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let root = if is_json {
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?
        } else {
            Self::parse_toml(&contents)?
        };

        let mut options = Self::from_value(root)?;
        options.path = Some(path.to_path_buf());

        debug!(
            path = %path.display(),
            css = options.css.is_some(),
            html = options.html.is_some(),
            "loaded user options"
        );

        Ok(options)
    }

    /// Parse TOML text into a JSON value
    pub fn parse_toml(contents: &str) -> Result<Value, ConfigError> {
        let toml_value: toml::Value = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
        Ok(toml_to_json(toml_value))
    }

    /// Split a root tree into the per-adapter sections
    pub fn from_value(root: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut root) = root else {
            return Err(ConfigError::Shape("the option file must contain a table".to_string()));
        };

        Ok(Self {
            css: Self::section(&mut root, "css")?,
            html: Self::section(&mut root, "html")?,
            path: None,
        })
    }

    fn section(root: &mut Tree, name: &str) -> Result<Option<Tree>, ConfigError> {
        match root.remove(name) {
            None => Ok(None),
            Some(value) if is_plain_tree(&value) => Ok(as_tree(&value).cloned()),
            Some(_) => Err(ConfigError::Shape(format!("[{}] must be a table", name))),
        }
    }

    /// Options for the adapter handling `file_type`
    pub fn for_type(&self, file_type: FileType) -> Option<&Tree> {
        match file_type {
            FileType::Css => self.css.as_ref(),
            FileType::Html => self.html.as_ref(),
        }
    }
}

/// Convert a TOML value to a JSON value
///
/// Datetimes become strings; floats JSON cannot represent become null.
pub fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: Tree = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}

/// Option file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read option file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid option file: {0}")]
    Shape(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_toml_file() {
        let mut temp = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(temp, "[css]").unwrap();
        writeln!(temp, "minify = false").unwrap();
        writeln!(temp, "unusedSymbols = [\"a\", \"b\"]").unwrap();
        writeln!(temp, "[css.targets]").unwrap();
        writeln!(temp, "chrome = 6225920").unwrap();

        let options = UserOptions::load(temp.path()).unwrap();

        let css = options.css.as_ref().unwrap();
        assert_eq!(css["minify"], false);
        assert_eq!(css["unusedSymbols"], json!(["a", "b"]));
        assert_eq!(css["targets"]["chrome"], 6225920);
        assert!(options.html.is_none());
        assert_eq!(options.path.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_load_json_file() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp, r#"{{"html": {{"removeComments": false}}}}"#).unwrap();

        let options = UserOptions::load(temp.path()).unwrap();

        assert_eq!(
            options.for_type(FileType::Html).unwrap()["removeComments"],
            false
        );
        assert!(options.for_type(FileType::Css).is_none());
    }

    #[test]
    fn test_missing_file() {
        let result = UserOptions::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let result = UserOptions::parse_toml("[css\nminify = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_section_must_be_table() {
        let result = UserOptions::from_value(json!({"css": [1, 2]}));
        assert!(matches!(result, Err(ConfigError::Shape(_))));

        let result = UserOptions::from_value(json!("css"));
        assert!(matches!(result, Err(ConfigError::Shape(_))));
    }

    #[test]
    fn test_unknown_sections_ignored() {
        let options = UserOptions::from_value(json!({"js": {"x": 1}})).unwrap();
        assert_eq!(options, UserOptions::default());
    }

    #[test]
    fn test_toml_to_json_datetime() {
        let value = UserOptions::parse_toml("stamp = 1979-05-27T07:32:00Z").unwrap();
        assert_eq!(value["stamp"], "1979-05-27T07:32:00Z");
    }
}
