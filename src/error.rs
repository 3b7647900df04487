//! Errors raised by the minifier adapters.

/// Unrecoverable adapter failure.
///
/// Recoverable problems (invalid rules under error recovery, options the
/// markup engine cannot honor) are reported in the output instead.
#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("Unsupported option {key}: {reason}")]
    UnsupportedOption { key: &'static str, reason: String },

    #[error("Invalid CSS module pattern: {0}")]
    CssModulePattern(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Minify(String),

    #[error("{0}")]
    Print(String),

    #[error("Minified output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
