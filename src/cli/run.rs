//! Executes a parsed minification request.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::args::{CliError, MinifyRequest};
use crate::config::{ConfigError, UserOptions};
use crate::error::MinifyError;
use crate::file_type::FileType;
use crate::{css, html};

/// Anything that can stop a run
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Minify(#[from] MinifyError),

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Minified content plus what the engine reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minified {
    pub file_type: FileType,
    pub code: String,
    pub diagnostics: Vec<String>,
}

/// Read, detect and minify the input of `request`
pub fn minify_file(request: &MinifyRequest) -> Result<Minified, AppError> {
    let input_path = absolute(&request.input)?;
    let content = fs::read_to_string(&input_path).map_err(|source| AppError::Read {
        path: input_path.clone(),
        source,
    })?;

    let file_type = request.resolve_file_type()?;

    let user_options = match &request.config {
        Some(path) => UserOptions::load(path)?,
        None => UserOptions::default(),
    };
    let options = user_options.for_type(file_type);

    debug!(
        input = %input_path.display(),
        %file_type,
        user_options = options.is_some(),
        "minifying file"
    );

    let minified = match file_type {
        FileType::Html => {
            let output = html::minify_html(&content, options)?;
            Minified {
                file_type,
                code: output.code,
                diagnostics: output.errors.iter().map(ToString::to_string).collect(),
            }
        }
        FileType::Css => {
            let output = css::minify_css(&content, options)?;
            Minified {
                file_type,
                code: output.code,
                diagnostics: output.warnings,
            }
        }
    };

    Ok(minified)
}

/// Minify and deliver the result: to the output file when one is given,
/// otherwise to `stdout`.
///
/// Nothing is written anywhere unless minification succeeded.
pub fn run(request: &MinifyRequest, stdout: &mut impl Write) -> Result<(), AppError> {
    let minified = minify_file(request)?;

    match &request.output {
        Some(output) => {
            let output_path = absolute(output)?;
            fs::write(&output_path, &minified.code).map_err(|source| AppError::Write {
                path: output_path.clone(),
                source,
            })?;
            info!(output = %output_path.display(), bytes = minified.code.len(), "wrote minified output");
            writeln!(
                stdout,
                "Minified {} written to: {}",
                request.input.display(),
                output_path.display()
            )
            .map_err(|source| AppError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        }
        None => {
            writeln!(stdout, "{}", minified.code).map_err(|source| AppError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        }
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|source| AppError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    Ok(cwd.join(path))
}
