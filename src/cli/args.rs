//! Command-line parsing
//!
//! Parsing never exits the process: every outcome, including `--help`, comes
//! back as a value so the caller decides what to print and which status to
//! exit with.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::file_type::FileType;

const EXAMPLES: &str = "\
Examples:
  minify-html-css input.html -o output.html
  minify-html-css -i styles.css -o styles.min.css
  minify-html-css -i index.html -t html
  minify-html-css input.html > output.html
  minify-html-css page.html -c options.toml";

#[derive(Debug, Parser)]
#[command(name = "minify-html-css")]
#[command(about = "Minify HTML fragments and CSS files", after_help = EXAMPLES)]
struct Args {
    /// Input file path (or use -i/--input)
    #[arg(value_name = "INPUT")]
    file: Option<PathBuf>,

    /// Input file path (required unless given as a positional argument)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// File type: html or css (auto-detected if not specified)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    file_type: Option<String>,

    /// Option file with [css] and [html] tables (TOML, or JSON by extension)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Display version number
    #[arg(short = 'v', long = "version")]
    version: bool,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the rendered help text
    Help(String),
    /// Print the version
    Version,
    /// Minify a file
    Minify(MinifyRequest),
}

/// A validated minification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Explicit `-t` value; detection happens in [`MinifyRequest::resolve_file_type`]
    pub file_type: Option<FileType>,
    pub config: Option<PathBuf>,
}

impl MinifyRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            file_type: None,
            config: None,
        }
    }

    /// The explicit type if given, otherwise the one implied by the extension
    pub fn resolve_file_type(&self) -> Result<FileType, CliError> {
        self.file_type
            .or_else(|| FileType::detect(&self.input))
            .ok_or(CliError::UndetectedType)
    }
}

/// Command-line errors. All of them exit with status 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("Input file is required")]
    MissingInput,

    #[error("Unknown option: {0}.")]
    UnknownOption(String),

    #[error("Unknown positional argument: {0}.")]
    UnknownPositional(String),

    #[error("Invalid file type. The file type must be \"html\" or \"css\"")]
    InvalidType(String),

    #[error("Could not detect file type. Please specify using -t option")]
    UndetectedType,

    /// Any other parse failure, already rendered by clap
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Whether the usage text should follow the error
    pub fn shows_usage(&self) -> bool {
        matches!(self, CliError::MissingInput)
    }

    /// Whether the message is printed after `Error: `. Argument errors
    /// are complete sentences and print bare.
    pub fn is_prefixed(&self) -> bool {
        matches!(
            self,
            CliError::MissingInput | CliError::InvalidType(_) | CliError::UndetectedType
        )
    }
}

/// Parse a full argv (program name first)
pub fn parse_args<I, T>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp => Ok(Command::Help(err.render().to_string())),
                ErrorKind::UnknownArgument => Err(unknown_argument(&err)),
                _ => Err(CliError::Usage(err.render().to_string().trim_end().to_string())),
            };
        }
    };

    if args.version {
        return Ok(Command::Version);
    }

    let input = match (args.file, args.input) {
        (Some(positional), Some(_)) => {
            return Err(CliError::UnknownPositional(positional.display().to_string()));
        }
        (Some(input), None) | (None, Some(input)) => input,
        (None, None) => return Err(CliError::MissingInput),
    };

    let file_type = match args.file_type {
        Some(name) => Some(name.parse::<FileType>().map_err(|_| CliError::InvalidType(name))?),
        None => None,
    };

    Ok(Command::Minify(MinifyRequest {
        input,
        output: args.output,
        file_type,
        config: args.config,
    }))
}

fn unknown_argument(err: &clap::Error) -> CliError {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) if arg.starts_with('-') => {
            // clap reports `--flag <VALUE>` style names for some errors
            let name = arg.split_whitespace().next().unwrap_or(arg);
            CliError::UnknownOption(name.to_string())
        }
        Some(ContextValue::String(arg)) => CliError::UnknownPositional(arg.clone()),
        _ => CliError::Usage(err.render().to_string().trim_end().to_string()),
    }
}

/// Rendered help text
pub fn help_text() -> String {
    Args::command().render_help().to_string()
}
