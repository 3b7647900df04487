//! The `minify-html-css` command line: argument parsing and file handling.

mod args;
mod run;

pub use args::{help_text, parse_args, CliError, Command, MinifyRequest};
pub use run::{minify_file, run, AppError, Minified};
