//! minify-html-css CLI
//!
//! Entry point for the `minify-html-css` command-line tool.

use minify_html_css::cli::{self, CliError, Command};
use std::io;
use std::process;

fn main() {
    minify_html_css::logging::init();

    let command = match cli::parse_args(std::env::args_os()) {
        Ok(command) => command,
        Err(e) => {
            report_cli_error(&e);
            process::exit(1);
        }
    };

    match command {
        Command::Help(text) => {
            println!("{}", text.trim_end());
        }
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Command::Minify(request) => {
            let stdout = io::stdout();
            if let Err(e) = cli::run(&request, &mut stdout.lock()) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn report_cli_error(e: &CliError) {
    if e.is_prefixed() {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", e);
    }
    if e.shows_usage() {
        println!("{}", cli::help_text().trim_end());
    }
}
