//! minify-html-css - option handling and a CLI around two minifiers
//!
//! HTML fragments go through `minify-html`, style sheets through
//! `lightningcss`. Each adapter starts from safe defaults and layers user
//! options on top with [`mhc_options::merge_options`], keeping the keys that
//! wire up the engine out of the user's reach.

pub mod cli;
pub mod config;
pub mod css;
mod error;
mod file_type;
pub mod html;
pub mod logging;
mod toggle;

pub use css::{minify_css, CssOutput};
pub use error::MinifyError;
pub use file_type::{FileType, UnknownFileType};
pub use html::{minify_html, Diagnostic, HtmlOutput};
pub use mhc_options::{merge_options, MergeOptions, Tree};
pub use toggle::Toggle;
