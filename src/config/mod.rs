//! User configuration
//!
//! Option files supply the user layer that the adapters merge over their
//! built-in defaults.

mod user_options;

pub use user_options::{toml_to_json, ConfigError, UserOptions};
