//! Option trees and the deep merge used to layer user overrides on top of
//! minifier defaults.
//!
//! The merge is schema-agnostic: it knows nothing about any engine's option
//! names. Callers protect engine wiring with a disabled key list and can
//! special-case a single top-level key through an override callback.

mod merge;
mod tree;

pub use merge::{deep_merge, merge_options, MergeOptions, OnKey};
pub use tree::{as_tree, is_plain_tree, Tree};
