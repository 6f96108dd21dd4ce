//! Shared utility modules

pub mod text;

pub use text::{escape_html, escape_markdown};
