//! Normalization functions applied to every field of a CNPJ table.
//!
//! - **text**: accent stripping, upper-casing and whitespace collapsing

pub mod text;

pub use text::{normalize_row, normalize_text, normalize_value};
