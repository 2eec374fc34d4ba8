//! Script detection: Unicode tables and partial UTF-8 predicates
//!
//! # Components
//! - `tables.rs`: ScriptTables (code point ranges, per-char predicates)
//! - `utf8.rs`: Byte-level checks for truncated multi-byte characters

pub mod tables;
pub mod utf8;

pub use tables::{CodeRange, ScriptClass, ScriptTables};
pub use utf8::{
    can_be_japanese_utf8, can_end_japanese_utf8, is_complete_japanese_utf8, split_partial,
    Utf8Split,
};
