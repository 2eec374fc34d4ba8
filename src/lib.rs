//! Japanese token vocabulary analyzer
//!
//! Classifies every id of an LLM tokenizer vocabulary by the Japanese script
//! it contains, and exports the resulting id lists for logit biasing.
//!
//! # Modules
//! - `script`: Unicode tables and partial UTF-8 predicates
//! - `vocab`: Token surface forms and tokenizer loading
//! - `analysis`: Category rule chain and per-run results
//! - `output`: JSON report and TXT id lists
//! - `bias`: Logit bias application and API payloads
//! - `cli`: Colored console summary

pub mod analysis;
pub mod bias;
pub mod cli;
pub mod error;
pub mod output;
pub mod script;
pub mod vocab;

pub use analysis::{Category, ClassificationResult, ScriptTag, TokenClassifier};
pub use error::{AnalyzerError, Result};
pub use script::ScriptTables;
pub use vocab::{TokenText, Vocabulary};
