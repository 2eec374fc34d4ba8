//! Token analysis: category assignment over a whole vocabulary
//!
//! # Components
//! - `category.rs`: Category (exclusive) and ScriptTag (overlapping) definitions
//! - `classifier.rs`: TokenClassifier rule chain and partial byte handling
//! - `result.rs`: ClassificationResult id sets and counts

pub mod category;
pub mod classifier;
pub mod result;

pub use category::{Category, ScriptTag, TagSet};
pub use classifier::{TokenClass, TokenClassifier};
pub use result::ClassificationResult;
