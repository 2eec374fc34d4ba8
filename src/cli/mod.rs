//! CLI Interface: terminal rendering of analysis results
//!
//! # Components
//! - `display.rs`: Colored summary and per-category token examples

pub mod display;

pub use display::Display;
