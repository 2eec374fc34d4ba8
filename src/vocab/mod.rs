//! Vocabulary: token id → decoded surface form
//!
//! Handles:
//! - Token text as decoded string or raw (partial UTF-8) bytes
//! - Special id bookkeeping
//! - Validation of externally supplied id → text mappings
//!
//! # Components
//! - `bytes.rs`: Raw byte recovery for lossy decodes (byte fallback, byte-level BPE)
//! - `loader.rs`: Hugging Face `tokenizer.json` loading

pub mod bytes;
pub mod loader;

use crate::error::{AnalyzerError, Result};
use rustc_hash::FxHashSet;

/// Surface form of one token
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenText {
    /// Complete text as decoded by the tokenizer
    DecodedText(String),
    /// Bytes that do not form valid UTF-8 on their own
    RawBytes(Vec<u8>),
}

impl TokenText {
    /// Wrap bytes, keeping them raw only if they are not valid UTF-8
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => TokenText::DecodedText(text),
            Err(err) => TokenText::RawBytes(err.into_bytes()),
        }
    }

    /// Printable form for console output
    pub fn display(&self) -> String {
        match self {
            TokenText::DecodedText(text) => format!("{:?}", text),
            TokenText::RawBytes(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
                format!("<bytes {}>", hex.join(" "))
            }
        }
    }
}

impl From<&str> for TokenText {
    fn from(text: &str) -> Self {
        TokenText::DecodedText(text.to_string())
    }
}

/// Immutable vocabulary: one entry per id in `0..size`
#[derive(Clone, Debug)]
pub struct Vocabulary {
    /// Token ID → surface form
    entries: Vec<TokenText>,
    /// Reserved control tokens, excluded from classification
    special_ids: FxHashSet<u32>,
}

impl Vocabulary {
    /// Build from a dense list where the index is the token id
    pub fn from_texts(
        entries: Vec<TokenText>,
        special_ids: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnalyzerError::invalid("vocabulary is empty"));
        }
        Ok(Vocabulary {
            entries,
            special_ids: special_ids.into_iter().collect(),
        })
    }

    /// Build from `(id, text)` pairs.
    ///
    /// Every id in `0..size` must appear exactly once.
    pub fn new(
        size: usize,
        pairs: impl IntoIterator<Item = (u32, TokenText)>,
        special_ids: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        let mut slots: Vec<Option<TokenText>> = vec![None; size];

        for (id, text) in pairs {
            let slot = slots.get_mut(id as usize).ok_or_else(|| {
                AnalyzerError::invalid(format!(
                    "token id {} is outside the vocabulary size {}",
                    id, size
                ))
            })?;
            if slot.replace(text).is_some() {
                return Err(AnalyzerError::invalid(format!(
                    "token id {} appears more than once",
                    id
                )));
            }
        }

        let entries = slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| {
                slot.ok_or_else(|| {
                    AnalyzerError::invalid(format!("token id {} has no entry", id))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_texts(entries, special_ids)
    }

    /// Copy with additional special ids (e.g. from the command line)
    pub fn with_special_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.special_ids.extend(ids);
        self
    }

    /// Number of token ids
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Surface form of a token id
    pub fn get(&self, id: u32) -> Option<&TokenText> {
        self.entries.get(id as usize)
    }

    pub fn special_ids(&self) -> &FxHashSet<u32> {
        &self.special_ids
    }

    pub fn is_special(&self, id: u32) -> bool {
        self.special_ids.contains(&id)
    }

    /// `(id, text)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TokenText)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, text)| (id as u32, text))
    }
}
