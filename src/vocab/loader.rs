//! Hugging Face `tokenizer.json` loading
//!
//! Decodes every id one at a time (special tokens kept) and recovers raw
//! bytes for ids whose decode is lossy.

use super::bytes::ByteLevelTable;
use super::{TokenText, Vocabulary};
use crate::error::{AnalyzerError, Result};
use indicatif::ProgressBar;
use std::path::Path;
use tokenizers::Tokenizer;

/// Load a vocabulary from a `tokenizer.json` file
pub fn from_tokenizer_file(path: &Path, progress: Option<&ProgressBar>) -> Result<Vocabulary> {
    if !path.exists() {
        return Err(AnalyzerError::invalid(format!(
            "tokenizer file not found: {}",
            path.display()
        )));
    }

    let tokenizer = Tokenizer::from_file(path).map_err(|e| {
        AnalyzerError::invalid(format!("failed to load tokenizer {}: {}", path.display(), e))
    })?;

    from_tokenizer(&tokenizer, progress)
}

/// Build a vocabulary from an already loaded tokenizer.
///
/// The size excludes added tokens, matching the base vocabulary the model
/// was trained with; added tokens flagged `special` form the special set.
pub fn from_tokenizer(tokenizer: &Tokenizer, progress: Option<&ProgressBar>) -> Result<Vocabulary> {
    let size = tokenizer.get_vocab_size(false);
    let byte_level = ByteLevelTable::new();

    if let Some(pb) = progress {
        pb.set_length(size as u64);
    }

    let mut entries = Vec::with_capacity(size);
    let mut raw_count = 0usize;
    for id in 0..size as u32 {
        let decoded = match tokenizer.decode(&[id], false) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Token ID {} failed to decode: {}", id, e);
                String::new()
            }
        };
        let piece = tokenizer.id_to_token(id);
        let text = token_text(decoded, piece.as_deref(), &byte_level);
        if matches!(text, TokenText::RawBytes(_)) {
            raw_count += 1;
        }
        entries.push(text);

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    let special_ids: Vec<u32> = tokenizer
        .get_added_tokens_decoder()
        .iter()
        .filter(|(_, token)| token.special)
        .map(|(&id, _)| id)
        .collect();

    tracing::info!(
        "Tokenizer loaded. Vocab size: {}, special IDs: {}, partial byte tokens: {}",
        size,
        special_ids.len(),
        raw_count
    );

    Vocabulary::from_texts(entries, special_ids)
}

/// Pick the surface form for one id.
///
/// Clean decodes are kept as text. A decode containing U+FFFD is replaced by
/// the piece's raw bytes when they can be recovered.
pub fn token_text(decoded: String, piece: Option<&str>, byte_level: &ByteLevelTable) -> TokenText {
    if !decoded.contains(char::REPLACEMENT_CHARACTER) {
        return TokenText::DecodedText(decoded);
    }

    match piece.and_then(|p| byte_level.recover(p)) {
        Some(bytes) => TokenText::from_bytes(bytes),
        None => TokenText::DecodedText(decoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_decode_is_kept() {
        let table = ByteLevelTable::new();
        let text = token_text("日本".to_string(), Some("æĹ¥æľ¬"), &table);
        assert_eq!(text, TokenText::DecodedText("日本".to_string()));
    }

    #[test]
    fn test_lossy_decode_uses_byte_fallback() {
        let table = ByteLevelTable::new();
        let text = token_text("\u{FFFD}".to_string(), Some("<0xE6>"), &table);
        assert_eq!(text, TokenText::RawBytes(vec![0xE6]));
    }

    #[test]
    fn test_lossy_decode_uses_byte_level_piece() {
        let table = ByteLevelTable::new();
        let piece: String = [0xE8u8, 0xAA].iter().map(|&b| b as char).collect();
        let text = token_text("\u{FFFD}".to_string(), Some(&piece), &table);
        assert_eq!(text, TokenText::RawBytes(vec![0xE8, 0xAA]));
    }

    #[test]
    fn test_unrecoverable_lossy_decode_stays_text() {
        let table = ByteLevelTable::new();
        let text = token_text("\u{FFFD}".to_string(), Some("▁\u{FFFD}"), &table);
        assert_eq!(text, TokenText::DecodedText("\u{FFFD}".to_string()));
        let none = token_text("\u{FFFD}".to_string(), None, &table);
        assert_eq!(none, TokenText::DecodedText("\u{FFFD}".to_string()));
    }

    /// Byte-level BPE: `<s>` special, two ASCII pieces, 日 and its first two bytes
    const BYTE_LEVEL_TOKENIZER: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "<s>", "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "ByteLevel", "add_prefix_space": false,
                          "trim_offsets": true, "use_regex": true},
        "post_processor": null,
        "decoder": {"type": "ByteLevel", "add_prefix_space": true,
                    "trim_offsets": true, "use_regex": true},
        "model": {
            "type": "BPE",
            "dropout": null,
            "unk_token": null,
            "continuing_subword_prefix": null,
            "end_of_word_suffix": null,
            "fuse_unk": false,
            "byte_fallback": false,
            "vocab": {"<s>": 0, "a": 1, "b": 2, "æĹ¥": 3, "æĹ": 4},
            "merges": []
        }
    }"#;

    #[test]
    fn test_from_tokenizer_file_byte_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, BYTE_LEVEL_TOKENIZER).unwrap();

        let vocab = from_tokenizer_file(&path, None).unwrap();
        assert_eq!(vocab.size(), 5);
        assert!(vocab.is_special(0));
        assert_eq!(vocab.special_ids().len(), 1);

        assert_eq!(vocab.get(1), Some(&TokenText::from("a")));
        assert_eq!(vocab.get(3), Some(&TokenText::from("日")));
        assert_eq!(vocab.get(4), Some(&TokenText::RawBytes(vec![0xE6, 0x97])));
    }

    #[test]
    fn test_from_tokenizer_tracks_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, BYTE_LEVEL_TOKENIZER).unwrap();

        let pb = ProgressBar::hidden();
        from_tokenizer_file(&path, Some(&pb)).unwrap();
        assert_eq!(pb.length(), Some(5));
        assert_eq!(pb.position(), 5);
    }

    #[test]
    fn test_missing_file_is_invalid_input() {
        let result = from_tokenizer_file(Path::new("/nonexistent/tokenizer.json"), None);
        assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
    }
}
