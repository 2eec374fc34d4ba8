//! Raw byte recovery for tokens that decode lossily
//!
//! A tokenizer decodes a lone fragment of a multi-byte character to U+FFFD.
//! The underlying bytes are still visible in the vocabulary piece:
//! - SentencePiece byte fallback spells them as `<0xE3>`
//! - GPT-2 style byte-level BPE maps every byte to a printable character

use rustc_hash::FxHashMap;

/// Inverse of the GPT-2 `bytes_to_unicode` mapping
pub struct ByteLevelTable {
    char_to_byte: FxHashMap<char, u8>,
}

impl ByteLevelTable {
    pub fn new() -> Self {
        let printable = |b: u8| matches!(b, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF);

        let mut char_to_byte = FxHashMap::default();
        let mut shifted = 0u32;
        for b in 0..=255u8 {
            let c = if printable(b) {
                b as char
            } else {
                shifted += 1;
                // 256 + n never hits a surrogate, so this is always Some
                match char::from_u32(255 + shifted) {
                    Some(c) => c,
                    None => continue,
                }
            };
            char_to_byte.insert(c, b);
        }

        ByteLevelTable { char_to_byte }
    }

    /// Bytes behind a byte-level piece, or `None` if a char is outside the alphabet
    pub fn decode(&self, piece: &str) -> Option<Vec<u8>> {
        piece
            .chars()
            .map(|c| self.char_to_byte.get(&c).copied())
            .collect()
    }

    /// Recover raw bytes from a vocabulary piece
    pub fn recover(&self, piece: &str) -> Option<Vec<u8>> {
        parse_byte_fallback(piece)
            .map(|b| vec![b])
            .or_else(|| self.decode(piece))
    }
}

impl Default for ByteLevelTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a SentencePiece byte-fallback piece such as `<0xE3>`
pub fn parse_byte_fallback(piece: &str) -> Option<u8> {
    let hex = piece.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}
