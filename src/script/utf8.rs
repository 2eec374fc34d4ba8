//! Partial UTF-8 sequence detection
//!
//! BPE vocabularies split multi-byte characters across tokens, so a single
//! token can hold the first one or two bytes of a Kanji, or its last byte.
//! These predicates work on the raw bytes of such fragments.

use super::tables::ScriptTables;

/// Lowest code point that needs a 4-byte encoding
const FOUR_BYTE_MIN: u32 = 0x10000;
const MAX_CODE_POINT: u32 = 0x10FFFF;

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Payload bits of a lead byte and the total length it announces.
/// Only 3- and 4-byte sequences can encode Japanese text.
fn multibyte_lead(lead: u8) -> Option<(u32, usize)> {
    match lead {
        0xE0..=0xEF => Some(((lead & 0x0F) as u32, 3)),
        0xF0..=0xF4 => Some(((lead & 0x07) as u32, 4)),
        _ => None,
    }
}

/// Whether `bytes` can be the start of a Japanese character's encoding.
///
/// The lead byte fixes the sequence length; the known payload bits select a
/// contiguous code point interval (unknown trailing bits range over 0..=all
/// ones). The check passes if that interval touches a Japanese range. This
/// over-approximates: overlong or otherwise invalid completions are not ruled
/// out.
pub fn can_be_japanese_utf8(tables: &ScriptTables, bytes: &[u8]) -> bool {
    let Some((&lead, rest)) = bytes.split_first() else {
        return false;
    };
    let Some((lead_bits, needed)) = multibyte_lead(lead) else {
        return false;
    };
    if bytes.len() > needed || !rest.iter().all(|&b| is_continuation(b)) {
        return false;
    }

    let known = rest
        .iter()
        .fold(lead_bits, |cp, &b| (cp << 6) | (b & 0x3F) as u32);
    let shift = 6 * (needed - bytes.len()) as u32;
    let lo = known << shift;
    let hi = lo | ((1u32 << shift) - 1);

    tables.intersects_japanese(lo, hi)
}

/// Exactly one complete 3- or 4-byte character that is Japanese-related
pub fn is_complete_japanese_utf8(tables: &ScriptTables, bytes: &[u8]) -> bool {
    if !matches!(bytes.len(), 3 | 4) {
        return false;
    }
    let Ok(decoded) = std::str::from_utf8(bytes) else {
        return false;
    };
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => tables.is_japanese_related_char(c),
        _ => false,
    }
}

/// Whether `bytes` can be the end of a Japanese character's encoding.
///
/// `bytes` must be one to three continuation bytes. Their payload fixes the
/// low bits of the code point; the remaining high bits come from the missing
/// lead (and middle) bytes, so candidate code points form the progression
/// `low + k * 2^known_bits`. The check passes if some member lies in a
/// Japanese range and in the code point span of a 3- or 4-byte sequence.
pub fn can_end_japanese_utf8(tables: &ScriptTables, bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(|&b| is_continuation(b)) {
        return false;
    }

    let known_bits = 6 * bytes.len() as u32;
    let low = bytes
        .iter()
        .fold(0u32, |cp, &b| (cp << 6) | (b & 0x3F) as u32);
    let step = 1u32 << known_bits;

    // (total sequence length, valid code point span for that length)
    let spans = [(3usize, 0x800u32, FOUR_BYTE_MIN - 1), (4, FOUR_BYTE_MIN, MAX_CODE_POINT)];

    spans
        .iter()
        .filter(|&&(total, _, _)| total > bytes.len())
        .any(|&(_, span_lo, span_hi)| {
            tables.ranges().any(|range| {
                let lo = range.start.max(span_lo);
                let hi = range.end.min(span_hi);
                if lo > hi {
                    return false;
                }
                // Smallest member of the progression that is >= lo
                let first = if lo <= low {
                    low
                } else {
                    low + (lo - low).div_ceil(step) * step
                };
                first <= hi
            })
        })
}

/// A byte sequence split into its decodable text and truncated fragments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utf8Split<'a> {
    /// Every complete, valid character, in order
    pub text: String,
    /// Continuation bytes before the first lead byte (tail of a character
    /// started in a previous token)
    pub head: &'a [u8],
    /// Incomplete sequence at the very end (start of a character finished
    /// in a following token)
    pub tail: &'a [u8],
    /// Count of bytes that are invalid anywhere else
    pub stray: usize,
}

/// Leading fragment length at which the suffix check narrows the code point
/// to a single candidate per 4-byte span. One or two continuation bytes can
/// end some character of every wide Japanese block.
const DISCRIMINATING_HEAD_LEN: usize = 3;

impl Utf8Split<'_> {
    /// Whether a truncated fragment can belong to a Japanese character.
    ///
    /// The trailing prefix is checked with `can_be_japanese_utf8`. A leading
    /// fragment only counts when it is the last three bytes of a 4-byte
    /// sequence.
    pub fn is_japanese_forming(&self, tables: &ScriptTables) -> bool {
        (!self.tail.is_empty() && can_be_japanese_utf8(tables, self.tail))
            || (self.head.len() == DISCRIMINATING_HEAD_LEN
                && can_end_japanese_utf8(tables, self.head))
    }
}

/// Split raw token bytes at UTF-8 fragment boundaries
pub fn split_partial(bytes: &[u8]) -> Utf8Split<'_> {
    let head_len = bytes.iter().take_while(|&&b| is_continuation(b)).count();
    let (head, mut rest) = bytes.split_at(head_len);

    let mut text = String::with_capacity(rest.len());
    let mut tail: &[u8] = &[];
    let mut stray = 0;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    text.push_str(valid);
                }
                match err.error_len() {
                    None => {
                        tail = after;
                        break;
                    }
                    Some(len) => {
                        stray += len;
                        rest = &after[len..];
                    }
                }
            }
        }
    }

    Utf8Split {
        text,
        head,
        tail,
        stray,
    }
}
