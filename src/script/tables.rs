//! Unicode range tables for Japanese script detection
//!
//! Handles:
//! - Code point → script class lookup (Hiragana, Katakana, Kanji, ...)
//! - Japanese-relatedness and pure-script predicates
//! - Interval queries used by the partial UTF-8 predicates

use serde::Serialize;

/// Script class of a Japanese-related code point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptClass {
    Hiragana,
    /// Full-width Katakana, including phonetic extensions and the middle dot
    KatakanaFull,
    /// Half-width Katakana (U+FF65-U+FF9F)
    KatakanaHalf,
    /// CJK ideographs: unified, extension A-G and compatibility blocks
    Kanji,
    /// CJK punctuation, full-width symbols, half-width brackets, yen sign
    JpPunctSymbol,
    /// Full-width digits and Latin letters
    FullwidthAlnum,
}

impl ScriptClass {
    /// Hiragana, full-width Katakana or Kanji. Half-width Katakana does not count.
    pub fn is_pure_script(self) -> bool {
        matches!(
            self,
            ScriptClass::Hiragana | ScriptClass::KatakanaFull | ScriptClass::Kanji
        )
    }
}

/// Inclusive code point range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeRange {
    pub start: u32,
    pub end: u32,
}

impl CodeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        CodeRange { start, end }
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.end
    }

    /// Whether `[lo, hi]` overlaps this range
    pub fn intersects(&self, lo: u32, hi: u32) -> bool {
        lo <= self.end && self.start <= hi
    }
}

/// Immutable script tables, built once and passed to the classifier.
///
/// Entries are checked in order, so narrower ranges that sit inside a wider
/// block (full-width digits inside the full-width ASCII block) come first.
#[derive(Clone, Debug)]
pub struct ScriptTables {
    entries: Vec<(CodeRange, ScriptClass)>,
}

impl ScriptTables {
    /// Build the standard Japanese tables
    pub fn japanese() -> Self {
        use ScriptClass::*;

        let entries = vec![
            (CodeRange::new(0x3040, 0x309F), Hiragana),
            (CodeRange::new(0x30A0, 0x30FF), KatakanaFull),
            (CodeRange::new(0x31F0, 0x31FF), KatakanaFull),
            (CodeRange::new(0xFF65, 0xFF9F), KatakanaHalf),
            (CodeRange::new(0x4E00, 0x9FFF), Kanji),
            (CodeRange::new(0x3400, 0x4DBF), Kanji),
            (CodeRange::new(0xF900, 0xFAFF), Kanji),
            (CodeRange::new(0x20000, 0x2EBEF), Kanji),
            (CodeRange::new(0x30000, 0x3134F), Kanji),
            (CodeRange::new(0xFF10, 0xFF19), FullwidthAlnum),
            (CodeRange::new(0xFF21, 0xFF3A), FullwidthAlnum),
            (CodeRange::new(0xFF41, 0xFF5A), FullwidthAlnum),
            (CodeRange::new(0xFF01, 0xFF5E), JpPunctSymbol),
            (CodeRange::new(0x3000, 0x303F), JpPunctSymbol),
            (CodeRange::new(0xFF61, 0xFF64), JpPunctSymbol),
            (CodeRange::new(0xFFE5, 0xFFE5), JpPunctSymbol),
        ];

        ScriptTables { entries }
    }

    /// Script class of `c`, or `None` when `c` is not Japanese-related
    pub fn class_of(&self, c: char) -> Option<ScriptClass> {
        let cp = c as u32;
        self.entries
            .iter()
            .find(|(range, _)| range.contains(cp))
            .map(|&(_, class)| class)
    }

    /// Kana, Kanji, Japanese punctuation/symbols or full-width ASCII
    pub fn is_japanese_related_char(&self, c: char) -> bool {
        self.class_of(c).is_some()
    }

    /// Hiragana, full-width Katakana or Kanji only
    pub fn is_pure_japanese_script_char(&self, c: char) -> bool {
        self.class_of(c).is_some_and(ScriptClass::is_pure_script)
    }

    pub fn is_katakana_half(&self, c: char) -> bool {
        self.class_of(c) == Some(ScriptClass::KatakanaHalf)
    }

    pub fn is_fullwidth_alnum(&self, c: char) -> bool {
        self.class_of(c) == Some(ScriptClass::FullwidthAlnum)
    }

    /// Every Japanese-related range, in table order
    pub fn ranges(&self) -> impl Iterator<Item = CodeRange> + '_ {
        self.entries.iter().map(|&(range, _)| range)
    }

    /// Whether a code point in `[lo, hi]` is Japanese-related
    pub fn intersects_japanese(&self, lo: u32, hi: u32) -> bool {
        self.entries
            .iter()
            .any(|(range, _)| range.intersects(lo, hi))
    }

    /// Japanese-relatedness on a raw code point (surrogates and
    /// out-of-range values are never Japanese)
    pub fn is_japanese_code_point(&self, cp: u32) -> bool {
        char::from_u32(cp).is_some_and(|c| self.is_japanese_related_char(c))
    }

    /// Token made only of symbols: no alphanumerics, whitespace,
    /// Japanese-related characters or ASCII letters. Empty strings never match.
    pub fn is_special_char_pattern(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().all(|c| {
                !c.is_alphanumeric()
                    && !c.is_whitespace()
                    && !c.is_ascii_alphabetic()
                    && !self.is_japanese_related_char(c)
            })
    }
}

impl Default for ScriptTables {
    fn default() -> Self {
        Self::japanese()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_japanese_related_char() {
        let tables = ScriptTables::japanese();
        let cases = [
            ('あ', true),
            ('ア', true),
            ('漢', true),
            ('。', true),
            ('　', true),
            ('￥', true),
            ('ｶ', true),
            ('Ａ', true),
            ('！', true),
            ('A', false),
            ('1', false),
            ('é', false),
        ];
        for (c, expected) in cases {
            assert_eq!(tables.is_japanese_related_char(c), expected, "{c:?}");
        }
    }

    #[test]
    fn test_is_pure_japanese_script_char() {
        let tables = ScriptTables::japanese();
        assert!(tables.is_pure_japanese_script_char('あ'));
        assert!(tables.is_pure_japanese_script_char('ア'));
        assert!(tables.is_pure_japanese_script_char('漢'));
        assert!(tables.is_pure_japanese_script_char('𠀋'));
        assert!(!tables.is_pure_japanese_script_char('。'));
        assert!(!tables.is_pure_japanese_script_char('ｶ'));
        assert!(!tables.is_pure_japanese_script_char('Ａ'));
        assert!(!tables.is_pure_japanese_script_char('A'));
    }

    #[test]
    fn test_fullwidth_digits_win_over_symbol_block() {
        let tables = ScriptTables::japanese();
        assert_eq!(tables.class_of('５'), Some(ScriptClass::FullwidthAlnum));
        assert_eq!(tables.class_of('ｚ'), Some(ScriptClass::FullwidthAlnum));
        assert_eq!(tables.class_of('＃'), Some(ScriptClass::JpPunctSymbol));
    }

    #[test]
    fn test_is_special_char_pattern() {
        let tables = ScriptTables::japanese();
        assert!(tables.is_special_char_pattern("!!!"));
        assert!(tables.is_special_char_pattern("@#$"));
        assert!(tables.is_special_char_pattern("→"));
        assert!(!tables.is_special_char_pattern("abc"));
        assert!(!tables.is_special_char_pattern("あいう"));
        assert!(!tables.is_special_char_pattern("! !"));
        assert!(!tables.is_special_char_pattern("、"));
        assert!(!tables.is_special_char_pattern(""));
    }

    #[test]
    fn test_intersects_japanese() {
        let tables = ScriptTables::japanese();
        assert!(tables.intersects_japanese(0x3000, 0x3FFF));
        assert!(!tables.intersects_japanese(0x0000, 0x0FFF));
        assert!(!tables.intersects_japanese(0xA000, 0xAFFF));
        assert!(tables.intersects_japanese(0x20000, 0x3FFFF));
    }
}
