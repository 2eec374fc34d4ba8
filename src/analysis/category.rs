//! Category and tag definitions
//!
//! A token has exactly one primary `Category` and any number of `ScriptTag`s.

use serde::Serialize;
use std::fmt;

/// Primary, mutually exclusive classification of a token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PureJapaneseScript,
    ContainsJapanese,
    ContainsKatakanaHalf,
    ContainsFullwidthAscii,
    PureEnglish,
    ContainsDigit,
    SpecialCharPattern,
    Uncategorized,
}

impl Category {
    /// Every category, in rule order
    pub const ALL: [Category; 8] = [
        Category::PureJapaneseScript,
        Category::ContainsJapanese,
        Category::ContainsKatakanaHalf,
        Category::ContainsFullwidthAscii,
        Category::PureEnglish,
        Category::ContainsDigit,
        Category::SpecialCharPattern,
        Category::Uncategorized,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::PureJapaneseScript => "pure_japanese_script",
            Category::ContainsJapanese => "contains_japanese",
            Category::ContainsKatakanaHalf => "contains_katakana_half",
            Category::ContainsFullwidthAscii => "contains_fullwidth_ascii",
            Category::PureEnglish => "pure_english",
            Category::ContainsDigit => "contains_digit",
            Category::SpecialCharPattern => "special_char_pattern",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Whether the category marks Japanese content (the logit bias set)
    pub fn is_japanese(self) -> bool {
        matches!(
            self,
            Category::PureJapaneseScript
                | Category::ContainsJapanese
                | Category::ContainsKatakanaHalf
                | Category::ContainsFullwidthAscii
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-exclusive detail tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTag {
    ContainsHiragana,
    ContainsKatakanaFull,
    ContainsKatakanaHalf,
    ContainsKanji,
    ContainsJpPunctSymbol,
    ContainsFullwidthAscii,
    ContainsBasicEnglish,
    ContainsDigit,
    /// Truncated byte fragment that can complete to a Japanese character
    JapaneseForming,
}

impl ScriptTag {
    pub const ALL: [ScriptTag; 9] = [
        ScriptTag::ContainsHiragana,
        ScriptTag::ContainsKatakanaFull,
        ScriptTag::ContainsKatakanaHalf,
        ScriptTag::ContainsKanji,
        ScriptTag::ContainsJpPunctSymbol,
        ScriptTag::ContainsFullwidthAscii,
        ScriptTag::ContainsBasicEnglish,
        ScriptTag::ContainsDigit,
        ScriptTag::JapaneseForming,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScriptTag::ContainsHiragana => "contains_hiragana",
            ScriptTag::ContainsKatakanaFull => "contains_katakana_full",
            ScriptTag::ContainsKatakanaHalf => "contains_katakana_half",
            ScriptTag::ContainsKanji => "contains_kanji",
            ScriptTag::ContainsJpPunctSymbol => "contains_jp_punct_symbol",
            ScriptTag::ContainsFullwidthAscii => "contains_fullwidth_ascii",
            ScriptTag::ContainsBasicEnglish => "contains_basic_english",
            ScriptTag::ContainsDigit => "contains_digit",
            ScriptTag::JapaneseForming => "japanese_forming",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compact set of tags for one token
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagSet(u16);

impl TagSet {
    pub fn insert(&mut self, tag: ScriptTag) {
        self.0 |= tag.bit();
    }

    pub fn contains(&self, tag: ScriptTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ScriptTag> + '_ {
        ScriptTag::ALL.into_iter().filter(|&tag| self.contains(tag))
    }
}
