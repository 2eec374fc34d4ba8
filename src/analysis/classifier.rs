//! TokenClassifier: per-token category assignment
//!
//! Rule order for decoded text:
//! 1. empty / control / replacement-only → uncategorized
//! 2. Hiragana, full-width Katakana, Kanji only → pure_japanese_script
//! 3. any Japanese-related char → contains_japanese
//! 4. half-width Katakana → contains_katakana_half
//! 5. full-width digit or letter → contains_fullwidth_ascii
//! 6. ASCII letters only → pure_english
//! 7. any ASCII digit → contains_digit
//! 8. symbols only → special_char_pattern
//! 9. otherwise → uncategorized
//!
//! Rules 4 and 5 never win for decoded text (rule 3 catches them first);
//! the information survives as tags.

use super::category::{Category, ScriptTag, TagSet};
use super::result::ClassificationResult;
use crate::script::{split_partial, ScriptClass, ScriptTables};
use crate::vocab::{TokenText, Vocabulary};

/// Classification of a single token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenClass {
    pub category: Category,
    pub tags: TagSet,
}

/// Assigns every eligible token id to exactly one category
#[derive(Clone, Debug, Default)]
pub struct TokenClassifier {
    tables: ScriptTables,
}

impl TokenClassifier {
    pub fn new(tables: ScriptTables) -> Self {
        TokenClassifier { tables }
    }

    pub fn tables(&self) -> &ScriptTables {
        &self.tables
    }

    /// Classify one token's surface form
    pub fn classify_token(&self, token: &TokenText) -> TokenClass {
        match token {
            TokenText::DecodedText(text) => self.classify_text(text),
            TokenText::RawBytes(bytes) => {
                let split = split_partial(bytes);
                let mut class = self.classify_text(&split.text);

                if split.is_japanese_forming(&self.tables) {
                    class.tags.insert(ScriptTag::JapaneseForming);
                    class.category = Category::ContainsJapanese;
                } else {
                    // Leftover bytes rule out the "only" categories
                    class.category = match class.category {
                        Category::PureJapaneseScript => Category::ContainsJapanese,
                        Category::PureEnglish => Category::Uncategorized,
                        other => other,
                    };
                }
                class
            }
        }
    }

    /// Classify complete text
    pub fn classify_text(&self, text: &str) -> TokenClass {
        let tags = self.tags_for(text);
        TokenClass {
            category: self.category_for(text, &tags),
            tags,
        }
    }

    fn tags_for(&self, text: &str) -> TagSet {
        let mut tags = TagSet::default();
        for c in text.chars() {
            match self.tables.class_of(c) {
                Some(ScriptClass::Hiragana) => tags.insert(ScriptTag::ContainsHiragana),
                Some(ScriptClass::KatakanaFull) => tags.insert(ScriptTag::ContainsKatakanaFull),
                Some(ScriptClass::KatakanaHalf) => tags.insert(ScriptTag::ContainsKatakanaHalf),
                Some(ScriptClass::Kanji) => tags.insert(ScriptTag::ContainsKanji),
                Some(ScriptClass::JpPunctSymbol) => tags.insert(ScriptTag::ContainsJpPunctSymbol),
                Some(ScriptClass::FullwidthAlnum) => {
                    tags.insert(ScriptTag::ContainsFullwidthAscii)
                }
                None if c.is_ascii_alphabetic() => tags.insert(ScriptTag::ContainsBasicEnglish),
                None if c.is_ascii_digit() => tags.insert(ScriptTag::ContainsDigit),
                None => {}
            }
        }
        tags
    }

    fn category_for(&self, text: &str, tags: &TagSet) -> Category {
        let tables = &self.tables;

        if is_placeholder(text) {
            Category::Uncategorized
        } else if text.chars().all(|c| tables.is_pure_japanese_script_char(c)) {
            Category::PureJapaneseScript
        } else if text.chars().any(|c| tables.is_japanese_related_char(c)) {
            Category::ContainsJapanese
        } else if tags.contains(ScriptTag::ContainsKatakanaHalf) {
            Category::ContainsKatakanaHalf
        } else if tags.contains(ScriptTag::ContainsFullwidthAscii) {
            Category::ContainsFullwidthAscii
        } else if text.chars().all(|c| c.is_ascii_alphabetic()) {
            Category::PureEnglish
        } else if tags.contains(ScriptTag::ContainsDigit) {
            Category::ContainsDigit
        } else if tables.is_special_char_pattern(text) {
            Category::SpecialCharPattern
        } else {
            Category::Uncategorized
        }
    }

    /// Classify every eligible id of `vocab`.
    ///
    /// Ids below `min_token_id` and special ids are skipped and recorded as
    /// excluded. The vocabulary is not modified.
    pub fn classify(&self, vocab: &Vocabulary, min_token_id: u32) -> ClassificationResult {
        let mut result = ClassificationResult::new(vocab.size(), min_token_id);

        for (id, token) in vocab.iter() {
            if vocab.is_special(id) {
                result.exclude_special(id);
                continue;
            }
            if id < min_token_id {
                result.exclude_below_min();
                continue;
            }
            let class = self.classify_token(token);
            result.record(id, class);
        }

        result
    }
}

/// Empty text, or text made only of control characters and U+FFFD
fn is_placeholder(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_control() || c == char::REPLACEMENT_CHARACTER)
}
