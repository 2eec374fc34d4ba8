//! ClassificationResult: per-category id sets and counts

use super::category::{Category, ScriptTag};
use super::classifier::TokenClass;
use rustc_hash::FxHashMap;

/// Outcome of one classification pass.
///
/// Ids are recorded in ascending order, so every list is sorted.
#[derive(Clone, Debug)]
pub struct ClassificationResult {
    vocab_size: usize,
    min_token_id: u32,
    /// Special ids inside `0..vocab_size`
    excluded_special_ids: Vec<u32>,
    /// Non-special ids below `min_token_id`
    excluded_below_min: usize,
    categories: FxHashMap<Category, Vec<u32>>,
    tags: FxHashMap<ScriptTag, Vec<u32>>,
}

impl ClassificationResult {
    pub(super) fn new(vocab_size: usize, min_token_id: u32) -> Self {
        ClassificationResult {
            vocab_size,
            min_token_id,
            excluded_special_ids: Vec::new(),
            excluded_below_min: 0,
            categories: Category::ALL.iter().map(|&c| (c, Vec::new())).collect(),
            tags: ScriptTag::ALL.iter().map(|&t| (t, Vec::new())).collect(),
        }
    }

    pub(super) fn exclude_special(&mut self, id: u32) {
        self.excluded_special_ids.push(id);
    }

    pub(super) fn exclude_below_min(&mut self) {
        self.excluded_below_min += 1;
    }

    pub(super) fn record(&mut self, id: u32, class: TokenClass) {
        self.categories
            .entry(class.category)
            .or_default()
            .push(id);
        for tag in class.tags.iter() {
            self.tags.entry(tag).or_default().push(id);
        }
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn min_token_id(&self) -> u32 {
        self.min_token_id
    }

    /// Highest id in the analyzed range, `None` for an empty vocabulary
    pub fn max_token_id(&self) -> Option<u32> {
        self.vocab_size.checked_sub(1).map(|id| id as u32)
    }

    /// Excluded special ids, ascending
    pub fn excluded_special_ids(&self) -> &[u32] {
        &self.excluded_special_ids
    }

    pub fn excluded_below_min(&self) -> usize {
        self.excluded_below_min
    }

    /// Ids skipped for being special or below the minimum id
    pub fn excluded_count(&self) -> usize {
        self.excluded_special_ids.len() + self.excluded_below_min
    }

    /// Ids that received a category
    pub fn analyzed_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Ids of one category, ascending
    pub fn ids(&self, category: Category) -> &[u32] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.ids(category).len()
    }

    /// Ids carrying a tag, ascending
    pub fn tag_ids(&self, tag: ScriptTag) -> &[u32] {
        self.tags.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tag_count(&self, tag: ScriptTag) -> usize {
        self.tag_ids(tag).len()
    }

    /// Every id whose category marks Japanese content, ascending.
    /// This is the list downstream logit biasing consumes.
    pub fn japanese_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Category::ALL
            .iter()
            .filter(|c| c.is_japanese())
            .flat_map(|&c| self.ids(c).iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::super::classifier::TokenClassifier;
    use super::*;
    use crate::vocab::{TokenText, Vocabulary};
    use rustc_hash::FxHashSet;

    fn sample_vocab() -> Vocabulary {
        let texts: Vec<TokenText> = vec![
            "<pad>".into(),
            "<s>".into(),
            "こんにちは".into(),
            "日本語abc".into(),
            "hello".into(),
            "!!!".into(),
            "ｶﾀｶﾅ".into(),
            "42".into(),
            " ".into(),
            TokenText::RawBytes(vec![0xE8, 0xAA]),
            "".into(),
            "カタカナ".into(),
        ];
        Vocabulary::from_texts(texts, [0, 1]).unwrap()
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let vocab = sample_vocab();
        let result = TokenClassifier::default().classify(&vocab, 0);

        let mut seen = FxHashSet::default();
        for category in Category::ALL {
            for &id in result.ids(category) {
                assert!(seen.insert(id), "id {id} appears in two categories");
            }
        }
        let expected: FxHashSet<u32> = (2..vocab.size() as u32).collect();
        assert_eq!(seen, expected);
        assert_eq!(
            result.analyzed_count(),
            vocab.size() - result.excluded_count()
        );
        assert_eq!(result.excluded_special_ids(), &[0, 1]);
    }

    #[test]
    fn test_expected_categories() {
        let result = TokenClassifier::default().classify(&sample_vocab(), 0);
        assert_eq!(result.ids(Category::PureJapaneseScript), &[2, 11]);
        assert_eq!(result.ids(Category::ContainsJapanese), &[3, 6, 9]);
        assert_eq!(result.ids(Category::PureEnglish), &[4]);
        assert_eq!(result.ids(Category::SpecialCharPattern), &[5]);
        assert_eq!(result.ids(Category::ContainsDigit), &[7]);
        assert_eq!(result.ids(Category::Uncategorized), &[8, 10]);
        assert_eq!(result.tag_ids(ScriptTag::ContainsKatakanaHalf), &[6]);
        assert_eq!(result.tag_ids(ScriptTag::JapaneseForming), &[9]);
        assert_eq!(result.japanese_ids(), vec![2, 3, 6, 9, 11]);
    }

    #[test]
    fn test_min_token_id_excludes_low_ids() {
        let vocab = sample_vocab();
        let result = TokenClassifier::default().classify(&vocab, 5);
        // 0 and 1 are special, 2..5 fall below the minimum
        assert_eq!(result.excluded_special_ids().len(), 2);
        assert_eq!(result.excluded_below_min(), 3);
        assert_eq!(result.analyzed_count(), vocab.size() - 5);
        assert!(result.ids(Category::PureJapaneseScript).iter().all(|&id| id >= 5));
    }

    #[test]
    fn test_min_token_id_beyond_vocab() {
        let vocab = sample_vocab();
        let result = TokenClassifier::default().classify(&vocab, 1_000);
        assert_eq!(result.analyzed_count(), 0);
        assert_eq!(result.excluded_count(), vocab.size());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let vocab = sample_vocab();
        let classifier = TokenClassifier::default();
        let first = classifier.classify(&vocab, 0);
        let second = classifier.classify(&vocab, 0);
        for category in Category::ALL {
            assert_eq!(first.ids(category), second.ids(category));
        }
        for tag in ScriptTag::ALL {
            assert_eq!(first.tag_ids(tag), second.tag_ids(tag));
        }
    }

    #[test]
    fn test_special_ids_outside_vocab_are_ignored() {
        let vocab = sample_vocab().with_special_ids([500]);
        let result = TokenClassifier::default().classify(&vocab, 0);
        assert_eq!(result.excluded_special_ids(), &[0, 1]);
        assert_eq!(result.max_token_id(), Some(vocab.size() as u32 - 1));
    }
}
