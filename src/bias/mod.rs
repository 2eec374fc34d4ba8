//! Logit bias from classified token ids
//!
//! Handles:
//! - Additive bias on a local logits vector (out-of-range ids skipped)
//! - `logit_bias` payload for chat completion APIs (string keys, clamped)
//! - Locating and loading the id list produced by an analysis run

use crate::error::Result;
use crate::output::{id_list_path, read_id_list_json, read_id_list_txt, report_path};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bias range accepted by OpenAI-compatible APIs
pub const API_BIAS_LIMIT: f32 = 100.0;

/// List whose ids are biased by default
pub const DEFAULT_BIAS_LIST: &str = "contains_japanese";

/// Additive bias for a set of token ids
#[derive(Clone, Debug)]
pub struct LogitBias {
    token_ids: Vec<u32>,
    bias: f32,
}

impl LogitBias {
    pub fn new(mut token_ids: Vec<u32>, bias: f32) -> Self {
        token_ids.sort_unstable();
        token_ids.dedup();
        LogitBias { token_ids, bias }
    }

    pub fn token_ids(&self) -> &[u32] {
        &self.token_ids
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// A zero bias or an empty id list leaves logits untouched
    pub fn is_enabled(&self) -> bool {
        self.bias != 0.0 && !self.token_ids.is_empty()
    }

    /// Add the bias to every listed id inside `logits`.
    /// Returns how many entries were adjusted.
    pub fn apply(&self, logits: &mut [f32]) -> usize {
        let mut applied = 0;
        for &id in &self.token_ids {
            if let Some(score) = logits.get_mut(id as usize) {
                *score += self.bias;
                applied += 1;
            }
        }
        applied
    }

    /// Apply to each row of a batch
    pub fn apply_batch(&self, batch: &mut [Vec<f32>]) {
        for row in batch.iter_mut() {
            self.apply(row);
        }
    }

    /// Bias limited to the API range
    pub fn clamped_bias(&self) -> f32 {
        self.bias.clamp(-API_BIAS_LIMIT, API_BIAS_LIMIT)
    }

    /// `logit_bias` map: token id as a string → clamped bias
    pub fn api_payload(&self) -> BTreeMap<String, f32> {
        let clamped = self.clamped_bias();
        if clamped != self.bias {
            tracing::warn!(
                "Bias {} clamped to {} for API compatibility",
                self.bias,
                clamped
            );
        }
        self.token_ids
            .iter()
            .map(|id| (id.to_string(), clamped))
            .collect()
    }
}

/// Find the ids file for `model_id`.
///
/// Order: `explicit` if it exists, then the default TXT list and the JSON
/// report inside `search_dir`.
pub fn resolve_ids_file(
    explicit: Option<&Path>,
    model_id: &str,
    search_dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("IDs file not found: {}, trying defaults", path.display());
    }

    let candidates = [
        id_list_path(search_dir, DEFAULT_BIAS_LIST, model_id),
        report_path(search_dir, model_id),
    ];
    let found = candidates.into_iter().find(|p| p.exists());
    match &found {
        Some(path) => tracing::info!("Using IDs file: {}", path.display()),
        None => tracing::error!("No IDs file found for {}", model_id),
    }
    found
}

/// Load ids from a TXT list or JSON report; unknown extensions try both
pub fn load_bias_ids(path: &Path) -> Result<Vec<u32>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt") => read_id_list_txt(path),
        Some("json") => read_id_list_json(path),
        _ => {
            tracing::warn!("Unknown IDs file format: {}", path.display());
            read_id_list_txt(path).or_else(|_| read_id_list_json(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_apply_skips_out_of_range() {
        let bias = LogitBias::new(vec![1, 3, 99], 1.5);
        let mut logits = vec![0.0, 0.0, 0.0, 1.0];
        let applied = bias.apply(&mut logits);
        assert_eq!(applied, 2);
        assert_eq!(logits, vec![0.0, 1.5, 0.0, 2.5]);
    }

    #[test]
    fn test_apply_batch() {
        let bias = LogitBias::new(vec![0], -2.0);
        let mut batch = vec![vec![1.0, 1.0], vec![3.0, 0.0]];
        bias.apply_batch(&mut batch);
        assert_eq!(batch, vec![vec![-1.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_api_payload_clamps_and_stringifies() {
        let bias = LogitBias::new(vec![7, 3, 7], 250.0);
        let payload = bias.api_payload();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("3"), Some(&100.0));
        assert_eq!(payload.get("7"), Some(&100.0));

        let negative = LogitBias::new(vec![1], -150.0);
        assert_eq!(negative.clamped_bias(), -100.0);
    }

    #[test]
    fn test_is_enabled() {
        assert!(LogitBias::new(vec![1], 5.0).is_enabled());
        assert!(!LogitBias::new(vec![1], 0.0).is_enabled());
        assert!(!LogitBias::new(Vec::new(), 5.0).is_enabled());
    }

    #[test]
    fn test_resolve_prefers_explicit_then_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("mine.txt");
        fs::write(&explicit, "[1]").unwrap();
        assert_eq!(
            resolve_ids_file(Some(&explicit), "org/m-1", dir.path()),
            Some(explicit.clone())
        );

        let missing = dir.path().join("missing.txt");
        assert_eq!(resolve_ids_file(Some(&missing), "org/m-1", dir.path()), None);

        let report = dir.path().join("token_analysis_jp_m_1.json");
        fs::write(&report, r#"{"bias_ids": {"japanese": [4]}}"#).unwrap();
        assert_eq!(
            resolve_ids_file(Some(&missing), "org/m-1", dir.path()),
            Some(report.clone())
        );

        let txt = dir.path().join("contains_japanese_m_1.txt");
        fs::write(&txt, "contains_japanese_ids = [2,3]\n").unwrap();
        assert_eq!(resolve_ids_file(None, "org/m-1", dir.path()), Some(txt));
    }

    #[test]
    fn test_load_bias_ids_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("ids.txt");
        fs::write(&txt, "x_ids = [2,3]\n").unwrap();
        assert_eq!(load_bias_ids(&txt).unwrap(), vec![2, 3]);

        let json = dir.path().join("ids.json");
        fs::write(&json, r#"{"bias_ids": {"japanese": [9]}}"#).unwrap();
        assert_eq!(load_bias_ids(&json).unwrap(), vec![9]);

        let other = dir.path().join("ids.list");
        fs::write(&other, "5\n6\n").unwrap();
        assert_eq!(load_bias_ids(&other).unwrap(), vec![5, 6]);
    }
}
