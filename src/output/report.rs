//! JSON analysis report
//!
//! One file per run, `token_analysis_jp_<model>.json`, holding the
//! vocabulary size, exclusion details, counts and every id list.

use super::model_name_part;
use crate::analysis::{Category, ClassificationResult, ScriptTag};
use crate::error::{AnalyzerError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name prefix of the JSON report
pub const REPORT_PREFIX: &str = "token_analysis_jp";

#[derive(Debug, Serialize)]
pub struct AnalysisDetails {
    pub min_token_id_analyzed: u32,
    pub max_token_id_analyzed: Option<u32>,
    pub num_tokens_analyzed: usize,
    pub num_excluded_below_min: usize,
    pub excluded_special_ids: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub categories: BTreeMap<&'static str, usize>,
    pub tags: BTreeMap<&'static str, usize>,
}

/// Serializable view of a classification run
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub model_id: String,
    pub vocab_size: usize,
    pub num_special_tokens: usize,
    pub analysis_details: AnalysisDetails,
    pub statistics: Statistics,
    /// Primary category → ids
    pub token_ids: BTreeMap<&'static str, Vec<u32>>,
    /// Tag → ids
    pub tag_ids: BTreeMap<&'static str, Vec<u32>>,
    /// Lists meant for logit biasing
    pub bias_ids: BTreeMap<&'static str, Vec<u32>>,
}

impl AnalysisReport {
    pub fn new(model_id: &str, result: &ClassificationResult) -> Self {
        let token_ids: BTreeMap<_, _> = Category::ALL
            .iter()
            .map(|&c| (c.name(), result.ids(c).to_vec()))
            .collect();
        let tag_ids: BTreeMap<_, _> = ScriptTag::ALL
            .iter()
            .map(|&t| (t.name(), result.tag_ids(t).to_vec()))
            .collect();

        let statistics = Statistics {
            categories: token_ids.iter().map(|(&k, v)| (k, v.len())).collect(),
            tags: tag_ids.iter().map(|(&k, v)| (k, v.len())).collect(),
        };

        let mut bias_ids = BTreeMap::new();
        bias_ids.insert("japanese", result.japanese_ids());

        AnalysisReport {
            model_id: model_id.to_string(),
            vocab_size: result.vocab_size(),
            num_special_tokens: result.excluded_special_ids().len(),
            analysis_details: AnalysisDetails {
                min_token_id_analyzed: result.min_token_id(),
                max_token_id_analyzed: result.max_token_id(),
                num_tokens_analyzed: result.analyzed_count(),
                num_excluded_below_min: result.excluded_below_min(),
                excluded_special_ids: result.excluded_special_ids().to_vec(),
            },
            statistics,
            token_ids,
            tag_ids,
            bias_ids,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Path of the report for `model_id` inside `output_dir`
pub fn report_path(output_dir: &Path, model_id: &str) -> PathBuf {
    output_dir.join(format!("{}_{}.json", REPORT_PREFIX, model_name_part(model_id)))
}

/// Write the JSON report, creating `output_dir` if needed
pub fn write_report(
    output_dir: &Path,
    model_id: &str,
    result: &ClassificationResult,
) -> Result<PathBuf> {
    let report = AnalysisReport::new(model_id, result);
    let path = report_path(output_dir, model_id);

    fs::create_dir_all(output_dir).map_err(|e| AnalyzerError::io(output_dir, e))?;
    fs::write(&path, report.to_json()?).map_err(|e| AnalyzerError::io(&path, e))?;

    tracing::info!("Analysis report saved: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TokenClassifier;
    use crate::vocab::{TokenText, Vocabulary};

    fn result() -> ClassificationResult {
        let texts: Vec<TokenText> = vec!["<s>".into(), "日本".into(), "abc".into(), "です".into()];
        let vocab = Vocabulary::from_texts(texts, [0]).unwrap();
        TokenClassifier::default().classify(&vocab, 0)
    }

    #[test]
    fn test_report_shape() {
        let report = AnalysisReport::new("org/my-model", &result());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["model_id"], "org/my-model");
        assert_eq!(json["vocab_size"], 4);
        assert_eq!(json["num_special_tokens"], 1);
        assert_eq!(json["analysis_details"]["num_tokens_analyzed"], 3);
        assert_eq!(json["analysis_details"]["max_token_id_analyzed"], 3);
        assert_eq!(json["analysis_details"]["excluded_special_ids"][0], 0);
        assert_eq!(json["statistics"]["categories"]["pure_japanese_script"], 2);
        assert_eq!(json["statistics"]["tags"]["contains_kanji"], 1);
        assert_eq!(json["token_ids"]["pure_english"][0], 2);
        assert_eq!(json["bias_ids"]["japanese"], serde_json::json!([1, 3]));
    }

    #[test]
    fn test_write_report_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let path = write_report(&out, "org/my-model", &result()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "token_analysis_jp_my_model.json"
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"pure_japanese_script\""));
    }
}
