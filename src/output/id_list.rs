//! Flat token id lists
//!
//! Format: one line `<name>_ids = [1,2,3]`, named `<name>_<model>.txt`.
//! The reader also takes bare comma/newline separated ids.

use super::model_name_part;
use crate::analysis::{Category, ClassificationResult, ScriptTag};
use crate::error::{AnalyzerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the ids of an exported list come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdListSource {
    Category(Category),
    Tag(ScriptTag),
    /// Every Japanese category merged; the logit bias list
    Japanese,
}

impl IdListSource {
    pub fn ids(self, result: &ClassificationResult) -> Vec<u32> {
        match self {
            IdListSource::Category(c) => result.ids(c).to_vec(),
            IdListSource::Tag(t) => result.tag_ids(t).to_vec(),
            IdListSource::Japanese => result.japanese_ids(),
        }
    }
}

/// Lists written after every run
pub const EXPORTED_LISTS: [(&str, IdListSource); 7] = [
    ("contains_japanese", IdListSource::Japanese),
    (
        "pure_japanese_script",
        IdListSource::Category(Category::PureJapaneseScript),
    ),
    (
        "contains_katakana_half",
        IdListSource::Tag(ScriptTag::ContainsKatakanaHalf),
    ),
    (
        "contains_fullwidth_ascii",
        IdListSource::Tag(ScriptTag::ContainsFullwidthAscii),
    ),
    ("pure_english", IdListSource::Category(Category::PureEnglish)),
    (
        "special_char_pattern",
        IdListSource::Category(Category::SpecialCharPattern),
    ),
    (
        "uncategorized",
        IdListSource::Category(Category::Uncategorized),
    ),
];

/// Path of the `name` list for `model_id` inside `output_dir`
pub fn id_list_path(output_dir: &Path, name: &str, model_id: &str) -> PathBuf {
    output_dir.join(format!("{}_{}.txt", name, model_name_part(model_id)))
}

pub fn format_id_list(name: &str, ids: &[u32]) -> String {
    let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("{}_ids = [{}]\n", name, joined.join(","))
}

/// Write one list. Empty lists are skipped and return `None`.
pub fn write_id_list(
    output_dir: &Path,
    name: &str,
    model_id: &str,
    ids: &[u32],
) -> Result<Option<PathBuf>> {
    if ids.is_empty() {
        tracing::info!("No tokens in '{}', skipping list file", name);
        return Ok(None);
    }

    fs::create_dir_all(output_dir).map_err(|e| AnalyzerError::io(output_dir, e))?;
    let path = id_list_path(output_dir, name, model_id);
    fs::write(&path, format_id_list(name, ids)).map_err(|e| AnalyzerError::io(&path, e))?;

    tracing::info!("Saved {} '{}' token IDs: {}", ids.len(), name, path.display());
    Ok(Some(path))
}

/// Write every exported list, returning the files created
pub fn write_id_lists(
    output_dir: &Path,
    model_id: &str,
    result: &ClassificationResult,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, source) in EXPORTED_LISTS {
        if let Some(path) = write_id_list(output_dir, name, model_id, &source.ids(result))? {
            written.push(path);
        }
    }
    Ok(written)
}

/// Parse ids from list text.
///
/// When a `[...]` group is present only its contents are read; otherwise the
/// whole text is split on commas and whitespace.
pub fn parse_id_list(content: &str) -> Result<Vec<u32>> {
    let body = match (content.find('['), content.find(']')) {
        (Some(open), Some(close)) if open < close => &content[open + 1..close],
        (Some(_), _) | (_, Some(_)) => {
            return Err(AnalyzerError::invalid("unbalanced brackets in id list"))
        }
        _ => content,
    };

    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| AnalyzerError::invalid(format!("not a token id: {:?}", s)))
        })
        .collect()
}

/// Read ids from a TXT list file
pub fn read_id_list_txt(path: &Path) -> Result<Vec<u32>> {
    let content = fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
    let ids = parse_id_list(&content)?;
    tracing::info!("Loaded {} token IDs from {}", ids.len(), path.display());
    Ok(ids)
}

/// Read the Japanese bias ids from a JSON report.
///
/// Looks for `bias_ids.japanese`, then `token_ids.contains_japanese`.
pub fn read_id_list_json(path: &Path) -> Result<Vec<u32>> {
    let content = fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
    let json: serde_json::Value = serde_json::from_str(&content)?;

    let list = json
        .get("bias_ids")
        .and_then(|v| v.get("japanese"))
        .or_else(|| json.get("token_ids").and_then(|v| v.get("contains_japanese")))
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            AnalyzerError::invalid(format!("no Japanese id list in {}", path.display()))
        })?;

    let ids = list
        .iter()
        .map(|v| {
            v.as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| AnalyzerError::invalid(format!("not a token id: {}", v)))
        })
        .collect::<Result<Vec<u32>>>()?;

    tracing::info!("Loaded {} token IDs from {}", ids.len(), path.display());
    Ok(ids)
}
