//! Output: JSON report and per-category id lists
//!
//! # Components
//! - `report.rs`: AnalysisReport (one JSON record per run)
//! - `id_list.rs`: Flat id list writer and readers (TXT, JSON)

pub mod id_list;
pub mod report;

pub use id_list::{
    id_list_path, parse_id_list, read_id_list_json, read_id_list_txt, write_id_list,
    write_id_lists, IdListSource, EXPORTED_LISTS,
};
pub use report::{report_path, write_report, AnalysisReport, REPORT_PREFIX};

/// File-name fragment for a model id: last path component, `-` → `_`
pub fn model_name_part(model_id: &str) -> String {
    let is_sep = |c: char| c == '/' || c == '\\';
    let base = model_id
        .trim_end_matches(is_sep)
        .rsplit(is_sep)
        .next()
        .unwrap_or_default();

    if base.is_empty() {
        "model".to_string()
    } else {
        base.replace('-', "_")
    }
}
