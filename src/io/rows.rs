//! JSON rows files: an array of `{score, label, frequency?, severity?}`.

use std::fs;
use std::path::Path;

use crate::errors::RiskError;
use crate::relabel::ScoredRow;

/// Parse rows, scoring any row that has factors but no score.
pub fn parse_rows(contents: &str) -> Result<Vec<ScoredRow>, RiskError> {
    let mut rows: Vec<ScoredRow> =
        serde_json::from_str(contents).map_err(|e| RiskError::RowsParse {
            path: None,
            message: e.to_string(),
        })?;
    let filled = rows
        .iter_mut()
        .map(ScoredRow::fill_score_from_factors)
        .filter(|filled| *filled)
        .count();
    if filled > 0 {
        log::debug!("Scored {} rows from their factors", filled);
    }
    Ok(rows)
}

pub fn read_rows(path: &Path) -> Result<Vec<ScoredRow>, RiskError> {
    let contents = fs::read_to_string(path).map_err(|e| RiskError::io(path, e))?;
    parse_rows(&contents).map_err(|e| match e {
        RiskError::RowsParse { message, .. } => RiskError::RowsParse {
            path: Some(path.to_path_buf()),
            message,
        },
        other => other,
    })
}

pub fn rows_to_json(rows: &[ScoredRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_scores_nulls_and_factors() {
        let rows = parse_rows(
            r#"[
                {"score": 12, "label": ""},
                {"score": null, "label": "kept"},
                {"label": "", "frequency": 2, "severity": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows[0].score, Some(12.0));
        assert_eq!(rows[1].score, None);
        assert_eq!(rows[2].score, Some(6.0));
    }

    #[test]
    fn malformed_rows_report_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(&path, "{\"score\": 1}").unwrap();

        match read_rows(&path).unwrap_err() {
            RiskError::RowsParse { path: Some(p), .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn factors_are_omitted_when_absent() {
        let json = rows_to_json(&[ScoredRow::new(3.0)]).unwrap();
        assert!(!json.contains("frequency"));
        assert!(json.contains("\"score\": 3.0"));
    }
}
