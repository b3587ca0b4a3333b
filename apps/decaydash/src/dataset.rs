//! Dataset loading.
//!
//! A dataset comes either from a file (format picked by extension) or from
//! the embedded sample shipped with the binary. Scores are checked at this
//! boundary: `clamp_scores` pulls them into `[0, 100]`, strict callers run
//! `validate` instead and reject.

use crate::classify::clamp_score;
use crate::error::{DecayError, Result};
use crate::models::Dataset;
use std::fs;
use std::path::{Path, PathBuf};

/// Demo dataset compiled into the binary.
pub const SAMPLE_JSON: &str = include_str!("../data/sample.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
    Yaml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(DataFormat::Json),
            "toml" => Ok(DataFormat::Toml),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            _ => Err(DecayError::UnsupportedFormat(
                path.to_string_lossy().to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the dashboard's data comes from.
pub enum DataSource {
    Embedded,
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Embedded => "<embedded sample>".to_string(),
            DataSource::File(p) => p.to_string_lossy().to_string(),
        }
    }
}

/// Parse dataset text in the given format.
pub fn parse(text: &str, format: DataFormat) -> Result<Dataset> {
    let ds = match format {
        DataFormat::Json => serde_json::from_str(text)?,
        DataFormat::Toml => toml::from_str(text)?,
        DataFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(ds)
}

/// Read and parse a dataset file.
pub fn load(path: &Path) -> Result<Dataset> {
    let format = DataFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| DecayError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    log::debug!("loading {:?} dataset from {}", format, path.display());
    parse(&text, format)
}

/// The embedded demo dataset.
pub fn sample() -> Result<Dataset> {
    parse(SAMPLE_JSON, DataFormat::Json)
}

pub fn load_source(source: &DataSource) -> Result<Dataset> {
    match source {
        DataSource::Embedded => {
            log::debug!("using embedded sample dataset");
            sample()
        }
        DataSource::File(p) => load(p),
    }
}

/// Clamp every score and confidence into `[0, 100]`, logging each change.
/// Returns the number of values adjusted.
pub fn clamp_scores(ds: &mut Dataset) -> usize {
    let mut adjusted = 0usize;
    let mut fix = |value: &mut i64, what: &str, owner: &str| {
        let clamped = clamp_score(*value) as i64;
        if clamped != *value {
            log::warn!("{} of '{}' is {} (outside 0..=100); clamped to {}", what, owner, value, clamped);
            *value = clamped;
            adjusted += 1;
        }
    };
    for r in ds.repositories.iter_mut() {
        fix(&mut r.decay_score, "decayScore", &r.name);
    }
    for t in ds.technology_trends.iter_mut() {
        fix(&mut t.decay_risk, "decayRisk", &t.tech);
    }
    for a in ds.recent_alerts.iter_mut() {
        let owner = format!("alert #{}", a.id);
        fix(&mut a.confidence, "confidence", &owner);
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stars, Status, Trend};
    use tempfile::tempdir;

    #[test]
    fn test_sample_matches_demo_data() {
        let ds = sample().unwrap();
        assert_eq!(ds.summary.total_items, 2547);
        assert_eq!(ds.summary.cost_impact, 1_710_000);
        assert_eq!(ds.repositories.len(), 5);
        assert_eq!(ds.technology_trends.len(), 6);
        assert_eq!(ds.recent_alerts.len(), 4);
        let jq = &ds.repositories[1];
        assert_eq!(jq.name, "jquery/jquery");
        assert_eq!(jq.status, Status::Critical);
        assert_eq!(jq.trend, Trend::Declining);
        assert_eq!(ds.repositories[2].stars, Stars::Internal);
        assert_eq!(ds.technology_trends[3].trend, Trend::Critical);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a.TOML")).unwrap(), DataFormat::Toml);
        assert_eq!(DataFormat::from_path(Path::new("a.yml")).unwrap(), DataFormat::Yaml);
        assert!(matches!(
            DataFormat::from_path(Path::new("a.csv")),
            Err(DecayError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_toml_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.toml");
        fs::write(
            &path,
            r#"
[summary]
totalItems = 10
avgDecayScore = 12.5

[[repositories]]
name = "docs"
type = "Internal"
decayScore = 40
status = "warning"
trend = "stable"

[[technologyTrends]]
tech = "Perl"
decayRisk = 70
trend = "declining"
"#,
        )
        .unwrap();
        let ds = load(&path).unwrap();
        assert_eq!(ds.summary.total_items, 10);
        assert_eq!(ds.repositories[0].decay_score, 40);
        assert_eq!(ds.technology_trends[0].decay_risk, 70);
        assert!(ds.recent_alerts.is_empty());
    }

    #[test]
    fn test_load_yaml_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.yaml");
        fs::write(
            &path,
            r#"
summary:
  totalItems: 1
recentAlerts:
  - id: 9
    type: warning
    message: stale
    confidence: 55
    predictedDate: "2025-03-01"
"#,
        )
        .unwrap();
        let ds = load(&path).unwrap();
        assert_eq!(ds.recent_alerts[0].kind, Status::Warning);
        assert_eq!(ds.recent_alerts[0].predicted_date, "2025-03-01");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DecayError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse("{ not json", DataFormat::Json).unwrap_err();
        assert!(matches!(err, DecayError::Json(_)));
    }

    #[test]
    fn test_clamp_scores_counts_and_fixes() {
        let mut ds = sample().unwrap();
        ds.repositories[0].decay_score = 130;
        ds.technology_trends[0].decay_risk = -3;
        ds.recent_alerts[0].confidence = 101;
        assert_eq!(clamp_scores(&mut ds), 3);
        assert_eq!(ds.repositories[0].decay_score, 100);
        assert_eq!(ds.technology_trends[0].decay_risk, 0);
        assert_eq!(ds.recent_alerts[0].confidence, 100);
        assert_eq!(clamp_scores(&mut ds), 0);
    }
}
