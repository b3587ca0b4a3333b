//! Data-contract checks over datasets.
//!
//! Produces a `CheckReport` with issues and a summary, in the same shape for
//! a single in-memory dataset or many files matched by glob patterns.
//!
//! Rules:
//! - `score-range` (error): decayScore/decayRisk/confidence outside 0..=100.
//! - `duplicate-id` (error): alert id repeated within `recentAlerts`.
//! - `predicted-date` (error): `predictedDate` is not a `YYYY-MM-DD` date.
//! - `alert-type` (warning): alert type is neither critical nor warning.
//! - `unknown-status` / `unknown-trend` (warning): tag not recognized.
//! - `load` (error): file unreadable or not a valid dataset.
//!
//! File-count sums (`criticalFiles + warningFiles + healthyFiles`) and
//! summary counters are intentionally not cross-checked.

use crate::dataset;
use crate::models::{CheckReport, Dataset, Issue, Status};
use chrono::NaiveDate;
use glob::glob;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn issue(file: &str, rule: &str, severity: &str, path: String, message: String) -> Issue {
    Issue {
        file: file.to_string(),
        rule: rule.to_string(),
        severity: severity.to_string(),
        path,
        message,
    }
}

fn check_score(issues: &mut Vec<Issue>, file: &str, path: String, what: &str, value: i64) {
    if !(0..=100).contains(&value) {
        issues.push(issue(
            file,
            "score-range",
            "error",
            path,
            format!("{} {} is outside 0..=100", what, value),
        ));
    }
}

/// Validate one dataset. `file` labels the issues.
pub fn validate(ds: &Dataset, file: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (i, r) in ds.repositories.iter().enumerate() {
        check_score(
            &mut issues,
            file,
            format!("$.repositories[{}].decayScore", i),
            "decayScore",
            r.decay_score,
        );
        if !r.status.is_known() {
            issues.push(issue(
                file,
                "unknown-status",
                "warning",
                format!("$.repositories[{}].status", i),
                format!(
                    "Unrecognized status '{}' for '{}'; rendered as neutral",
                    r.status, r.name
                ),
            ));
        }
        if !r.trend.is_known() {
            issues.push(issue(
                file,
                "unknown-trend",
                "warning",
                format!("$.repositories[{}].trend", i),
                format!(
                    "Unrecognized trend '{}' for '{}'; rendered as stable",
                    r.trend, r.name
                ),
            ));
        }
    }

    for (i, t) in ds.technology_trends.iter().enumerate() {
        check_score(
            &mut issues,
            file,
            format!("$.technologyTrends[{}].decayRisk", i),
            "decayRisk",
            t.decay_risk,
        );
        if !t.trend.is_known() {
            issues.push(issue(
                file,
                "unknown-trend",
                "warning",
                format!("$.technologyTrends[{}].trend", i),
                format!(
                    "Unrecognized trend '{}' for '{}'; rendered as stable",
                    t.trend, t.tech
                ),
            ));
        }
    }

    let mut seen: HashSet<u64> = HashSet::new();
    for (i, a) in ds.recent_alerts.iter().enumerate() {
        if !seen.insert(a.id) {
            issues.push(issue(
                file,
                "duplicate-id",
                "error",
                format!("$.recentAlerts[{}].id", i),
                format!("Alert id {} appears more than once", a.id),
            ));
        }
        check_score(
            &mut issues,
            file,
            format!("$.recentAlerts[{}].confidence", i),
            "confidence",
            a.confidence,
        );
        if NaiveDate::parse_from_str(a.predicted_date.trim(), "%Y-%m-%d").is_err() {
            issues.push(issue(
                file,
                "predicted-date",
                "error",
                format!("$.recentAlerts[{}].predictedDate", i),
                format!(
                    "'{}' is not a calendar date (expected YYYY-MM-DD)",
                    a.predicted_date
                ),
            ));
        }
        if !matches!(a.kind, Status::Critical | Status::Warning) {
            issues.push(issue(
                file,
                "alert-type",
                "warning",
                format!("$.recentAlerts[{}].type", i),
                format!("Alert {} has type '{}'; expected critical or warning", a.id, a.kind),
            ));
        }
    }
    issues
}

/// Number of error-level issues.
pub fn error_count(issues: &[Issue]) -> usize {
    issues.iter().filter(|i| i.severity == "error").count()
}

fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

fn check_file(root: &Path, path: &Path) -> Vec<Issue> {
    let label = display_path(root, path);
    match dataset::load(path) {
        Ok(ds) => validate(&ds, &label),
        Err(e) => vec![issue(&label, "load", "error", "$".into(), e.to_string())],
    }
}

/// Check every dataset file matched by `patterns` (relative to `root`).
///
/// Files are validated in parallel; issues are ordered by file, then path.
/// A pattern that matches nothing is reported as an error.
pub fn run_check(root: &Path, patterns: &[String]) -> CheckReport {
    let mut issues: Vec<Issue> = Vec::new();
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs = root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        let before = targets.len();
        match glob(&pattern) {
            Ok(paths) => targets.extend(paths.flatten().filter(|p| p.is_file())),
            Err(e) => {
                issues.push(issue(
                    pat,
                    "load",
                    "error",
                    "$".into(),
                    format!("Invalid pattern: {}", e),
                ));
                continue;
            }
        }
        if targets.len() == before {
            issues.push(issue(
                pat,
                "load",
                "error",
                "$".into(),
                format!("No dataset files matched '{}'", pat),
            ));
        }
    }
    targets.sort();
    targets.dedup();

    let mut found: Vec<Issue> = targets
        .par_iter()
        .flat_map_iter(|p| check_file(root, p))
        .collect();
    found.sort_by(|a, b| a.file.cmp(&b.file).then(a.path.cmp(&b.path)));
    issues.extend(found);
    log::debug!("checked {} dataset file(s)", targets.len());
    CheckReport::from_issues(issues, targets.len())
}

/// Check the embedded sample dataset.
pub fn check_embedded() -> CheckReport {
    let label = dataset::DataSource::Embedded.describe();
    let issues = match dataset::sample() {
        Ok(ds) => validate(&ds, &label),
        Err(e) => vec![issue(&label, "load", "error", "$".into(), e.to_string())],
    };
    CheckReport::from_issues(issues, 1)
}
