//! Shared data models: the dashboard dataset and check report structs.

pub mod dataset;
pub mod tags;

pub use dataset::{Alert, Dataset, RepositorySummary, SummaryMetrics, TechnologyTrend};
pub use tags::{SourceType, Stars, Status, Trend};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// A single data-contract issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub severity: String,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Aggregated check summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Check results container.
pub struct CheckReport {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl CheckReport {
    /// Build a report, tallying issues by severity.
    pub fn from_issues(issues: Vec<Issue>, files: usize) -> Self {
        let mut summary = Summary {
            files,
            ..Summary::default()
        };
        for is in &issues {
            match is.severity.as_str() {
                "error" => summary.errors += 1,
                "warning" => summary.warnings += 1,
                _ => summary.infos += 1,
            }
        }
        CheckReport { issues, summary }
    }
}
