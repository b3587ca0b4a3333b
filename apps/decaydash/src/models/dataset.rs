//! Dataset schema consumed by the renderers.
//!
//! Wire names are camelCase:
//! `{ summary, repositories[], technologyTrends[], recentAlerts[] }`.
//! Scores are kept as plain integers so out-of-range input survives parsing
//! and can be reported (or clamped) at the load boundary.

use super::tags::{SourceType, Stars, Status, Trend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Top-level dataset.
pub struct Dataset {
    #[serde(default)]
    pub summary: SummaryMetrics,
    #[serde(default)]
    pub repositories: Vec<RepositorySummary>,
    #[serde(default)]
    pub technology_trends: Vec<TechnologyTrend>,
    #[serde(default)]
    pub recent_alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Headline counters. Supplied independently of the lists below.
pub struct SummaryMetrics {
    pub total_items: u64,
    pub critical_items: u64,
    pub warning_items: u64,
    pub healthy_items: u64,
    pub avg_decay_score: f64,
    pub hours_at_risk: u64,
    pub cost_impact: u64,
    pub predictions_today: u64,
    pub accuracy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    #[serde(rename = "type", default)]
    pub source: SourceType,
    pub decay_score: i64,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub critical_files: u64,
    #[serde(default)]
    pub warning_files: u64,
    #[serde(default)]
    pub healthy_files: u64,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub stars: Stars,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyTrend {
    pub tech: String,
    pub decay_risk: i64,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub questions: u64,
    #[serde(default)]
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A predicted decay event. `id` must be unique within the alert list.
pub struct Alert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Status,
    pub message: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub predicted_date: String,
    pub confidence: i64,
    #[serde(default)]
    pub impact: String,
}
