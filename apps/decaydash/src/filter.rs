//! Dataset filtering for the repository and time-range selectors.
//!
//! `filter` is pure: it returns a narrowed copy and never touches the input.
//! Summary counters and technology rows are never filtered.

use crate::error::{DecayError, Result};
use crate::models::Dataset;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RepoFilter {
    #[default]
    All,
    /// Case-insensitive repository name.
    Named(String),
}

impl RepoFilter {
    fn matches(&self, name: &str) -> bool {
        match self {
            RepoFilter::All => true,
            RepoFilter::Named(want) => want.eq_ignore_ascii_case(name.trim()),
        }
    }
}

impl FromStr for RepoFilter {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(RepoFilter::All)
        } else {
            Ok(RepoFilter::Named(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    All,
    Days7,
    Days30,
    Days90,
}

impl TimeRange {
    pub fn max_age_days(&self) -> Option<u32> {
        match self {
            TimeRange::All => None,
            TimeRange::Days7 => Some(7),
            TimeRange::Days30 => Some(30),
            TimeRange::Days90 => Some(90),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Days7 => "7days",
            TimeRange::Days30 => "30days",
            TimeRange::Days90 => "90days",
        }
    }
}

impl FromStr for TimeRange {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(TimeRange::All),
            "7days" | "7d" => Ok(TimeRange::Days7),
            "30days" | "30d" => Ok(TimeRange::Days30),
            "90days" | "90d" => Ok(TimeRange::Days90),
            _ => Err(DecayError::InvalidValue {
                what: "time range",
                value: s.to_string(),
                expected: "all, 7days, 30days, 90days",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Selector state applied before rendering.
pub struct Criteria {
    pub repo: RepoFilter,
    pub range: TimeRange,
}

impl Criteria {
    pub fn is_noop(&self) -> bool {
        self.repo == RepoFilter::All && self.range == TimeRange::All
    }
}

fn age_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+)\s+(day|week|month|year)s?\s+ago\s*$").expect("valid age regex")
    })
}

/// Parse a relative age like `2 days ago` into days. `today` is 0,
/// `yesterday` is 1; anything else unrecognized yields `None`.
pub fn parse_age_days(text: &str) -> Option<u32> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("today") || t.eq_ignore_ascii_case("just now") {
        return Some(0);
    }
    if t.eq_ignore_ascii_case("yesterday") {
        return Some(1);
    }
    let caps = age_re().captures(t)?;
    let n: u32 = caps[1].parse().ok()?;
    let per = match caps[2].to_ascii_lowercase().as_str() {
        "day" => 1,
        "week" => 7,
        "month" => 30,
        _ => 365,
    };
    n.checked_mul(per)
}

/// Apply `criteria` to a dataset.
///
/// - Repository filter keeps repositories with a matching name, and alerts
///   whose `repo` matches the same name.
/// - Time range keeps repositories updated within the range. Rows whose age
///   cannot be parsed are kept.
pub fn filter(ds: &Dataset, criteria: &Criteria) -> Dataset {
    if criteria.is_noop() {
        return ds.clone();
    }
    let max_age = criteria.range.max_age_days();
    let repositories: Vec<_> = ds
        .repositories
        .iter()
        .filter(|r| criteria.repo.matches(&r.name))
        .filter(|r| match (max_age, parse_age_days(&r.last_updated)) {
            (Some(max), Some(age)) => age <= max,
            _ => true,
        })
        .cloned()
        .collect();
    let recent_alerts: Vec<_> = ds
        .recent_alerts
        .iter()
        .filter(|a| criteria.repo.matches(&a.repo))
        .cloned()
        .collect();
    log::debug!(
        "filter repo={:?} range={}: {}/{} repositories, {}/{} alerts",
        criteria.repo,
        criteria.range.as_str(),
        repositories.len(),
        ds.repositories.len(),
        recent_alerts.len(),
        ds.recent_alerts.len()
    );
    Dataset {
        summary: ds.summary.clone(),
        repositories,
        technology_trends: ds.technology_trends.clone(),
        recent_alerts,
    }
}
