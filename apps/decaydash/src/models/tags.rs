//! Closed tag enums for categorical dataset fields.
//!
//! Every enum accepts any string on input. Unrecognized values land in an
//! explicit catch-all variant so classification stays total.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Health status of a repository, or the severity of an alert.
///
/// Tags match exactly; `"Critical"` or `" healthy "` are not recognized.
pub enum Status {
    Critical,
    Warning,
    Healthy,
    Unknown(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Critical => "critical",
            Status::Warning => "warning",
            Status::Healthy => "healthy",
            Status::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Unknown(_))
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown(String::new())
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "critical" => Status::Critical,
            "warning" => Status::Warning,
            "healthy" => Status::Healthy,
            other => Status::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match Status::from(s.as_str()) {
            Status::Unknown(_) => Status::Unknown(s),
            known => known,
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        match s {
            Status::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Direction a repository or technology is moving in.
///
/// `Critical` only occurs on technology rows; it colors the trend badge but
/// is otherwise treated like any unrecognized trend.
pub enum Trend {
    Declining,
    Improving,
    Stable,
    Critical,
    Unknown(String),
}

impl Trend {
    pub fn as_str(&self) -> &str {
        match self {
            Trend::Declining => "declining",
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Critical => "critical",
            Trend::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Trend::Unknown(_))
    }
}

impl Default for Trend {
    fn default() -> Self {
        Trend::Unknown(String::new())
    }
}

impl From<&str> for Trend {
    fn from(s: &str) -> Self {
        match s {
            "declining" => Trend::Declining,
            "improving" => Trend::Improving,
            "stable" => Trend::Stable,
            "critical" => Trend::Critical,
            other => Trend::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Trend {
    fn from(s: String) -> Self {
        match Trend::from(s.as_str()) {
            Trend::Unknown(_) => Trend::Unknown(s),
            known => known,
        }
    }
}

impl From<Trend> for String {
    fn from(t: Trend) -> Self {
        match t {
            Trend::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Where a repository's content lives.
pub enum SourceType {
    GitHub,
    Confluence,
    Internal,
    Other(String),
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::GitHub => "GitHub",
            SourceType::Confluence => "Confluence",
            SourceType::Internal => "Internal",
            SourceType::Other(s) => s.as_str(),
        }
    }
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::Other(String::new())
    }
}

impl From<String> for SourceType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "github" => SourceType::GitHub,
            "confluence" => SourceType::Confluence,
            "internal" => SourceType::Internal,
            _ => SourceType::Other(s),
        }
    }
}

impl From<SourceType> for String {
    fn from(s: SourceType) -> Self {
        match s {
            SourceType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentinel used in place of a star count for non-public sources.
pub const INTERNAL_STARS: &str = "Internal";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Popularity as a display string (e.g. `185k`), or the `Internal` sentinel.
pub enum Stars {
    #[default]
    Internal,
    Count(String),
}

impl Stars {
    /// Display text, or `None` when the sentinel hides the count.
    pub fn visible(&self) -> Option<&str> {
        match self {
            Stars::Internal => None,
            Stars::Count(s) => Some(s.as_str()),
        }
    }
}

impl From<String> for Stars {
    fn from(s: String) -> Self {
        if s == INTERNAL_STARS {
            Stars::Internal
        } else {
            Stars::Count(s)
        }
    }
}

impl From<Stars> for String {
    fn from(s: Stars) -> Self {
        match s {
            Stars::Internal => INTERNAL_STARS.to_string(),
            Stars::Count(s) => s,
        }
    }
}
