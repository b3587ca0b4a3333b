//! Visual classification rules for the status panel.
//!
//! Three pure, total functions:
//! - `classify_status`: status tag to color triple and icon.
//! - `classify_trend`: trend tag to icon, color and label.
//! - `risk_bar`: numeric score to risk tier and bar fill.
//!
//! Colors are expressed as palette swatches (hue + shade) so the same
//! classification drives both the terminal renderer and the class names
//! emitted in JSON output (`text-red-600 bg-red-50 border-red-200`).

use crate::models::{Status, Trend};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hue {
    Red,
    Yellow,
    Green,
    Gray,
    Blue,
    Purple,
}

impl Hue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Gray => "gray",
            Hue::Blue => "blue",
            Hue::Purple => "purple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A palette entry, e.g. red-600.
pub struct Swatch {
    pub hue: Hue,
    pub shade: u16,
}

impl Swatch {
    pub const fn new(hue: Hue, shade: u16) -> Self {
        Swatch { hue, shade }
    }

    /// Utility class name with the given prefix (`text`, `bg`, `border`).
    pub fn class(&self, prefix: &str) -> String {
        format!("{}-{}-{}", prefix, self.hue.as_str(), self.shade)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Text, background and border colors for a badge.
pub struct ColorTriple {
    pub text: Swatch,
    pub background: Swatch,
    pub border: Swatch,
}

impl ColorTriple {
    const fn of(hue: Hue) -> Self {
        ColorTriple {
            text: Swatch::new(hue, 600),
            background: Swatch::new(hue, 50),
            border: Swatch::new(hue, 200),
        }
    }

    pub fn hue(&self) -> Hue {
        self.text.hue
    }

    pub fn classes(&self) -> String {
        format!(
            "{} {} {}",
            self.text.class("text"),
            self.background.class("bg"),
            self.border.class("border")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    AlertTriangle,
    Clock,
    CheckCircle,
    TrendingDown,
    TrendingUp,
    Activity,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::AlertTriangle => "alert-triangle",
            Icon::Clock => "clock",
            Icon::CheckCircle => "check-circle",
            Icon::TrendingDown => "trending-down",
            Icon::TrendingUp => "trending-up",
            Icon::Activity => "activity",
        }
    }

    /// Single-cell terminal glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::AlertTriangle => "▲",
            Icon::Clock => "◷",
            Icon::CheckCircle => "✔",
            Icon::TrendingDown => "↘",
            Icon::TrendingUp => "↗",
            Icon::Activity => "∿",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub colors: ColorTriple,
    pub icon: Icon,
}

/// Map a status to its badge colors and icon. Unknown statuses render gray
/// with the clock icon.
pub fn classify_status(status: &Status) -> StatusStyle {
    match status {
        Status::Critical => StatusStyle {
            colors: ColorTriple::of(Hue::Red),
            icon: Icon::AlertTriangle,
        },
        Status::Warning => StatusStyle {
            colors: ColorTriple::of(Hue::Yellow),
            icon: Icon::Clock,
        },
        Status::Healthy => StatusStyle {
            colors: ColorTriple::of(Hue::Green),
            icon: Icon::CheckCircle,
        },
        Status::Unknown(_) => StatusStyle {
            colors: ColorTriple::of(Hue::Gray),
            icon: Icon::Clock,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendStyle {
    pub icon: Icon,
    pub color: Swatch,
    pub label: &'static str,
    pub arrow: &'static str,
}

impl TrendStyle {
    /// Label with its arrow, e.g. `↓ Declining`.
    pub fn caption(&self) -> String {
        format!("{} {}", self.arrow, self.label)
    }
}

/// Map a trend to icon, color and label. Only `declining` and `improving`
/// are distinguished; everything else (including `stable` and `critical`)
/// is neutral.
pub fn classify_trend(trend: &Trend) -> TrendStyle {
    match trend {
        Trend::Declining => TrendStyle {
            icon: Icon::TrendingDown,
            color: Swatch::new(Hue::Red, 500),
            label: "Declining",
            arrow: "↓",
        },
        Trend::Improving => TrendStyle {
            icon: Icon::TrendingUp,
            color: Swatch::new(Hue::Green, 500),
            label: "Improving",
            arrow: "↑",
        },
        Trend::Stable | Trend::Critical | Trend::Unknown(_) => TrendStyle {
            icon: Icon::Activity,
            color: Swatch::new(Hue::Gray, 500),
            label: "Stable",
            arrow: "→",
        },
    }
}

/// Color of the raw trend badge shown on technology rows. Same as the trend
/// color except that `critical` is strong red.
pub fn trend_badge_color(trend: &Trend) -> Swatch {
    match trend {
        Trend::Critical => Swatch::new(Hue::Red, 600),
        other => classify_trend(other).color,
    }
}

/// Lower bound (inclusive) of the medium risk band.
pub const MEDIUM_RISK_FLOOR: i64 = 40;
/// Lower bound (inclusive) of the high risk band.
pub const HIGH_RISK_FLOOR: i64 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn hue(&self) -> Hue {
        match self {
            RiskTier::Low => Hue::Green,
            RiskTier::Medium => Hue::Yellow,
            RiskTier::High => Hue::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "low risk",
            RiskTier::Medium => "medium risk",
            RiskTier::High => "high risk",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

/// Clamp a score into `[0, 100]`.
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// Tier for a score. Both cut points belong to the higher band.
pub fn risk_tier(score: i64) -> RiskTier {
    if score >= HIGH_RISK_FLOOR {
        RiskTier::High
    } else if score >= MEDIUM_RISK_FLOOR {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A progress bar: tier color plus a fill percentage equal to the score.
pub struct RiskBar {
    pub tier: RiskTier,
    pub width: u8,
}

impl RiskBar {
    pub fn fill(&self) -> Swatch {
        Swatch::new(self.tier.hue(), 500)
    }

    pub fn text(&self) -> Swatch {
        Swatch::new(self.tier.hue(), 600)
    }

    /// Number of filled cells for a bar drawn `cells` wide.
    pub fn filled_cells(&self, cells: usize) -> usize {
        (f64::from(self.width) * cells as f64 / 100.0).round() as usize
    }
}

/// Map a score to its bar. Out-of-range scores are clamped first so the bar
/// is never over-full or negative.
pub fn risk_bar(score: i64) -> RiskBar {
    let width = clamp_score(score);
    RiskBar {
        tier: risk_tier(width as i64),
        width,
    }
}
