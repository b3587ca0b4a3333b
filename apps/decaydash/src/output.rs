//! Output rendering for the dashboard, dataset checks, and classifier lookups.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries each
//! row's raw fields next to its classification (class names, icon, tier) so
//! other front-ends can reuse the same visual decisions.

use crate::classify::{
    classify_status, classify_trend, risk_bar, trend_badge_color, Hue, RiskBar,
};
use crate::error::{DecayError, Result};
use crate::filter::Criteria;
use crate::models::{
    Alert, CheckReport, Dataset, RepositorySummary, Status, SummaryMetrics, TechnologyTrend, Trend,
};
use crate::utils::{bold, cost_k, dim, paint, thousands};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fmt::Write as _;
use std::str::FromStr;

pub fn use_colors(output: &str, color_cfg: bool) -> bool {
    output != "json" && color_cfg && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which part of the dashboard to render.
pub enum Section {
    #[default]
    All,
    Summary,
    Repos,
    Tech,
    Alerts,
}

impl Section {
    fn shows(&self, part: Section) -> bool {
        *self == Section::All || *self == part
    }
}

impl FromStr for Section {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Section::All),
            "summary" => Ok(Section::Summary),
            "repos" | "repositories" => Ok(Section::Repos),
            "tech" | "technology" => Ok(Section::Tech),
            "alerts" => Ok(Section::Alerts),
            _ => Err(DecayError::InvalidValue {
                what: "section",
                value: s.to_string(),
                expected: "all, summary, repos, tech, alerts",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub section: Section,
    pub bar_width: usize,
    pub color: bool,
}

/// Print the dashboard in the requested format.
pub fn print_dashboard(ds: &Dataset, criteria: &Criteria, output: &str, opts: &RenderOptions) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_dashboard_json(ds, criteria, opts.section))
                .unwrap_or_default()
        ),
        _ => print!("{}", render_human(ds, opts)),
    }
}

fn heading(out: &mut String, title: &str, subtitle: &str, color: bool) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", bold(&format!("── {} ──", title), color));
    let _ = writeln!(out, "{}", dim(subtitle, color));
}

fn draw_bar(bar: &RiskBar, cells: usize, color: bool) -> String {
    let filled = bar.filled_cells(cells);
    let full = "█".repeat(filled);
    let empty = "░".repeat(cells.saturating_sub(filled));
    format!(
        "{}{}",
        paint(&full, bar.tier.hue(), color),
        paint(&empty, Hue::Gray, color)
    )
}

/// Render the human dashboard to a string.
pub fn render_human(ds: &Dataset, opts: &RenderOptions) -> String {
    let color = opts.color;
    let mut out = String::new();

    let title = format!("⚡ {}", TITLE);
    let badges = format!(
        "{} {}",
        paint("[Live Demo]", Hue::Green, color),
        paint("[BigQuery AI]", Hue::Blue, color)
    );
    let _ = writeln!(out, "{}  {}", bold(&title, color), badges);
    let _ = writeln!(out, "{}", dim(SUBTITLE, color));

    if opts.section.shows(Section::Summary) {
        render_summary(&mut out, &ds.summary, color);
    }
    if opts.section.shows(Section::Repos) {
        heading(
            &mut out,
            "Repository Health Overview",
            "Real-time decay detection across all data sources",
            color,
        );
        if ds.repositories.is_empty() {
            let _ = writeln!(out, "  {}", dim("No repositories match the current filters.", color));
        }
        for r in &ds.repositories {
            render_repository(&mut out, r, opts.bar_width, color);
        }
    }
    if opts.section.shows(Section::Tech) {
        heading(
            &mut out,
            "Technology Risk Assessment",
            "AI-powered analysis of technology obsolescence trends",
            color,
        );
        for t in &ds.technology_trends {
            render_technology(&mut out, t, opts.bar_width, color);
        }
    }
    if opts.section.shows(Section::Alerts) {
        heading(
            &mut out,
            "Predictive Decay Alerts",
            "AI predictions of content that will become outdated",
            color,
        );
        if ds.recent_alerts.is_empty() {
            let _ = writeln!(out, "  {}", dim("No alerts.", color));
        }
        for a in &ds.recent_alerts {
            render_alert(&mut out, a, color);
        }
    }
    if opts.section == Section::All {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", dim(TAGLINE, color));
    }
    out
}

const TITLE: &str = "Predictive Data Decay Detection System";
const SUBTITLE: &str =
    "AI-powered early warning system for outdated documentation, code, and knowledge bases";
const TAGLINE: &str = "\"The future of data management is predictive, not reactive.\"";

fn render_summary(out: &mut String, s: &SummaryMetrics, color: bool) {
    heading(out, "Executive Summary", "Headline counters", color);
    let cards: [(&str, String, Hue, String); 6] = [
        ("Total Items", thousands(s.total_items), Hue::Blue, String::new()),
        (
            "Critical Risk",
            s.critical_items.to_string(),
            Hue::Red,
            "Immediate attention".to_string(),
        ),
        (
            "Avg Decay Score",
            format!("{}%", s.avg_decay_score),
            Hue::Yellow,
            "Lower is better".to_string(),
        ),
        (
            "Est. Cost Impact",
            cost_k(s.cost_impact),
            Hue::Purple,
            format!("{} hrs at risk", thousands(s.hours_at_risk)),
        ),
        (
            "Predictions Today",
            s.predictions_today.to_string(),
            Hue::Blue,
            "AI-powered alerts".to_string(),
        ),
        (
            "Accuracy Rate",
            format!("{}%", s.accuracy_rate),
            Hue::Green,
            "Model performance".to_string(),
        ),
    ];
    for (label, value, hue, note) in cards.iter() {
        let value = format!("{:<10}", value);
        let _ = writeln!(
            out,
            "  {:<18} {} {}",
            label,
            bold(&paint(&value, *hue, color), color),
            dim(note, color)
        );
    }
}

fn render_repository(out: &mut String, r: &RepositorySummary, cells: usize, color: bool) {
    let status = classify_status(&r.status);
    let trend = classify_trend(&r.trend);
    let bar = risk_bar(r.decay_score);

    let _ = writeln!(out);
    let badge = format!("[{}% risk]", bar.width);
    let _ = writeln!(
        out,
        "  ⎇ {}  {} {}",
        bold(&r.name, color),
        paint(trend.icon.glyph(), trend.color.hue, color),
        paint(&badge, status.colors.hue(), color)
    );

    let mut meta: Vec<String> = vec![r.source.to_string(), r.language.clone()];
    if let Some(stars) = r.stars.visible() {
        meta.push(format!("★ {}", stars));
    }
    meta.push(format!("Updated {}", r.last_updated));
    let _ = writeln!(out, "    {}", dim(&meta.join(" • "), color));

    let _ = writeln!(
        out,
        "    {} {}  {} {}  {} {}",
        paint("●", Hue::Red, color),
        paint(&format!("{} critical", r.critical_files), Hue::Red, color),
        paint("●", Hue::Yellow, color),
        paint(&format!("{} warning", r.warning_files), Hue::Yellow, color),
        paint("●", Hue::Green, color),
        paint(&format!("{} healthy", r.healthy_files), Hue::Green, color),
    );
    let _ = writeln!(out, "    {} {:>3}%", draw_bar(&bar, cells, color), bar.width);
    let _ = writeln!(out, "    {}", paint(&trend.caption(), trend.color.hue, color));
}

fn render_technology(out: &mut String, t: &TechnologyTrend, cells: usize, color: bool) {
    let bar = risk_bar(t.decay_risk);
    let badge = format!("({})", t.trend);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        bold(&t.tech, color),
        paint(&badge, trend_badge_color(&t.trend).hue, color),
        dim(&format!("{} questions", t.questions), color)
    );
    let _ = writeln!(out, "    {}", dim(&t.recommendation, color));
    let risk = format!("{}% risk", bar.width);
    let _ = writeln!(
        out,
        "    {} {}",
        draw_bar(&bar, cells, color),
        bold(&paint(&risk, bar.text().hue, color), color)
    );
}

fn render_alert(out: &mut String, a: &Alert, color: bool) {
    let style = classify_status(&a.kind);
    let confidence = risk_bar(a.confidence).width;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {}  {}",
        paint(style.icon.glyph(), style.colors.hue(), color),
        bold(&a.message, color),
        dim(&format!("{}% confidence", confidence), color)
    );
    let _ = writeln!(
        out,
        "    {}  {}",
        dim(&format!("{}{}", a.repo, a.file), color),
        dim(&format!("Predicted: {}", a.predicted_date), color)
    );
    if !a.impact.is_empty() {
        let impact = if color {
            a.impact.italic().to_string()
        } else {
            a.impact.clone()
        };
        let _ = writeln!(out, "    {}", impact);
    }
}

pub fn compose_status_json(status: &Status) -> JsonVal {
    let style = classify_status(status);
    json!({
        "value": status.as_str(),
        "classes": style.colors.classes(),
        "hue": style.colors.hue(),
        "icon": style.icon.name(),
    })
}

pub fn compose_trend_json(trend: &Trend) -> JsonVal {
    let style = classify_trend(trend);
    json!({
        "value": trend.as_str(),
        "icon": style.icon.name(),
        "color": style.color.class("text"),
        "label": style.label,
        "caption": style.caption(),
        "badgeColor": trend_badge_color(trend).class("text"),
    })
}

pub fn compose_bar_json(score: i64) -> JsonVal {
    let bar = risk_bar(score);
    json!({
        "score": score,
        "tier": bar.tier,
        "label": bar.tier.label(),
        "width": bar.width,
        "fill": bar.fill().class("bg"),
        "text": bar.text().class("text"),
        "classes": format!("{} {}", bar.fill().class("bg"), bar.text().class("text")),
    })
}

fn compose_repository_json(r: &RepositorySummary) -> JsonVal {
    json!({
        "name": r.name,
        "type": r.source,
        "language": r.language,
        "stars": r.stars,
        "lastUpdated": r.last_updated,
        "criticalFiles": r.critical_files,
        "warningFiles": r.warning_files,
        "healthyFiles": r.healthy_files,
        "decayScore": r.decay_score,
        "status": compose_status_json(&r.status),
        "trend": compose_trend_json(&r.trend),
        "bar": compose_bar_json(r.decay_score),
    })
}

fn compose_technology_json(t: &TechnologyTrend) -> JsonVal {
    json!({
        "tech": t.tech,
        "recommendation": t.recommendation,
        "questions": t.questions,
        "decayRisk": t.decay_risk,
        "trend": compose_trend_json(&t.trend),
        "bar": compose_bar_json(t.decay_risk),
    })
}

fn compose_alert_json(a: &Alert) -> JsonVal {
    json!({
        "id": a.id,
        "type": compose_status_json(&a.kind),
        "message": a.message,
        "repo": a.repo,
        "file": a.file,
        "predictedDate": a.predicted_date,
        "confidence": a.confidence,
        "impact": a.impact,
    })
}

/// Compose the dashboard JSON object (pure) for testing/snapshot purposes.
pub fn compose_dashboard_json(ds: &Dataset, criteria: &Criteria, section: Section) -> JsonVal {
    let mut out = serde_json::Map::new();
    if section.shows(Section::Summary) {
        out.insert(
            "summary".into(),
            serde_json::to_value(&ds.summary).unwrap_or(JsonVal::Null),
        );
    }
    if section.shows(Section::Repos) {
        out.insert(
            "repositories".into(),
            ds.repositories.iter().map(compose_repository_json).collect(),
        );
    }
    if section.shows(Section::Tech) {
        out.insert(
            "technologyTrends".into(),
            ds.technology_trends.iter().map(compose_technology_json).collect(),
        );
    }
    if section.shows(Section::Alerts) {
        out.insert(
            "recentAlerts".into(),
            ds.recent_alerts.iter().map(compose_alert_json).collect(),
        );
    }
    let repo = match &criteria.repo {
        crate::filter::RepoFilter::All => "all".to_string(),
        crate::filter::RepoFilter::Named(n) => n.clone(),
    };
    out.insert(
        "filters".into(),
        json!({"repo": repo, "range": criteria.range.as_str()}),
    );
    JsonVal::Object(out)
}

fn severity_mark(severity: &str) -> (&'static str, &'static str, Hue) {
    match severity {
        "error" => ("⟦error⟧", "✖", Hue::Red),
        "warning" | "warn" => ("⟦warn⟧", "▲", Hue::Yellow),
        _ => ("⟦info⟧", "◆", Hue::Blue),
    }
}

/// Render check issues and the tally line to a string.
pub fn render_check(res: &CheckReport, color: bool) -> String {
    let mut out = String::new();
    for is in &res.issues {
        let (tag, icon, hue) = severity_mark(&is.severity);
        let _ = writeln!(
            out,
            "{} {} {} ❲{}❳ {}: {}",
            paint(icon, hue, color),
            bold(&paint(tag, hue, color), color),
            bold(&is.file, color),
            is.rule,
            is.path,
            is.message
        );
    }
    let summary = format!(
        "Summary: errors={} warnings={} infos={} files={}",
        res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.files
    );
    let _ = writeln!(out, "{}", bold(&summary, color));
    out
}

/// Print check results in the requested format.
pub fn print_check(res: &CheckReport, output: &str, color_cfg: bool) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_check_json(res)).unwrap_or_default()
        ),
        _ => print!("{}", render_check(res, use_colors(output, color_cfg))),
    }
}

/// Compose check JSON object (pure) for testing/snapshot purposes.
pub fn compose_check_json(res: &CheckReport) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Print one classifier lookup.
pub fn print_classification(value: &JsonVal, output: &str, color_cfg: bool) {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
        _ => {
            let color = use_colors(output, color_cfg);
            if let Some(obj) = value.as_object() {
                for (k, v) in obj {
                    let shown = match v {
                        JsonVal::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    println!("{:<12} {}", bold(k, color), shown);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample;
    use crate::filter::{RepoFilter, TimeRange};
    use crate::models::{SourceType, Stars};

    fn plain(section: Section) -> RenderOptions {
        RenderOptions {
            section,
            bar_width: 20,
            color: false,
        }
    }

    fn repo(score: i64, status: &str, trend: &str) -> RepositorySummary {
        RepositorySummary {
            name: "r".into(),
            source: SourceType::GitHub,
            decay_score: score,
            status: Status::from(status),
            last_updated: "1 day ago".into(),
            critical_files: 0,
            warning_files: 0,
            healthy_files: 0,
            trend: Trend::from(trend),
            language: "Rust".into(),
            stars: Stars::Internal,
        }
    }

    #[test]
    fn test_critical_declining_repository_renders_red() {
        let j = compose_repository_json(&repo(75, "critical", "declining"));
        assert_eq!(j["status"]["classes"], "text-red-600 bg-red-50 border-red-200");
        assert_eq!(j["trend"]["icon"], "trending-down");
        assert_eq!(j["bar"]["fill"], "bg-red-500");
        assert_eq!(j["bar"]["classes"], "bg-red-500 text-red-600");
        assert_eq!(j["bar"]["width"], 75);
    }

    #[test]
    fn test_healthy_improving_repository_renders_green() {
        let j = compose_repository_json(&repo(12, "healthy", "improving"));
        assert_eq!(j["status"]["classes"], "text-green-600 bg-green-50 border-green-200");
        assert_eq!(j["trend"]["icon"], "trending-up");
        assert_eq!(j["bar"]["fill"], "bg-green-500");
        assert_eq!(j["bar"]["width"], 12);
    }

    #[test]
    fn test_stable_technology_at_boundary_renders_yellow_and_neutral() {
        let t = TechnologyTrend {
            tech: "PHP 7".into(),
            decay_risk: 40,
            recommendation: String::new(),
            questions: 0,
            trend: Trend::Stable,
        };
        let j = compose_technology_json(&t);
        assert_eq!(j["bar"]["tier"], "medium");
        assert_eq!(j["bar"]["fill"], "bg-yellow-500");
        assert_eq!(j["bar"]["classes"], "bg-yellow-500 text-yellow-600");
        assert_eq!(j["bar"]["width"], 40);
        assert_eq!(j["trend"]["icon"], "activity");
        assert_eq!(j["trend"]["color"], "text-gray-500");
    }

    #[test]
    fn test_dashboard_json_sections_and_filters() {
        let ds = sample().unwrap();
        let crit = Criteria {
            repo: RepoFilter::Named("react".into()),
            range: TimeRange::Days30,
        };
        let all = compose_dashboard_json(&ds, &crit, Section::All);
        assert_eq!(all["summary"]["totalItems"], 2547);
        assert_eq!(all["repositories"].as_array().unwrap().len(), 5);
        assert_eq!(all["recentAlerts"][0]["type"]["icon"], "alert-triangle");
        assert_eq!(all["filters"]["repo"], "react");
        assert_eq!(all["filters"]["range"], "30days");

        let tech = compose_dashboard_json(&ds, &Criteria::default(), Section::Tech);
        assert!(tech.get("summary").is_none());
        assert!(tech.get("repositories").is_none());
        assert_eq!(tech["technologyTrends"][3]["trend"]["badgeColor"], "text-red-600");
    }

    #[test]
    fn test_human_render_contains_demo_rows() {
        let ds = sample().unwrap();
        let text = render_human(&ds, &plain(Section::All));
        assert!(text.contains("Predictive Data Decay Detection System"));
        assert!(text.contains("2,547"));
        assert!(text.contains("$1710K"));
        assert!(text.contains("17,100 hrs at risk"));
        assert!(text.contains("34.2%"));
        assert!(text.contains("★ 185k"));
        // Internal repositories hide the star count
        assert!(!text.contains("★ Internal"));
        assert!(text.contains("[75% risk]"));
        assert!(text.contains("↓ Declining"));
        assert!(text.contains("1247 questions"));
        assert!(text.contains("api-docs/auth/oauth.md"));
        assert!(text.contains("Predicted: 2025-01-15"));
        assert!(text.contains("92% confidence"));
    }

    #[test]
    fn test_human_bar_fill_matches_width() {
        let mut out = String::new();
        render_repository(&mut out, &repo(75, "critical", "declining"), 20, false);
        assert!(out.contains(&format!("{}{}", "█".repeat(15), "░".repeat(5))));
        assert!(out.contains(" 75%"));
    }

    #[test]
    fn test_section_only_renders_selected_part() {
        let ds = sample().unwrap();
        let text = render_human(&ds, &plain(Section::Alerts));
        assert!(text.contains("Predictive Decay Alerts"));
        assert!(!text.contains("Repository Health Overview"));
        assert!(!text.contains("Executive Summary"));
    }

    #[test]
    fn test_section_parse() {
        assert_eq!("repos".parse::<Section>().unwrap(), Section::Repos);
        assert_eq!("ALL".parse::<Section>().unwrap(), Section::All);
        assert!("footer".parse::<Section>().is_err());
    }

    #[test]
    fn test_technology_badge_shows_raw_trend_text() {
        let t = TechnologyTrend {
            tech: "Perl 5".into(),
            decay_risk: 55,
            recommendation: String::new(),
            questions: 3,
            trend: Trend::from("Flatlining"),
        };
        let mut out = String::new();
        render_technology(&mut out, &t, 10, false);
        assert!(out.contains("(Flatlining)"), "{out}");
        let j = compose_technology_json(&t);
        assert_eq!(j["trend"]["value"], "Flatlining");
        assert_eq!(j["trend"]["label"], "Stable");
    }

    #[test]
    fn test_capitalized_status_renders_gray() {
        let j = compose_repository_json(&repo(75, "Critical", "Declining"));
        assert_eq!(j["status"]["classes"], "text-gray-600 bg-gray-50 border-gray-200");
        assert_eq!(j["status"]["value"], "Critical");
        assert_eq!(j["trend"]["icon"], "activity");
    }

    #[test]
    fn test_render_check_lines_and_tally() {
        let issue = |severity: &str, rule: &str| crate::models::Issue {
            file: "d.json".into(),
            rule: rule.into(),
            severity: severity.into(),
            path: "$.recentAlerts[0]".into(),
            message: "msg".into(),
        };
        let res = CheckReport::from_issues(
            vec![issue("error", "duplicate-id"), issue("warning", "alert-type")],
            2,
        );
        let text = render_check(&res, false);
        assert!(text.contains("✖ ⟦error⟧ d.json ❲duplicate-id❳ $.recentAlerts[0]: msg"));
        assert!(text.contains("▲ ⟦warn⟧ d.json ❲alert-type❳"));
        assert!(text.contains("errors=1 warnings=1 infos=0 files=2"));
    }

    #[test]
    fn test_compose_check_json_shape() {
        let res = CheckReport::from_issues(
            vec![crate::models::Issue {
                file: "d.json".into(),
                rule: "score-range".into(),
                severity: "error".into(),
                path: "$.repositories[0].decayScore".into(),
                message: "msg".into(),
            }],
            1,
        );
        let out = compose_check_json(&res);
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["issues"][0]["path"], "$.repositories[0].decayScore");
    }
}
