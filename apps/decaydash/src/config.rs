//! Configuration discovery and effective settings resolution.
//!
//! decaydash reads `decaydash.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `data`: none (embedded sample dataset)
//! - `output`: `human`
//! - `strict`: false (out-of-range scores are clamped)
//! - `color`: true (still disabled by `NO_COLOR` or json output)
//! - `show.repo|range|section`: `all`
//! - `show.delay_ms`: 1500
//! - `show.bar_width`: 24 (kept within 1..=200)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::gate::DEFAULT_DELAY_MS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BAR_WIDTH: usize = 24;
/// Widest bar, in cells, the human renderer will draw.
pub const MAX_BAR_WIDTH: usize = 200;

const CONFIG_NAMES: [&str; 3] = ["decaydash.toml", "decaydash.yaml", "decaydash.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Dashboard rendering section under `[show]`.
pub struct ShowCfg {
    pub repo: Option<String>,
    pub range: Option<String>,
    pub section: Option<String>,
    pub delay_ms: Option<u64>,
    pub bar_width: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Dataset check section under `[check]`.
pub struct CheckCfg {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `decaydash.toml|yaml`.
pub struct DashConfig {
    /// Dataset path, relative to the repository root.
    pub data: Option<String>,
    pub output: Option<String>,
    pub strict: Option<bool>,
    pub color: Option<bool>,
    #[serde(default)]
    pub show: Option<ShowCfg>,
    #[serde(default)]
    pub check: Option<CheckCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` falls through to config.
pub struct Overrides {
    pub repo_root: Option<String>,
    pub data: Option<String>,
    pub output: Option<String>,
    pub strict: Option<bool>,
    pub repo: Option<String>,
    pub range: Option<String>,
    pub section: Option<String>,
    pub delay_ms: Option<u64>,
    pub bar_width: Option<usize>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    /// Absolute dataset path; `None` selects the embedded sample.
    pub data: Option<PathBuf>,
    pub output: String,
    pub strict: bool,
    pub color: bool,
    pub repo: String,
    pub range: String,
    pub section: String,
    pub delay_ms: u64,
    pub bar_width: usize,
    pub check_patterns: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `decaydash.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `DashConfig` from `decaydash.toml` or `decaydash.yaml|yml` if present.
/// A file that fails to parse is reported and ignored.
pub fn load_config(root: &Path) -> Option<DashConfig> {
    let toml_path = root.join("decaydash.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return match toml::from_str::<DashConfig>(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                log::warn!("ignoring {}: {}", toml_path.display(), e);
                None
            }
        };
    }
    for yml in ["decaydash.yaml", "decaydash.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return match serde_yaml::from_str::<DashConfig>(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    log::warn!("ignoring {}: {}", p.display(), e);
                    None
                }
            };
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Effective {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let show = cfg.show.clone().unwrap_or_default();

    // CLI paths are taken as given; config paths are relative to the root
    let data = match (&cli.data, &cfg.data) {
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(p)) => Some(repo_root.join(p)),
        (None, None) => None,
    };

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let strict = cli.strict.or(cfg.strict).unwrap_or(false);
    let color = cfg.color.unwrap_or(true);
    let repo = cli
        .repo
        .clone()
        .or(show.repo)
        .unwrap_or_else(|| "all".to_string());
    let range = cli
        .range
        .clone()
        .or(show.range)
        .unwrap_or_else(|| "all".to_string());
    let section = cli
        .section
        .clone()
        .or(show.section)
        .unwrap_or_else(|| "all".to_string());
    let delay_ms = cli.delay_ms.or(show.delay_ms).unwrap_or(DEFAULT_DELAY_MS);
    let bar_width = cli
        .bar_width
        .or(show.bar_width)
        .unwrap_or(DEFAULT_BAR_WIDTH)
        .clamp(1, MAX_BAR_WIDTH);
    let check_patterns = cfg.check.map(|c| c.patterns).unwrap_or_default();

    Effective {
        repo_root,
        config_found,
        data,
        output,
        strict,
        color,
        repo,
        range,
        section,
        delay_ms,
        bar_width,
        check_patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> Overrides {
        Overrides {
            repo_root: root.to_str().map(str::to_string),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(&at(dir.path()));
        assert!(eff.data.is_none());
        assert_eq!(eff.output, "human");
        assert!(!eff.strict);
        assert_eq!(eff.repo, "all");
        assert_eq!(eff.range, "all");
        assert_eq!(eff.delay_ms, 1500);
        assert_eq!(eff.bar_width, DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("decaydash.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
data = "data/dash.json"
output = "json"
strict = true
[show]
range = "30days"
delay_ms = 0
bar_width = 40
[check]
patterns = ["data/*.json"]
    "#
        )
        .unwrap();

        let eff = resolve_effective(&at(root));
        assert!(eff.config_found);
        assert_eq!(eff.data, Some(root.join("data/dash.json")));
        assert_eq!(eff.output, "json");
        assert!(eff.strict);
        assert_eq!(eff.range, "30days");
        assert_eq!(eff.delay_ms, 0);
        assert_eq!(eff.bar_width, 40);
        assert_eq!(eff.check_patterns, vec!["data/*.json".to_string()]);
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("decaydash.yml"),
            "output: human\ncolor: false\nshow:\n  repo: react\n  section: repos\n",
        )
        .unwrap();
        let eff = resolve_effective(&at(root));
        assert!(!eff.color);
        assert_eq!(eff.repo, "react");
        assert_eq!(eff.section, "repos");
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("decaydash.toml"),
            "output = \"json\"\nstrict = true\n[show]\ndelay_ms = 900\nrepo = \"react\"\n",
        )
        .unwrap();
        let eff = resolve_effective(&Overrides {
            output: Some("human".into()),
            strict: Some(false),
            delay_ms: Some(0),
            data: Some("elsewhere.yaml".into()),
            ..at(root)
        });
        assert_eq!(eff.output, "human");
        assert!(!eff.strict);
        assert_eq!(eff.delay_ms, 0);
        assert_eq!(eff.repo, "react");
        assert_eq!(eff.data, Some(PathBuf::from("elsewhere.yaml")));
    }

    #[test]
    fn test_bar_width_is_bounded() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let huge = resolve_effective(&Overrides {
            bar_width: Some(usize::MAX),
            ..at(root)
        });
        assert_eq!(huge.bar_width, MAX_BAR_WIDTH);
        let zero = resolve_effective(&Overrides {
            bar_width: Some(0),
            ..at(root)
        });
        assert_eq!(zero.bar_width, 1);
    }

    #[test]
    fn test_root_detected_from_subdirectory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("decaydash.toml"), "output = \"json\"\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }

    #[test]
    fn test_invalid_config_is_ignored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("decaydash.toml"), "output = [").unwrap();
        assert!(load_config(root).is_none());
        let eff = resolve_effective(&at(root));
        assert_eq!(eff.output, "human");
    }
}
