//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "decaydash",
    version,
    about = "Predictive data decay status panel",
    long_about = "decaydash — render a data-decay dataset (repositories, technology risk, alerts) as a terminal dashboard or JSON.\n\nConfiguration precedence: CLI > decaydash.toml > defaults.",
    after_help = "Examples:\n  decaydash show\n  decaydash show --data data/dash.json --range 30days --no-delay\n  decaydash show --section alerts --output json\n  decaydash check 'data/*.json'\n  decaydash classify risk 70",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging (RUST_LOG overrides)")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current decaydash version.")]
    Version,
    /// Render the dashboard
    #[command(
        about = "Render the dashboard",
        long_about = "Load the dataset, apply the repository/time-range filters, wait for the load gate, then render. Out-of-range scores are clamped unless --strict is set.",
        after_help = "Examples:\n  decaydash show --repo react\n  decaydash show --data dash.yaml --strict --output json"
    )]
    Show {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Dataset file (.json|.toml|.yaml); default: embedded sample")]
        data: Option<String>,
        #[arg(long, help = "Repository filter: all or a repository name")]
        repo: Option<String>,
        #[arg(long, help = "Time range: all|7days|30days|90days (default: all)")]
        range: Option<String>,
        #[arg(long, help = "Section: all|summary|repos|tech|alerts (default: all)")]
        section: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Load gate delay in milliseconds (default: 1500)")]
        delay_ms: Option<u64>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip the load gate delay")]
        no_delay: bool,
        #[arg(long, help = "Progress bar width in cells (default: 24)")]
        bar_width: Option<usize>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Reject datasets that violate the data contract")]
        strict: bool,
    },
    /// Validate dataset files
    #[command(
        about = "Validate dataset files",
        long_about = "Check score ranges, alert ids, predicted dates and tags. Error-level issues exit non-zero.",
        after_help = "Examples:\n  decaydash check\n  decaydash check 'data/*.json' --output json"
    )]
    Check {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        /// Glob patterns relative to the repository root
        #[arg(help = "Dataset file patterns (default: [check].patterns, data, or embedded sample)")]
        patterns: Vec<String>,
    },
    /// Run a single classifier
    Classify {
        #[command(subcommand)]
        cmd: ClassifyCmd,
    },
    /// Print the embedded sample dataset
    #[command(
        about = "Print the sample dataset",
        long_about = "Print the embedded demo dataset as JSON; use it as a template for your own data."
    )]
    Sample,
}

#[derive(Subcommand)]
/// Subcommands for `decaydash classify`
pub enum ClassifyCmd {
    #[command(about = "Classify a status tag", long_about = "Color triple and icon for a status tag.")]
    Status {
        value: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    #[command(about = "Classify a trend tag", long_about = "Icon, color and label for a trend tag.")]
    Trend {
        value: String,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    #[command(about = "Map a risk score", long_about = "Risk tier and bar width for a 0-100 score.")]
    Risk {
        #[arg(allow_hyphen_values = true)]
        score: i64,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
