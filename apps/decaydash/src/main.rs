//! decaydash CLI binary entry point.
//! Delegates to library modules for show/check/classify and prints results.

use clap::Parser;
use decaydash::cli::{ClassifyCmd, Cli, Commands};
use decaydash::config::{self, Effective, Overrides};
use decaydash::dataset::{self, DataSource};
use decaydash::filter::{self, Criteria, RepoFilter, TimeRange};
use decaydash::gate::{self, LoadGate};
use decaydash::models::{Status, Trend};
use decaydash::output::{self, RenderOptions, Section};
use decaydash::utils::{error_prefix, info_prefix, note_prefix};
use decaydash::{validate, DecayError};
use std::time::Duration;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn fail(err: &DecayError) -> ! {
    eprintln!("{} {}", error_prefix(), err);
    std::process::exit(2);
}

fn data_source(eff: &Effective) -> DataSource {
    match &eff.data {
        Some(p) => DataSource::File(p.clone()),
        None => DataSource::Embedded,
    }
}

fn run_show(eff: &Effective) -> i32 {
    let criteria = match (eff.repo.parse::<RepoFilter>(), eff.range.parse::<TimeRange>()) {
        (Ok(repo), Ok(range)) => Criteria { repo, range },
        (Err(e), _) | (_, Err(e)) => fail(&e),
    };
    let section: Section = eff.section.parse().unwrap_or_else(|e| fail(&e));

    if !eff.config_found && eff.output != "json" {
        eprintln!("{} No decaydash.toml found; using defaults.", note_prefix());
    }
    let source = data_source(eff);
    if source == DataSource::Embedded && eff.output != "json" {
        eprintln!(
            "{} No dataset configured; showing the embedded sample (pass --data to use your own).",
            info_prefix()
        );
    }

    // Start the gate before loading so the delay covers the load itself
    let mut load_gate = LoadGate::new(Duration::from_millis(eff.delay_ms));
    let mut ds = dataset::load_source(&source).unwrap_or_else(|e| fail(&e));

    let label = source.describe();
    let issues = validate::validate(&ds, &label);
    let errors = validate::error_count(&issues);
    if eff.strict && errors > 0 {
        output::print_check(
            &decaydash::models::CheckReport::from_issues(issues, 1),
            &eff.output,
            eff.color,
        );
        eprintln!("{} {}", error_prefix(), DecayError::Contract(errors));
        return 1;
    }
    let clamped = dataset::clamp_scores(&mut ds);
    if clamped > 0 && eff.output != "json" {
        eprintln!(
            "{} Clamped {} out-of-range score(s) into 0..=100.",
            note_prefix(),
            clamped
        );
    }

    let view = filter::filter(&ds, &criteria);
    gate::wait_with_spinner(&mut load_gate, eff.output != "json");

    let opts = RenderOptions {
        section,
        bar_width: eff.bar_width,
        color: output::use_colors(&eff.output, eff.color),
    };
    output::print_dashboard(&view, &criteria, &eff.output, &opts);
    0
}

fn run_check(eff: &Effective, cli_patterns: Vec<String>) -> i32 {
    let patterns = if !cli_patterns.is_empty() {
        cli_patterns
    } else {
        eff.check_patterns.clone()
    };
    let report = if !patterns.is_empty() {
        validate::run_check(&eff.repo_root, &patterns)
    } else if let Some(p) = &eff.data {
        let rel = pathdiff::diff_paths(p, &eff.repo_root).unwrap_or_else(|| p.clone());
        validate::run_check(&eff.repo_root, &[rel.to_string_lossy().to_string()])
    } else {
        if eff.output != "json" {
            eprintln!("{} No patterns given; checking the embedded sample.", info_prefix());
        }
        validate::check_embedded()
    };
    output::print_check(&report, &eff.output, eff.color);
    if report.summary.errors > 0 {
        1
    } else {
        0
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::Show {
            repo_root,
            data,
            repo,
            range,
            section,
            output,
            delay_ms,
            no_delay,
            bar_width,
            strict,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root,
                data,
                output,
                strict: if strict { Some(true) } else { None },
                repo,
                range,
                section,
                delay_ms: if no_delay { Some(0) } else { delay_ms },
                bar_width,
            });
            run_show(&eff)
        }
        Commands::Check {
            repo_root,
            output,
            patterns,
        } => {
            let eff = config::resolve_effective(&Overrides {
                repo_root,
                output,
                ..Overrides::default()
            });
            run_check(&eff, patterns)
        }
        Commands::Classify { cmd } => {
            let eff = config::resolve_effective(&Overrides::default());
            let (value, out) = match cmd {
                ClassifyCmd::Status { value, output } => {
                    (output::compose_status_json(&Status::from(value)), output)
                }
                ClassifyCmd::Trend { value, output } => {
                    (output::compose_trend_json(&Trend::from(value)), output)
                }
                ClassifyCmd::Risk { score, output } => (output::compose_bar_json(score), output),
            };
            let out = out.unwrap_or_else(|| eff.output.clone());
            output::print_classification(&value, &out, eff.color);
            0
        }
        Commands::Sample => {
            print!("{}", dataset::SAMPLE_JSON);
            0
        }
    };
    std::process::exit(code);
}
