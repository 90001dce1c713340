//! # morpho-lab
//!
//! Command-line driver for the morphology engines.

#![deny(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use morpho_core::ErrorTag;
use morpho_guidance::GuidanceVersion;
use morpho_lab::{Content, LabSession, load_responses, repl, report};
use morpho_settings::loader::parse_version;
use morpho_settings::{
    LogFormat, MorphoSettings, SettingsError, apply_env_overrides, load_settings,
    load_settings_from_path, settings_path,
};
use serde_json::Value;
use tracing::warn;

/// Morphology lab: suffix joins, evidence checks and task routing.
#[derive(Parser, Debug)]
#[command(name = "morpho-lab", version, about)]
struct Cli {
    /// Settings file (default `~/.morpho/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Task content file (overrides settings).
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Route table file (overrides settings).
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Use the sample content compiled into the binary.
    #[arg(long, global = true, conflicts_with_all = ["tasks", "routes"])]
    sample: bool,

    /// Evidence heuristics version (overrides settings).
    #[arg(long, global = true, value_parser = parse_guidance_version)]
    guidance: Option<GuidanceVersion>,

    /// Log line format, `compact` or `json` (overrides settings).
    #[arg(long, global = true, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a base + suffix join.
    Join {
        /// Base morpheme.
        base: String,
        /// Suffix.
        suffix: String,
        /// Prefix to prepend.
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Check learner responses for sufficient evidence.
    Check {
        /// Task id.
        #[arg(long)]
        task: String,
        /// JSON object of field id to text.
        #[arg(long)]
        responses: PathBuf,
    },
    /// Score learner responses with the legacy scorer.
    Score {
        /// Task id.
        #[arg(long)]
        task: String,
        /// JSON object of field id to text.
        #[arg(long)]
        responses: PathBuf,
    },
    /// Show the task routed to after `task`.
    Next {
        /// Task id.
        #[arg(long)]
        task: String,
        /// The task was mastered.
        #[arg(long)]
        mastered: bool,
        /// Error tag, highest priority first; repeatable.
        #[arg(long = "error-tag")]
        error_tags: Vec<ErrorTag>,
    },
    /// Work through the content interactively on stdin.
    Run {
        /// First task (overrides settings).
        #[arg(long)]
        start: Option<String>,
    },
}

fn parse_guidance_version(val: &str) -> std::result::Result<GuidanceVersion, String> {
    parse_version(val).ok_or_else(|| format!("unknown guidance version '{val}' (expected v1 or v2)"))
}

fn parse_log_format(val: &str) -> std::result::Result<LogFormat, String> {
    parse_version(val).ok_or_else(|| format!("unknown log format '{val}' (expected compact or json)"))
}

/// Settings for this run, plus the error that forced defaults if any.
fn load_config(cli: &Cli) -> Result<(MorphoSettings, Option<SettingsError>)> {
    let (mut settings, fallback) = match &cli.settings {
        Some(path) => {
            let settings = load_settings_from_path(path)
                .with_context(|| format!("failed to load settings: {}", path.display()))?;
            (settings, None)
        }
        None => match load_settings() {
            Ok(settings) => (settings, None),
            Err(err) => {
                let mut settings = MorphoSettings::default();
                apply_env_overrides(&mut settings);
                (settings, Some(err))
            }
        },
    };
    if let Some(version) = cli.guidance {
        settings.guidance.version = version;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    if let Some(path) = &cli.tasks {
        settings.content.tasks_path = path.display().to_string();
    }
    if let Some(path) = &cli.routes {
        settings.content.routes_path = path.display().to_string();
    }
    Ok((settings, fallback))
}

fn load_content(cli: &Cli, settings: &MorphoSettings) -> Result<Content> {
    if cli.sample {
        Content::sample()
    } else {
        Content::load(&settings.content)
    }
}

fn print_json(value: &Value) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, fallback) = load_config(&cli)?;
    match settings.logging.format {
        LogFormat::Compact => morpho_core::logging::init_subscriber(&settings.logging.level),
        LogFormat::Json => morpho_core::logging::init_json_subscriber(&settings.logging.level),
    }
    if let Some(err) = fallback {
        warn!(error = %err, path = %settings_path().display(), "settings not loaded, using defaults");
    }

    match &cli.command {
        Command::Join {
            base,
            suffix,
            prefix,
        } => print_json(&report::join_report(base, suffix, prefix.as_deref())),
        Command::Check { task, responses } => {
            let content = load_content(&cli, &settings)?;
            let responses = load_responses(responses)?;
            let rules = settings.guidance.rules();
            print_json(&report::check_report(&content, &rules, task, &responses)?)
        }
        Command::Score { task, responses } => {
            let content = load_content(&cli, &settings)?;
            let responses = load_responses(responses)?;
            let rules = settings.scoring.rules();
            print_json(&report::score_report(&content, &rules, task, &responses)?)
        }
        Command::Next {
            task,
            mastered,
            error_tags,
        } => {
            let content = load_content(&cli, &settings)?;
            print_json(&report::next_report(&content, task, *mastered, error_tags)?)
        }
        Command::Run { start } => {
            let content = load_content(&cli, &settings)?;
            let requested = start.as_deref().or(settings.content.start_task.as_deref());
            let start = content.start_task_id(requested)?;
            let mut session = LabSession::new(
                content,
                &start,
                settings.guidance.rules(),
                settings.scoring.rules(),
            )?;
            let stdin = std::io::stdin().lock();
            let mut stdout = std::io::stdout().lock();
            repl::run(&mut session, stdin, &mut stdout).context("interactive session failed")
        }
    }
}
