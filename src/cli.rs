use crate::config::AppConfig;
use crate::error::AppError;
use crate::report::{build_ranking_report, range_warnings, render_range_warnings, render_text, ReportOptions};
use crate::roster;
use crate::telemetry;
use candidate_scoring::{Candidate, WeightingMode};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Ranker",
    about = "Rank and explain assessment candidates from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank a JSON roster of candidates
    Rank(RankArgs),
    /// Report raw values outside their plausible range
    Validate(ValidateArgs),
    /// List the available weighting modes
    Modes,
    /// Rank the built-in sample roster
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding an array of candidates
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding an array of candidates
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Weighting mode (balanced, performance, credibility). Unknown names use balanced.
    #[arg(long)]
    pub(crate) mode: Option<String>,
    /// Include driver, strengths and warnings for every candidate
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Skip the plausible-range check
    #[arg(long)]
    pub(crate) no_range_check: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, default_mode = %config.scoring.default_mode, "candidate ranker starting");

    match cli.command {
        Command::Rank(args) => {
            let candidates = roster::load_from_path(&args.input)?;
            print_ranking(&candidates, &args.output, &config)
        }
        Command::Validate(args) => {
            let candidates = roster::load_from_path(&args.input)?;
            let warnings = range_warnings(&candidates);
            if warnings.is_empty() {
                println!("All raw values are within their plausible ranges.");
            } else {
                print!("{}", render_range_warnings(&warnings));
            }
            Ok(())
        }
        Command::Modes => {
            for mode in WeightingMode::ALL {
                let definition = mode.definition();
                println!(
                    "{:<12} {:<18} AUTOEFF {:.2} | NPOQ-R {:.2} | BIDR {:.2}",
                    mode.name(),
                    definition.label,
                    definition.weights.efficacy,
                    definition.weights.risk,
                    definition.weights.credibility
                );
            }
            Ok(())
        }
        Command::Demo(args) => print_ranking(&roster::sample_roster(), &args.output, &config),
    }
}

fn print_ranking(
    candidates: &[Candidate],
    output: &OutputArgs,
    config: &AppConfig,
) -> Result<(), AppError> {
    let options = report_options(output, config);
    let report = build_ranking_report(candidates, options, Local::now());

    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}

fn report_options(output: &OutputArgs, config: &AppConfig) -> ReportOptions {
    ReportOptions {
        mode: output
            .mode
            .as_deref()
            .map(WeightingMode::resolve)
            .unwrap_or(config.scoring.default_mode),
        explain: output.explain,
        range_check: config.scoring.range_check && !output.no_range_check,
    }
}
