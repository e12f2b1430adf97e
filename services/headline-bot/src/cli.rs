use crate::commands::{self, Context};
use bill_headlines::config::AppConfig;
use bill_headlines::error::AppError;
use bill_headlines::telemetry;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "headline-bot",
    about = "Turn congressional bill titles into daily superlative headlines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download bill records into the local archive
    Fetch(RefreshArgs),
    /// Parse archived bill titles into the CoNLL-U corpus
    Parse(RefreshArgs),
    /// Generate headlines and write a fresh posting schedule
    Generate(GenerateArgs),
    /// Print generated headlines without touching the schedule
    Preview(PreviewArgs),
    /// Post the headlines scheduled for a day
    Dispatch(DispatchArgs),
    /// Fetch, parse, generate and dispatch in one pass (default command)
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct RefreshArgs {
    /// Rebuild the artifact even when it already exists
    #[arg(long)]
    pub(crate) force: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GenerateArgs {
    /// Replace an existing schedule
    #[arg(long)]
    pub(crate) force: bool,
    /// Seed for phrase choice and schedule order
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Number of headlines to print
    #[arg(long, default_value_t = 10)]
    pub(crate) count: usize,
    /// Seed for phrase choice
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DispatchArgs {
    /// Day to dispatch (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Print instead of posting
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Print instead of posting
    #[arg(long)]
    pub(crate) dry_run: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    bill_headlines::workflows::schedule::parse_date(raw)
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let ctx = Context::new(config);

    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(RunArgs::default()));

    match command {
        Command::Fetch(args) => commands::fetch(&ctx, args).await,
        Command::Parse(args) => commands::parse(&ctx, args).await,
        Command::Generate(args) => commands::generate(&ctx, args),
        Command::Preview(args) => commands::preview(&ctx, args),
        Command::Dispatch(args) => commands::dispatch(&ctx, args).await,
        Command::Run(args) => commands::run_all(&ctx, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["headline-bot"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn dispatch_accepts_an_explicit_date() {
        let cli = Cli::try_parse_from([
            "headline-bot",
            "dispatch",
            "--date",
            "2017-03-10",
            "--dry-run",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Dispatch(args)) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2017, 3, 10));
                assert!(args.dry_run);
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(Cli::try_parse_from(["headline-bot", "dispatch", "--date", "10/03/2017"]).is_err());
    }

    #[test]
    fn preview_defaults_to_ten() {
        let cli = Cli::try_parse_from(["headline-bot", "preview", "--seed", "4"]).expect("parses");
        match cli.command {
            Some(Command::Preview(args)) => {
                assert_eq!(args.count, 10);
                assert_eq!(args.seed, Some(4));
            }
            other => panic!("expected preview, got {other:?}"),
        }
    }
}
