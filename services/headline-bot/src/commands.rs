use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bill_headlines::config::AppConfig;
use bill_headlines::error::AppError;
use bill_headlines::sentence::conllu::{read_corpus, write_corpus};
use bill_headlines::sentence::udpipe::UdpipeClient;
use bill_headlines::sentence::ParsedCorpus;
use bill_headlines::storage::write_atomic;
use bill_headlines::workflows::congress::{BillArchive, BillRecord, CongressClient};
use bill_headlines::workflows::headlines::{BatchOutcome, HeadlinePipeline};
use bill_headlines::workflows::schedule::{
    plan_schedule, ConsolePoster, Dispatcher, MastodonPoster, Schedule, ScheduleStore,
    StatusPoster,
};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::cli::{DispatchArgs, GenerateArgs, PreviewArgs, RefreshArgs, RunArgs};

/// Loaded configuration plus the stores it points at.
pub(crate) struct Context {
    config: AppConfig,
    archive: BillArchive,
    schedule: ScheduleStore,
}

impl Context {
    pub(crate) fn new(config: AppConfig) -> Self {
        let archive = BillArchive::new(config.congress.archive_path.clone());
        let schedule = ScheduleStore::new(config.schedule.path.clone());
        Self {
            config,
            archive,
            schedule,
        }
    }

    fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.headlines.rng_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn corpus_path(&self) -> &Path {
        &self.config.parser.corpus_path
    }
}

pub(crate) async fn fetch(ctx: &Context, args: RefreshArgs) -> Result<(), AppError> {
    if ctx.archive.exists() && !args.force {
        info!(path = %ctx.archive.path().display(), "bill archive present, skipping download");
        return Ok(());
    }

    let client = CongressClient::new(ctx.config.congress.fetch_settings());
    let bills = client.fetch_all().await?;
    ctx.archive.save(&bills)?;
    info!(count = bills.len(), path = %ctx.archive.path().display(), "bill archive written");
    Ok(())
}

pub(crate) async fn parse(ctx: &Context, args: RefreshArgs) -> Result<(), AppError> {
    let bills = ctx.archive.load()?;
    let fresh = args.force || !ctx.corpus_path().exists();
    let mut corpus = if fresh {
        ParsedCorpus::new()
    } else {
        load_corpus(ctx.corpus_path())?
    };

    let titles: Vec<String> = bills.iter().map(BillRecord::sentence_text).collect();
    let client = UdpipeClient::new(ctx.config.parser.parse_settings());
    let summary = client
        .fill_corpus(titles.iter().map(String::as_str), &mut corpus)
        .await;

    if fresh || summary.parsed > 0 {
        write_atomic(ctx.corpus_path(), write_corpus(&corpus).as_bytes())?;
        info!(
            sentences = corpus.len(),
            path = %ctx.corpus_path().display(),
            "parse corpus written"
        );
    }
    Ok(())
}

pub(crate) fn generate(ctx: &Context, args: GenerateArgs) -> Result<(), AppError> {
    if ctx.schedule.exists() && !args.force {
        info!(path = %ctx.schedule.path().display(), "schedule present, skipping generation");
        return Ok(());
    }

    let mut rng = ctx.rng(args.seed);
    let outcome = headlines(ctx, &mut rng)?;
    let schedule = plan_schedule(outcome.headlines, ctx.config.schedule.epoch, &mut rng)?;
    ctx.schedule.save(&schedule)?;
    log_schedule(&schedule);
    Ok(())
}

pub(crate) fn preview(ctx: &Context, args: PreviewArgs) -> Result<(), AppError> {
    let mut rng = ctx.rng(args.seed);
    let outcome = headlines(ctx, &mut rng)?;

    for headline in outcome.headlines.iter().take(args.count) {
        println!("{}", headline.text);
    }
    println!(
        "\n{} headlines generated, {} bills skipped",
        outcome.headlines.len(),
        outcome.counts.total()
    );
    Ok(())
}

pub(crate) async fn dispatch(ctx: &Context, args: DispatchArgs) -> Result<(), AppError> {
    let schedule = ctx.schedule.load()?;
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let limit = ctx.config.schedule.post_char_limit;

    match ctx.config.poster.credentials() {
        Some((base_url, token)) if !args.dry_run => {
            let poster = MastodonPoster::new(base_url.to_string(), token.to_string());
            post(poster, limit, &schedule, today).await
        }
        credentials => {
            if credentials.is_none() && !args.dry_run {
                warn!("POST_BASE_URL or POST_ACCESS_TOKEN missing, printing instead of posting");
            }
            post(ConsolePoster, limit, &schedule, today).await
        }
    }
}

pub(crate) async fn run_all(ctx: &Context, args: RunArgs) -> Result<(), AppError> {
    fetch(ctx, RefreshArgs::default()).await?;
    parse(ctx, RefreshArgs::default()).await?;
    generate(ctx, GenerateArgs::default())?;
    dispatch(
        ctx,
        DispatchArgs {
            date: None,
            dry_run: args.dry_run,
        },
    )
    .await
}

fn headlines(ctx: &Context, rng: &mut StdRng) -> Result<BatchOutcome, AppError> {
    let bills = ctx.archive.load()?;
    let corpus = load_corpus(ctx.corpus_path())?;
    let pipeline = HeadlinePipeline::from_config(&ctx.config.headlines)?;
    Ok(pipeline.run_batch(&bills, &corpus, rng)?)
}

fn load_corpus(path: &Path) -> Result<ParsedCorpus, AppError> {
    let file = File::open(path)?;
    Ok(read_corpus(BufReader::new(file))?)
}

async fn post<P: StatusPoster>(
    poster: P,
    char_limit: usize,
    schedule: &Schedule,
    today: NaiveDate,
) -> Result<(), AppError> {
    let report = Dispatcher::new(poster, char_limit)
        .dispatch(schedule, today)
        .await?;
    for receipt in &report.posted {
        info!(id = %receipt.id, url = receipt.url.as_deref().unwrap_or("-"), "status posted");
    }
    Ok(())
}

fn log_schedule(schedule: &Schedule) {
    match (schedule.first_date(), schedule.last_date()) {
        (Some(first), Some(last)) => {
            info!(entries = schedule.len(), %first, %last, "schedule written");
        }
        _ => warn!("no headlines generated, schedule is empty"),
    }
}
