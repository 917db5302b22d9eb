use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abe_feed::config::FeedConfig;
use abe_feed::snapshot::FeedSnapshot;
use abe_feed::{
    format_float, format_percent, Error, FeedMode, FeedOutput, FeedPipeline, ReplyViewModel,
    Result, ScoreAggregator, ScoreBreakdown,
};

#[derive(Parser)]
#[command(name = "abe-feed", about = "Reply visibility and feed ordering engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the ordered feed a viewer sees for one prompt.
    Feed(FeedArgs),
    /// Print the vote percentages of replies.
    Scores(ScoresArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct FeedArgs {
    /// Snapshot JSON path; stdin when omitted or `-`.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value = "locked")]
    mode: String,
    /// Seed for the top-block shuffle; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ScoresArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    /// Only report this reply.
    #[arg(long)]
    reply: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/feed.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abe_feed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Feed(args) => run_feed(args).await,
        Command::Scores(args) => run_scores(args).await,
        Command::InitConfig(args) => run_init_config(args),
    }
}

async fn run_feed(args: FeedArgs) -> Result<()> {
    let mode = FeedMode::from_str(&args.mode)
        .ok_or_else(|| Error::InvalidInput(format!("invalid feed mode: {}", args.mode)))?;
    let (config, config_path) = FeedConfig::load(args.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        info!(path = %path.display(), "loaded config");
    }

    let snapshot = read_snapshot(args.input.as_deref()).await?;
    let replies = snapshot.replies();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pipeline = FeedPipeline::from_config(&config);
    let output = pipeline.build(&replies, &snapshot.viewer, mode, &mut rng);
    info!(mode = mode.label(), items = output.items.len(), "feed resolved");

    if args.json {
        print_json(&output)?;
    } else {
        print_feed(&output);
    }
    Ok(())
}

async fn run_scores(args: ScoresArgs) -> Result<()> {
    let (config, _) = FeedConfig::load(args.config)?;
    let snapshot = read_snapshot(args.input.as_deref()).await?;
    let aggregator = ScoreAggregator::new(config.chart.clone());

    let mut reports = Vec::new();
    for reply in snapshot.replies() {
        if let Some(wanted) = args.reply.as_deref() {
            if reply.id != wanted {
                continue;
            }
        }
        reports.push((reply.id.clone(), aggregator.breakdown(&reply.scores)));
    }
    if let Some(wanted) = args.reply.as_deref() {
        if reports.is_empty() {
            return Err(Error::InvalidInput(format!("reply not found: {}", wanted)));
        }
    }

    if args.json {
        let payload: Vec<serde_json::Value> = reports
            .iter()
            .map(|(id, breakdown)| serde_json::json!({ "reply_id": id, "breakdown": breakdown }))
            .collect();
        print_json(&payload)?;
    } else {
        for (id, breakdown) in &reports {
            print_breakdown(id, breakdown);
        }
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<()> {
    FeedConfig::default().write(&args.path)?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

async fn read_snapshot(input: Option<&Path>) -> Result<FeedSnapshot> {
    match input {
        Some(path) if path != Path::new("-") => FeedSnapshot::load(path).await,
        _ => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            FeedSnapshot::from_json(&buffer)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| Error::InvalidInput(format!("failed to serialize output: {}", err)))?;
    println!("{}", payload);
    Ok(())
}

fn print_feed(output: &FeedOutput) {
    println!("Feed: {}", output.mode.label());
    if output.mode == FeedMode::MyReply {
        match &output.my_reply {
            Some(item) => print_item(1, item),
            None => println!("  (no reply yet)"),
        }
        return;
    }
    if output.items.is_empty() {
        println!("  (empty)");
    }
    for (idx, item) in output.items.iter().enumerate() {
        print_item(idx + 1, item);
    }
}

fn print_item(position: usize, item: &ReplyViewModel) {
    let relation = if item.is_current_users_friend { "friend" } else { "other" };
    let state = if item.is_unlocked { "unlocked" } else { "locked" };
    let score = item
        .viewer_score
        .as_ref()
        .map(|score| format!(" | rated {}", score.value))
        .unwrap_or_default();
    println!(
        "{:>3}. {} [{} | {}{}] {}",
        position,
        item.id(),
        relation,
        state,
        score,
        item.reply.body
    );
}

fn print_breakdown(id: &str, breakdown: &ScoreBreakdown) {
    let average = breakdown
        .average
        .map(|value| format_float(value, 2))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Reply {}: {} votes, average {}",
        id, breakdown.total_votes, average
    );
    for bucket in &breakdown.buckets {
        println!(
            "  {}: {:>8} ({} votes, bar {})",
            bucket.value,
            format_percent(bucket.percentage),
            bucket.votes,
            format_float(bucket.bar_height, 1)
        );
    }
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
