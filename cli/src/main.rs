//! banco CLI - Command-line front end for the baccarat EV engine
//!
//! Builds a shoe from counts or from the cards seen so far, prices every bet
//! and prints Kelly stakes for the positive-EV ones.

mod report;

use anyhow::{anyhow, bail, Context};
use banco_engine::{calculate_ev, PayoutTable, Rank, ShoeState, DEFAULT_DECKS, RANKS};
use banco_session::{recommend, KellySizer, ShoeTracker};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "banco",
    author,
    version,
    about = "Exact baccarat EV calculator",
    long_about = None
)]
struct Args {
    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value_t = Level::INFO, global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price every bet for the current shoe
    Calc(CalcArgs),
    /// Print the default payout table as YAML
    Payouts,
    /// Time full-shoe calculations
    Bench {
        #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        iterations: u32,
    },
}

#[derive(clap::Args, Debug)]
struct CalcArgs {
    /// Decks in a fresh shoe
    #[arg(long, default_value_t = DEFAULT_DECKS)]
    decks: u32,

    /// Remaining count per rank, A through K
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    counts: Option<Vec<i64>>,

    /// Cards dealt since the counts were taken, e.g. A,5,K,10
    #[arg(long, value_delimiter = ',')]
    seen: Vec<Rank>,

    /// YAML payout table; missing fields keep their defaults
    #[arg(long)]
    payouts: Option<PathBuf>,

    /// Rolling rebate in percent of turnover
    #[arg(long, default_value_t = 0.0)]
    rolling: f64,

    #[arg(long, default_value_t = 1_000_000.0)]
    bankroll: f64,

    /// Fraction of full Kelly to stake
    #[arg(long, default_value_t = 1.0)]
    kelly: f64,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Calc(calc) => run_calc(&calc),
        Command::Payouts => {
            print!("{}", serde_yaml::to_string(&PayoutTable::default())?);
            Ok(())
        }
        Command::Bench { iterations } => run_bench(iterations),
    }
}

fn run_calc(args: &CalcArgs) -> anyhow::Result<()> {
    let shoe = build_shoe(args)?;
    let payouts = load_payouts(args.payouts.as_deref())?;
    let rebate = args.rolling / 100.0;
    info!(total_cards = shoe.total(), rebate, "calculating");

    let result = calculate_ev(&shoe, &payouts, rebate).context("calculation failed")?;
    let sizer = KellySizer::new(args.bankroll).with_multiplier(args.kelly);
    let picks = recommend(&result, &sizer);

    if args.json {
        println!("{}", report::to_json(&result, &picks)?);
    } else {
        report::print_table(&result, &sizer);
        report::print_recommendations(&picks);
    }
    Ok(())
}

fn build_shoe(args: &CalcArgs) -> anyhow::Result<ShoeState> {
    let mut tracker = match &args.counts {
        Some(counts) => {
            let counts: [i64; RANKS] = counts
                .as_slice()
                .try_into()
                .map_err(|_| anyhow!("--counts needs {RANKS} values, got {}", counts.len()))?;
            ShoeTracker::from_shoe(args.decks, ShoeState::try_from_signed(counts)?)
        }
        None => ShoeTracker::new(args.decks),
    };

    let missing = tracker.record(&args.seen);
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|r| r.label()).collect();
        bail!("more cards seen than the shoe holds: {}", labels.join(","));
    }
    Ok(tracker.snapshot())
}

fn load_payouts(path: Option<&Path>) -> anyhow::Result<PayoutTable> {
    let Some(path) = path else {
        return Ok(PayoutTable::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn run_bench(iterations: u32) -> anyhow::Result<()> {
    println!("Running full-shoe benchmark...");
    println!("Iterations: {}", iterations);

    let shoe = ShoeState::full(DEFAULT_DECKS);
    let payouts = PayoutTable::default();
    let started = Instant::now();
    let mut deals = 0;
    for _ in 0..iterations {
        deals = calculate_ev(&shoe, &payouts, 0.0)?.deals;
    }
    let elapsed = started.elapsed();
    let per_shoe_ms = elapsed.as_secs_f64() * 1_000.0 / iterations as f64;
    let deals_per_sec = deals as f64 * iterations as f64 / elapsed.as_secs_f64();

    println!("Results:");
    println!("  Deals per shoe: {}", deals);
    println!("  Mean: {:.2} ms per shoe", per_shoe_ms);
    println!("  Throughput: {:.2}M deals/sec", deals_per_sec / 1_000_000.0);
    Ok(())
}
