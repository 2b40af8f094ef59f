//! dicepool_roll - roll a pool from the command line
//!
//! Prints each die's chain, the successes and total, then the session history.

use anyhow::{bail, Result};
use clap::Parser;
use dicepool::dice::{Face, Triggers};
use dicepool::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One-shot dice pool roller
#[derive(Parser, Debug)]
#[command(name = "dicepool_roll", version, about = "Roll an exploding d10 pool")]
struct Args {
    /// Base number of dice
    #[arg(short, long)]
    base: u32,

    /// Extra dice added to the base
    #[arg(short, long, default_value_t = 0)]
    modifier: u32,

    /// Face that explodes (8, 9 or 10; repeat or comma-separate)
    #[arg(short, long = "explode", value_delimiter = ',')]
    explode: Vec<Face>,

    /// Roll the same pool this many times
    #[arg(short, long, default_value_t = 1)]
    times: u32,

    /// RNG seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Rolls kept in the printed history
    #[arg(long)]
    history_limit: Option<usize>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicepool=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.times == 0 {
        bail!("--times must be at least 1");
    }
    let triggers = Triggers::new(args.explode)?;

    let mut config = Config::load(None)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(limit) = args.history_limit {
        config.history_limit = limit;
    }
    let mut session = config.session()?;

    for round in 1..=args.times {
        let report = session.roll(args.base, args.modifier, triggers.clone())?;
        if args.times > 1 {
            println!("Roll {}:", round);
        }
        for line in report.outcome.lines() {
            println!("{}", line);
        }
        println!("Successes: {}", report.outcome.successes());
        println!("Fails: {}", report.outcome.fails());
        println!("Total: {}", report.outcome.total());
        println!();
    }

    println!("History:");
    println!("{}", session.history().render_all());

    Ok(())
}
