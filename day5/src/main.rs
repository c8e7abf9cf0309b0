use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

mod almanac;
mod logging;
mod range_map;
mod solve;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Walk locations upwards through the inverted maps.
    InverseScan,
    /// Map every seed of every range, in parallel.
    BruteForce,
}

#[derive(Parser, Debug)]
#[command(name = "day5", about = "Day 5: If You Give A Seed A Fertilizer")]
struct Args {
    /// Puzzle input.
    input: PathBuf,
    /// How to answer the seed range question.
    #[arg(long, value_enum, default_value_t = Strategy::InverseScan)]
    strategy: Strategy,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let src = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let almanac = almanac::parse(&src)?;

    match solve::lowest_location(&almanac)? {
        Some(location) => println!("Question 1 answer is: {}", location),
        None => println!("Question 1 has no answer: no seeds listed"),
    }

    info!(strategy = ?args.strategy, "solving seed ranges");
    let lowest = match args.strategy {
        Strategy::InverseScan => solve::lowest_location_inverse_scan(&almanac)?,
        Strategy::BruteForce => solve::lowest_location_brute_force(&almanac)?,
    };
    match lowest {
        Some(location) => println!("Question 2 answer is: {}", location),
        None => println!("Question 2 has no answer: no location leads back to a seed"),
    }
    Ok(())
}
