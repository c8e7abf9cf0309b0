use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod logging;
mod race;

#[derive(Parser, Debug)]
#[command(name = "day6", about = "Day 6: Wait For It")]
struct Args {
    /// Puzzle input.
    input: PathBuf,
    /// Check every hold time instead of solving the quadratic.
    #[arg(long)]
    brute_force: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let src = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let races = race::parse(&src)?;
    let count = if args.brute_force {
        race::count_winning_hold_times_brute
    } else {
        race::count_winning_hold_times
    };

    println!(
        "Question 1 answer is: {}",
        races.iter().map(count).product::<u64>()
    );
    let big_race = race::make_big_race(&races)?;
    info!(time = big_race.time, record = big_race.record, "kerned race");
    println!("Question 2 answer is: {}", count(&big_race));
    Ok(())
}
