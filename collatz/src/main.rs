#![allow(missing_docs)]

use clap::Parser;
use color_eyre::eyre::bail;

mod stopping_time;

use stopping_time::{sequence, StoppingTime, StoppingTimes};

/// Verifies the Collatz conjecture for a range of numbers, memoizing stopping times in a chained
/// hash table.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Compute stopping times for every number from 1 up to and including this one.
    limit: u64,
    /// Print the Collatz sequence starting at the limit.
    #[clap(short = 'p', long)]
    print: bool,
    /// Initial number of slots of the memo table.
    #[clap(short = 'c', long, default_value = "8")]
    capacity: usize,
    /// Also log resizes of the memo table.
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    if args.verbose {
        chain_table_logger::setup_with_filter("debug");
    } else {
        chain_table_logger::setup();
    }

    if args.limit == 0 {
        bail!("the limit must be at least 1");
    }

    let mut times = StoppingTimes::with_capacity(args.capacity);
    let mut longest = StoppingTime { start: 1, steps: 0 };

    for start in 1..=args.limit {
        let steps = times.compute(start)?;
        if steps > longest.steps {
            longest = StoppingTime { start, steps };
        }
    }

    log::info!("every number from 1 to {} reaches 1", args.limit);
    log::info!(
        "longest stopping time: {} reaches 1 after {} steps",
        longest.start,
        longest.steps
    );

    let stats = times.stats();
    log::info!(
        "memo table: {} values in {} slots, {} occupied, longest chain {}",
        stats.len,
        stats.capacity,
        stats.occupied_buckets,
        stats.longest_chain
    );

    if args.print {
        let values = sequence(args.limit)?;
        let line = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{line}");
    }

    Ok(())
}
