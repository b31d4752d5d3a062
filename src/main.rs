//! spendfloor
//!
//! Prints the cheapest baskets of the given items that clear a spend threshold.
//!
//! Use `-f` to load a fixture set by name, or `--file` to load a fixture file
//! Use `-p` to add an item price, optionally with a minimum count (`-p 12.50:2`)
//! Use `-t`, `-c` and `-n` to set the threshold, the cap per item and the number of results

use std::{
    io::{self, Write},
    time::Instant,
};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};

use spendfloor::{
    cli::{OutputFormat, SearchArgs, init_logging},
    report::Report,
};

fn main() -> Result<()> {
    let args = SearchArgs::parse();

    init_logging(&args.log_level, args.log_format)?;

    let (price_list, search, currency) = args.resolve()?;

    let start = Instant::now();
    let outcome = search.explore(&price_list.snapshot())?;
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let report = Report::new(&outcome.combinations, search.threshold(), currency);

    match args.format {
        OutputFormat::Lines => report.write_lines(&mut handle)?,
        OutputFormat::Table => {
            report.write_table(&mut handle)?;

            writeln!(
                handle,
                " {} distinct combinations, {} nodes in {} ({}s)",
                outcome.distinct,
                outcome.nodes,
                elapsed.human(Truncate::Nano),
                elapsed.as_secs_f32()
            )?;
        }
    }

    Ok(())
}
