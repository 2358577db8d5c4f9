mod cli;
mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use cli::{Args, Command};
use owo_colors::OwoColorize;
use seqtool_core::RunReport;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; info for our own crates otherwise
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("seqtool=info,seqtool_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Convert(convert) => {
            let report = commands::convert::run(convert, &args.vgmstream, &args.ifstools)?;
            print_report(&report);
            if !report.is_success() {
                bail!("{} of {} tasks failed", report.failures.len(), report.task_count());
            }
            Ok(())
        }
        Command::Vas(vas) => {
            let metadata = commands::vas::run(vas, &args.vgmstream)?;
            println!(
                "{} {} samples ({})",
                "Extracted".green().bold(),
                metadata.entries.len(),
                metadata.archive_type.tag()
            );
            Ok(())
        }
    }
}

fn print_report(report: &RunReport) {
    for name in &report.succeeded {
        println!("  {} {}", "ok".green(), name);
    }
    for failure in &report.failures {
        println!("  {} {}: {}", "failed".red().bold(), failure.name, failure.error);
    }
    println!(
        "{} {}/{} tasks",
        "Done".bold(),
        report.succeeded.len(),
        report.task_count()
    );
}
