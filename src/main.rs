//! ethos-bench — benchmark harness for the ethos decision engine
//!
//! Usage:
//!   ethos-bench                          → run every suite
//!   ethos-bench --test integrity         → seal/verify latency + tamper check
//!   ethos-bench --test pipeline          → decision latency over a mixed workload
//!   ethos-bench --test collective        → broadcast/coordinate scaling
//!
//! Results land as JSON under --output (default: results/).

mod bench;
mod report;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Suite {
    All,
    Integrity,
    Pipeline,
    Collective,
}

#[derive(Parser)]
#[command(
    name = "ethos-bench",
    about = "Benchmark harness for the ethos policy-evaluation engine",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Which suite to run
    #[arg(long = "test", value_enum, default_value = "all")]
    suite: Suite,

    /// Measured iterations per suite
    #[arg(short, long, default_value_t = 1000)]
    iterations: usize,

    /// Largest collective size for the scaling suite (powers of two up to this)
    #[arg(short, long, default_value_t = 64)]
    nodes: usize,

    /// Output directory for JSON reports
    #[arg(short, long, default_value = "results")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if matches!(cli.suite, Suite::All | Suite::Integrity) {
        let results = bench::run_integrity(cli.iterations);
        report::write_report(&cli.output, "integrity", results)?;
    }
    if matches!(cli.suite, Suite::All | Suite::Pipeline) {
        let results = bench::run_pipeline(cli.iterations).await;
        report::write_report(&cli.output, "pipeline", results)?;
    }
    if matches!(cli.suite, Suite::All | Suite::Collective) {
        let results = bench::run_collective(cli.iterations, cli.nodes).await;
        report::write_report(&cli.output, "collective", results)?;
    }

    Ok(())
}
