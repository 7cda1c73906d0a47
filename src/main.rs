mod classification;
mod error;
mod graphml;
mod trust_graph;
mod trust_records;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::trust_graph::run;

/// Transform a PowerView Get-DomainTrustMapping CSV export into a yEd
/// GraphML document.
#[derive(Parser)]
#[command(name = "trust-graph")]
#[command(author, version)]
struct Cli {
    /// trust file in .csv format (generate with PowerView)
    trust_file: PathBuf,
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let summary = run(&cli.trust_file)
        .with_context(|| format!("failed to convert {}", cli.trust_file.display()))?;

    tracing::debug!(nodes = summary.nodes, edges = summary.edges, "graph written");

    for warning in &summary.warnings {
        println!("[-] {}", warning);
    }

    println!("[+] Graphml written to \"{}\"", summary.output.display());
    println!("[*] Note: green = within forest, red = external, blue = forest to forest, black = MIT, violet = unrecognized");

    Ok(())
}
