use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lexscan_core::{BatchOutcome, ExtractionPipeline};

#[derive(Parser)]
#[command(
    name = "lexscan",
    about = "Extract legal-domain entities from text",
    version
)]
struct Cli {
    /// Path to input text file (built-in sample text if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination for the extraction results
    #[arg(short, long, default_value = "extraction_results.json")]
    output: PathBuf,

    /// Destination for the extraction statistics
    #[arg(short, long, default_value = "extraction_stats.json")]
    stats: PathBuf,

    /// Number of entities to show in the console summary
    #[arg(long, default_value_t = 10)]
    preview: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pipeline = ExtractionPipeline::legal();
    let outcome = pipeline
        .run_batch_file(cli.input.as_deref(), &cli.output, &cli.stats)
        .await?;

    print_summary(&outcome, cli.preview);
    Ok(())
}

fn print_summary(outcome: &BatchOutcome, preview: usize) {
    let report = &outcome.report;

    println!("Extracted {} entities", report.statistics.total_entities);
    for entity in report.entities.iter().take(preview) {
        println!(
            "  {:<12} {:>4}..{:<4}  {}",
            entity.entity_type, entity.start, entity.end, entity.text
        );
    }
    if report.entities.len() > preview {
        println!("  ... and {} more", report.entities.len() - preview);
    }

    println!("Results written to {}", outcome.results_path.display());
    println!("Statistics written to {}", outcome.stats_path.display());
}
