use clap::Args;

use crate::catalog::store::GenomeIndex;
use crate::cli::{IndexArgs, OutputFormat};

#[derive(Args)]
pub struct GenomesArgs {
    #[command(flatten)]
    pub index: IndexArgs,
}

/// Execute genomes subcommand
///
/// # Errors
///
/// Returns an error if the genome files cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: GenomesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let index = args.index.build_index(verbose)?;

    match format {
        OutputFormat::Text => print_text_listing(&index),
        OutputFormat::Json => print_json_listing(&index)?,
        OutputFormat::Tsv => print_tsv_listing(&index),
    }

    Ok(())
}

fn print_text_listing(index: &GenomeIndex) {
    println!(
        "{} genomes, {} windows of {} bases\n",
        index.genome_count(),
        index.window_count(),
        index.min_search_length()
    );
    println!("{:<40} {:>12}", "Name", "Length");
    println!("{}", "-".repeat(53));
    for genome in index.genomes() {
        println!("{:<40} {:>12}", genome.name(), genome.len());
    }
}

fn print_json_listing(index: &GenomeIndex) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "min_search_length": index.min_search_length(),
        "window_count": index.window_count(),
        "genomes": index.genomes().iter().map(|g| {
            serde_json::json!({"name": g.name(), "length": g.len()})
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_listing(index: &GenomeIndex) {
    println!("name\tlength");
    for genome in index.genomes() {
        println!("{}\t{}", genome.name(), genome.len());
    }
}
