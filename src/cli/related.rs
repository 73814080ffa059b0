use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::GenomeIndex;
use crate::cli::{IndexArgs, OutputFormat};
use crate::core::genome::Genome;
use crate::core::types::RelatedGenome;
use crate::matching::engine::{MatchError, MatchingConfig, MatchingEngine};
use crate::parsing::fasta::parse_fasta_file;

#[derive(Args)]
pub struct RelatedArgs {
    /// FASTA file of query genomes; each record is compared separately
    #[arg(required = true)]
    pub query: PathBuf,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Length of the disjoint fragments a query is cut into (defaults to --min-search-length)
    #[arg(short = 'l', long)]
    pub fragment_length: Option<usize>,

    /// Only count exact fragment matches (no substituted base)
    #[arg(long)]
    pub exact: bool,

    /// Minimum percentage of query fragments a genome must match (0-100)
    #[arg(short, long, default_value = "0")]
    pub threshold: f64,
}

/// Execute related subcommand
///
/// # Errors
///
/// Returns an error if the query or genome files cannot be parsed or the fragment
/// length is below the index search length. A query with no related genomes is
/// reported but is not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RelatedArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&args.threshold) {
        anyhow::bail!(
            "Threshold must be between 0 and 100, got {}",
            args.threshold
        );
    }

    let queries = parse_fasta_file(&args.query)?;
    let index = args.index.build_index(verbose)?;

    if verbose {
        eprintln!("Loaded {} query genome(s)", queries.len());
    }

    let config = MatchingConfig {
        exact_match_only: args.exact,
        match_percent_threshold: args.threshold,
        fragment_match_length: args.fragment_length,
        ..MatchingConfig::default()
    };

    let engine = MatchingEngine::new(&index);
    let mut results: Vec<(&Genome, Vec<RelatedGenome>)> = Vec::with_capacity(queries.len());
    for query in &queries {
        match engine.related_with_config(query, &config) {
            Ok(related) => results.push((query, related)),
            Err(MatchError::NoRelatedGenomes) => {
                eprintln!("No related genomes found for '{}'.", query.name());
                results.push((query, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    match format {
        OutputFormat::Text => print_text_results(&results, &config, &index),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(
    results: &[(&Genome, Vec<RelatedGenome>)],
    config: &MatchingConfig,
    index: &GenomeIndex,
) {
    println!("Related Genomes");
    println!("{}", "=".repeat(60));
    println!(
        "Fragment length: {}, threshold: {:.2}%, {}",
        config.fragment_match_length_for(index),
        config.match_percent_threshold,
        if config.exact_match_only {
            "exact matches"
        } else {
            "up to one substitution"
        }
    );

    for (query, related) in results {
        println!("\nQuery: {} ({} bases)", query.name(), query.len());
        if related.is_empty() {
            println!("  (none)");
        }
        for (rank, genome) in related.iter().enumerate() {
            println!(
                "  #{} {}: {:.2}%",
                rank + 1,
                genome.genome_name,
                genome.percent_match
            );
        }
    }
}

fn print_json_results(results: &[(&Genome, Vec<RelatedGenome>)]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|(query, related)| {
            serde_json::json!({
                "query": query.name(),
                "query_length": query.len(),
                "related": related,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[(&Genome, Vec<RelatedGenome>)]) {
    println!("query\trank\tgenome\tpercent_match");
    for (query, related) in results {
        for (rank, genome) in related.iter().enumerate() {
            println!(
                "{}\t{}\t{}\t{:.4}",
                query.name(),
                rank + 1,
                genome.genome_name,
                genome.percent_match
            );
        }
    }
}
