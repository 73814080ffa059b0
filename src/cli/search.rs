use clap::Args;

use crate::cli::{IndexArgs, OutputFormat};
use crate::core::types::FragmentHit;
use crate::matching::engine::{MatchError, MatchingConfig, MatchingEngine};
use crate::utils::validation::normalize_sequence;

#[derive(Args)]
pub struct SearchArgs {
    /// DNA fragment to look for (A, C, G, T, N; case-insensitive)
    #[arg(required = true)]
    pub fragment: String,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Minimum number of bases that must match (defaults to --min-search-length)
    #[arg(short, long)]
    pub minimum_length: Option<usize>,

    /// Only report exact matches (no substituted base)
    #[arg(long)]
    pub exact: bool,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the fragment is not DNA, the index cannot be built, or a
/// length precondition is violated. Finding no match is not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let fragment = normalize_sequence(args.fragment.as_bytes())?;
    let index = args.index.build_index(verbose)?;

    let config = MatchingConfig {
        exact_match_only: args.exact,
        minimum_length: args.minimum_length,
        ..MatchingConfig::default()
    };

    if verbose {
        eprintln!(
            "Searching {} bases, minimum match {} ({})",
            fragment.len(),
            config.minimum_length_for(&index),
            if config.exact_match_only {
                "exact"
            } else {
                "up to one substitution"
            }
        );
    }

    let engine = MatchingEngine::new(&index);
    let hits = match engine.search_with_config(&fragment, &config) {
        Ok(hits) => hits,
        Err(MatchError::NoMatches) => {
            eprintln!("No genomes contain this fragment.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => print_text_results(&fragment, &hits),
        OutputFormat::Json => print_json_results(&fragment, &hits)?,
        OutputFormat::Tsv => print_tsv_results(&hits),
    }

    Ok(())
}

fn print_text_results(fragment: &str, hits: &[FragmentHit]) {
    println!("Fragment Search Results");
    println!("{}", "=".repeat(60));
    println!("\nFragment: {fragment} ({} bases)", fragment.len());
    println!("Genomes matched: {}\n", hits.len());

    for hit in hits {
        println!(
            "  {}: {} bases at position {}",
            hit.genome_name, hit.match_length, hit.position
        );
    }
}

fn print_json_results(fragment: &str, hits: &[FragmentHit]) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "fragment": fragment,
        "matches": hits.iter().map(|h| {
            serde_json::json!({
                "genome_name": h.genome_name,
                "position": h.position,
                "match_length": h.match_length,
                "genome_length": h.genome_length,
            })
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(hits: &[FragmentHit]) {
    println!("genome\tposition\tmatch_length\tgenome_length");
    for hit in hits {
        println!(
            "{}\t{}\t{}\t{}",
            hit.genome_name, hit.position, hit.match_length, hit.genome_length
        );
    }
}
