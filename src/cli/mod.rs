//! Command-line interface for genome-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find which genomes contain a DNA fragment
//! - **related**: Rank indexed genomes by similarity to query genomes
//! - **genomes**: List the genomes in the index
//! - **serve**: Start the HTTP API over the index
//!
//! Every command builds its index from one or more FASTA files given with
//! `--genomes`.
//!
//! ## Usage
//!
//! ```text
//! # Locate a fragment, allowing one substitution
//! genome-matcher search ACGTACGTAAGT --genomes data.fa
//!
//! # Exact matches of at least 15 bases, as JSON
//! genome-matcher search ACGTACGTAAGTCCGA --genomes data.fa --minimum-length 15 --exact --format json
//!
//! # Genomes sharing at least 20% of a query's 12-base fragments
//! genome-matcher related query.fa --genomes data.fa --fragment-length 12 --threshold 20
//!
//! # Start the API
//! genome-matcher serve --genomes data.fa --port 8080
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::store::{GenomeIndex, DEFAULT_MIN_SEARCH_LENGTH};

pub mod genomes;
pub mod related;
pub mod search;

#[derive(Parser)]
#[command(name = "genome-matcher")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Locate DNA fragments across genomes and rank related genomes")]
#[command(
    long_about = "genome-matcher indexes every fixed-length window of a set of genomes and answers two kinds of query:\n- Which genomes contain a fragment, exactly or with one substituted base\n- Which genomes share the most fragments with a query genome"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the genomes that contain a DNA fragment
    Search(search::SearchArgs),

    /// Rank genomes by how many fragments they share with query genomes
    Related(related::RelatedArgs),

    /// List indexed genomes
    Genomes(genomes::GenomesArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Options for building the index, shared by every command
#[derive(clap::Args)]
pub struct IndexArgs {
    /// FASTA file(s) of genomes to index (plain, .gz or .bgz)
    #[arg(short, long = "genomes", required = true, num_args = 1..)]
    pub genomes: Vec<PathBuf>,

    /// Window length stored in the index; also the smallest length a query may use
    #[arg(long, default_value_t = DEFAULT_MIN_SEARCH_LENGTH)]
    pub min_search_length: usize,
}

impl IndexArgs {
    /// Load every genome file into a fresh index
    ///
    /// # Errors
    ///
    /// Returns an error if any genome file cannot be parsed.
    pub fn build_index(&self, verbose: bool) -> anyhow::Result<GenomeIndex> {
        let index = GenomeIndex::load_from_files(&self.genomes, self.min_search_length)?;

        if verbose {
            eprintln!(
                "Indexed {} genomes ({} windows of {} bases)",
                index.genome_count(),
                index.window_count(),
                index.min_search_length()
            );
        }

        Ok(index)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
