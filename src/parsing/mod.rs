//! Loading genomes from sequence files.
//!
//! Genomes are read from FASTA files, plain or gzip/bgzip compressed. Each
//! record becomes one [`Genome`](crate::core::genome::Genome) named after the
//! record's identifier (the header text up to the first whitespace).
//!
//! ## Example
//!
//! ```rust,no_run
//! use genome_matcher::parsing::fasta::parse_fasta_file;
//! use std::path::Path;
//!
//! let genomes = parse_fasta_file(Path::new("genomes.fa.gz")).unwrap();
//! println!("{} genomes", genomes.len());
//! ```
//!
//! ## Accepted sequences
//!
//! Bases are upper-cased on load. Only A, C, G, T and N are accepted; any other
//! symbol rejects the whole file, as do empty records and repeated names.

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod fasta;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Invalid sequence for genome '{name}': {source}")]
    InvalidSequence {
        name: String,
        source: ValidationError,
    },

    #[error("Duplicate genome name: {0}")]
    DuplicateName(String),

    #[error("{0}")]
    TooManyGenomes(String),
}
