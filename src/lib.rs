//! # genome-matcher
//!
//! A library for locating DNA fragments across a collection of genomes and for
//! ranking genomes by how much of a query genome they share.
//!
//! Every fixed-length window of every indexed genome is stored in a prefix
//! tree. Lookups can be exact or tolerate one substituted base (never the
//! first), and matches are then extended base by base against the source
//! genome.
//!
//! ## Features
//!
//! - **Fragment search**: best match per genome, longest first, earliest on ties
//! - **Single-mismatch tolerance**: one substitution anywhere after the first base
//! - **Relatedness**: percentage of a query genome's disjoint fragments found in
//!   each indexed genome, ranked and thresholded
//! - **FASTA input**: plain or gzip/bgzip compressed
//! - **CLI and HTTP API** front ends
//!
//! ## Example
//!
//! ```rust
//! use genome_matcher::{Genome, GenomeIndex};
//!
//! let mut index = GenomeIndex::new(4).unwrap();
//! index.add_genome(&Genome::new("A", "ACGTACGT"));
//! index.add_genome(&Genome::new("B", "ACGTTCGT"));
//!
//! // Both genomes start with ACGT
//! let hits = index.find_genomes_with_this_dna("ACGT", 4, true).unwrap();
//! for hit in &hits {
//!     println!("{} at {} ({} bases)", hit.genome_name, hit.position, hit.match_length);
//! }
//!
//! // Rank genomes against a query genome cut into 4-base fragments
//! let query = Genome::new("query", "ACGTTCGT");
//! for related in index.find_related_genomes(&query, 4, true, 0.0).unwrap() {
//!     println!("{related}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Genome storage, the fragment trie, and candidate lookup
//! - [`core`]: Genome and result types
//! - [`matching`]: Fragment search and relatedness scoring
//! - [`parsing`]: FASTA loading
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{GenomeIndex, IndexError};
pub use catalog::trie::ApproximateTrie;
pub use core::genome::Genome;
pub use core::types::*;
pub use matching::engine::{MatchError, MatchingConfig, MatchingEngine};
