//! Fragment matching and genome relatedness.
//!
//! - [`MatchingEngine`](engine::MatchingEngine): runs queries against a built index
//! - [`scoring`]: match extension, tie-breaking and ranking rules
//!
//! ## Fragment search
//!
//! 1. **Candidate lookup**: the fragment's first `min_search_length` bases are
//!    looked up in the trie, allowing one substitution after the first base
//!    unless exact matching is requested
//! 2. **Extension**: each candidate is compared against its genome over the full
//!    fragment length, with the same substitution budget
//! 3. **Selection**: per genome, the longest confirmed match wins; ties go to the
//!    earliest position
//!
//! ## Relatedness
//!
//! A query genome is cut into disjoint fragments. Each fragment is searched and
//! every genome it hits gains one point. A genome's score is its share of the
//! query's fragments, as a percentage.
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
//! let hits = index.find_genomes_with_this_dna("ACTT", 4, false).unwrap();
//! assert_eq!(hits.len(), 2);
//!
//! let query = Genome::new("query", "ACGTTCGT");
//! let related = index.find_related_genomes(&query, 4, true, 0.0).unwrap();
//! assert_eq!(related[0].genome_name, "B");
//! assert_eq!(related[0].percent_match, 100.0);
//! ```

pub mod engine;
pub mod scoring;

pub use engine::MatchError;
