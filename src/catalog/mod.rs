//! Genome storage and fragment indexing.
//!
//! A [`GenomeIndex`](store::GenomeIndex) slides a fixed-length window over
//! every genome it is given and files each window in an
//! [`ApproximateTrie`](trie::ApproximateTrie), tagged with the genome name and
//! offset. Once built, the index is read-only and can be queried from many
//! threads at once.
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
//! assert_eq!(index.genome_count(), 2);
//! assert_eq!(index.window_count(), 10);
//! ```
//!
//! ## Loading from FASTA
//!
//! ```rust,no_run
//! use genome_matcher::GenomeIndex;
//!
//! let index = GenomeIndex::load_from_files(&["genomes.fa"], 10).unwrap();
//! for genome in index.genomes() {
//!     println!("{}\t{}", genome.name(), genome.len());
//! }
//! ```

pub mod index;
pub mod store;
pub mod trie;
