//! Core data types for fragment search.
//!
//! - [`Genome`](genome::Genome): a named DNA sequence with range extraction
//! - [`FragmentHit`](types::FragmentHit): an indexed window, or a resolved match
//! - [`RelatedGenome`](types::RelatedGenome): a genome scored against a query genome

pub mod genome;
pub mod types;
