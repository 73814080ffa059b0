use crate::core::types::FragmentHit;

use super::store::GenomeIndex;

/// Finds indexed windows that might start a match for a query fragment
pub struct CandidateFinder<'a> {
    index: &'a GenomeIndex,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(index: &'a GenomeIndex) -> Self {
        Self { index }
    }

    /// Look up the first `min_search_length` bases of `fragment` in the trie.
    ///
    /// Returns one hit per matching window, possibly several per genome, or
    /// nothing when the fragment is shorter than the window length.
    pub fn find_candidates(&self, fragment: &str, exact_match_only: bool) -> Vec<&'a FragmentHit> {
        let Some(prefix) = fragment.as_bytes().get(..self.index.min_search_length()) else {
            return Vec::new();
        };
        self.index.trie.find(prefix, exact_match_only)
    }
}
