use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::GenomeIndex;
use crate::core::genome::Genome;
use crate::core::types::{FragmentHit, RelatedGenome};
use crate::matching::scoring::{extend_match, is_better_hit, percent_match, rank_related};

/// Why a query produced no result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Fragment of {fragment_length} bases is shorter than the minimum length {minimum_length}")]
    FragmentTooShort {
        fragment_length: usize,
        minimum_length: usize,
    },

    #[error("Requested length {requested} is below the index search length {min_search_length}")]
    BelowSearchLength {
        requested: usize,
        min_search_length: usize,
    },

    #[error("No indexed genome contains this fragment")]
    NoMatches,

    #[error("No related genomes found")]
    NoRelatedGenomes,
}

impl MatchError {
    /// True for argument-length violations, false for empty results
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::FragmentTooShort { .. } | Self::BelowSearchLength { .. }
        )
    }
}

/// Default relatedness threshold (percent of query fragments matched)
pub const DEFAULT_MATCH_PERCENT_THRESHOLD: f64 = 0.0;

/// Query defaults shared by the CLI and web front ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Disallow the single substitution
    #[serde(default)]
    pub exact_match_only: bool,

    /// Minimum percentage for a genome to count as related
    #[serde(default)]
    pub match_percent_threshold: f64,

    /// Minimum confirmed match length for fragment search (defaults to the search length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_length: Option<usize>,

    /// Fragment length used to split query genomes (defaults to the search length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_match_length: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact_match_only: false,
            match_percent_threshold: DEFAULT_MATCH_PERCENT_THRESHOLD,
            minimum_length: None,
            fragment_match_length: None,
        }
    }
}

impl MatchingConfig {
    /// Minimum match length to use against `index`
    pub fn minimum_length_for(&self, index: &GenomeIndex) -> usize {
        self.minimum_length.unwrap_or(index.min_search_length())
    }

    /// Fragment length to use against `index`
    pub fn fragment_match_length_for(&self, index: &GenomeIndex) -> usize {
        self.fragment_match_length
            .unwrap_or(index.min_search_length())
    }
}

/// Runs fragment and whole-genome queries against a built index
pub struct MatchingEngine<'a> {
    index: &'a GenomeIndex,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(index: &'a GenomeIndex) -> Self {
        Self { index }
    }

    /// Best match per genome for `fragment`.
    ///
    /// Candidates come from the trie lookup of the fragment's first
    /// `min_search_length` bases. Each is compared against its genome over the
    /// full fragment length and qualifies once at least `minimum_length` bases
    /// are confirmed. Per genome, the longest match wins, then the earliest.
    /// Results are ordered by genome name.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::FragmentTooShort` if the fragment is shorter than
    /// `minimum_length`, `MatchError::BelowSearchLength` if `minimum_length` is
    /// below the index search length, or `MatchError::NoMatches` if no genome
    /// qualifies.
    pub fn find_genomes_with_this_dna(
        &self,
        fragment: &str,
        minimum_length: usize,
        exact_match_only: bool,
    ) -> Result<Vec<FragmentHit>, MatchError> {
        if fragment.len() < minimum_length {
            return Err(MatchError::FragmentTooShort {
                fragment_length: fragment.len(),
                minimum_length,
            });
        }
        let min_search_length = self.index.min_search_length();
        if minimum_length < min_search_length {
            return Err(MatchError::BelowSearchLength {
                requested: minimum_length,
                min_search_length,
            });
        }

        let finder = CandidateFinder::new(self.index);
        let candidates = finder.find_candidates(fragment, exact_match_only);
        debug!(
            candidates = candidates.len(),
            fragment_length = fragment.len(),
            "Trie lookup complete"
        );

        let mut best: BTreeMap<&str, FragmentHit> = BTreeMap::new();
        for candidate in candidates {
            let Some(extracted) = self
                .index
                .genome(&candidate.genome_name)
                .and_then(|genome| genome.extract(candidate.position, fragment.len()))
            else {
                continue;
            };

            let match_length =
                extend_match(fragment.as_bytes(), extracted.as_bytes(), !exact_match_only);
            if match_length < minimum_length {
                continue;
            }

            let hit = candidate.clone().with_match_length(match_length);
            let name = candidate.genome_name.as_str();
            if best
                .get(name)
                .map_or(true, |current| is_better_hit(&hit, current))
            {
                best.insert(name, hit);
            }
        }

        if best.is_empty() {
            return Err(MatchError::NoMatches);
        }
        Ok(best.into_values().collect())
    }

    /// Genomes that match at least `match_percent_threshold` percent of the
    /// query's disjoint `fragment_match_length`-base fragments.
    ///
    /// A trailing remainder shorter than the fragment length is ignored. Results
    /// are sorted by percentage descending, then name ascending. A query that is
    /// itself indexed matches itself like any other genome.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::BelowSearchLength` if `fragment_match_length` is below
    /// the index search length, or `MatchError::NoRelatedGenomes` if the query has
    /// no complete fragment or no genome reaches the threshold.
    pub fn find_related_genomes(
        &self,
        query: &Genome,
        fragment_match_length: usize,
        exact_match_only: bool,
        match_percent_threshold: f64,
    ) -> Result<Vec<RelatedGenome>, MatchError> {
        let min_search_length = self.index.min_search_length();
        if fragment_match_length < min_search_length {
            return Err(MatchError::BelowSearchLength {
                requested: fragment_match_length,
                min_search_length,
            });
        }

        let mut fragment_count = 0usize;
        let mut hit_counts: HashMap<String, usize> = HashMap::new();
        for fragment in query.fragments(fragment_match_length) {
            fragment_count += 1;
            // A fragment without matches contributes nothing
            let Ok(hits) =
                self.find_genomes_with_this_dna(fragment, fragment_match_length, exact_match_only)
            else {
                continue;
            };
            for hit in hits {
                *hit_counts.entry(hit.genome_name).or_default() += 1;
            }
        }

        debug!(
            query = query.name(),
            fragments = fragment_count,
            genomes_hit = hit_counts.len(),
            "Tallied fragment matches"
        );

        let mut related: Vec<RelatedGenome> = hit_counts
            .into_iter()
            .map(|(name, hits)| RelatedGenome::new(name, percent_match(hits, fragment_count)))
            .filter(|r| r.percent_match >= match_percent_threshold)
            .collect();

        if related.is_empty() {
            return Err(MatchError::NoRelatedGenomes);
        }
        rank_related(&mut related);
        Ok(related)
    }

    /// Run a fragment search with the lengths and flags from `config`
    ///
    /// # Errors
    ///
    /// See [`Self::find_genomes_with_this_dna`].
    pub fn search_with_config(
        &self,
        fragment: &str,
        config: &MatchingConfig,
    ) -> Result<Vec<FragmentHit>, MatchError> {
        self.find_genomes_with_this_dna(
            fragment,
            config.minimum_length_for(self.index),
            config.exact_match_only,
        )
    }

    /// Run a relatedness query with the lengths and thresholds from `config`
    ///
    /// # Errors
    ///
    /// See [`Self::find_related_genomes`].
    pub fn related_with_config(
        &self,
        query: &Genome,
        config: &MatchingConfig,
    ) -> Result<Vec<RelatedGenome>, MatchError> {
        self.find_related_genomes(
            query,
            config.fragment_match_length_for(self.index),
            config.exact_match_only,
            config.match_percent_threshold,
        )
    }
}
