use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::trie::ApproximateTrie;
use crate::core::genome::Genome;
use crate::core::types::{FragmentHit, RelatedGenome};
use crate::matching::engine::{MatchError, MatchingEngine};
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Minimum search length must be at least 1")]
    InvalidSearchLength,

    #[error("Failed to load genomes: {0}")]
    Load(#[from] ParseError),
}

/// Default window length for indexes built by the CLI and web server
pub const DEFAULT_MIN_SEARCH_LENGTH: usize = 10;

/// Fragment index over a collection of genomes
///
/// Every window of `min_search_length` bases from every added genome is stored
/// in a trie, tagged with its genome and offset. The index owns its own copy of
/// each genome so later fragment comparisons never depend on caller state.
#[derive(Debug)]
pub struct GenomeIndex {
    min_search_length: usize,

    /// Windows of exactly `min_search_length` bases
    pub(crate) trie: ApproximateTrie<FragmentHit>,

    /// All indexed genomes, in insertion order
    genomes: Vec<Genome>,

    /// Index: genome name -> index in genomes vec
    name_to_index: HashMap<String, usize>,
}

impl GenomeIndex {
    /// Create an empty index whose windows are `min_search_length` bases long
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidSearchLength` if `min_search_length` is 0.
    pub fn new(min_search_length: usize) -> Result<Self, IndexError> {
        if min_search_length == 0 {
            return Err(IndexError::InvalidSearchLength);
        }

        Ok(Self {
            min_search_length,
            trie: ApproximateTrie::new(),
            genomes: Vec::new(),
            name_to_index: HashMap::new(),
        })
    }

    /// Build an index from every genome in one or more FASTA files
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidSearchLength` for a zero search length or
    /// `IndexError::Load` if any file cannot be parsed.
    pub fn load_from_files<P: AsRef<Path>>(
        paths: &[P],
        min_search_length: usize,
    ) -> Result<Self, IndexError> {
        let mut index = Self::new(min_search_length)?;
        for path in paths {
            let path = path.as_ref();
            if !is_fasta_file(path) {
                warn!(
                    "{} has no FASTA extension; reading it as FASTA anyway",
                    path.display()
                );
            }
            let genomes = parse_fasta_file(path)?;
            index.add_genomes(&genomes);
        }

        info!(
            genomes = index.genome_count(),
            windows = index.window_count(),
            "Built genome index"
        );
        Ok(index)
    }

    /// Index every window of `genome` and keep a copy for later extraction
    ///
    /// Genomes shorter than the search length are stored but contribute no windows.
    pub fn add_genome(&mut self, genome: &Genome) {
        let name = genome.name();
        let genome_length = genome.len();

        for (position, window) in genome.windows(self.min_search_length) {
            self.trie.insert(
                window.as_bytes(),
                FragmentHit::new(name, position, genome_length),
            );
        }

        if self.name_to_index.contains_key(name) {
            warn!(
                "Genome '{}' was already indexed; keeping the first sequence stored under that name",
                name
            );
        } else {
            self.name_to_index
                .insert(name.to_string(), self.genomes.len());
            self.genomes.push(genome.clone());
        }

        debug!(
            genome = name,
            length = genome_length,
            windows = self.trie.len(),
            "Indexed genome"
        );
    }

    pub fn add_genomes(&mut self, genomes: &[Genome]) {
        for genome in genomes {
            self.add_genome(genome);
        }
    }

    /// Discard every genome and window as one unit
    pub fn clear(&mut self) {
        self.trie.clear();
        self.genomes.clear();
        self.name_to_index.clear();
    }

    pub fn min_search_length(&self) -> usize {
        self.min_search_length
    }

    /// Get an indexed genome by name
    pub fn genome(&self, name: &str) -> Option<&Genome> {
        self.name_to_index.get(name).map(|&idx| &self.genomes[idx])
    }

    /// All indexed genomes in the order they were added
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    /// Number of windows stored in the trie
    pub fn window_count(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Best match per genome for `fragment`; see [`MatchingEngine::find_genomes_with_this_dna`]
    ///
    /// # Errors
    ///
    /// Returns `MatchError` when a length precondition fails or nothing matches.
    pub fn find_genomes_with_this_dna(
        &self,
        fragment: &str,
        minimum_length: usize,
        exact_match_only: bool,
    ) -> Result<Vec<FragmentHit>, MatchError> {
        MatchingEngine::new(self).find_genomes_with_this_dna(
            fragment,
            minimum_length,
            exact_match_only,
        )
    }

    /// Genomes sharing enough fragments with `query`; see [`MatchingEngine::find_related_genomes`]
    ///
    /// # Errors
    ///
    /// Returns `MatchError` when the fragment length is too small or no genome
    /// reaches the threshold.
    pub fn find_related_genomes(
        &self,
        query: &Genome,
        fragment_match_length: usize,
        exact_match_only: bool,
        match_percent_threshold: f64,
    ) -> Result<Vec<RelatedGenome>, MatchError> {
        MatchingEngine::new(self).find_related_genomes(
            query,
            fragment_match_length,
            exact_match_only,
            match_percent_threshold,
        )
    }
}
