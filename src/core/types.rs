use serde::{Deserialize, Serialize};

/// An indexed window of a genome, and later a resolved fragment match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentHit {
    /// Name of the genome the window was drawn from
    pub genome_name: String,

    /// 0-based offset of the window in that genome
    pub position: usize,

    /// Total length of the genome when it was indexed
    pub genome_length: usize,

    /// Number of bases confirmed by query-time comparison (0 until resolved)
    pub match_length: usize,
}

impl FragmentHit {
    pub fn new(genome_name: impl Into<String>, position: usize, genome_length: usize) -> Self {
        Self {
            genome_name: genome_name.into(),
            position,
            genome_length,
            match_length: 0,
        }
    }

    #[must_use]
    pub fn with_match_length(mut self, match_length: usize) -> Self {
        self.match_length = match_length;
        self
    }
}

/// A genome related to a query, with the share of query fragments it matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedGenome {
    pub genome_name: String,

    /// Percentage of query fragments matched, in [0, 100]
    pub percent_match: f64,
}

impl RelatedGenome {
    pub fn new(genome_name: impl Into<String>, percent_match: f64) -> Self {
        Self {
            genome_name: genome_name.into(),
            percent_match,
        }
    }
}

impl std::fmt::Display for RelatedGenome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.2}%)", self.genome_name, self.percent_match)
    }
}
