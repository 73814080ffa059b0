//! Centralized validation and helper functions.

/// Maximum number of genomes allowed in a single file (DOS protection)
pub const MAX_GENOMES: usize = 100_000;

/// Maximum length of a fragment or query sequence accepted over HTTP
pub const MAX_QUERY_SEQUENCE_LENGTH: usize = 1_000_000;

/// Symbols a genome sequence may contain
pub const DNA_ALPHABET: &[u8] = b"ACGTN";

/// Whether `base` is one of A, C, G, T, N (uppercase only).
///
/// # Examples
///
/// ```
/// use genome_matcher::utils::validation::is_valid_base;
///
/// assert!(is_valid_base(b'A'));
/// assert!(is_valid_base(b'N'));
/// assert!(!is_valid_base(b'a'));
/// assert!(!is_valid_base(b'U'));
/// ```
#[must_use]
pub fn is_valid_base(base: u8) -> bool {
    DNA_ALPHABET.contains(&base)
}

/// Sequence validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty sequence provided")]
    EmptySequence,
    #[error("Invalid base '{base}' at position {position}: only A, C, G, T and N are allowed")]
    InvalidBase { base: char, position: usize },
    #[error("Sequence too long: {0} bases exceeds the maximum of {MAX_QUERY_SEQUENCE_LENGTH}")]
    SequenceTooLong(usize),
}

/// Upper-case a raw sequence and check it only uses the DNA alphabet.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `ValidationError::EmptySequence` if nothing remains after trimming,
/// or `ValidationError::InvalidBase` naming the first offending symbol.
pub fn normalize_sequence(raw: &[u8]) -> Result<String, ValidationError> {
    let trimmed = raw.trim_ascii();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptySequence);
    }

    let mut sequence = String::with_capacity(trimmed.len());
    for (position, &byte) in trimmed.iter().enumerate() {
        let base = byte.to_ascii_uppercase();
        if !is_valid_base(base) {
            return Err(ValidationError::InvalidBase {
                base: char::from(byte),
                position,
            });
        }
        sequence.push(char::from(base));
    }

    Ok(sequence)
}

/// Normalize a sequence received from an untrusted client.
///
/// # Errors
///
/// Returns `ValidationError::SequenceTooLong` above
/// [`MAX_QUERY_SEQUENCE_LENGTH`], otherwise as [`normalize_sequence`].
pub fn validate_query_sequence(raw: &str) -> Result<String, ValidationError> {
    if raw.len() > MAX_QUERY_SEQUENCE_LENGTH {
        return Err(ValidationError::SequenceTooLong(raw.len()));
    }
    normalize_sequence(raw.as_bytes())
}

/// Check if adding another genome would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new genome.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_genome_limit(count: usize) -> Option<String> {
    if count >= MAX_GENOMES {
        Some(format!(
            "Too many genomes: adding another would exceed maximum of {MAX_GENOMES}"
        ))
    } else {
        None
    }
}
