//! Parser for FASTA files using noodles.
//!
//! Turns every record into a [`Genome`]. Supports both uncompressed and
//! gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::genome::Genome;
use crate::parsing::ParseError;
use crate::utils::validation::{check_genome_limit, normalize_sequence};

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into genomes, in file order.
///
/// Files ending in `.gz` or `.bgz` are decompressed on the fly; anything else is
/// read as plain text regardless of extension.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidSequence` for symbols outside
/// A/C/G/T/N or empty records, `ParseError::DuplicateName` for repeated
/// names, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::TooManyGenomes` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<Genome>, ParseError> {
    let file = std::fs::File::open(path)?;
    let genomes = if is_gzipped(path) {
        let reader = BufReader::new(MultiGzDecoder::new(file));
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))?
    } else {
        let reader = BufReader::new(file);
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))?
    };

    debug!(
        path = %path.display(),
        genomes = genomes.len(),
        "Parsed FASTA file"
    );
    Ok(genomes)
}

/// Parse FASTA text held in memory
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus file access errors.
pub fn parse_fasta_bytes(content: &[u8]) -> Result<Vec<Genome>, ParseError> {
    parse_fasta_reader(&mut fasta::io::Reader::new(content))
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<Genome>, ParseError> {
    let mut genomes = Vec::new();
    let mut seen_names = HashSet::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check genome limit for DOS protection
        if let Some(message) = check_genome_limit(genomes.len()) {
            return Err(ParseError::TooManyGenomes(message));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = normalize_sequence(record.sequence().as_ref()).map_err(|source| {
            ParseError::InvalidSequence {
                name: name.clone(),
                source,
            }
        })?;

        if !seen_names.insert(name.clone()) {
            return Err(ParseError::DuplicateName(name));
        }

        genomes.push(Genome::new(name, sequence));
    }

    if genomes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(genomes)
}
