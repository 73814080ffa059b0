use serde::{Deserialize, Serialize};

/// A named DNA sequence over the alphabet {A, C, G, T, N}
///
/// `Genome` is a plain value: cloning it copies the name and sequence, so an
/// index that stores a clone is unaffected by whatever the caller later does
/// with its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    name: String,
    sequence: String,
}

impl Genome {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of bases in the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sub-sequence of `length` bases starting at `position`.
    ///
    /// Returns `None` when `position + length` runs past the end of the sequence.
    pub fn extract(&self, position: usize, length: usize) -> Option<&str> {
        let end = position.checked_add(length)?;
        self.sequence.get(position..end)
    }

    /// Every window of `length` bases with its start offset, sliding by one base.
    ///
    /// Yields nothing when the genome is shorter than `length` or `length` is 0.
    pub fn windows(&self, length: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        let count = if length == 0 {
            0
        } else {
            (self.len() + 1).saturating_sub(length)
        };
        (0..count).filter_map(move |position| {
            self.extract(position, length)
                .map(|fragment| (position, fragment))
        })
    }

    /// Disjoint, contiguous fragments of exactly `length` bases.
    ///
    /// A trailing remainder shorter than `length` is dropped.
    pub fn fragments(&self, length: usize) -> impl Iterator<Item = &str> + '_ {
        let count = self.len().checked_div(length).unwrap_or(0);
        (0..count).filter_map(move |i| self.extract(i * length, length))
    }
}
