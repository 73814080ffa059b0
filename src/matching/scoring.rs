use std::cmp::Ordering;

use crate::core::types::{FragmentHit, RelatedGenome};

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Number of leading bases of `fragment` confirmed against `candidate`.
///
/// Comparison runs from position 0. Agreeing bases extend the match. With
/// `allow_mismatch`, the first disagreeing base also extends it and spends the
/// budget; any further disagreement (or the first one, without a budget) ends
/// the comparison.
pub fn extend_match(fragment: &[u8], candidate: &[u8], allow_mismatch: bool) -> usize {
    let mut mismatch_available = allow_mismatch;
    let mut length = 0;

    for (a, b) in fragment.iter().zip(candidate) {
        if a != b {
            if !mismatch_available {
                break;
            }
            mismatch_available = false;
        }
        length += 1;
    }

    length
}

/// Whether `candidate` should replace `current` as a genome's best hit.
///
/// Longer confirmed matches win; equal lengths go to the earlier position.
pub fn is_better_hit(candidate: &FragmentHit, current: &FragmentHit) -> bool {
    match candidate.match_length.cmp(&current.match_length) {
        Ordering::Greater => true,
        Ordering::Equal => candidate.position < current.position,
        Ordering::Less => false,
    }
}

/// Share of `fragment_count` query fragments that matched, as a percentage
pub fn percent_match(hits: usize, fragment_count: usize) -> f64 {
    if fragment_count == 0 {
        return 0.0;
    }
    count_to_f64(hits) / count_to_f64(fragment_count) * 100.0
}

/// Sort by percentage descending, then genome name ascending
pub fn rank_related(related: &mut [RelatedGenome]) {
    related.sort_by(|a, b| {
        b.percent_match
            .partial_cmp(&a.percent_match)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.genome_name.cmp(&b.genome_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_exact() {
        assert_eq!(extend_match(b"ACGT", b"ACGT", false), 4);
        assert_eq!(extend_match(b"ACGT", b"ACTT", false), 2);
        assert_eq!(extend_match(b"ACGT", b"TCGT", false), 0);
    }

    #[test]
    fn test_extend_with_one_mismatch() {
        assert_eq!(extend_match(b"ACTT", b"ACGT", true), 4);
        assert_eq!(extend_match(b"TCGT", b"ACGT", true), 4);
        // Second mismatch stops extension
        assert_eq!(extend_match(b"ACTTAA", b"ACGTCA", true), 4);
    }

    #[test]
    fn test_extend_stops_at_shorter_input() {
        assert_eq!(extend_match(b"ACGTAC", b"ACG", false), 3);
        assert_eq!(extend_match(b"", b"ACG", true), 0);
    }

    #[test]
    fn test_better_hit_prefers_length_then_position() {
        let current = FragmentHit::new("g", 5, 100).with_match_length(10);

        let longer = FragmentHit::new("g", 9, 100).with_match_length(11);
        let earlier = FragmentHit::new("g", 2, 100).with_match_length(10);
        let later = FragmentHit::new("g", 7, 100).with_match_length(10);
        let shorter = FragmentHit::new("g", 0, 100).with_match_length(9);

        assert!(is_better_hit(&longer, &current));
        assert!(is_better_hit(&earlier, &current));
        assert!(!is_better_hit(&later, &current));
        assert!(!is_better_hit(&shorter, &current));
        assert!(!is_better_hit(&current, &current));
    }

    #[test]
    fn test_percent_match() {
        assert!((percent_match(2, 2) - 100.0).abs() < f64::EPSILON);
        assert!((percent_match(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!(percent_match(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rank_related_orders_by_percent_then_name() {
        let mut related = vec![
            RelatedGenome::new("beta", 50.0),
            RelatedGenome::new("gamma", 100.0),
            RelatedGenome::new("alpha", 50.0),
        ];
        rank_related(&mut related);

        let names: Vec<&str> = related.iter().map(|r| r.genome_name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }
}
