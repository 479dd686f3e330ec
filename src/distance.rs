use crate::pattern::{Pattern, TokenSequence};

/// Fraction of positions where `pattern` holds a fixed token different from
/// the one in `seq`. Wildcard slots always match. Empty inputs are at
/// distance 0.
///
/// # Panics
///
/// Panics if `seq` and `pattern` differ in length.
pub fn distance(seq: &TokenSequence, pattern: &Pattern) -> f64 {
    check_lengths(seq, pattern);
    let len = seq.len();
    if len == 0 {
        return 0.0;
    }
    let mismatches = seq
        .iter()
        .zip(pattern.iter())
        .filter(|(token, slot)| !slot.accepts(token))
        .count();
    mismatches as f64 / len as f64
}

/// Like [`distance`], but gives up with `None` as soon as the distance is
/// known to exceed `bound`. A returned value is always equal to what
/// [`distance`] computes for the same inputs.
///
/// # Panics
///
/// Panics if `seq` and `pattern` differ in length.
pub fn distance_within(seq: &TokenSequence, pattern: &Pattern, bound: f64) -> Option<f64> {
    check_lengths(seq, pattern);
    let len = seq.len();
    if len == 0 {
        return (0.0 <= bound).then_some(0.0);
    }
    let len = len as f64;
    let mut mismatches = 0usize;
    for (token, slot) in seq.iter().zip(pattern.iter()) {
        if !slot.accepts(token) {
            mismatches += 1;
            if mismatches as f64 / len > bound {
                return None;
            }
        }
    }
    let d = mismatches as f64 / len;
    (d <= bound).then_some(d)
}

fn check_lengths(seq: &TokenSequence, pattern: &Pattern) {
    assert_eq!(
        seq.len(),
        pattern.len(),
        "distance is only defined for a sequence and pattern of equal length"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Slot;

    fn seq(line: &str) -> TokenSequence {
        line.split(' ').collect()
    }

    #[test]
    fn bound_below_first_mismatch_bails_out() {
        let p = Pattern::from_sequence(&seq("a b c d"));
        assert_eq!(distance_within(&seq("x b c d"), &p, 0.2), None);
        assert_eq!(distance_within(&seq("x b c d"), &p, 0.25), Some(0.25));
    }

    #[test]
    fn wildcards_do_not_count_against_bound() {
        let p = Pattern::new(vec![Slot::Wildcard, Slot::Wildcard, Slot::Fixed("c".into())]);
        assert_eq!(distance_within(&seq("x y c"), &p, 0.0), Some(0.0));
    }

    #[test]
    fn empty_sequence_respects_negative_bound() {
        let p = Pattern::default();
        assert_eq!(distance_within(&TokenSequence::default(), &p, -0.1), None);
        assert_eq!(distance_within(&TokenSequence::default(), &p, 0.0), Some(0.0));
    }
}
