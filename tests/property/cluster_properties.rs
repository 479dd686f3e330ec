use logmine::distance::{distance, distance_within};
use logmine::pattern::{merge, Pattern, TokenSequence};
use logmine::shard::cluster_sharded;
use logmine::{ClusterOpts, Clusterer};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    "[a-c]{1,2}"
}

fn sequence() -> impl Strategy<Value = TokenSequence> {
    prop::collection::vec(token(), 0..8)
        .prop_map(|toks| toks.iter().map(String::as_str).collect::<TokenSequence>())
}

/// Two sequences of the same length.
fn sequence_pair() -> impl Strategy<Value = (TokenSequence, TokenSequence)> {
    (0usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(token(), n),
            prop::collection::vec(token(), n),
        )
            .prop_map(|(a, b)| {
                (
                    a.iter().map(String::as_str).collect::<TokenSequence>(),
                    b.iter().map(String::as_str).collect::<TokenSequence>(),
                )
            })
    })
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::collection::vec(token(), 0..5).prop_map(|t| t.join(" ")), 0..60)
}

proptest! {
    #[test]
    fn sequence_is_at_zero_from_its_own_pattern(s in sequence()) {
        prop_assert_eq!(distance(&s, &Pattern::from_sequence(&s)), 0.0);
    }

    #[test]
    fn distance_is_normalized((a, b) in sequence_pair()) {
        let d = distance(&a, &Pattern::from_sequence(&b));
        prop_assert!((0.0..=1.0).contains(&d));
    }

    #[test]
    fn merge_is_idempotent((a, b) in sequence_pair()) {
        let p = Pattern::from_sequence(&a);
        let once = merge(&p, &b);
        prop_assert_eq!(merge(&once, &b), once);
    }

    #[test]
    fn merged_pattern_covers_the_merged_sequence((a, b) in sequence_pair()) {
        let merged = merge(&Pattern::from_sequence(&a), &b);
        prop_assert_eq!(distance(&b, &merged), 0.0);
        prop_assert_eq!(distance(&a, &merged), 0.0);
    }

    #[test]
    fn wildcards_are_monotonic((a, b) in sequence_pair(), c in prop::collection::vec(token(), 0..8)) {
        let p = merge(&Pattern::from_sequence(&a), &b);
        let c: TokenSequence = c.iter().map(String::as_str).chain(std::iter::repeat("a")).take(a.len()).collect();
        let next = merge(&p, &c);
        for (before, after) in p.iter().zip(next.iter()) {
            if before.is_wildcard() {
                prop_assert!(after.is_wildcard());
            }
        }
    }

    #[test]
    fn bounded_distance_agrees((a, b) in sequence_pair(), bound in 0.0f64..=1.0) {
        let p = Pattern::from_sequence(&b);
        let exact = distance(&a, &p);
        match distance_within(&a, &p, bound) {
            Some(d) => prop_assert_eq!(d, exact),
            None => prop_assert!(exact > bound),
        }
    }

    #[test]
    fn replay_is_deterministic(input in lines(), max_distance in 0.0f64..=1.0) {
        let opts = ClusterOpts { max_distance, ..Default::default() };
        let run = || {
            let mut engine = Clusterer::new(&opts).unwrap();
            for l in &input {
                engine.process_line(l);
            }
            engine.result()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn sharding_matches_sequential(input in lines(), max_distance in 0.0f64..=1.0) {
        let opts = ClusterOpts { max_distance, ..Default::default() };
        let mut engine = Clusterer::new(&opts).unwrap();
        for l in &input {
            engine.process_line(l);
        }
        prop_assert_eq!(cluster_sharded(&input, &opts).unwrap(), engine.result());
    }

    #[test]
    fn every_line_is_counted_once(input in lines(), max_distance in 0.0f64..=1.0) {
        let opts = ClusterOpts { max_distance, ..Default::default() };
        let mut engine = Clusterer::new(&opts).unwrap();
        for l in &input {
            engine.process_line(l);
        }
        let total: usize = engine.index().all().map(|c| c.count()).sum();
        prop_assert_eq!(total, input.len());
    }
}
