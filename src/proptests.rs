use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_trie(t: &ReducedTrie<Positions>) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity violated: {issues:?}");
}

fn checked() -> ReducedTrie<Positions> {
    ReducedTrie::with_config(Config {
        check_invariants: true,
        ..Config::default()
    })
}

/// Reference model: lowercase word -> positions in insertion order.
type Model = BTreeMap<String, Vec<usize>>;

fn model_insert(m: &mut Model, word: &str, position: usize) {
    m.entry(word.to_ascii_lowercase()).or_default().push(position);
}

fn assert_matches_model(t: &ReducedTrie<Positions>, m: &Model) {
    assert_eq!(t.len(), m.len());
    let got: Vec<(String, Vec<usize>)> = t
        .alphabetical_order()
        .into_keys()
        .map(|w| {
            let positions = t.search(&w).unwrap().as_slice().to_vec();
            (w, positions)
        })
        .collect();
    let expected: Vec<(String, Vec<usize>)> =
        m.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(got, expected);
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String),
    Delete(String),
    Search(String),
    Complete(String),
}

fn word_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet makes shared prefixes, splits and merges common.
    "[abcAB]{1,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let word = word_strategy();
    let op = prop_oneof![
        45 => word.clone().prop_map(Op::Insert),
        30 => word.clone().prop_map(Op::Delete),
        15 => word.clone().prop_map(Op::Search),
        10 => "[abc]{0,3}".prop_map(Op::Complete),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t = checked();
        let mut m = Model::new();

        for (position, op) in ops.into_iter().enumerate() {
            match op {
                Op::Insert(word) => {
                    let existed = m.contains_key(&word.to_ascii_lowercase());
                    let outcome = t.insert(&word, Positions::new(position));
                    model_insert(&mut m, &word, position);
                    let expected = if existed { InsertOutcome::Merged } else { InsertOutcome::Created };
                    prop_assert_eq!(outcome, expected);
                }
                Op::Delete(word) => {
                    let got = t.delete(&word).map(|p| p.as_slice().to_vec());
                    let want = m.remove(&word.to_ascii_lowercase());
                    prop_assert_eq!(got, want);
                    prop_assert!(t.search(&word).is_none());
                }
                Op::Search(word) => {
                    let got = t.search(&word).map(|p| p.as_slice().to_vec());
                    let want = m.get(&word.to_ascii_lowercase()).cloned();
                    prop_assert_eq!(got, want);
                }
                Op::Complete(prefix) => {
                    let mut got = t.autocomplete(&prefix);
                    got.sort();
                    let want: Vec<String> = m
                        .keys()
                        .filter(|k| k.starts_with(prefix.as_str()))
                        .cloned()
                        .collect();
                    prop_assert_eq!(got, want);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_trie(&t);
        assert_matches_model(&t, &m);
    }

    #[test]
    fn prop_invalid_words_are_skipped(word in "[a-z]{0,3}[^a-zA-Z][a-z]{0,3}") {
        let mut t = checked();
        t.insert("anchor", Positions::new(0));
        prop_assert_eq!(t.insert(&word, Positions::new(1)), InsertOutcome::Rejected);
        prop_assert_eq!(t.len(), 1);
        prop_assert_eq!(t.node_count(), 2);
    }

    #[test]
    fn prop_frequency_counts_sum_to_tokens(words in prop::collection::vec("[ab]{1,3}", 1..100)) {
        let mut t = checked();
        for (i, w) in words.iter().enumerate() {
            t.insert(w, Positions::new(i));
        }

        let freq = t.frequency_order();
        prop_assert_eq!(freq.iter().map(|(_, n)| n).sum::<usize>(), words.len());
        prop_assert!(freq.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}

/// Calls `f` once for every ordering of `items` (Heap's algorithm, iterative).
fn for_each_ordering<T: Copy>(items: &[T], mut f: impl FnMut(&[T])) {
    let mut order = items.to_vec();
    let mut swaps = vec![0usize; order.len()];
    f(&order);

    let mut k = 1;
    while k < order.len() {
        if swaps[k] < k {
            let other = if k % 2 == 0 { 0 } else { swaps[k] };
            order.swap(other, k);
            f(&order);
            swaps[k] += 1;
            k = 1;
        } else {
            swaps[k] = 0;
            k += 1;
        }
    }
}

#[test]
fn orderings_are_distinct_and_complete() {
    let mut seen = std::collections::BTreeSet::new();
    for_each_ordering(&[1, 2, 3, 4], |order| {
        assert!(seen.insert(order.to_vec()), "repeated {order:?}");
    });
    assert_eq!(seen.len(), 24);
}

const SMALL_SET: [&str; 6] = ["do", "dorm", "doll", "d", "sense", "send"];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_ordering(&SMALL_SET, |order| {
        let mut t = checked();
        let mut m = Model::new();

        for (i, &w) in order.iter().enumerate() {
            t.insert(w, Positions::new(i));
            model_insert(&mut m, w, i);
        }

        validate_trie(&t);
        assert_matches_model(&t, &m);

        // The compressed shape does not depend on insertion order.
        assert_eq!(t.node_count(), 8, "{}", t.pretty());
    });
}

#[test]
fn exhaustive_delete_order_small_set() {
    // Insert in a fixed order, then delete in all permutations.
    let mut base_trie = checked();
    let mut base_model = Model::new();
    for (i, w) in SMALL_SET.iter().enumerate() {
        t_insert(&mut base_trie, &mut base_model, w, i);
    }

    for_each_ordering(&SMALL_SET, |order| {
        let mut t = base_trie.clone();
        let mut m = base_model.clone();

        for &w in order {
            let got = t.delete(w).map(|p| p.as_slice().to_vec());
            assert_eq!(got, m.remove(w));
            validate_trie(&t);
            assert_matches_model(&t, &m);
        }
        assert!(t.is_empty());
        assert_eq!(t.node_count(), 1);
    });
}

fn t_insert(t: &mut ReducedTrie<Positions>, m: &mut Model, word: &str, position: usize) {
    t.insert(word, Positions::new(position));
    model_insert(m, word, position);
}

#[test]
fn randomized_duplicates_keep_insertion_order() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let vocab = ["to", "be", "or", "not", "the", "then", "there", "them", "a", "an"];
    let mut t = ReducedTrie::new();
    let mut m = Model::new();

    for position in 0..5_000 {
        let word = vocab[rng.gen_range(0..vocab.len())];
        t_insert(&mut t, &mut m, word, position);
        if rng.gen_ratio(1, 20) {
            let victim = vocab[rng.gen_range(0..vocab.len())];
            assert_eq!(t.delete(victim).map(|p| p.as_slice().to_vec()), m.remove(victim));
        }
    }

    validate_trie(&t);
    assert_matches_model(&t, &m);
}
