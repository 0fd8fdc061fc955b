use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const LONG: &str = "My brand new phrase is long enough to be cut into several blocks of words \
so that every swap moves a whole group of tokens around the sentence while keeping them \
together as one unit for the shuffler";

fn sorted_tokens(s: &str) -> Vec<String> {
    let mut t = s
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    t.sort();
    t
}

#[test]
fn test_degree_bounds() {
    assert_eq!(Shuffler::new(0), Err(EvalError::InvalidDegree(0)));
    assert_eq!(Shuffler::new(6), Err(EvalError::InvalidDegree(6)));
    for d in 1..=5 {
        assert_eq!(Shuffler::new(d).unwrap().degree(), d);
    }
}

#[test]
fn test_split_blocks_short_sentence_is_one_word_per_block() {
    let blocks = split_blocks("The Wind  lashed\tthe trees");
    assert_eq!(blocks, vec!["the", "wind", "lashed", "the", "trees"]);
}

#[test]
fn test_split_blocks_groups_long_sentences() {
    let words = (0..31).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let blocks = split_blocks(&words);
    // 31 words -> blocks of 2, last one shorter.
    assert_eq!(blocks.len(), 16);
    assert_eq!(blocks[0], "w0 w1");
    assert_eq!(blocks[15], "w30");
}

#[test]
fn test_shuffle_preserves_tokens_and_length() {
    let shuffler = Shuffler::new(5).unwrap();
    let expected_len = shuffle_len_reference();
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = shuffler.shuffle(LONG, &mut rng);
        assert_eq!(sorted_tokens(&out), sorted_tokens(LONG));
        assert_eq!(out.chars().count(), expected_len);
        assert!(out.chars().next().is_some_and(char::is_uppercase));
    }
}

fn shuffle_len_reference() -> usize {
    LONG.split_whitespace().collect::<Vec<_>>().join(" ").chars().count()
}

#[test]
fn test_shuffle_is_deterministic_for_seed() {
    let shuffler = Shuffler::new(3).unwrap();
    let a = shuffler.shuffle(LONG, &mut StdRng::seed_from_u64(42));
    let b = shuffler.shuffle(LONG, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn test_degree_one_on_three_blocks_swaps_at_most_once() {
    let shuffler = Shuffler::new(1).unwrap();
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = shuffler.shuffle("alpha beta gamma", &mut rng);
        let original = ["alpha", "beta", "gamma"];
        let lowered = out.to_lowercase();
        let moved = lowered
            .split_whitespace()
            .zip(original)
            .filter(|(a, b)| a != b)
            .count();
        assert!(moved == 0 || moved == 2, "{out}");
    }
}

#[test]
fn test_plan_swaps_uses_each_position_once() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let swaps = plan_swaps(12, 5, &mut rng);
        assert_eq!(swaps.len(), 5);
        let mut used = swaps
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect::<Vec<_>>();
        let n = used.len();
        used.sort();
        used.dedup();
        assert_eq!(used.len(), n);
        assert!(swaps.iter().all(|&(a, b)| a != b && a < 12 && b < 12));
    }
}

#[test]
fn test_single_word_and_empty_input() {
    let shuffler = Shuffler::new(2).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(shuffler.shuffle("HELLO", &mut rng), "Hello");
    assert_eq!(shuffler.shuffle("   ", &mut rng), "");
}

#[test]
fn test_plan_swaps_is_all_or_nothing() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert!(plan_swaps(4, 2, &mut rng).is_empty());
        assert!(plan_swaps(10, 5, &mut rng).is_empty());
        assert!(plan_swaps(3, 5, &mut rng).is_empty());
        assert_eq!(plan_swaps(5, 2, &mut rng).len(), 2);
        assert_eq!(plan_swaps(3, 1, &mut rng).len(), 1);
    }
}

#[test]
fn test_short_sentence_is_left_in_order() {
    let shuffler = Shuffler::new(3).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(shuffler.shuffle("the WIND lashed the trees", &mut rng), "The wind lashed the trees");
}
