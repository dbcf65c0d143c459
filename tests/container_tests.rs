use bucketbits::bitvec::{DOMAIN_BITS, MAX_WORDS};
use bucketbits::container::SPARSE_MAX;
use bucketbits::{word, Container, DenseBits};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LENGTHS: [usize; 14] = [
    0, 4095, 4096, 4097, 8453, 12345, 24847, 32872, 32843, 40432, 48234, 56293, 65462, 65535,
];

fn random_container(rng: &mut StdRng, inserts: usize) -> Container {
    let mut c = Container::new();
    for _ in 0..inserts {
        c.insert(rng.random::<u16>());
    }
    c
}

/// Count members without going through the cardinality counter.
fn enumerate(c: &Container) -> usize {
    match (c.sparse(), c.dense()) {
        (Some(keys), None) => keys.as_slice().len(),
        (None, Some(bits)) => bits.ones().count(),
        _ => unreachable!("exactly one layout is live"),
    }
}

#[test]
fn test_rank_at_domain_end_equals_len() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for &n in &LENGTHS {
        let c = random_container(&mut rng, n);
        assert_eq!(c.rank1(DOMAIN_BITS), c.len(), "n={n}");
        assert_eq!(enumerate(&c), c.len(), "n={n}");
        assert_eq!(c.is_dense(), c.len() > SPARSE_MAX, "n={n}");
    }
}

#[test]
fn test_rank_select_identity() {
    let mut rng = StdRng::seed_from_u64(42);
    for &n in &LENGTHS {
        let c = random_container(&mut rng, n);
        if c.is_empty() {
            continue;
        }
        for _ in 0..200 {
            let k = rng.random_range(0..c.len());
            let x = c.select1(k);
            assert!(c.contains(x));
            assert_eq!(c.rank1(x as usize), k, "n={n} k={k} x={x}");
        }
    }
}

#[test]
fn test_cardinality_tracks_members_under_churn() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut c = Container::new();
    for step in 0..40_000 {
        // Bias toward inserts for the first half, removals for the second,
        // so the container crosses the threshold both ways.
        let insert_bias = if step < 20_000 { 0.75 } else { 0.25 };
        let x = rng.random_range(0..12_000u16);
        if rng.random_bool(insert_bias) {
            c.insert(x);
        } else {
            c.remove(x);
        }
        if step % 500 == 0 {
            assert_eq!(enumerate(&c), c.len(), "step={step}");
            assert_eq!(c.iter().count(), c.len(), "step={step}");
        }
    }
    assert_eq!(enumerate(&c), c.len());
}

#[test]
fn test_threshold_crossing_both_ways() {
    let mut c: Container = (0..SPARSE_MAX as u16).map(|x| x * 3).collect();
    assert!(!c.is_dense());
    assert!(c.dense().is_none());

    let sparse: Vec<(bool, usize)> = (0..13_000u16)
        .map(|x| (c.contains(x), c.rank1(x as usize)))
        .collect();
    let selects: Vec<u16> = (0..c.len()).map(|k| c.select1(k)).collect();

    assert!(c.insert(65_000));
    assert!(c.is_dense());
    let dense: Vec<(bool, usize)> = (0..13_000u16)
        .map(|x| (c.contains(x), c.rank1(x as usize)))
        .collect();
    assert_eq!(sparse, dense);
    assert_eq!(selects, (0..SPARSE_MAX).map(|k| c.select1(k)).collect::<Vec<_>>());

    assert!(c.remove(65_000));
    assert!(!c.is_dense());
    assert_eq!(selects, c.iter().collect::<Vec<_>>());
}

#[test]
fn test_dense_random_blocks() {
    let mut rng = StdRng::seed_from_u64(99);
    let words: Vec<u64> = (0..MAX_WORDS - 2).map(|_| rng.random()).collect();
    let bv = DenseBits::from_words(&words);
    let ones = bv.count();
    let zeros = bv.len() - ones;

    for _ in 0..500 {
        let k1 = rng.random_range(0..ones);
        let s1 = bv.select1(k1).unwrap();
        assert_eq!(bv.rank1(s1), k1);
        assert_eq!(bv.select_search(k1), Some(s1));

        let k0 = rng.random_range(0..zeros);
        let s0 = bv.select0(k0).unwrap();
        assert_eq!(bv.rank0(s0), k0);
    }
}

#[test]
fn test_word_identities_on_random_words() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let w: u64 = rng.random();
        assert_eq!(word::count(w), word::rank1(w, 64));
        let ones = word::count(w);
        if ones == 0 {
            continue;
        }
        let k = rng.random_range(0..ones);
        let p = word::select1(w, k).unwrap();
        assert_eq!(word::rank1(w, p), k);
    }
}
