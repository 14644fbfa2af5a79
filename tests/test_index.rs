extern crate rand;
extern crate skip_index;

use self::rand::{thread_rng, Rng};
use skip_index::skiplist::ScoreIndex;

#[test]
fn int_test_score_index() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let index_rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let mut index = ScoreIndex::with_rng(10, 0.5, index_rng);
    let mut expected = Vec::new();

    for _ in 0..10_000 {
        let score = rng.gen::<u32>();
        let key = rng.gen::<u32>();

        if index.contains(&score) {
            continue;
        }
        let height = index.insert(key, score);
        assert!(height >= 1 && height <= index.max_height());
        expected.push((score, key));
    }

    expected.sort_by(|l, r| l.0.cmp(&r.0));

    assert_eq!(index.len(), expected.len());
    assert_eq!(
        index
            .iter()
            .map(|entry| (entry.score, entry.key))
            .collect::<Vec<_>>(),
        expected,
    );

    assert!(index.height() <= index.max_height());
    for level in 0..index.height() {
        let scores = index
            .iter_level(level)
            .map(|entry| entry.score)
            .collect::<Vec<_>>();
        for pair in scores.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    for &(score, key) in &expected {
        assert!(index.contains(&score));
        assert_eq!(index.get(&score).map(|entry| entry.key), Some(key));
    }

    for entry in &mut expected {
        let new_key = rng.gen::<u32>();
        {
            let key = index.get_mut(&entry.0);
            *key.unwrap() = new_key;
        }
        *entry = (entry.0, new_key);
        assert_eq!(index.get(&entry.0).map(|entry| entry.key), Some(new_key));
    }

    thread_rng().shuffle(&mut expected);

    let mut expected_len = expected.len();
    for (score, key) in expected {
        let entry = index.remove(&score).unwrap();
        expected_len -= 1;

        assert_eq!(entry.score, score);
        assert_eq!(entry.key, key);
        assert_eq!(index.len(), expected_len);
        assert!(!index.contains(&score));
        assert_eq!(index.remove(&score), None);
    }

    assert!(index.is_empty());
}

#[test]
fn int_test_duplicate_scores() {
    let mut index = ScoreIndex::new();

    for round in 0..100u32 {
        for score in 0..10u32 {
            index.insert(round, score);
        }
    }
    assert_eq!(index.len(), 1000);

    // lookups land on the earliest-inserted duplicate
    for score in 0..10 {
        assert_eq!(index.get(&score).map(|entry| entry.key), Some(0));
    }

    // removals take the latest-inserted duplicate first
    for round in (0..100u32).rev() {
        for score in 0..10 {
            assert_eq!(index.remove(&score).map(|entry| entry.key), Some(round));
        }
    }

    assert!(index.is_empty());
}
