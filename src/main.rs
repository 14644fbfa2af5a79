extern crate skip_index;

use skip_index::skiplist::ScoreIndex;

fn main() {
    let mut index = ScoreIndex::new();
    let seed = [
        ("one", 1),
        ("two", 2),
        ("four", 4),
        ("five", 5),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
    ];

    for &(key, score) in &seed {
        let height = index.insert(key, score);
        println!("insert {}({}) height {}", key, score, height);
    }
    print!("{}", index.dump());

    for score in 1..=11 {
        match index.get(&score) {
            Some(entry) => println!("search {} found key {}", score, entry.key),
            None => println!("search {} not found", score),
        }
    }

    for &score in &[2, 22, 8] {
        match index.remove(&score) {
            Some(entry) => println!("delete {} removed key {}", score, entry.key),
            None => println!("delete {} not found", score),
        }
        print!("{}", index.dump());
    }
}
