use std::time::Instant;

use balanced_dict::{Dictionary, OrderedSet, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SIZES: [usize; 3] = [10_000, 50_000, 100_000];

fn main() {
    for size in SIZES {
        let mut rng = StdRng::seed_from_u64(42);
        let values: Vec<i32> = (0..size).map(|_| rng.gen_range(0..(size * 10) as i32)).collect();
        let sample: Vec<i32> = (0..size / 10).map(|_| values[rng.gen_range(0..size)]).collect();

        println!("== {} values ==", size);
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let mut dictionary = Dictionary::new(strategy);

            let start = Instant::now();
            for value in &values {
                dictionary.insert(*value);
            }
            let insert = start.elapsed();

            let start = Instant::now();
            let found = sample.iter().filter(|value| dictionary.search(value)).count();
            let search = start.elapsed();

            let start = Instant::now();
            for value in &sample {
                dictionary.delete(value);
            }
            let delete = start.elapsed();

            println!(
                "{:>9}: insert {:?}, search {:?} ({} found), delete {:?}, final height {}",
                strategy.to_string(),
                insert,
                search,
                found,
                delete,
                dictionary.height()
            );
        }
    }
}
