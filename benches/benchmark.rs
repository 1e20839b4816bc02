use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use balanced_dict::{AvlTree, OrderedSet, RedBlackTree};

const N: usize = 100_000;

fn bench_engine<T>(c: &mut Criterion, name: &str, values: &[i32])
where
    T: OrderedSet<i32> + Default,
{
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("insert", N), |b| {
        b.iter(|| {
            let mut tree = T::default();
            for value in values {
                tree.insert(*value);
            }
            black_box(tree.size())
        })
    });

    let mut tree = T::default();
    for value in values {
        tree.insert(*value);
    }

    group.bench_function(BenchmarkId::new("search", N), |b| {
        b.iter(|| {
            for value in values {
                black_box(tree.search(value));
            }
        })
    });

    group.bench_function(BenchmarkId::new("remove", N), |b| {
        b.iter(|| {
            let mut tree = T::default();
            for value in values {
                tree.insert(*value);
            }
            for value in values {
                tree.delete(value);
            }
            black_box(tree.height())
        })
    });

    group.finish();
}

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    // Ten times the sample size as key range, so some keys repeat
    let values: Vec<i32> = (0..N).map(|_| rng.gen_range(0..(N * 10) as i32)).collect();

    bench_engine::<AvlTree<i32>>(c, "avl", &values);
    bench_engine::<RedBlackTree<i32>>(c, "red_black", &values);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
