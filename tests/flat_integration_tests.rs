//! Integration tests for the brute-force flat index.

use proxim::FlatIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen::<f32>()).collect())
        .collect()
}

#[test]
fn every_stored_vector_is_its_own_nearest() {
    let dim = 16;
    let n = 1000;
    let vectors = random_vectors(n, dim, 42);

    let mut index = FlatIndex::with_capacity(dim, n).expect("create");
    index.add_batch(&vectors).expect("add batch");

    for (i, v) in vectors.iter().enumerate() {
        let results = index.search(v, 1).expect("search");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0 as usize, i, "vector {i} did not find itself");
        assert_eq!(results[0].1, 0.0);
    }
}

#[test]
fn matches_naive_full_sort() {
    let dim = 8;
    let n = 500;
    let k = 25;
    let vectors = random_vectors(n, dim, 7);
    let queries = random_vectors(20, dim, 8);

    let mut index = FlatIndex::new(dim).expect("create");
    index.add_batch(&vectors).expect("add batch");

    for query in &queries {
        let mut reference: Vec<(u32, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let d: f32 = query
                    .iter()
                    .zip(v)
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum();
                (i as u32, d)
            })
            .collect();
        reference.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        reference.truncate(k);

        let results = index.search(query, k).expect("search");
        let ref_ids: Vec<u32> = reference.iter().map(|(id, _)| *id).collect();
        let got_ids: Vec<u32> = results.iter().map(|(id, _)| *id).collect();
        assert_eq!(got_ids, ref_ids);

        // Distances agree up to reduction order
        for ((_, d_ref), (_, d_got)) in reference.iter().zip(&results) {
            assert!((d_ref - d_got).abs() < 1e-3 * d_ref.max(1.0));
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let dim = 4;
    let vectors = random_vectors(200, dim, 99);
    let mut index = FlatIndex::new(dim).expect("create");
    index.add_batch(&vectors).expect("add batch");

    let query = random_vectors(1, dim, 100).pop().unwrap();
    let first = index.search(&query, 10).expect("search");
    let second = index.search(&query, 10).expect("search");
    assert_eq!(first, second);
}
