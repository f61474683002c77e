use approx::relative_eq;
use matmul_tiled::blocked::tile::tile;
use matmul_tiled::blocked::{TILE_X, TILE_Y, UNROLL};
use matmul_tiled::kernels::DOT_WIDTH;
use matmul_tiled::kernels::dot::dot_row;
use matmul_tiled::kernels::simd::NELTS;
use matmul_tiled::threaded::scheduler::{parallelize_rows, partition_rows};
use matmul_tiled::{
    Matrix, MatmulError, Result, matmul, matmul_naive_ijk, matmul_naive_ikj, matmul_parallelized,
    matmul_tiled, matmul_tiled_parallelized, matmul_tiled_unrolled_parallelized,
    matmul_vectorized, matmul_vectorized_unrolled, zeros,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicUsize, Ordering};

type Variant = fn(&mut Matrix, &Matrix, &Matrix) -> Result<()>;

/// Variants that accept any compatible shape.
const ANY_SHAPE: [(&str, Variant); 5] = [
    ("naive_ikj", matmul_naive_ikj),
    ("vectorized", matmul_vectorized::<DOT_WIDTH>),
    ("vectorized_unrolled", matmul_vectorized_unrolled::<NELTS, 4>),
    ("parallelized", matmul_parallelized::<DOT_WIDTH>),
    ("auto", matmul),
];

/// Variants that need C.cols % TILE_X == 0 and A.cols % TILE_Y == 0.
const TILED: [(&str, Variant); 3] = [
    ("tiled", matmul_tiled::<TILE_X, TILE_Y, DOT_WIDTH>),
    (
        "tiled_parallelized",
        matmul_tiled_parallelized::<TILE_X, TILE_Y, DOT_WIDTH>,
    ),
    (
        "tiled_unrolled_parallelized",
        matmul_tiled_unrolled_parallelized::<TILE_X, TILE_Y, NELTS, UNROLL>,
    ),
];

fn assert_matrices_close(expected: &Matrix, actual: &Matrix, name: &str) {
    assert_eq!(expected.rows(), actual.rows(), "{}: row mismatch", name);
    assert_eq!(expected.cols(), actual.cols(), "{}: col mismatch", name);
    for (i, (&e, &a)) in expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .enumerate()
    {
        assert!(
            relative_eq!(e, a, epsilon = 1e-4, max_relative = 1e-5),
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            e,
            a
        );
    }
}

fn random_pair(m: usize, n: usize, k: usize, seed: u64) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = Matrix::random_with(m, k, &mut rng).unwrap();
    let b = Matrix::random_with(k, n, &mut rng).unwrap();
    (a, b)
}

fn reference(a: &Matrix, b: &Matrix) -> Matrix {
    let mut c = zeros(a.rows(), b.cols()).unwrap();
    matmul_naive_ijk(&mut c, a, b).unwrap();
    c
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn test_2x2_every_variant() {
    let a = Matrix::from_buffer(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_buffer(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();

    for (name, f) in ANY_SHAPE {
        let mut c = zeros(2, 2).unwrap();
        f(&mut c, &a, &b).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0], "{}", name);
    }
}

#[test]
fn test_2x3_times_3x2() {
    let a = Matrix::from_buffer(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = Matrix::from_buffer(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
    let mut c = zeros(2, 2).unwrap();

    matmul(&mut c, &a, &b).unwrap();
    assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_zeros_read_back_zero() {
    let m = zeros(7, 13).unwrap();
    for r in 0..7 {
        for c in 0..13 {
            assert_eq!(m.get(r, c), 0.0);
        }
    }
}

// ============================================================
// Variant agreement
// ============================================================

#[test]
fn test_any_shape_variants_match_naive() {
    let shapes = [
        (1, 1, 1),
        (3, 5, 7),
        (7, 3, 5),
        (11, 13, 17),
        (4, 10, 6),
        (16, 16, 16),
        (33, 47, 29),
        (64, 100, 75),
    ];

    for (i, &(m, n, k)) in shapes.iter().enumerate() {
        let (a, b) = random_pair(m, n, k, i as u64);
        let expected = reference(&a, &b);

        for (name, f) in ANY_SHAPE {
            let mut c = zeros(m, n).unwrap();
            f(&mut c, &a, &b).unwrap();
            assert_matrices_close(&expected, &c, &format!("{}_{}x{}x{}", name, m, n, k));
        }
    }
}

#[test]
fn test_tiled_variants_match_naive() {
    let shapes = [
        (1, TILE_X, TILE_Y),
        (5, TILE_X * 2, TILE_Y * 3),
        (17, TILE_X * 3, TILE_Y * 8),
        (64, 128, 128),
    ];

    for (i, &(m, n, k)) in shapes.iter().enumerate() {
        let (a, b) = random_pair(m, n, k, 100 + i as u64);
        let expected = reference(&a, &b);

        for (name, f) in TILED {
            let mut c = zeros(m, n).unwrap();
            f(&mut c, &a, &b).unwrap();
            assert_matrices_close(&expected, &c, &format!("{}_{}x{}x{}", name, m, n, k));
        }
    }
}

#[test]
fn test_large_reduction_within_tolerance() {
    // A few thousand terms per output element.
    let (m, n, k) = (8, 64, 2048);
    let (a, b) = random_pair(m, n, k, 7);
    let expected = reference(&a, &b);

    let mut c = zeros(m, n).unwrap();
    matmul(&mut c, &a, &b).unwrap();
    assert_matrices_close(&expected, &c, "auto_k2048");
}

// ============================================================
// Accumulation (C += A*B, not C = A*B)
// ============================================================

#[test]
fn test_twice_doubles() {
    let (a, b) = random_pair(24, 64, 32, 3);

    for (name, f) in ANY_SHAPE.iter().chain(TILED.iter()) {
        let mut once = zeros(24, 64).unwrap();
        f(&mut once, &a, &b).unwrap();

        let mut twice = zeros(24, 64).unwrap();
        f(&mut twice, &a, &b).unwrap();
        f(&mut twice, &a, &b).unwrap();

        let doubled: Vec<f32> = once.as_slice().iter().map(|v| v * 2.0).collect();
        let doubled = Matrix::from_buffer(24, 64, doubled).unwrap();
        assert_matrices_close(&doubled, &twice, name);
    }
}

#[test]
fn test_accumulates_into_existing_values() {
    let a: Vec<f32> = (0..9 * 9).map(|i| (i % 10) as f32).collect();
    let b: Vec<f32> = (0..9 * 9).map(|i| (i % 7) as f32).collect();
    let a = Matrix::from_buffer(9, 9, a).unwrap();
    let b = Matrix::from_buffer(9, 9, b).unwrap();

    let mut c_naive = Matrix::from_buffer(9, 9, vec![5.0; 81]).unwrap();
    let mut c_fast = c_naive.clone();
    matmul_naive_ijk(&mut c_naive, &a, &b).unwrap();
    matmul(&mut c_fast, &a, &b).unwrap();

    assert_matrices_close(&c_naive, &c_fast, "accumulation");
    assert!(c_fast.get(1, 1) > 5.0, "Should accumulate, not overwrite");
}

// ============================================================
// Vector tail and tile boundaries
// ============================================================

#[test]
fn test_tail_columns_covered_once() {
    // cols = 10, width = 8: columns 0..8 vectorized, 8..10 scalar.
    let b_row = vec![1.0; 10];
    let mut c_row = vec![0.0; 10];
    dot_row::<8>(&mut c_row, 1.0, &b_row);
    assert_eq!(c_row, vec![1.0; 10]);

    let a = Matrix::from_buffer(1, 1, vec![3.0]).unwrap();
    let b = Matrix::from_buffer(1, 10, (0..10).map(|i| i as f32).collect()).unwrap();
    let mut c = zeros(1, 10).unwrap();
    matmul_vectorized::<8>(&mut c, &a, &b).unwrap();
    let expected: Vec<f32> = (0..10).map(|i| 3.0 * i as f32).collect();
    assert_eq!(c.as_slice(), expected.as_slice());
}

#[test]
fn test_tile_boundary_sizes() {
    for cols in [TILE_X - 1, TILE_X, TILE_X + 1, 2 * TILE_X - 1, 2 * TILE_X + 1] {
        for depth in [TILE_Y - 1, TILE_Y, TILE_Y + 1] {
            let (a, b) = random_pair(6, cols, depth, (cols * 31 + depth) as u64);
            let expected = reference(&a, &b);

            let mut c = zeros(6, cols).unwrap();
            matmul(&mut c, &a, &b).unwrap();
            assert_matrices_close(&expected, &c, &format!("auto_{}x{}", cols, depth));
        }
    }
}

#[test]
fn test_tiled_rejects_non_multiples() {
    let (a, b) = random_pair(4, TILE_X + 3, TILE_Y, 9);

    for (name, f) in TILED {
        let mut c = zeros(4, TILE_X + 3).unwrap();
        let err = f(&mut c, &a, &b).unwrap_err();
        assert!(
            matches!(err, MatmulError::TileMismatch { .. }),
            "{}: {}",
            name,
            err
        );
        assert!(c.as_slice().iter().all(|&v| v == 0.0), "{}: C was written", name);
    }
}

#[test]
fn test_tile_driver_order() {
    let mut seen = Vec::new();
    tile::<2, 3, _>(4, 6, |t| seen.push((t.x, t.y))).unwrap();
    assert_eq!(seen, vec![(0, 0), (2, 0), (0, 3), (2, 3)]);
}

// ============================================================
// Row-parallel scheduling
// ============================================================

#[test]
fn test_four_rows_two_workers() {
    assert_eq!(partition_rows(4, 2), vec![0..2, 2..4]);

    let (a, b) = random_pair(4, 20, 12, 11);
    let mut single = zeros(4, 20).unwrap();
    matmul_naive_ikj(&mut single, &a, &b).unwrap();

    let visits: Vec<AtomicUsize> = (0..4).map(|_| AtomicUsize::new(0)).collect();
    let mut parallel = zeros(4, 20).unwrap();
    parallelize_rows(&mut parallel, 2, |m, c_row| {
        visits[m].fetch_add(1, Ordering::SeqCst);
        for (k, &a_mk) in a.row(m).iter().enumerate() {
            dot_row::<8>(c_row, a_mk, b.row(k));
        }
    });

    assert!(visits.iter().all(|v| v.load(Ordering::SeqCst) == 1));
    assert_matrices_close(&single, &parallel, "four_rows_two_workers");
}

// ============================================================
// Error surface
// ============================================================

#[test]
fn test_dimension_mismatch_every_variant() {
    let a = zeros(4, TILE_Y).unwrap();
    let b = zeros(TILE_Y + 1, TILE_X).unwrap();

    for (name, f) in ANY_SHAPE.iter().chain(TILED.iter()) {
        let mut c = zeros(4, TILE_X).unwrap();
        let err = f(&mut c, &a, &b).unwrap_err();
        assert!(
            matches!(err, MatmulError::DimensionMismatch { .. }),
            "{}: {}",
            name,
            err
        );
    }
}

#[test]
#[should_panic]
fn test_out_of_range_get_panics() {
    let m = zeros(2, 2).unwrap();
    let _ = m.get(2, 1);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_column_past_row_end_panics() {
    let m = Matrix::from_buffer(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let _ = m.get(0, m.cols());
}

#[test]
fn test_empty_inner_dimension_is_noop() {
    let a = zeros(3, 0).unwrap();
    let b = zeros(0, 4).unwrap();
    let mut c = Matrix::from_buffer(3, 4, vec![1.0; 12]).unwrap();
    matmul(&mut c, &a, &b).unwrap();
    assert!(c.as_slice().iter().all(|&v| v == 1.0));
}
