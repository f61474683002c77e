//! Row-parallel scheduler.
//!
//! Output rows are split into contiguous chunks, one per work item. Each
//! rayon task owns its chunk of C exclusively, so rows are written without
//! locks; A and B are shared read-only. The call returns once every task
//! has joined, and a panic in any row is re-raised on the caller.

use std::ops::Range;

use log::{trace, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;

/// Rows per work item when `rows` are spread over at most
/// `num_work_items` chunks.
fn chunk_rows(rows: usize, num_work_items: usize) -> usize {
    let items = num_work_items.clamp(1, rows.max(1));
    rows.div_ceil(items).max(1)
}

/// Contiguous, disjoint row ranges covering `0..rows`, one per work item.
///
/// Returns fewer than `num_work_items` ranges when there are not enough
/// rows to go around.
pub fn partition_rows(rows: usize, num_work_items: usize) -> Vec<Range<usize>> {
    let chunk = chunk_rows(rows, num_work_items);
    (0..rows)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(rows))
        .collect()
}

/// Calls `calc_row(m, row)` once for every row `m` of `c`, in parallel.
///
/// `num_work_items` is a partition hint; passing `c.rows()` gives one task
/// per row and leaves it to rayon to cap the number of threads. No order
/// between rows is guaranteed. A matrix with no elements is left alone.
///
/// # Panics
///
/// A panic inside `calc_row` propagates to the caller after the other
/// tasks have stopped. Rows that already ran keep their writes.
pub fn parallelize_rows<F>(c: &mut Matrix, num_work_items: usize, calc_row: F)
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    let rows = c.rows();
    let cols = c.cols();
    if rows == 0 || cols == 0 {
        return;
    }

    let parts = partition_rows(rows, num_work_items);
    trace!(
        "parallelize_rows: {} rows in {} work items over {} threads",
        rows,
        parts.len(),
        rayon::current_num_threads()
    );

    // Hand each partition its own disjoint slice of C.
    let mut work = Vec::with_capacity(parts.len());
    let mut rest = c.as_mut_slice();
    for range in parts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * cols);
        work.push((range, head));
        rest = tail;
    }

    work.into_par_iter().for_each(|(range, rows_chunk)| {
        for (m, row) in range.zip(rows_chunk.chunks_exact_mut(cols)) {
            calc_row(m, row);
        }
    });
}

/// Sizes rayon's global pool. `0` keeps rayon's default (one thread per
/// logical CPU).
///
/// # Errors
///
/// `ThreadPool` if the global pool was already built, either by an earlier
/// call or by a parallel matmul that ran first.
pub fn configure_thread_pool(num_threads: usize) -> Result<()> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| {
            warn!("could not configure {} worker threads: {}", num_threads, e);
            MatmulError::ThreadPool(e.to_string())
        })
}
