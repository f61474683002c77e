//! Multi-threaded matmul.
//!
//! Rows of C are split across rayon's pool; each task runs the vectorized
//! (and optionally tiled) row kernel on rows it owns exclusively.
//!
//! - `scheduler`: row partitioning, `parallelize_rows`, pool configuration
//! - `parallel`: `matmul_parallelized` and the tiled parallel variants

pub mod parallel;
pub mod scheduler;
