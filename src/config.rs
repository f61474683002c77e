//! Benchmark runner configuration.
//!
//! Kernel shapes are const generics; only the benchmark has runtime knobs.
//! Each can be overridden from the environment:
//!
//! - `MATMUL_BENCH_SIZES`: comma-separated square sizes, e.g. `256,512`
//! - `MATMUL_BENCH_ITERATIONS`: timed runs per variant
//! - `MATMUL_THREADS`: worker threads; `0` or unset keeps rayon's default

use crate::error::{MatmulError, Result};

pub const SIZES_VAR: &str = "MATMUL_BENCH_SIZES";
pub const ITERATIONS_VAR: &str = "MATMUL_BENCH_ITERATIONS";
pub const THREADS_VAR: &str = "MATMUL_THREADS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub iterations: usize,
    /// `None` leaves the rayon pool alone.
    pub threads: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![128, 256, 512],
            iterations: 3,
            threads: None,
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to the defaults for
    /// missing keys.
    ///
    /// # Errors
    ///
    /// `Config` if a value is present but not a valid number, or if sizes
    /// or iterations would be empty or zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SIZES_VAR) {
            let sizes = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_positive(SIZES_VAR, s))
                .collect::<Result<Vec<_>>>()?;
            if sizes.is_empty() {
                return Err(invalid(SIZES_VAR, &raw));
            }
            config.sizes = sizes;
        }

        if let Some(raw) = lookup(ITERATIONS_VAR) {
            config.iterations = parse_positive(ITERATIONS_VAR, raw.trim())?;
        }

        if let Some(raw) = lookup(THREADS_VAR) {
            let threads: usize = raw.trim().parse().map_err(|_| invalid(THREADS_VAR, &raw))?;
            config.threads = (threads > 0).then_some(threads);
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid(key, raw)),
    }
}

fn invalid(key: &str, value: &str) -> MatmulError {
    MatmulError::Config {
        key: key.to_string(),
        value: value.to_string(),
    }
}
