use std::str::FromStr;

use rayon::prelude::*;
use thiserror::Error;

use hybrid_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The strategy name could not be parsed.
    #[error("unknown execution strategy {0:?}, expected serial, rows or fixed:<n>")]
    InvalidStrategy(String),

    /// Input and output sizes do not match.
    #[error("source and destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how the row-wise filtering loops are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    #[default]
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl FromStr for ExecutionStrategy {
    type Err = ParallelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "serial" => Ok(Self::Serial),
            "rows" | "parallel" => Ok(Self::ParallelRows),
            _ => match s.strip_prefix("fixed:").map(str::parse::<usize>) {
                Some(Ok(n)) if n > 0 => Ok(Self::Fixed(n)),
                Some(Ok(n)) => Err(ParallelError::InvalidThreadCount(n)),
                _ => Err(ParallelError::InvalidStrategy(s)),
            },
        }
    }
}

/// Fill `dst` row by row with the given strategy.
///
/// `dst` is split into rows of `row_len` samples and `f` receives the row index
/// together with the mutable row. Every row is written by exactly one call.
pub fn for_each_row<F>(
    strategy: ExecutionStrategy,
    dst: &mut [f32],
    row_len: usize,
    f: F,
) -> Result<(), ParallelError>
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    if row_len == 0 || dst.is_empty() {
        return Ok(());
    }

    if dst.len() % row_len != 0 {
        return Err(ParallelError::SizeMismatch);
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(r, row)| f(r, row));
            });
        }
    }

    Ok(())
}

/// Apply a function to each sample of two images in parallel, writing into `dst`.
///
/// PRECONDITION: the three images have the same shape.
pub fn par_iter_rows_val_two(
    src1: &Image<f32>,
    src2: &Image<f32>,
    dst: &mut Image<f32>,
    f: impl Fn(&f32, &f32, &mut f32) + Send + Sync,
) {
    let row_len = src1.cols() * src1.num_channels();
    if row_len == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(row_len)
        .zip(src2.as_slice().par_chunks_exact(row_len))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row_len))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}
