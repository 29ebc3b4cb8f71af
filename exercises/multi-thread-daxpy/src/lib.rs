//! A two-thread DAXPY benchmark.
//!
//! Computes `c = alpha * a + b` over three cache-line aligned vectors. The
//! index range is split into one contiguous chunk per worker, each worker is
//! pinned to its own CPU and prefetches a few elements ahead of its cursor.
//! After all workers are joined the output is checked against the closed
//! form.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod partition;
pub mod vector;
pub mod verify;
pub mod worker;

#[cfg(test)]
mod tests;

use std::time::Instant;

use log::{debug, info};

pub use config::{DaxpyConfig, WORKERS};
pub use error::{Error, Result};
pub use partition::{partition, WorkAssignment};
pub use vector::{AlignedBuffer, VectorTriple};
pub use verify::verify;
pub use worker::{axpy, dispatch, NamedThreads, Spawner};

/// Allocates the vectors, runs the workers and verifies the result.
///
/// The verified vectors are handed back to the caller; dropping them
/// releases the memory.
pub fn run(config: &DaxpyConfig) -> Result<VectorTriple> {
    debug!("{config:?}");

    let mut triple = VectorTriple::allocate(config.vector_size)?;

    let assignments = partition(config.vector_size, WORKERS);
    for assignment in &assignments {
        debug!(
            "worker {} assigned {:?}",
            assignment.worker_id,
            assignment.range()
        );
    }

    let start = Instant::now();
    dispatch(&mut triple, config, &assignments)?;
    info!(
        "daxpy over {} elements on {} workers took {:.2?}",
        config.vector_size,
        assignments.len(),
        start.elapsed()
    );

    verify(&triple, config.alpha, config.tolerance)?;
    Ok(triple)
}
