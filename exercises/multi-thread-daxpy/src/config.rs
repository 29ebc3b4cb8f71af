use crate::error::{Error, Result};

/// Number of worker threads
pub const WORKERS: usize = 2;

/// Alignment of every vector, in bytes
pub const CACHE_LINE_SIZE: usize = 64;

/// How many elements ahead of its cursor a worker prefetches
pub const PREFETCH_DISTANCE: usize = 16;

/// Scalar coefficient of `c = alpha * a + b`
pub const ALPHA: f64 = 2.0;

/// Absolute tolerance used when verifying results
pub const TOLERANCE: f64 = 1e-6;

/// Configuration for a DAXPY run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaxpyConfig {
    /// Number of elements in each vector
    pub vector_size: usize,

    /// Scalar coefficient
    pub alpha: f64,

    /// Prefetch distance in elements; 0 disables prefetching
    pub prefetch_distance: usize,

    /// Absolute verification tolerance
    pub tolerance: f64,
}

impl DaxpyConfig {
    /// Create a configuration for `vector_size` elements with default values.
    ///
    /// Fails with [`Error::InvalidSize`] unless the size is positive.
    pub fn new(vector_size: i64) -> Result<Self> {
        if vector_size <= 0 {
            return Err(Error::InvalidSize(vector_size));
        }
        let vector_size =
            usize::try_from(vector_size).map_err(|_| Error::InvalidSize(vector_size))?;

        Ok(Self {
            vector_size,
            alpha: ALPHA,
            prefetch_distance: PREFETCH_DISTANCE,
            tolerance: TOLERANCE,
        })
    }

    /// Set the scalar coefficient
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the prefetch distance in elements
    pub fn prefetch_distance(mut self, distance: usize) -> Self {
        self.prefetch_distance = distance;
        self
    }

    /// Set the verification tolerance
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
