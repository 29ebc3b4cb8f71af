//! A single-threaded floating point workload.
//!
//! Sums `(sin(i) * cos(i) + sqrt(i)) / tan(i)` over a fixed integer range to
//! keep the FPU busy with transcendental math. The result is reported with six
//! fractional digits.
//!
//! The sum depends on the platform's libm: trigonometric functions may differ
//! in the last bit across implementations, so the printed value is only
//! reproducible for a fixed math library.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod workload;

pub use config::WorkloadConfig;
pub use workload::{report, run, term};
