//! The summation loop and its report line.

use std::time::Instant;

use log::debug;

use crate::config::WorkloadConfig;

/// Contribution of a single integer `i` to the sum.
///
/// `tan(i)` can get arbitrarily close to zero, so the result may be huge,
/// infinite or NaN. That is part of the workload and is not guarded against.
#[inline]
pub fn term(i: u64) -> f64 {
    let x = i as f64;
    let val = x.sin() * x.cos() + x.sqrt();
    val / x.tan()
}

/// Runs the workload and returns the final accumulator.
pub fn run(config: &WorkloadConfig) -> f64 {
    let start = Instant::now();
    let mut sum = 0.0;

    for i in 1..=config.iterations {
        sum += term(i);
    }

    debug!(
        "summed {} terms in {:.2?}",
        config.iterations,
        start.elapsed()
    );
    sum
}

/// Formats the final sum the way the benchmark prints it.
///
/// NaN is spelled `nan` (or `-nan` with the sign bit set), matching C's
/// `%f`; Rust's own formatting would print `NaN`.
pub fn report(sum: f64) -> String {
    if sum.is_nan() {
        let sign = if sum.is_sign_negative() { "-" } else { "" };
        return format!("Final sum: {sign}nan");
    }
    format!("Final sum: {sum:.6}")
}
