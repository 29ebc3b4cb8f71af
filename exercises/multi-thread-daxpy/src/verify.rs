use crate::error::{Error, Result};
use crate::vector::VectorTriple;

/// Checks `|c[i] - (alpha * a[i] + b[i])| <= tolerance` for every index.
///
/// Stops at the first mismatch and reports it. A NaN on either side counts
/// as a mismatch.
pub fn verify(triple: &VectorTriple, alpha: f64, tolerance: f64) -> Result<()> {
    let inputs = triple.a.iter().zip(triple.b.iter());

    for (index, ((&a, &b), &got)) in inputs.zip(triple.c.iter()).enumerate() {
        let expected = alpha * a + b;
        let diff = (got - expected).abs();
        if diff.is_nan() || diff > tolerance {
            return Err(Error::Verification {
                index,
                got,
                expected,
            });
        }
    }

    Ok(())
}
