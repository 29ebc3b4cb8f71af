//! End-to-end tests for a full DAXPY run
//!
//! These drive [`run`](crate::run) the same way the binary does and check the
//! output vector from the outside, independent of the built-in verifier.

use crate::{run, DaxpyConfig, Error};
use rstest::rstest;
use std::error::Error as StdError;

/// Tests the four element scenario with the default coefficient
#[test]
fn test_four_elements() -> Result<(), Box<dyn StdError>> {
    let triple = run(&DaxpyConfig::new(4)?)?;

    let expected = [0.0, 0.4, 0.8, 1.2];
    for (got, want) in triple.c.iter().zip(expected) {
        assert!((got - want).abs() <= 1e-6, "got {got}, expected {want}");
    }

    Ok(())
}

/// Tests that a single element does not trip up the second worker
#[test]
fn test_single_element() -> Result<(), Box<dyn StdError>> {
    let triple = run(&DaxpyConfig::new(1)?)?;
    assert_eq!(triple.len(), 1);
    assert_eq!(triple.c[0], 0.0);
    Ok(())
}

/// Tests the closed form holds for every index on a range of sizes
#[rstest]
#[case(2)]
#[case(3)]
#[case(16)]
#[case(17)]
#[case(33)]
#[case(4097)]
#[case(1_000_000)]
fn test_every_element_matches(#[case] size: i64) -> Result<(), Box<dyn StdError>> {
    let config = DaxpyConfig::new(size)?;
    let triple = run(&config)?;

    assert_eq!(triple.len(), size as usize);
    for i in 0..triple.len() {
        let expected = config.alpha * triple.a[i] + triple.b[i];
        assert!((triple.c[i] - expected).abs() <= 1e-6, "index {i}");
    }

    Ok(())
}

/// Tests that two runs with the same size produce identical output
#[test]
fn test_runs_are_idempotent() -> Result<(), Box<dyn StdError>> {
    let config = DaxpyConfig::new(10_001)?;
    let first = run(&config)?;
    let second = run(&config)?;

    let bits = |c: &[f64]| c.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.c), bits(&second.c));

    Ok(())
}

/// Tests that disabling prefetch leaves the result unchanged
#[test]
fn test_prefetch_is_only_a_hint() -> Result<(), Box<dyn StdError>> {
    let with = run(&DaxpyConfig::new(1000)?)?;
    let without = run(&DaxpyConfig::new(1000)?.prefetch_distance(0))?;
    assert_eq!(&with.c[..], &without.c[..]);
    Ok(())
}

/// Tests a non-default coefficient
#[test]
fn test_custom_alpha() -> Result<(), Box<dyn StdError>> {
    let triple = run(&DaxpyConfig::new(5)?.alpha(-1.0))?;
    // -a + b = i * 0.1 up to rounding
    for (i, got) in triple.c.iter().enumerate() {
        assert!((got - i as f64 * 0.1).abs() <= 1e-12);
    }
    Ok(())
}

/// Tests that an invalid size never reaches allocation
#[test]
fn test_invalid_size() {
    assert!(matches!(DaxpyConfig::new(0), Err(Error::InvalidSize(0))));
}

/// Tests that an oversized prefetch distance is ignored, not fatal
#[test]
fn test_huge_prefetch_distance() -> Result<(), Box<dyn StdError>> {
    let triple = run(&DaxpyConfig::new(4)?.prefetch_distance(usize::MAX))?;
    assert_eq!(&triple.c[..], &run(&DaxpyConfig::new(4)?)?.c[..]);
    Ok(())
}
