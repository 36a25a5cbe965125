//! Concrete end-to-end scenarios, each picked to exercise a specific
//! corner of the representation/rounding machinery rather than a generic
//! round-trip.

use fixdec::{Decimal, Error, RoundingMode};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn add_and_subtract_cross_variant() {
    let a = dec("5.30951e42");
    let b = dec("-12345678901234567890.12345");

    let sum = a.checked_add(&b).unwrap();
    assert_eq!(sum.to_string(), "5309509999999999999999987654321098765432109.87655");

    let diff = a.checked_sub(&b).unwrap();
    assert_eq!(diff.to_string(), "5309510000000000000000012345678901234567890.12345");
}

#[test]
fn subtract_demotes_back_to_shifted() {
    let a = dec("1792281625142643375935439503.35");
    let b = dec("1000000000000000000000000000.00");
    let diff = a.checked_sub(&b).unwrap();
    assert_eq!(diff.to_string(), "792281625142643375935439503.35");
}

#[test]
fn divide_with_precision_limit_and_default_rounding() {
    let a = dec("3.4");
    let b = dec("-6");
    let q = a.checked_div(&b, Some(9), RoundingMode::HalfEven).unwrap();
    assert_eq!(q.to_string(), "-0.566666667");
}

#[test]
fn divmod_with_negative_divisor_follows_floor_convention() {
    let a = dec("123456789.0123");
    let b = dec("-100.39");
    let (q, r) = a.checked_divmod(&b).unwrap();
    assert_eq!(q.to_string(), "-1229772");
    assert_eq!(r.to_string(), "-22.0677");
    // self == quotient * other + remainder
    assert_eq!(q.checked_mul(&b).unwrap().checked_add(&r).unwrap(), a);
}

#[test]
fn quantize_with_half_up() {
    let a = dec("10000000000400000000007");
    let quantum = dec("6.00");
    let q = a.quantize(&quantum, RoundingMode::HalfUp).unwrap();
    assert_eq!(q.to_string(), "10000000000400000000010.00");
}

#[test]
fn multiply_precision_limit_exceeded() {
    let a = dec("1e-32775");
    let b = dec("1e-32775");
    assert_eq!(a.checked_mul(&b), Err(Error::PrecLimitExceeded));
}

#[test]
fn multiply_exponent_limit_exceeded() {
    // The literal itself already exceeds MAX_EXP; a value that can't be
    // constructed can't be multiplied either, but the error code is the
    // same one the multiply would have surfaced.
    assert_eq!("1e20401094656".parse::<Decimal>(), Err(Error::ExpLimitExceeded));
}
