//! Rounding modes and the `round_qr` primitive.
//!
//! Every place in this crate that needs to turn a truncated quotient into a
//! correctly-rounded one (integer division, quantize, adjusted) funnels
//! through [`round_qr`]. Keeping the decision in one function is what makes
//! the nine modes in [`RoundingMode`] actually exhaustive rather than
//! reimplemented-slightly-differently at each call site.

use std::sync::atomic::{AtomicU8, Ordering};

/// How to round when a quotient does not divide evenly.
///
/// `Default` is not a rounding rule in its own right; it resolves to
/// whatever [`set_default_mode`] last configured (initially [`RoundingMode::HalfEven`],
/// matching common banker's-rounding conventions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    Default = 0,
    Round05Up = 1,
    Ceiling = 2,
    Down = 3,
    Floor = 4,
    HalfDown = 5,
    HalfEven = 6,
    HalfUp = 7,
    Up = 8,
}

impl RoundingMode {
    const fn from_u8(v: u8) -> Self {
        match v {
            1 => RoundingMode::Round05Up,
            2 => RoundingMode::Ceiling,
            3 => RoundingMode::Down,
            4 => RoundingMode::Floor,
            5 => RoundingMode::HalfDown,
            6 => RoundingMode::HalfEven,
            7 => RoundingMode::HalfUp,
            8 => RoundingMode::Up,
            _ => RoundingMode::Default,
        }
    }

    /// Resolves `Default` against the process-wide setting; every other
    /// mode is already concrete and is returned unchanged.
    pub fn resolve(self) -> Self {
        match self {
            RoundingMode::Default => default_mode(),
            other => other,
        }
    }
}

static DEFAULT_MODE: AtomicU8 = AtomicU8::new(RoundingMode::HalfEven as u8);

/// Reads the process-wide default rounding mode. A plain relaxed load: the
/// contract (see module docs on the crate) is that this is never written
/// concurrently with arithmetic.
pub fn default_mode() -> RoundingMode {
    RoundingMode::from_u8(DEFAULT_MODE.load(Ordering::Relaxed))
}

/// Sets the process-wide default rounding mode, returning the previous one.
///
/// Intended to be called at process initialization or explicitly by the
/// caller, not interleaved with concurrent arithmetic on other threads.
pub fn set_default_mode(mode: RoundingMode) -> RoundingMode {
    assert_ne!(mode, RoundingMode::Default, "cannot set the default mode to Default");
    let prev = DEFAULT_MODE.swap(mode as u8, Ordering::Relaxed);
    RoundingMode::from_u8(prev)
}

/// The nine-mode decision core shared by [`round_qr`] and, for operands
/// wider than 64 bits, [`crate::digits`]. `rem_cmp_half` compares the
/// remainder against half the divisor; `quot_is_odd`/`quot_is_mult_of_5`
/// describe the truncated quotient in the two modes that care about its
/// value rather than just the remainder.
pub(crate) fn decide(
    sign: i8,
    quot_is_odd: bool,
    quot_is_mult_of_5: bool,
    rem_is_zero: bool,
    rem_cmp_half: std::cmp::Ordering,
    mode: RoundingMode,
) -> bool {
    use std::cmp::Ordering;
    if rem_is_zero {
        return false;
    }
    match mode.resolve() {
        RoundingMode::Default => unreachable!("resolve() always yields a concrete mode"),
        RoundingMode::Round05Up => quot_is_mult_of_5,
        RoundingMode::Ceiling => sign >= 0,
        RoundingMode::Down => false,
        RoundingMode::Floor => sign < 0,
        RoundingMode::HalfDown => rem_cmp_half == Ordering::Greater,
        RoundingMode::HalfEven => {
            rem_cmp_half == Ordering::Greater || (rem_cmp_half == Ordering::Equal && quot_is_odd)
        }
        RoundingMode::HalfUp => rem_cmp_half != Ordering::Less,
        RoundingMode::Up => true,
    }
}

/// Decides whether a truncated quotient should be bumped up by one.
///
/// `sign` is the sign of the mathematical (unrounded) result: `-1`, `0`, or
/// `+1`. `quot` and `rem` are the truncated quotient and remainder of
/// `|numerator| / divisor`; the contract is `rem < divisor` (a `divisor` of
/// `0` stands for `2^64`, matching the original C contract for the rare case
/// the true divisor is exactly `2^64`). Returns `true` iff the quotient
/// should be incremented by one.
pub fn round_qr(sign: i8, quot: u64, rem: u64, divisor: u64, mode: RoundingMode) -> bool {
    debug_assert!(divisor == 0 || rem < divisor);
    let tie = half_of(divisor);
    decide(sign, quot % 2 != 0, quot % 5 == 0, rem == 0, rem.cmp(&tie), mode)
}

/// `divisor / 2`, treating a `divisor` of `0` as `2^64`.
fn half_of(divisor: u64) -> u64 {
    if divisor == 0 { 0x8000_0000_0000_0000 } else { divisor >> 1 }
}

/// Rounds `num` to the nearest multiple of `quant` under `mode`, using
/// `round_qr` for the tie-breaking decision.
pub fn round_to_multiple(sign: i8, num: u64, quant: u64, mode: RoundingMode) -> u64 {
    let rem = num % quant;
    if rem == 0 {
        return num;
    }
    let quot = num / quant;
    let bump = round_qr(sign, quot, rem, quant, mode) as u64;
    num + bump * quant - rem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_even_ties_to_even() {
        // 2.5 -> 2 ; 3.5 -> 4 (quot is the integer part, rem == divisor/2)
        assert!(!round_qr(1, 2, 5, 10, RoundingMode::HalfEven));
        assert!(round_qr(1, 3, 5, 10, RoundingMode::HalfEven));
    }

    #[test]
    fn half_up_always_bumps_on_tie() {
        assert!(round_qr(1, 2, 5, 10, RoundingMode::HalfUp));
        assert!(round_qr(1, 3, 5, 10, RoundingMode::HalfUp));
    }

    #[test]
    fn half_down_never_bumps_on_tie() {
        assert!(!round_qr(1, 2, 5, 10, RoundingMode::HalfDown));
        assert!(!round_qr(1, 3, 5, 10, RoundingMode::HalfDown));
    }

    #[test]
    fn ceiling_and_floor_depend_on_sign() {
        assert!(round_qr(1, 2, 3, 10, RoundingMode::Ceiling));
        assert!(!round_qr(-1, 2, 3, 10, RoundingMode::Ceiling));
        assert!(round_qr(-1, 2, 3, 10, RoundingMode::Floor));
        assert!(!round_qr(1, 2, 3, 10, RoundingMode::Floor));
    }

    #[test]
    fn up_and_down_ignore_sign() {
        assert!(round_qr(1, 2, 1, 10, RoundingMode::Up));
        assert!(round_qr(-1, 2, 1, 10, RoundingMode::Up));
        assert!(!round_qr(1, 2, 9, 10, RoundingMode::Down));
    }

    #[test]
    fn round_05up_only_bumps_multiples_of_five() {
        assert!(round_qr(1, 5, 1, 10, RoundingMode::Round05Up));
        assert!(!round_qr(1, 6, 1, 10, RoundingMode::Round05Up));
    }

    #[test]
    fn zero_remainder_never_bumps() {
        for mode in [
            RoundingMode::Round05Up,
            RoundingMode::Ceiling,
            RoundingMode::Down,
            RoundingMode::Floor,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
            RoundingMode::HalfUp,
            RoundingMode::Up,
        ] {
            assert!(!round_qr(1, 7, 0, 10, mode));
        }
    }

    #[test]
    fn default_mode_roundtrips() {
        let prev = default_mode();
        set_default_mode(RoundingMode::Up);
        assert_eq!(default_mode(), RoundingMode::Up);
        set_default_mode(prev);
    }
}
