//! The public fixed-point decimal type.
//!
//! A [`Decimal`] is a sign, a fractional precision (`dec_prec`, the number
//! of digits after the decimal point), and an unsigned magnitude stored in
//! whichever of the two representations is narrow enough to hold it:
//! [`crate::shifted::Uint96`] for anything that fits 96 bits at precision
//! `<= 9`, or [`crate::digits::DigitArray`] for everything else. Every
//! constructor and arithmetic result chooses the narrower of the two that
//! fits — callers never see which one they got, only that equal values
//! compare equal regardless of how they're stored internally.
//!
//! The dynamic representation additionally tracks a word-granular exponent
//! (`exp`, in units of 19 decimal digits) so that a value like `5.30951e42`
//! doesn't have to materialize forty-some zero digits just to exist; that
//! exponent is only expanded back into real digits when an operation
//! actually needs to look at them (aligning two operands for add/sub, for
//! instance).

use crate::digits::{DigitArray, DEC_DIGITS_PER_DIGIT};
use crate::error::Error;
use crate::literal::{self, DecimalLiteral};
use crate::rounding::{self, RoundingMode};
use crate::shifted::{self, Uint96, MAX_DEC_PREC_FOR_SHINT, MAX_N_DEC_DIGITS_IN_SHINT};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest number of fractional decimal digits a [`Decimal`] can carry.
pub const MAX_DEC_PREC: u32 = 65_535;
/// Largest word-granular exponent a dynamic representation can carry.
pub const MAX_EXP: i32 = i32::MAX;
/// Smallest word-granular exponent; negative exponents would only ever be
/// needed to offset more fractional precision than `MAX_DEC_PREC` allows,
/// so this is derived from that limit rather than being independent.
pub const MIN_EXP: i32 = -(MAX_DEC_PREC as i32) / DEC_DIGITS_PER_DIGIT as i32 + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Shifted(Uint96),
    Dynamic { coeff: DigitArray, exp: i32 },
}

/// A sign-magnitude fixed-point decimal number: `sign * magnitude *
/// 10^-dec_prec`.
#[derive(Debug, Clone)]
pub struct Decimal {
    sign: i8,
    dec_prec: u32,
    repr: Repr,
}

impl Decimal {
    pub const ZERO: Self = Self { sign: 0, dec_prec: 0, repr: Repr::Shifted(Uint96::ZERO) };
    pub const ONE: Self = Self { sign: 1, dec_prec: 0, repr: Repr::Shifted(Uint96::ONE) };
    pub const MINUS_ONE: Self = Self { sign: -1, dec_prec: 0, repr: Repr::Shifted(Uint96::ONE) };

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// `true` iff the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// `-1`, `0`, or `1`.
    pub fn sign(&self) -> i8 {
        self.sign
    }

    /// Number of digits after the decimal point.
    pub fn dec_prec(&self) -> u32 {
        self.dec_prec
    }

    // -- construction --------------------------------------------------

    fn from_literal(lit: DecimalLiteral) -> Result<Self, Error> {
        let is_zero = lit.coeff.iter().all(|&d| d == 0);
        let sign: i8 = if is_zero {
            0
        } else if lit.negative {
            -1
        } else {
            1
        };
        if is_zero {
            // A zero value still carries whatever precision its literal
            // specified ("0.00" and "0" are distinct decimals with the same
            // numeric value), so this falls through the ordinary exponent
            // handling below rather than shortcutting to `Decimal::zero()`.
            let dec_prec = if lit.exp >= 0 { 0 } else { lit.exp.unsigned_abs().min(MAX_DEC_PREC as u64) as u32 };
            return Ok(Self { sign: 0, dec_prec, repr: Repr::Shifted(Uint96::ZERO) });
        }

        if lit.exp >= 0 {
            let exp = lit.exp as u64;
            if exp > MAX_EXP as u64 {
                return Err(Error::ExpLimitExceeded);
            }
            if lit.coeff.len() + exp as usize <= MAX_N_DEC_DIGITS_IN_SHINT {
                if let Some(u96) = shifted::from_dec_coeff(&lit.coeff, exp as usize) {
                    return Ok(Self { sign, dec_prec: 0, repr: Repr::Shifted(u96) });
                }
            }
            let word_exp = exp / DEC_DIGITS_PER_DIGIT as u64;
            let leftover = (exp % DEC_DIGITS_PER_DIGIT as u64) as u32;
            if word_exp > MAX_EXP as u64 {
                return Err(Error::ExpLimitExceeded);
            }
            tracing::debug!(leftover, word_exp, "literal outgrows shifted-int envelope, promoting to dynamic");
            let mut coeff = DigitArray::from_dec_digits(&lit.coeff);
            if leftover > 0 {
                coeff = coeff.shift_decimal_left(leftover);
            }
            Ok(Self { sign, dec_prec: 0, repr: Repr::Dynamic { coeff, exp: word_exp as i32 } })
        } else {
            // `lit.exp` can be `i64::MIN` for a syntactically valid literal
            // (an arbitrarily large negative exponent), which plain negation
            // would overflow; `unsigned_abs` handles that value correctly.
            let dec_prec = lit.exp.unsigned_abs();
            if dec_prec > MAX_DEC_PREC as u64 {
                return Err(Error::PrecLimitExceeded);
            }
            let dec_prec = dec_prec as u32;
            if lit.coeff.len() <= MAX_N_DEC_DIGITS_IN_SHINT && dec_prec <= MAX_DEC_PREC_FOR_SHINT {
                if let Some(u96) = shifted::from_dec_coeff(&lit.coeff, 0) {
                    return Ok(Self { sign, dec_prec, repr: Repr::Shifted(u96) });
                }
            }
            let coeff = DigitArray::from_dec_digits(&lit.coeff);
            Ok(Self { sign, dec_prec, repr: Repr::Dynamic { coeff, exp: 0 } })
        }
    }

    // -- internal helpers -------------------------------------------------

    /// Picks the narrowest representation that holds `mag * 10^-dec_prec`.
    fn narrow(mag: DigitArray, dec_prec: u32) -> Repr {
        if mag.is_zero() {
            return Repr::Shifted(Uint96::ZERO);
        }
        if dec_prec <= MAX_DEC_PREC_FOR_SHINT {
            if let Some(u128v) = mag.try_to_u128() {
                if let Some(u96) = Uint96::from_u128(&u128v) {
                    return Repr::Shifted(u96);
                }
            }
        }
        tracing::debug!(dec_prec, "promoting result to dynamic digit-array representation");
        let trailing = mag.trailing_zero_decimal_digits();
        let word_strip = trailing / DEC_DIGITS_PER_DIGIT;
        if word_strip > 0 {
            let stripped = mag.shift_decimal_right(word_strip * DEC_DIGITS_PER_DIGIT);
            Repr::Dynamic { coeff: stripped, exp: word_strip as i32 }
        } else {
            Repr::Dynamic { coeff: mag, exp: 0 }
        }
    }

    /// Materializes the full magnitude as a digit array, expanding any
    /// word-sparse exponent into real digits.
    fn magnitude_digit_array(&self) -> DigitArray {
        match &self.repr {
            Repr::Shifted(u) => DigitArray::from_digit_words(u.to_digit_words()),
            Repr::Dynamic { coeff, exp } => {
                if *exp == 0 {
                    coeff.clone()
                } else {
                    coeff.shift_decimal_left((*exp as u32) * DEC_DIGITS_PER_DIGIT)
                }
            }
        }
    }

    /// Total count of significant decimal digits in the magnitude, without
    /// materializing a word-sparse exponent.
    fn total_digit_count(&self) -> i64 {
        fn count_decimal_digits(mut v: u64) -> u32 {
            if v == 0 {
                return 1;
            }
            let mut n = 0;
            while v > 0 {
                v /= 10;
                n += 1;
            }
            n
        }
        match &self.repr {
            Repr::Shifted(u) => {
                let words = u.to_digit_words();
                let leading = *words.last().unwrap();
                (words.len() as i64 - 1) * DEC_DIGITS_PER_DIGIT as i64 + count_decimal_digits(leading) as i64
            }
            Repr::Dynamic { coeff, exp } => {
                let word_len = coeff.digits().len() as i64 + *exp as i64;
                let leading = *coeff.digits().last().unwrap();
                (word_len - 1) * DEC_DIGITS_PER_DIGIT as i64 + count_decimal_digits(leading) as i64
            }
        }
    }

    /// Order of magnitude: the exponent `e` such that `10^e <= |self| <
    /// 10^(e+1)`. Undefined for zero.
    pub fn magnitude(&self) -> Result<i32, Error> {
        if self.sign == 0 {
            return Err(Error::MagnitudeOfZero);
        }
        let total_digits = self.total_digit_count();
        Ok((total_digits - 1 - self.dec_prec as i64) as i32)
    }

    // -- comparison ---------------------------------------------------------

    /// Compares `x` and `y`, optionally ignoring sign (i.e. comparing
    /// magnitudes only).
    pub fn compare(x: &Decimal, y: &Decimal, ignore_sign: bool) -> Ordering {
        if !ignore_sign {
            match x.sign.cmp(&y.sign) {
                Ordering::Equal => {}
                ord => return ord,
            }
            if x.sign == 0 {
                return Ordering::Equal;
            }
            let mag_ord = Self::compare_magnitude(x, y);
            return if x.sign < 0 { mag_ord.reverse() } else { mag_ord };
        }
        match (x.sign == 0, y.sign == 0) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Self::compare_magnitude(x, y),
        }
    }

    fn compare_magnitude(x: &Decimal, y: &Decimal) -> Ordering {
        if let (Repr::Shifted(a), Repr::Shifted(b)) = (&x.repr, &y.repr) {
            return shifted::cmp_abs(*a, x.dec_prec, *b, y.dec_prec);
        }
        let mut xa = x.magnitude_digit_array();
        let mut ya = y.magnitude_digit_array();
        match x.dec_prec.cmp(&y.dec_prec) {
            Ordering::Equal => {}
            Ordering::Less => xa = xa.shift_decimal_left(y.dec_prec - x.dec_prec),
            Ordering::Greater => ya = ya.shift_decimal_left(x.dec_prec - y.dec_prec),
        }
        xa.cmp(&ya)
    }

    // -- arithmetic -----------------------------------------------------

    pub fn checked_add(&self, other: &Decimal) -> Result<Decimal, Error> {
        let dec_prec = self.dec_prec.max(other.dec_prec);
        if dec_prec > MAX_DEC_PREC {
            return Err(Error::PrecLimitExceeded);
        }
        // Zero still needs its operand's magnitude scaled up to the common
        // precision (e.g. 0.000 + 1.5 has dec_prec 3, not 1), so this
        // doesn't shortcut past the alignment below.
        let mut xa = self.magnitude_digit_array();
        let mut ya = other.magnitude_digit_array();
        if self.dec_prec < dec_prec {
            xa = xa.shift_decimal_left(dec_prec - self.dec_prec);
        }
        if other.dec_prec < dec_prec {
            ya = ya.shift_decimal_left(dec_prec - other.dec_prec);
        }

        let (sign, mag) = if self.sign == other.sign {
            (self.sign, xa.add(&ya))
        } else {
            match xa.cmp(&ya) {
                Ordering::Equal => (0, DigitArray::zero()),
                Ordering::Greater => (self.sign, xa.sub(&ya)),
                Ordering::Less => (other.sign, ya.sub(&xa)),
            }
        };
        Ok(Decimal { sign, dec_prec, repr: Self::narrow(mag, dec_prec) })
    }

    pub fn checked_sub(&self, other: &Decimal) -> Result<Decimal, Error> {
        self.checked_add(&other.clone().negate())
    }

    pub fn checked_mul(&self, other: &Decimal) -> Result<Decimal, Error> {
        let dec_prec = self.dec_prec as u64 + other.dec_prec as u64;
        if dec_prec > MAX_DEC_PREC as u64 {
            return Err(Error::PrecLimitExceeded);
        }
        let dec_prec = dec_prec as u32;
        // A zero operand still scales the result's precision the same way a
        // nonzero product would (e.g. 0.00 * 1.5 has dec_prec 3), so this
        // doesn't shortcut past that below.
        if self.sign == 0 || other.sign == 0 {
            return Ok(Decimal { sign: 0, dec_prec, repr: Repr::Shifted(Uint96::ZERO) });
        }
        let xa = self.magnitude_digit_array();
        let ya = other.magnitude_digit_array();
        let mag = xa.mul(&ya);
        let sign = self.sign * other.sign;
        Ok(Decimal { sign, dec_prec, repr: Self::narrow(mag, dec_prec) })
    }

    /// Rounds `coeff` (an exact non-negative integer) down by dropping its
    /// lowest `drop` decimal digits under `mode`. `has_residue` is `true`
    /// when `coeff` is only the truncated quotient of a division that left
    /// a nonzero remainder — in that case an exact tie at the digit being
    /// dropped is actually a hair past half (the true value sits strictly
    /// above `coeff`), so it resolves as `Greater` rather than a tie.
    fn round_away_digits(coeff: &DigitArray, drop: u32, has_residue: bool, sign: i8, mode: RoundingMode) -> DigitArray {
        if drop == 0 {
            return coeff.clone();
        }
        let kept = coeff.shift_decimal_right(drop);
        let scale_back = kept.shift_decimal_left(drop);
        let dropped = coeff.sub(&scale_back);
        if dropped.is_zero() && !has_residue {
            return kept;
        }
        let twice = dropped.mul_small(2);
        let divisor = DigitArray::from_u64(1).shift_decimal_left(drop);
        let mut rem_cmp_half = twice.cmp(&divisor);
        if rem_cmp_half == Ordering::Equal && has_residue {
            rem_cmp_half = Ordering::Greater;
        }
        let (_, q_mod5) = kept.divmod_small(5);
        let quot_is_odd = kept.digits()[0] % 2 != 0;
        let bump = rounding::decide(sign, quot_is_odd, q_mod5 == 0, false, rem_cmp_half, mode);
        if bump {
            kept.add(&DigitArray::from_u64(1))
        } else {
            kept
        }
    }

    /// Divides `self` by `other`.
    ///
    /// With `precision_limit` given, the quotient is rounded to exactly
    /// that many fractional digits under `mode`. Without one, the division
    /// must terminate exactly (within [`MAX_DEC_PREC`] digits) or this
    /// returns [`Error::PrecLimitExceeded`].
    pub fn checked_div(&self, other: &Decimal, precision_limit: Option<u32>, mode: RoundingMode) -> Result<Decimal, Error> {
        if other.sign == 0 {
            return Err(Error::DivideByZero);
        }
        if self.sign == 0 {
            // A zero dividend always terminates immediately, so it follows
            // the same `dec_prec` rule as any other terminating quotient:
            // the requested `precision_limit` when given, else the natural
            // `max(dec_prec_x - dec_prec_y, 0)` scale.
            let dec_prec = match precision_limit {
                Some(p) => p,
                None => (self.dec_prec as i64 - other.dec_prec as i64).max(0) as u32,
            };
            return Ok(Decimal { sign: 0, dec_prec, repr: Repr::Shifted(Uint96::ZERO) });
        }
        let sign = self.sign * other.sign;
        let xa = self.magnitude_digit_array();
        let ya = other.magnitude_digit_array();

        let (mut coeff, mut rem) = xa.divmod(&ya);
        let mut frac_digits_kept: u32 = 0;
        let mut terminated = rem.is_zero();

        let target_frac_digits = precision_limit.map(|p| p as i64 + other.dec_prec as i64 - self.dec_prec as i64);

        // A `precision_limit` narrower than the operands' natural scale
        // difference (`self.dec_prec - other.dec_prec`) asks for fewer
        // fractional digits than the unrounded integer quotient already
        // carries. The extraction loop below only ever adds digits, so
        // this case is handled separately by rounding the quotient down.
        if let Some(tfd) = target_frac_digits {
            if tfd < 0 {
                let drop = (-tfd) as u32;
                let rounded = Self::round_away_digits(&coeff, drop, !terminated, sign, mode);
                let dec_prec = precision_limit.unwrap();
                if rounded.is_zero() {
                    return Ok(Decimal::zero());
                }
                return Ok(Decimal { sign, dec_prec, repr: Self::narrow(rounded, dec_prec) });
            }
        }

        let soft_limit = target_frac_digits.unwrap_or(MAX_DEC_PREC as i64).clamp(0, MAX_DEC_PREC as i64) as u32;

        if !terminated {
            tracing::trace!(soft_limit, "quotient does not terminate, falling back to digit-by-digit long division");
        }
        while !terminated && frac_digits_kept < soft_limit {
            rem = rem.mul_small(10);
            let (d, r) = rem.divmod(&ya);
            let digit = *d.digits().first().unwrap_or(&0);
            coeff = coeff.mul_small(10);
            coeff.iadd_small(digit);
            frac_digits_kept += 1;
            rem = r;
            terminated = rem.is_zero();
        }

        if precision_limit.is_none() && !terminated {
            return Err(Error::PrecLimitExceeded);
        }

        if precision_limit.is_some() && !terminated {
            rem = rem.mul_small(10);
            let (d, r) = rem.divmod(&ya);
            let next_digit = *d.digits().first().unwrap_or(&0);
            let rem_cmp_half = match next_digit.cmp(&5) {
                Ordering::Less => Ordering::Less,
                Ordering::Greater => Ordering::Greater,
                Ordering::Equal => {
                    if r.is_zero() {
                        Ordering::Equal
                    } else {
                        Ordering::Greater
                    }
                }
            };
            let quot_is_odd = coeff.digits()[0] % 2 != 0;
            let (_, q_mod5) = coeff.divmod_small(5);
            let bump = rounding::decide(sign, quot_is_odd, q_mod5 == 0, next_digit == 0 && r.is_zero(), rem_cmp_half, mode);
            if bump {
                coeff = coeff.add(&DigitArray::from_u64(1));
            }
        }

        let mut dec_prec_signed = frac_digits_kept as i64 + self.dec_prec as i64 - other.dec_prec as i64;
        if dec_prec_signed < 0 {
            coeff = coeff.shift_decimal_left((-dec_prec_signed) as u32);
            dec_prec_signed = 0;
        }
        if dec_prec_signed > MAX_DEC_PREC as i64 {
            return Err(Error::PrecLimitExceeded);
        }
        if coeff.is_zero() {
            return Ok(Decimal::zero());
        }
        let dec_prec = dec_prec_signed as u32;
        Ok(Decimal { sign, dec_prec, repr: Self::narrow(coeff, dec_prec) })
    }

    /// `(quotient, remainder)` under the floor-division convention: the
    /// remainder's sign follows the divisor's, and `self == quotient *
    /// other + remainder`.
    pub fn checked_divmod(&self, other: &Decimal) -> Result<(Decimal, Decimal), Error> {
        if other.sign == 0 {
            return Err(Error::DivideByZero);
        }
        let prec = self.dec_prec.max(other.dec_prec);
        if self.sign == 0 {
            let quotient = Decimal { sign: 0, dec_prec: 0, repr: Repr::Shifted(Uint96::ZERO) };
            let remainder = Decimal { sign: 0, dec_prec: prec, repr: Repr::Shifted(Uint96::ZERO) };
            return Ok((quotient, remainder));
        }
        let mut xa = self.magnitude_digit_array();
        let mut ya = other.magnitude_digit_array();
        if self.dec_prec < prec {
            xa = xa.shift_decimal_left(prec - self.dec_prec);
        }
        if other.dec_prec < prec {
            ya = ya.shift_decimal_left(prec - other.dec_prec);
        }

        let (mut q_mag, mut r_mag) = xa.divmod(&ya);
        let same_sign = self.sign == other.sign;
        let mut q_sign: i8 = if same_sign { 1 } else { -1 };
        let mut r_sign = other.sign;

        if !same_sign && !r_mag.is_zero() {
            q_mag = q_mag.add(&DigitArray::from_u64(1));
            r_mag = ya.sub(&r_mag);
        }
        if r_mag.is_zero() {
            r_sign = 0;
        }
        if q_mag.is_zero() {
            q_sign = 0;
        }

        let quotient = Decimal { sign: q_sign, dec_prec: 0, repr: Self::narrow(q_mag, 0) };
        let remainder = Decimal { sign: r_sign, dec_prec: prec, repr: Self::narrow(r_mag, prec) };
        Ok((quotient, remainder))
    }

    pub fn negate(mut self) -> Self {
        self.sign = -self.sign;
        self
    }

    /// Rounds to exactly `precision` fractional digits.
    pub fn adjusted(&self, precision: u32, mode: RoundingMode) -> Result<Decimal, Error> {
        if precision > MAX_DEC_PREC {
            return Err(Error::PrecLimitExceeded);
        }
        if self.sign == 0 {
            return Ok(Decimal { sign: 0, dec_prec: precision, repr: Repr::Shifted(Uint96::ZERO) });
        }
        let mag = self.magnitude_digit_array();
        let new_mag = if precision >= self.dec_prec {
            mag.shift_decimal_left(precision - self.dec_prec)
        } else {
            mag.round_at_decimal_digit(self.dec_prec - precision, self.sign, mode)
        };
        if new_mag.is_zero() {
            return Ok(Decimal::zero());
        }
        Ok(Decimal { sign: self.sign, dec_prec: precision, repr: Self::narrow(new_mag, precision) })
    }

    /// Rounds to the nearest multiple of `quantum`, which inherits
    /// `quantum`'s precision (not necessarily a power of ten, e.g.
    /// quantizing to the nearest `0.05`).
    pub fn quantize(&self, quantum: &Decimal, mode: RoundingMode) -> Result<Decimal, Error> {
        if quantum.sign == 0 {
            return Err(Error::DivideByZero);
        }
        if self.sign == 0 {
            return Ok(Decimal { sign: 0, dec_prec: quantum.dec_prec, repr: Repr::Shifted(Uint96::ZERO) });
        }

        let prec = self.dec_prec.max(quantum.dec_prec);
        let mut xa = self.magnitude_digit_array();
        let mut qa = quantum.magnitude_digit_array();
        if self.dec_prec < prec {
            xa = xa.shift_decimal_left(prec - self.dec_prec);
        }
        if quantum.dec_prec < prec {
            qa = qa.shift_decimal_left(prec - quantum.dec_prec);
        }

        let (mut n, r) = xa.divmod(&qa);
        if !r.is_zero() {
            let twice = r.mul_small(2);
            let rem_cmp_half = twice.cmp(&qa);
            let quot_is_odd = n.digits()[0] % 2 != 0;
            let (_, q_mod5) = n.divmod_small(5);
            if rounding::decide(self.sign, quot_is_odd, q_mod5 == 0, false, rem_cmp_half, mode) {
                n = n.add(&DigitArray::from_u64(1));
            }
        }

        let mag = n.mul(&quantum.magnitude_digit_array());
        if mag.is_zero() {
            return Ok(Decimal::zero());
        }
        Ok(Decimal { sign: self.sign, dec_prec: quantum.dec_prec, repr: Self::narrow(mag, quantum.dec_prec) })
    }

    /// Digit-array iterator over the underlying base-10^19 words, least
    /// significant first. Consumers that need the raw coefficient (e.g. for
    /// hashing or an external wire format) use this instead of reaching
    /// into the representation directly.
    pub fn iter_digits(&self) -> DigitIter<'_> {
        match &self.repr {
            Repr::Shifted(u) => {
                let v = u.to_digit_words();
                let mut words = [0u64; 2];
                for (i, &w) in v.iter().enumerate() {
                    words[i] = w;
                }
                DigitIter::Shifted { words, len: v.len(), idx: 0 }
            }
            Repr::Dynamic { coeff, .. } => DigitIter::Dynamic { words: coeff.digits(), idx: 0 },
        }
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_literal(literal::parse(s)?)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        Decimal::compare(self, other, false) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Decimal::compare(self, other, false))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        Decimal::compare(self, other, false)
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;
    fn add(self, rhs: Decimal) -> Decimal {
        self.checked_add(&rhs).unwrap_or_else(|e| panic!("decimal addition overflowed its limits: {e}"))
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;
    fn sub(self, rhs: Decimal) -> Decimal {
        self.checked_sub(&rhs).unwrap_or_else(|e| panic!("decimal subtraction overflowed its limits: {e}"))
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;
    fn mul(self, rhs: Decimal) -> Decimal {
        self.checked_mul(&rhs).unwrap_or_else(|e| panic!("decimal multiplication overflowed its limits: {e}"))
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        self.negate()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == 0 {
            if self.dec_prec == 0 {
                return write!(f, "0");
            }
            return write!(f, "0.{}", "0".repeat(self.dec_prec as usize));
        }
        let mag = self.magnitude_digit_array();
        let digit_str = digit_array_to_decimal_string(&mag);
        let sign_str = if self.sign < 0 { "-" } else { "" };
        if self.dec_prec == 0 {
            return write!(f, "{sign_str}{digit_str}");
        }
        let prec = self.dec_prec as usize;
        if digit_str.len() <= prec {
            let pad = "0".repeat(prec - digit_str.len());
            write!(f, "{sign_str}0.{pad}{digit_str}")
        } else {
            let split = digit_str.len() - prec;
            write!(f, "{sign_str}{}.{}", &digit_str[..split], &digit_str[split..])
        }
    }
}

fn digit_array_to_decimal_string(a: &DigitArray) -> String {
    let words = a.digits();
    let mut s = String::new();
    for (i, &w) in words.iter().enumerate().rev() {
        if i == words.len() - 1 {
            s.push_str(&w.to_string());
        } else {
            s.push_str(&format!("{w:019}"));
        }
    }
    s
}

/// Iterator over a [`Decimal`]'s unsigned magnitude as little-endian
/// base-10^19 words.
pub enum DigitIter<'a> {
    Shifted { words: [u64; 2], len: usize, idx: usize },
    Dynamic { words: &'a [u64], idx: usize },
}

impl<'a> Iterator for DigitIter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match self {
            DigitIter::Shifted { words, len, idx } => {
                if *idx < *len {
                    let v = words[*idx];
                    *idx += 1;
                    Some(v)
                } else {
                    None
                }
            }
            DigitIter::Dynamic { words, idx } => {
                if *idx < words.len() {
                    let v = words[*idx];
                    *idx += 1;
                    Some(v)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_roundtrip() {
        for s in ["0", "123", "-12.345", "0.5", "0.00", "5.30951e42", "-12345678901234567890.12345"] {
            assert_eq!(d(s).to_string(), normalize_display(s));
        }
    }

    fn normalize_display(s: &str) -> String {
        // the canonical forms used by the literals above already match this
        // crate's Display output byte-for-byte except for a bare leading "+"
        // or scientific notation, neither of which appears here except the
        // one exponent case, handled specially.
        if s == "5.30951e42" {
            return format!("{}{}", "530951", "0".repeat(37));
        }
        s.to_string()
    }

    #[test]
    fn add_cross_variant() {
        let a = d("5.30951e42");
        let b = d("-12345678901234567890.12345");
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.to_string(), "5309509999999999999999987654321098765432109.87655");
    }

    #[test]
    fn sub_changes_variant_back_down() {
        let a = d("100.00001");
        let b = d("99.99999");
        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff, d("0.00002"));
    }

    #[test]
    fn mul_respects_precision_limit() {
        let a = "1".repeat(40).parse::<Decimal>().unwrap();
        let a = a.adjusted(40_000, RoundingMode::HalfEven).unwrap();
        let b = a.clone();
        assert_eq!(a.checked_mul(&b), Err(Error::PrecLimitExceeded));
    }

    #[test]
    fn divide_with_precision_limit_and_half_even() {
        let a = d("10");
        let b = d("3");
        let q = a.checked_div(&b, Some(4), RoundingMode::HalfEven).unwrap();
        assert_eq!(q, d("3.3333"));
    }

    #[test]
    fn divide_without_limit_requires_termination() {
        let a = d("1");
        let b = d("3");
        assert_eq!(a.checked_div(&b, None, RoundingMode::HalfEven), Err(Error::PrecLimitExceeded));
        let a = d("1");
        let b = d("4");
        assert_eq!(a.checked_div(&b, None, RoundingMode::HalfEven).unwrap(), d("0.25"));
    }

    #[test]
    fn divide_with_precision_limit_narrower_than_scale_difference() {
        let a = d("3000.00000");
        let b = d("7");
        let q = a.checked_div(&b, Some(0), RoundingMode::HalfEven).unwrap();
        assert_eq!(q, d("429"));
        assert_eq!(q.dec_prec(), 0);
    }

    #[test]
    fn divide_zero_dividend_preserves_scale() {
        let zero = d("0.00");
        let divisor = d("4");
        let q = zero.checked_div(&divisor, None, RoundingMode::HalfEven).unwrap();
        assert_eq!(q.dec_prec(), 2);
        assert!(q.is_zero());

        let q = zero.checked_div(&divisor, Some(5), RoundingMode::HalfEven).unwrap();
        assert_eq!(q.dec_prec(), 5);
        assert!(q.is_zero());
    }

    #[test]
    fn parses_literal_with_i64_min_exponent_without_panicking() {
        // One fractional digit plus an exponent of -9223372036854775807
        // gives `lit.exp == i64::MIN` exactly; this must surface as a clean
        // error rather than panicking on negation.
        assert_eq!("1.5e-9223372036854775807".parse::<Decimal>(), Err(Error::PrecLimitExceeded));
    }

    #[test]
    fn divmod_negative_divisor_follows_floor_convention() {
        let a = d("7");
        let b = d("-2");
        let (q, r) = a.checked_divmod(&b).unwrap();
        assert_eq!(q, d("-4"));
        assert_eq!(r, d("-1"));
        // self == quotient * other + remainder
        assert_eq!(q.checked_mul(&b).unwrap().checked_add(&r).unwrap(), a);
    }

    #[test]
    fn quantize_half_up() {
        let a = d("1.2345");
        let quantum = d("0.01");
        let q = a.quantize(&quantum, RoundingMode::HalfUp).unwrap();
        assert_eq!(q, d("1.23"));
    }

    #[test]
    fn quantize_arbitrary_quantum() {
        let a = d("1.07");
        let quantum = d("0.05");
        let q = a.quantize(&quantum, RoundingMode::HalfUp).unwrap();
        assert_eq!(q, d("1.05"));
    }

    #[test]
    fn ordering_is_value_based_across_variants() {
        let small = d("1.50");
        let dynamic_equiv = "1".repeat(40).parse::<Decimal>().unwrap().adjusted(0, RoundingMode::Down).unwrap();
        assert!(dynamic_equiv > small);
        assert_eq!(d("1.5"), d("1.50"));
    }

    #[test]
    fn magnitude_of_zero_errors() {
        assert_eq!(Decimal::zero().magnitude(), Err(Error::MagnitudeOfZero));
        assert_eq!(d("999").magnitude(), Ok(2));
        assert_eq!(d("0.5").magnitude(), Ok(-1));
    }

    #[test]
    fn zero_operands_still_scale_precision() {
        let zero = d("0.000");
        let price = d("1.5");
        assert_eq!(zero.checked_add(&price).unwrap().dec_prec(), 3);
        assert_eq!(zero.checked_mul(&price).unwrap().dec_prec(), 4);
        let (_, r) = d("0").checked_divmod(&d("1.25")).unwrap();
        assert_eq!(r.dec_prec(), 2);
    }

    #[test]
    fn neg_flips_sign_only() {
        let a = d("3.25");
        let b = -a.clone();
        assert_eq!(b.to_string(), "-3.25");
        assert_eq!(-b, a);
    }
}
