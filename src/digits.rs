//! The dynamic, arbitrary-precision representation: a little-endian array
//! of base-10^19 "digits". Used whenever a value's coefficient or precision
//! outgrows the compact 96-bit shifted-int envelope (see [`crate::shifted`]).
//!
//! A `DigitArray` is always a non-negative integer; sign, decimal precision,
//! and the word-vs-decimal-place exponent bookkeeping live on
//! [`crate::decimal::Decimal`]. Shifting a `DigitArray` left or right by a
//! number of *decimal* digits is how the decimal layer applies or strips an
//! exponent.

use crate::rounding::RoundingMode;
use std::cmp::Ordering;

/// Decimal digits packed into each base-RADIX word.
pub const DEC_DIGITS_PER_DIGIT: u32 = 19;
/// `10^19`. Chosen, as in the original C library, to be the largest power
/// of ten that still fits a `u64` word.
pub const RADIX: u64 = 10_000_000_000_000_000_000;
pub const MAX_DIGIT: u64 = RADIX - 1;

/// An arbitrary-precision non-negative integer, little-endian base-RADIX
/// digits. Always normalized: no high zero digits, except the single digit
/// `[0]` representing zero itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitArray {
    digits: Vec<u64>,
}

impl DigitArray {
    pub fn zero() -> Self {
        Self { digits: vec![0] }
    }

    pub fn from_u64(v: u64) -> Self {
        if v < RADIX {
            Self { digits: vec![v] }
        } else {
            Self {
                digits: vec![v % RADIX, v / RADIX],
            }
        }
    }

    /// Builds a value from decimal digits (`0..=9`, most significant
    /// first). Accepts any number of digits; the caller is responsible for
    /// deciding when this should be preferred over [`crate::shifted`].
    pub fn from_dec_digits(digits: &[u8]) -> Self {
        let mut v = Self::zero();
        for &d in digits {
            debug_assert!(d < 10);
            v = v.mul_small(10);
            v.iadd_small(d as u64);
        }
        v
    }

    pub fn digits(&self) -> &[u64] {
        &self.digits
    }

    /// Builds a value directly from little-endian base-RADIX words, e.g. the
    /// output of [`crate::shifted::Uint96::to_digit_words`].
    pub fn from_digit_words(words: Vec<u64>) -> Self {
        Self::normalize(words)
    }

    /// Widens to a 128-bit integer if the value fits in at most two words
    /// (at most `RADIX^2 - 1 < 2^128`), the range [`crate::shifted::Uint96`]
    /// cares about. Used by the decimal layer to probe the compact
    /// representation after an operation produces a [`DigitArray`] result.
    pub fn try_to_u128(&self) -> Option<crate::u128::U128> {
        if self.digits.len() > 2 {
            return None;
        }
        let mut v = crate::u128::U128::from_u64(self.digits[0]);
        if self.digits.len() == 2 {
            let mut hi = crate::u128::U128::from_u64(self.digits[1]);
            hi.imul_u64(RADIX);
            if hi.is_overflow() {
                return None;
            }
            v.iadd_u128(&hi);
        }
        Some(v)
    }

    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    pub fn cmp(&self, other: &Self) -> Ordering {
        match self.digits.len().cmp(&other.digits.len()) {
            Ordering::Equal => {
                for i in (0..self.digits.len()).rev() {
                    match self.digits[i].cmp(&other.digits[i]) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                Ordering::Equal
            }
            ord => ord,
        }
    }

    fn normalize(mut digits: Vec<u64>) -> Self {
        while digits.len() > 1 && *digits.last().unwrap() == 0 {
            digits.pop();
        }
        Self { digits }
    }

    // -- addition / subtraction --------------------------------------------

    pub fn add(&self, other: &Self) -> Self {
        let len = self.digits.len().max(other.digits.len());
        let mut out = Vec::with_capacity(len + 1);
        let mut carry: u128 = 0;
        for i in 0..len {
            let a = *self.digits.get(i).unwrap_or(&0) as u128;
            let b = *other.digits.get(i).unwrap_or(&0) as u128;
            let mut s = a + b + carry;
            if s >= RADIX as u128 {
                s -= RADIX as u128;
                carry = 1;
            } else {
                carry = 0;
            }
            out.push(s as u64);
        }
        if carry != 0 {
            out.push(carry as u64);
        }
        Self::normalize(out)
    }

    /// `self - other`. Requires `self >= other`.
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert!(self.cmp(other) != Ordering::Less);
        let mut out = Vec::with_capacity(self.digits.len());
        let mut borrow: i128 = 0;
        for i in 0..self.digits.len() {
            let a = self.digits[i] as i128;
            let b = *other.digits.get(i).unwrap_or(&0) as i128;
            let mut d = a - b - borrow;
            if d < 0 {
                d += RADIX as i128;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(d as u64);
        }
        debug_assert_eq!(borrow, 0, "caller must ensure self >= other");
        Self::normalize(out)
    }

    // -- multiplication --------------------------------------------------

    /// Multiplies by a single word (`factor < RADIX`).
    pub fn mul_small(&self, factor: u64) -> Self {
        debug_assert!(factor < RADIX);
        if factor == 0 || self.is_zero() {
            return Self::zero();
        }
        let mut out = Vec::with_capacity(self.digits.len() + 1);
        let mut carry: u128 = 0;
        for &d in &self.digits {
            let p = d as u128 * factor as u128 + carry;
            out.push((p % RADIX as u128) as u64);
            carry = p / RADIX as u128;
        }
        while carry != 0 {
            out.push((carry % RADIX as u128) as u64);
            carry /= RADIX as u128;
        }
        Self::normalize(out)
    }

    /// Adds a single word (`< RADIX`) in place, propagating carry.
    pub fn iadd_small(&mut self, mut carry: u64) {
        let mut i = 0;
        while carry != 0 {
            if i == self.digits.len() {
                self.digits.push(0);
            }
            let s = self.digits[i] as u128 + carry as u128;
            if s >= RADIX as u128 {
                self.digits[i] = (s - RADIX as u128) as u64;
                carry = 1;
            } else {
                self.digits[i] = s as u64;
                carry = 0;
            }
            i += 1;
        }
    }

    /// Full multiply (Algorithm M, Knuth Vol. 2 4.3.1).
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let n = self.digits.len();
        let m = other.digits.len();
        let mut out = vec![0u64; n + m];
        for j in 0..m {
            if other.digits[j] == 0 {
                continue;
            }
            let mut carry: u128 = 0;
            for i in 0..n {
                let p = self.digits[i] as u128 * other.digits[j] as u128 + out[i + j] as u128 + carry;
                out[i + j] = (p % RADIX as u128) as u64;
                carry = p / RADIX as u128;
            }
            let mut k = j + n;
            while carry != 0 {
                let p = out[k] as u128 + carry;
                out[k] = (p % RADIX as u128) as u64;
                carry = p / RADIX as u128;
                k += 1;
            }
        }
        Self::normalize(out)
    }

    // -- division ----------------------------------------------------------

    pub fn divmod_small(&self, divisor: u64) -> (Self, u64) {
        assert_ne!(divisor, 0, "division by zero");
        let mut out = vec![0u64; self.digits.len()];
        let mut rem: u128 = 0;
        for i in (0..self.digits.len()).rev() {
            let cur = rem * RADIX as u128 + self.digits[i] as u128;
            out[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        (Self::normalize(out), rem as u64)
    }

    /// `(self / divisor, self % divisor)`.
    pub fn divmod(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by zero");
        match self.cmp(divisor) {
            Ordering::Less => (Self::zero(), self.clone()),
            Ordering::Equal => (Self::from_u64(1), Self::zero()),
            Ordering::Greater => {
                if divisor.digits.len() == 1 {
                    let (q, r) = self.divmod_small(divisor.digits[0]);
                    (q, Self::from_u64(r))
                } else {
                    Self::divmod_knuth(self, divisor)
                }
            }
        }
    }

    /// Knuth Algorithm D (TAOCP Vol. 2, 4.3.1), generalized from base 2^64
    /// to base RADIX and from a fixed word count to arbitrary-length digit
    /// arrays. Normalizes so the divisor's leading word is at least
    /// `RADIX/2`, estimates each quotient digit from the two leading words,
    /// corrects the estimate against the third, then multiplies-and-
    /// subtracts with an add-back on the rare overshoot.
    fn divmod_knuth(u_in: &Self, v_in: &Self) -> (Self, Self) {
        let n = v_in.digits.len();
        debug_assert!(n >= 2);

        let d = (RADIX / (v_in.digits[n - 1] + 1)).max(1);
        let u = u_in.mul_small(d);
        let v = v_in.mul_small(d);

        let mut u_digits = u.digits.clone();
        u_digits.push(0); // guarantee room for the algorithm's leading digit
        let m = u_digits.len() - n - 1;

        let vn1 = v.digits[n - 1];
        let vn2 = v.digits[n - 2];

        let mut q = vec![0u64; m + 1];

        for j in (0..=m).rev() {
            let top2 = u_digits[j + n] as u128 * RADIX as u128 + u_digits[j + n - 1] as u128;
            let mut qhat = top2 / vn1 as u128;
            let mut rhat = top2 % vn1 as u128;
            if qhat >= RADIX as u128 {
                qhat = RADIX as u128 - 1;
                rhat = top2 - qhat * vn1 as u128;
            }
            let u_jn2 = if j + n >= 2 { u_digits[j + n - 2] as u128 } else { 0 };
            while rhat < RADIX as u128 && qhat * vn2 as u128 > rhat * RADIX as u128 + u_jn2 {
                qhat -= 1;
                rhat += vn1 as u128;
            }

            let mut carry: u128 = 0;
            let mut borrow: i128 = 0;
            for i in 0..n {
                let p = qhat * v.digits[i] as u128 + carry;
                carry = p / RADIX as u128;
                let sub = u_digits[j + i] as i128 - (p % RADIX as u128) as i128 - borrow;
                if sub < 0 {
                    u_digits[j + i] = (sub + RADIX as i128) as u64;
                    borrow = 1;
                } else {
                    u_digits[j + i] = sub as u64;
                    borrow = 0;
                }
            }
            let sub = u_digits[j + n] as i128 - carry as i128 - borrow;
            let top_borrow = if sub < 0 {
                u_digits[j + n] = (sub + RADIX as i128) as u64;
                true
            } else {
                u_digits[j + n] = sub as u64;
                false
            };

            if top_borrow {
                qhat -= 1;
                let mut carry2: u128 = 0;
                for i in 0..n {
                    let s = u_digits[j + i] as u128 + v.digits[i] as u128 + carry2;
                    if s >= RADIX as u128 {
                        u_digits[j + i] = (s - RADIX as u128) as u64;
                        carry2 = 1;
                    } else {
                        u_digits[j + i] = s as u64;
                        carry2 = 0;
                    }
                }
                u_digits[j + n] = u_digits[j + n].wrapping_add(carry2 as u64) % RADIX;
            }

            q[j] = qhat as u64;
        }

        let quotient = Self::normalize(q);
        let remainder_scaled = Self::normalize(u_digits[0..n].to_vec());
        let (remainder, rem_rem) = remainder_scaled.divmod_small(d);
        debug_assert_eq!(rem_rem, 0, "normalization factor must divide the scaled remainder exactly");
        (quotient, remainder)
    }

    // -- decimal-digit shifting (exponent application) ----------------------

    /// Multiplies by `10^k` (shifting left by `k` decimal digits).
    pub fn shift_decimal_left(&self, k: u32) -> Self {
        if k == 0 || self.is_zero() {
            return self.clone();
        }
        let word_shift = (k / DEC_DIGITS_PER_DIGIT) as usize;
        let digit_shift = k % DEC_DIGITS_PER_DIGIT;
        let mut digits = vec![0u64; word_shift];
        digits.extend_from_slice(&self.digits);
        let mut v = Self::normalize(digits);
        if digit_shift > 0 {
            v = v.mul_small(10u64.pow(digit_shift));
        }
        v
    }

    /// Divides by `10^k` (shifting right by `k` decimal digits), truncating.
    pub fn shift_decimal_right(&self, k: u32) -> Self {
        if k == 0 {
            return self.clone();
        }
        let word_shift = (k / DEC_DIGITS_PER_DIGIT) as usize;
        let digit_shift = k % DEC_DIGITS_PER_DIGIT;
        let mut v = if word_shift >= self.digits.len() {
            Self::zero()
        } else {
            Self::normalize(self.digits[word_shift..].to_vec())
        };
        if digit_shift > 0 {
            let (q, _) = v.divmod_small(10u64.pow(digit_shift));
            v = q;
        }
        v
    }

    /// Number of trailing decimal zero digits (`0` if the value itself is
    /// zero, matching the convention that zero carries no implied scale).
    pub fn trailing_zero_decimal_digits(&self) -> u32 {
        if self.is_zero() {
            return 0;
        }
        let mut count = 0u32;
        let mut i = 0;
        while self.digits[i] == 0 {
            count += DEC_DIGITS_PER_DIGIT;
            i += 1;
        }
        let mut d = self.digits[i];
        while d % 10 == 0 {
            d /= 10;
            count += 1;
        }
        count
    }

    /// Rounds off the lowest `k` decimal digits under `mode`, given the sign
    /// of the value being rounded. Ties are resolved by comparing twice the
    /// dropped remainder against `10^k` directly (both as `DigitArray`s),
    /// rather than forcing the comparison through a 64-bit-only primitive.
    pub fn round_at_decimal_digit(&self, k: u32, sign: i8, mode: RoundingMode) -> Self {
        if k == 0 || self.is_zero() {
            return self.clone();
        }
        let kept = self.shift_decimal_right(k);
        let scale_back = kept.shift_decimal_left(k);
        let rem = self.sub(&scale_back);
        if rem.is_zero() {
            return kept;
        }
        let twice_rem = rem.mul_small(2);
        let divisor = Self::from_u64(1).shift_decimal_left(k);
        let rem_cmp_half = twice_rem.cmp(&divisor);

        let (_, q_mod5) = kept.divmod_small(5);
        let quot_is_odd = kept.digits[0] % 2 != 0;

        let bump = crate::rounding::decide(sign, quot_is_odd, q_mod5 == 0, false, rem_cmp_half, mode);
        if bump {
            kept.add(&Self::from_u64(1))
        } else {
            kept
        }
    }
}
