//! Arbitrary-precision fixed-point decimal arithmetic with configurable
//! rounding.
//!
//! A [`Decimal`] is `sign * coefficient * 10^-dec_prec`: an exact decimal
//! value, never a binary approximation. Internally it picks between two
//! coefficient representations — a compact 96-bit integer for everyday
//! values, and an arbitrary-precision digit array for anything wider —
//! transparently, so the distinction never leaks into the public API.
//!
//! ```
//! use fixdec::{Decimal, RoundingMode};
//!
//! let price: Decimal = "19.99".parse().unwrap();
//! let qty: Decimal = "3".parse().unwrap();
//! let total = price.checked_mul(&qty).unwrap();
//! assert_eq!(total.to_string(), "59.97");
//! ```

mod decimal;
mod digits;
mod error;
mod literal;
mod rounding;
mod shifted;
mod u128;

pub use decimal::{Decimal, DigitIter, MAX_DEC_PREC, MAX_EXP, MIN_EXP};
pub use error::Error;
pub use rounding::{default_mode, round_to_multiple, set_default_mode, RoundingMode};
