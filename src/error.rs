//! Typed error surface for the decimal engine.
//!
//! Every fallible operation in this crate returns a [`Result<T, Error>`]
//! rather than a raw error code. The variants mirror the C error codes this
//! crate's semantics are grounded on (`FPDEC_PREC_LIMIT_EXCEEDED` and
//! friends) one for one, so a caller porting a numeric comparison from the
//! original contract can match variants directly.

use thiserror::Error;

/// Failure modes surfaced at the decimal arithmetic API boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The result's fractional digit count would exceed [`crate::MAX_DEC_PREC`].
    #[error("decimal precision limit exceeded")]
    PrecLimitExceeded,
    /// The result's base-10^19 exponent would exceed the representable range.
    #[error("exponent limit exceeded")]
    ExpLimitExceeded,
    /// A literal assembles to more digits than the envelope can hold.
    #[error("number of significant digits exceeds the limit")]
    NDigitsLimitExceeded,
    /// The input string does not match the decimal literal grammar.
    #[error("invalid decimal literal")]
    InvalidDecimalLiteral,
    /// Division or modulo with a zero divisor.
    #[error("division by zero")]
    DivideByZero,
    /// [`crate::Decimal::magnitude`] is undefined for a zero value.
    #[error("magnitude is undefined for zero")]
    MagnitudeOfZero,
}
