//! The internal decimal literal grammar:
//!
//! ```text
//! [+|-]<int>[.<frac>][<e|E>[+|-]<exp>]
//! [+|-].<frac>[<e|E>[+|-]<exp>]
//! ```
//!
//! with optional leading/trailing whitespace. This is deliberately the only
//! textual entry point this crate has — no locale, no digit grouping, no
//! general numeric-literal superset.

use crate::error::Error;

/// The decomposed pieces of a parsed literal: `value = (-1)^negative *
/// coeff * 10^exp`, where `coeff` is the concatenation of the integer and
/// fractional significant digits (each `0..=9`), most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalLiteral {
    pub negative: bool,
    pub coeff: Vec<u8>,
    pub exp: i64,
}

/// Parses a decimal literal, returning [`Error::InvalidDecimalLiteral`] for
/// anything that doesn't match the grammar above.
pub fn parse(s: &str) -> Result<DecimalLiteral, Error> {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    let len = bytes.len();

    skip_spaces(bytes, &mut i);
    if i == len {
        return Err(Error::InvalidDecimalLiteral);
    }

    let mut negative = false;
    match bytes[i] {
        b'-' => {
            negative = true;
            i += 1;
        }
        b'+' => {
            i += 1;
        }
        _ => {}
    }

    let int_start = i;
    while i < len && bytes[i] == b'0' {
        i += 1;
    }
    let signif_int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let signif_int_end = i;

    let mut frac_start = 0usize;
    let mut frac_end = 0usize;
    let mut has_frac = false;
    if i < len && bytes[i] == b'.' {
        i += 1;
        has_frac = true;
        frac_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_end = i;
    }

    let len_int_part = signif_int_end - signif_int_start;
    let len_frac_part = if has_frac { frac_end - frac_start } else { 0 };

    let (signif_int_start, len_int_part) = if len_int_part == 0 && len_frac_part == 0 {
        if int_start < len && bytes[int_start] == b'0' {
            (int_start, 1)
        } else {
            return Err(Error::InvalidDecimalLiteral);
        }
    } else {
        (signif_int_start, len_int_part)
    };

    let mut exp: i64 = 0;
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let mut exp_sign: i64 = 1;
        match bytes.get(i) {
            Some(b'-') => {
                exp_sign = -1;
                i += 1;
            }
            Some(b'+') => {
                i += 1;
            }
            Some(c) if c.is_ascii_digit() => {}
            _ => return Err(Error::InvalidDecimalLiteral),
        }
        let exp_digits_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_digits_start {
            return Err(Error::InvalidDecimalLiteral);
        }
        let mut magnitude: i64 = 0;
        for &b in &bytes[exp_digits_start..i] {
            magnitude = magnitude.saturating_mul(10).saturating_add((b - b'0') as i64);
        }
        exp = exp_sign * magnitude;
    }

    skip_spaces(bytes, &mut i);
    if i != len {
        return Err(Error::InvalidDecimalLiteral);
    }

    let mut coeff = Vec::with_capacity(len_int_part + len_frac_part);
    coeff.extend(bytes[signif_int_start..signif_int_start + len_int_part].iter().map(|&b| b - b'0'));
    if has_frac {
        coeff.extend(bytes[frac_start..frac_end].iter().map(|&b| b - b'0'));
    }

    Ok(DecimalLiteral {
        negative,
        coeff,
        exp: exp - len_frac_part as i64,
    })
}

fn skip_spaces(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        let lit = parse("123").unwrap();
        assert!(!lit.negative);
        assert_eq!(lit.coeff, vec![1, 2, 3]);
        assert_eq!(lit.exp, 0);
    }

    #[test]
    fn parses_negative_with_fraction() {
        let lit = parse("-12.345").unwrap();
        assert!(lit.negative);
        assert_eq!(lit.coeff, vec![1, 2, 3, 4, 5]);
        assert_eq!(lit.exp, -3);
    }

    #[test]
    fn parses_leading_dot_fraction() {
        let lit = parse(".5").unwrap();
        assert_eq!(lit.coeff, vec![5]);
        assert_eq!(lit.exp, -1);
    }

    #[test]
    fn parses_scientific_notation() {
        let lit = parse("5.30951e42").unwrap();
        assert_eq!(lit.coeff, vec![5, 3, 0, 9, 5, 1]);
        assert_eq!(lit.exp, 42 - 5);
    }

    #[test]
    fn strips_leading_int_zeros() {
        let lit = parse("007.5").unwrap();
        assert_eq!(lit.coeff, vec![7, 5]);
    }

    #[test]
    fn zero_literal_keeps_one_digit() {
        let lit = parse("0").unwrap();
        assert_eq!(lit.coeff, vec![0]);
        assert_eq!(lit.exp, 0);
    }

    #[test]
    fn zero_with_fraction_keeps_frac_digits() {
        let lit = parse("0.00").unwrap();
        assert_eq!(lit.coeff, vec![0, 0]);
        assert_eq!(lit.exp, -2);
    }

    #[test]
    fn allows_surrounding_whitespace() {
        let lit = parse("  42  ").unwrap();
        assert_eq!(lit.coeff, vec![4, 2]);
    }

    #[test]
    fn rejects_bare_sign() {
        assert_eq!(parse("+"), Err(Error::InvalidDecimalLiteral));
        assert_eq!(parse("-"), Err(Error::InvalidDecimalLiteral));
    }

    #[test]
    fn rejects_bare_dot() {
        assert_eq!(parse("."), Err(Error::InvalidDecimalLiteral));
    }

    #[test]
    fn rejects_empty_exponent() {
        assert_eq!(parse("1e"), Err(Error::InvalidDecimalLiteral));
        assert_eq!(parse("1e+"), Err(Error::InvalidDecimalLiteral));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(parse("12x"), Err(Error::InvalidDecimalLiteral));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(Error::InvalidDecimalLiteral));
        assert_eq!(parse("   "), Err(Error::InvalidDecimalLiteral));
    }

    /// Cross-checks the accepted grammar against an independent regex,
    /// rather than asserting against this parser's own logic a second time.
    #[test]
    fn grammar_matches_independent_regex() {
        let re = regex::Regex::new(
            r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$",
        )
        .unwrap();
        let accept = ["123", "-12.345", ".5", "5.30951e42", "007.5", "0", "0.00", "  42  ", "1.", "3E-2"];
        let reject = ["", "   ", "+", "-", ".", "1e", "1e+", "12x", "1..2", "--1", "1.2.3"];
        for s in accept {
            assert!(re.is_match(s), "expected regex to accept {s:?}");
            assert!(parse(s).is_ok(), "expected parser to accept {s:?}");
        }
        for s in reject {
            assert!(!re.is_match(s), "expected regex to reject {s:?}");
            assert!(parse(s).is_err(), "expected parser to reject {s:?}");
        }
    }
}
