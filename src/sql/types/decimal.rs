//! Arbitrary-precision decimal numbers

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A decimal number of arbitrary size and precision.
///
/// Always kept in normalized form: no leading zero digits in the integer part and no
/// trailing zero digits in the fractional part. Zero is the empty, non-negative digit
/// sequence. This makes structural equality coincide with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Decimal {
    negative: bool,
    /// Most significant digit first
    digits: Vec<u8>,
    /// Number of digits to the left of the dot
    n: usize,
}

impl Decimal {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    fn normalize(negative: bool, mut digits: Vec<u8>, mut n: usize) -> Self {
        let leading = digits.iter().take(n).take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        n -= leading;
        while digits.len() > n && digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            return Self::zero();
        }
        Self {
            negative,
            digits,
            n,
        }
    }

    /// Compares magnitudes, ignoring the sign
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.n
            .cmp(&other.n)
            .then_with(|| {
                self.digits
                    .iter()
                    .zip(other.digits.iter())
                    .map(|(a, b)| a.cmp(b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.digits.len().cmp(&other.digits.len()))
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidDecimal(input.to_string());
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let mut digits = Vec::with_capacity(rest.len());
        let mut dot = None;
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c as u8 - b'0'),
                '.' if dot.is_none() => dot = Some(digits.len()),
                _ => return Err(invalid()),
            }
        }
        if digits.is_empty() {
            return Err(invalid());
        }

        let n = dot.unwrap_or(digits.len());
        Ok(Self::normalize(negative, digits, n))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        if self.n == 0 {
            f.write_str("0")?;
        }
        for d in &self.digits[..self.n] {
            write!(f, "{}", d)?;
        }
        if self.digits.len() > self.n {
            f.write_str(".")?;
            for d in &self.digits[self.n..] {
                write!(f, "{}", d)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::Decimal;
    use crate::error::Result;

    fn dec(negative: bool, digits: &[u8], n: usize) -> Decimal {
        Decimal {
            negative,
            digits: digits.to_vec(),
            n,
        }
    }

    #[test]
    fn test_parse_valid() -> Result<()> {
        let cases = vec![
            ("0", Decimal::zero()),
            ("000", Decimal::zero()),
            ("-0", Decimal::zero()),
            ("123", dec(false, &[1, 2, 3], 3)),
            ("000123", dec(false, &[1, 2, 3], 3)),
            ("123.456", dec(false, &[1, 2, 3, 4, 5, 6], 3)),
            ("123.456000", dec(false, &[1, 2, 3, 4, 5, 6], 3)),
            ("-123", dec(true, &[1, 2, 3], 3)),
            ("-123.456", dec(true, &[1, 2, 3, 4, 5, 6], 3)),
            ("123.", dec(false, &[1, 2, 3], 3)),
            (".456", dec(false, &[4, 5, 6], 0)),
            ("123.000456", dec(false, &[1, 2, 3, 0, 0, 0, 4, 5, 6], 3)),
            (".000456", dec(false, &[0, 0, 0, 4, 5, 6], 0)),
            ("100", dec(false, &[1, 0, 0], 3)),
            ("0.5", dec(false, &[5], 0)),
        ];
        for (input, want) in cases {
            assert_eq!(input.parse::<Decimal>()?, want, "parsing {:?}", input);
        }
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "-", ".", "-.", "abc", "12.34.56", "1e5", " 1", "--1"] {
            assert!(input.parse::<Decimal>().is_err(), "{:?} should not parse", input);
        }
    }

    #[test]
    fn test_equal_representations() -> Result<()> {
        let a: Decimal = "123.".parse()?;
        let b: Decimal = "123".parse()?;
        let c: Decimal = "000123".parse()?;
        assert_eq!(a, b);
        assert_eq!(b, c);
        Ok(())
    }

    #[test]
    fn test_compare() -> Result<()> {
        let cases = vec![
            ("0", "0", Ordering::Equal),
            ("123", "123", Ordering::Equal),
            ("-123", "-123", Ordering::Equal),
            ("0.00123", "0.00123", Ordering::Equal),
            ("123.45", "123.45", Ordering::Equal),
            ("123", "124", Ordering::Less),
            ("-123", "123", Ordering::Less),
            ("-124", "-123", Ordering::Less),
            ("123.45", "123.46", Ordering::Less),
            ("0.123", "0.124", Ordering::Less),
            ("0.123", "0.1234", Ordering::Less),
            ("0.05", "0.5", Ordering::Less),
            ("0", "0.5", Ordering::Less),
            ("-0.5", "0", Ordering::Less),
            ("99", "100", Ordering::Less),
            ("-100", "-99", Ordering::Less),
            ("124", "123", Ordering::Greater),
            ("123", "-123", Ordering::Greater),
            ("-123", "-124", Ordering::Greater),
            ("123.46", "123.45", Ordering::Greater),
            ("0.1234", "0.123", Ordering::Greater),
            ("-0.123", "-0.1234", Ordering::Greater),
        ];
        for (a, b, want) in cases {
            let got = a.parse::<Decimal>()?.cmp(&b.parse::<Decimal>()?);
            assert_eq!(got, want, "comparing {} and {}", a, b);
        }
        Ok(())
    }

    #[test]
    fn test_display() -> Result<()> {
        for input in [
            "0", "123", "123.45", "0.123", "0.000123", "100", "-123", "-123.45", "-0.123",
            "-0.000123",
        ] {
            assert_eq!(input.parse::<Decimal>()?.to_string(), input);
        }
        assert_eq!(".5".parse::<Decimal>()?.to_string(), "0.5");
        assert_eq!("0012.3400".parse::<Decimal>()?.to_string(), "12.34");
        Ok(())
    }
}
