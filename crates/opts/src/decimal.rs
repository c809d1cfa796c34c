//! Exact base-10 numbers

use std::{fmt, num::IntErrorKind, str::FromStr};

use error_derive::Error;

/// A decimal number of arbitrary precision, stored as a sign, a list of digits
/// (the coefficient) and a power of ten.
///
/// Unlike `f64`, a [Decimal] represents the written number exactly, no matter how many
/// digits it has. The exponent that was written is preserved for display, but does not
/// matter for comparisons.
///
/// # Examples
///
/// Basic Usage:
/// ```
/// # use opts::Decimal;
/// let a: Decimal = "1.50".parse().unwrap();
/// let b: Decimal = "15e-1".parse().unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1.50");
/// ```
#[derive(Clone, Debug)]
pub struct Decimal {
    is_negative: bool,

    /// Most significant digit first, without leading zeros. Empty for zero.
    digits: Vec<u8>,

    exponent: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[msg = "empty number"]
    Empty,

    #[msg = "invalid digit"]
    InvalidDigit,

    #[msg = "exponent out of range"]
    Overflow,
}

impl Decimal {
    pub const ZERO: Self = Self {
        is_negative: false,
        digits: Vec::new(),
        exponent: 0,
    };

    /// Creates `mantissa * 10^(-scale)`
    #[must_use]
    pub fn new(mantissa: i128, scale: i64) -> Self {
        let digits = mantissa
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|b| b - b'0')
            .skip_while(|&d| d == 0)
            .collect();

        Self {
            is_negative: mantissa < 0,
            digits,
            exponent: scale.saturating_neg(),
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digits of the coefficient, as numbers between `0` and `9`
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// The power of ten the coefficient is multiplied by
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Removes trailing zeros from the coefficient.
    ///
    /// # Examples
    ///
    /// ```
    /// # use opts::Decimal;
    /// let d: Decimal = "2.500".parse().unwrap();
    /// assert_eq!(d.normalize().to_string(), "2.5");
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }

        let trailing_zeros = self.digits.iter().rev().take_while(|&&d| d == 0).count();
        Self {
            is_negative: self.is_negative,
            digits: self.digits[..self.digits.len() - trailing_zeros].to_vec(),
            exponent: self.exponent.saturating_add(trailing_zeros as i64),
        }
    }

    /// Lossy conversion to a float
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        let sign = if self.is_negative { "-" } else { "" };
        format!("{sign}{}e{}", self.coefficient(), self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    fn coefficient(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        self.digits.iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalize();
        let b = other.normalize();

        if a.is_zero() || b.is_zero() {
            return a.is_zero() && b.is_zero();
        }

        a.is_negative == b.is_negative && a.digits == b.digits && a.exponent == b.exponent
    }
}

impl Eq for Decimal {}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(i128::from(value), 0)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (is_negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(DecimalError::Empty),
        };

        let (number, exponent) = match unsigned.find(['e', 'E']) {
            Some(index) => {
                let exponent: i64 = unsigned[index + 1..].parse().map_err(
                    |error: std::num::ParseIntError| match error.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            DecimalError::Overflow
                        },
                        _ => DecimalError::InvalidDigit,
                    },
                )?;
                (&unsigned[..index], exponent)
            },
            None => (unsigned, 0),
        };

        let (integral, fractional) = number.split_once('.').unwrap_or((number, ""));
        if integral.is_empty() && fractional.is_empty() {
            return Err(DecimalError::Empty);
        }

        let mut digits = Vec::with_capacity(integral.len() + fractional.len());
        for c in integral.chars().chain(fractional.chars()) {
            let digit = c.to_digit(10).ok_or(DecimalError::InvalidDigit)?;
            if digit != 0 || !digits.is_empty() {
                digits.push(digit as u8);
            }
        }

        // Fold the fractional digits into the exponent
        let exponent = i64::try_from(fractional.len())
            .ok()
            .and_then(|scale| exponent.checked_sub(scale))
            .ok_or(DecimalError::Overflow)?;

        Ok(Self {
            is_negative,
            digits,
            exponent,
        })
    }
}

impl fmt::Display for Decimal {
    /// Numbers with a positive exponent or a lot of leading zeros are printed in
    /// scientific notation (`1.5E+3`), all others in plain notation (`0.0015`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficient = self.coefficient();
        let exponent = i128::from(self.exponent);
        let adjusted = exponent + coefficient.len() as i128 - 1;

        if self.is_negative {
            f.write_str("-")?;
        }

        if exponent <= 0 && adjusted >= -6 {
            let scale = exponent.unsigned_abs() as usize;
            if scale == 0 {
                return f.write_str(&coefficient);
            }

            if coefficient.len() > scale {
                let (integral, fractional) = coefficient.split_at(coefficient.len() - scale);
                write!(f, "{integral}.{fractional}")
            } else {
                write!(f, "0.{}{coefficient}", "0".repeat(scale - coefficient.len()))
            }
        } else {
            let (first, rest) = coefficient.split_at(1);
            f.write_str(first)?;
            if !rest.is_empty() {
                write!(f, ".{rest}")?;
            }
            write!(f, "E{adjusted:+}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer() {
        let d: Decimal = "42".parse().unwrap();
        assert_eq!(d.digits(), [4, 2]);
        assert_eq!(d.exponent(), 0);
        assert!(!d.is_negative());
    }

    #[test]
    fn parse_fraction() {
        let d: Decimal = "-3.1415".parse().unwrap();
        assert_eq!(d.digits(), [3, 1, 4, 1, 5]);
        assert_eq!(d.exponent(), -4);
        assert!(d.is_negative());
        assert_eq!(d.to_string(), "-3.1415");
    }

    #[test]
    fn parse_exponent() {
        assert_eq!("1.5e3".parse::<Decimal>().unwrap().to_string(), "1.5E+3");
        assert_eq!("25E-3".parse::<Decimal>().unwrap().to_string(), "0.025");
        assert_eq!("1e+2".parse::<Decimal>().unwrap(), Decimal::from(100));
    }

    #[test]
    fn leading_and_trailing_dot() {
        assert_eq!(".5".parse::<Decimal>().unwrap(), Decimal::new(5, 1));
        assert_eq!("5.".parse::<Decimal>().unwrap(), Decimal::from(5));
    }

    #[test]
    fn scale_does_not_affect_equality() {
        let a: Decimal = "1.10".parse().unwrap();
        let b: Decimal = "1.1".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Decimal::new(11, 0));
        assert_ne!(a, "-1.1".parse::<Decimal>().unwrap());
    }

    #[test]
    fn zero() {
        let zero: Decimal = "-0.000".parse().unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Decimal::ZERO);
        assert_eq!(Decimal::ZERO.to_string(), "0");
        assert_eq!("0e5".parse::<Decimal>().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn arbitrary_precision() {
        let tiny: Decimal = "1e-40".parse().unwrap();
        assert_eq!(tiny.digits(), [1]);
        assert_eq!(tiny.exponent(), -40);
        assert_eq!(tiny.to_string(), "1E-40");

        let digits = "123456789012345678901234567890123456789012";
        let huge: Decimal = digits.parse().unwrap();
        assert_eq!(huge.digits().len(), 42);
        assert_eq!(huge.to_string(), digits);

        let long_fraction = format!("0.{}", "3".repeat(60));
        assert_eq!(
            long_fraction.parse::<Decimal>().unwrap().to_string(),
            long_fraction
        );
    }

    #[test]
    fn invalid_input() {
        assert_eq!("".parse::<Decimal>(), Err(DecimalError::Empty));
        assert_eq!("-".parse::<Decimal>(), Err(DecimalError::Empty));
        assert_eq!(".".parse::<Decimal>(), Err(DecimalError::Empty));
        assert_eq!("1.2.3".parse::<Decimal>(), Err(DecimalError::InvalidDigit));
        assert_eq!("abc".parse::<Decimal>(), Err(DecimalError::InvalidDigit));
        assert_eq!("1e".parse::<Decimal>(), Err(DecimalError::InvalidDigit));
        assert_eq!("NaN".parse::<Decimal>(), Err(DecimalError::InvalidDigit));
    }

    #[test]
    fn exponent_out_of_range() {
        assert_eq!(
            "1e99999999999999999999".parse::<Decimal>(),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            format!("0.5e{}", i64::MIN).parse::<Decimal>(),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn display_small_fraction() {
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(15, 8).to_string(), "1.5E-7");
    }

    #[test]
    fn to_float() {
        assert_eq!("2.5".parse::<Decimal>().unwrap().to_f64(), 2.5);
        assert_eq!("-1.5e3".parse::<Decimal>().unwrap().to_f64(), -1500.0);
        assert_eq!(Decimal::ZERO.to_f64(), 0.0);
    }
}
