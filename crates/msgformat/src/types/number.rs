use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// The numeric view of an argument value.
///
/// Plural selection and number formatting work on this type rather than on
/// [`Value`](super::Value) so that integers keep their exact representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

impl Number {
    /// Subtract a plural offset.
    pub fn minus_offset(self, offset: u32) -> Number {
        match self {
            Number::Integer(n) => n
                .checked_sub(i64::from(offset))
                .map_or(Number::Decimal(n as f64 - f64::from(offset)), Number::Integer),
            Number::Decimal(f) => Number::Decimal(f - f64::from(offset)),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Decimal(f) => f,
        }
    }

    /// The integer value, when this number has no fractional part.
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Number::Integer(n) => Some(n),
            Number::Decimal(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 =>
            {
                Some(f as i64)
            }
            Number::Decimal(_) => None,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            Number::Integer(n) => n < 0,
            Number::Decimal(f) => f.is_sign_negative() && f != 0.0,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Decimal(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Number {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Number::Integer(n));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Number::Decimal(f)),
            _ => Err(()),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Decimal(f)
    }
}
