//! Platform resource quantities.
//!
//! Parses the textual quantity grammar used by workload platforms
//! (`"500m"`, `"2Gi"`, `"10G"`, `"0.5"`, `"1e3"`) into an exact integer
//! count of nano-units. Keeping quantities exact means unit normalization
//! truncates the same way every time, with no float rounding in between.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SolverError, SolverResult};

/// Nano-units per whole unit.
pub const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// Resource name → quantity, as attached to a task or a node.
pub type ResourceList = BTreeMap<String, Quantity>;

/// An exact resource amount, stored as nano-units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    nanos: i128,
}

impl Quantity {
    pub const ZERO: Self = Self { nanos: 0 };

    pub const fn from_nanos(nanos: i128) -> Self {
        Self { nanos }
    }

    pub const fn from_units(units: i64) -> Self {
        Self {
            nanos: units as i128 * NANOS_PER_UNIT,
        }
    }

    pub const fn as_nanos(&self) -> i128 {
        self.nanos
    }

    /// `value × factor / divisor`, truncated toward zero and saturated to `i64`.
    ///
    /// A zero divisor yields zero.
    pub fn scaled(&self, factor: i64, divisor: i64) -> i64 {
        if divisor == 0 {
            return 0;
        }
        let denominator = i128::from(divisor) * NANOS_PER_UNIT;
        let scaled = self.nanos.saturating_mul(i128::from(factor)) / denominator;
        scaled.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

impl FromStr for Quantity {
    type Err = SolverError;

    fn from_str(s: &str) -> SolverResult<Self> {
        parse_quantity(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.nanos < 0 { "-" } else { "" };
        let abs = self.nanos.unsigned_abs();
        let whole = abs / NANOS_PER_UNIT as u128;
        let frac = abs % NANOS_PER_UNIT as u128;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{frac:09}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Ok(Quantity::from_units(v)),
            Raw::Float(v) => v.to_string().parse::<Quantity>().map_err(serde::de::Error::custom),
            Raw::Text(s) => s.parse::<Quantity>().map_err(serde::de::Error::custom),
        }
    }
}

/// Build a [`ResourceList`] from `(name, quantity)` string pairs.
pub fn resource_list<'a, I>(pairs: I) -> SolverResult<ResourceList>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| value.parse::<Quantity>().map(|q| (name.to_string(), q)))
        .collect()
}

enum Multiplier {
    Decimal(i32),
    Binary(u32),
}

fn invalid(input: &str, reason: impl Into<String>) -> SolverError {
    SolverError::InvalidQuantity {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_quantity(input: &str) -> SolverResult<Quantity> {
    let s = input.trim();
    if s.is_empty() {
        return Err(invalid(input, "empty quantity"));
    }

    let (negative, rest) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let number_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let (number, suffix) = rest.split_at(number_len);

    let mut parts = number.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid(input, "missing number"));
    }
    if fraction.contains('.') {
        return Err(invalid(input, "more than one decimal point"));
    }

    let mut mantissa: i128 = 0;
    for c in whole.chars().chain(fraction.chars()) {
        let digit = i128::from(c as u8 - b'0');
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(digit))
            .ok_or_else(|| invalid(input, "too many digits"))?;
    }
    let fraction_digits = fraction.len() as i32;

    let nanos = match parse_suffix(input, suffix)? {
        Multiplier::Decimal(exp) => {
            let power = exp + 9 - fraction_digits;
            if power >= 0 {
                10i128
                    .checked_pow(power as u32)
                    .and_then(|p| mantissa.checked_mul(p))
            } else {
                10i128.checked_pow((-power) as u32).map(|p| mantissa / p)
            }
        }
        Multiplier::Binary(shift) => 1i128
            .checked_shl(shift)
            .and_then(|p| mantissa.checked_mul(p))
            .and_then(|m| m.checked_mul(NANOS_PER_UNIT))
            .and_then(|m| {
                10i128
                    .checked_pow(fraction_digits as u32)
                    .map(|p| m / p)
            }),
    }
    .ok_or_else(|| invalid(input, "value out of range"))?;

    Ok(Quantity::from_nanos(if negative { -nanos } else { nanos }))
}

fn parse_suffix(input: &str, suffix: &str) -> SolverResult<Multiplier> {
    let multiplier = match suffix {
        "" => Multiplier::Decimal(0),
        "n" => Multiplier::Decimal(-9),
        "u" => Multiplier::Decimal(-6),
        "m" => Multiplier::Decimal(-3),
        "k" => Multiplier::Decimal(3),
        "M" => Multiplier::Decimal(6),
        "G" => Multiplier::Decimal(9),
        "T" => Multiplier::Decimal(12),
        "P" => Multiplier::Decimal(15),
        "E" => Multiplier::Decimal(18),
        "Ki" => Multiplier::Binary(10),
        "Mi" => Multiplier::Binary(20),
        "Gi" => Multiplier::Binary(30),
        "Ti" => Multiplier::Binary(40),
        "Pi" => Multiplier::Binary(50),
        "Ei" => Multiplier::Binary(60),
        other => {
            let exponent = other
                .strip_prefix('e')
                .or_else(|| other.strip_prefix('E'))
                .ok_or_else(|| invalid(input, format!("unknown suffix {other:?}")))?;
            let exp: i32 = exponent
                .parse()
                .map_err(|_| invalid(input, format!("bad exponent {exponent:?}")))?;
            if !(-9..=18).contains(&exp) {
                return Err(invalid(input, "exponent out of range"));
            }
            Multiplier::Decimal(exp)
        }
    };
    Ok(multiplier)
}
