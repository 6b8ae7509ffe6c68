// Boundary normalization for draw parameters and step indices.
//
// Parameters are conceptually arbitrary-precision non-negative integers. A
// `ParamValue` stores one reduced to its low 64 bits, which loses nothing:
// every encoding prime is odd, and for odd `b` the value `b^k mod 2^64`
// depends only on `k mod 2^64` (the unit group mod 2^64 has order 2^63).
// Fractional parameters are floored; negative or non-finite ones are
// rejected with `InvalidRange`; tokens that are not numbers at all are
// `InvalidType`.
//
// Step indices are a soft preference rather than a contract, so they are
// normalized instead of rejected: negatives become 0 and fractions are
// floored. Only non-finite or unrepresentably large steps fail.
//
// Both types parse from text (`FromStr`) for the CLI and deserialize from
// JSON numbers or strings for request and config files.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DrawError, Result};

/// 2^64 as an `f64`, the first float that no longer fits in a `u64`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// One entry of a parameter array, reduced modulo 2^64.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParamValue(pub u64);

impl ParamValue {
    pub fn get(self) -> u64 {
        self.0
    }

    /// Floor a float parameter. Fails on negatives, NaN, and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DrawError::InvalidRange(format!(
                "parameter must be finite, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(DrawError::InvalidRange(format!(
                "parameter must be non-negative, got {value}"
            )));
        }
        let floored = value.floor();
        if floored < TWO_POW_64 {
            return Ok(ParamValue(floored as u64));
        }
        // `{:.0}` prints the exact integer value of the float.
        Self::from_digits(&format!("{floored:.0}"))
    }

    /// Accept a JSON number (integer or float) or a decimal string.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Ok(ParamValue(v))
                } else if let Some(v) = n.as_i64() {
                    ParamValue::try_from(v)
                } else {
                    ParamValue::from_f64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => s.parse(),
            other => Err(DrawError::InvalidType(format!(
                "parameter must be a number or decimal string, got {other}"
            ))),
        }
    }

    /// Reduce a decimal digit string of any length to its low 64 bits.
    fn from_digits(digits: &str) -> Result<Self> {
        let big = BigUint::from_str(digits)
            .map_err(|e| DrawError::InvalidType(format!("parameter {digits:?}: {e}")))?;
        Ok(ParamValue(low_u64(&big)))
    }
}

/// The low 64 bits of `big`.
fn low_u64(big: &BigUint) -> u64 {
    big.iter_u64_digits().next().unwrap_or(0)
}

impl TryFrom<i64> for ParamValue {
    type Error = DrawError;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value).map(ParamValue).map_err(|_| {
            DrawError::InvalidRange(format!("parameter must be non-negative, got {value}"))
        })
    }
}

impl FromStr for ParamValue {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let unsigned = token.strip_prefix('+').unwrap_or(token);
        if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Self::from_digits(unsigned);
        }
        match token.parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Err(DrawError::InvalidType(format!(
                "parameter {token:?} is not a number"
            ))),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ParamValue::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Which iteration of the stream to report. 0 is the encoded seed itself;
/// `k` is the seed after `k` xorshift steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StepIndex(pub u64);

impl StepIndex {
    /// Reported when the caller does not choose.
    pub const DEFAULT: StepIndex = StepIndex(100);

    pub fn get(self) -> u64 {
        self.0
    }

    /// Accept a JSON number (integer or float) or a numeric string.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Ok(StepIndex(v))
                } else if let Some(v) = n.as_i64() {
                    Ok(StepIndex::from_i64(v))
                } else {
                    StepIndex::from_f64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => s.parse(),
            other => Err(DrawError::InvalidType(format!(
                "step index must be a number, got {other}"
            ))),
        }
    }

    /// Negative steps become 0.
    pub fn from_i64(value: i64) -> Self {
        StepIndex(u64::try_from(value).unwrap_or(0))
    }

    /// Negative steps become 0 and fractions are floored. NaN, infinities,
    /// and values past `u64::MAX` fail with `InvalidRange`.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DrawError::InvalidRange(format!(
                "step index must be finite, got {value}"
            )));
        }
        if value <= 0.0 {
            return Ok(StepIndex(0));
        }
        let floored = value.floor();
        if floored >= TWO_POW_64 {
            return Err(DrawError::InvalidRange(format!(
                "step index {value} is too large"
            )));
        }
        Ok(StepIndex(floored as u64))
    }
}

impl Default for StepIndex {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for StepIndex {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        if let Ok(v) = token.parse::<i64>() {
            return Ok(StepIndex::from_i64(v));
        }
        if let Ok(v) = token.parse::<u64>() {
            return Ok(StepIndex(v));
        }
        match token.parse::<f64>() {
            Ok(value) => StepIndex::from_f64(value),
            Err(_) => Err(DrawError::InvalidType(format!(
                "step index {token:?} is not a number"
            ))),
        }
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StepIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StepIndex::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Parse a whitespace-separated parameter list. Blank input is an empty list.
pub fn parse_param_list(line: &str) -> Result<Vec<ParamValue>> {
    line.split_whitespace().map(str::parse).collect()
}

/// Parse a whitespace-separated step list. Blank input is an empty list;
/// callers substitute their default.
pub fn parse_step_list(line: &str) -> Result<Vec<StepIndex>> {
    line.split_whitespace().map(str::parse).collect()
}
