//! Shared request/response types and value coercion

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Raised when a request value cannot be coerced to the type a field needs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    #[error("'{field}' is not a number: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("'{field}' is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },
}

/// A loosely typed scalar as it arrives in a request body.
///
/// JSON clients send numbers and strings; HTML forms only ever send strings.
/// Fields are coerced from this to their stored type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Render as a string, the way a number is written in JSON
    pub fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => format_number(n),
        }
    }

    /// True for an empty or whitespace-only string
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }

    pub fn to_number(&self, field: &'static str) -> Result<f64, CoercionError> {
        match self {
            Scalar::Number(n) => Ok(*n),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| CoercionError::NotANumber { field, value: s.clone() }),
        }
    }

    pub fn to_date(&self, field: &'static str) -> Result<DateTime<Utc>, CoercionError> {
        let parsed = match self {
            Scalar::Number(millis) => Utc.timestamp_millis_opt(*millis as i64).single(),
            Scalar::Text(s) => parse_date(s),
        };
        parsed.ok_or_else(|| CoercionError::InvalidDate {
            field,
            value: self.clone().into_text(),
        })
    }
}

/// Parse a calendar date or instant.
///
/// Accepts RFC 3339, a calendar date (`2023-01-15`, `2023/01/15` or
/// `January 15, 2023`, all midnight UTC) and a zone-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC).
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok());
    if let Some(date) = date {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Date-only rendering used in API responses, e.g. `Sun Jan 01 2023`
pub fn render_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Parse the leading integer of a query value; `"5abc"` is 5, `"abc"` is 0
pub fn parse_leading_int(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Serialize integral floats as JSON integers (`30`, not `30.0`)
pub fn serialize_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => serializer.serialize_i64(*n as i64),
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}

/// Which `UserStore` implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}
