// ABOUTME: Pane size values and parsing of user-supplied size inputs.
// ABOUTME: A size is either absolute pixels or a percentage of container width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pane length, resolved against the container width when needed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    Pixels(f64),
    Percent(f64),
}

impl Size {
    /// The raw magnitude, in whatever unit the size carries
    pub fn value(&self) -> f64 {
        match self {
            Size::Pixels(v) | Size::Percent(v) => *v,
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Size::Percent(_))
    }

    /// Absolute length inside a container of the given width
    pub fn to_pixels(&self, container_width: f64) -> f64 {
        match self {
            Size::Pixels(v) => *v,
            Size::Percent(p) => p / 100.0 * container_width,
        }
    }

    /// Share of a container of the given width. A zero-width container yields 0.
    pub fn to_percent(&self, container_width: f64) -> f64 {
        match self {
            Size::Percent(p) => *p,
            Size::Pixels(v) if container_width > 0.0 => v / container_width * 100.0,
            Size::Pixels(_) => 0.0,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Pixels(v) => write!(f, "{}px", v),
            Size::Percent(p) => write!(f, "{}%", p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizeError {
    #[error("{0:?} is not a number or percentage")]
    NotNumeric(String),

    #[error("{0} is negative")]
    Negative(f64),
}

impl FromStr for Size {
    type Err = SizeError;

    /// Accepts `"120"`, `"12.5"`, `"40%"`; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (digits, percent) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        let value = digits
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SizeError::NotNumeric(s.to_string()))?;

        if value < 0.0 {
            return Err(SizeError::Negative(value));
        }

        Ok(if percent {
            Size::Percent(value)
        } else {
            Size::Pixels(value)
        })
    }
}

/// A size as supplied by a caller or config file: a bare number of pixels,
/// or a string holding a number with an optional `%` suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeInput {
    Number(f64),
    Text(String),
}

impl SizeInput {
    pub fn parse(&self) -> Result<Size, SizeError> {
        match self {
            SizeInput::Number(n) if !n.is_finite() => Err(SizeError::NotNumeric(n.to_string())),
            SizeInput::Number(n) if *n < 0.0 => Err(SizeError::Negative(*n)),
            SizeInput::Number(n) => Ok(Size::Pixels(*n)),
            SizeInput::Text(s) => s.parse(),
        }
    }
}

impl fmt::Display for SizeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeInput::Number(n) => write!(f, "{}", n),
            SizeInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SizeInput {
    fn from(value: f64) -> Self {
        SizeInput::Number(value)
    }
}

impl From<i32> for SizeInput {
    fn from(value: i32) -> Self {
        SizeInput::Number(f64::from(value))
    }
}

impl From<&str> for SizeInput {
    fn from(value: &str) -> Self {
        SizeInput::Text(value.to_string())
    }
}

impl From<String> for SizeInput {
    fn from(value: String) -> Self {
        SizeInput::Text(value)
    }
}

impl From<Size> for SizeInput {
    fn from(size: Size) -> Self {
        match size {
            Size::Pixels(v) => SizeInput::Number(v),
            Size::Percent(_) => SizeInput::Text(size.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers_as_pixels() {
        assert_eq!("100".parse::<Size>(), Ok(Size::Pixels(100.0)));
        assert_eq!(" 12.5 ".parse::<Size>(), Ok(Size::Pixels(12.5)));
    }

    #[test]
    fn parses_percent_suffix() {
        assert_eq!("50%".parse::<Size>(), Ok(Size::Percent(50.0)));
        assert_eq!("0%".parse::<Size>(), Ok(Size::Percent(0.0)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        for bad in ["invalid", "", "%", "10px", "inf", "NaN", "5%%"] {
            assert!(
                matches!(bad.parse::<Size>(), Err(SizeError::NotNumeric(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn rejects_negative_values() {
        assert_eq!("-100".parse::<Size>(), Err(SizeError::Negative(-100.0)));
        assert_eq!("-5%".parse::<Size>(), Err(SizeError::Negative(-5.0)));
        assert_eq!(SizeInput::from(-100).parse(), Err(SizeError::Negative(-100.0)));
    }

    #[test]
    fn number_input_is_pixels() {
        assert_eq!(SizeInput::from(100).parse(), Ok(Size::Pixels(100.0)));
        assert!(matches!(
            SizeInput::Number(f64::NAN).parse(),
            Err(SizeError::NotNumeric(_))
        ));
    }

    #[test]
    fn display_matches_css_units() {
        assert_eq!(Size::Percent(50.0).to_string(), "50%");
        assert_eq!(Size::Pixels(120.0).to_string(), "120px");
        assert_eq!(Size::Percent(33.5).to_string(), "33.5%");
    }

    #[test]
    fn converts_between_units() {
        assert!((Size::Percent(25.0).to_pixels(800.0) - 200.0).abs() < 1e-9);
        assert!((Size::Pixels(200.0).to_percent(800.0) - 25.0).abs() < 1e-9);
        assert_eq!(Size::Pixels(200.0).to_percent(0.0), 0.0);
    }

    #[test]
    fn input_deserializes_from_number_or_string() {
        let n: SizeInput = serde_json::from_str("100").unwrap();
        let s: SizeInput = serde_json::from_str("\"30%\"").unwrap();
        assert_eq!(n.parse(), Ok(Size::Pixels(100.0)));
        assert_eq!(s.parse(), Ok(Size::Percent(30.0)));
    }
}
