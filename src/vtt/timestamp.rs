use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPrecision {
    /// Whole seconds, fraction dropped toward zero.
    #[default]
    Truncate,
    Millisecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampComponent {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Display for TimestampComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimestampComponent::Hours => "hours",
            TimestampComponent::Minutes => "minutes",
            TimestampComponent::Seconds => "seconds",
            TimestampComponent::Milliseconds => "milliseconds",
        };
        write!(f, "{name}")
    }
}

/// A timestamp component had no leading digits and was read as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampWarning {
    pub component: TimestampComponent,
    pub text: String,
    /// The value `decode` reports for the whole timestamp.
    pub fallback: f64,
}

impl Display for TimestampWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unreadable {} in timestamp {:?}, using {}",
            self.component, self.text, self.fallback
        )
    }
}

/// Decodes `[[HH:]MM:]SS[.mmm]` into whole seconds. Never fails.
pub fn decode(text: &str) -> f64 {
    decode_with(text, TimestampPrecision::Truncate)
}

pub fn decode_with(text: &str, precision: TimestampPrecision) -> f64 {
    decode_checked(text, precision).unwrap_or_else(|warning| warning.fallback)
}

/// Like [`decode_with`], but reports the first component that fell back to 0.
pub fn decode_checked(text: &str, precision: TimestampPrecision) -> Result<f64, TimestampWarning> {
    let (clock, fraction) = match text.rsplit_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };

    let mut first_bad: Option<TimestampComponent> = None;
    let mut read = |part: Option<&str>, component: TimestampComponent| -> f64 {
        match part {
            None => 0.0,
            Some(part) => leading_integer(part).unwrap_or_else(|| {
                first_bad.get_or_insert(component);
                0.0
            }),
        }
    };

    let milliseconds = read(fraction, TimestampComponent::Milliseconds);
    let mut parts = clock.rsplit(':');
    let seconds = read(parts.next(), TimestampComponent::Seconds);
    let minutes = read(parts.next(), TimestampComponent::Minutes);
    let hours = read(parts.next(), TimestampComponent::Hours);

    let total = hours * 3600.0 + minutes * 60.0 + seconds + milliseconds / 1000.0;
    let total = match precision {
        TimestampPrecision::Truncate => total.trunc(),
        TimestampPrecision::Millisecond => total,
    };

    match first_bad {
        None => Ok(total),
        Some(component) => Err(TimestampWarning {
            component,
            text: text.to_string(),
            fallback: total,
        }),
    }
}

/// Reads an optionally signed run of digits after leading whitespace, ignoring the rest.
/// Digit runs too long for an integer still read as a (huge or infinite) number.
fn leading_integer(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}
