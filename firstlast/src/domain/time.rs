//! Schedule time handling for GTFS feeds.
//!
//! GTFS provides stop times as "HH:MM:SS" strings measured from the start of
//! the service day. Hours may run past 24 for trips that continue after
//! midnight ("25:10:00" is 01:10 the next morning, same service day).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scheduled departure time, kept exactly as written in the feed.
///
/// Ordering is plain string ordering. That is only chronological when every
/// time in the feed uses zero-padded two-digit fields, which holds for the
/// feeds this tool reads. Nothing here enforces it; [`DepartureTime::is_zero_padded`]
/// lets the loader report times that would sort wrongly.
///
/// # Examples
///
/// ```
/// use firstlast::domain::DepartureTime;
///
/// let early = DepartureTime::new("05:10:00");
/// let late = DepartureTime::new("24:40:00");
/// assert!(early < late);
/// assert_eq!(late.to_string(), "24:40:00");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartureTime(String);

impl DepartureTime {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the `HH:MM:SS` shape with two-digit fields.
    ///
    /// Hours are not capped at 23; minutes and seconds must be below 60.
    ///
    /// ```
    /// use firstlast::domain::DepartureTime;
    ///
    /// assert!(DepartureTime::new("25:10:00").is_zero_padded());
    /// assert!(!DepartureTime::new("5:10:00").is_zero_padded());
    /// assert!(!DepartureTime::new("05:60:00").is_zero_padded());
    /// ```
    pub fn is_zero_padded(&self) -> bool {
        let bytes = self.0.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
            return false;
        }
        let fields = [
            parse_two_digits(&bytes[0..2]),
            parse_two_digits(&bytes[3..5]),
            parse_two_digits(&bytes[6..8]),
        ];
        match fields {
            [Some(_), Some(minute), Some(second)] => minute < 60 && second < 60,
            _ => false,
        }
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({})", self.0)
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
