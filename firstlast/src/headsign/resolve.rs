//! Headsign resolution.

use std::borrow::Cow;

use super::partition::BranchPartition;

/// Minimum width of the banner around an unmapped headsign.
pub const UNMAPPED_WIDTH: usize = 50;

/// Padding character for unmapped headsigns.
pub const UNMAPPED_FILL: char = '*';

/// Outcome of looking a raw headsign up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Not in the table. Carries the raw headsign.
    Unmapped(&'a str),
    /// A canonical label regardless of station.
    Resolved(&'a str),
    /// Two branches share the headsign; needs the querying station.
    Ambiguous(&'a BranchPartition),
}

impl<'a> Resolution<'a> {
    /// Second stage: apply the querying station and produce the label.
    pub fn with_context(&self, station: Option<&str>) -> Cow<'a, str> {
        match *self {
            Resolution::Unmapped(raw) => Cow::Owned(flag_unmapped(raw)),
            Resolution::Resolved(label) => Cow::Borrowed(label),
            Resolution::Ambiguous(partition) => Cow::Borrowed(partition.resolve(station)),
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Resolution::Unmapped(_))
    }
}

/// Center `raw` in a run of `*` at least [`UNMAPPED_WIDTH`] characters wide.
///
/// When the padding is odd the extra `*` goes on the right.
///
/// ```
/// use firstlast::headsign::flag_unmapped;
///
/// let flagged = flag_unmapped("Nowhere");
/// assert_eq!(flagged.chars().count(), 50);
/// assert!(flagged.starts_with("*********************Nowhere"));
/// assert!(flagged.ends_with("Nowhere**********************"));
/// ```
pub fn flag_unmapped(raw: &str) -> String {
    let len = raw.chars().count();
    let pad = UNMAPPED_WIDTH.saturating_sub(len);
    let left = pad / 2;
    let right = pad - left;

    let mut flagged = String::with_capacity(raw.len() + pad);
    flagged.extend(std::iter::repeat_n(UNMAPPED_FILL, left));
    flagged.push_str(raw);
    flagged.extend(std::iter::repeat_n(UNMAPPED_FILL, right));
    flagged
}

/// The destination part of a canonical label: the text in parentheses.
///
/// Labels without a parenthesised part (such as flagged unmapped headsigns)
/// are returned whole.
///
/// ```
/// use firstlast::headsign::destination_only;
///
/// assert_eq!(destination_only("Yellow NB (Pts/BayPt)"), "Pts/BayPt");
/// assert_eq!(destination_only("Yellow SB (Millbrae, No SFO)"), "Millbrae, No SFO");
/// assert_eq!(destination_only("***Nowhere***"), "***Nowhere***");
/// ```
pub fn destination_only(label: &str) -> &str {
    match (label.find('('), label.find(')')) {
        (Some(start), Some(end)) if start < end => label[start + 1..end].trim(),
        _ => label,
    }
}
