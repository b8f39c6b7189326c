use std::collections::BTreeMap;

use crate::aggregate::{CanonicalLabel, FirstLastTimes};

/// One line per label, sorted: `"<label>: <first> - <last>"`, labels
/// padded to the longest one.
pub fn render_list(map: &BTreeMap<CanonicalLabel, FirstLastTimes>) -> String {
    let labels: Vec<(String, &FirstLastTimes)> =
        map.iter().map(|(label, times)| (label.to_string(), times)).collect();
    let width = labels
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, times) in &labels {
        out.push_str(&format!(
            "{label:<width$}: {} - {}\n",
            times.first, times.last
        ));
    }
    out
}
