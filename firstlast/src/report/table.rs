use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::{CanonicalLabel, FirstLastTimes};

use super::{Extreme, OrderingStrategy, RenderError, TableLayout};

/// Header of the destination column.
const DESTINATIONS_HEADER: &str = "Destinations";

/// Narrowest time column: `HH:MM:SS`.
const TIME_WIDTH: usize = 8;

/// Render one fixed-width table: destinations down, services across.
///
/// Each cell is the earliest first (or latest last) departure of every label
/// with that service and destination. Missing combinations are blank.
pub fn render_table(
    map: &BTreeMap<CanonicalLabel, FirstLastTimes>,
    extreme: Extreme,
    layout: &TableLayout<'_>,
) -> Result<String, RenderError> {
    let mut cells: BTreeMap<(&str, &str), FirstLastTimes> = BTreeMap::new();
    for (label, times) in map {
        let cell = (label.service.as_str(), label.destination());
        match cells.get_mut(&cell) {
            Some(existing) => existing.merge(times),
            None => {
                cells.insert(cell, times.clone());
            }
        }
    }

    let services = order_axis(
        cells.keys().map(|(service, _)| *service).collect(),
        layout.service_order,
        layout.strategy,
        RenderError::UnknownService,
    )?;
    let destinations = order_axis(
        cells.keys().map(|(_, destination)| *destination).collect(),
        layout.destination_order,
        layout.strategy,
        RenderError::UnknownDestination,
    )?;

    let first_width = destinations
        .iter()
        .map(|d| d.chars().count())
        .chain([DESTINATIONS_HEADER.len()])
        .max()
        .unwrap_or(DESTINATIONS_HEADER.len());
    let columns: Vec<(&str, usize)> = services
        .iter()
        .map(|s| (*s, s.chars().count().max(TIME_WIDTH)))
        .collect();

    let header = row(DESTINATIONS_HEADER, first_width, &columns);
    let width = header.chars().count();
    let dashes = "-".repeat(width);
    let heading = extreme.heading(extreme.overall(map.values()));

    let mut out = String::new();
    out.push_str(&center(&heading, width));
    out.push('\n');
    for line in [&dashes, &header, &dashes] {
        out.push_str(line);
        out.push('\n');
    }

    for destination in &destinations {
        let values: Vec<(&str, usize)> = columns
            .iter()
            .map(|(service, w)| {
                let text = cells
                    .get(&(*service, *destination))
                    .map(|times| extreme.pick(times).as_str())
                    .unwrap_or("");
                (text, *w)
            })
            .collect();
        out.push_str(&row(destination, first_width, &values));
        out.push('\n');
    }

    out.push_str(&dashes);
    out.push('\n');
    Ok(out)
}

/// Order the entries present in the map by a preferred ordering.
///
/// `present` is a sorted set, so under [`OrderingStrategy::Lenient`] the
/// leftovers come out alphabetically.
fn order_axis<'a>(
    present: BTreeSet<&'a str>,
    preferred: &[String],
    strategy: OrderingStrategy,
    unknown: fn(String) -> RenderError,
) -> Result<Vec<&'a str>, RenderError> {
    let mut ordered: Vec<&'a str> = preferred
        .iter()
        .filter_map(|p| present.get(p.as_str()).copied())
        .collect();

    for entry in present {
        if ordered.contains(&entry) {
            continue;
        }
        match strategy {
            OrderingStrategy::Strict => return Err(unknown(entry.to_string())),
            OrderingStrategy::Lenient => ordered.push(entry),
        }
    }
    Ok(ordered)
}

/// `| first | a | b |`, every field left-aligned to its width.
fn row(first: &str, first_width: usize, cells: &[(&str, usize)]) -> String {
    let mut line = format!("| {first:<first_width$} |");
    for (text, width) in cells {
        line.push_str(&format!(" {text:<width$} |"));
    }
    line
}

/// Center `text` in `width` columns; never truncates, no trailing spaces.
fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}").trim_end().to_string()
}
