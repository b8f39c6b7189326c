//! Regression tests against the previous revision of the headsign table.
//!
//! The earlier table had no branch partitions: "OAK Airport / SF / Daly City"
//! was always Blue and "Richmond" always the combined Red/Orange label. Every
//! headsign it knew must still be known, and must still be able to produce
//! the label it used to.

use super::*;

const PREVIOUS_REVISION: &[(&str, &str)] = &[
    ("SF / SFO Airport / Millbrae", "Red SB (Millbrae)"),
    ("SFO Airport / Millbrae", "Red SB (Millbrae)"),
    ("SFO / SF / Richmond", "Red NB (Richmond)"),
    ("Berryessa", "Orange SB (Berryessa)"),
    ("Berryessa/North San Jose", "Orange SB (Berryessa)"),
    ("OAK Airport / Berryessa/North San Jose", "Orange SB (Berryessa)"),
    ("OAK Airport / Richmond", "Orange NB (Richmond)"),
    ("Antioch", "Yellow NB (Antioch)"),
    ("SFO / SF / Antioch", "Yellow NB (Antioch)"),
    ("San Francisco / Antioch", "Yellow NB (Antioch)"),
    ("Pittsburg / Bay Point", "Yellow NB (Pts/BayPt)"),
    ("SFO / SF / Pittsburg/Bay Point", "Yellow NB (Pts/BayPt)"),
    ("SF / Pittsburg/Bay Point", "Yellow NB (Pts/BayPt)"),
    ("San Francisco International Airport", "Yellow SB (SFO)"),
    ("Millbrae (Caltrain Transfer Platform)", "Yellow SB (Millbrae, No SFO)"),
    ("San Francisco Int'l Airport/Millbrae", "Yellow SB (Millbrae)"),
    ("Dublin/Pleasanton", "Blue EB (Dublin/Plsntn)"),
    ("SF / OAK Airport / Dublin/Pleasanton", "Blue EB (Dublin/Plsntn)"),
    ("OAK Airport / SF / Daly City", "Blue WB (Daly City)"),
    ("Bay Fair", "Blue WB (Bay Fair only)"),
    ("SF / OAK Airport / Berryessa", "Green EB (Berryessa)"),
    ("Coliseum", "Grey OB (Coliseum)"),
    ("Oakland Airport", "Grey IB (OAK)"),
    ("SF / Daly City", "Blue/Green WB (Daly City)"),
    ("Richmond", "Red/Orange NB (Richmond)"),
    ("OAK Airport / Dublin/Pleasanton", "Blue EB (Dublin/Plsntn)"),
    ("San Francisco / BayPoint", "Yellow NB (Pts/BayPt)"),
    ("San Francisco / Pittsburg/Bay Point", "Yellow NB (Pts/BayPt)"),
    ("San Francisco / Richmond", "Red NB (Richmond)"),
    ("OAK Airport / Berryessa", "Green EB (Berryessa)"),
];

fn reachable_labels(entry: &HeadsignEntry) -> Vec<&str> {
    match entry {
        HeadsignEntry::Direct(label) => vec![label.as_str()],
        HeadsignEntry::Branching(p) => vec![
            p.first.label.as_str(),
            p.second.label.as_str(),
            p.combined.as_str(),
        ],
    }
}

#[test]
fn no_headsign_was_dropped() {
    let table = MappingTable::embedded().unwrap();
    for (raw, _) in PREVIOUS_REVISION {
        assert!(table.contains(raw), "lost mapping for {raw:?}");
    }
}

#[test]
fn previous_labels_still_reachable() {
    let table = MappingTable::embedded().unwrap();
    let entries: std::collections::BTreeMap<&str, &HeadsignEntry> = table.headsigns().collect();
    for (raw, label) in PREVIOUS_REVISION {
        let reachable = reachable_labels(entries[raw]);
        assert!(
            reachable.contains(label),
            "{raw:?} can no longer resolve to {label:?} (now {reachable:?})"
        );
    }
}

#[test]
fn unknown_station_matches_previous_combined_labels() {
    let table = MappingTable::embedded().unwrap();
    assert_eq!(table.resolve("SF / Daly City", None), "Blue/Green WB (Daly City)");
    assert_eq!(table.resolve("Richmond", None), "Red/Orange NB (Richmond)");
}

#[test]
fn every_label_has_a_destination_slot() {
    let table = MappingTable::embedded().unwrap();
    for (raw, entry) in table.headsigns() {
        for label in reachable_labels(entry) {
            let destination = destination_only(label);
            assert!(
                table.destination_order().iter().any(|d| d == destination),
                "{raw:?} -> {label:?} has no row for {destination:?}"
            );
        }
    }
}
