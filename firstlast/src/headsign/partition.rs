//! Branch partitions for headsigns shared by two lines.
//!
//! Some headsigns are used by two branches that merge at a junction, e.g.
//! "OAK Airport / SF / Daly City" runs on both the Blue line (from Dublin)
//! and the Green line (from Berryessa), which join at Bay Fair. Which line a
//! rider is looking at depends on where they are standing.

/// One of the two branches behind an ambiguous headsign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Canonical label for trains on this branch.
    pub label: String,
    /// Stations served by this branch only.
    pub stations: Vec<String>,
}

/// Which label applies at a given station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchChoice {
    First,
    Second,
    /// Shared station, both branches matched, or station unknown.
    Both,
}

/// Station → branch table for one ambiguous headsign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPartition {
    pub first: Branch,
    pub second: Branch,
    /// Stations both branches serve.
    pub shared: Vec<String>,
    /// Label when the branch can't be told apart.
    pub combined: String,
}

impl BranchPartition {
    /// Decide the branch for the querying station.
    ///
    /// A listed station matches when either name contains the other, so the
    /// operator's search text ("Hayward", "West Dublin") works without
    /// spelling the feed's full stop name. Anything short of an unambiguous
    /// single-branch match is [`BranchChoice::Both`]; this never guesses.
    pub fn choose(&self, station: Option<&str>) -> BranchChoice {
        let Some(station) = station else {
            return BranchChoice::Both;
        };
        let served = |stations: &[String]| stations.iter().any(|s| names_match(s, station));

        if served(&self.shared) {
            return BranchChoice::Both;
        }
        match (served(&self.first.stations), served(&self.second.stations)) {
            (true, false) => BranchChoice::First,
            (false, true) => BranchChoice::Second,
            _ => BranchChoice::Both,
        }
    }

    pub fn label(&self, choice: BranchChoice) -> &str {
        match choice {
            BranchChoice::First => &self.first.label,
            BranchChoice::Second => &self.second.label,
            BranchChoice::Both => &self.combined,
        }
    }

    /// The label for trains seen from `station`.
    pub fn resolve(&self, station: Option<&str>) -> &str {
        self.label(self.choose(station))
    }
}

fn names_match(listed: &str, queried: &str) -> bool {
    listed.contains(queried) || queried.contains(listed)
}
