//! The headsign/service mapping table.
//!
//! The table is curated data: which raw feed strings mean which line and
//! direction, what each service id is called, and the display orderings.
//! It ships embedded in the binary and can be replaced with a JSON file of
//! the same shape when the feed vocabulary changes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::ServiceId;

use super::partition::{Branch, BranchPartition};
use super::resolve::Resolution;

/// The table shipped with the binary.
const EMBEDDED_TABLE: &str = include_str!("../../data/bart_2025_08_11.json");

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("cannot read mapping file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("headsign {headsign:?} refers to unknown partition {partition:?}")]
    UnknownPartition { headsign: String, partition: String },

    #[error("partition {partition:?} puts {station:?} in more than one group")]
    OverlappingBranches { partition: String, station: String },
}

/// What a raw headsign maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadsignEntry {
    /// Always this canonical label.
    Direct(String),
    /// Depends on which branch the querying station is on.
    Branching(BranchPartition),
}

/// Validated mapping table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    version: String,
    services: BTreeMap<ServiceId, String>,
    service_order: Vec<String>,
    destination_order: Vec<String>,
    headsigns: BTreeMap<String, HeadsignEntry>,
}

impl MappingTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, MappingError> {
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Read a replacement table from disk.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let contents = std::fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let raw: RawTable = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Display name for a service id ("Weekday", ...). Unknown ids are shown raw.
    pub fn service_label<'a>(&'a self, service_id: &'a ServiceId) -> &'a str {
        self.services
            .get(service_id)
            .map(String::as_str)
            .unwrap_or(service_id.as_str())
    }

    /// Preferred column order for the report table.
    pub fn service_order(&self) -> &[String] {
        &self.service_order
    }

    /// Preferred row order for the report table.
    pub fn destination_order(&self) -> &[String] {
        &self.destination_order
    }

    pub fn contains(&self, raw_headsign: &str) -> bool {
        self.headsigns.contains_key(raw_headsign)
    }

    /// First stage of resolution: what the table says about `raw_headsign`,
    /// before any station context is applied.
    pub fn lookup<'a>(&'a self, raw_headsign: &'a str) -> Resolution<'a> {
        match self.headsigns.get(raw_headsign) {
            None => Resolution::Unmapped(raw_headsign),
            Some(HeadsignEntry::Direct(label)) => Resolution::Resolved(label),
            Some(HeadsignEntry::Branching(partition)) => Resolution::Ambiguous(partition),
        }
    }

    /// Canonical "Line Direction (Destination)" label for a raw headsign.
    ///
    /// `station` is the name the operator queried; it only matters for
    /// headsigns shared by two branches. Unmapped headsigns come back
    /// wrapped in `*` padding so they stand out in the report.
    pub fn resolve(&self, raw_headsign: &str, station: Option<&str>) -> String {
        self.lookup(raw_headsign).with_context(station).into_owned()
    }

    /// Every raw headsign the table knows.
    pub fn headsigns(&self) -> impl Iterator<Item = (&str, &HeadsignEntry)> {
        self.headsigns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Deserialize)]
struct RawTable {
    version: String,
    #[serde(default)]
    services: BTreeMap<ServiceId, String>,
    #[serde(default)]
    service_order: Vec<String>,
    #[serde(default)]
    destination_order: Vec<String>,
    headsigns: BTreeMap<String, RawTarget>,
    #[serde(default)]
    partitions: BTreeMap<String, RawPartition>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Label(String),
    Partition { partition: String },
}

#[derive(Deserialize)]
struct RawPartition {
    first: RawBranch,
    second: RawBranch,
    #[serde(default)]
    shared: Vec<String>,
    combined: String,
}

#[derive(Deserialize)]
struct RawBranch {
    label: String,
    stations: Vec<String>,
}

impl RawTable {
    fn validate(self) -> Result<MappingTable, MappingError> {
        let mut partitions = BTreeMap::new();
        for (name, raw) in self.partitions {
            let mut seen = BTreeSet::new();
            for station in raw
                .first
                .stations
                .iter()
                .chain(&raw.second.stations)
                .chain(&raw.shared)
            {
                if !seen.insert(station.as_str()) {
                    return Err(MappingError::OverlappingBranches {
                        partition: name,
                        station: station.clone(),
                    });
                }
            }

            let partition = BranchPartition {
                first: Branch {
                    label: raw.first.label,
                    stations: raw.first.stations,
                },
                second: Branch {
                    label: raw.second.label,
                    stations: raw.second.stations,
                },
                shared: raw.shared,
                combined: raw.combined,
            };
            partitions.insert(name, partition);
        }

        let mut headsigns = BTreeMap::new();
        for (headsign, target) in self.headsigns {
            let entry = match target {
                RawTarget::Label(label) => HeadsignEntry::Direct(label),
                RawTarget::Partition { partition } => match partitions.get(&partition) {
                    Some(p) => HeadsignEntry::Branching(p.clone()),
                    None => {
                        return Err(MappingError::UnknownPartition {
                            headsign,
                            partition,
                        });
                    }
                },
            };
            headsigns.insert(headsign, entry);
        }

        Ok(MappingTable {
            version: self.version,
            services: self.services,
            service_order: self.service_order,
            destination_order: self.destination_order,
            headsigns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = MappingTable::embedded().unwrap();
        assert_eq!(table.version(), "2025_08_11");
        assert_eq!(table.service_order(), ["Weekday", "Saturday", "Sunday"]);
        assert_eq!(table.destination_order().first().map(String::as_str), Some("Richmond"));
        assert!(table.contains("Antioch"));
        assert!(!table.contains("antioch"));
    }

    #[test]
    fn service_labels() {
        let table = MappingTable::embedded().unwrap();
        let sat = ServiceId::new("2025_08_11-SA-MVS-Saturday-000");
        let shuttle = ServiceId::new("2025_08_11-DX20-Weekday-001");
        let unknown = ServiceId::new("2026_01_05-DX-MVS-Weekday-001");
        assert_eq!(table.service_label(&sat), "Saturday");
        assert_eq!(table.service_label(&shuttle), "Weekday");
        assert_eq!(table.service_label(&unknown), "2026_01_05-DX-MVS-Weekday-001");
    }

    #[test]
    fn direct_and_branching_entries() {
        let table = MappingTable::embedded().unwrap();
        assert!(matches!(table.lookup("Antioch"), Resolution::Resolved("Yellow NB (Antioch)")));
        assert!(matches!(
            table.lookup("OAK Airport / SF / Daly City"),
            Resolution::Ambiguous(_)
        ));
        assert!(matches!(table.lookup("Nowhere"), Resolution::Unmapped("Nowhere")));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"version": "test", "headsigns": {"Antioch": "Yellow NB (Antioch)"}}"#,
        )
        .unwrap();

        let table = MappingTable::load(&path).unwrap();
        assert_eq!(table.version(), "test");
        assert_eq!(table.resolve("Antioch", None), "Yellow NB (Antioch)");
        assert!(table.service_order().is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = MappingTable::load(Path::new("/nonexistent/table.json")).unwrap_err();
        assert!(matches!(err, MappingError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = MappingTable::from_json("{\"version\": 3}").unwrap_err();
        assert!(matches!(err, MappingError::Parse(_)));
    }

    #[test]
    fn unknown_partition_rejected() {
        let json = r#"{
            "version": "test",
            "headsigns": {"SF / Daly City": {"partition": "missing"}}
        }"#;
        let err = MappingTable::from_json(json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "headsign \"SF / Daly City\" refers to unknown partition \"missing\""
        );
    }

    #[test]
    fn overlapping_branches_rejected() {
        let json = r#"{
            "version": "test",
            "headsigns": {},
            "partitions": {
                "p": {
                    "first": {"label": "A", "stations": ["Bay Fair"]},
                    "second": {"label": "B", "stations": ["Bay Fair"]},
                    "combined": "A/B"
                }
            }
        }"#;
        let err = MappingTable::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            MappingError::OverlappingBranches { ref station, .. } if station == "Bay Fair"
        ));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        // A repeated key carries no meaning; the table just ends up with one entry.
        let json = r#"{
            "version": "test",
            "headsigns": {
                "SF / SFO Airport / Millbrae": "Red SB (Millbrae)",
                "SF / SFO Airport / Millbrae": "Red SB (Millbrae)"
            }
        }"#;
        let table = MappingTable::from_json(json).unwrap();
        assert_eq!(table.headsigns().count(), 1);
    }
}
