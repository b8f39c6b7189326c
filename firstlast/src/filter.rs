//! Stop-time selection and headsign/service resolution.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{DepartureTime, ServiceId, StopId, TripId};
use crate::feed::StopTimeRecord;
use crate::index::{TripIndex, TripInfo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A stop time points at a trip that isn't in trips.txt
    #[error("stop time at {stop_id} references unknown trip {trip_id}")]
    UnknownTrip { trip_id: TripId, stop_id: StopId },
}

/// A stop time with its trip-level facts filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStopTime {
    pub departure_time: DepartureTime,
    /// The stop's own headsign, or the trip's when the stop has none.
    pub effective_headsign: String,
    pub effective_service_id: ServiceId,
    pub stop_id: StopId,
}

/// The headsign riders see at this stop: the stop-level override if set,
/// otherwise the trip's.
pub fn effective_headsign<'a>(record: &'a StopTimeRecord, trip: &'a TripInfo) -> &'a str {
    match record.stop_headsign.as_deref() {
        Some(headsign) if !headsign.is_empty() => headsign,
        _ => &trip.trip_headsign,
    }
}

/// Look up the trip a stop time belongs to.
pub fn trip_for<'a>(
    record: &StopTimeRecord,
    trips: &'a TripIndex,
) -> Result<&'a TripInfo, FilterError> {
    trips
        .get(&record.trip_id)
        .ok_or_else(|| FilterError::UnknownTrip {
            trip_id: record.trip_id.clone(),
            stop_id: record.stop_id.clone(),
        })
}

/// Select the stop times at `targets` (or all of them when `targets` is
/// `None`) and resolve each one's headsign and service.
///
/// Fails on the first stop time whose trip is missing from `trips`; a
/// dangling trip id means the feed is inconsistent. Stop times without a
/// departure time are passed over since they can't be a first or last
/// departure.
pub fn filter_stop_times(
    stop_times: &[StopTimeRecord],
    targets: Option<&BTreeSet<StopId>>,
    trips: &TripIndex,
) -> Result<Vec<ResolvedStopTime>, FilterError> {
    let mut resolved = Vec::new();
    let mut no_departure = 0usize;

    for record in stop_times {
        if let Some(targets) = targets
            && !targets.contains(&record.stop_id)
        {
            continue;
        }

        let trip = trip_for(record, trips)?;
        let Some(departure_time) = record.departure_time.clone() else {
            no_departure += 1;
            continue;
        };

        resolved.push(ResolvedStopTime {
            departure_time,
            effective_headsign: effective_headsign(record, trip).to_string(),
            effective_service_id: trip.service_id.clone(),
            stop_id: record.stop_id.clone(),
        });
    }

    debug!(
        selected = resolved.len(),
        no_departure, "Filtered stop times"
    );

    Ok(resolved)
}
