use super::loader::UnifiedTable;
use super::record::{StationId, StationRecord, DISPLAY_SEPARATOR};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IndexError {
    #[error("Station {station_id} not found in {station_type}")]
    NotFound {
        station_type: String,
        station_id: StationId,
    },
}

/// The unified station table plus the queries the dashboard runs against it
///
/// Records keep load order (sheet order, then row order); every query that
/// returns several records preserves it.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    station_types: Vec<String>,
    records: Vec<StationRecord>,
}

impl StationIndex {
    pub fn new(table: UnifiedTable) -> Self {
        let mut station_types = table.station_types;
        // Records built by hand may carry types that never had a sheet
        for record in &table.records {
            if !station_types.contains(&record.station_type) {
                station_types.push(record.station_type.clone());
            }
        }
        Self {
            station_types,
            records: table.records,
        }
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Station types in sheet order
    pub fn station_types(&self) -> &[String] {
        &self.station_types
    }

    pub fn has_type(&self, station_type: &str) -> bool {
        self.station_types.iter().any(|t| t == station_type)
    }

    /// All records of one partition; unknown types yield nothing
    pub fn filter_by_type(&self, station_type: &str) -> Vec<&StationRecord> {
        self.records
            .iter()
            .filter(|r| r.station_type == station_type)
            .collect()
    }

    /// Case-insensitive substring match on name, province or district
    ///
    /// An absent or empty term matches everything.
    pub fn search(&self, term: Option<&str>) -> Vec<&StationRecord> {
        let Some(term) = term.filter(|t| !t.is_empty()) else {
            return self.records.iter().collect();
        };
        let needle = term.to_lowercase();
        let matches = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        };

        self.records
            .iter()
            .filter(|r| matches(&r.name) || matches(&r.province) || matches(&r.district))
            .collect()
    }

    /// Closest record over the whole table, by squared distance in degrees
    ///
    /// Planar on purpose: this is what the map click resolves against. Ties go
    /// to the record that comes first in table order.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&StationRecord> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }

        let mut best: Option<(&StationRecord, f64)> = None;
        for record in &self.records {
            let d_lat = record.latitude - latitude;
            let d_lon = record.longitude - longitude;
            let distance = d_lat * d_lat + d_lon * d_lon;
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((record, distance));
            }
        }
        best.map(|(record, _)| record)
    }

    /// Look a station up inside one partition
    pub fn by_id(&self, station_type: &str, id: &str) -> Result<&StationRecord, IndexError> {
        let station_id = StationId::new(id);
        self.records
            .iter()
            .find(|r| r.station_type == station_type && r.station_id == station_id)
            .ok_or(IndexError::NotFound {
                station_type: station_type.to_string(),
                station_id,
            })
    }

    /// First record in table order carrying `id`, whatever its partition
    pub fn first_with_id(&self, id: &StationId) -> Option<&StationRecord> {
        self.records.iter().find(|r| &r.station_id == id)
    }

    /// First record of a partition
    pub fn first_of_type(&self, station_type: &str) -> Option<&StationRecord> {
        self.records.iter().find(|r| r.station_type == station_type)
    }
}

/// Recover the id from a display name produced by
/// [`StationRecord::display_name`]
pub fn parse_display_name(display: &str) -> StationId {
    let id = display
        .split_once(DISPLAY_SEPARATOR)
        .map_or(display, |(id, _)| id);
    StationId::new(id)
}
