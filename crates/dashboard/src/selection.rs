//! Per-session station selection
//!
//! A session tracks the active station type and the selected station id.
//! Three kinds of input move it:
//! - switching the type filter, which re-validates the selection against the
//!   new partition
//! - picking a display name from the active partition
//! - clicking the map, which proposes the globally nearest station as a
//!   candidate that only takes effect once confirmed
//!
//! Confirming a candidate never touches the type filter, so the selection
//! can point outside the visible partition until the user switches types.

use log::{debug, warn};
use serde::Serialize;

use crate::stations::{parse_display_name, StationId, StationIndex, StationRecord};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("'{display}' is not a {station_type} station")]
    InvalidPick {
        station_type: String,
        display: String,
    },
    #[error("No map selection is waiting for confirmation")]
    NothingPending,
}

/// Starting point for a new session
#[derive(Debug, Clone)]
pub struct SelectionDefaults {
    /// Falls back to the first station type in sheet order
    pub station_type: Option<String>,
    pub station_id: StationId,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            station_type: None,
            station_id: StationId::new(obsnet_core::DEFAULT_STATION_ID),
        }
    }
}

/// Station resolved from a map click, awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub station_type: String,
    pub station_id: StationId,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    active_type: String,
    selected_id: StationId,
    /// Partition of a confirmed map pick, so a shared id keeps pointing at
    /// the station that was confirmed
    selected_type: Option<String>,
    pending: Option<Candidate>,
}

impl SelectionState {
    pub fn new(index: &StationIndex, defaults: &SelectionDefaults) -> Self {
        let configured = defaults.station_type.as_deref().filter(|station_type| {
            let known = index.has_type(station_type);
            if !known {
                warn!("default station type {} is not in the workbook", station_type);
            }
            known
        });
        let active_type = configured
            .map(String::from)
            .or_else(|| index.station_types().first().cloned())
            .unwrap_or_default();

        let mut state = Self {
            active_type,
            selected_id: defaults.station_id.clone(),
            selected_type: None,
            pending: None,
        };
        state.revalidate(index);
        state
    }

    pub fn active_type(&self) -> &str {
        &self.active_type
    }

    pub fn selected_id(&self) -> &StationId {
        &self.selected_id
    }

    pub fn pending(&self) -> Option<&Candidate> {
        self.pending.as_ref()
    }

    /// Switch the type filter and pull the selection back inside it
    pub fn change_type(&mut self, index: &StationIndex, station_type: &str) {
        self.active_type = station_type.to_string();
        self.selected_type = None;
        self.revalidate(index);
    }

    /// Select from the active partition by display name
    pub fn pick(&mut self, index: &StationIndex, display: &str) -> Result<&StationId, SelectionError> {
        let station_id = parse_display_name(display);
        let record = index
            .by_id(&self.active_type, station_id.as_str())
            .map_err(|_| SelectionError::InvalidPick {
                station_type: self.active_type.clone(),
                display: display.to_string(),
            })?;

        self.selected_id = record.station_id.clone();
        self.selected_type = None;
        Ok(&self.selected_id)
    }

    /// Resolve a map click to the nearest station of any type and hold it
    /// as the pending candidate
    pub fn spatial_pick(
        &mut self,
        index: &StationIndex,
        latitude: f64,
        longitude: f64,
    ) -> Option<&Candidate> {
        let nearest = index.nearest(latitude, longitude)?;
        debug!(
            "map click at {}, {} resolved to {} ({})",
            latitude,
            longitude,
            nearest.station_id,
            nearest.station_type
        );
        self.pending = Some(Candidate {
            station_type: nearest.station_type.clone(),
            station_id: nearest.station_id.clone(),
            display: nearest.display_name(),
        });
        self.pending.as_ref()
    }

    /// Promote the pending candidate into the selection
    pub fn confirm(&mut self) -> Result<&StationId, SelectionError> {
        let candidate = self.pending.take().ok_or(SelectionError::NothingPending)?;
        self.selected_id = candidate.station_id;
        self.selected_type = Some(candidate.station_type);
        Ok(&self.selected_id)
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Record the selection points at: the confirmed map pick's own
    /// partition, then the active partition, then the first station anywhere
    /// with that id
    pub fn resolve<'a>(&self, index: &'a StationIndex) -> Option<&'a StationRecord> {
        self.selected_type
            .as_deref()
            .and_then(|station_type| index.by_id(station_type, self.selected_id.as_str()).ok())
            .or_else(|| index.by_id(&self.active_type, self.selected_id.as_str()).ok())
            .or_else(|| index.first_with_id(&self.selected_id))
    }

    /// Re-check a long-lived session against freshly loaded data
    ///
    /// Only a selection that vanished from the whole table is reset, so a
    /// confirmed cross-type pick stays as it is.
    pub fn refresh(&mut self, index: &StationIndex) {
        if let Some(station_type) = &self.selected_type {
            if index.by_id(station_type, self.selected_id.as_str()).is_err() {
                self.selected_type = None;
            }
        }
        if index.first_with_id(&self.selected_id).is_none() {
            self.revalidate(index);
        }
        if let Some(candidate) = &self.pending {
            if index
                .by_id(&candidate.station_type, candidate.station_id.as_str())
                .is_err()
            {
                self.pending = None;
            }
        }
    }

    fn revalidate(&mut self, index: &StationIndex) {
        if index
            .by_id(&self.active_type, self.selected_id.as_str())
            .is_ok()
        {
            return;
        }
        // An empty partition has nothing to fall back to; keep the id
        if let Some(first) = index.first_of_type(&self.active_type) {
            debug!(
                "station {} not in {}, falling back to {}",
                self.selected_id, self.active_type, first.station_id
            );
            self.selected_id = first.station_id.clone();
        }
    }
}
