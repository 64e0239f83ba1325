//! Everything the dashboard draws, derived from the station table and one
//! session's selection
//!
//! [`render`] is pure: handlers mutate the [`SelectionState`] first and then
//! call it, so a page and every fragment come from the same projection.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::selection::{Candidate, SelectionState};
use crate::stations::{
    format_date_day_first, format_date_month_first, format_number, or_not_available, StationIndex,
    StationRecord, NOT_AVAILABLE,
};

pub const EMPTY_PARTITION_WARNING: &str = "No sites available for the selected station type.";

pub const HIGHLIGHT_COLOUR: &str = "#d62728";
pub const MARKER_COLOUR: &str = "#1f77b4";

/// Province colours for the clustered map, reused once exhausted
pub const PROVINCE_PALETTE: [&str; 26] = [
    "#AA0DFE", "#3283FE", "#85660D", "#782AB6", "#565656", "#1C8356", "#16FF32", "#F7E1A0",
    "#E2E2E2", "#1CBE4F", "#C4451C", "#DEA0FD", "#FE00FA", "#325A9B", "#FEAF16", "#F8A19F",
    "#90AD1C", "#F6222E", "#1CFFCE", "#2ED9FF", "#B10DA1", "#C075A6", "#FC1CBF", "#B00068",
    "#FBE426", "#FA0087",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    #[default]
    Individual,
    Clustered,
}

impl MapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapMode::Individual => "individual",
            MapMode::Clustered => "clustered",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Map,
    StaticMap,
    Statistics,
    Directory,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Map, Tab::StaticMap, Tab::Statistics, Tab::Directory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Map => "map",
            Tab::StaticMap => "static_map",
            Tab::Statistics => "statistics",
            Tab::Directory => "directory",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Map => "🗺️ Interactive Map",
            Tab::StaticMap => "🎯 Static Map",
            Tab::Statistics => "📊 Statistics",
            Tab::Directory => "📋 Station Directory",
        }
    }
}

/// View options carried in the query string and in every selection form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default)]
    pub mode: MapMode,
    #[serde(default)]
    pub tab: Tab,
}

impl DashboardQuery {
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref()
    }

    pub fn with_tab(&self, tab: Tab) -> Self {
        Self {
            tab,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: MapMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }
}

pub fn station_type_icon(station_type: &str) -> &'static str {
    match station_type {
        "AAWS" => "🌾",
        "AWS" => "🌦️",
        "ARG" => "🌧️",
        "ASRS" => "☀️",
        "IKRO" => "🌱",
        _ => "📡",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_sites: usize,
    pub provinces_covered: usize,
    /// Earliest install date, `dd/mm/yyyy`
    pub active_since: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub station_type: String,
    pub icon: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOption {
    pub station_type: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub display: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub station_type: String,
    pub station_id: String,
    pub name: String,
    pub province: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: String,
    pub install_date: String,
    pub vendor: String,
    pub address: String,
    pub colour: &'static str,
    pub highlighted: bool,
}

impl Marker {
    fn new(record: &StationRecord, colour: &'static str, highlighted: bool) -> Self {
        Self {
            station_type: record.station_type.clone(),
            station_id: record.station_id.to_string(),
            name: record.name_or_placeholder().to_string(),
            province: or_not_available(&record.province).to_string(),
            district: or_not_available(&record.district).to_string(),
            latitude: record.latitude,
            longitude: record.longitude,
            elevation: optional_number(record.elevation),
            install_date: format_date_month_first(record.install_date),
            vendor: or_not_available(&record.vendor).to_string(),
            address: or_not_available(&record.address).to_string(),
            colour,
            highlighted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceCluster {
    pub province: String,
    pub colour: &'static str,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapLayer {
    Individual(Vec<Marker>),
    Clustered(Vec<ProvinceCluster>),
}

impl MapLayer {
    pub fn markers(&self) -> Box<dyn Iterator<Item = &Marker> + '_> {
        match self {
            MapLayer::Individual(markers) => Box::new(markers.iter()),
            MapLayer::Clustered(clusters) => {
                Box::new(clusters.iter().flat_map(|cluster| cluster.markers.iter()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceCount {
    pub province: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorShare {
    pub vendor: String,
    pub count: usize,
    /// Percentage of the stations that name a vendor
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeographicCoverage {
    pub northernmost: f64,
    pub southernmost: f64,
    pub easternmost: f64,
    pub westernmost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdministrativeCoverage {
    pub provinces: usize,
    pub districts: usize,
    pub subdistricts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub provinces: Vec<ProvinceCount>,
    pub vendors: Vec<VendorShare>,
    /// `None` for an empty table
    pub geographic: Option<GeographicCoverage>,
    pub administrative: AdministrativeCoverage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRow {
    pub station_type: String,
    pub station_id: String,
    pub name: String,
    pub province: String,
    pub district: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub install_date: String,
    pub vendor: String,
}

impl From<&StationRecord> for DirectoryRow {
    fn from(record: &StationRecord) -> Self {
        Self {
            station_type: record.station_type.clone(),
            station_id: record.station_id.to_string(),
            name: record.name_or_placeholder().to_string(),
            province: or_not_available(&record.province).to_string(),
            district: or_not_available(&record.district).to_string(),
            latitude: format!("{:.3}", record.latitude),
            longitude: format!("{:.3}", record.longitude),
            elevation: optional_number(record.elevation),
            install_date: format_date_day_first(record.install_date),
            vendor: or_not_available(&record.vendor).to_string(),
        }
    }
}

/// Selected station panel; every missing field is already the placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct StationDetail {
    pub station_type: String,
    pub station_id: String,
    pub name: String,
    pub operational_status: String,
    pub transport_type: String,
    pub province: String,
    pub district: String,
    pub subdistrict: String,
    pub village: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub agency: String,
    pub install_date: String,
    pub vendor: String,
    pub phone: String,
    pub address: String,
    /// Confirmed from the map while a different type is active
    pub outside_active_type: bool,
}

impl StationDetail {
    fn new(record: &StationRecord, active_type: &str) -> Self {
        Self {
            station_type: record.station_type.clone(),
            station_id: record.station_id.to_string(),
            name: record.name_or_placeholder().to_string(),
            operational_status: or_not_available(&record.operational_status).to_string(),
            transport_type: or_not_available(&record.transport_type).to_string(),
            province: or_not_available(&record.province).to_string(),
            district: or_not_available(&record.district).to_string(),
            subdistrict: or_not_available(&record.subdistrict).to_string(),
            village: or_not_available(&record.village).to_string(),
            latitude: record.latitude.to_string(),
            longitude: record.longitude.to_string(),
            elevation: record
                .elevation
                .map(|e| format!("{} m", format_number(e)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            agency: or_not_available(&record.agency).to_string(),
            install_date: format_date_month_first(record.install_date),
            vendor: or_not_available(&record.vendor).to_string(),
            phone: or_not_available(&record.phone).to_string(),
            address: or_not_available(&record.address).to_string(),
            outside_active_type: record.station_type != active_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub query: DashboardQuery,
    pub active_type: String,
    pub metrics: Metrics,
    pub type_summary: Vec<TypeSummary>,
    pub type_options: Vec<TypeOption>,
    pub picker: Vec<PickerOption>,
    pub map: MapLayer,
    pub pending: Option<Candidate>,
    pub statistics: Statistics,
    pub directory: Vec<DirectoryRow>,
    pub detail: Option<StationDetail>,
    pub warning: Option<&'static str>,
}

/// Project the table and a selection into the dashboard view
///
/// An empty active partition produces the warning and disables the detail
/// panel and the map highlight instead of failing.
pub fn render(
    index: &StationIndex,
    selection: &SelectionState,
    query: &DashboardQuery,
) -> DashboardView {
    let active_type = selection.active_type();
    let partition = index.filter_by_type(active_type);
    let selected = selection
        .resolve(index)
        .filter(|_| !partition.is_empty());

    let map = match query.mode {
        MapMode::Individual => MapLayer::Individual(individual_markers(&partition, selected)),
        MapMode::Clustered => MapLayer::Clustered(province_clusters(&partition)),
    };

    DashboardView {
        query: query.clone(),
        active_type: active_type.to_string(),
        metrics: metrics(index),
        type_summary: type_summary(index),
        type_options: index
            .station_types()
            .iter()
            .map(|station_type| TypeOption {
                station_type: station_type.clone(),
                active: station_type == active_type,
            })
            .collect(),
        picker: picker_options(&partition, selection),
        map,
        pending: selection.pending().cloned(),
        statistics: statistics(index),
        directory: directory(index, query.search_term()),
        detail: selected.map(|record| StationDetail::new(record, active_type)),
        warning: partition.is_empty().then_some(EMPTY_PARTITION_WARNING),
    }
}

pub fn metrics(index: &StationIndex) -> Metrics {
    let records = index.records();
    Metrics {
        total_sites: records.len(),
        provinces_covered: count_distinct(records.iter().map(|r| r.province.as_deref())),
        active_since: format_date_day_first(records.iter().filter_map(|r| r.install_date).min()),
    }
}

/// Station count per type, types sorted by name
pub fn type_summary(index: &StationIndex) -> Vec<TypeSummary> {
    index
        .records()
        .iter()
        .map(|r| r.station_type.as_str())
        .counts()
        .into_iter()
        .sorted()
        .map(|(station_type, count)| TypeSummary {
            station_type: station_type.to_string(),
            icon: station_type_icon(station_type),
            count,
        })
        .collect()
}

/// Display names of the active partition; the option matching the selected
/// id is marked, otherwise the first one
pub fn picker_options(partition: &[&StationRecord], selection: &SelectionState) -> Vec<PickerOption> {
    let chosen = partition
        .iter()
        .position(|r| &r.station_id == selection.selected_id())
        .unwrap_or(0);

    partition
        .iter()
        .enumerate()
        .map(|(position, record)| PickerOption {
            display: record.display_name(),
            selected: position == chosen,
        })
        .collect()
}

fn individual_markers(
    partition: &[&StationRecord],
    selected: Option<&StationRecord>,
) -> Vec<Marker> {
    let is_selected = |record: &StationRecord| selected.is_some_and(|s| s.is_same_station(record));

    let mut markers: Vec<Marker> = partition
        .iter()
        .map(|&record| {
            if is_selected(record) {
                Marker::new(record, HIGHLIGHT_COLOUR, true)
            } else {
                Marker::new(record, MARKER_COLOUR, false)
            }
        })
        .collect();

    // A confirmed map pick from another type is still drawn
    if let Some(record) = selected {
        if !partition.iter().any(|r| r.is_same_station(record)) {
            markers.push(Marker::new(record, HIGHLIGHT_COLOUR, true));
        }
    }
    markers
}

fn province_clusters(partition: &[&StationRecord]) -> Vec<ProvinceCluster> {
    let provinces: BTreeSet<&str> = partition
        .iter()
        .map(|r| or_not_available(&r.province))
        .collect();

    provinces
        .into_iter()
        .enumerate()
        .map(|(position, province)| {
            let colour = PROVINCE_PALETTE[position % PROVINCE_PALETTE.len()];
            ProvinceCluster {
                province: province.to_string(),
                colour,
                markers: partition
                    .iter()
                    .filter(|r| or_not_available(&r.province) == province)
                    .map(|r| Marker::new(r, colour, false))
                    .collect(),
            }
        })
        .collect()
}

pub fn statistics(index: &StationIndex) -> Statistics {
    let records = index.records();

    let provinces = records
        .iter()
        .filter_map(|r| r.province.as_deref())
        .counts()
        .into_iter()
        .map(|(province, count)| ProvinceCount {
            province: province.to_string(),
            count,
        })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.province.cmp(&b.province)))
        .collect();

    let vendor_counts = records.iter().filter_map(|r| r.vendor.as_deref()).counts();
    let with_vendor: usize = vendor_counts.values().sum();
    let vendors = vendor_counts
        .into_iter()
        .map(|(vendor, count)| VendorShare {
            vendor: vendor.to_string(),
            count,
            share: count as f64 * 100.0 / with_vendor as f64,
        })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.vendor.cmp(&b.vendor)))
        .collect();

    let geographic = (!records.is_empty()).then(|| GeographicCoverage {
        northernmost: records.iter().map(|r| r.latitude).fold(f64::MIN, f64::max),
        southernmost: records.iter().map(|r| r.latitude).fold(f64::MAX, f64::min),
        easternmost: records.iter().map(|r| r.longitude).fold(f64::MIN, f64::max),
        westernmost: records.iter().map(|r| r.longitude).fold(f64::MAX, f64::min),
    });

    Statistics {
        provinces,
        vendors,
        geographic,
        administrative: AdministrativeCoverage {
            provinces: count_distinct(records.iter().map(|r| r.province.as_deref())),
            districts: count_distinct(records.iter().map(|r| r.district.as_deref())),
            subdistricts: count_distinct(records.iter().map(|r| r.subdistrict.as_deref())),
        },
    }
}

/// Search results ordered by station id, integer ids numerically first
pub fn directory(index: &StationIndex, term: Option<&str>) -> Vec<DirectoryRow> {
    index
        .search(term)
        .into_iter()
        .sorted_by(|a, b| a.station_id.sort_key().cmp(&b.station_id.sort_key()))
        .map(DirectoryRow::from)
        .collect()
}

fn count_distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> usize {
    values.flatten().unique().count()
}

fn optional_number(value: Option<f64>) -> String {
    value
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
