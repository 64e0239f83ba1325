use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use time::{macros::format_description, Date};

/// Rendered wherever an optional field has no value
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator between id and name in a display name
pub const DISPLAY_SEPARATOR: &str = " - ";

/// Station identifier in canonical string form
///
/// Workbooks store ids either as text or as numbers; both end up here as the
/// same string so comparisons never depend on the cell type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Canonicalize a textual id: surrounding whitespace is dropped and a
    /// float rendering of an integer ("10001.0") collapses to "10001".
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if let Some((whole, fraction)) = trimmed.split_once('.') {
            let integral = !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && !fraction.is_empty()
                && fraction.chars().all(|c| c == '0');
            if integral {
                return Self(whole.to_string());
            }
        }
        Self(trimmed.to_string())
    }

    /// Canonicalize a numeric cell value
    pub fn from_number(value: f64) -> Self {
        Self(format_number(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sort key that orders integer ids numerically ahead of other ids
    pub fn sort_key(&self) -> (bool, i64, &str) {
        let numeric = self.0.parse::<i64>().ok();
        (numeric.is_none(), numeric.unwrap_or_default(), &self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Integral floats print without a fractional part, everything else as-is
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One physical monitoring site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Sheet the record came from (AWS, AAWS, ARG, ASRS, IKRO, ...)
    pub station_type: String,
    pub station_id: StationId,
    pub name: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub village: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub operational_status: Option<String>,
    pub phone: Option<String>,
    #[serde(serialize_with = "serialize_iso_date")]
    pub install_date: Option<Date>,
    pub address: Option<String>,
    pub transport_type: Option<String>,
    pub agency: Option<String>,
    pub vendor: Option<String>,
}

impl StationRecord {
    /// `"{id} - {name}"`, the string a human picks a station by
    pub fn display_name(&self) -> String {
        format!(
            "{}{}{}",
            self.station_id,
            DISPLAY_SEPARATOR,
            or_not_available(&self.name)
        )
    }

    pub fn is_same_station(&self, other: &StationRecord) -> bool {
        self.station_type == other.station_type && self.station_id == other.station_id
    }

    pub fn name_or_placeholder(&self) -> &str {
        or_not_available(&self.name)
    }
}

/// Field value or the placeholder
pub fn or_not_available(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn serialize_iso_date<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    match date.map(|d| d.format(format_description!("[year]-[month]-[day]"))) {
        Some(Ok(formatted)) => serializer.serialize_some(&formatted),
        Some(Err(e)) => Err(serde::ser::Error::custom(e)),
        None => serializer.serialize_none(),
    }
}

/// `dd/mm/yyyy`, used by the directory and the "Active Since" metric
pub fn format_date_day_first(date: Option<Date>) -> String {
    date.and_then(|d| d.format(format_description!("[day]/[month]/[year]")).ok())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `mm/dd/yyyy`, used by map popups and the detail panel
pub fn format_date_month_first(date: Option<Date>) -> String {
    date.and_then(|d| d.format(format_description!("[month]/[day]/[year]")).ok())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
