use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};
use obsnet_core::path_exists;
use time::{macros::date, macros::format_description, Date, Duration};

use super::record::{format_number, StationId, StationRecord};

pub const COL_ID: &str = "id_station";
pub const COL_NAME: &str = "name_station";
pub const COL_PROVINCE: &str = "nama_propinsi";
pub const COL_DISTRICT: &str = "nama_kota";
pub const COL_SUBDISTRICT: &str = "kecamatan";
pub const COL_VILLAGE: &str = "kelurahan";
pub const COL_LATITUDE: &str = "latt_station";
pub const COL_LONGITUDE: &str = "long_station";
pub const COL_ELEVATION: &str = "elv_station";
pub const COL_STATUS: &str = "status_operasional";
pub const COL_PHONE: &str = "hp_petugas";
pub const COL_INSTALL_DATE: &str = "tgl_pasang";
pub const COL_ADDRESS: &str = "addr_instansi";
pub const COL_TRANSPORT: &str = "data_transport";
pub const COL_AGENCY: &str = "instansi";
pub const COL_VENDOR: &str = "nama_vendor";

/// Column added to exports holding the sheet name
pub const COL_STATION_TYPE: &str = "JENIS";

/// Columns every sheet must carry, in projection order
pub const REQUIRED_COLUMNS: [&str; 16] = [
    COL_ID,
    COL_NAME,
    COL_PROVINCE,
    COL_DISTRICT,
    COL_SUBDISTRICT,
    COL_VILLAGE,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_ELEVATION,
    COL_STATUS,
    COL_PHONE,
    COL_INSTALL_DATE,
    COL_ADDRESS,
    COL_TRANSPORT,
    COL_AGENCY,
    COL_VENDOR,
];

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Workbook not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("Failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: &'static str },
}

/// Every sheet's surviving rows, concatenated in sheet order then row order
#[derive(Debug, Clone, Default)]
pub struct UnifiedTable {
    /// Sheet names in workbook order, including sheets left without rows
    pub station_types: Vec<String>,
    pub records: Vec<StationRecord>,
}

/// Rows projected out of one sheet
#[derive(Debug)]
pub struct SheetProjection {
    pub records: Vec<StationRecord>,
    /// Rows skipped because latitude or longitude was missing
    pub dropped: usize,
}

/// Read every sheet of the workbook at `path` into one table
pub fn load(path: &Path) -> Result<UnifiedTable, LoadError> {
    if !path_exists(path) {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut table = UnifiedTable::default();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|source| LoadError::Sheet {
                sheet: sheet.clone(),
                source,
            })?;
        let projection = project_sheet(&sheet, &range)?;
        info!(
            "sheet '{}': {} stations loaded, {} rows without coordinates dropped",
            sheet,
            projection.records.len(),
            projection.dropped
        );
        table.records.extend(projection.records);
        table.station_types.push(sheet);
    }

    info!(
        "loaded {} stations across {} station types from {}",
        table.records.len(),
        table.station_types.len(),
        path.display()
    );
    Ok(table)
}

/// Project the required columns out of one sheet
///
/// The first row of `range` is the header. Rows without both coordinates are
/// skipped and counted, never defaulted.
pub fn project_sheet(sheet: &str, range: &Range<Data>) -> Result<SheetProjection, LoadError> {
    let mut rows = range.rows();
    let header: HashMap<String, usize> = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .enumerate()
                .filter_map(|(idx, cell)| text(cell).map(|name| (name, idx)))
                .collect()
        })
        .unwrap_or_default();

    let mut columns = HashMap::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let idx = header
            .get(column)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn {
                sheet: sheet.to_string(),
                column,
            })?;
        columns.insert(column, idx);
    }
    let cell = |row: &[Data], column: &str| -> Option<Data> {
        columns
            .get(column)
            .and_then(|idx| row.get(*idx))
            .cloned()
    };

    let mut projection = SheetProjection {
        records: Vec::new(),
        dropped: 0,
    };
    for row in rows {
        let latitude = cell(row, COL_LATITUDE).as_ref().and_then(number);
        let longitude = cell(row, COL_LONGITUDE).as_ref().and_then(number);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            projection.dropped += 1;
            continue;
        };

        let station_id = cell(row, COL_ID)
            .as_ref()
            .map(id_value)
            .unwrap_or_default();
        if station_id.as_str().is_empty() {
            debug!("sheet '{}': station without an id at {}, {}", sheet, latitude, longitude);
        }

        let field = |column: &str| cell(row, column).as_ref().and_then(text);
        projection.records.push(StationRecord {
            station_type: sheet.to_string(),
            station_id,
            name: field(COL_NAME),
            province: field(COL_PROVINCE),
            district: field(COL_DISTRICT),
            subdistrict: field(COL_SUBDISTRICT),
            village: field(COL_VILLAGE),
            latitude,
            longitude,
            elevation: cell(row, COL_ELEVATION).as_ref().and_then(number),
            operational_status: field(COL_STATUS),
            phone: field(COL_PHONE),
            install_date: cell(row, COL_INSTALL_DATE).as_ref().and_then(date_value),
            address: field(COL_ADDRESS),
            transport_type: field(COL_TRANSPORT),
            agency: field(COL_AGENCY),
            vendor: field(COL_VENDOR),
        });
    }

    Ok(projection)
}

fn id_value(cell: &Data) -> StationId {
    match cell {
        Data::Int(v) => StationId::new(v.to_string()),
        Data::Float(v) => StationId::from_number(*v),
        other => text(other).map(StationId::new).unwrap_or_default(),
    }
}

/// Cell as text; blanks and error cells are absent
fn text(cell: &Data) -> Option<String> {
    let value = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_number(*v),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
    };
    (!value.is_empty()).then_some(value)
}

/// Cell as a finite number; text is parsed, anything else is absent
fn number(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(v) => *v,
        Data::Int(v) => *v as f64,
        Data::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

fn date_value(cell: &Data) -> Option<Date> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Float(v) => excel_serial_to_date(*v),
        Data::Int(v) => excel_serial_to_date(*v as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    }
}

/// Excel's 1900 date system, counted from 1899-12-30
fn excel_serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    date!(1899 - 12 - 30).checked_add(Duration::days(serial.floor() as i64))
}

fn parse_date_text(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    // ISO timestamps carry a time part after the date
    let head = raw.get(..10).unwrap_or(raw);
    Date::parse(head, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(head, format_description!("[day]/[month]/[year]")))
        .ok()
        .or_else(|| {
            debug!("unrecognised install date '{}'", raw);
            None
        })
}
