use csv::WriterBuilder;
use time::{macros::format_description, Date};

use crate::stations::{
    format_number,
    loader::{COL_STATION_TYPE, REQUIRED_COLUMNS},
    StationRecord,
};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("Failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to flush csv: {0}")]
    Io(#[from] std::io::Error),
}

/// `YYYYMMDD`, stamped into every download name
pub fn date_stamp(date: Date) -> String {
    date.format(format_description!("[year][month][day]"))
        .unwrap_or_else(|_| date.to_string().replace('-', ""))
}

pub fn csv_file_name(today: Date) -> String {
    format!("Observation_Station_Data_{}.csv", date_stamp(today))
}

pub fn workbook_file_name(today: Date) -> String {
    format!("Observation_Station_Data_{}.xlsx", date_stamp(today))
}

/// Header row: the workbook's own column names plus the station type
pub fn csv_headers() -> impl Iterator<Item = &'static str> {
    REQUIRED_COLUMNS.into_iter().chain([COL_STATION_TYPE])
}

/// Write records in the order given, missing values as empty cells
pub fn stations_csv<'a>(
    records: impl IntoIterator<Item = &'a StationRecord>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(csv_headers())?;

    for record in records {
        writer.write_record(csv_row(record))?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

fn csv_row(record: &StationRecord) -> [String; 17] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        record.station_id.to_string(),
        text(&record.name),
        text(&record.province),
        text(&record.district),
        text(&record.subdistrict),
        text(&record.village),
        record.latitude.to_string(),
        record.longitude.to_string(),
        record.elevation.map(format_number).unwrap_or_default(),
        text(&record.operational_status),
        text(&record.phone),
        record
            .install_date
            .and_then(|d| d.format(format_description!("[year]-[month]-[day]")).ok())
            .unwrap_or_default(),
        text(&record.address),
        text(&record.transport_type),
        text(&record.agency),
        text(&record.vendor),
        record.station_type.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::record::tests::record;
    use time::macros::date;

    #[test]
    fn file_names_carry_the_date() {
        let today = date!(2024 - 01 - 09);
        assert_eq!(csv_file_name(today), "Observation_Station_Data_20240109.csv");
        assert_eq!(workbook_file_name(today), "Observation_Station_Data_20240109.xlsx");
    }

    #[test]
    fn csv_has_source_headers_and_blank_missing_values() {
        let mut kemayoran = record("AWS", "10001", -6.155, 106.845);
        kemayoran.name = Some("Kemayoran, Jakarta".into());
        kemayoran.elevation = Some(4.0);
        kemayoran.install_date = Some(date!(2019 - 07 - 01));
        let medan = record("ARG", "7", 3.6, 98.7);

        let bytes = stations_csv([&kemayoran, &medan]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id_station,name_station,nama_propinsi"));
        assert!(lines[0].ends_with("nama_vendor,JENIS"));
        assert_eq!(
            lines[1],
            "10001,\"Kemayoran, Jakarta\",,,,,-6.155,106.845,4,,,2019-07-01,,,,,AWS"
        );
        assert_eq!(lines[2], "7,Station 7,,,,,3.6,98.7,,,,,,,,,ARG");
    }

    #[test]
    fn empty_export_still_has_headers() {
        let bytes = stations_csv(std::iter::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(csv_headers().count(), 17);
    }
}
