mod export;
mod layouts;

pub use export::{export_csv_handler, export_workbook_handler, ExportQuery};
pub use layouts::{layout_download_handler, layout_image_handler};

use axum::http::{HeaderValue, StatusCode};
use hyper::{
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    HeaderMap,
};
use log::error;

use crate::routes::HandlerError;

/// Response headers for a file served inline or as an attachment
fn file_headers(content_type: &str, attachment: Option<&str>) -> Result<HeaderMap, HandlerError> {
    let invalid = |e: axum::http::header::InvalidHeaderValue| {
        error!("error building file response headers: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to build response headers".to_string(),
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).map_err(invalid)?);
    if let Some(file_name) = attachment {
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
                .map_err(invalid)?,
        );
    }
    Ok(headers)
}
