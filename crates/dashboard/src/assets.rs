use std::path::{Path, PathBuf};

use log::{debug, warn};
use obsnet_core::is_file;
use time::Date;

use crate::export::date_stamp;

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Whether a station type's layout image can be shown
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatus {
    pub station_type: String,
    pub file_name: String,
    pub available: bool,
}

/// Per-type network layout images, `Layout {type}.png` with an optional
/// `Layout {type} Tes.png` variant offered for download
///
/// A missing image is never an error: it is logged and reported as absent.
#[derive(Debug, Clone)]
pub struct LayoutImages {
    dir: PathBuf,
}

impl LayoutImages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(station_type: &str) -> String {
        format!("Layout {}.png", station_type)
    }

    pub fn variant_file_name(station_type: &str) -> String {
        format!("Layout {} Tes.png", station_type)
    }

    /// Image shown on the static map tab
    pub fn layout_path(&self, station_type: &str) -> Option<PathBuf> {
        let path = self.dir.join(Self::file_name(station_type));
        if is_file(&path) {
            Some(path)
        } else {
            warn!("Image not found: {}", path.display());
            None
        }
    }

    /// Image offered for download: the variant when present, else the
    /// regular layout
    pub fn download_path(&self, station_type: &str) -> Option<PathBuf> {
        let variant = self.dir.join(Self::variant_file_name(station_type));
        if is_file(&variant) {
            debug!("serving layout variant {}", variant.display());
            return Some(variant);
        }
        self.layout_path(station_type)
    }

    pub fn status(&self, station_type: &str) -> LayoutStatus {
        LayoutStatus {
            station_type: station_type.to_string(),
            file_name: Self::file_name(station_type),
            available: self.layout_path(station_type).is_some(),
        }
    }
}

/// `{type}_layout_YYYYMMDD.png`
pub fn layout_attachment_name(station_type: &str, today: Date) -> String {
    format!("{}_layout_{}.png", station_type, date_stamp(today))
}
