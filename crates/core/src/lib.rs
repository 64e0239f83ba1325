//! obsnet core library
//!
//! Shared, framework-free pieces of the observation network dashboard:
//! - Configuration discovery and loading (XDG-compliant)
//! - File system helpers
//! - Application constants

mod config;
pub mod fs;

pub use config::{
    find_config_file, get_xdg_config_path, load_config, ConfigError, ConfigSource,
};
pub use fs::{file_fingerprint, is_file, path_exists, FileFingerprint};

/// Application name used for XDG paths
pub const APP_NAME: &str = "obsnet";

/// Default dashboard port
pub const DEFAULT_PORT: u16 = 9810;

/// Workbook read when nothing else is configured
pub const DEFAULT_WORKBOOK: &str = "Metadata ALL - Sheet.xlsx";

/// Station preselected for a fresh session
pub const DEFAULT_STATION_ID: &str = "10001";
