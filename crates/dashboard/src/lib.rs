//! obsnet: a web dashboard over the Indonesian observation station network
//!
//! Station metadata comes from one workbook with a sheet per station type.
//! The sheets are merged into a single table that backs an interactive map,
//! a static layout image per type, network statistics and a searchable
//! directory with CSV export. Each browser session keeps its own station
//! selection.

pub mod assets;
pub mod export;
pub mod routes;
pub mod selection;
pub mod session;
pub mod startup;
pub mod stations;
pub mod templates;
pub mod utils;
pub mod view;

pub use assets::{LayoutImages, LayoutStatus};
pub use export::{stations_csv, ExportError};
pub use routes::*;
pub use selection::{Candidate, SelectionDefaults, SelectionError, SelectionState};
pub use session::{session_cookie_header, SessionCookie, SessionStore, SESSION_COOKIE};
pub use startup::{app, build_app_state, AppState};
pub use stations::{
    IndexError, LoadError, Snapshot, StationData, StationId, StationIndex, StationRecord,
    StationStore, StoreError, UnifiedTable,
};
pub use utils::{get_config_info, get_log_level, resolve_config, setup_logger, Cli, ConfigInfo};
pub use view::{render, DashboardQuery, DashboardView, MapMode, Tab};
