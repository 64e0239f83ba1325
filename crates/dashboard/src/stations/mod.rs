pub mod index;
pub mod loader;
pub mod record;
pub mod store;

pub use index::{parse_display_name, IndexError, StationIndex};
pub use loader::{load, project_sheet, LoadError, SheetProjection, UnifiedTable, REQUIRED_COLUMNS};
pub use record::{
    format_date_day_first, format_date_month_first, format_number, or_not_available, StationId,
    StationRecord, NOT_AVAILABLE,
};
pub use store::{Error as StoreError, Snapshot, StationData, StationStore};
