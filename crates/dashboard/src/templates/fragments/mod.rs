mod directory;
mod layout_image;
mod metrics;
mod sidebar;
pub mod station_map;
mod station_detail;
mod statistics;

pub use directory::{directory, directory_table};
pub use layout_image::layout_image;
pub use metrics::metrics_bar;
pub use sidebar::sidebar;
pub use station_detail::station_detail;
pub use station_map::{lat_lon_to_svg, pending_candidate, station_map, svg_to_lat_lon};
pub use statistics::statistics;
