pub mod dashboard;

pub use dashboard::{dashboard_content, dashboard_page};
