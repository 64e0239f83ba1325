pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use layouts::PageConfig;
pub use pages::{dashboard_content, dashboard_page};
