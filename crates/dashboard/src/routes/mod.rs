mod errors;
pub mod files;
pub mod stations;
pub mod ui;

pub use errors::*;
pub use files::*;
pub use stations::*;
pub use ui::*;
