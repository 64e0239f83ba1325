mod dashboard;
mod fragments;
mod selection;

pub use dashboard::dashboard_handler;
pub use fragments::directory_fragment_handler;
pub use selection::{
    confirm_handler, dismiss_handler, pick_handler, spatial_handler, type_handler, SelectionForm,
};
