mod navbar;
mod view_state;

pub use navbar::{map_mode_toggle, navbar};
pub use view_state::{view_state_inputs, view_state_vals};
