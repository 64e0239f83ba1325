use maud::{html, Markup};

use crate::view::DashboardQuery;

/// Hidden inputs that carry the search term, map mode and tab through a
/// selection form
pub fn view_state_inputs(query: &DashboardQuery) -> Markup {
    html! {
        @if let Some(q) = &query.q {
            input type="hidden" name="q" value=(q);
        }
        input type="hidden" name="mode" value=(query.mode.as_str());
        input type="hidden" name="tab" value=(query.tab.as_str());
    }
}

/// The same view state as an `hx-vals` JSON object
pub fn view_state_vals(query: &DashboardQuery) -> String {
    serde_json::to_string(query).unwrap_or_else(|_| "{}".to_string())
}
