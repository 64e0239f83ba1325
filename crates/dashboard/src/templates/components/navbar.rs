use maud::{html, Markup};

use super::view_state_vals;
use crate::view::{DashboardQuery, MapMode, Tab};

/// Tab bar with HTMX-powered navigation; the whole dashboard is re-rendered
/// so the sidebar and the view state stay in step
pub fn navbar(query: &DashboardQuery) -> Markup {
    html! {
        div class="tabs is-boxed mb-4" {
            ul {
                @for tab in Tab::ALL {
                    li class=(tab_class(query.tab, tab)) {
                        a href=(format!("/?tab={}&mode={}", tab.as_str(), query.mode.as_str()))
                          hx-get="/"
                          hx-vals=(view_state_vals(&query.with_tab(tab)))
                          hx-target="#dashboard"
                          hx-swap="outerHTML"
                          hx-push-url="true" {
                            (tab.title())
                        }
                    }
                }
            }
        }
    }
}

fn tab_class(current: Tab, tab: Tab) -> &'static str {
    if current == tab {
        "is-active"
    } else {
        ""
    }
}

/// Individual / clustered marker switch for the interactive map
pub fn map_mode_toggle(query: &DashboardQuery) -> Markup {
    html! {
        div class="buttons has-addons mb-2" {
            @for (mode, label) in [
                (MapMode::Individual, "Individual Markers"),
                (MapMode::Clustered, "Clustered Markers"),
            ] {
                a class=(mode_class(query.mode, mode))
                  href=(format!("/?tab={}&mode={}", query.tab.as_str(), mode.as_str()))
                  hx-get="/"
                  hx-vals=(view_state_vals(&query.with_mode(mode)))
                  hx-target="#dashboard"
                  hx-swap="outerHTML"
                  hx-push-url="true" {
                    (label)
                }
            }
        }
    }
}

fn mode_class(current: MapMode, mode: MapMode) -> &'static str {
    if current == mode {
        "button is-small is-link is-selected"
    } else {
        "button is-small"
    }
}
