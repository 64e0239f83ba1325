use maud::{html, Markup};

use crate::assets::LayoutStatus;
use crate::templates::{
    components::{map_mode_toggle, navbar},
    fragments::{
        directory, layout_image, metrics_bar, pending_candidate, sidebar, station_detail,
        station_map, statistics,
    },
    layouts::{base, PageConfig},
};
use crate::view::{DashboardView, Tab};

/// Dashboard page - sidebar plus the active tab
pub fn dashboard_page(
    api_base: &str,
    view: &DashboardView,
    layout: Option<&LayoutStatus>,
) -> Markup {
    let config = PageConfig {
        title: "Indonesia Observation Network",
        api_base,
    };

    base(&config, dashboard_content(view, layout))
}

/// Dashboard content - used for the full page and swapped in place by every
/// HTMX interaction. `layout` is only looked up for the static map tab.
pub fn dashboard_content(view: &DashboardView, layout: Option<&LayoutStatus>) -> Markup {
    html! {
        div id="dashboard" class="columns" {
            div class="column is-3" {
                (sidebar(view))
            }
            div class="column" {
                (navbar(&view.query))
                @match view.query.tab {
                    Tab::Map => { (map_tab(view)) }
                    Tab::StaticMap => {
                        @if let Some(layout) = layout {
                            (layout_image(layout))
                        }
                    }
                    Tab::Statistics => { (statistics(&view.statistics)) }
                    Tab::Directory => { (directory(&view.directory, &view.query)) }
                }
            }
        }
    }
}

fn map_tab(view: &DashboardView) -> Markup {
    html! {
        h2 class="title is-5" { "🌍 Indonesia Observation Sites Map" }
        (metrics_bar(&view.metrics))
        (map_mode_toggle(&view.query))
        (station_map(&view.map, &view.query))
        (pending_candidate(view.pending.as_ref(), &view.query))
        @if view.warning.is_some() {
            div class="notification is-info is-light" { "Please select a different station type." }
        }
        (station_detail(view.detail.as_ref()))
    }
}
