use maud::{html, Markup};

use crate::templates::components::view_state_inputs;
use crate::view::DashboardView;

/// Type summary, type filter and station picker
pub fn sidebar(view: &DashboardView) -> Markup {
    html! {
        aside class="box sidebar" {
            p class="menu-label" { "📊 Station Type Summary" }
            ul class="type-summary mb-4" {
                @for summary in &view.type_summary {
                    li {
                        (summary.icon) " "
                        strong { (summary.station_type) }
                        ": " (summary.count) " sites"
                    }
                }
            }

            p class="menu-label" { "🧭 Station Filtering" }
            form id="type-filter"
                method="post"
                action="/selection/type"
                hx-post="/selection/type"
                hx-trigger="change"
                hx-target="#dashboard"
                hx-swap="outerHTML" {
                (view_state_inputs(&view.query))
                div class="field" {
                    label class="label is-small" { "Select Station Type" }
                    div class="control" {
                        @for option in &view.type_options {
                            label class="radio is-block ml-0" {
                                input type="radio"
                                    name="station_type"
                                    value=(option.station_type)
                                    checked[option.active];
                                " " (option.station_type)
                            }
                        }
                    }
                }
                noscript {
                    button type="submit" class="button is-small" { "Apply" }
                }
            }

            @if let Some(warning) = view.warning {
                div class="notification is-warning is-light mt-3" { (warning) }
            } @else {
                form id="station-picker"
                    method="post"
                    action="/selection/pick"
                    hx-post="/selection/pick"
                    hx-trigger="change"
                    hx-target="#dashboard"
                    hx-swap="outerHTML" {
                    (view_state_inputs(&view.query))
                    div class="field mt-3" {
                        label class="label is-small" for="display" {
                            "Select Site for Detailed Analysis:"
                        }
                        div class="control" {
                            div class="select is-small is-fullwidth" {
                                select id="display" name="display" {
                                    @for option in &view.picker {
                                        option value=(option.display) selected[option.selected] {
                                            (option.display)
                                        }
                                    }
                                }
                            }
                        }
                    }
                    noscript {
                        button type="submit" class="button is-small" { "Select" }
                    }
                }
            }
        }
    }
}
