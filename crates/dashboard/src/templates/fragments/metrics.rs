use maud::{html, Markup};

use crate::view::Metrics;

pub fn metrics_bar(metrics: &Metrics) -> Markup {
    html! {
        nav class="level box metrics" {
            div class="level-item has-text-centered" {
                div {
                    p class="heading" { "Total Sites" }
                    p class="title" { (metrics.total_sites) }
                }
            }
            div class="level-item has-text-centered" {
                div {
                    p class="heading" { "Provinces Covered" }
                    p class="title" { (metrics.provinces_covered) }
                }
            }
            div class="level-item has-text-centered" {
                div {
                    p class="heading" { "Active Since" }
                    p class="title" { (metrics.active_since) }
                }
            }
        }
    }
}
