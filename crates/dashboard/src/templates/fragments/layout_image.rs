use maud::{html, Markup};

use crate::assets::LayoutStatus;

/// Static network layout image for the active station type
pub fn layout_image(status: &LayoutStatus) -> Markup {
    html! {
        div class="box" {
            h2 class="subtitle" { "🎯 Static Map for Selected Station Type" }
            @if status.available {
                figure class="image layout-image" {
                    img src=(format!("/layouts/{}", status.station_type))
                        alt=(format!("Layout {}", status.station_type));
                    figcaption class="has-text-centered is-size-7" {
                        "Static Map: " (status.file_name)
                    }
                }
                a class="button is-link is-small mt-3"
                  href=(format!("/layouts/{}/download", status.station_type)) {
                    "📥 Download Image (PNG)"
                }
            } @else {
                div class="notification is-warning is-light" {
                    "Image not found: " (status.file_name)
                }
            }
        }
    }
}
