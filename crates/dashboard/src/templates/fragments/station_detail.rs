use maud::{html, Markup};

use crate::view::StationDetail;

/// Selected station panel
pub fn station_detail(detail: Option<&StationDetail>) -> Markup {
    html! {
        div id="station-detail" class="box" {
            @if let Some(detail) = detail {
                h2 class="subtitle" {
                    "📍 " (detail.name)
                    @if detail.outside_active_type {
                        span class="tag is-warning is-light ml-2" { (detail.station_type) " station" }
                    }
                }
                div class="columns" {
                    div class="column" {
                        p { strong { "Basic Information:" } }
                        ul {
                            li { strong { "Station ID: " } (detail.station_id) }
                            li { strong { "Station Name: " } (detail.name) }
                            li { strong { "Station Type: " } (detail.station_type) }
                            li { strong { "Operational Status: " } (detail.operational_status) }
                            li { strong { "Data Transport Type: " } (detail.transport_type) }
                        }
                        p class="mt-3" { strong { "Location:" } }
                        ul {
                            li { strong { "Province: " } (detail.province) }
                            li { strong { "District: " } (detail.district) }
                            li { strong { "Sub-district: " } (detail.subdistrict) }
                            li { strong { "Village: " } (detail.village) }
                        }
                    }
                    div class="column" {
                        p { strong { "🌍 Coordinates:" } }
                        ul {
                            li { strong { "Latitude: " } (detail.latitude) "°" }
                            li { strong { "Longitude: " } (detail.longitude) "°" }
                            li { strong { "Elevation: " } (detail.elevation) }
                        }
                        p class="mt-3" { strong { "Administrative:" } }
                        ul {
                            li { strong { "Agency: " } (detail.agency) }
                            li { strong { "Procurement Date: " } (detail.install_date) }
                            li { strong { "Vendor: " } (detail.vendor) }
                            li { strong { "Officer Phone Number: " } (detail.phone) }
                        }
                        p class="mt-3" { strong { "Address:" } }
                        p { (detail.address) }
                    }
                }
            } @else {
                p class="has-text-grey" { "Please select a different station type." }
            }
        }
    }
}
