use maud::{html, Markup};

use crate::view::{ProvinceCount, Statistics, VendorShare};

/// Network statistics tab
pub fn statistics(stats: &Statistics) -> Markup {
    html! {
        div class="box" {
            h2 class="title is-5 mb-4" { "📈 Network Statistics" }

            div class="columns" {
                div class="column" {
                    h3 class="subtitle is-6" { "Sites Distribution by Province" }
                    (province_bars(&stats.provinces))
                }
                div class="column" {
                    h3 class="subtitle is-6" { "Equipment Brand Distribution" }
                    (vendor_shares(&stats.vendors))
                }
            }
        }

        div class="box" {
            h2 class="title is-5 mb-4" { "📊 Network Summary" }

            div class="columns" {
                div class="column" {
                    div class="notification is-info is-light" {
                        p { strong { "Geographic Coverage:" } }
                        @if let Some(geo) = &stats.geographic {
                            ul {
                                li { strong { "Northernmost: " } (format!("{:.3}°", geo.northernmost)) }
                                li { strong { "Southernmost: " } (format!("{:.3}°", geo.southernmost)) }
                                li { strong { "Easternmost: " } (format!("{:.3}°", geo.easternmost)) }
                                li { strong { "Westernmost: " } (format!("{:.3}°", geo.westernmost)) }
                            }
                        } @else {
                            p { "No stations loaded." }
                        }
                    }
                }
                div class="column" {
                    div class="notification is-info is-light" {
                        p { strong { "Administrative Coverage:" } }
                        ul {
                            li { strong { "Provinces: " } (stats.administrative.provinces) }
                            li { strong { "Districts: " } (stats.administrative.districts) }
                            li { strong { "Sub-districts: " } (stats.administrative.subdistricts) }
                        }
                    }
                }
            }
        }
    }
}

fn province_bars(provinces: &[ProvinceCount]) -> Markup {
    let largest = provinces.iter().map(|p| p.count).max().unwrap_or(1).max(1);
    html! {
        @if provinces.is_empty() {
            p class="has-text-grey" { "No province data available." }
        } @else {
            div class="bar-chart" {
                @for province in provinces {
                    div class="bar-row" {
                        span class="bar-label" { (province.province) }
                        span class="bar-track" {
                            span class="bar-fill"
                                style=(format!("width: {:.1}%", province.count as f64 * 100.0 / largest as f64)) {}
                        }
                        span class="bar-value" { (province.count) }
                    }
                }
            }
        }
    }
}

fn vendor_shares(vendors: &[VendorShare]) -> Markup {
    html! {
        @if vendors.is_empty() {
            p class="has-text-grey" { "No vendor data available." }
        } @else {
            table class="table is-fullwidth is-narrow" {
                thead {
                    tr {
                        th { "Vendor" }
                        th class="has-text-right" { "Sites" }
                        th class="has-text-right" { "Share" }
                    }
                }
                tbody {
                    @for vendor in vendors {
                        tr {
                            td { (vendor.vendor) }
                            td class="has-text-right" { (vendor.count) }
                            td class="has-text-right" { (format!("{:.1}%", vendor.share)) }
                        }
                    }
                }
            }
        }
    }
}
