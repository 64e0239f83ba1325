use maud::{html, Markup};

use crate::view::{DashboardQuery, DirectoryRow};

/// Station directory tab: search box, table and exports
pub fn directory(rows: &[DirectoryRow], query: &DashboardQuery) -> Markup {
    html! {
        div class="box" {
            h2 class="title is-5 mb-4" { "📋 Complete Station Directory" }

            form method="get"
                action="/"
                hx-get="/"
                hx-target="#dashboard"
                hx-swap="outerHTML"
                hx-push-url="true" {
                input type="hidden" name="mode" value=(query.mode.as_str());
                input type="hidden" name="tab" value=(query.tab.as_str());
                div class="field" {
                    label class="label is-small" for="q" { "🔍 Search station by name or location:" }
                    div class="control" {
                        input id="q"
                            class="input is-small"
                            type="search"
                            name="q"
                            value=(query.q.as_deref().unwrap_or_default())
                            hx-get="/fragments/directory"
                            hx-trigger="keyup changed delay:300ms"
                            hx-target="#directory-table"
                            hx-swap="outerHTML";
                    }
                }
            }

            (directory_table(rows, query))
        }
    }
}

/// Table plus export links for the current search; also served on its own
/// for live search
pub fn directory_table(rows: &[DirectoryRow], query: &DashboardQuery) -> Markup {
    html! {
        div id="directory-table" {
            p class="is-size-7 has-text-grey mb-2" { (rows.len()) " stations" }
            div class="table-container" {
                table class="table is-fullwidth is-striped is-hoverable is-narrow" {
                    thead {
                        tr {
                            th { "Site ID" }
                            th { "Type" }
                            th { "Site Name" }
                            th { "Province" }
                            th { "District" }
                            th class="has-text-right" { "Latitude" }
                            th class="has-text-right" { "Longitude" }
                            th class="has-text-right" { "Elevation (m)" }
                            th { "Installation Date" }
                            th { "Equipment Brand" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { (row.station_id) }
                                td { (row.station_type) }
                                td { (row.name) }
                                td { (row.province) }
                                td { (row.district) }
                                td class="has-text-right" { (row.latitude) }
                                td class="has-text-right" { (row.longitude) }
                                td class="has-text-right" { (row.elevation) }
                                td { (row.install_date) }
                                td { (row.vendor) }
                            }
                        }
                    }
                }
            }

            div class="buttons mt-3" {
                form method="get" action="/export/stations.csv" {
                    @if let Some(q) = &query.q {
                        input type="hidden" name="q" value=(q);
                    }
                    button type="submit" class="button is-small is-link is-light" { "⬇️ Download CSV" }
                }
                a class="button is-small is-link is-light" href="/export/workbook" { "⬇️ Download XLSX" }
            }
        }
    }
}
