use maud::{html, Markup, PreEscaped};

use crate::selection::Candidate;
use crate::templates::components::view_state_inputs;
use crate::view::{DashboardQuery, MapLayer, Marker, HIGHLIGHT_COLOUR, MARKER_COLOUR};

/// SVG viewBox size; the aspect ratio matches the bounding box below
pub const MAP_WIDTH: f64 = 940.0;
pub const MAP_HEIGHT: f64 = 360.0;

// Bounding box for the Indonesian archipelago
const NORTH: f64 = 6.5;
const SOUTH: f64 = -11.5;
const EAST: f64 = 141.5;
const WEST: f64 = 94.5;

/// Mercator projection for latitude
/// Formula: ln(tan(π/4 + lat*π/360))
fn mercator_lat(lat: f64) -> f64 {
    (std::f64::consts::PI / 4.0 + lat * std::f64::consts::PI / 360.0)
        .tan()
        .ln()
}

fn inverse_mercator_lat(y: f64) -> f64 {
    (2.0 * y.exp().atan() - std::f64::consts::PI / 2.0).to_degrees()
}

/// Convert lat/lon to SVG coordinates, `None` outside the bounding box
pub fn lat_lon_to_svg(lat: f64, lon: f64) -> Option<(f64, f64)> {
    if !(SOUTH..=NORTH).contains(&lat) || !(WEST..=EAST).contains(&lon) {
        return None;
    }

    let mercator_top = mercator_lat(NORTH);
    let mercator_bottom = mercator_lat(SOUTH);

    let lat_normalized = (mercator_top - mercator_lat(lat)) / (mercator_top - mercator_bottom);
    let lon_normalized = (lon - WEST) / (EAST - WEST);

    Some((lon_normalized * MAP_WIDTH, lat_normalized * MAP_HEIGHT))
}

/// Turn a click on the map back into lat/lon
pub fn svg_to_lat_lon(x: f64, y: f64) -> Option<(f64, f64)> {
    if !(0.0..=MAP_WIDTH).contains(&x) || !(0.0..=MAP_HEIGHT).contains(&y) {
        return None;
    }

    let mercator_top = mercator_lat(NORTH);
    let mercator_bottom = mercator_lat(SOUTH);

    let mercator = mercator_top - (y / MAP_HEIGHT) * (mercator_top - mercator_bottom);
    let lon = WEST + (x / MAP_WIDTH) * (EAST - WEST);

    Some((inverse_mercator_lat(mercator), lon))
}

/// Five-pointed star centred on (cx, cy)
fn star_points(cx: f64, cy: f64, radius: f64) -> String {
    (0..10)
        .map(|point| {
            let r = if point % 2 == 0 { radius } else { radius * 0.45 };
            let angle = std::f64::consts::PI / 5.0 * point as f64 - std::f64::consts::PI / 2.0;
            format!("{:.1},{:.1}", cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn marker_tooltip(marker: &Marker) -> String {
    format!(
        "{} (ID: {})\nProvince: {}\nDistrict: {}\nCoordinates: {:.3}, {:.3}\nElevation: {} m\nInstallation: {}\nEquipment: {}\nAddress: {}",
        marker.name,
        marker.station_id,
        marker.province,
        marker.district,
        marker.latitude,
        marker.longitude,
        marker.elevation,
        marker.install_date,
        marker.vendor,
        marker.address
    )
}

fn marker_shape(marker: &Marker) -> Markup {
    let Some((x, y)) = lat_lon_to_svg(marker.latitude, marker.longitude) else {
        return html! {};
    };
    html! {
        @if marker.highlighted {
            polygon
                class="station-marker is-selected"
                points=(star_points(x, y, 9.0))
                fill=(marker.colour)
                data-station-id=(marker.station_id)
                data-station-type=(marker.station_type) {
                title { (marker_tooltip(marker)) }
            }
        } @else {
            circle
                class="station-marker"
                cx=(format!("{:.1}", x))
                cy=(format!("{:.1}", y))
                r="4"
                fill=(marker.colour)
                data-station-id=(marker.station_id)
                data-station-type=(marker.station_type) {
                title { (marker_tooltip(marker)) }
            }
        }
    }
}

fn graticule() -> Markup {
    html! {
        g class="graticule" {
            @for lon in (95..=140).step_by(5) {
                @if let Some((x, _)) = lat_lon_to_svg(0.0, lon as f64) {
                    line x1=(format!("{:.1}", x)) y1="0" x2=(format!("{:.1}", x)) y2=(MAP_HEIGHT) {}
                    text x=(format!("{:.1}", x + 2.0)) y=(MAP_HEIGHT - 4.0) { (lon) "°E" }
                }
            }
            @for lat in [-10i32, -5, 0, 5] {
                @if let Some((_, y)) = lat_lon_to_svg(lat as f64, WEST) {
                    line x1="0" y1=(format!("{:.1}", y)) x2=(MAP_WIDTH) y2=(format!("{:.1}", y)) {}
                    text x="4" y=(format!("{:.1}", y - 2.0)) {
                        (lat.abs()) @if lat < 0 { "°S" } @else { "°N" }
                    }
                }
            }
        }
    }
}

/// Station map; a click posts the map position to `/selection/spatial`
pub fn station_map(layer: &MapLayer, query: &DashboardQuery) -> Markup {
    html! {
        div class="station-map-container box" {
            svg id="station-map"
                class="station-map"
                viewBox=(format!("0 0 {} {}", MAP_WIDTH, MAP_HEIGHT))
                preserveAspectRatio="xMidYMid meet"
                data-q=(query.q.as_deref().unwrap_or_default())
                data-mode=(query.mode.as_str())
                data-tab=(query.tab.as_str())
                onclick="selectNearestStation(event, this)" {
                rect class="sea" x="0" y="0" width=(MAP_WIDTH) height=(MAP_HEIGHT) {}
                (graticule())
                @match layer {
                    MapLayer::Individual(markers) => {
                        g class="station-markers" {
                            // Selected station drawn last so it stays on top
                            @for marker in markers.iter().filter(|m| !m.highlighted) {
                                (marker_shape(marker))
                            }
                            @for marker in markers.iter().filter(|m| m.highlighted) {
                                (marker_shape(marker))
                            }
                        }
                    }
                    MapLayer::Clustered(clusters) => {
                        @for cluster in clusters {
                            g class="province-cluster" data-province=(cluster.province) {
                                @for marker in &cluster.markers {
                                    (marker_shape(marker))
                                }
                            }
                        }
                    }
                }
            }
            (map_legend(layer))
        }
        script { (PreEscaped(MAP_CLICK_SCRIPT)) }
    }
}

fn map_legend(layer: &MapLayer) -> Markup {
    html! {
        div class="map-legend content is-small mt-3" {
            @match layer {
                MapLayer::Individual(_) => {
                    p { strong { "Map Legend:" } }
                    ul {
                        li {
                            span class="legend-swatch" style=(format!("background: {}", HIGHLIGHT_COLOUR)) {}
                            strong { "Red Star" } ": Currently selected station for detailed analysis"
                        }
                        li {
                            span class="legend-swatch" style=(format!("background: {}", MARKER_COLOUR)) {}
                            strong { "Blue Markers" } ": Other monitoring station"
                        }
                        li { "Hover a marker for station details, click the map to pick the nearest station" }
                    }
                }
                MapLayer::Clustered(clusters) => {
                    p { strong { "Provinces:" } }
                    div class="tags" {
                        @for cluster in clusters {
                            span class="tag" {
                                span class="legend-swatch" style=(format!("background: {}", cluster.colour)) {}
                                (cluster.province) " (" (cluster.markers.len()) ")"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Nearest-station candidate from a map click, waiting for confirmation
pub fn pending_candidate(pending: Option<&Candidate>, query: &DashboardQuery) -> Markup {
    html! {
        div id="pending-candidate" {
            @if let Some(candidate) = pending {
                div class="notification is-info is-light" {
                    p {
                        "📍 You clicked: "
                        strong { (candidate.display) }
                        " (" (candidate.station_type) ")"
                    }
                    div class="buttons mt-2" {
                        (selection_button("/selection/confirm", "🔄 Use this station in selection", "is-primary", query))
                        (selection_button("/selection/dismiss", "Dismiss", "is-light", query))
                    }
                }
            } @else {
                div class="notification is-light" {
                    "🖱️ Click a station marker on the map to select it."
                }
            }
        }
    }
}

fn selection_button(action: &str, label: &str, class: &str, query: &DashboardQuery) -> Markup {
    html! {
        form method="post" action=(action) hx-post=(action) hx-target="#dashboard" hx-swap="outerHTML" {
            (view_state_inputs(query))
            button type="submit" class={"button is-small " (class)} { (label) }
        }
    }
}

/// Converts the click into viewBox coordinates; the server does the inverse
/// projection and the nearest-station lookup
const MAP_CLICK_SCRIPT: &str = r#"
function selectNearestStation(event, svg) {
    const point = svg.createSVGPoint();
    point.x = event.clientX;
    point.y = event.clientY;
    const local = point.matrixTransform(svg.getScreenCTM().inverse());
    htmx.ajax('POST', '/selection/spatial', {
        target: '#dashboard',
        swap: 'outerHTML',
        values: {
            x: local.x.toFixed(2),
            y: local.y.toFixed(2),
            q: svg.dataset.q,
            mode: svg.dataset.mode,
            tab: svg.dataset.tab
        }
    });
}
"#;
