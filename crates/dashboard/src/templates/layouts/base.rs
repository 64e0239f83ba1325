use maud::{html, Markup, PreEscaped, DOCTYPE};

pub struct PageConfig<'a> {
    pub title: &'a str,
    pub api_base: &'a str,
}

pub fn base(config: &PageConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@1.0.4/css/bulma.min.css";
                link rel="stylesheet" href="/static/styles.css";
                script src="https://cdn.jsdelivr.net/npm/htmx.org@1.9.10/dist/htmx.min.js" {}
            }
            body {
                script {
                    (PreEscaped(format!("const API_BASE = {};", js_string(config.api_base))))
                }

                section class="section" {
                    div class="container is-fluid" {
                        nav class="level mb-4" {
                            div class="level-left" {
                                a href="/" class="has-text-current" style="text-decoration: none;" {
                                    h1 class="title level-item" { "🗺️ Indonesia Observation Network" }
                                }
                            }
                            div class="level-right" {
                                div class="level-item buttons" {
                                    a href="/api/stations" class="button is-link is-light is-small" {
                                        "JSON API"
                                    }
                                    form method="post" action="/admin/reload"
                                      hx-post="/admin/reload"
                                      hx-target="#reload-status"
                                      hx-swap="innerHTML" {
                                        button type="submit" class="button is-small" { "Reload data" }
                                    }
                                    span id="reload-status" class="is-size-7 ml-2" {}
                                }
                            }
                        }
                        hr;

                        div id="main-content" {
                            (content)
                        }
                    }
                }
            }
        }
    }
}

/// Quote a value for inline JavaScript
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
