use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use mockall::mock;
use obsnet::{
    app, AppState, LayoutImages, SelectionDefaults, Snapshot, StationData, StationId,
    StationIndex, StationRecord, StoreError, UnifiedTable,
};
use obsnet_core::FileFingerprint;
use tempfile::TempDir;
use time::macros::date;
use tower::ServiceExt;

mock! {
    pub StationAccess {}

    #[async_trait]
    impl StationData for StationAccess {
        async fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError>;
        async fn reload(&self) -> Result<Arc<Snapshot>, StoreError>;
        async fn workbook_bytes(&self) -> Result<Vec<u8>, StoreError>;
    }
}

pub struct TestApp {
    pub app: Router,
    /// Layout images directory, removed when the test ends
    pub assets: TempDir,
}

pub async fn spawn_app(stations: Arc<dyn StationData>) -> TestApp {
    let assets = tempfile::tempdir().expect("Failed to create assets dir");
    let state = AppState::new(
        "http://127.0.0.1:9810".to_string(),
        "./static".to_string(),
        stations,
        LayoutImages::new(assets.path()),
        SelectionDefaults::default(),
    );

    TestApp {
        app: app(state),
        assets,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(Method::GET, uri, cookie, false, None).await
    }

    pub async fn get_htmx(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(Method::GET, uri, cookie, true, None).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(Method::POST, uri, cookie, true, Some(form)).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        htmx: bool,
        form: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, "text/html");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        self.app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .expect("Failed to execute request.")
    }
}

/// `obsnet_session=<id>` from the response's Set-Cookie header
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("response sets no session cookie")
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn station(
    station_type: &str,
    id: &str,
    name: &str,
    province: &str,
    lat: f64,
    lon: f64,
) -> StationRecord {
    StationRecord {
        station_type: station_type.to_string(),
        station_id: StationId::new(id),
        name: Some(name.to_string()),
        province: Some(province.to_string()),
        district: None,
        subdistrict: None,
        village: None,
        latitude: lat,
        longitude: lon,
        elevation: None,
        operational_status: Some("Active".to_string()),
        phone: None,
        install_date: None,
        address: None,
        transport_type: None,
        agency: Some("BMKG".to_string()),
        vendor: Some("Vaisala".to_string()),
    }
}

/// AWS: Kemayoran (10001) and Semarang (10002), ARG: Medan (20), IKRO: empty
pub fn mock_snapshot() -> Arc<Snapshot> {
    let mut kemayoran = station("AWS", "10001", "Kemayoran", "DKI Jakarta", -6.1553, 106.8456);
    kemayoran.install_date = Some(date!(2019 - 07 - 01));

    let table = UnifiedTable {
        station_types: vec!["AWS".into(), "ARG".into(), "IKRO".into()],
        records: vec![
            kemayoran,
            station("AWS", "10002", "Semarang", "Jawa Tengah", -6.9847, 110.3811),
            station("ARG", "20", "Medan", "Sumatera Utara", 3.5583, 98.6722),
        ],
    };

    Arc::new(Snapshot::new(
        StationIndex::new(table),
        FileFingerprint {
            path: PathBuf::from("stations.xlsx"),
            modified: None,
            len: 0,
        },
    ))
}

/// Station data that always serves [`mock_snapshot`]
pub fn mock_stations() -> MockStationAccess {
    let snapshot = mock_snapshot();
    let mut stations = MockStationAccess::new();
    stations
        .expect_snapshot()
        .returning(move || Ok(snapshot.clone()));
    stations
}
