use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::{error, info, LevelFilter};
use obsnet_core::{
    find_config_file, load_config, ConfigError, ConfigSource, DEFAULT_PORT, DEFAULT_STATION_ID,
    DEFAULT_WORKBOOK,
};
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::selection::SelectionDefaults;
use crate::stations::StationId;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "obsnet - Indonesia observation network dashboard"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $OBSNET_CONFIG, ./obsnet.toml,
    /// $XDG_CONFIG_HOME/obsnet/obsnet.toml, /etc/obsnet/obsnet.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "OBSNET_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "OBSNET_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "OBSNET_PORT")]
    pub port: Option<String>,

    /// Public URL used in the UI
    #[arg(short, long, env = "OBSNET_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Station metadata workbook, one sheet per station type
    #[arg(short, long, env = "OBSNET_WORKBOOK")]
    pub workbook: Option<String>,

    /// Directory holding the `Layout {type}.png` images
    #[arg(short, long, env = "OBSNET_ASSETS_DIR")]
    pub assets_dir: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "OBSNET_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Station selected when a session starts
    #[arg(long, env = "OBSNET_DEFAULT_STATION_ID")]
    pub default_station_id: Option<String>,

    /// Station type active when a session starts, first sheet if unset
    #[arg(long, env = "OBSNET_DEFAULT_STATION_TYPE")]
    pub default_station_type: Option<String>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
    }

    pub fn remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host(), self.port()))
    }

    pub fn workbook(&self) -> String {
        self.workbook
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string())
    }

    pub fn assets_dir(&self) -> String {
        self.assets_dir.clone().unwrap_or_else(|| ".".to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    pub fn selection_defaults(&self) -> SelectionDefaults {
        SelectionDefaults {
            station_type: self.default_station_type.clone(),
            station_id: StationId::new(
                self.default_station_id
                    .as_deref()
                    .unwrap_or(DEFAULT_STATION_ID),
            ),
        }
    }

    /// Fill every unset field from `file`
    pub fn merge(self, file: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file.level),
            domain: self.domain.or(file.domain),
            port: self.port.or(file.port),
            remote_url: self.remote_url.or(file.remote_url),
            workbook: self.workbook.or(file.workbook),
            assets_dir: self.assets_dir.or(file.assets_dir),
            ui_dir: self.ui_dir.or(file.ui_dir),
            default_station_id: self.default_station_id.or(file.default_station_id),
            default_station_type: self.default_station_type.or(file.default_station_type),
        }
    }
}

/// Merged configuration and where it came from
///
/// Config is read before the logger exists, so anything worth reporting is
/// kept here and written out by [`ConfigInfo::log`].
#[derive(Debug)]
pub struct ConfigInfo {
    pub cli: Cli,
    pub source: ConfigSource,
    /// Set when a config file was found but could not be used
    pub file_error: Option<ConfigError>,
}

impl ConfigInfo {
    pub fn log(&self) {
        if let Some(path) = self.source.path() {
            info!("Loading config from: {}", path.display());
        }
        if let Some(e) = &self.file_error {
            error!("ignoring config file, using flags and defaults: {}", e);
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> ConfigInfo {
    resolve_config(Cli::parse())
}

/// Merge already-parsed CLI args with the config file they point at
pub fn resolve_config(cli_args: Cli) -> ConfigInfo {
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("OBSNET_CONFIG", "obsnet.toml")
    };

    let (file_config, file_error) = match load_config::<Cli>(&source) {
        Ok(file_config) => (file_config, None),
        Err(e) => (Cli::default(), Some(e)),
    };

    // CLI args override file config (env vars are handled by clap)
    ConfigInfo {
        cli: cli_args.merge(file_config),
        source,
        file_error,
    }
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now.format(&Iso8601::DEFAULT)
                    .unwrap_or_else(|_| now.unix_timestamp().to_string()),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
