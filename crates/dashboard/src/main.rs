use anyhow::anyhow;
use axum::serve;
use futures::TryFutureExt;
use log::{error, info, warn};
use obsnet::{app, build_app_state, get_config_info, get_log_level, setup_logger};
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config_info();
    let cli = &config.cli;
    let log_level = get_log_level(cli);

    setup_logger()
        .level(log_level)
        .level_for("obsnet", log_level)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .apply()?;
    config.log();

    let workbook = cli.workbook();
    let assets_dir = cli.assets_dir();
    let static_dir = cli.static_dir();
    let remote_url = cli.remote_url();
    let defaults = cli.selection_defaults();
    let host = cli.host();
    let port = cli.port();

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let listener = TcpListener::bind(socket_addr)
        .map_err(|e| anyhow!("error binding to socket: {}", e))
        .await?;

    info!("obsnet starting...");
    info!("  Listen:   http://{}", socket_addr);
    info!("  Workbook: {}", workbook);
    info!("  Layouts:  {}", assets_dir);
    info!("  Static:   {}", static_dir);

    let app_state = build_app_state(remote_url, static_dir, workbook, assets_dir, defaults)
        .await
        .map_err(|e| {
            error!("error building app: {}", e);
            e
        })?;

    let app = app(app_state);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("obsnet stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
