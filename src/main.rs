use anyhow::{bail, Context, Result};
use axum::serve;
use cab_dispatch::core::config::Config;
use cab_dispatch::core::routes::build_router;
use cab_dispatch::core::startup::seed_accounts;
use cab_dispatch::core::state::AppState;
use cab_dispatch::core::tracing_init::init_tracing;
use cab_dispatch::dispatch::service::DispatchService;
use cab_dispatch::export::ride_log::write_ride_log;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, info, Level};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    let config = Config::from_file(&config_path).context(format!(
        "Failed to load configuration from '{}'. \
        Copy config.example.toml to config.toml and adjust the values.",
        config_path.display()
    ))?;

    init_tracing(&config.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = ?config.server.port,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        base_fare = config.dispatch.base_fare,
        per_unit_rate = config.dispatch.per_unit_rate,
        "Cab dispatch starting"
    );

    let state = Arc::new(AppState::new(config.clone()));

    seed_accounts(&state.dispatch, &config.seed);

    spawn_stats_task(Arc::clone(&state.dispatch), config.dispatch.stats_interval);

    info!(
        users = state.dispatch.accounts().len(),
        available_drivers = state.dispatch.get_available_drivers(),
        "Cab dispatch startup complete"
    );

    let app = build_router(Arc::clone(&state)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ),
    );

    let tcp_handle = if let Some(port) = config.server.port {
        let addr = format!("0.0.0.0:{}", port);

        let listener = TcpListener::bind(&addr)
            .await
            .context(format!("Failed to bind TCP listener to {}", addr))?;

        info!(address = %addr, "TCP listener bound");

        let app = app.clone();
        Some(tokio::spawn(async move {
            serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("TCP server error")
        }))
    } else {
        None
    };

    let unix_handle = if let Some(unix_socket) = &config.server.unix_socket {
        if unix_socket.exists() {
            std::fs::remove_file(unix_socket).context(format!(
                "Failed to remove existing Unix socket: {}",
                unix_socket.display()
            ))?;
        }

        let listener = UnixListener::bind(unix_socket).context(format!(
            "Failed to bind Unix socket listener to {}",
            unix_socket.display()
        ))?;

        info!(path = %unix_socket.display(), "Unix socket listener bound");

        let mut make_service = app.into_make_service();
        Some(tokio::spawn(async move {
            use tower::Service;

            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);

            loop {
                let socket = tokio::select! {
                    accepted = listener.accept() => match accepted {
                        Ok((socket, _)) => socket,
                        Err(e) => {
                            error!(error = %e, "Failed to accept Unix socket connection");
                            continue;
                        }
                    },
                    _ = &mut shutdown => break,
                };

                let tower_service = match make_service.call(&socket).await {
                    Ok(svc) => svc,
                    Err(infallible) => match infallible {},
                };

                tokio::spawn(async move {
                    let socket = hyper_util::rt::TokioIo::new(socket);

                    let hyper_service = hyper::service::service_fn(
                        move |request: hyper::Request<hyper::body::Incoming>| {
                            tower_service.clone().call(request)
                        },
                    );

                    if let Err(err) = hyper_util::server::conn::auto::Builder::new(
                        hyper_util::rt::TokioExecutor::new(),
                    )
                    .serve_connection_with_upgrades(socket, hyper_service)
                    .await
                    {
                        error!(error = %err, "Error serving Unix socket connection");
                    }
                });
            }

            Ok::<(), anyhow::Error>(())
        }))
    } else {
        None
    };

    info!("HTTP server(s) started, waiting for shutdown signal");

    match (tcp_handle, unix_handle) {
        (Some(tcp), Some(unix)) => {
            let (tcp_result, unix_result) = tokio::join!(tcp, unix);
            log_server_exit("TCP", tcp_result);
            log_server_exit("Unix socket", unix_result);
        }
        (Some(tcp), None) => log_server_exit("TCP", tcp.await),
        (None, Some(unix)) => log_server_exit("Unix socket", unix.await),
        (None, None) => bail!("No listeners configured"),
    }

    if let Some(path) = &config.export.ride_log_path {
        let rides = state.dispatch.rides().snapshot();
        write_ride_log(path, &rides)
            .context(format!("Failed to export ride log to {}", path.display()))?;
        info!(path = %path.display(), rides = rides.len(), "Ride log exported");
    }

    info!("Shut down gracefully");

    Ok(())
}

fn log_server_exit(listener: &str, result: Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => debug!(listener, "Server stopped"),
        Ok(Err(e)) => error!(listener, error = %e, "Server failed"),
        Err(e) => error!(listener, error = %e, "Server task panicked"),
    }
}

/// Periodically log the dispatch counters
fn spawn_stats_task(dispatch: Arc<DispatchService>, stats_interval: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(stats_interval));

        loop {
            interval.tick().await;

            info!(
                active_rides = dispatch.get_active_rides(),
                available_drivers = dispatch.get_available_drivers(),
                total_rides = dispatch.rides().len(),
                registered_users = dispatch.accounts().len(),
                "Dispatch stats"
            );
        }
    });
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
