use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use biyu::{AppState, PaginationConfig, build_router, graceful_shutdown};

/// The web server for BiYú, a personal spending tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file. The file and schema are created on
    /// first run if missing.
    #[arg(long)]
    db_path: String,

    /// The port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone name used for month windows and daily totals,
    /// e.g. "America/Bogota".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging();

    let connection = Connection::open(&args.db_path).expect("could not open the database");
    let state = AppState::new(connection, &args.timezone, PaginationConfig::default())
        .expect("could not build the application state");

    let router = with_request_tracing(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let address = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("BiYú listening on http://{address}");

    axum_server::bind(address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("server error");
}

/// Log to stdout at the level set by `RUST_LOG` (info when unset) and mirror
/// everything at DEBUG and above to `debug.log`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = tracing_subscriber::fmt::layer().pretty().with_filter(env_filter);

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("debug.log")
        .expect("could not open debug.log");
    let file_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry().with(stdout_layer).with(file_layer).init();
}

/// Wrap the router in a span that carries the method, URI and matched route of
/// each request.
fn with_request_tracing(router: Router) -> Router {
    let layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let matched_path = request.extensions().get::<MatchedPath>().map(MatchedPath::as_str);

            tracing::debug_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                matched_path
            )
        })
        // The route handlers log their own errors, so the default 5xx logging
        // from `TraceLayer` would report everything twice.
        .on_failure(());

    router.layer(layer)
}
