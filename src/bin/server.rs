use std::{
    env::{self},
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use polimoney::{AppState, PasswordHash, build_router, graceful_shutdown, logging_middleware};

/// The web server for Polimoney.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the report JSON files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// The port to serve the site from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,

    /// Log the body of every request and response.
    #[arg(long)]
    log_bodies: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let secret = env::var("SECRET").expect("The environment variable 'SECRET' must be set");
    let viewer_password_hash = env::var("VIEWER_PASSWORD_HASH")
        .expect("The environment variable 'VIEWER_PASSWORD_HASH' must be set");
    let viewer_password_hash = match PasswordHash::parse(&viewer_password_hash) {
        Ok(password_hash) => password_hash,
        Err(error) => {
            tracing::error!(
                "VIEWER_PASSWORD_HASH is invalid: {error}. Create one with the hash_password binary."
            );
            exit(1);
        }
    };

    let state = AppState::new(&args.data_dir, &secret, viewer_password_hash);

    if !state.data.data_dir().is_dir() {
        tracing::warn!(
            "The data directory {:?} does not exist, no reports will be shown",
            state.data.data_dir()
        );
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let mut router = build_router(state);

    if args.log_bodies {
        router = router.layer(middleware::from_fn(logging_middleware));
    }

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly");
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
