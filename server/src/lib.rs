use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, post},
};
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing::Span;

pub mod classify;
pub mod disk;
pub mod domain;
pub mod error;
mod handlers;
pub mod sqlite;

use crate::classify::Classifier;
use crate::disk::DiskStore;
use crate::domain::Repository;
use crate::sqlite::{Mode, Sqlite};
use kernel::{Category, ErrorReply, MediaFile};
use std::env;
use std::net::SocketAddr;
use std::path::Path;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DB_FILE: &str = "mstore.db";
const CURRENT_DIR: &str = "./";
const MEDIA_DIR: &str = "./media";

/// Per-process service state assembled once at startup: database location,
/// blob store root and the classification tables.
pub struct AppState {
    pub db: PathBuf,
    pub store: DiskStore,
    pub classifier: Classifier,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::upload_files, handlers::get_files, handlers::delete_file),
    components(schemas(MediaFile, Category, ErrorReply)),
    tags((name = "files", description = "Media file upload API"))
)]
struct ApiDoc;

pub async fn run() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mstore=debug,server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration from environment
    let db_file = env::var("MSTORE_DATA_FILE").unwrap_or_else(|_| String::from(DB_FILE));
    let dir = env::var("MSTORE_DATA_DIR").unwrap_or_else(|_| String::from(CURRENT_DIR));
    let media = env::var("MSTORE_MEDIA_DIR").unwrap_or_else(|_| String::from(MEDIA_DIR));
    let port = env::var("MSTORE_PORT").unwrap_or_else(|_| String::from("5000"));

    // Start init
    let db = Path::new(&dir).join(&db_file);
    if !db.exists() {
        Sqlite::open(db.clone(), Mode::ReadWrite)
            .expect("Database file cannot be created")
            .new_database()
            .unwrap_or_default();
    }
    let store = DiskStore::new(&media).expect("Media directory cannot be created");

    let socket: SocketAddr = format!("0.0.0.0:{port}")
        .parse()
        .expect("Invalid server address");
    tracing::debug!("listening on {socket}");

    let state = Arc::new(AppState {
        db,
        store,
        classifier: Classifier::default(),
    });
    let app = create_routes(state);

    let listener = tokio::net::TcpListener::bind(socket)
        .await
        .expect("Cannot bind server socket");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/upload/",
            post(handlers::upload_files).get(handlers::get_files),
        )
        .route("/api/delete/:id/", delete(handlers::delete_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Server error: {error}");
                    },
                ))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(
                    2 * 1024 * 1024 * 1024, /* 2GB */
                ))
                .into_inner(),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("signal received, starting graceful shutdown");
}
