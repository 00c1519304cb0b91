use super::serializers::AppState;
use crate::{
    config::Settings,
    db,
    server::routes::chat_router::ask_question,
    server::routes::document_router::{delete_document, list_documents, upload_document},
    server::routes::session_router::{
        create_session, delete_session, get_session, list_sessions,
    },
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    serve,
};

use std::{net::SocketAddr, sync::Arc};
use tokio::fs;

use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024; // 25mb cap

pub async fn run() {
    let settings = Settings::from_env();

    fs::create_dir_all(&settings.upload_dir)
        .await
        .expect("Failed to create upload directory");

    {
        let mut conn = db::get_database_connection().expect("Failed to connect to database");
        db::run_migrations(&mut conn).expect("Failed to run database migrations");
    }

    let port = settings.port;
    let state = Arc::new(AppState { settings });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(|| async { "Document Chat API" }))
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route(
            "/api/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/upload", post(upload_document))
        .route("/api/ask", post(ask_question))
        .route("/api/documents", get(list_documents))
        .route("/api/documents/{id}", delete(delete_document))
        .with_state(state)
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    serve(listener, app).await.expect("Server error");
}
