use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let seeds = ServeDir::new(state.seed_dir());
    let frontend = state.frontend_dist().map(|dist| {
        // 前端路由交给 index.html
        ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")))
    });

    let router = Router::new()
        .route("/api/health", get(handlers::health))
        .nest_service("/data", seeds)
        .with_state(state);

    let router = match frontend {
        Some(frontend) => router.fallback_service(frontend),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}
