use std::sync::Arc;

use axum::{
    error_handling::HandleErrorLayer,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;

use config::Config;
use db::TodoRepository;

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoRepository>,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();
    let method_not_allowed = handlers::fallback::method_not_allowed;

    // Every route under /todos/ shares one parameter name at the same
    // position; the router rejects differing names there.
    let api_routes = Router::new()
        .route(
            "/todos",
            post(handlers::todos::create_todo).fallback(method_not_allowed),
        )
        .route(
            "/todos/:key",
            get(handlers::todos::list_todos)
                .delete(handlers::todos::delete_todo)
                .fallback(method_not_allowed),
        )
        .route(
            "/todos/:key/complete",
            put(handlers::todos::complete_todo).fallback(method_not_allowed),
        )
        .route(
            "/stats/:date",
            get(handlers::stats::get_daily_stats).fallback(method_not_allowed),
        )
        .fallback(handlers::fallback::not_found);

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let static_files = ServeDir::new(&config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::fallback::not_found.into_service());

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(
                    handlers::fallback::handle_middleware_error,
                ))
                .timeout(config.request_timeout),
        )
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}
