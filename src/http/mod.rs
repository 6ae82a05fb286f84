//! HTTP surface: the company search API and its health endpoint.

mod handlers;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::company::CompanyRepository;

pub use handlers::{health, search_companies, SEARCH_LIMIT};

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CompanyRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }
}

/// Build the API router.
///
/// `allowed_origins` configures CORS: empty leaves the CORS layer off,
/// `*` allows any origin.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/api/companies", get(search_companies))
        .route("/health", get(health));

    let router = match cors_layer(allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    if allowed_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    for origin in allowed_origins {
        if let Ok(header_value) = HeaderValue::from_str(origin) {
            cors = cors.allow_origin(header_value);
        }
    }
    Some(cors)
}
