use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::SchoolStore;
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, validate_tenant_middleware};

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchoolStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn SchoolStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        // Protected API
        .merge(api_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    use handlers::{courses, dashboard, enrollments, students, teachers};

    Router::new()
        .route("/api/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/api/teachers/:id",
            get(teachers::get).put(teachers::update).delete(teachers::delete),
        )
        .route("/api/students", get(students::list).post(students::create))
        .route(
            "/api/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        )
        .route("/api/courses", get(courses::list).post(courses::create))
        .route(
            "/api/courses/:id",
            get(courses::get).put(courses::update).delete(courses::delete),
        )
        .route("/api/enrollments", get(enrollments::list).post(enrollments::create))
        .route(
            "/api/enrollments/:id",
            get(enrollments::get).put(enrollments::update).delete(enrollments::delete),
        )
        .route("/api/dashboard", get(dashboard::counts))
        // Layers run bottom-up: token first, then tenant resolution
        .layer(from_fn_with_state(state.clone(), validate_tenant_middleware))
        .layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
