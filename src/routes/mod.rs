//! Router assembly: resource and common routes plus the CORS, body limit and trace layers.

mod common;
mod students;

pub use common::{common_routes, LIVENESS_TEXT};
pub use students::student_routes;

use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Request bodies above this size are refused with 413.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Method and path of every resource route, logged at startup.
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/students"),
    ("POST", "/students"),
    ("GET", "/students/:id"),
    ("PUT", "/students/:id"),
    ("DELETE", "/students/:id"),
];

/// Full application router. Cross-origin calls are accepted, with credentials, from `cors_origin` only.
pub fn app(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([cors_origin]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
