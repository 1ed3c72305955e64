use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_staff};
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::batches::router::init_batches_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::demo_bookings::router::init_demo_bookings_router;
use crate::modules::events::router::init_events_router;
use crate::modules::fees::router::init_fees_router;
use crate::modules::notes::router::init_notes_router;
use crate::modules::notifications::router::init_notifications_router;
use crate::modules::profiles::router::init_profiles_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::students::router::init_students_router;
use crate::modules::tasks::router::init_tasks_router;
use crate::modules::testimonials::router::init_testimonials_router;
use crate::modules::tests::router::init_tests_router;
use crate::realtime::stream_changes;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let auth_governor = Arc::new(state.rate_limit_config.auth_governor_config());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router().layer(GovernorLayer::new(auth_governor)),
                )
                .nest(
                    "/profiles",
                    init_profiles_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/roles",
                    init_roles_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/batches",
                    init_batches_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff)),
                )
                .nest("/students", init_students_router())
                .nest("/classes", init_classes_router())
                .nest("/attendance", init_attendance_router())
                .nest("/fees", init_fees_router())
                .nest("/tests", init_tests_router())
                .nest("/tasks", init_tasks_router())
                .nest("/notes", init_notes_router(&state.storage_config))
                .nest("/events", init_events_router())
                .nest("/notifications", init_notifications_router())
                .nest("/testimonials", init_testimonials_router())
                .nest("/demo-bookings", init_demo_bookings_router())
                .route("/realtime", get(stream_changes)),
        )
        .nest_service(
            "/files",
            ServeDir::new(state.storage_config.upload_dir.clone()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
