pub mod health;
pub mod talent;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::remote_talent::TALENT_API;
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    let talent_api = Router::new()
        .route(
            "/api/talents",
            get(talent::list_talents).post(talent::create_talent),
        )
        .route("/api/talents/stats", get(talent::talent_stats))
        .route("/api/talents/batch-status", post(talent::batch_update_status))
        .route("/api/talents/batch-delete", post(talent::batch_delete))
        .route(
            "/api/talents/:id",
            get(talent::get_talent)
                .patch(talent::update_talent)
                .delete(talent::delete_talent),
        );

    let handler_api = Router::new().route(
        TALENT_API,
        get(talent::handler_query)
            .post(talent::handler_create)
            .put(talent::handler_update)
            .patch(talent::handler_update_status)
            .delete(talent::handler_delete),
    );

    Router::new()
        .route("/health", get(health::health))
        .merge(talent_api)
        .merge(handler_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
