pub mod audit_logs;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/audit/logs", get(audit_logs::list))
        .route(
            "/api/audit/logs/customer/{customer_id}",
            get(audit_logs::list_by_customer),
        )
        .route("/api/audit/logs/user/{user_id}", get(audit_logs::list_by_user))
        .route(
            "/api/audit/logs/entity/{entity_type}/{entity_id}",
            get(audit_logs::list_by_entity),
        )
}
