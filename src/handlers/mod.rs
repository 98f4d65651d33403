pub mod admin;
pub mod calendar;
pub mod health;
pub mod wizard;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/menus", get(wizard::list_menus))
        .route("/api/wizard", post(wizard::create_wizard))
        .route(
            "/api/wizard/:id",
            get(wizard::get_wizard).delete(wizard::discard_wizard),
        )
        .route("/api/wizard/:id/menu", post(wizard::select_menu))
        .route("/api/wizard/:id/grid", get(wizard::get_grid))
        .route("/api/wizard/:id/grid/prev", post(wizard::previous_week))
        .route("/api/wizard/:id/grid/next", post(wizard::next_week))
        .route("/api/wizard/:id/slot", post(wizard::select_slot))
        .route("/api/wizard/:id/next", post(wizard::next_step))
        .route("/api/wizard/:id/back", post(wizard::go_back))
        .route("/api/wizard/:id/confirm", post(wizard::confirm))
        .route(
            "/api/admin/reservations",
            get(admin::get_reservations),
        )
        .route(
            "/api/admin/reservations/:id/status",
            post(admin::update_reservation_status),
        )
        .route("/api/admin/users", get(admin::get_users))
        .route("/api/admin/users/:id/toggle", post(admin::toggle_user))
        .route(
            "/calendar/:reservation_id",
            get(calendar::download_ics),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
