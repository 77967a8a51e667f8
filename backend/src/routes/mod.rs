//! API route definitions
//!
//! Everything except login sits behind the JWT middleware. Role checks
//! happen in the handlers, where the operation is known.

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{auth, intake, materials, programs, reports, requests, warehouses};
use crate::middleware::auth_middleware;
use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/materials", material_routes())
        .nest("/incoming", intake_routes())
        .nest("/requests", request_routes())
        .nest("/customers", customer_routes())
        .nest("/programs", program_routes())
        .nest("/locations", location_routes())
        .nest("/reports", report_routes())
}

fn auth_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/users", post(auth::create_user))
        .route("/password", put(auth::update_password))
        .route_layer(middleware::from_fn(auth_middleware));

    Router::new()
        .route("/login", post(auth::login))
        .merge(protected)
}

fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list))
        .route("/grouped", get(materials::grouped))
        .route("/types", get(materials::material_types))
        .route("/reasons", get(materials::usage_reasons))
        .route("/transactions", get(materials::transactions_by_ticket))
        .route("/description/:stock_id", get(materials::description))
        .route("/receive", post(materials::receive))
        .route("/:id/move", patch(materials::move_material))
        .route("/:id/remove", patch(materials::remove))
        .route("/:id", patch(materials::adjust))
        .route("/status", put(materials::update_status))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn intake_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(intake::send).get(intake::list))
        .route("/counts", get(intake::pending_counts))
        .route("/:id", patch(intake::update).delete(intake::delete))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(requests::create).get(requests::list))
        .route("/count", get(requests::pending_count))
        .route("/:id", patch(requests::update))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(programs::create_customer).get(programs::list_customers),
        )
        .route("/:id", put(programs::update_customer))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn program_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(programs::create_program).get(programs::list_programs),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(warehouses::create_location).get(warehouses::list_locations),
        )
        .route("/available", get(warehouses::available_locations))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(reports::transactions))
        .route("/balance", get(reports::balance))
        .route("/customer-balances", post(reports::customer_balances))
        .route("/weekly-usage", get(reports::weekly_usage))
        .route("/transaction-log", get(reports::transaction_log))
        .route_layer(middleware::from_fn(auth_middleware))
}
