//! Route table for the REST exposure

use super::handlers::{
    cancel_reservation, create_vehicle, delete_vehicle, duplicate_vehicle, generate_odl,
    get_catalog_item, get_order, get_vehicle, health_check, list_catalog, list_orders,
    list_vehicles, quote_price, reserve_vehicle, transform_to_order, update_order,
    update_vehicle,
};
use super::host::DealershipHost;
use axum::{
    Router,
    routing::{get, post},
};

/// Build all REST routes
///
/// - GET /health
/// - GET /catalog/{kind}, GET /catalog/{kind}/{id}
/// - POST /pricing/quote
/// - GET|POST /vehicles, GET|PATCH|DELETE /vehicles/{id}
/// - POST /vehicles/{id}/{reserve,cancel-reservation,transform-to-order,duplicate}
/// - GET /orders, GET|PATCH /orders/{id}, POST /orders/{id}/odl
pub fn build_routes(host: DealershipHost) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/catalog/{kind}", get(list_catalog))
        .route("/catalog/{kind}/{id}", get(get_catalog_item))
        .route("/pricing/quote", post(quote_price))
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/{id}/reserve", post(reserve_vehicle))
        .route("/vehicles/{id}/cancel-reservation", post(cancel_reservation))
        .route("/vehicles/{id}/transform-to-order", post(transform_to_order))
        .route("/vehicles/{id}/duplicate", post(duplicate_vehicle))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order).patch(update_order))
        .route("/orders/{id}/odl", post(generate_odl))
        .with_state(host)
}
