//! HTTP handlers over [`DealershipHost`]
//!
//! Handlers only translate between HTTP and the domain services. Every
//! failure is a [`DealershipError`], which renders itself as a JSON error.

use super::host::DealershipHost;
use crate::core::DealershipError;
use crate::entities::{
    CatalogItem, CatalogKind, NewVehicle, Order, OrderUpdate, ReserveRequest, Vehicle,
    VehicleUpdate,
};
use crate::lifecycle::OrderPlacement;
use crate::pricing::{PriceQuote, PriceSelection};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

type ApiResult<T> = Result<T, DealershipError>;

/// Compatibility filter for catalog listings
#[derive(Debug, Default, Deserialize)]
pub struct CompatibilityQuery {
    pub model_id: Option<Uuid>,
    pub trim_id: Option<Uuid>,
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dealership"
    }))
}

pub async fn list_catalog(
    State(host): State<DealershipHost>,
    Path(kind): Path<String>,
    Query(filter): Query<CompatibilityQuery>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    let kind: CatalogKind = kind.parse()?;
    let items = match filter.model_id {
        Some(model_id) => {
            host.catalog
                .list_compatible(kind, &model_id, filter.trim_id.as_ref())
                .await?
        }
        None => host.catalog.list(kind).await?,
    };
    Ok(Json(items))
}

pub async fn get_catalog_item(
    State(host): State<DealershipHost>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> ApiResult<Json<CatalogItem>> {
    let kind: CatalogKind = kind.parse()?;
    Ok(Json(host.catalog.get_or_fail(kind, &id).await?))
}

pub async fn quote_price(
    State(host): State<DealershipHost>,
    Json(selection): Json<PriceSelection>,
) -> ApiResult<Json<PriceQuote>> {
    Ok(Json(host.pricing.quote(&selection).await?))
}

pub async fn list_vehicles(State(host): State<DealershipHost>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(host.vehicles.list().await?))
}

pub async fn create_vehicle(
    State(host): State<DealershipHost>,
    Json(input): Json<NewVehicle>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let vehicle = host.vehicles.create(input).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn get_vehicle(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(host.vehicles.get(&id).await?))
}

pub async fn update_vehicle(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
    Json(update): Json<VehicleUpdate>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(host.vehicles.update(&id, update).await?))
}

pub async fn delete_vehicle(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    host.vehicles.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reserve_vehicle(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReserveRequest>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(host.vehicles.reserve(&id, request).await?))
}

pub async fn cancel_reservation(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(host.vehicles.cancel_reservation(&id).await?))
}

pub async fn transform_to_order(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<OrderPlacement>)> {
    let placement = host.vehicles.transform_to_order(&id).await?;
    Ok((StatusCode::CREATED, Json(placement)))
}

pub async fn duplicate_vehicle(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let vehicle = host.vehicles.duplicate(&id).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn list_orders(State(host): State<DealershipHost>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(host.orders.list().await?))
}

pub async fn get_order(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(host.orders.get(&id).await?))
}

pub async fn update_order(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
    Json(update): Json<OrderUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(host.orders.update(&id, update).await?))
}

pub async fn generate_odl(
    State(host): State<DealershipHost>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(host.orders.generate_odl(&id).await?))
}
