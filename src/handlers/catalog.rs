// src/handlers/catalog.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::{ReturnEntry, SearchQuery},
        warehouse::{Customer, Order},
    },
};

// GET /api/orders?q=
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Pedidos filtrados por cliente, status ou total", body = Vec<Order>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn search_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .dashboard_service
        .search_orders(query.q.as_deref().unwrap_or(""))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(orders))
}

// GET /api/customers?q=
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Clientes filtrados pelo nome", body = Vec<Customer>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn search_customers(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .dashboard_service
        .search_customers(query.q.as_deref().unwrap_or(""))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(customers))
}

// GET /api/returns
#[utoipa::path(
    get,
    path = "/api/returns",
    tag = "Catalog",
    responses(
        (status = 200, description = "Devoluções com o nome do produto", body = Vec<ReturnEntry>),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "API do armazém indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_returns(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let returns = app_state
        .dashboard_service
        .get_returns()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(returns))
}
