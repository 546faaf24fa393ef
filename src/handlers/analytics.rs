// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::analytics::{AnalyticsSummary, PriceImpactRow, SalesPoint, TimeframeQuery, TopProductRow},
};

// GET /api/analytics/sales
#[utoipa::path(
    get,
    path = "/api/analytics/sales",
    tag = "Analytics",
    params(TimeframeQuery),
    responses(
        (status = 200, description = "Vendas por dia, sem buracos, do início da janela até hoje", body = Vec<SalesPoint>),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "API do armazém indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_sales_data(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<TimeframeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let series = app_state
        .analytics_service
        .get_sales_data(&query.timeframe())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(series)))
}

// GET /api/analytics/summary
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "Analytics",
    params(TimeframeQuery),
    responses(
        (status = 200, description = "Totais do período e crescimento contra o período anterior", body = AnalyticsSummary),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "API do armazém indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<TimeframeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .analytics_service
        .get_summary(&query.timeframe())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/analytics/price-impact
#[utoipa::path(
    get,
    path = "/api/analytics/price-impact",
    tag = "Analytics",
    responses(
        (status = 200, description = "Simulação de -20% no preço para os 5 produtos mais vendidos", body = Vec<PriceImpactRow>),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "API do armazém indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_price_impact(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .analytics_service
        .get_price_change_impact()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/analytics/top-products
#[utoipa::path(
    get,
    path = "/api/analytics/top-products",
    tag = "Analytics",
    responses(
        (status = 200, description = "Top 5 produtos por receita", body = Vec<TopProductRow>),
        (status = 401, description = "Não autorizado"),
        (status = 502, description = "API do armazém indisponível")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .analytics_service
        .get_top_products()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}
