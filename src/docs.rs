// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Analytics ---
        handlers::analytics::get_sales_data,
        handlers::analytics::get_summary,
        handlers::analytics::get_price_impact,
        handlers::analytics::get_top_products,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_inventory_status,
        handlers::dashboard::get_recent_orders,

        // --- Catalog ---
        handlers::catalog::search_orders,
        handlers::catalog::search_customers,
        handlers::catalog::list_returns,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Session,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Analytics ---
            models::analytics::SalesPoint,
            models::analytics::AnalyticsSummary,
            models::analytics::PriceImpactRow,
            models::analytics::TopProductRow,

            // --- DASHBOARD ---
            models::dashboard::DashboardStats,
            models::dashboard::StockStatus,
            models::dashboard::InventoryStatusEntry,
            models::dashboard::RecentOrder,
            models::dashboard::ReturnEntry,

            // --- Armazém ---
            models::warehouse::Product,
            models::warehouse::Customer,
            models::warehouse::CustomerRef,
            models::warehouse::Order,
            models::warehouse::OrderItem,
            models::warehouse::Return,
        )
    ),
    tags(
        (name = "Auth", description = "Login e sessão do administrador"),
        (name = "Analytics", description = "Vendas, resumo, impacto de preço e ranking de produtos"),
        (name = "Dashboard", description = "Indicadores do painel"),
        (name = "Catalog", description = "Busca de pedidos e clientes, devoluções")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_analytics_paths_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/analytics/sales",
            "/api/analytics/summary",
            "/api/analytics/price-impact",
            "/api/analytics/top-products",
            "/api/auth/login",
            "/api/returns",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
