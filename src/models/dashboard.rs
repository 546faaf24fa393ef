// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// 1. Cards do topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_count: usize, // estoque <= 10
    pub pending_orders: usize,  // status == "PENDING"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Critical")]
    Critical,
}

impl StockStatus {
    pub fn from_quantity(quantity: i64) -> Self {
        if quantity > 50 {
            StockStatus::InStock
        } else if quantity > 10 {
            StockStatus::LowStock
        } else {
            StockStatus::Critical
        }
    }
}

// 2. Status do estoque (últimos produtos cadastrados)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatusEntry {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub stock_quantity: i64,
    pub status: StockStatus,
    /// Porcentagem de 0 a 100 (250 unidades = barra cheia)
    pub progress: f64,
}

// 3. Pedidos recentes
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: i64,
    #[schema(example = "Anna Nowak")]
    pub customer_name: String,
    #[schema(example = "2024/05/01 10:00")]
    pub order_date: String,
    pub status: String,
    pub amount: f64,
}

// 4. Devoluções com o nome do produto resolvido (devolução -> item do pedido -> produto)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnEntry {
    pub id: i64,
    #[schema(example = "Brak produktu")]
    pub product_name: String,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub return_date: Option<String>,
}

// ?q= das buscas de pedidos e clientes
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: Option<String>,
}
