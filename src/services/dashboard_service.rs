// src/services/dashboard_service.rs

use std::sync::Arc;

use crate::{
    client::WarehouseClient,
    common::{
        coerce::{parse_float, parse_int, parse_timestamp, to_display_string, to_number},
        error::AppError,
    },
    models::{
        dashboard::{DashboardStats, InventoryStatusEntry, RecentOrder, ReturnEntry, StockStatus},
        warehouse::{Customer, Order, OrderItem, Product, Return},
    },
};

const LOW_STOCK_THRESHOLD: f64 = 10.0;
const PENDING_STATUS: &str = "PENDING";
const INVENTORY_WIDGET_SIZE: usize = 6;
const RECENT_ORDERS_SIZE: usize = 5;
const FULL_STOCK_UNITS: f64 = 250.0;
const MISSING_PRODUCT: &str = "Brak produktu";

#[derive(Clone)]
pub struct DashboardService {
    client: Arc<dyn WarehouseClient>,
}

impl DashboardService {
    pub fn new(client: Arc<dyn WarehouseClient>) -> Self {
        Self { client }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        let (products, orders) =
            tokio::try_join!(self.client.fetch_products(), self.client.fetch_orders())?;
        Ok(dashboard_stats(&products, &orders))
    }

    pub async fn get_inventory_status(&self) -> Result<Vec<InventoryStatusEntry>, AppError> {
        let products = self.client.fetch_products().await?;
        Ok(inventory_status(&products))
    }

    pub async fn get_recent_orders(&self) -> Result<Vec<RecentOrder>, AppError> {
        let orders = self.client.fetch_orders().await?;
        Ok(recent_orders(&orders))
    }

    pub async fn search_orders(&self, query: &str) -> Result<Vec<Order>, AppError> {
        let orders = self.client.fetch_orders().await?;
        Ok(filter_orders(orders, query))
    }

    pub async fn get_returns(&self) -> Result<Vec<ReturnEntry>, AppError> {
        let (returns, items, products) = tokio::try_join!(
            self.client.fetch_returns(),
            self.client.fetch_order_items(),
            self.client.fetch_products()
        )?;
        Ok(returns_with_products(&returns, &items, &products))
    }

    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let customers = self.client.fetch_customers().await?;
        Ok(filter_customers(customers, query))
    }
}

pub fn dashboard_stats(products: &[Product], orders: &[Order]) -> DashboardStats {
    DashboardStats {
        total_products: products.len(),
        low_stock_count: products
            .iter()
            .filter(|p| to_number(&p.stock_quantity) <= LOW_STOCK_THRESHOLD)
            .count(),
        pending_orders: orders
            .iter()
            .filter(|o| o.status.as_deref() == Some(PENDING_STATUS))
            .count(),
    }
}

/// Os últimos 6 produtos da lista, na ordem em que vieram.
pub fn inventory_status(products: &[Product]) -> Vec<InventoryStatusEntry> {
    let skip = products.len().saturating_sub(INVENTORY_WIDGET_SIZE);
    products[skip..]
        .iter()
        .map(|product| {
            let stock_quantity = parse_int(&product.stock_quantity);
            InventoryStatusEntry {
                id: product.id,
                name: product.name.clone(),
                sku: product.sku.clone(),
                stock_quantity,
                status: StockStatus::from_quantity(stock_quantity),
                progress: (stock_quantity as f64 / FULL_STOCK_UNITS * 100.0).min(100.0),
            }
        })
        .collect()
}

fn order_amount(order: &Order) -> f64 {
    match &order.total {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) if !s.is_empty() => parse_float(s),
        _ => 0.0,
    }
}

/// Os últimos 5 pedidos da lista, já formatados para o card.
pub fn recent_orders(orders: &[Order]) -> Vec<RecentOrder> {
    let skip = orders.len().saturating_sub(RECENT_ORDERS_SIZE);
    orders[skip..]
        .iter()
        .map(|order| RecentOrder {
            id: order.id,
            customer_name: order
                .embedded_customer()
                .map(|c| c.full_name())
                .unwrap_or_else(|| "Unknown Customer".to_string()),
            order_date: order
                .order_date
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| ts.format("%Y/%m/%d %H:%M").to_string())
                .unwrap_or_else(|| "No date".to_string()),
            status: order
                .status
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Pending".to_string()),
            amount: order_amount(order),
        })
        .collect()
}

/// Busca por nome do cliente ou status (sem diferenciar maiúsculas) ou pelo texto do total.
pub fn filter_orders(orders: Vec<Order>, query: &str) -> Vec<Order> {
    if query.is_empty() {
        return orders;
    }
    let needle = query.to_lowercase();

    orders
        .into_iter()
        .filter(|order| {
            let by_customer = order
                .embedded_customer()
                .map(|c| c.full_name().to_lowercase().contains(&needle))
                .unwrap_or(false);
            let by_status = order
                .status
                .as_deref()
                .map(|s| s.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let by_total = to_display_string(&order.total)
                .map(|t| t.contains(query))
                .unwrap_or(false);
            by_customer || by_status || by_total
        })
        .collect()
}

pub fn filter_customers(customers: Vec<Customer>, query: &str) -> Vec<Customer> {
    let query = query.trim();
    if query.is_empty() {
        return customers;
    }
    let needle = query.to_lowercase();

    customers
        .into_iter()
        .filter(|c| c.full_name().to_lowercase().contains(&needle))
        .collect()
}

/// Cada devolução com o nome do produto. Item ou produto não encontrado vira "Brak produktu".
/// Em ids repetidos vale o primeiro registro da lista.
pub fn returns_with_products(
    returns: &[Return],
    items: &[OrderItem],
    products: &[Product],
) -> Vec<ReturnEntry> {
    returns
        .iter()
        .map(|ret| {
            let product_name = ret
                .order_item
                .and_then(|item_id| items.iter().find(|item| item.id == item_id))
                .and_then(|item| item.product)
                .and_then(|product_id| products.iter().find(|p| p.id == product_id))
                .map(|product| product.name.clone())
                .unwrap_or_else(|| MISSING_PRODUCT.to_string());

            ReturnEntry {
                id: ret.id,
                product_name,
                notes: ret.notes.clone(),
                status: ret.status.clone(),
                return_date: ret.return_date.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryWarehouseClient;
    use serde_json::{json, Value};

    fn product(id: i64, stock: Value) -> Product {
        serde_json::from_value(json!({
            "id": id, "name": format!("P{}", id), "sku": format!("SKU-{}", id),
            "price": 1, "stock_quantity": stock
        }))
        .unwrap()
    }

    fn order(id: i64, customer: Value, date: Value, status: Value, total: Value) -> Order {
        serde_json::from_value(json!({
            "id": id, "customer": customer, "order_date": date, "status": status, "total": total
        }))
        .unwrap()
    }

    fn customer(id: i64, first: &str, last: &str) -> Value {
        json!({"id": id, "first_name": first, "last_name": last})
    }

    #[test]
    fn stats_count_low_stock_and_pending() {
        let products = vec![
            product(1, json!("10.00")),
            product(2, json!(11)),
            product(3, json!(0)),
            product(4, Value::Null),
        ];
        let orders = vec![
            order(1, Value::Null, Value::Null, json!("PENDING"), json!(1)),
            order(2, Value::Null, Value::Null, json!("SHIPPED"), json!(1)),
            order(3, Value::Null, Value::Null, json!("pending"), json!(1)),
        ];
        let stats = dashboard_stats(&products, &orders);
        assert_eq!(
            stats,
            DashboardStats { total_products: 4, low_stock_count: 3, pending_orders: 1 }
        );
    }

    #[test]
    fn inventory_status_takes_last_six_with_thresholds() {
        let stocks = [500, 300, 51, 50, 11, 10, 0, 125];
        let products: Vec<Product> = stocks
            .iter()
            .enumerate()
            .map(|(i, s)| product(i as i64 + 1, json!(format!("{}.00", s))))
            .collect();

        let entries = inventory_status(&products);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].id, 3);

        let statuses: Vec<StockStatus> = entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::InStock,
                StockStatus::LowStock,
                StockStatus::LowStock,
                StockStatus::Critical,
                StockStatus::Critical,
                StockStatus::InStock,
            ]
        );
        assert_eq!(entries[5].progress, 50.0);
    }

    #[test]
    fn inventory_progress_is_capped() {
        let entries = inventory_status(&[product(1, json!(1000))]);
        assert_eq!(entries[0].progress, 100.0);
        assert_eq!(
            serde_json::to_value(entries[0].status).unwrap(),
            json!("In Stock")
        );
    }

    #[test]
    fn recent_orders_formats_the_last_five() {
        let mut orders: Vec<Order> = (1..=6)
            .map(|id| order(id, Value::Null, Value::Null, Value::Null, Value::Null))
            .collect();
        orders.push(order(
            7,
            customer(1, "Anna", "Nowak"),
            json!("2024-05-01T10:05:00Z"),
            json!("SHIPPED"),
            json!("120.50"),
        ));

        let recent = recent_orders(&orders);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, 3);

        let first = &recent[0];
        assert_eq!(first.customer_name, "Unknown Customer");
        assert_eq!(first.order_date, "No date");
        assert_eq!(first.status, "Pending");
        assert_eq!(first.amount, 0.0);

        let last = recent.last().unwrap();
        assert_eq!(last.customer_name, "Anna Nowak");
        assert_eq!(last.order_date, "2024/05/01 10:05");
        assert_eq!(last.status, "SHIPPED");
        assert_eq!(last.amount, 120.5);
    }

    #[test]
    fn order_search_matches_name_status_or_total() {
        let orders = vec![
            order(1, customer(1, "Anna", "Nowak"), Value::Null, json!("PENDING"), json!(150)),
            order(2, customer(2, "Jan", "Kowalski"), Value::Null, json!("SHIPPED"), json!("99.90")),
            order(3, json!(3), Value::Null, json!("CANCELLED"), Value::Null),
        ];

        let ids = |q: &str| -> Vec<i64> {
            filter_orders(orders.clone(), q).iter().map(|o| o.id).collect()
        };

        assert_eq!(ids("nowak"), vec![1]);
        assert_eq!(ids("shipped"), vec![2]);
        assert_eq!(ids("99.9"), vec![2]);
        assert_eq!(ids("15"), vec![1]);
        assert_eq!(ids(""), vec![1, 2, 3]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn customer_search_is_case_insensitive() {
        let customers: Vec<Customer> = vec![
            serde_json::from_value(customer(1, "Anna", "Nowak")).unwrap(),
            serde_json::from_value(customer(2, "Jan", "Kowalski")).unwrap(),
        ];
        let found = filter_customers(customers.clone(), "JAN K");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
        assert_eq!(filter_customers(customers, "  ").len(), 2);
    }

    #[tokio::test]
    async fn service_fails_when_backend_fails() {
        let service = DashboardService::new(Arc::new(InMemoryWarehouseClient {
            failing: Some("orders"),
            products: vec![product(1, json!(5))],
            ..Default::default()
        }));
        assert!(service.get_stats().await.is_err());
        assert!(service.get_recent_orders().await.is_err());
        assert_eq!(service.get_inventory_status().await.unwrap().len(), 1);
    }

    fn return_of(id: i64, order_item: Value) -> Return {
        serde_json::from_value(json!({
            "id": id, "order_item": order_item, "return_date": "2024-05-02",
            "status": "PENDING", "notes": "Uszkodzone"
        }))
        .unwrap()
    }

    fn order_item(id: i64, product: i64) -> OrderItem {
        serde_json::from_value(json!({"id": id, "order": 1, "product": product, "quantity": 1}))
            .unwrap()
    }

    #[test]
    fn returns_resolve_product_name_through_order_item() {
        let returns = vec![return_of(1, json!(10))];
        let items = vec![order_item(10, 2)];
        let products = vec![product(1, json!(5)), product(2, json!(5))];

        let rows = returns_with_products(&returns, &items, &products);
        assert_eq!(
            rows,
            vec![ReturnEntry {
                id: 1,
                product_name: "P2".into(),
                notes: Some("Uszkodzone".into()),
                status: Some("PENDING".into()),
                return_date: Some("2024-05-02".into()),
            }]
        );
    }

    #[test]
    fn returns_with_unknown_order_item_or_product_are_labelled() {
        let returns = vec![
            return_of(1, json!(99)),   // item inexistente
            return_of(2, json!(10)),   // item aponta para produto inexistente
            return_of(3, Value::Null), // sem item
        ];
        let items = vec![order_item(10, 42)];
        let products = vec![product(1, json!(5))];

        let rows = returns_with_products(&returns, &items, &products);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.product_name == "Brak produktu"));
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn service_returns_join_needs_all_three_collections() {
        let client = InMemoryWarehouseClient {
            returns: vec![return_of(1, json!(10))],
            order_items: vec![order_item(10, 1)],
            products: vec![product(1, json!(5))],
            ..Default::default()
        };
        let rows = DashboardService::new(Arc::new(client.clone())).get_returns().await.unwrap();
        assert_eq!(rows[0].product_name, "P1");

        let failing = InMemoryWarehouseClient { failing: Some("orderitems"), ..client };
        let err = DashboardService::new(Arc::new(failing)).get_returns().await.unwrap_err();
        assert!(matches!(err, AppError::FetchFailed { resource: "orderitems", .. }));
    }
}
