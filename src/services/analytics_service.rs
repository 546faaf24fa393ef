// src/services/analytics_service.rs

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    client::WarehouseClient,
    common::{
        coerce::{parse_float_with_comma, parse_timestamp, to_number},
        error::AppError,
    },
    models::{
        analytics::{AnalyticsSummary, PriceImpactRow, SalesPoint, Timeframe, TopProductRow},
        warehouse::{Order, OrderItem, Product, Return},
    },
};

// Parâmetros fixos da simulação de preço. Não vêm de nenhum modelo de elasticidade.
pub const DISCOUNT_PRICE_FACTOR: f64 = 0.8;
pub const PROJECTED_SALES_FACTOR: f64 = 1.7;
pub const TOP_PRODUCTS_LIMIT: usize = 5;
pub const DEFAULT_TREND: &str = "up";
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone)]
pub struct AnalyticsService {
    client: Arc<dyn WarehouseClient>,
}

impl AnalyticsService {
    pub fn new(client: Arc<dyn WarehouseClient>) -> Self {
        Self { client }
    }

    pub async fn get_sales_data(&self, timeframe: &Timeframe) -> Result<Vec<SalesPoint>, AppError> {
        let orders = self.client.fetch_orders().await?;
        Ok(sales_series(&orders, timeframe, Utc::now()))
    }

    pub async fn get_summary(&self, timeframe: &Timeframe) -> Result<AnalyticsSummary, AppError> {
        let (orders, returns) =
            tokio::try_join!(self.client.fetch_orders(), self.client.fetch_returns())?;
        Ok(summarize(&orders, &returns, timeframe, Utc::now()))
    }

    pub async fn get_price_change_impact(&self) -> Result<Vec<PriceImpactRow>, AppError> {
        let (products, items) =
            tokio::try_join!(self.client.fetch_products(), self.client.fetch_order_items())?;
        Ok(price_change_impact(&products, &items))
    }

    pub async fn get_top_products(&self) -> Result<Vec<TopProductRow>, AppError> {
        let (products, items) =
            tokio::try_join!(self.client.fetch_products(), self.client.fetch_order_items())?;
        Ok(top_products(&products, &items))
    }
}

// `valor || 0`: NaN (e 0) viram 0
fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

// Ordem total para ordenar decrescente; NaN vai para o fim
fn descending(a: f64, b: f64) -> Ordering {
    let key = |v: f64| if v.is_nan() { f64::NEG_INFINITY } else { v };
    key(b).total_cmp(&key(a))
}

fn record_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.filter(|s| !s.is_empty()).and_then(parse_timestamp)
}

/// Vendas por dia, de `now - N dias` até `now`, inclusive, sem buracos.
/// Só entram pedidos com data e com total não nulo.
pub fn sales_series(orders: &[Order], timeframe: &Timeframe, now: DateTime<Utc>) -> Vec<SalesPoint> {
    let start = now - Duration::days(timeframe.lookback_days());

    let mut sales_by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for order in orders {
        if order.total.is_null() {
            continue;
        }
        let Some(order_date) = record_timestamp(order.order_date.as_deref()) else {
            continue;
        };
        if order_date >= start {
            let day = sales_by_day.entry(order_date.date_naive()).or_insert(0.0);
            *day = or_zero(*day) + to_number(&order.total);
        }
    }

    let mut points = Vec::new();
    let mut cursor = start;
    while cursor <= now {
        let day = cursor.date_naive();
        points.push(SalesPoint {
            date: day.format("%Y-%m-%d").to_string(),
            sales: or_zero(sales_by_day.get(&day).copied().unwrap_or(0.0)),
        });
        cursor += Duration::days(1);
    }
    points
}

fn growth(current: f64, previous: f64, when_previous_is_zero: f64) -> f64 {
    if previous == 0.0 {
        when_previous_is_zero
    } else {
        (current - previous) / previous * 100.0
    }
}

fn order_total(order: &Order) -> f64 {
    if order.total.is_null() { 0.0 } else { to_number(&order.total) }
}

/// Resumo do período atual `[now-N, now]` contra o anterior `[now-2N, now-N)`.
/// Crescimento com período anterior zerado: 100 para vendas e pedidos, 0 para devoluções.
pub fn summarize(
    orders: &[Order],
    returns: &[Return],
    timeframe: &Timeframe,
    now: DateTime<Utc>,
) -> AnalyticsSummary {
    let days = timeframe.lookback_days();
    let current_start = now - Duration::days(days);
    let previous_start = now - Duration::days(days * 2);

    let in_current = |ts: DateTime<Utc>| ts >= current_start;
    let in_previous = |ts: DateTime<Utc>| ts >= previous_start && ts < current_start;

    let dated_orders: Vec<(DateTime<Utc>, &Order)> = orders
        .iter()
        .filter_map(|o| record_timestamp(o.order_date.as_deref()).map(|ts| (ts, o)))
        .collect();
    let return_dates: Vec<DateTime<Utc>> = returns
        .iter()
        .filter_map(|r| record_timestamp(r.return_date.as_deref()))
        .collect();

    let current_orders: Vec<&Order> = dated_orders
        .iter()
        .filter(|(ts, _)| in_current(*ts))
        .map(|(_, o)| *o)
        .collect();
    let previous_orders: Vec<&Order> = dated_orders
        .iter()
        .filter(|(ts, _)| in_previous(*ts))
        .map(|(_, o)| *o)
        .collect();

    let current_returns = return_dates.iter().filter(|ts| in_current(**ts)).count();
    let previous_returns = return_dates.iter().filter(|ts| in_previous(**ts)).count();

    let current_sales: f64 = current_orders.iter().map(|o| order_total(o)).sum();
    let previous_sales: f64 = previous_orders.iter().map(|o| order_total(o)).sum();

    AnalyticsSummary {
        total_sales: current_sales,
        order_count: current_orders.len(),
        return_count: current_returns,
        sales_growth: growth(current_sales, previous_sales, 100.0),
        order_growth: growth(
            current_orders.len() as f64,
            previous_orders.len() as f64,
            100.0,
        ),
        return_growth: growth(current_returns as f64, previous_returns as f64, 0.0),
    }
}

/// Projeção de -20% no preço e +70% nas vendas para os 5 produtos mais vendidos em quantidade.
/// A saída segue a ordem da lista de produtos, não a ordem do ranking.
pub fn price_change_impact(products: &[Product], items: &[OrderItem]) -> Vec<PriceImpactRow> {
    // Quantidade por produto, na ordem em que o produto aparece pela primeira vez.
    // Itens sem produto legível somam sob a chave `None`: ocupam vaga no ranking, mas não casam com nenhum produto.
    let mut quantities: Vec<(Option<i64>, f64)> = Vec::new();
    let mut position: HashMap<Option<i64>, usize> = HashMap::new();
    for item in items {
        let quantity = parse_float_with_comma(&item.quantity);
        match position.get(&item.product) {
            Some(&idx) => quantities[idx].1 = or_zero(quantities[idx].1) + quantity,
            None => {
                position.insert(item.product, quantities.len());
                quantities.push((item.product, quantity));
            }
        }
    }

    let mut ranking = quantities.clone();
    ranking.sort_by(|a, b| descending(a.1, b.1));
    let top_ids: Vec<Option<i64>> = ranking
        .iter()
        .take(TOP_PRODUCTS_LIMIT)
        .map(|(id, _)| *id)
        .collect();

    products
        .iter()
        .filter(|product| top_ids.contains(&Some(product.id)))
        .map(|product| {
            let before_price = parse_float_with_comma(&product.price);
            let before_sales = position
                .get(&Some(product.id))
                .map(|&idx| or_zero(quantities[idx].1))
                .unwrap_or(0.0);
            let after_sales = if before_sales > 0.0 {
                before_sales * PROJECTED_SALES_FACTOR
            } else {
                0.0
            };

            PriceImpactRow {
                name: product.name.clone(),
                before_price,
                after_price: before_price * DISCOUNT_PRICE_FACTOR,
                before_sales,
                after_sales,
            }
        })
        .collect()
}

/// Top 5 produtos por receita. Aqui a conversão é a numérica estrita, sem tolerância a vírgula.
pub fn top_products(products: &[Product], items: &[OrderItem]) -> Vec<TopProductRow> {
    let mut stats: HashMap<i64, (f64, f64)> = HashMap::new();
    for item in items {
        let Some(product_id) = item.product else {
            continue;
        };
        let quantity = to_number(&item.quantity);
        let price = to_number(&item.price);
        let entry = stats.entry(product_id).or_insert((0.0, 0.0));
        entry.0 += quantity;
        entry.1 += price * quantity;
    }

    let mut rows: Vec<TopProductRow> = products
        .iter()
        .filter_map(|product| {
            stats.get(&product.id).map(|&(sales, revenue)| TopProductRow {
                id: product.id,
                name: product.name.clone(),
                category: product
                    .category
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                sales,
                revenue,
                trend: DEFAULT_TREND.to_string(),
            })
        })
        .collect();

    rows.sort_by(|a, b| descending(a.revenue, b.revenue));
    rows.truncate(TOP_PRODUCTS_LIMIT);
    rows
}
