// src/models/analytics.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Janela de análise. Valor desconhecido não é erro: a janela começa "agora".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeframe {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    Year,
    Unrecognized(String),
}

impl Timeframe {
    /// Tamanho da janela em dias.
    pub fn lookback_days(&self) -> i64 {
        match self {
            Timeframe::SevenDays => 7,
            Timeframe::ThirtyDays => 30,
            Timeframe::NinetyDays => 90,
            Timeframe::Year => 365,
            Timeframe::Unrecognized(_) => 0,
        }
    }
}

impl From<&str> for Timeframe {
    fn from(value: &str) -> Self {
        match value {
            "7days" => Timeframe::SevenDays,
            "30days" => Timeframe::ThirtyDays,
            "90days" => Timeframe::NinetyDays,
            "year" => Timeframe::Year,
            other => Timeframe::Unrecognized(other.to_string()),
        }
    }
}

// Query string das rotas de analytics (?timeframe=30days)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeframeQuery {
    /// 7days | 30days | 90days | year (padrão: 7days)
    pub timeframe: Option<String>,
}

impl TimeframeQuery {
    pub fn timeframe(&self) -> Timeframe {
        Timeframe::from(self.timeframe.as_deref().unwrap_or("7days"))
    }
}

// 1. Série de vendas por dia
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    #[schema(example = "2024-05-01")]
    pub date: String,
    pub sales: f64,
}

// 2. Resumo do período contra o período anterior
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_sales: f64,
    pub order_count: usize,
    pub return_count: usize,
    pub sales_growth: f64,
    pub order_growth: f64,
    pub return_growth: f64,
}

// 3. Simulação de mudança de preço (placeholder de negócio)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceImpactRow {
    pub name: String,
    pub before_price: f64,
    pub after_price: f64,
    pub before_sales: f64,
    pub after_sales: f64,
}

// 4. Top produtos por receita
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub sales: f64,
    pub revenue: f64,
    #[schema(example = "up")]
    pub trend: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_mapping() {
        assert_eq!(Timeframe::from("7days").lookback_days(), 7);
        assert_eq!(Timeframe::from("30days").lookback_days(), 30);
        assert_eq!(Timeframe::from("90days").lookback_days(), 90);
        assert_eq!(Timeframe::from("year").lookback_days(), 365);
        assert_eq!(Timeframe::from("fortnight").lookback_days(), 0);
    }

    #[test]
    fn missing_query_defaults_to_seven_days() {
        let query = TimeframeQuery { timeframe: None };
        assert_eq!(query.timeframe(), Timeframe::SevenDays);
    }

    #[test]
    fn rows_serialize_in_camel_case() {
        let row = PriceImpactRow {
            name: "Regał".into(),
            before_price: 10.0,
            after_price: 8.0,
            before_sales: 3.0,
            after_sales: 5.1,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("beforePrice").is_some());
        assert!(json.get("afterSales").is_some());
    }
}
