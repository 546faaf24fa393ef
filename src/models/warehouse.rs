// src/models/warehouse.rs

// Registros como chegam da API do armazém (Django).
// Campos numéricos soltos ficam como `Value`: o backend manda DecimalField como string,
// às vezes com vírgula, às vezes null. A conversão acontece em `common::coerce`.
// Campo ausente e campo null são tratados igual (ambos viram `Value::Null`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::common::coerce::{deserialize_loose_date, deserialize_loose_id};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub stock_quantity: Value,
    #[serde(default)]
    pub barcode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// O pedido pode trazer o cliente embutido (serializer) ou só o id (`values()`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CustomerRef {
    Embedded(Customer),
    Id(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    #[serde(default, alias = "customer_id")]
    pub customer: Option<CustomerRef>,
    #[serde(default, deserialize_with = "deserialize_loose_date")]
    pub order_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: Value,
}

impl Order {
    pub fn embedded_customer(&self) -> Option<&Customer> {
        match &self.customer {
            Some(CustomerRef::Embedded(customer)) => Some(customer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    #[serde(default, alias = "order_id")]
    pub order: Option<i64>,
    #[serde(default, alias = "product_id", deserialize_with = "deserialize_loose_id")]
    pub product: Option<i64>,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Return {
    pub id: i64,
    #[serde(default, alias = "order_item_id", deserialize_with = "deserialize_loose_id")]
    pub order_item: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_loose_date")]
    pub return_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
