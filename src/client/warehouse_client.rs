// src/client/warehouse_client.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    common::error::AppError,
    config::WarehouseApiSettings,
    models::warehouse::{Customer, Order, OrderItem, Product, Return},
};

// Contrato com a API do armazém: só leituras de coleções inteiras.
// Sem paginação, sem filtro no servidor. Tudo é filtrado aqui.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError>;
    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError>;
    async fn fetch_customers(&self) -> Result<Vec<Customer>, AppError>;
    async fn fetch_returns(&self) -> Result<Vec<Return>, AppError>;
    async fn fetch_order_items(&self) -> Result<Vec<OrderItem>, AppError>;
}

// Implementação real via reqwest
#[derive(Debug, Clone)]
pub struct HttpWarehouseClient {
    client: Client,
    base_url: String,
    prefix: String,
}

impl HttpWarehouseClient {
    pub fn new(settings: &WarehouseApiSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente HTTP: {}", e))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            prefix: format!("/{}", settings.prefix.trim_matches('/')),
        })
    }

    fn url_for(&self, collection: &str) -> String {
        if self.prefix == "/" {
            format!("{}/{}/", self.base_url, collection)
        } else {
            format!("{}{}/{}/", self.base_url, self.prefix, collection)
        }
    }

    // Qualquer falha (rede, status != 2xx, JSON inválido) vira o mesmo FetchFailed.
    async fn get_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, AppError> {
        let url = self.url_for(collection);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::fetch_failed(collection, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch_failed(
                collection,
                format!("status {}", status),
            ));
        }

        let records = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::fetch_failed(collection, e))?;

        tracing::debug!("{} registros em {}", records.len(), collection);
        Ok(records)
    }
}

#[async_trait]
impl WarehouseClient for HttpWarehouseClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.get_collection("products").await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError> {
        self.get_collection("orders").await
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.get_collection("customers").await
    }

    async fn fetch_returns(&self) -> Result<Vec<Return>, AppError> {
        self.get_collection("returns").await
    }

    async fn fetch_order_items(&self) -> Result<Vec<OrderItem>, AppError> {
        self.get_collection("orderitems").await
    }
}
