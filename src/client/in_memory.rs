// src/client/in_memory.rs

// Backend falso para os testes de serviço e de rota.

use async_trait::async_trait;

use crate::{
    client::WarehouseClient,
    common::error::AppError,
    models::warehouse::{Customer, Order, OrderItem, Product, Return},
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryWarehouseClient {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub returns: Vec<Return>,
    pub order_items: Vec<OrderItem>,
    /// Coleção que deve falhar, simulando o backend fora do ar.
    pub failing: Option<&'static str>,
}

impl InMemoryWarehouseClient {
    fn check(&self, resource: &'static str) -> Result<(), AppError> {
        match self.failing {
            Some(failing) if failing == resource => {
                Err(AppError::fetch_failed(resource, "status 503 Service Unavailable"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl WarehouseClient for InMemoryWarehouseClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.check("products")?;
        Ok(self.products.clone())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, AppError> {
        self.check("orders")?;
        Ok(self.orders.clone())
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.check("customers")?;
        Ok(self.customers.clone())
    }

    async fn fetch_returns(&self) -> Result<Vec<Return>, AppError> {
        self.check("returns")?;
        Ok(self.returns.clone())
    }

    async fn fetch_order_items(&self) -> Result<Vec<OrderItem>, AppError> {
        self.check("orderitems")?;
        Ok(self.order_items.clone())
    }
}
