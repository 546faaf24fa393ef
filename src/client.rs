pub mod warehouse_client;
pub use warehouse_client::{HttpWarehouseClient, WarehouseClient};

#[cfg(test)]
pub mod in_memory;
#[cfg(test)]
pub use in_memory::InMemoryWarehouseClient;
