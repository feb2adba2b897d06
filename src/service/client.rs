use crate::cache::{CacheKey, ResponseCache};
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::gateway::client::ClientGateway;
use crate::models::client::{Client, CreateClientRequest};
use tracing::info;
use validator::Validate;

pub const CLIENTS_NAMESPACE: &str = "clients";

pub struct ClientService<'a, G> {
    gateway: &'a G,
    cache: &'a ResponseCache,
    ttl: &'a CacheConfig,
}

impl<'a, G: ClientGateway + Sync> ClientService<'a, G> {
    pub fn new(gateway: &'a G, cache: &'a ResponseCache, ttl: &'a CacheConfig) -> Self {
        Self { gateway, cache, ttl }
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        self.cache
            .get_or_fetch(CacheKey::new(CLIENTS_NAMESPACE), self.ttl.clients_ttl(), || self.gateway.list_clients())
            .await
    }

    pub async fn create(&self, request: &CreateClientRequest) -> Result<Client, AppError> {
        request.validate()?;
        let client = self.gateway.create_client(request).await?;
        self.cache.invalidate_namespace(CLIENTS_NAMESPACE).await;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }
}
