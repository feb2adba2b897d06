use crate::error::app_error::AppError;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::client::{Client, CreateClientRequest};

#[async_trait::async_trait]
pub trait ClientGateway {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError>;
    async fn create_client(&self, request: &CreateClientRequest) -> Result<Client, AppError>;
}

#[async_trait::async_trait]
impl ClientGateway for HttpGateway {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let url = self.api_url("clients");
        self.send_json(self.client.get(&url), &url).await
    }

    async fn create_client(&self, request: &CreateClientRequest) -> Result<Client, AppError> {
        let url = self.api_url("clients");
        self.send_json(self.client.post(&url).json(request), &url).await
    }
}
