use crate::error::app_error::AppError;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::feed::{CampaignSetupRequest, CampaignSetupResponse, FeedFieldsResponse, FeedNodesResponse, FeedValidationRequest, FeedValidationResponse};

#[async_trait::async_trait]
pub trait FeedGateway {
    async fn validate_feed(&self, request: &FeedValidationRequest) -> Result<FeedValidationResponse, AppError>;
    async fn feed_fields(&self, validation_id: &str) -> Result<FeedFieldsResponse, AppError>;
    async fn feed_nodes(&self, validation_id: &str) -> Result<FeedNodesResponse, AppError>;
    async fn setup_campaign(&self, request: &CampaignSetupRequest) -> Result<CampaignSetupResponse, AppError>;
}

#[async_trait::async_trait]
impl FeedGateway for HttpGateway {
    async fn validate_feed(&self, request: &FeedValidationRequest) -> Result<FeedValidationResponse, AppError> {
        let url = self.api_url("feed/validate");
        self.send_json(self.client.post(&url).json(request), &url).await
    }

    async fn feed_fields(&self, validation_id: &str) -> Result<FeedFieldsResponse, AppError> {
        let url = self.api_url(&format!("feed/fields/{}", urlencoding::encode(validation_id)));
        self.send_json(self.client.get(&url), &url).await
    }

    async fn feed_nodes(&self, validation_id: &str) -> Result<FeedNodesResponse, AppError> {
        let url = self.api_url(&format!("feed/nodes/{}", urlencoding::encode(validation_id)));
        self.send_json(self.client.get(&url), &url).await
    }

    async fn setup_campaign(&self, request: &CampaignSetupRequest) -> Result<CampaignSetupResponse, AppError> {
        let url = self.api_url("campaign/setup");
        self.send_json(self.client.post(&url).json(request), &url).await
    }
}
