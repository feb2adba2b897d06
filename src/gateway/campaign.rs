use crate::error::app_error::AppError;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::campaign::{Campaign, CampaignFilters, CampaignsResponse, CreateCampaignRequest};

#[async_trait::async_trait]
pub trait CampaignGateway {
    async fn list_campaigns(&self, filters: &CampaignFilters) -> Result<CampaignsResponse, AppError>;
    async fn create_campaign(&self, request: &CreateCampaignRequest) -> Result<Campaign, AppError>;
}

#[async_trait::async_trait]
impl CampaignGateway for HttpGateway {
    async fn list_campaigns(&self, filters: &CampaignFilters) -> Result<CampaignsResponse, AppError> {
        let url = self.api_url("campaigns");
        let request = self.client.get(&url).query(&filters.query_pairs());
        self.send_json(request, &url).await
    }

    async fn create_campaign(&self, request: &CreateCampaignRequest) -> Result<Campaign, AppError> {
        let url = self.api_url("campaign");
        self.send_json(self.client.post(&url).json(request), &url).await
    }
}
