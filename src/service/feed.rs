use crate::cache::{CacheKey, ResponseCache};
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::gateway::feed::FeedGateway;
use crate::models::feed::{CampaignSetupRequest, CampaignSetupResponse, FeedFieldsResponse, FeedNodesResponse, FeedValidationRequest, FeedValidationResult};
use crate::service::campaign::CAMPAIGNS_NAMESPACE;
use crate::service::field_mapping::mapping_status;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

pub const FEED_FIELDS_NAMESPACE: &str = "feed-fields";
pub const FEED_NODES_NAMESPACE: &str = "feed-nodes";

/// Validation outcome plus, for a valid feed, the nodes and fields available for mapping.
#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedAnalysis {
    pub validation: FeedValidationResult,
    pub fields: Option<FeedFieldsResponse>,
    pub nodes: Option<FeedNodesResponse>,
}

pub struct FeedService<'a, G> {
    gateway: &'a G,
    cache: &'a ResponseCache,
    ttl: &'a CacheConfig,
}

impl<'a, G: FeedGateway + Sync> FeedService<'a, G> {
    pub fn new(gateway: &'a G, cache: &'a ResponseCache, ttl: &'a CacheConfig) -> Self {
        Self { gateway, cache, ttl }
    }

    /// Validation is never cached: the feed behind a URL changes between attempts.
    pub async fn validate(&self, request: &FeedValidationRequest) -> Result<FeedValidationResult, AppError> {
        request.validate()?;
        let result = FeedValidationResult::from(self.gateway.validate_feed(request).await?);
        if result.validation.is_valid {
            info!(
                feed_url = %request.feed_url,
                format = result.detected_format_name.name(),
                records = result.validation.total_records,
                "feed validated"
            );
        } else {
            warn!(feed_url = %request.feed_url, errors = ?result.validation.validation_errors, "feed failed validation");
        }
        Ok(result)
    }

    pub async fn fields(&self, validation_id: &str) -> Result<FeedFieldsResponse, AppError> {
        let key = CacheKey::new(FEED_FIELDS_NAMESPACE).with("validation", validation_id);
        self.cache
            .get_or_fetch(key, self.ttl.feed_fields_ttl(), || self.gateway.feed_fields(validation_id))
            .await
    }

    pub async fn nodes(&self, validation_id: &str) -> Result<FeedNodesResponse, AppError> {
        let key = CacheKey::new(FEED_NODES_NAMESPACE).with("validation", validation_id);
        self.cache
            .get_or_fetch(key, self.ttl.feed_nodes_ttl(), || self.gateway.feed_nodes(validation_id))
            .await
    }

    /// Validates a feed and, when it is valid, loads its fields and nodes together.
    pub async fn analyze(&self, request: &FeedValidationRequest) -> Result<FeedAnalysis, AppError> {
        let validation = self.validate(request).await?;
        let validation_id = match (&validation.validation.validation_id, validation.validation.is_valid) {
            (Some(id), true) => id.clone(),
            _ => {
                return Ok(FeedAnalysis {
                    validation,
                    fields: None,
                    nodes: None,
                });
            }
        };

        let (fields, nodes) = tokio::try_join!(self.fields(&validation_id), self.nodes(&validation_id))?;
        Ok(FeedAnalysis {
            validation,
            fields: Some(fields),
            nodes: Some(nodes),
        })
    }

    /// Submits a feed-backed campaign. Refused until every required field is mapped.
    pub async fn setup(&self, request: &CampaignSetupRequest) -> Result<CampaignSetupResponse, AppError> {
        request.validate()?;
        let status = mapping_status(&request.field_mappings)?;
        if !status.ready {
            return Err(AppError::BadRequest(format!(
                "Required fields are not mapped: {}",
                status.missing_required.join(", ")
            )));
        }

        let response = self.gateway.setup_campaign(request).await?;
        self.cache.invalidate_namespace(CAMPAIGNS_NAMESPACE).await;
        info!(campaign_id = %response.campaign_id, validation_id = %request.validation_id, "campaign setup submitted");
        Ok(response)
    }
}
