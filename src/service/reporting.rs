use crate::cache::{CacheKey, ResponseCache};
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::gateway::reporting::ReportingGateway;
use crate::models::job_stats::{CampaignStatsRequest, JobStatsRequest, JobStatsResponse};
use validator::Validate;

pub const JOB_STATS_NAMESPACE: &str = "jobstats";
pub const CAMPAIGN_STATS_NAMESPACE: &str = "campaignstats";

pub struct ReportingService<'a, G> {
    gateway: &'a G,
    cache: &'a ResponseCache,
    ttl: &'a CacheConfig,
}

impl<'a, G: ReportingGateway + Sync> ReportingService<'a, G> {
    pub fn new(gateway: &'a G, cache: &'a ResponseCache, ttl: &'a CacheConfig) -> Self {
        Self { gateway, cache, ttl }
    }

    pub async fn job_stats(&self, request: &JobStatsRequest) -> Result<JobStatsResponse, AppError> {
        request.validate()?;
        let key = CacheKey::new(JOB_STATS_NAMESPACE)
            .with("org", request.org_id)
            .with("campaign", &request.campaign_name)
            .with("from", request.from_date)
            .with("to", request.to_date);

        self.cache
            .get_or_fetch(key, self.ttl.job_stats_ttl(), || self.gateway.job_stats(request))
            .await
    }

    pub async fn campaign_stats(&self, request: &CampaignStatsRequest) -> Result<JobStatsResponse, AppError> {
        if request.from_date > request.to_date {
            return Err(AppError::BadRequest("from must not be after to".to_string()));
        }
        let key = CacheKey::new(CAMPAIGN_STATS_NAMESPACE)
            .with("org", request.org_id)
            .with("from", request.from_date)
            .with("to", request.to_date);

        self.cache
            .get_or_fetch(key, self.ttl.job_stats_ttl(), || self.gateway.campaign_stats(request))
            .await
    }
}
