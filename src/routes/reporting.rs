use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::job_stats::{CampaignStatsRequest, JobStatsRequest, JobStatsResponse};
use crate::service::reporting::ReportingService;
use rocket::serde::json::Json;
use rocket::{State, post};
use rocket_okapi::openapi;
use std::sync::Arc;

/// Job statistics for one campaign over a date range.
/// Identical requests are answered from cache while fresh.
#[openapi(tag = "Reports")]
#[post("/job-stats", data = "<payload>")]
pub async fn get_job_stats(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<JobStatsRequest>,
) -> Result<Json<JobStatsResponse>, AppError> {
    let service = ReportingService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.job_stats(&payload).await?))
}

/// Organisation-wide statistics over a date range.
#[openapi(tag = "Reports")]
#[post("/campaign-stats", data = "<payload>")]
pub async fn get_campaign_stats(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<CampaignStatsRequest>,
) -> Result<Json<JobStatsResponse>, AppError> {
    let service = ReportingService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.campaign_stats(&payload).await?))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_job_stats, get_campaign_stats]
}
