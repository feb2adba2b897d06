use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::feed::{CampaignSetupRequest, CampaignSetupResponse, FeedFieldsResponse, FeedNodesResponse, FeedValidationRequest, FeedValidationResult};
use crate::service::feed::{FeedAnalysis, FeedService};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use std::sync::Arc;

/// Validate a job feed URL. The detected format is also returned by name.
#[openapi(tag = "Feeds")]
#[post("/validate", data = "<payload>")]
pub async fn validate_feed(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<FeedValidationRequest>,
) -> Result<Json<FeedValidationResult>, AppError> {
    let service = FeedService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.validate(&payload).await?))
}

/// Validate a feed and, if valid, load its fields and nodes in one call.
#[openapi(tag = "Feeds")]
#[post("/analyze", data = "<payload>")]
pub async fn analyze_feed(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<FeedValidationRequest>,
) -> Result<Json<FeedAnalysis>, AppError> {
    let service = FeedService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.analyze(&payload).await?))
}

/// Fields detected in a validated feed.
#[openapi(tag = "Feeds")]
#[get("/<validation_id>/fields")]
pub async fn get_feed_fields(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    validation_id: &str,
) -> Result<Json<FeedFieldsResponse>, AppError> {
    let service = FeedService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.fields(validation_id).await?))
}

/// Nodes and structure of a validated feed.
#[openapi(tag = "Feeds")]
#[get("/<validation_id>/nodes")]
pub async fn get_feed_nodes(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    validation_id: &str,
) -> Result<Json<FeedNodesResponse>, AppError> {
    let service = FeedService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.nodes(validation_id).await?))
}

/// Submit a feed-backed campaign. Returns 400 while any required field is unmapped.
#[openapi(tag = "Campaign Setup")]
#[post("/", data = "<payload>")]
pub async fn setup_campaign(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<CampaignSetupRequest>,
) -> Result<status::Created<Json<CampaignSetupResponse>>, AppError> {
    let service = FeedService::new(gateway.inner(), cache.inner(), cache_config.inner());
    let response = service.setup(&payload).await?;
    Ok(status::Created::new(format!("/campaigns/{}", response.campaign_id)).body(Json(response)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![validate_feed, analyze_feed, get_feed_fields, get_feed_nodes]
}

pub fn setup_routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![setup_campaign]
}
