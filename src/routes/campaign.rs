use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::campaign::{Campaign, CampaignFilters, CampaignStatus, CreateCampaignRequest, StatusChangeResponse};
use crate::models::dashboard::CampaignOverview;
use crate::service::campaign::CampaignService;
use crate::service::list_view::{CampaignPage, ListViewState, StatusFilter};
use crate::util::{parse_date_param, parse_page, parse_page_size};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use std::sync::Arc;

/// One page of the campaign table.
///
/// `search` matches campaign or client name, `status` takes a filter label
/// ("All States", "In Review", "Alerts", ...) or an upstream status.
/// `page_size` must be 10, 25 or 50. An out-of-range `page` is clamped to the last page.
/// `client`, `from` and `to` are forwarded to the campaign service.
#[allow(clippy::too_many_arguments)]
#[openapi(tag = "Campaigns")]
#[get("/?<search>&<status>&<page>&<page_size>&<client>&<from>&<to>")]
pub async fn list_campaigns(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    search: Option<String>,
    status: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    client: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<Json<CampaignPage>, AppError> {
    let status_filter = status.as_deref().map(str::parse::<StatusFilter>).transpose()?.unwrap_or_default();
    let state = ListViewState::new(
        search.unwrap_or_default(),
        status_filter,
        parse_page(page.as_deref())?,
        parse_page_size(page_size.as_deref())?,
    );
    let filters = CampaignFilters {
        client: client.filter(|c| !c.trim().is_empty()),
        status: None,
        from: parse_date_param("from", from.as_deref())?,
        to: parse_date_param("to", to.as_deref())?,
    };

    let service = CampaignService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.list_page(&filters, &state).await?))
}

/// Create a campaign. Cached campaign lists are dropped on success.
#[openapi(tag = "Campaigns")]
#[post("/", data = "<payload>")]
pub async fn create_campaign(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<CreateCampaignRequest>,
) -> Result<status::Created<Json<Campaign>>, AppError> {
    let service = CampaignService::new(gateway.inner(), cache.inner(), cache_config.inner());
    let campaign = service.create(&payload).await?;
    Ok(status::Created::new(format!("/campaigns/{}", campaign.id)).body(Json(campaign)))
}

/// Campaign overview: budget figures, headline metrics and the daily chart.
/// The window defaults to the campaign start date through today.
#[openapi(tag = "Campaigns")]
#[get("/<id>/overview?<from>&<to>")]
pub async fn get_campaign_overview(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    id: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<Json<CampaignOverview>, AppError> {
    let from = parse_date_param("from", from.as_deref())?;
    let to = parse_date_param("to", to.as_deref())?;
    let today = chrono::Utc::now().date_naive();

    let service = CampaignService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.overview(id, from, to, today).await?))
}

/// Request that a campaign be paused. Acknowledged with 202; not persisted.
#[openapi(tag = "Campaigns")]
#[post("/<id>/pause")]
pub async fn pause_campaign(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    id: &str,
) -> Result<status::Accepted<Json<StatusChangeResponse>>, AppError> {
    let service = CampaignService::new(gateway.inner(), cache.inner(), cache_config.inner());
    let response = service.request_status_change(id, CampaignStatus::Paused).await?;
    Ok(status::Accepted(Json(response)))
}

/// Request that a campaign be resumed. Acknowledged with 202; not persisted.
#[openapi(tag = "Campaigns")]
#[post("/<id>/resume")]
pub async fn resume_campaign(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    id: &str,
) -> Result<status::Accepted<Json<StatusChangeResponse>>, AppError> {
    let service = CampaignService::new(gateway.inner(), cache.inner(), cache_config.inner());
    let response = service.request_status_change(id, CampaignStatus::Active).await?;
    Ok(status::Accepted(Json(response)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_campaigns, create_campaign, get_campaign_overview, pause_campaign, resume_campaign]
}
