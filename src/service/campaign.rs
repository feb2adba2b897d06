use crate::cache::{CacheKey, ResponseCache};
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::gateway::campaign::CampaignGateway;
use crate::gateway::reporting::ReportingGateway;
use crate::models::campaign::{Campaign, CampaignFilters, CampaignStatus, CampaignsResponse, CreateCampaignRequest, StatusChangeResponse};
use crate::models::dashboard::{CampaignMetrics, CampaignOverview, ReportWindow};
use crate::models::job_stats::{JobStatsRequest, JobStatsResponse};
use crate::service::budget::budget_summary;
use crate::service::chart::campaign_chart;
use crate::service::list_view::{CampaignPage, ListViewState, derive_page};
use crate::service::reporting::ReportingService;
use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

pub const CAMPAIGNS_NAMESPACE: &str = "campaigns";

pub struct CampaignService<'a, G> {
    gateway: &'a G,
    cache: &'a ResponseCache,
    ttl: &'a CacheConfig,
}

fn campaigns_key(filters: &CampaignFilters) -> CacheKey {
    filters
        .query_pairs()
        .into_iter()
        .fold(CacheKey::new(CAMPAIGNS_NAMESPACE), |key, (name, value)| key.with(name, value))
}

impl<'a, G: CampaignGateway + Sync> CampaignService<'a, G> {
    pub fn new(gateway: &'a G, cache: &'a ResponseCache, ttl: &'a CacheConfig) -> Self {
        Self { gateway, cache, ttl }
    }

    /// Full campaign collection for `filters`, served from cache while fresh.
    pub async fn campaigns(&self, filters: &CampaignFilters) -> Result<Vec<Campaign>, AppError> {
        let response: CampaignsResponse = self
            .cache
            .get_or_fetch(campaigns_key(filters), self.ttl.campaigns_ttl(), || self.gateway.list_campaigns(filters))
            .await?;
        Ok(response.campaigns)
    }

    /// One page of the campaign table.
    pub async fn list_page(&self, filters: &CampaignFilters, state: &ListViewState) -> Result<CampaignPage, AppError> {
        let campaigns = self.campaigns(filters).await?;
        Ok(derive_page(&campaigns, state))
    }

    pub async fn find(&self, id: &str) -> Result<Campaign, AppError> {
        self.campaigns(&CampaignFilters::default())
            .await?
            .into_iter()
            .find(|campaign| campaign.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", id)))
    }

    /// Creates a campaign upstream and drops every cached campaign list.
    pub async fn create(&self, request: &CreateCampaignRequest) -> Result<Campaign, AppError> {
        request.validate()?;
        let campaign = self.gateway.create_campaign(request).await?;
        self.cache.invalidate_namespace(CAMPAIGNS_NAMESPACE).await;
        info!(campaign_id = %campaign.id, name = %campaign.name, "campaign created");
        Ok(campaign)
    }

    /// Acknowledges a pause or resume request for an existing campaign.
    /// The campaign service exposes no transition endpoint, so nothing is persisted.
    pub async fn request_status_change(&self, id: &str, requested_status: CampaignStatus) -> Result<StatusChangeResponse, AppError> {
        let campaign = self.find(id).await?;
        info!(
            campaign_id = %campaign.id,
            current = %campaign.status,
            requested = %requested_status,
            "campaign status change requested"
        );
        Ok(StatusChangeResponse {
            id: campaign.id,
            requested_status,
            persisted: false,
        })
    }
}

impl<'a, G: CampaignGateway + ReportingGateway + Sync> CampaignService<'a, G> {
    /// Overview for one campaign: budget figures, headline metrics and the
    /// daily chart over `from..=to`.
    ///
    /// The window defaults to the campaign's start date through `today`.
    pub async fn overview(&self, id: &str, from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Result<CampaignOverview, AppError> {
        let campaign = self.find(id).await?;
        let window = ReportWindow {
            from: from.unwrap_or_else(|| campaign.start_date.date_naive()),
            to: to.unwrap_or(today),
        };

        let request = JobStatsRequest {
            from_date: window.from,
            to_date: window.to,
            org_id: campaign.org_id,
            campaign_name: campaign.name.clone(),
        };
        let stats = ReportingService::new(self.gateway, self.cache, self.ttl).job_stats(&request).await?;

        Ok(CampaignOverview {
            budget: budget_summary(&campaign),
            metrics: campaign_metrics(&stats),
            chart: campaign_chart(&stats.campaign_stats),
            campaign,
            window,
        })
    }
}

/// Headline counters. Daily rows are summed when present so the figures agree
/// with the chart; the response-level totals are used otherwise.
pub fn campaign_metrics(stats: &JobStatsResponse) -> CampaignMetrics {
    let daily = &stats.campaign_stats;
    let (clicks, applies, invalid_clicks, bot_clicks) = if daily.is_empty() {
        (stats.clicks, stats.applies, stats.invalid_clicks, stats.bot_clicks)
    } else {
        daily.iter().fold((0, 0, 0, 0), |(c, a, i, b), stat| {
            (c + stat.click_count, a + stat.apply_count, i + stat.invalid_click_count, b + stat.bot_click_count)
        })
    };
    let total_spend: f64 = daily.iter().map(|stat| stat.spent).sum();

    CampaignMetrics {
        clicks,
        applies,
        total_spend,
        cost_per_action: (applies > 0).then(|| total_spend / applies as f64),
        conversion_rate: stats.conversion_rate,
        invalid_clicks,
        bot_clicks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::SeriesKind;
    use crate::models::pagination::PageSize;
    use crate::service::list_view::StatusFilter;
    use crate::test_utils::{MockGateway, sample_campaigns, sample_create_request, sample_job_stats};

    struct Fixture {
        gateway: MockGateway,
        cache: ResponseCache,
        config: CacheConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let config = CacheConfig::default();
            Self {
                gateway: MockGateway::with_campaigns(sample_campaigns()),
                cache: ResponseCache::new(&config),
                config,
            }
        }

        fn service(&self) -> CampaignService<'_, MockGateway> {
            CampaignService::new(&self.gateway, &self.cache, &self.config)
        }
    }

    #[tokio::test]
    async fn list_is_fetched_once_while_fresh() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let filters = CampaignFilters::default();

        let first = service.list_page(&filters, &ListViewState::default()).await.unwrap();
        let second = service
            .list_page(&filters, &ListViewState::new("uber", StatusFilter::Active, 1, PageSize::Ten))
            .await
            .unwrap();

        assert_eq!(first.total_items, 12);
        assert_eq!(second.total_items, 1);
        assert_eq!(MockGateway::calls(&fixture.gateway.campaign_calls), 1);
    }

    #[tokio::test]
    async fn different_filters_use_different_entries() {
        let fixture = Fixture::new();
        let service = fixture.service();

        service.campaigns(&CampaignFilters::default()).await.unwrap();
        let filtered = service
            .campaigns(&CampaignFilters {
                client: Some("Logistix".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(MockGateway::calls(&fixture.gateway.campaign_calls), 2);
    }

    #[tokio::test]
    async fn create_invalidates_campaign_lists_only() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let stats_key = CacheKey::new("campaignstats").with("org", 552499);
        fixture.cache.insert(stats_key.clone(), &sample_job_stats(), fixture.config.job_stats_ttl()).await;

        service.campaigns(&CampaignFilters::default()).await.unwrap();
        let created = service.create(&sample_create_request()).await.unwrap();
        service.campaigns(&CampaignFilters::default()).await.unwrap();

        assert_eq!(created.name, "Test Centriq");
        assert_eq!(MockGateway::calls(&fixture.gateway.campaign_calls), 2);
        assert!(fixture.cache.get::<JobStatsResponse>(&stats_key).await.is_some());
    }

    #[tokio::test]
    async fn invalid_create_is_rejected_locally() {
        let fixture = Fixture::new();
        let mut request = sample_create_request();
        request.name = String::new();

        let result = fixture.service().create(&request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(MockGateway::calls(&fixture.gateway.create_calls), 0);
    }

    #[tokio::test]
    async fn unknown_campaign_is_not_found() {
        let fixture = Fixture::new();
        let result = fixture.service().find("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn status_change_is_acknowledged_but_not_persisted() {
        let fixture = Fixture::new();
        let response = fixture.service().request_status_change("c02", CampaignStatus::Paused).await.unwrap();
        assert_eq!(response.requested_status, CampaignStatus::Paused);
        assert!(!response.persisted);

        let campaign = fixture.service().find("c02").await.unwrap();
        assert_eq!(campaign.status, CampaignStatus::Active);
    }

    #[tokio::test]
    async fn overview_defaults_window_to_start_date_through_today() {
        let fixture = Fixture::new();
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let overview = fixture.service().overview("c02", None, None, today).await.unwrap();

        assert_eq!(overview.window.from, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(overview.window.to, today);

        let sent = fixture.gateway.last_job_stats_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.campaign_name, "Drivers For Ubers");
        assert_eq!(sent.from_date, overview.window.from);

        assert_eq!(overview.chart.points.len(), 4);
        assert_ne!(overview.chart.cta_domain, SeriesKind::Count.fallback_domain());
        assert_eq!(overview.budget.utilization_percent, Some(57.0));
    }

    #[tokio::test]
    async fn overview_rejects_inverted_window() {
        let fixture = Fixture::new();
        let today = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let from = NaiveDate::from_ymd_opt(2025, 8, 1);

        let result = fixture.service().overview("c02", from, None, today).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn metrics_sum_daily_rows() {
        let metrics = campaign_metrics(&sample_job_stats());
        assert_eq!(metrics.clicks, 3950);
        assert_eq!(metrics.applies, 203);
        assert_eq!(metrics.total_spend, 1260.0);
        assert!((metrics.cost_per_action.unwrap() - 1260.0 / 203.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_without_applies_have_no_cost_per_action() {
        let mut stats = sample_job_stats();
        stats.campaign_stats.clear();
        stats.applies = 0;
        let metrics = campaign_metrics(&stats);
        assert_eq!(metrics.clicks, 3950);
        assert_eq!(metrics.cost_per_action, None);
    }
}
