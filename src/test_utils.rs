use crate::error::app_error::AppError;
use crate::gateway::campaign::CampaignGateway;
use crate::gateway::client::ClientGateway;
use crate::gateway::feed::FeedGateway;
use crate::gateway::reporting::ReportingGateway;
use crate::models::campaign::{Campaign, CampaignFilters, CampaignStatus, CampaignsResponse, CreateCampaignRequest};
use crate::models::client::{Client, ClientStatus, CreateClientRequest};
use crate::models::feed::{
    CampaignSetupRequest, CampaignSetupResponse, FeedFieldsResponse, FeedNodesResponse, FeedStructure, FeedValidationRequest, FeedValidationResponse,
    SetupStatus,
};
use crate::models::field_mapping::{FieldMapping, SYSTEM_FIELDS};
use crate::models::job_stats::{CampaignStat, CampaignStatsRequest, JobStatsRequest, JobStatsResponse};
use chrono::{TimeZone, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn campaign(id: &str, name: &str, client_name: &str, status: CampaignStatus) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        client_id: format!("client-{}", client_name.to_lowercase().replace(' ', "-")),
        client_name: client_name.to_string(),
        status,
        start_date: Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap(),
        end_date: Some(Utc.with_ymd_and_hms(2025, 9, 15, 0, 0, 0).unwrap()),
        created_date: Utc.with_ymd_and_hms(2025, 6, 1, 10, 20, 15).unwrap(),
        modified_date: None,
        created_by: "system".to_string(),
        modified_by: String::new(),
        org_id: 552499,
        priority: None,
        currency_code: "USD".to_string(),
        budget: 8000.0,
        threshold: 80.0,
        publishers: vec![],
        rule_groups: vec![],
        mark_up: 20.0,
        mark_down: None,
        cpa: None,
        cpc: 12.0,
        is_job_expansion_enabled: true,
        is_job_code_required: false,
        pre_threshold_notified_at: None,
        threshold_notified_at: None,
        bid_type: "CPC".to_string(),
        sub_group_name: String::new(),
        sub_group_priority: None,
        apply_type: None,
        current_spend: None,
        budget_utilized: None,
        achieved_ctas: None,
        cost_per_action: None,
    }
}

/// Twelve campaigns: five Active, exactly one whose name contains "uber".
pub fn sample_campaigns() -> Vec<Campaign> {
    use CampaignStatus::*;

    let mut campaigns = vec![
        campaign("c01", "Test Centriq", "GlobalTech Solutions", Review),
        campaign("c02", "Drivers For Ubers", "GlobalTech Solutions", Active),
        campaign("c03", "Software Engineer Hiring", "TechCorp Inc", Active),
        campaign("c04", "Warehouse Associates", "Logistix", Paused),
        campaign("c05", "Nurse Recruitment", "CarePlus Health", Active),
        campaign("c06", "Retail Holiday Staff", "ShopMart", Completed),
        campaign("c07", "Data Analyst Drive", "TechCorp Inc", Pending),
        campaign("c08", "Delivery Couriers", "FastShip", Active),
        campaign("c09", "Customer Support Reps", "CallNow", Review),
        campaign("c10", "Truck Drivers CDL", "Logistix", Active),
        campaign("c11", "Summer Interns", "GlobalTech Solutions", Completed),
        campaign("c12", "Security Guards", "SafeGuard", Pending),
    ];

    campaigns[1].current_spend = Some(4560.0);
    campaigns[1].budget_utilized = Some(57.0);
    campaigns[1].achieved_ctas = Some(1500);
    campaigns[2].budget = 12000.0;
    campaigns[2].current_spend = Some(9180.0);

    campaigns
}

pub fn sample_create_request() -> CreateCampaignRequest {
    CreateCampaignRequest {
        org_id: 552499,
        name: "Test Centriq".to_string(),
        start_date: Utc.with_ymd_and_hms(2025, 2, 25, 0, 0, 0).unwrap(),
        end_date: Some(Utc.with_ymd_and_hms(2025, 9, 15, 0, 0, 0).unwrap()),
        budget: 5000.0,
        threshold: 80.0,
        mark_up: 25.0,
        mark_down: None,
        cpa: None,
        cpc: 15.0,
        status: None,
        bid_type: "CPC".to_string(),
        id: None,
        client_id: None,
        client_name: "GlobalTech Solutions".to_string(),
        rule_groups: vec![],
    }
}

pub fn stat(date: &str, clicks: i64, applies: i64, spent: f64) -> CampaignStat {
    CampaignStat {
        click_count: clicks,
        apply_count: applies,
        invalid_click_count: 0,
        bot_click_count: 0,
        latent_click_count: 0,
        duplicate_click_count: 0,
        spent,
        activity_date: date.to_string(),
        campaign_name: "Drivers For Ubers".to_string(),
    }
}

/// Four days of activity, delivered out of date order.
pub fn sample_job_stats() -> JobStatsResponse {
    JobStatsResponse {
        org_id: 552499,
        org_name: "GlobalTech Solutions".to_string(),
        budget: 8000.0,
        total_jobs: 40,
        active_jobs: 32,
        top_jobs: vec![],
        total_jobs_detail: vec![],
        cpc: 0.32,
        cpa: 6.2,
        clicks: 3950,
        bot_clicks: 12,
        invalid_clicks: 30,
        latent_clicks: 0,
        duplicate_clicks: 4,
        applies: 203,
        conversion_rate: 5.14,
        show_publisher_wise_graph: false,
        campaign_stats: vec![
            stat("2025-06-20", 1000, 52, 320.0),
            stat("2025-06-15", 900, 45, 280.0),
            stat("2025-06-30", 1100, 58, 350.0),
            stat("2025-06-25", 950, 48, 310.0),
        ],
    }
}

/// Default mapping set with every required field pointed at a feed node.
pub fn ready_mappings() -> Vec<FieldMapping> {
    SYSTEM_FIELDS
        .iter()
        .map(|field| {
            let mut mapping = FieldMapping::unmapped(field);
            if field.required {
                mapping.feed_field = field.name.trim_start_matches("CentriQ_").to_lowercase();
            }
            mapping
        })
        .collect()
}

pub fn sample_client() -> Client {
    Client {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        client_type: crate::models::client::ClientType::Individual,
        email: "john@example.com".to_string(),
        phone: None,
        status: ClientStatus::Active,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    }
}

/// In-memory stand-in for every upstream collaborator, counting calls.
#[derive(Default)]
pub struct MockGateway {
    pub campaigns: Vec<Campaign>,
    pub job_stats: Option<JobStatsResponse>,
    pub campaign_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub job_stats_calls: AtomicUsize,
    pub feed_field_calls: AtomicUsize,
    pub setup_calls: AtomicUsize,
    pub client_calls: AtomicUsize,
    pub last_job_stats_request: Mutex<Option<JobStatsRequest>>,
}

impl MockGateway {
    pub fn with_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns,
            job_stats: Some(sample_job_stats()),
            ..Self::default()
        }
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CampaignGateway for MockGateway {
    async fn list_campaigns(&self, filters: &CampaignFilters) -> Result<CampaignsResponse, AppError> {
        self.campaign_calls.fetch_add(1, Ordering::SeqCst);
        let campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|c| filters.client.as_ref().is_none_or(|client| c.client_name.to_lowercase().contains(&client.to_lowercase())))
            .filter(|c| filters.status.is_none_or(|status| c.status == status))
            .cloned()
            .collect();
        Ok(CampaignsResponse {
            total: campaigns.len() as i64,
            campaigns,
            page: 1,
            page_size: 10,
        })
    }

    async fn create_campaign(&self, request: &CreateCampaignRequest) -> Result<Campaign, AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut created = campaign("new", &request.name, &request.client_name, CampaignStatus::Pending);
        created.budget = request.budget;
        Ok(created)
    }
}

#[async_trait::async_trait]
impl ReportingGateway for MockGateway {
    async fn job_stats(&self, request: &JobStatsRequest) -> Result<JobStatsResponse, AppError> {
        self.job_stats_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_job_stats_request.lock() {
            *last = Some(request.clone());
        }
        self.job_stats.clone().ok_or(AppError::Upstream {
            status: 500,
            url: "mock://jobstats".to_string(),
        })
    }

    async fn campaign_stats(&self, _request: &CampaignStatsRequest) -> Result<JobStatsResponse, AppError> {
        self.job_stats.clone().ok_or(AppError::Upstream {
            status: 500,
            url: "mock://campaignstats".to_string(),
        })
    }
}

#[async_trait::async_trait]
impl FeedGateway for MockGateway {
    async fn validate_feed(&self, request: &FeedValidationRequest) -> Result<FeedValidationResponse, AppError> {
        let is_valid = !request.feed_url.contains("broken");
        Ok(FeedValidationResponse {
            is_valid,
            detected_format: serde_json::json!(1),
            total_nodes: 25955,
            total_records: 552,
            error_message: (!is_valid).then(|| "Invalid XML structure detected".to_string()),
            validation_errors: if is_valid { vec![] } else { vec!["Missing required element: <item>".to_string()] },
            processing_time: "00:00:05.0488489".to_string(),
            content_type: Some("application/xml".to_string()),
            validation_id: is_valid.then(|| "k3j9x0".to_string()),
        })
    }

    async fn feed_fields(&self, validation_id: &str) -> Result<FeedFieldsResponse, AppError> {
        self.feed_field_calls.fetch_add(1, Ordering::SeqCst);
        Ok(FeedFieldsResponse {
            fields: vec!["job_title".to_string(), "description".to_string(), "location".to_string(), "apply_url".to_string()],
            feed_url: None,
            validation_id: Some(validation_id.to_string()),
            detected_at: None,
        })
    }

    async fn feed_nodes(&self, validation_id: &str) -> Result<FeedNodesResponse, AppError> {
        Ok(FeedNodesResponse {
            nodes: vec!["job_title".to_string(), "apply_url".to_string()],
            validation_id: validation_id.to_string(),
            feed_structure: Some(FeedStructure {
                root_element: "jobs".to_string(),
                item_element: "job".to_string(),
                namespace: None,
            }),
        })
    }

    async fn setup_campaign(&self, request: &CampaignSetupRequest) -> Result<CampaignSetupResponse, AppError> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(CampaignSetupResponse {
            campaign_id: format!("setup-{}", request.validation_id),
            status: SetupStatus::Active,
            message: "Campaign setup successful! Your feed is now being processed.".to_string(),
            next_steps: None,
        })
    }
}

#[async_trait::async_trait]
impl ClientGateway for MockGateway {
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.client_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![sample_client()])
    }

    async fn create_client(&self, request: &CreateClientRequest) -> Result<Client, AppError> {
        Ok(Client {
            id: "2".to_string(),
            name: request.name.clone(),
            client_type: request.client_type,
            email: request.email.clone(),
            phone: request.phone.clone(),
            ..sample_client()
        })
    }
}
