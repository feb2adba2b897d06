use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Reporting request, keyed the way the reporting service spells it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate, JsonSchema)]
#[validate(schema(function = "validate_report_range"))]
pub struct JobStatsRequest {
    #[serde(rename = "FromDate")]
    pub from_date: NaiveDate,
    #[serde(rename = "ToDate")]
    pub to_date: NaiveDate,
    #[serde(rename = "OrgId")]
    pub org_id: i64,
    #[serde(rename = "CampaignName")]
    #[validate(length(min = 1, message = "Campaign name is required"))]
    pub campaign_name: String,
}

fn validate_report_range(request: &JobStatsRequest) -> Result<(), ValidationError> {
    if request.from_date > request.to_date {
        return Err(ValidationError::new("from_date_after_to_date"));
    }
    Ok(())
}

/// Organisation-wide variant; the reporting service ignores campaign names here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct CampaignStatsRequest {
    #[serde(rename = "FromDate")]
    pub from_date: NaiveDate,
    #[serde(rename = "ToDate")]
    pub to_date: NaiveDate,
    #[serde(rename = "OrgId")]
    pub org_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TopJob {
    pub job_guid: String,
    pub job_code: String,
    pub job_title: String,
    pub location: String,
    pub company: String,
    pub campaign: String,
    pub total_clicks: i64,
    pub valid_clicks: i64,
    pub valid_applies: i64,
    pub total_applies: i64,
    pub bot_clicks: i64,
    pub invalid_clicks: i64,
    pub latent_clicks: i64,
    pub duplicate_clicks: i64,
    pub total_click_cost: f64,
}

/// One day of campaign activity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct CampaignStat {
    #[serde(rename = "Click_count", default)]
    pub click_count: i64,
    #[serde(rename = "Apply_count", default)]
    pub apply_count: i64,
    #[serde(rename = "InvalidClick_Count", default)]
    pub invalid_click_count: i64,
    #[serde(rename = "BotClick_Count", default)]
    pub bot_click_count: i64,
    #[serde(rename = "LatentClick_Count", default)]
    pub latent_click_count: i64,
    #[serde(rename = "DuplicateClick_Count", default)]
    pub duplicate_click_count: i64,
    #[serde(rename = "Spent", default)]
    pub spent: f64,
    /// Raw date string; upstream mixes `YYYY-MM-DD` and full timestamps.
    #[serde(rename = "Activity_date")]
    pub activity_date: String,
    #[serde(rename = "Campaign_name", default)]
    pub campaign_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct JobStatsResponse {
    #[serde(rename = "OrgId")]
    pub org_id: i64,
    #[serde(rename = "OrgName", default)]
    pub org_name: String,
    #[serde(rename = "Budget", default)]
    pub budget: f64,
    #[serde(rename = "Total_jobs", default)]
    pub total_jobs: i64,
    #[serde(rename = "Active_jobs", default)]
    pub active_jobs: i64,
    #[serde(rename = "TopJobs", default)]
    pub top_jobs: Vec<TopJob>,
    #[serde(rename = "TotalJobs", default)]
    pub total_jobs_detail: Vec<serde_json::Value>,
    #[serde(rename = "CPC", default)]
    pub cpc: f64,
    #[serde(rename = "CPA", default)]
    pub cpa: f64,
    #[serde(rename = "Clicks", default)]
    pub clicks: i64,
    #[serde(rename = "BotClicks", default)]
    pub bot_clicks: i64,
    #[serde(rename = "InvalidClicks", default)]
    pub invalid_clicks: i64,
    #[serde(rename = "LatentClicks", default)]
    pub latent_clicks: i64,
    #[serde(rename = "DuplicateClicks", default)]
    pub duplicate_clicks: i64,
    #[serde(rename = "Applies", default)]
    pub applies: i64,
    #[serde(rename = "CR", default)]
    pub conversion_rate: f64,
    #[serde(rename = "ShowPublisherWiseGraph", default)]
    pub show_publisher_wise_graph: bool,
    #[serde(rename = "Campaign_stats", default)]
    pub campaign_stats: Vec<CampaignStat>,
}
