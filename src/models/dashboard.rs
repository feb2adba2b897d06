use crate::models::budget::BudgetSummary;
use crate::models::campaign::Campaign;
use crate::models::chart::CampaignChart;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Serialize;

/// Headline counters for a campaign over the reported window.
#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetrics {
    pub clicks: i64,
    pub applies: i64,
    pub total_spend: f64,
    /// `total_spend / applies`; absent when there were no applies.
    pub cost_per_action: Option<f64>,
    pub conversion_rate: f64,
    pub invalid_clicks: i64,
    pub bot_clicks: i64,
}

#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOverview {
    pub campaign: Campaign,
    pub window: ReportWindow,
    pub budget: BudgetSummary,
    pub metrics: CampaignMetrics,
    pub chart: CampaignChart,
}
