use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Lifecycle status as reported by the campaign service. Transitions are
/// owned upstream; this service only displays and requests them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub enum CampaignStatus {
    Review,
    Active,
    Paused,
    Completed,
    Pending,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 5] = [
        CampaignStatus::Review,
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Completed,
        CampaignStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Review => "Review",
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Pending => "Pending",
        }
    }

    /// Badge text shown in campaign tables.
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Review => "In Review",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown campaign status '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum RuleOperator {
    And,
    Or,
}

/// Targeting rule. Passed through to the campaign service untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    pub field: String,
    pub operation: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroup {
    pub operation: RuleOperator,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Campaign read model.
///
/// Display-derived figures (`current_spend`, `budget_utilized`, ...) are
/// optional: the campaign service fills them in only once the campaign has
/// activity. Callers pick their own fallback instead of reading a zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub client_id: String,
    pub client_name: String,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_by: String,
    pub org_id: i64,
    pub priority: Option<i32>,
    #[serde(default)]
    pub currency_code: String,
    pub budget: f64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub rule_groups: Vec<RuleGroup>,
    #[serde(default)]
    pub mark_up: f64,
    pub mark_down: Option<f64>,
    pub cpa: Option<f64>,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub is_job_expansion_enabled: bool,
    #[serde(default)]
    pub is_job_code_required: bool,
    pub pre_threshold_notified_at: Option<DateTime<Utc>>,
    pub threshold_notified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bid_type: String,
    #[serde(default)]
    pub sub_group_name: String,
    pub sub_group_priority: Option<i32>,
    pub apply_type: Option<String>,
    pub current_spend: Option<f64>,
    /// Percentage, 0-100 by convention; not clamped.
    pub budget_utilized: Option<f64>,
    #[serde(rename = "achievedCTAs")]
    pub achieved_ctas: Option<i64>,
    pub cost_per_action: Option<f64>,
}

/// Server-side filters understood by the campaign list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignFilters {
    pub client: Option<String>,
    pub status: Option<CampaignStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl CampaignFilters {
    /// Query pairs in a fixed order, skipping unset filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(client) = &self.client {
            pairs.push(("client", client.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_string()));
        }
        pairs
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignsResponse {
    pub campaigns: Vec<Campaign>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Create payload, in the PascalCase shape the campaign service expects.
#[derive(Serialize, Deserialize, Debug, Clone, Validate, JsonSchema)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_campaign_dates"))]
pub struct CreateCampaignRequest {
    pub org_id: i64,
    #[validate(length(min = 1, message = "Campaign name is required"))]
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(exclusive_min = 0.0, message = "Budget must be positive"))]
    pub budget: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub threshold: f64,
    pub mark_up: f64,
    pub mark_down: Option<f64>,
    #[serde(rename = "CPA")]
    pub cpa: Option<f64>,
    #[serde(rename = "CPC")]
    pub cpc: f64,
    pub status: Option<String>,
    pub bid_type: String,
    pub id: Option<String>,
    pub client_id: Option<String>,
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    #[serde(default)]
    pub rule_groups: Vec<RuleGroup>,
}

fn validate_campaign_dates(request: &CreateCampaignRequest) -> Result<(), ValidationError> {
    match request.end_date {
        Some(end) if end < request.start_date => Err(ValidationError::new("end_date_before_start_date")),
        _ => Ok(()),
    }
}

/// Acknowledgement for pause/resume. Nothing is persisted yet.
#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub id: String,
    pub requested_status: CampaignStatus,
    pub persisted: bool,
}
