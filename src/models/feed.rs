use crate::models::field_mapping::FieldMapping;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedValidationRequest {
    #[validate(url(message = "Please enter a valid URL"))]
    pub feed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Feed format code as reported by the validator service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum DetectedFormat {
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "CSV")]
    Csv,
    Unknown,
}

impl DetectedFormat {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => DetectedFormat::Xml,
            2 => DetectedFormat::Json,
            3 => DetectedFormat::Csv,
            _ => DetectedFormat::Unknown,
        }
    }

    /// Some validator builds report the format by name instead of by code.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::from_code).unwrap_or(DetectedFormat::Unknown),
            serde_json::Value::String(s) => match s.to_ascii_uppercase().as_str() {
                "XML" => DetectedFormat::Xml,
                "JSON" => DetectedFormat::Json,
                "CSV" => DetectedFormat::Csv,
                other => other.parse::<i64>().map(Self::from_code).unwrap_or(DetectedFormat::Unknown),
            },
            _ => DetectedFormat::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetectedFormat::Xml => "XML",
            DetectedFormat::Json => "JSON",
            DetectedFormat::Csv => "CSV",
            DetectedFormat::Unknown => "Unknown",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedValidationResponse {
    pub is_valid: bool,
    pub detected_format: serde_json::Value,
    #[serde(default)]
    pub total_nodes: i64,
    #[serde(default)]
    pub total_records: i64,
    pub error_message: Option<String>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
    #[serde(default)]
    pub processing_time: String,
    pub content_type: Option<String>,
    pub validation_id: Option<String>,
}

/// Validation outcome as returned to the dashboard.
#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedValidationResult {
    #[serde(flatten)]
    pub validation: FeedValidationResponse,
    pub detected_format_name: DetectedFormat,
}

impl From<FeedValidationResponse> for FeedValidationResult {
    fn from(validation: FeedValidationResponse) -> Self {
        let detected_format_name = DetectedFormat::from_value(&validation.detected_format);
        Self {
            validation,
            detected_format_name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedFieldsResponse {
    pub fields: Vec<String>,
    pub feed_url: Option<String>,
    pub validation_id: Option<String>,
    pub detected_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedStructure {
    pub root_element: String,
    pub item_element: String,
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedNodesResponse {
    pub nodes: Vec<String>,
    pub validation_id: String,
    pub feed_structure: Option<FeedStructure>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SetupFrequency {
    Hourly,
    Daily,
    Weekly,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSettings {
    pub frequency: SetupFrequency,
    pub auto_approve: bool,
    pub notifications: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSetupRequest {
    #[validate(length(min = 1, message = "Client id is required"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "Validation id is required"))]
    pub validation_id: String,
    pub field_mappings: Vec<FieldMapping>,
    #[validate(length(min = 1, message = "Campaign name is required"))]
    pub campaign_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_settings: Option<CampaignSettings>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SetupStatus {
    Pending,
    Active,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSetupResponse {
    pub campaign_id: String,
    pub status: SetupStatus,
    pub message: String,
    pub next_steps: Option<Vec<String>>,
}
