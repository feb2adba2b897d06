use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder the mapping dropdowns start on.
pub const UNSELECTED_FEED_FIELD: &str = "Select Node";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldDataType {
    String,
    Number,
    Boolean,
    Date,
    Url,
    Email,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Basic,
    Location,
    Experience,
    Financial,
    Metadata,
}

/// A target field in the job-feed ingestion schema.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
    pub data_type: FieldDataType,
    pub category: FieldCategory,
}

const fn field(name: &'static str, required: bool, description: &'static str, data_type: FieldDataType, category: FieldCategory) -> SystemField {
    SystemField {
        name,
        required,
        description,
        data_type,
        category,
    }
}

pub const SYSTEM_FIELDS: [SystemField; 15] = [
    field("CentriQ_Title", true, "Job title or position name", FieldDataType::String, FieldCategory::Basic),
    field("CentriQ_Description", true, "Job description content", FieldDataType::String, FieldCategory::Basic),
    field("CentriQ_City", true, "Job location city", FieldDataType::String, FieldCategory::Location),
    field("CentriQ_ApplyUrl", true, "URL where candidates can apply", FieldDataType::Url, FieldCategory::Basic),
    field("CentriQ_State", false, "Job location state/province", FieldDataType::String, FieldCategory::Location),
    field("CentriQ_ZipCode", false, "Job location postal code", FieldDataType::String, FieldCategory::Location),
    field("CentriQ_CountryCode", false, "Job location country code", FieldDataType::String, FieldCategory::Location),
    field("CentriQ_MinExperience", false, "Minimum years of experience required", FieldDataType::Number, FieldCategory::Experience),
    field("CentriQ_MaxExperience", false, "Maximum years of experience preferred", FieldDataType::Number, FieldCategory::Experience),
    field("CentriQ_CostPerClick", false, "Cost per click for job posting", FieldDataType::Number, FieldCategory::Financial),
    field("CentriQ_CostPerApplicant", false, "Cost per applicant for job posting", FieldDataType::Number, FieldCategory::Financial),
    field("CentriQ_ViewUrl", false, "URL to view job details", FieldDataType::Url, FieldCategory::Metadata),
    field("CentriQ_JobCode", false, "Internal job code or reference", FieldDataType::String, FieldCategory::Metadata),
    field("CentriQ_Client", false, "Client identifier or name", FieldDataType::String, FieldCategory::Metadata),
    field("CentriQ_CampaignInfo", false, "Campaign information or metadata", FieldDataType::String, FieldCategory::Metadata),
];

pub fn find_system_field(name: &str) -> Option<&'static SystemField> {
    SYSTEM_FIELDS.iter().find(|field| field.name == name)
}

pub fn required_fields() -> impl Iterator<Item = &'static SystemField> {
    SYSTEM_FIELDS.iter().filter(|field| field.required)
}

/// One row of the mapping form: system field on the left, feed node on the right.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub central_field: String,
    pub feed_field: String,
    pub is_required: bool,
}

impl FieldMapping {
    pub fn unmapped(field: &SystemField) -> Self {
        Self {
            central_field: field.name.to_string(),
            feed_field: UNSELECTED_FEED_FIELD.to_string(),
            is_required: field.required,
        }
    }

    pub fn is_mapped(&self) -> bool {
        let target = self.feed_field.trim();
        !target.is_empty() && target != UNSELECTED_FEED_FIELD
    }
}

#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldCatalogResponse {
    pub fields: Vec<SystemField>,
    pub default_mappings: Vec<FieldMapping>,
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingStatusRequest {
    pub field_mappings: Vec<FieldMapping>,
}

/// Readiness of a mapping set. Only required fields block progress.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingStatus {
    pub ready: bool,
    pub required_total: usize,
    pub required_mapped: usize,
    pub missing_required: Vec<String>,
    pub optional_unmapped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_email: String,
    pub feed_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub detected_format: String,
    pub total_records: i64,
    pub total_nodes: i64,
    pub processing_time: String,
}

#[derive(Deserialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingExportRequest {
    pub client_info: ClientInfo,
    pub validation_info: Option<ValidationSummary>,
    pub field_mappings: Vec<FieldMapping>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappedField {
    pub centriq_field: String,
    pub feed_node: String,
    pub is_required: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnmappedField {
    pub centriq_field: String,
    pub is_required: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingCount {
    pub total: usize,
    pub mapped: usize,
    pub unmapped: usize,
    pub required_mapped: usize,
    pub required_total: usize,
}

/// Downloadable snapshot of a finished mapping form.
#[derive(Serialize, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MappingExport {
    pub client_info: ClientInfo,
    pub validation_info: Option<ValidationSummary>,
    pub field_mappings: Vec<MappedField>,
    pub unmapped_fields: Vec<UnmappedField>,
    pub mapping_count: MappingCount,
    pub timestamp: DateTime<Utc>,
}
