use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a utilization figure came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationSource {
    /// `budgetUtilized` as supplied by the campaign service.
    Server,
    /// Recomputed as `currentSpend / budget * 100`.
    Computed,
    Unavailable,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub current_spend: Option<f64>,
    pub remaining_budget: Option<f64>,
    pub utilization_percent: Option<f64>,
    pub utilization_source: UtilizationSource,
}
