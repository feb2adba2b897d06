use crate::models::budget::{BudgetSummary, UtilizationSource};
use crate::models::campaign::Campaign;

/// Utilization percentage and where it came from.
///
/// A server-supplied `budgetUtilized` wins. Otherwise it is recomputed from
/// `currentSpend / budget`, which needs both a spend figure and a positive budget.
pub fn utilization(campaign: &Campaign) -> (Option<f64>, UtilizationSource) {
    if let Some(percent) = campaign.budget_utilized.filter(|p| p.is_finite()) {
        return (Some(percent), UtilizationSource::Server);
    }

    match campaign.current_spend {
        Some(spend) if campaign.budget > 0.0 => (Some(spend / campaign.budget * 100.0), UtilizationSource::Computed),
        _ => (None, UtilizationSource::Unavailable),
    }
}

pub fn budget_summary(campaign: &Campaign) -> BudgetSummary {
    let (utilization_percent, utilization_source) = utilization(campaign);
    BudgetSummary {
        total_budget: campaign.budget,
        current_spend: campaign.current_spend,
        remaining_budget: campaign.current_spend.map(|spend| campaign.budget - spend),
        utilization_percent,
        utilization_source,
    }
}
