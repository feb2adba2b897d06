use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a chart series measures; decides its padding floor and empty fallback.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Count,
    Currency,
}

impl SeriesKind {
    /// Smallest padding added on each side of the observed range.
    pub fn padding_floor(self) -> f64 {
        match self {
            SeriesKind::Count => 1.0,
            SeriesKind::Currency => 10.0,
        }
    }

    /// Domain used when there is nothing to plot.
    pub fn fallback_domain(self) -> AxisDomain {
        match self {
            SeriesKind::Count => AxisDomain { min: 0.0, max: 100.0 },
            SeriesKind::Currency => AxisDomain { min: 0.0, max: 500.0 },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    #[serde(rename = "dailyCTAs")]
    pub daily_ctas: i64,
    pub daily_spend: f64,
    pub clicks: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignChart {
    pub points: Vec<ChartPoint>,
    pub cta_domain: AxisDomain,
    pub spend_domain: AxisDomain,
}
