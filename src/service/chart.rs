use crate::models::chart::{AxisDomain, CampaignChart, ChartPoint, SeriesKind};
use crate::models::job_stats::CampaignStat;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Y-axis domain for a series: observed range padded by 10% on each side,
/// never less than the series' padding floor, and never below zero.
///
/// Non-finite values are ignored; an empty series gets the fallback domain.
pub fn axis_domain(values: &[f64], kind: SeriesKind) -> AxisDomain {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return kind.fallback_domain();
    };
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let padding = ((max - min) * 0.1).max(kind.padding_floor());
    AxisDomain {
        min: (min - padding).max(0.0),
        max: max + padding,
    }
}

/// Parses the reporting service's activity dates: plain `YYYY-MM-DD`,
/// RFC 3339 timestamps, or naive `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.date()))
}

/// Builds the daily chart: points in ascending date order (unparseable dates
/// last, in arrival order) and one domain per axis.
pub fn campaign_chart(stats: &[CampaignStat]) -> CampaignChart {
    let mut dated: Vec<(Option<NaiveDate>, &CampaignStat)> = stats.iter().map(|stat| (parse_activity_date(&stat.activity_date), stat)).collect();
    // Stable sort keeps arrival order among equal keys; None sorts after Some.
    dated.sort_by_key(|(date, _)| (date.is_none(), *date));

    let points: Vec<ChartPoint> = dated
        .into_iter()
        .map(|(date, stat)| ChartPoint {
            date: date.map(|d| d.to_string()).unwrap_or_else(|| stat.activity_date.clone()),
            daily_ctas: stat.apply_count,
            daily_spend: stat.spent,
            clicks: stat.click_count,
        })
        .collect();

    let ctas: Vec<f64> = points.iter().map(|p| p.daily_ctas as f64).collect();
    let spend: Vec<f64> = points.iter().map(|p| p.daily_spend).collect();

    CampaignChart {
        cta_domain: axis_domain(&ctas, SeriesKind::Count),
        spend_domain: axis_domain(&spend, SeriesKind::Currency),
        points,
    }
}
