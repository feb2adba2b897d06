use crate::error::app_error::AppError;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::job_stats::{CampaignStatsRequest, JobStatsRequest, JobStatsResponse};

#[async_trait::async_trait]
pub trait ReportingGateway {
    async fn job_stats(&self, request: &JobStatsRequest) -> Result<JobStatsResponse, AppError>;
    async fn campaign_stats(&self, request: &CampaignStatsRequest) -> Result<JobStatsResponse, AppError>;
}

#[async_trait::async_trait]
impl ReportingGateway for HttpGateway {
    async fn job_stats(&self, request: &JobStatsRequest) -> Result<JobStatsResponse, AppError> {
        let url = self.reporting_url("reports/programmatic/jobstats");
        let builder = self.authorize_reporting(self.client.post(&url).json(request));
        self.send_json(builder, &url).await
    }

    async fn campaign_stats(&self, request: &CampaignStatsRequest) -> Result<JobStatsResponse, AppError> {
        let url = self.reporting_url("reports/programmatic/campaignstats");
        let builder = self.authorize_reporting(self.client.post(&url).json(request));
        self.send_json(builder, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::test_utils::sample_job_stats;
    use chrono::NaiveDate;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn job_stats_sends_authorization_key() {
        let server = MockServer::start().await;
        let request = JobStatsRequest {
            from_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            org_id: 552499,
            campaign_name: "Drivers For Ubers".to_string(),
        };
        Mock::given(method("POST"))
            .and(path("/reports/programmatic/jobstats"))
            .and(header("authorization", "ReportKey abc"))
            .and(body_json(serde_json::json!({
                "FromDate": "2025-06-15",
                "ToDate": "2025-07-20",
                "OrgId": 552499,
                "CampaignName": "Drivers For Ubers"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_job_stats()))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(&UpstreamConfig {
            reporting_base_url: server.uri(),
            reporting_api_key: Some("ReportKey abc".to_string()),
            ..UpstreamConfig::default()
        })
        .unwrap();

        let response = gateway.job_stats(&request).await.unwrap();
        assert_eq!(response.campaign_stats.len(), sample_job_stats().campaign_stats.len());
    }

    #[tokio::test]
    async fn campaign_stats_uses_its_own_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reports/programmatic/campaignstats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_job_stats()))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(&UpstreamConfig {
            reporting_base_url: server.uri(),
            ..UpstreamConfig::default()
        })
        .unwrap();

        let request = CampaignStatsRequest {
            from_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            org_id: 552499,
        };
        assert!(gateway.campaign_stats(&request).await.is_ok());
    }
}
