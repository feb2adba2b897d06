use crate::config::UpstreamConfig;
use crate::error::app_error::AppError;
use reqwest::RequestBuilder;
use rocket::fairing::AdHoc;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// reqwest-backed access to the campaign, feed, client and reporting services.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    pub(crate) client: reqwest::Client,
    api_base_url: String,
    reporting_base_url: String,
    reporting_api_key: Option<String>,
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl HttpGateway {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_base_url: trim_base(&config.api_base_url),
            reporting_base_url: trim_base(&config.reporting_base_url),
            reporting_api_key: config.reporting_api_key.clone(),
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn reporting_url(&self, path: &str) -> String {
        format!("{}/{}", self.reporting_base_url, path.trim_start_matches('/'))
    }

    /// Adds the reporting key, when one is configured.
    pub(crate) fn authorize_reporting(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.reporting_api_key {
            Some(key) => request.header(reqwest::header::AUTHORIZATION, key),
            None => request,
        }
    }

    /// Sends `request` and decodes a 2xx JSON body. Non-2xx, transport and
    /// decode failures each map to their own `AppError` variant.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T, AppError> {
        debug!(url, "calling upstream");

        let response = request.send().await.map_err(|e| {
            warn!(url, error = %e, "upstream request failed");
            AppError::transport(format!("Request to {} failed", url), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "upstream returned error status");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(format!("Reading response from {} failed", url), e))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(url, error = %e, "upstream response did not match the expected shape");
            AppError::decode(format!("Unexpected response from {}", url), e)
        })
    }
}

pub fn stage_gateway(config: UpstreamConfig) -> AdHoc {
    AdHoc::try_on_ignite("Upstream gateway (reqwest)", |rocket| async move {
        match HttpGateway::new(&config) {
            Ok(gateway) => {
                tracing::info!(api = %config.api_base_url, reporting = %config.reporting_base_url, "Upstream gateway initialized");
                Ok(rocket.manage(gateway))
            }
            Err(e) => {
                tracing::error!("Failed to initialize upstream gateway: {}", e);
                Err(rocket)
            }
        }
    })
}
