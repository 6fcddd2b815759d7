use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::{AnalysisBackend, ClientConfig, ClientError, HealthStatus};

/// Backend HTTP đồng bộ.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ClientError::Configuration(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::NetworkFailure(format!("không kết nối được {}", self.base_url))
        } else if err.is_timeout() {
            ClientError::NetworkFailure(format!("quá thời gian {}s", self.timeout_secs))
        } else {
            ClientError::NetworkFailure(err.to_string())
        }
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ClientError::HttpError {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    symptoms: &'a str,
}

impl AnalysisBackend for HttpBackend {
    fn analyze(&self, symptoms: &str) -> Result<Value, ClientError> {
        let url = format!("{}/api/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { symptoms })
            .send()
            .map_err(|err| self.map_send_error(err))?;

        Self::check_status(response)?
            .json::<Value>()
            .map_err(|err| ClientError::ResponseParsing(err.to_string()))
    }

    fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| self.map_send_error(err))?;

        Self::check_status(response)?
            .json::<HealthStatus>()
            .map_err(|err| ClientError::ResponseParsing(err.to_string()))
    }
}
