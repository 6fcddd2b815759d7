//! Điều phối yêu cầu phân tích triệu chứng tới backend.

mod http;
mod orchestrator;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use http::HttpBackend;
pub use orchestrator::AnalysisOrchestrator;

/// Biến môi trường chứa địa chỉ backend.
pub const ENV_API_URL: &str = "TRIAGE_API_URL";
/// Biến môi trường chứa timeout (giây).
pub const ENV_API_TIMEOUT: &str = "TRIAGE_API_TIMEOUT";

/// Cấu hình kết nối backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 300,
        }
    }
}

impl ClientConfig {
    /// Đọc cấu hình từ biến môi trường; biến vắng mặt giữ giá trị mặc định.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL).filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                ClientError::Configuration(format!("{ENV_API_TIMEOUT} không hợp lệ: {raw}"))
            })?;
        }
        Ok(config)
    }
}

/// Trạng thái sức khỏe backend trả về từ `/api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_configured: bool,
}

/// Lỗi phía điều phối; không bao giờ tới tay bộ chuẩn hóa.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Không kết nối được backend: {0}")]
    NetworkFailure(String),
    #[error("Backend trả về HTTP {status}: {body}")]
    HttpError { status: u16, body: String },
    #[error("Không đọc được phản hồi: {0}")]
    ResponseParsing(String),
    #[error("Cấu hình không hợp lệ: {0}")]
    Configuration(String),
}

/// Backend phân tích; tách khỏi HTTP để kiểm thử được.
pub trait AnalysisBackend {
    /// Gửi `{ "symptoms": ... }` và trả về payload thô.
    fn analyze(&self, symptoms: &str) -> Result<Value, ClientError>;

    fn health(&self) -> Result<HealthStatus, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_without_env() {
        let config = ClientConfig::from_lookup(|_| None).expect("config");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn config_reads_overrides() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_API_URL => Some("http://triage.local:9000".to_string()),
            ENV_API_TIMEOUT => Some(" 45 ".to_string()),
            _ => None,
        })
        .expect("config");
        assert_eq!(config.base_url, "http://triage.local:9000");
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn config_rejects_bad_timeout() {
        let result = ClientConfig::from_lookup(|key| {
            (key == ENV_API_TIMEOUT).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn health_tolerates_missing_fields() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy"}"#).expect("health json");
        assert_eq!(health.status, "healthy");
        assert!(!health.api_configured);
        assert_eq!(health.model, None);
    }
}
