use serde_json::Value;
use triage_core::{AnalysisState, TriageConfig, TriageError, TriageReport, GENERIC_FAILURE_MESSAGE};
use triage_payload::build_report_value;

use crate::{AnalysisBackend, ClientError, HealthStatus};

/// Giữ tối đa một yêu cầu đang chờ; không tự thử lại, không hủy giữa chừng.
pub struct AnalysisOrchestrator<B> {
    backend: B,
    state: AnalysisState<Value>,
}

impl<B: AnalysisBackend> AnalysisOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState<Value> {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Gửi triệu chứng và chờ backend tới khi thành công hoặc thất bại.
    ///
    /// Lỗi chuyển trạng thái (ô trống, gửi trùng) giữ nguyên trạng thái hiện tại.
    pub fn submit(&mut self, symptoms: &str) -> Result<&AnalysisState<Value>, TriageError> {
        self.state = self.state.submit(symptoms)?;
        tracing::info!(chars = symptoms.len(), "analysis request started");

        let outcome = match self.backend.analyze(symptoms) {
            Ok(payload) => {
                tracing::info!("analysis request succeeded");
                Ok(payload)
            }
            Err(err) => {
                log_failure(&err);
                Err(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };

        self.state = self.state.resolve(outcome)?;
        Ok(&self.state)
    }

    /// Báo cáo cho kết quả hiện tại; `None` khi chưa ở trạng thái thành công.
    pub fn report(&self, config: &TriageConfig) -> Result<Option<TriageReport>, TriageError> {
        self.state
            .payload()
            .map(|payload| build_report_value(payload, config))
            .transpose()
    }

    /// Bỏ kết quả hoặc lỗi hiện tại để bắt đầu lượt mới.
    pub fn reset(&mut self) -> Result<(), TriageError> {
        self.state = self.state.reset()?;
        Ok(())
    }

    pub fn health(&self) -> Result<HealthStatus, ClientError> {
        self.backend.health()
    }
}

fn log_failure(err: &ClientError) {
    match err {
        ClientError::HttpError { status, .. } => {
            tracing::warn!(status, error = %err, "analysis request rejected")
        }
        _ => tracing::warn!(error = %err, "analysis request failed"),
    }
}
