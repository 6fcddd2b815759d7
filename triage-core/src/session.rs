//! Máy trạng thái của một lượt phân tích: Idle → Pending → (Success | Failure) → Idle.
//!
//! Mỗi bước chuyển trả về trạng thái mới; bước không hợp lệ giữ nguyên trạng thái cũ.

use serde::{Deserialize, Serialize};

use crate::TriageError;

/// Trạng thái phiên phân tích, truyền theo giá trị thay vì sửa tại chỗ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisState<P> {
    Idle,
    Pending { symptoms: String },
    Success { symptoms: String, payload: P },
    Failure { message: String },
}

impl<P> Default for AnalysisState<P> {
    fn default() -> Self {
        AnalysisState::Idle
    }
}

impl<P> AnalysisState<P> {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Pending { .. } => "pending",
            AnalysisState::Success { .. } => "success",
            AnalysisState::Failure { .. } => "failure",
        }
    }

    /// Đang chờ phản hồi; giao diện phải chặn gửi lại.
    pub fn is_busy(&self) -> bool {
        matches!(self, AnalysisState::Pending { .. })
    }

    /// Gửi triệu chứng, chỉ hợp lệ từ `Idle` và với nội dung không rỗng.
    pub fn submit(&self, symptoms: &str) -> Result<Self, TriageError> {
        match self {
            AnalysisState::Idle => {
                if symptoms.trim().is_empty() {
                    return Err(TriageError::EmptySymptoms);
                }
                Ok(AnalysisState::Pending {
                    symptoms: symptoms.to_string(),
                })
            }
            other => Err(TriageError::InvalidTransition {
                from: other.name(),
                action: "submit",
            }),
        }
    }

    /// Nhận kết quả của yêu cầu đang chờ.
    pub fn resolve(&self, outcome: Result<P, String>) -> Result<Self, TriageError> {
        match self {
            AnalysisState::Pending { symptoms } => Ok(match outcome {
                Ok(payload) => AnalysisState::Success {
                    symptoms: symptoms.clone(),
                    payload,
                },
                Err(message) => AnalysisState::Failure { message },
            }),
            other => Err(TriageError::InvalidTransition {
                from: other.name(),
                action: "resolve",
            }),
        }
    }

    /// Bỏ kết quả hiện tại để bắt đầu lượt mới.
    pub fn reset(&self) -> Result<Self, TriageError> {
        match self {
            AnalysisState::Success { .. } | AnalysisState::Failure { .. } => {
                Ok(AnalysisState::Idle)
            }
            other => Err(TriageError::InvalidTransition {
                from: other.name(),
                action: "reset",
            }),
        }
    }

    pub fn payload(&self) -> Option<&P> {
        match self {
            AnalysisState::Success { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            AnalysisState::Failure { message } => Some(message),
            _ => None,
        }
    }
}
