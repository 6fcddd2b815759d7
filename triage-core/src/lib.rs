//! Logic lõi chuẩn hóa kết quả phân tích triệu chứng và dựng báo cáo phân loại.

mod dashboard;
mod sections;
mod session;
mod severity;
mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dashboard::{summarize, summarize_with, Dashboard};
pub use sections::{present, Section, SectionContent, SectionKind};
pub use session::AnalysisState;
pub use severity::{classify, classify_urgency, SeverityLevel, Urgency};
pub use text::{to_points, TextBlock};

/// Cảnh báo mặc định khi backend không gửi kèm lời khuyên về thuốc.
pub const DEFAULT_MEDICATION_DISCLAIMER: &str = "Do not take any medication without consulting a qualified healthcare professional; these are informational suggestions only.";

/// Thông báo chung hiển thị cho người dùng khi yêu cầu phân tích thất bại.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to analyze symptoms. Please ensure the server is running and try again.";

/// Cấu hình số mục xem trước trong các ngữ cảnh tóm tắt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    /// Số đoạn khuyến nghị hiển thị trên bảng tóm tắt.
    pub recommendation_preview: usize,
    /// Số nguồn tham khảo hiển thị trên bảng tóm tắt.
    pub source_preview: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            recommendation_preview: 2,
            source_preview: 3,
        }
    }
}

/// Danh sách nên làm / không nên làm.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DosDonts {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

impl DosDonts {
    /// Coi như vắng mặt khi cả hai danh sách đều rỗng.
    pub fn is_empty(&self) -> bool {
        self.dos.is_empty() && self.donts.is_empty()
    }
}

/// Khuyến nghị đi khám bác sĩ, kèm gợi ý chuyên khoa nếu có.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DoctorReferral {
    pub recommended: bool,
    pub specialist_paragraphs: Vec<String>,
}

/// Nguồn tham khảo y khoa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// Kết quả phân tích đã chuẩn hóa, mọi trường đều có giá trị xác định.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedResult {
    pub severity: SeverityLevel,
    pub symptoms: String,
    pub diagnosis_points: Vec<String>,
    /// Trường mở rộng, không ảnh hưởng tới việc hiển thị section.
    #[serde(default)]
    pub possible_conditions: Vec<String>,
    pub medications: Vec<String>,
    pub medication_disclaimer: String,
    pub diet: Vec<String>,
    pub precaution_paragraphs: Vec<String>,
    pub dos_donts: DosDonts,
    pub doctor_referral: DoctorReferral,
    /// Trường mở rộng, không ảnh hưởng tới việc hiển thị section.
    #[serde(default)]
    pub urgency: Option<Urgency>,
    pub recommendations: Vec<String>,
    pub emergency_warning: Option<String>,
    pub sources: Vec<SourceRef>,
    pub opening_message: Option<String>,
}

impl Default for NormalizedResult {
    fn default() -> Self {
        Self {
            severity: SeverityLevel::Unknown,
            symptoms: String::new(),
            diagnosis_points: Vec::new(),
            possible_conditions: Vec::new(),
            medications: Vec::new(),
            medication_disclaimer: DEFAULT_MEDICATION_DISCLAIMER.to_string(),
            diet: Vec::new(),
            precaution_paragraphs: Vec::new(),
            dos_donts: DosDonts::default(),
            doctor_referral: DoctorReferral::default(),
            urgency: None,
            recommendations: Vec::new(),
            emergency_warning: None,
            sources: Vec::new(),
            opening_message: None,
        }
    }
}

/// Báo cáo hoàn chỉnh giao cho tầng hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageReport {
    pub generated_at: DateTime<Utc>,
    pub result: NormalizedResult,
    pub dashboard: Dashboard,
    pub sections: Vec<Section>,
}

impl TriageReport {
    /// Dựng báo cáo từ kết quả đã chuẩn hóa; bảng tóm tắt và section dùng chung một nguồn.
    pub fn new(result: NormalizedResult, config: &TriageConfig) -> Self {
        let dashboard = summarize_with(&result, config);
        let sections = present(&result);
        Self {
            generated_at: Utc::now(),
            result,
            dashboard,
            sections,
        }
    }

    /// Các section cần hiển thị, giữ nguyên thứ tự chuẩn.
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| section.visible)
    }
}

/// Lỗi chung khi chuẩn hóa và điều phối phân tích.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Payload không phải đối tượng JSON: {0}")]
    MalformedPayload(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Triệu chứng không được để trống")]
    EmptySymptoms,
    #[error("Chuyển trạng thái không hợp lệ: {action} từ {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// Tiện ích dựng báo cáo rỗng (dùng cho mock/testing).
pub fn empty_report() -> TriageReport {
    TriageReport::new(NormalizedResult::default(), &TriageConfig::default())
}
