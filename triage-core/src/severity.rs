//! Phân loại mức độ nghiêm trọng và mức khẩn cấp từ chuỗi tự do.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mức độ phân loại thô cho báo cáo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    Moderate,
    High,
    Unknown,
}

impl SeverityLevel {
    /// Độ đầy (phần trăm) của thanh rủi ro.
    pub fn weight(self) -> u8 {
        match self {
            SeverityLevel::High => 100,
            SeverityLevel::Moderate => 66,
            SeverityLevel::Low => 33,
            SeverityLevel::Unknown => 0,
        }
    }

    /// Nhãn in hoa dùng cho badge.
    pub fn label(self) -> &'static str {
        match self {
            SeverityLevel::Low => "LOW",
            SeverityLevel::Moderate => "MODERATE",
            SeverityLevel::High => "HIGH",
            SeverityLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mức khẩn cấp khi đi khám (trường mở rộng).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Soon,
    Routine,
}

impl Urgency {
    pub fn level(self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Soon => "soon",
            Urgency::Routine => "routine",
        }
    }
}

/// Ánh xạ chuỗi mức độ sang enum; hàm toàn phần, không bao giờ lỗi.
pub fn classify(raw: Option<&str>) -> SeverityLevel {
    let Some(raw) = raw else {
        return SeverityLevel::Unknown;
    };

    match raw.trim().to_lowercase().as_str() {
        "low" => SeverityLevel::Low,
        "moderate" => SeverityLevel::Moderate,
        "high" => SeverityLevel::High,
        _ => SeverityLevel::Unknown,
    }
}

/// Chuỗi trống hoặc vắng mặt cho `None`; giá trị lạ quy về `Routine`.
pub fn classify_urgency(raw: Option<&str>) -> Option<Urgency> {
    let normalized = raw?.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    Some(match normalized.as_str() {
        "immediate" => Urgency::Immediate,
        "soon" => Urgency::Soon,
        _ => Urgency::Routine,
    })
}
