//! Dựng danh sách section theo thứ tự chuẩn, kèm cờ hiển thị.

use serde::{Deserialize, Serialize};

use crate::{NormalizedResult, SeverityLevel};

/// Nhãn loại section, khai báo theo đúng thứ tự hiển thị.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    OpeningMessage,
    Symptoms,
    Diagnosis,
    Medications,
    Diet,
    Precautions,
    DosDonts,
    DoctorReferral,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::OpeningMessage,
        SectionKind::Symptoms,
        SectionKind::Diagnosis,
        SectionKind::Medications,
        SectionKind::Diet,
        SectionKind::Precautions,
        SectionKind::DosDonts,
        SectionKind::DoctorReferral,
    ];

    /// Tiêu đề mặc định cho tầng hiển thị.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::OpeningMessage => "We're Here to Help",
            SectionKind::Symptoms => "Your Symptoms",
            SectionKind::Diagnosis => "Understanding Your Condition",
            SectionKind::Medications => "Possible Medications",
            SectionKind::Diet => "Diet Recommendations",
            SectionKind::Precautions => "Precautions & Immediate Remedies",
            SectionKind::DosDonts => "Do's and Don'ts",
            SectionKind::DoctorReferral => "Doctor Consultation Recommended",
        }
    }
}

/// Nội dung của từng loại section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    OpeningMessage {
        message: Option<String>,
    },
    Symptoms {
        symptoms: String,
        severity: SeverityLevel,
    },
    Diagnosis {
        points: Vec<String>,
    },
    Medications {
        items: Vec<String>,
        disclaimer: String,
    },
    Diet {
        items: Vec<String>,
    },
    Precautions {
        paragraphs: Vec<String>,
    },
    DosDonts {
        dos: Vec<String>,
        donts: Vec<String>,
    },
    DoctorReferral {
        specialist_paragraphs: Vec<String>,
    },
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::OpeningMessage { .. } => SectionKind::OpeningMessage,
            SectionContent::Symptoms { .. } => SectionKind::Symptoms,
            SectionContent::Diagnosis { .. } => SectionKind::Diagnosis,
            SectionContent::Medications { .. } => SectionKind::Medications,
            SectionContent::Diet { .. } => SectionKind::Diet,
            SectionContent::Precautions { .. } => SectionKind::Precautions,
            SectionContent::DosDonts { .. } => SectionKind::DosDonts,
            SectionContent::DoctorReferral { .. } => SectionKind::DoctorReferral,
        }
    }
}

/// Một khối trình bày của báo cáo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub visible: bool,
    #[serde(flatten)]
    pub content: SectionContent,
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }
}

/// Trả về đủ tám section theo thứ tự chuẩn; không sắp xếp lại.
pub fn present(result: &NormalizedResult) -> Vec<Section> {
    SectionKind::ALL
        .into_iter()
        .map(|kind| build_section(kind, result))
        .collect()
}

fn build_section(kind: SectionKind, result: &NormalizedResult) -> Section {
    let (visible, content) = match kind {
        SectionKind::OpeningMessage => (
            result.opening_message.is_some(),
            SectionContent::OpeningMessage {
                message: result.opening_message.clone(),
            },
        ),
        SectionKind::Symptoms => (
            true,
            SectionContent::Symptoms {
                symptoms: result.symptoms.clone(),
                severity: result.severity,
            },
        ),
        SectionKind::Diagnosis => (
            !result.diagnosis_points.is_empty(),
            SectionContent::Diagnosis {
                points: result.diagnosis_points.clone(),
            },
        ),
        SectionKind::Medications => (
            !result.medications.is_empty(),
            SectionContent::Medications {
                items: result.medications.clone(),
                disclaimer: result.medication_disclaimer.clone(),
            },
        ),
        SectionKind::Diet => (
            !result.diet.is_empty(),
            SectionContent::Diet {
                items: result.diet.clone(),
            },
        ),
        SectionKind::Precautions => (
            !result.precaution_paragraphs.is_empty(),
            SectionContent::Precautions {
                paragraphs: result.precaution_paragraphs.clone(),
            },
        ),
        SectionKind::DosDonts => (
            !result.dos_donts.is_empty(),
            SectionContent::DosDonts {
                dos: result.dos_donts.dos.clone(),
                donts: result.dos_donts.donts.clone(),
            },
        ),
        SectionKind::DoctorReferral => (
            result.doctor_referral.recommended,
            SectionContent::DoctorReferral {
                specialist_paragraphs: result.doctor_referral.specialist_paragraphs.clone(),
            },
        ),
    };

    Section { visible, content }
}
