//! Trình bày báo cáo dạng văn bản thuần cho terminal.

use std::fmt::{self, Write};

use triage_core::{Dashboard, SectionContent, TriageReport};

pub fn render_report(report: &TriageReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for section in report.visible_sections() {
        writeln!(out, "== {} ==", section.kind().title())?;
        render_content(&mut out, &section.content)?;
        out.push('\n');
    }
    render_dashboard(&mut out, &report.dashboard)?;
    if let Some(urgency) = report.result.urgency {
        writeln!(out, "Urgency: {}", urgency.level())?;
    }
    Ok(out)
}

fn render_content(out: &mut impl Write, content: &SectionContent) -> fmt::Result {
    match content {
        SectionContent::OpeningMessage { message } => {
            if let Some(message) = message {
                writeln!(out, "{message}")?;
            }
        }
        SectionContent::Symptoms { symptoms, severity } => {
            writeln!(out, "{symptoms} [{severity}]")?;
        }
        SectionContent::Diagnosis { points } => bullet_list(out, "•", points)?,
        SectionContent::Medications { items, disclaimer } => {
            writeln!(out, "! {disclaimer}")?;
            bullet_list(out, "•", items)?;
        }
        SectionContent::Diet { items } => bullet_list(out, "✓", items)?,
        SectionContent::Precautions { paragraphs } => paragraph_list(out, paragraphs)?,
        SectionContent::DosDonts { dos, donts } => {
            if !dos.is_empty() {
                writeln!(out, "Do's:")?;
                bullet_list(out, "  ✓", dos)?;
            }
            if !donts.is_empty() {
                writeln!(out, "Don'ts:")?;
                bullet_list(out, "  ✗", donts)?;
            }
        }
        SectionContent::DoctorReferral {
            specialist_paragraphs,
        } => {
            writeln!(
                out,
                "Consult a healthcare professional for proper evaluation and treatment."
            )?;
            if !specialist_paragraphs.is_empty() {
                writeln!(out, "Recommended specialist:")?;
                paragraph_list(out, specialist_paragraphs)?;
            }
        }
    }
    Ok(())
}

fn render_dashboard(out: &mut impl Write, dashboard: &Dashboard) -> fmt::Result {
    writeln!(out, "== Analysis Dashboard ==")?;
    writeln!(
        out,
        "Risk level: {} ({}%)",
        dashboard.severity,
        dashboard.severity.weight()
    )?;
    writeln!(
        out,
        "Medications: {} | Diet items: {} | Key points: {} | Sources: {}",
        dashboard.medication_count,
        dashboard.diet_count,
        dashboard.diagnosis_count,
        dashboard.source_count
    )?;
    if dashboard.doctor_visit_flag {
        writeln!(out, "Doctor visit recommended")?;
    }
    if let Some(warning) = &dashboard.emergency_warning {
        writeln!(out, "Seek emergency care: {warning}")?;
    }
    if !dashboard.recommendation_preview.is_empty() {
        writeln!(out, "Final recommendations:")?;
        paragraph_list(out, &dashboard.recommendation_preview)?;
    }
    for source in &dashboard.source_preview {
        writeln!(out, "→ {} <{}>", source.title, source.url)?;
    }
    Ok(())
}

fn bullet_list(out: &mut impl Write, marker: &str, items: &[String]) -> fmt::Result {
    items
        .iter()
        .try_for_each(|item| writeln!(out, "{marker} {item}"))
}

fn paragraph_list(out: &mut impl Write, paragraphs: &[String]) -> fmt::Result {
    paragraphs
        .iter()
        .try_for_each(|paragraph| writeln!(out, "{paragraph}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::TriageConfig;
    use triage_payload::build_report_str;

    #[test]
    fn renders_only_visible_sections() {
        let report = build_report_str(
            r#"{
                "symptoms": "fever and cough",
                "severity": "Moderate",
                "diagnosis": "Likely viral infection\n\nMonitor for 48 hours",
                "medications": ["Paracetamol"],
                "diet": [],
                "doctor_visit": "no",
                "urgency": "soon"
            }"#,
            &TriageConfig::default(),
        )
        .expect("report");

        let text = render_report(&report).expect("render");
        assert!(text.contains("== Your Symptoms ==\nfever and cough [MODERATE]"));
        assert!(text.contains("• Monitor for 48 hours"));
        assert!(text.contains("== Possible Medications =="));
        assert!(!text.contains("Diet Recommendations"));
        assert!(!text.contains("Doctor Consultation Recommended"));
        assert!(text.contains("Risk level: MODERATE (66%)"));
        assert!(text.ends_with("Urgency: soon\n"));
    }

    #[test]
    fn referral_lists_specialist() {
        let report = build_report_str(
            r#"{"symptoms": "chest pain", "doctor_specialist": "Cardiologist"}"#,
            &TriageConfig::default(),
        )
        .expect("report");

        let text = render_report(&report).expect("render");
        assert!(text.contains("Recommended specialist:\nCardiologist"));
        assert!(text.contains("Doctor visit recommended"));
    }

    struct FullWriter;

    impl Write for FullWriter {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn write_errors_propagate() {
        let dashboard = triage_core::empty_report().dashboard;
        assert!(render_dashboard(&mut FullWriter, &dashboard).is_err());
        assert!(bullet_list(&mut FullWriter, "•", &["Rest".to_string()]).is_err());
        assert!(bullet_list(&mut FullWriter, "•", &[]).is_ok());
    }
}
