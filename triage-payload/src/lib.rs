//! Analysis payload JSON to `NormalizedResult` converter.
//!
//! The backend payload is not guaranteed to be well-typed: every field is
//! resolved on its own and falls back to a documented default, so only a
//! non-object top-level value fails.

use serde_json::{Map, Value};
use triage_core::{
    classify, classify_urgency, to_points, DoctorReferral, DosDonts, NormalizedResult, SourceRef,
    TextBlock, TriageConfig, TriageError, TriageReport, DEFAULT_MEDICATION_DISCLAIMER,
};

/// Normalize an analysis payload from a JSON string.
pub fn normalize_payload_str(payload_json: &str) -> Result<NormalizedResult, TriageError> {
    let value: Value =
        serde_json::from_str(payload_json).map_err(|err| TriageError::Parse(err.to_string()))?;
    normalize_payload_value(&value)
}

/// Normalize an analysis payload from a `serde_json::Value`.
pub fn normalize_payload_value(payload: &Value) -> Result<NormalizedResult, TriageError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| TriageError::MalformedPayload(describe_shape(payload).to_string()))?;

    let specialist_named = text_field(fields, "doctor_specialist").is_some_and(|s| !s.is_empty());
    let recommended = doctor_visit_requested(fields) || specialist_named;

    Ok(NormalizedResult {
        severity: classify(text_field(fields, "severity")),
        symptoms: extract_symptoms(fields),
        diagnosis_points: text_block(fields, "diagnosis"),
        possible_conditions: string_list(fields, "possible_conditions"),
        medications: string_list(fields, "medications"),
        medication_disclaimer: text_field(fields, "medication_disclaimer")
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_MEDICATION_DISCLAIMER.to_string()),
        diet: string_list(fields, "diet"),
        precaution_paragraphs: text_block(fields, "precautions"),
        dos_donts: extract_dos_donts(fields),
        doctor_referral: DoctorReferral {
            recommended,
            specialist_paragraphs: text_block(fields, "doctor_specialist"),
        },
        urgency: classify_urgency(text_field(fields, "urgency")),
        recommendations: text_block(fields, "recommendations"),
        emergency_warning: non_empty_text(fields, "when_to_seek_emergency"),
        sources: extract_sources(fields),
        opening_message: non_empty_text(fields, "opening_message"),
    })
}

/// Build the full report (result, dashboard, sections) from a JSON string.
pub fn build_report_str(
    payload_json: &str,
    config: &TriageConfig,
) -> Result<TriageReport, TriageError> {
    let result = normalize_payload_str(payload_json)?;
    Ok(TriageReport::new(result, config))
}

/// Build the full report (result, dashboard, sections) from a `serde_json::Value`.
pub fn build_report_value(
    payload: &Value,
    config: &TriageConfig,
) -> Result<TriageReport, TriageError> {
    let result = normalize_payload_value(payload)?;
    Ok(TriageReport::new(result, config))
}

fn describe_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected_shape(field: &str, value: &Value) {
    tracing::debug!(
        field,
        shape = describe_shape(value),
        "unexpected payload shape, using default"
    );
}

/// Present-and-null counts as absent without logging.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    let value = present(fields, key)?;
    match value.as_str() {
        Some(text) => Some(text),
        None => {
            unexpected_shape(key, value);
            None
        }
    }
}

/// Kept verbatim; only the empty string counts as absent.
fn non_empty_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    text_field(fields, key)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn strings_in(field: &str, items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                unexpected_shape(field, item);
                None
            }
        })
        .collect()
}

fn string_list_value(field: &str, value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => strings_in(field, items),
        Some(other) => {
            unexpected_shape(field, other);
            Vec::new()
        }
    }
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    string_list_value(key, fields.get(key))
}

fn text_block(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match present(fields, key) {
        None => to_points(TextBlock::Absent),
        Some(Value::String(text)) => to_points(TextBlock::Text(text)),
        Some(Value::Array(items)) => {
            let items = strings_in(key, items);
            to_points(TextBlock::List(&items))
        }
        Some(other) => {
            unexpected_shape(key, other);
            to_points(TextBlock::Absent)
        }
    }
}

fn extract_symptoms(fields: &Map<String, Value>) -> String {
    match present(fields, "symptoms") {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => strings_in("symptoms", items).join(", "),
        Some(other) => {
            unexpected_shape("symptoms", other);
            String::new()
        }
    }
}

fn extract_dos_donts(fields: &Map<String, Value>) -> DosDonts {
    match present(fields, "dos_donts") {
        None => DosDonts::default(),
        Some(Value::Object(inner)) => DosDonts {
            dos: string_list_value("dos_donts.dos", inner.get("dos")),
            donts: string_list_value("dos_donts.donts", inner.get("donts")),
        },
        Some(other) => {
            unexpected_shape("dos_donts", other);
            DosDonts::default()
        }
    }
}

fn doctor_visit_requested(fields: &Map<String, Value>) -> bool {
    text_field(fields, "doctor_visit")
        .map(|answer| answer.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

fn extract_sources(fields: &Map<String, Value>) -> Vec<SourceRef> {
    let Some(value) = present(fields, "sources") else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        unexpected_shape("sources", value);
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let title = entry.get("title").and_then(Value::as_str)?;
            let url = entry.get("url").and_then(Value::as_str)?;
            if title.trim().is_empty() || url.trim().is_empty() {
                return None;
            }
            Some(SourceRef {
                title: title.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}
