//! Bridge WASM <-> JavaScript cho bộ chuẩn hóa báo cáo phân loại.
//!
//! Lỗi trả về JS là đối tượng `{ kind, message }` để giao diện phân biệt
//! payload hỏng với lỗi cấu hình.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_wasm_bindgen::{from_value, to_value};
use triage_core::{Section, TriageConfig, TriageError, TriageReport};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsTriageConfig {
    #[serde(default)]
    recommendation_preview: Option<usize>,
    #[serde(default)]
    source_preview: Option<usize>,
}

impl From<JsTriageConfig> for TriageConfig {
    fn from(cfg: JsTriageConfig) -> Self {
        let mut base = TriageConfig::default();
        if let Some(count) = cfg.recommendation_preview {
            base.recommendation_preview = count;
        }
        if let Some(count) = cfg.source_preview {
            base.source_preview = count;
        }
        base
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
enum BridgeErrorKind {
    Input,
    Config,
    MalformedPayload,
    Output,
}

#[derive(Debug, Serialize)]
struct BridgeError {
    kind: BridgeErrorKind,
    message: String,
}

impl BridgeError {
    fn new(kind: BridgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn into_js(self) -> JsValue {
        to_value(&self).unwrap_or_else(|_| JsValue::from_str(&self.message))
    }
}

impl From<TriageError> for BridgeError {
    fn from(err: TriageError) -> Self {
        let kind = match err {
            TriageError::MalformedPayload(_) => BridgeErrorKind::MalformedPayload,
            TriageError::Parse(_)
            | TriageError::EmptySymptoms
            | TriageError::InvalidTransition { .. } => BridgeErrorKind::Input,
        };
        BridgeError::new(kind, format!("Triage error: {err}"))
    }
}

fn build_report(payload: JsValue, config: Option<JsValue>) -> Result<TriageReport, BridgeError> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload_value = from_value::<Value>(payload).map_err(|err| {
        BridgeError::new(
            BridgeErrorKind::Input,
            format!("Không đọc được JSON payload: {err}"),
        )
    })?;

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTriageConfig = from_value(js_cfg).map_err(|err| {
                BridgeError::new(BridgeErrorKind::Config, format!("Không đọc được config: {err}"))
            })?;
            TriageConfig::from(cfg)
        }
        _ => TriageConfig::default(),
    };

    Ok(triage_payload::build_report_value(&payload_value, &cfg)?)
}

fn emit<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| {
        BridgeError::new(BridgeErrorKind::Output, format!("Không serialize báo cáo: {err}")).into_js()
    })
}

/// Chuẩn hóa payload phân tích và trả về báo cáo (kết quả, bảng tóm tắt, section).
#[wasm_bindgen]
pub fn normalize_payload(payload: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let report = build_report(payload, config).map_err(BridgeError::into_js)?;
    emit(&report)
}

/// Chỉ bảng tóm tắt, cho thẻ dashboard không cần chi tiết.
#[wasm_bindgen]
pub fn summarize_payload(payload: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let report = build_report(payload, config).map_err(BridgeError::into_js)?;
    emit(&report.dashboard)
}

/// Các section hiển thị, đúng thứ tự cố định.
#[wasm_bindgen]
pub fn visible_sections(payload: JsValue) -> Result<JsValue, JsValue> {
    let report = build_report(payload, None).map_err(BridgeError::into_js)?;
    emit(&shown(&report))
}

fn shown(report: &TriageReport) -> Vec<&Section> {
    report.visible_sections().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{empty_report, SectionKind};

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = TriageConfig::from(JsTriageConfig {
            recommendation_preview: None,
            source_preview: Some(5),
        });
        assert_eq!(cfg.recommendation_preview, 2);
        assert_eq!(cfg.source_preview, 5);
    }

    #[test]
    fn malformed_payload_keeps_its_kind() {
        let err = BridgeError::from(TriageError::MalformedPayload("array".into()));
        assert_eq!(err.kind, BridgeErrorKind::MalformedPayload);
        assert!(err.message.starts_with("Triage error: "));
        assert!(err.message.contains("array"));

        let parse = BridgeError::from(TriageError::Parse("eof".into()));
        assert_eq!(parse.kind, BridgeErrorKind::Input);
    }

    #[test]
    fn error_serializes_with_kind_tag() {
        let err = BridgeError::new(BridgeErrorKind::Config, "bad");
        let value = serde_json::to_value(&err).expect("serialize");
        assert_eq!(value["kind"], "config");
        assert_eq!(value["message"], "bad");
    }

    #[test]
    fn shown_skips_hidden_sections() {
        let report = empty_report();
        let kinds: Vec<SectionKind> = shown(&report).into_iter().map(Section::kind).collect();
        assert_eq!(kinds, vec![SectionKind::Symptoms]);
    }
}
