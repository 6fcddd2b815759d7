use proptest::prelude::*;
use serde_json::{Map, Value};
use triage_core::{present, summarize, SectionKind};
use triage_payload::normalize_payload_value;

const FIELDS: [&str; 16] = [
    "symptoms",
    "severity",
    "diagnosis",
    "possible_conditions",
    "medications",
    "medication_disclaimer",
    "diet",
    "precautions",
    "dos_donts",
    "doctor_visit",
    "doctor_specialist",
    "urgency",
    "recommendations",
    "when_to_seek_emergency",
    "sources",
    "opening_message",
];

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z \n]{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("(title|url|dos|donts|[a-z]{1,6})", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn arb_payload() -> impl Strategy<Value = Value> {
    proptest::collection::vec((0..FIELDS.len(), arb_json()), 0..12).prop_map(|entries| {
        let mut map = Map::new();
        for (index, value) in entries {
            map.insert(FIELDS[index].to_string(), value);
        }
        Value::Object(map)
    })
}

proptest! {
    #[test]
    fn objects_always_normalize(payload in arb_payload()) {
        prop_assert!(normalize_payload_value(&payload).is_ok());
    }

    #[test]
    fn dashboard_matches_detail(payload in arb_payload()) {
        let result = normalize_payload_value(&payload).expect("object payload");
        let dashboard = summarize(&result);
        prop_assert_eq!(dashboard.medication_count, result.medications.len());
        prop_assert_eq!(dashboard.diet_count, result.diet.len());
        prop_assert_eq!(dashboard.diagnosis_count, result.diagnosis_points.len());
        prop_assert_eq!(dashboard.source_count, result.sources.len());
        prop_assert_eq!(dashboard.doctor_visit_flag, result.doctor_referral.recommended);
    }

    #[test]
    fn sections_keep_canonical_order(payload in arb_payload()) {
        let result = normalize_payload_value(&payload).expect("object payload");
        let kinds: Vec<SectionKind> = present(&result).iter().map(|section| section.kind()).collect();
        prop_assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn disclaimer_never_empty(payload in arb_payload()) {
        let result = normalize_payload_value(&payload).expect("object payload");
        prop_assert!(!result.medication_disclaimer.trim().is_empty());
    }

    #[test]
    fn non_objects_are_rejected(value in arb_json()) {
        prop_assume!(!value.is_object());
        prop_assert!(normalize_payload_value(&value).is_err());
    }
}
