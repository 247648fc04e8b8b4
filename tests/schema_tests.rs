//! Tests for record schema validation.

use chrono::{DateTime, Utc};
use logship::error::SchemaError;
use logship::schema::validate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct GoodRecord {
    event_type: String,
    active: bool,
    duration_ms: f64,
    at: DateTime<Utc>,
    user_id: Uuid,
}

fn good_record() -> GoodRecord {
    GoodRecord {
        event_type: "Login".to_string(),
        active: true,
        duration_ms: 12.5,
        at: Utc::now(),
        user_id: Uuid::new_v4(),
    }
}

#[test]
fn test_all_supported_field_types_pass() {
    assert!(validate(&good_record()).is_ok());
}

#[test]
fn test_integer_field_rejected() {
    #[derive(Serialize)]
    struct WithInteger {
        event_type: String,
        count: i64,
    }

    let err = validate(&WithInteger {
        event_type: "Login".to_string(),
        count: 5,
    })
    .unwrap_err();

    match err {
        SchemaError::UnsupportedField { field, found, .. } => {
            assert_eq!(field, "count");
            assert_eq!(found, "integer");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_nested_object_rejected() {
    #[derive(Serialize)]
    struct Inner {
        city: String,
    }

    #[derive(Serialize)]
    struct WithNested {
        event_type: String,
        location: Inner,
    }

    let err = validate(&WithNested {
        event_type: "Login".to_string(),
        location: Inner {
            city: "Oslo".to_string(),
        },
    })
    .unwrap_err();

    match err {
        SchemaError::UnsupportedField { field, found, .. } => {
            assert_eq!(field, "location");
            assert_eq!(found, "object");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_array_field_rejected() {
    #[derive(Serialize)]
    struct WithArray {
        tags: Vec<String>,
    }

    let err = validate(&WithArray {
        tags: vec!["a".to_string()],
    })
    .unwrap_err();

    assert!(matches!(
        err,
        SchemaError::UnsupportedField { ref field, found: "array", .. } if field == "tags"
    ));
}

#[test]
fn test_null_field_rejected() {
    #[derive(Serialize)]
    struct WithNull {
        file_name: Option<String>,
    }

    // Optional fields must use skip_serializing_if to stay off the wire;
    // a serialized null is not one of the five allowed types.
    let err = validate(&WithNull { file_name: None }).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::UnsupportedField { ref field, found: "null", .. } if field == "file_name"
    ));
}

#[test]
fn test_non_object_record_rejected() {
    let err = validate(&42.5f64).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::NotAnObject { found: "double", .. }
    ));

    let err = validate(&vec![1.5f64]).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::NotAnObject { found: "array", .. }
    ));
}

#[test]
fn test_error_message_names_field_type_and_record() {
    #[derive(Serialize)]
    struct Shipment {
        weight_grams: u32,
    }

    let err = validate(&Shipment { weight_grams: 10 }).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("weight_grams"));
    assert!(msg.contains("integer"));
    assert!(msg.contains("Shipment"));
}
