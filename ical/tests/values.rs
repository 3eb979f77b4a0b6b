// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for values and properties through the public API.

use icsgen_ical::{Error, ExpectedKinds, Property, PropertyKind, Value, ValueKind};
use jiff::Timestamp;

#[test]
fn test_value_keeps_valid_input_verbatim() {
    #[rustfmt::skip]
    let cases = [
        (ValueKind::Binary,              "VGhlIHF1aWNrIGJyb3duIGZveA=="),
        (ValueKind::Boolean,             "TRUE"),
        (ValueKind::CalendarUserAddress, "mailto:jane_doe@example.com"),
        (ValueKind::Date,                "19970714"),
        (ValueKind::DateTime,            "19980118T230000"),
        (ValueKind::Duration,            "P15DT5H0M20S"),
        (ValueKind::Float,               "1000000.0000001"),
        (ValueKind::Integer,             "-1234567890"),
        (ValueKind::Period,              "19970101T180000Z/PT5H30M"),
        (ValueKind::RecurrenceRule,      "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1"),
        (ValueKind::Text,                "Project XYZ Final Review"),
        (ValueKind::Time,                "230000"),
        (ValueKind::Uri,                 "http://example.com/my-report.txt"),
        (ValueKind::UtcOffset,           "-0500"),
    ];
    for (kind, raw) in cases {
        let value = Value::new(kind, raw).unwrap();
        assert_eq!(value.kind(), kind);
        assert_eq!(value.to_string(), raw, "{kind} did not keep its text");
    }
}

#[test]
fn test_value_rejects_malformed_input() {
    assert!(matches!(
        Value::binary("ABCDEF"),
        Err(Error::InvalidDataType {
            kind: ValueKind::Binary,
            ..
        })
    ));
    assert!(Value::binary("AAABAAEAEBAQAAEABAAoAQAAFgAAACgAAAAQAAAAIAAAAA==").is_ok());

    assert!(Value::boolean("TRUE").is_ok());
    assert!(Value::boolean("false").is_ok());
    assert!(Value::boolean("1").is_err());

    assert!(Value::date("20240115").is_ok());
    assert!(Value::date("2024-01-15").is_err());
}

#[test]
fn test_value_from_timestamp_is_zero_padded_utc() {
    let ts: Timestamp = "2024-01-15T09:05:03Z".parse().unwrap();
    let value = Value::from_timestamp(ts).unwrap();
    assert_eq!(value.kind(), ValueKind::DateTime);
    assert_eq!(value.as_str(), "20240115T090503Z");
}

#[test]
fn test_property_rejects_text_for_date_time() {
    let err = Property::dt_start(Value::text("next monday").unwrap()).unwrap_err();
    assert_eq!(
        err,
        Error::BadValueType {
            property: PropertyKind::DtStart,
            expected: ExpectedKinds(&[ValueKind::DateTime, ValueKind::Date]),
            found: ValueKind::Text,
        }
    );
    assert_eq!(
        err.to_string(),
        "Property DTSTART expects DATE-TIME or DATE value, got TEXT"
    );
}

#[test]
fn test_synthesized_properties_have_values() {
    let uid = Property::uid();
    let stamp = Property::dt_stamp();
    assert!(!uid.value().as_str().is_empty());
    assert!(!stamp.value().as_str().is_empty());
    assert_ne!(
        Property::uid().value().as_str(),
        Property::uid().value().as_str()
    );
}
