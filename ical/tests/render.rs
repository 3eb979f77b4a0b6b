// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for rendering calendars.

use icsgen_ical::{
    Calendar, Component, ComponentKind, DEFAULT_PRODUCT_ID, FoldingStyle, FormatOptions,
    LineEnding, Parameter, ParameterKind, Property, PropertyKind, Value, format,
};

fn calendar_with(event: Component) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.add_component(event).unwrap();
    calendar
}

#[test]
fn test_format_event_lines_in_order() {
    let mut event = Component::new(ComponentKind::Event);
    event.add_property(Property::uid()).unwrap();
    event.add_property(Property::dt_stamp()).unwrap();
    event.add_property(Property::summary("Quarterly review").unwrap()).unwrap();
    let calendar = calendar_with(event);

    let text = calendar.to_string();
    let lines: Vec<_> = text.split('\n').collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "BEGIN:VCALENDAR");
    assert_eq!(lines[1], "VERSION:2.0");
    assert_eq!(lines[2], format!("PRODID:{DEFAULT_PRODUCT_ID}"));
    assert_eq!(lines[3], "BEGIN:VEVENT");
    assert!(lines[4].starts_with("UID:"));
    assert!(lines[5].starts_with("DTSTAMP:"));
    assert_eq!(lines[6], "SUMMARY:Quarterly review");
    assert_eq!(lines[7], "END:VEVENT");
    assert_eq!(lines[8], "END:VCALENDAR");
}

#[test]
fn test_format_ends_with_calendar_block() {
    let calendar = calendar_with(Component::new(ComponentKind::Event));
    assert!(calendar.to_string().ends_with("BEGIN:VEVENT\nEND:VEVENT\nEND:VCALENDAR"));
}

#[test]
fn test_format_creates_crlf_line_endings() {
    let calendar = calendar_with(Component::new(ComponentKind::Todo));
    let formatted = format(&calendar);

    assert_eq!(
        formatted,
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:{DEFAULT_PRODUCT_ID}\r\n\
             BEGIN:VTODO\r\nEND:VTODO\r\nEND:VCALENDAR\r\n"
        )
    );
    // every line feed is part of a CRLF pair
    assert_eq!(formatted.matches('\n').count(), formatted.matches("\r\n").count());
}

#[test]
fn test_format_folds_long_description() {
    let description = "A very long description that keeps going. ".repeat(6);
    let mut event = Component::new(ComponentKind::Event);
    let value = Value::text(&description).unwrap();
    event
        .add_property(Property::new(PropertyKind::Description, value).unwrap())
        .unwrap();
    let formatted = format(&calendar_with(event));

    for line in formatted.split("\r\n") {
        assert!(line.len() <= 75, "line exceeds 75 octets: {line:?}");
    }
    let unfolded = formatted.replace("\r\n ", "");
    assert!(unfolded.contains(&format!("\r\nDESCRIPTION:{description}\r\n")));
}

#[test]
fn test_format_folding_keeps_utf8_intact() {
    let summary = "会议室预订，请准时参加。".repeat(8);
    let mut event = Component::new(ComponentKind::Event);
    event.add_property(Property::summary(&summary).unwrap()).unwrap();
    let formatted = format(&calendar_with(event));

    for line in formatted.split("\r\n") {
        assert!(line.len() <= 75, "line exceeds 75 octets: {line:?}");
    }
    let unfolded = formatted.replace("\r\n ", "");
    assert!(unfolded.contains(&format!("\r\nSUMMARY:{summary}\r\n")));
}

#[test]
fn test_format_custom_options() {
    let mut event = Component::new(ComponentKind::Event);
    event.add_property(Property::summary("abcdefghijklmnop").unwrap()).unwrap();
    let calendar = calendar_with(event);

    let options = FormatOptions::default()
        .line_ending(LineEnding::Lf)
        .folding(Some(20))
        .folding_style(FoldingStyle::Tab)
        .terminate_last_line(false);
    let formatted = options.write_to_string(&calendar);
    assert!(formatted.contains("\nSUMMARY:abcdefghijkl\n\tmnop\n"));
    assert!(formatted.ends_with("END:VCALENDAR"));

    let mut buffer = Vec::new();
    FormatOptions::default().write(&calendar, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), format(&calendar));

    assert_eq!(FormatOptions::plain().write_to_string(&calendar), calendar.to_string());
}

#[test]
fn test_format_escapes_text_and_quotes_parameters() {
    let location = Property::new(
        PropertyKind::Location,
        Value::text("Room 1; Building A, Floor 2").unwrap(),
    )
    .unwrap()
    .with_parameter(
        Parameter::new(ParameterKind::AlternateText, "http://example.com/room-1").unwrap(),
    )
    .unwrap();
    let organizer = Property::new(
        PropertyKind::Organizer,
        Value::cal_address("mailto:jsmith@example.com").unwrap(),
    )
    .unwrap()
    .with_parameter(Parameter::new(ParameterKind::CommonName, "Smith, John").unwrap())
    .unwrap();

    let mut event = Component::new(ComponentKind::Event);
    event.add_property(location).unwrap();
    event.add_property(organizer).unwrap();
    let text = calendar_with(event).to_string();

    assert!(text.contains(
        "\nLOCATION;ALTREP=\"http://example.com/room-1\":Room 1\\; Building A\\, Floor 2\n"
    ));
    assert!(text.contains("\nORGANIZER;CN=\"Smith, John\":mailto:jsmith@example.com\n"));
}

#[test]
fn test_format_time_zone_with_observances() {
    let tz_id =
        Property::new(PropertyKind::TzId, Value::text("America/New_York").unwrap()).unwrap();
    let mut standard = Component::new(ComponentKind::Standard);
    for (kind, value) in [
        (PropertyKind::DtStart, Value::date_time("19671029T020000").unwrap()),
        (PropertyKind::TzOffsetFrom, Value::utc_offset("-0400").unwrap()),
        (PropertyKind::TzOffsetTo, Value::utc_offset("-0500").unwrap()),
        (PropertyKind::TzName, Value::text("EST").unwrap()),
    ] {
        standard.add_property(Property::new(kind, value).unwrap()).unwrap();
    }
    let mut tz = Component::new(ComponentKind::TimeZone);
    tz.add_property(tz_id).unwrap();
    tz.add_component(standard).unwrap();

    let text = calendar_with(tz).to_string();
    assert!(text.contains(
        "BEGIN:VTIMEZONE\nTZID:America/New_York\nBEGIN:STANDARD\nDTSTART:19671029T020000\n\
         TZOFFSETFROM:-0400\nTZOFFSETTO:-0500\nTZNAME:EST\nEND:STANDARD\nEND:VTIMEZONE\n"
    ));
}

#[test]
fn test_format_marks_non_default_value_types() {
    let mut event = Component::new(ComponentKind::Event);
    for prop in [
        Property::dt_start(Value::date("20240115").unwrap()).unwrap(),
        Property::dt_end(Value::date("20240116").unwrap()).unwrap(),
        Property::new(PropertyKind::RDate, Value::date("20240122").unwrap()).unwrap(),
        Property::attachment(Value::binary("TWFu").unwrap()).unwrap(),
        Property::new(
            PropertyKind::x_name("X-EXAMPLE-LINK").unwrap(),
            Value::uri("https://example.com/").unwrap(),
        )
        .unwrap(),
    ] {
        event.add_property(prop).unwrap();
    }
    let mut alarm = Component::new(ComponentKind::Alarm);
    alarm
        .add_property(Property::new(PropertyKind::Action, Value::text("AUDIO").unwrap()).unwrap())
        .unwrap();
    let trigger = Value::date_time("20240115T080000Z").unwrap();
    alarm
        .add_property(Property::new(PropertyKind::Trigger, trigger).unwrap())
        .unwrap();
    event.add_component(alarm).unwrap();

    let formatted = format(&calendar_with(event));
    assert!(formatted.contains(
        "BEGIN:VEVENT\r\n\
         DTSTART;VALUE=DATE:20240115\r\n\
         DTEND;VALUE=DATE:20240116\r\n\
         RDATE;VALUE=DATE:20240122\r\n\
         ATTACH;VALUE=BINARY;ENCODING=BASE64:TWFu\r\n\
         X-EXAMPLE-LINK;VALUE=URI:https://example.com/\r\n\
         BEGIN:VALARM\r\n\
         ACTION:AUDIO\r\n\
         TRIGGER;VALUE=DATE-TIME:20240115T080000Z\r\n\
         END:VALARM\r\n"
    ));
}

#[test]
fn test_format_keeps_list_and_status_separators() {
    let mut event = Component::new(ComponentKind::Event);
    event
        .add_property(Property::categories(["APPOINTMENT", "EDUCATION"]).unwrap())
        .unwrap();
    event
        .add_property(Property::resources(["Room 1; Building A", "PROJECTOR"]).unwrap())
        .unwrap();
    event
        .add_property(Property::request_status("2.0", "Success", None).unwrap())
        .unwrap();
    let text = calendar_with(event).to_string();

    assert!(text.contains("\nCATEGORIES:APPOINTMENT,EDUCATION\n"));
    assert!(text.contains("\nRESOURCES:Room 1\\; Building A,PROJECTOR\n"));
    assert!(text.contains("\nREQUEST-STATUS:2.0;Success\n"));
}

#[test]
fn test_removing_missing_items_is_noop() {
    let summary = Property::summary("Kept").unwrap();
    let mut event = Component::new(ComponentKind::Event);
    event.add_property(summary).unwrap();
    let mut calendar = calendar_with(event.clone());
    let before = calendar.clone();

    calendar.remove_component(&Component::new(ComponentKind::Journal));
    calendar.remove_property(&Property::summary("Never added").unwrap());
    assert_eq!(calendar, before);

    event.remove_property(&Property::summary("Never added").unwrap());
    assert_eq!(event.properties().len(), 1);
}
