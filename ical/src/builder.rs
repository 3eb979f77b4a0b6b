// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Builders that assemble events and calendars from the core operations.
//!
//! # Example
//!
//! ```
//! use icsgen_ical::{CalendarBuilder, EventBuilder};
//! use jiff::{SignedDuration, Timestamp};
//!
//! let start: Timestamp = "2024-01-15T09:00:00Z".parse().unwrap();
//! let event = EventBuilder::new()
//!     .start(start)?
//!     .duration(SignedDuration::from_mins(30))?
//!     .summary("Standup")?
//!     .build()?;
//!
//! let calendar = CalendarBuilder::new().event(event)?.build();
//! assert!(calendar.to_string().contains("DTSTART;VALUE=DATE-TIME:20240115T090000Z"));
//! # Ok::<(), icsgen_ical::Error>(())
//! ```

use jiff::civil::Date;
use jiff::{SignedDuration, Timestamp};

use crate::calendar::Calendar;
use crate::component::{Component, ComponentKind};
use crate::error::Error;
use crate::parameter::Parameter;
use crate::property::{Property, PropertyKind};
use crate::value::{Value, ValueKind};

/// Builds a `VEVENT` component.
///
/// A new builder already holds a generated `UID` and a `DTSTAMP` of the
/// current instant. Properties are checked when added; the component rules
/// are checked by [`EventBuilder::build`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    properties: Vec<Property>,
    alarms: Vec<Component>,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self {
            properties: vec![Property::uid(), Property::dt_stamp()],
            alarms: Vec::new(),
        }
    }
}

impl EventBuilder {
    /// Create a builder holding `UID` and `DTSTAMP`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the `DTSTAMP` with a fixed instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be written as a DATE-TIME.
    pub fn stamp(mut self, timestamp: Timestamp) -> Result<Self, Error> {
        let stamp = Property::dt_stamp_at(timestamp)?;
        match self
            .properties
            .iter_mut()
            .find(|p| p.kind() == &PropertyKind::DtStamp)
        {
            Some(existing) => *existing = stamp,
            None => self.properties.push(stamp),
        }
        Ok(self)
    }

    /// Set `DTSTART` to an instant, written in UTC with `VALUE=DATE-TIME`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be written as a DATE-TIME.
    pub fn start(self, timestamp: Timestamp) -> Result<Self, Error> {
        self.date_time(PropertyKind::DtStart, Value::from_timestamp(timestamp)?)
    }

    /// Set `DTSTART` to a date, written with `VALUE=DATE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be written as a DATE.
    pub fn start_date(self, date: Date) -> Result<Self, Error> {
        self.date_time(PropertyKind::DtStart, Value::from_date(date)?)
    }

    /// Set `DTEND` to an instant, written in UTC with `VALUE=DATE-TIME`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be written as a DATE-TIME.
    pub fn end(self, timestamp: Timestamp) -> Result<Self, Error> {
        self.date_time(PropertyKind::DtEnd, Value::from_timestamp(timestamp)?)
    }

    /// Set `DTEND` to a date, written with `VALUE=DATE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be written as a DATE.
    pub fn end_date(self, date: Date) -> Result<Self, Error> {
        self.date_time(PropertyKind::DtEnd, Value::from_date(date)?)
    }

    /// Set `DURATION`.
    ///
    /// # Errors
    ///
    /// Never fails for durations produced by `jiff`; the signature matches
    /// the other setters.
    pub fn duration(self, duration: SignedDuration) -> Result<Self, Error> {
        let prop = Property::duration(Value::from_signed_duration(duration))?;
        Ok(self.property(prop))
    }

    /// Set `SUMMARY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains control characters.
    pub fn summary(self, text: impl Into<String>) -> Result<Self, Error> {
        Ok(self.property(Property::summary(text)?))
    }

    /// Set `DESCRIPTION`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains control characters.
    pub fn description(self, text: impl Into<String>) -> Result<Self, Error> {
        let prop = Property::new(PropertyKind::Description, Value::text(text)?)?;
        Ok(self.property(prop))
    }

    /// Set `LOCATION`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains control characters.
    pub fn location(self, text: impl Into<String>) -> Result<Self, Error> {
        let prop = Property::new(PropertyKind::Location, Value::text(text)?)?;
        Ok(self.property(prop))
    }

    /// Add an `ATTACH` referencing a URI.
    ///
    /// # Errors
    ///
    /// Returns an error if `uri` is not a valid URI.
    pub fn attachment_uri(self, uri: impl Into<String>) -> Result<Self, Error> {
        Ok(self.property(Property::attachment(Value::uri(uri)?)?))
    }

    /// Add an inline `ATTACH` from base64 text, written with
    /// `VALUE=BINARY;ENCODING=BASE64`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base64` is not valid base64.
    pub fn attachment(self, base64: impl Into<String>) -> Result<Self, Error> {
        let prop = Property::attachment(Value::binary(base64)?)?
            .with_parameter(Parameter::value_type(ValueKind::Binary))?
            .with_parameter(Parameter::base64())?;
        Ok(self.property(prop))
    }

    /// Add a `VALARM`.
    #[must_use]
    pub fn alarm(mut self, alarm: Component) -> Self {
        self.alarms.push(alarm);
        self
    }

    /// Add any property.
    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Build the `VEVENT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotAllowed`] or [`Error::ComponentNotAllowed`]
    /// if a property or nested component is not allowed in an event.
    pub fn build(self) -> Result<Component, Error> {
        let mut event = Component::new(ComponentKind::Event);
        for prop in self.properties {
            event.add_property(prop)?;
        }
        for alarm in self.alarms {
            event.add_component(alarm)?;
        }
        Ok(event)
    }

    fn date_time(self, kind: PropertyKind, value: Value) -> Result<Self, Error> {
        let value_type = Parameter::value_type(value.kind());
        let prop = Property::new(kind, value)?.with_parameter(value_type)?;
        Ok(self.property(prop))
    }
}

/// Builds a [`Calendar`].
#[derive(Debug, Clone, Default)]
pub struct CalendarBuilder {
    calendar: Calendar,
}

impl CalendarBuilder {
    /// Create a builder for an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains control characters.
    pub fn product_id(mut self, product_id: impl Into<String>) -> Result<Self, Error> {
        self.calendar = self.calendar.with_product_id(product_id)?;
        Ok(self)
    }

    /// Set `METHOD`, e.g. `PUBLISH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains control characters.
    pub fn method(mut self, method: impl Into<String>) -> Result<Self, Error> {
        let prop = Property::new(PropertyKind::Method, Value::text(method)?)?;
        self.calendar.add_property(prop)?;
        Ok(self)
    }

    /// Add a top-level component, typically from [`EventBuilder::build`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentNotAllowed`] if the component may not appear
    /// at the top level.
    pub fn event(mut self, event: Component) -> Result<Self, Error> {
        self.calendar.add_component(event)?;
        Ok(self)
    }

    /// Finish the calendar.
    #[must_use]
    pub fn build(self) -> Calendar {
        self.calendar
    }
}
