// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties as defined in RFC 5545 Sections 3.7 and 3.8.
//!
//! A [`Property`] holds exactly one [`Value`], whose type must be one of the
//! types declared for the property kind, and an ordered list of parameters.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::error::{Error, ExpectedKinds};
use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_EXDATE, KW_FREEBUSY, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD, KW_ORGANIZER,
    KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID, KW_RELATED_TO,
    KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS, KW_SUMMARY,
    KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID,
    KW_URL, KW_VERSION,
};
use crate::parameter::{Parameter, ParameterKind, is_x_name};
use crate::value::{
    Value, ValueKind, escape_text, escape_text_parts, format_utc_date_time, parse_with,
    value_status_code,
};

/// Value types an `X-` property may carry; TEXT is the default.
const X_NAME_VALUE_TYPES: &[ValueKind] = &[
    ValueKind::Text,
    ValueKind::Binary,
    ValueKind::Boolean,
    ValueKind::CalendarUserAddress,
    ValueKind::Date,
    ValueKind::DateTime,
    ValueKind::Duration,
    ValueKind::Float,
    ValueKind::Integer,
    ValueKind::Period,
    ValueKind::RecurrenceRule,
    ValueKind::Time,
    ValueKind::Uri,
    ValueKind::UtcOffset,
];

/// Macro to define `PropertyKind` with associated value types.
///
/// Usage: `property_kind!(Variant => KW => &[...], ...)`
macro_rules! property_kind {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident => $kw:ident => $value_types:expr $(,)?
        )*
    ) => {
        /// Kind of iCalendar property.
        /// Represents all standard properties defined in RFC 5545.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum PropertyKind {
            $(
                $(#[$attr])*
                $variant,
            )*
            /// Experimental `X-` property, keeping the name as given
            XName(String),
        }

        impl PropertyKind {
            /// Returns the property name.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $kw,)*
                    Self::XName(name) => name,
                }
            }

            /// Returns the allowed value types; the first is the default.
            #[must_use]
            pub fn value_types(&self) -> &'static [ValueKind] {
                match self {
                    $(Self::$variant => $value_types,)*
                    Self::XName(_) => X_NAME_VALUE_TYPES,
                }
            }
        }

        impl FromStr for PropertyKind {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Property names are case-insensitive per RFC 5545
                match s.to_ascii_uppercase().as_str() {
                    $(
                        $kw => Ok(Self::$variant),
                    )*
                    _ => Self::x_name(s),
                }
            }
        }

        #[cfg(test)]
        const KINDS: &[PropertyKind] = &[
            $(
                PropertyKind::$variant,
            )*
        ];
    };
}

// Define PropertyKind with all RFC 5545 properties and their value types
property_kind! {
    // 3.7.1.  Calendar Scale
    CalScale    => KW_CALSCALE  => &[ValueKind::Text],
    // 3.7.2.  Method
    Method      => KW_METHOD    => &[ValueKind::Text],
    // 3.7.3.  Product Identifier
    ProdId      => KW_PRODID    => &[ValueKind::Text],
    // 3.7.4.  Version
    Version     => KW_VERSION   => &[ValueKind::Text],
    // 3.8.1.1.  Attachment
    Attach      => KW_ATTACH    => &[ValueKind::Uri, ValueKind::Binary],
    // 3.8.1.2.  Categories
    Categories  => KW_CATEGORIES => &[ValueKind::Text],
    // 3.8.1.3.  Classification
    Class       => KW_CLASS     => &[ValueKind::Text],
    // 3.8.1.4.  Comment
    Comment     => KW_COMMENT   => &[ValueKind::Text],
    // 3.8.1.5.  Description
    Description => KW_DESCRIPTION => &[ValueKind::Text],
    // 3.8.1.7.  Location
    Location    => KW_LOCATION  => &[ValueKind::Text],
    // 3.8.1.8.  Percent Complete
    PercentComplete => KW_PERCENT_COMPLETE => &[ValueKind::Integer],
    // 3.8.1.9.  Priority
    Priority    => KW_PRIORITY  => &[ValueKind::Integer],
    // 3.8.1.10.  Resources
    Resources   => KW_RESOURCES => &[ValueKind::Text],
    // 3.8.1.11.  Status
    Status      => KW_STATUS    => &[ValueKind::Text],
    // 3.8.1.12.  Summary
    Summary     => KW_SUMMARY   => &[ValueKind::Text],
    // 3.8.2.1.  Date-Time Completed
    Completed   => KW_COMPLETED => &[ValueKind::DateTime],
    // 3.8.2.2.  Date-Time End
    DtEnd       => KW_DTEND     => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.3.  Date-Time Due
    Due         => KW_DUE       => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.4.  Date-Time Start
    DtStart     => KW_DTSTART   => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.2.5.  Duration
    Duration    => KW_DURATION  => &[ValueKind::Duration],
    // 3.8.2.6.  Free/Busy Time
    FreeBusy    => KW_FREEBUSY  => &[ValueKind::Period],
    // 3.8.2.7.  Time Transparency
    Transp      => KW_TRANSP    => &[ValueKind::Text],
    // 3.8.3.1.  Time Zone Identifier
    TzId        => KW_TZID      => &[ValueKind::Text],
    // 3.8.3.2.  Time Zone Name
    TzName      => KW_TZNAME    => &[ValueKind::Text],
    // 3.8.3.3.  Time Zone Offset From
    TzOffsetFrom => KW_TZOFFSETFROM => &[ValueKind::UtcOffset],
    // 3.8.3.4.  Time Zone Offset To
    TzOffsetTo  => KW_TZOFFSETTO => &[ValueKind::UtcOffset],
    // 3.8.3.5.  Time Zone URL
    TzUrl       => KW_TZURL     => &[ValueKind::Uri],
    // 3.8.4.1.  Attendee
    Attendee    => KW_ATTENDEE  => &[ValueKind::CalendarUserAddress],
    // 3.8.4.2.  Contact
    Contact     => KW_CONTACT   => &[ValueKind::Text],
    // 3.8.4.3.  Organizer
    Organizer   => KW_ORGANIZER => &[ValueKind::CalendarUserAddress],
    // 3.8.4.4.  Recurrence ID
    RecurrenceId => KW_RECURRENCE_ID => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.4.5.  Related To
    RelatedTo   => KW_RELATED_TO => &[ValueKind::Text],
    // 3.8.4.6.  Uniform Resource Locator
    Url         => KW_URL       => &[ValueKind::Uri],
    // 3.8.4.7.  Unique Identifier
    Uid         => KW_UID       => &[ValueKind::Text],
    // 3.8.5.1.  Exception Date-Times
    ExDate      => KW_EXDATE    => &[ValueKind::DateTime, ValueKind::Date],
    // 3.8.5.2.  Recurrence Date-Times
    RDate       => KW_RDATE     => &[ValueKind::DateTime, ValueKind::Date, ValueKind::Period],
    // 3.8.5.3.  Recurrence Rule
    RRule       => KW_RRULE     => &[ValueKind::RecurrenceRule],
    // 3.8.6.1.  Action
    Action      => KW_ACTION    => &[ValueKind::Text],
    // 3.8.6.2.  Repeat Count
    Repeat      => KW_REPEAT    => &[ValueKind::Integer],
    // 3.8.6.3.  Trigger
    Trigger     => KW_TRIGGER   => &[ValueKind::Duration, ValueKind::DateTime],
    // 3.8.7.1.  Date-Time Created
    Created     => KW_CREATED   => &[ValueKind::DateTime],
    // 3.8.7.2.  Date-Time Stamp
    DtStamp     => KW_DTSTAMP   => &[ValueKind::DateTime],
    // 3.8.7.3.  Last Modified
    LastModified => KW_LAST_MODIFIED => &[ValueKind::DateTime],
    // 3.8.7.4.  Sequence Number
    Sequence    => KW_SEQUENCE  => &[ValueKind::Integer],
    // 3.8.8.3.  Request Status
    RequestStatus => KW_REQUEST_STATUS => &[ValueKind::Text],
}

impl PropertyKind {
    /// Create an experimental property kind such as `X-WR-CALNAME`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPropertyName`] unless `name` is a valid
    /// `x-name`.
    pub fn x_name(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if is_x_name(&name) {
            Ok(Self::XName(name))
        } else {
            tracing::debug!(%name, "rejected property name");
            Err(Error::InvalidPropertyName { name })
        }
    }

    /// Separator and part limit for TEXT values that are lists or
    /// structures rather than a single text.
    fn text_separator(&self) -> Option<(char, usize)> {
        match self {
            Self::Categories | Self::Resources => Some((',', usize::MAX)),
            // statcode ";" statdesc [";" extdata]
            Self::RequestStatus => Some((';', 3)),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property: one content line holding a name, parameters and a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    kind: PropertyKind,
    value: Value,
    parameters: Vec<Parameter>,
}

impl Property {
    /// Create a property without parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] if the value type is not one the
    /// property accepts.
    pub fn new(kind: PropertyKind, value: Value) -> Result<Self, Error> {
        check_value_type(&kind, value.kind())?;
        Ok(Self {
            kind,
            value,
            parameters: Vec::new(),
        })
    }

    /// Create a `UID` property holding a random UUID version 4.
    #[must_use]
    pub fn uid() -> Self {
        let uid = uuid::Uuid::new_v4().to_string();
        tracing::trace!(%uid, "generated UID");
        Self {
            kind: PropertyKind::Uid,
            value: Value::new_unchecked(ValueKind::Text, uid),
            parameters: Vec::new(),
        }
    }

    /// Create a `DTSTAMP` property holding the current instant in UTC.
    #[must_use]
    pub fn dt_stamp() -> Self {
        let now = Timestamp::now().to_zoned(TimeZone::UTC).datetime();
        Self {
            kind: PropertyKind::DtStamp,
            value: Value::new_unchecked(ValueKind::DateTime, format_utc_date_time(now)),
            parameters: Vec::new(),
        }
    }

    /// Create a `DTSTAMP` property holding `timestamp` in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if the instant cannot be written
    /// as an RFC 5545 DATE-TIME.
    pub fn dt_stamp_at(timestamp: Timestamp) -> Result<Self, Error> {
        Self::new(PropertyKind::DtStamp, Value::from_timestamp(timestamp)?)
    }

    /// Create a `DTSTART` property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] unless the value is a DATE-TIME or DATE.
    pub fn dt_start(value: Value) -> Result<Self, Error> {
        Self::new(PropertyKind::DtStart, value)
    }

    /// Create a `DTEND` property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] unless the value is a DATE-TIME or DATE.
    pub fn dt_end(value: Value) -> Result<Self, Error> {
        Self::new(PropertyKind::DtEnd, value)
    }

    /// Create a `DURATION` property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] unless the value is a DURATION.
    pub fn duration(value: Value) -> Result<Self, Error> {
        Self::new(PropertyKind::Duration, value)
    }

    /// Create a `SUMMARY` property from unescaped text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if the text contains control
    /// characters.
    pub fn summary(text: impl Into<String>) -> Result<Self, Error> {
        Self::new(PropertyKind::Summary, Value::text(text)?)
    }

    /// Create an `ATTACH` property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] unless the value is a URI or BINARY.
    pub fn attachment(value: Value) -> Result<Self, Error> {
        Self::new(PropertyKind::Attach, value)
    }

    /// Create a `CATEGORIES` property from unescaped items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if there are no items, or if an
    /// item contains `,` or control characters.
    pub fn categories<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Result<Self, Error> {
        Self::new(PropertyKind::Categories, text_list(items)?)
    }

    /// Create a `RESOURCES` property from unescaped items.
    ///
    /// # Errors
    ///
    /// See [`Property::categories`].
    pub fn resources<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Result<Self, Error> {
        Self::new(PropertyKind::Resources, text_list(items)?)
    }

    /// Create a `REQUEST-STATUS` property such as `2.0;Success`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if `code` is not a status code like
    /// `3.1`, if `description` contains `;`, or if any part holds control
    /// characters.
    pub fn request_status(
        code: &str,
        description: &str,
        extra: Option<&str>,
    ) -> Result<Self, Error> {
        parse_with(value_status_code(), code).map_err(|reason| invalid_text(code, reason))?;
        if description.contains(';') {
            return Err(invalid_text(description, "status description must not contain ';'"));
        }

        let mut raw = format!("{code};{description}");
        if let Some(extra) = extra {
            raw.push(';');
            raw.push_str(extra);
        }
        Self::new(PropertyKind::RequestStatus, Value::text(raw)?)
    }

    /// The property kind.
    #[must_use]
    pub const fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// The property name, e.g. `DTSTART`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// The property value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] if the property does not accept the
    /// value type, or if a `VALUE` parameter names another type. The old
    /// value is kept on failure.
    pub fn set_value(&mut self, value: Value) -> Result<(), Error> {
        check_value_type(&self.kind, value.kind())?;
        for param in &self.parameters {
            self.check_value_parameter(param, value.kind())?;
        }
        self.value = value;
        Ok(())
    }

    /// The parameters in insertion order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Append a parameter. Parameters with the same name may repeat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadValueType`] if `param` is a `VALUE` parameter
    /// naming a type other than the type of the current value.
    pub fn add_parameter(&mut self, param: Parameter) -> Result<(), Error> {
        self.check_value_parameter(&param, self.value.kind())?;
        self.parameters.push(param);
        Ok(())
    }

    /// Append a parameter, consuming and returning the property.
    ///
    /// # Errors
    ///
    /// See [`Property::add_parameter`].
    pub fn with_parameter(mut self, param: Parameter) -> Result<Self, Error> {
        self.add_parameter(param)?;
        Ok(self)
    }

    /// Remove the first parameter equal to `param`. Does nothing if there is
    /// none.
    pub fn remove_parameter(&mut self, param: &Parameter) {
        if let Some(i) = self.parameters.iter().position(|p| p == param) {
            self.parameters.remove(i);
        }
    }

    fn check_value_parameter(&self, param: &Parameter, kind: ValueKind) -> Result<(), Error> {
        if param.kind() != ParameterKind::ValueType {
            return Ok(());
        }
        match param.value().parse::<ValueKind>() {
            Ok(declared) if declared == kind => Ok(()),
            Ok(declared) => {
                tracing::debug!(
                    property = %self.kind,
                    %declared,
                    %kind,
                    "conflicting VALUE parameter"
                );
                Err(Error::BadValueType {
                    property: self.kind.clone(),
                    expected: ExpectedKinds(kind.as_slice()),
                    found: declared,
                })
            }
            // Parameter::new only admits known value types
            Err(()) => Ok(()),
        }
    }
}

fn check_value_type(property: &PropertyKind, kind: ValueKind) -> Result<(), Error> {
    let expected = property.value_types();
    if expected.contains(&kind) {
        Ok(())
    } else {
        tracing::debug!(%property, %kind, "rejected value type");
        Err(Error::BadValueType {
            property: property.clone(),
            expected: ExpectedKinds(expected),
            found: kind,
        })
    }
}

fn text_list<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Result<Value, Error> {
    let items: Vec<S> = items.into_iter().collect();
    let parts: Vec<&str> = items.iter().map(|item| item.as_ref()).collect();
    if parts.is_empty() {
        return Err(invalid_text("", "list must hold at least one item"));
    }
    if let Some(part) = parts.iter().find(|part| part.contains(',')) {
        return Err(invalid_text(part, "list item must not contain ','"));
    }
    Value::text(parts.join(","))
}

fn invalid_text(value: &str, reason: impl Into<String>) -> Error {
    let reason = reason.into();
    tracing::debug!(value, %reason, "rejected structured text");
    Error::InvalidDataType {
        kind: ValueKind::Text,
        value: value.to_string(),
        reason,
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;

        // VALUE for a non-default type and ENCODING for BINARY, unless given
        let kind = self.value.kind();
        let has = |param: ParameterKind| self.parameters.iter().any(|p| p.kind() == param);
        if self.kind.value_types().first() != Some(&kind) && !has(ParameterKind::ValueType) {
            write!(f, ";{}", Parameter::value_type(kind))?;
        }
        if kind == ValueKind::Binary && !has(ParameterKind::Encoding) {
            write!(f, ";{}", Parameter::base64())?;
        }
        for param in &self.parameters {
            write!(f, ";{param}")?;
        }

        f.write_str(":")?;
        let raw = self.value.as_str();
        match (kind, self.kind.text_separator()) {
            (ValueKind::Text, Some((separator, limit))) => {
                f.write_str(&escape_text_parts(raw, separator, limit))
            }
            (ValueKind::Text, None) => f.write_str(&escape_text(raw)),
            _ => f.write_str(raw),
        }
    }
}
