// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property values and their data types.
//!
//! Every [`Value`] carries one of the fourteen value types defined in RFC 5545
//! Section 3.3 and raw text that satisfies the grammar of that type. The
//! grammar is checked whenever the text is set, so a `Value` is never
//! invalid.

mod datetime;
mod duration;
mod miscellaneous;
mod numeric;
mod period;
mod rrule;
mod text;

use std::fmt;

use chumsky::prelude::*;

use crate::error::Error;
use crate::keyword::{
    KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_DATE, KW_DATETIME, KW_DURATION, KW_FLOAT,
    KW_INTEGER, KW_PERIOD, KW_RECUR, KW_TEXT, KW_TIME, KW_URI, KW_UTC_OFFSET,
};
use crate::kind::keyword_kind;
use crate::value::datetime::{
    check_utc_offset, value_date, value_date_time, value_time, value_utc_offset,
};
use crate::value::duration::value_duration;
use crate::value::miscellaneous::{value_binary, value_boolean, value_uri};
use crate::value::numeric::{check_float, check_integer, value_float, value_integer};
use crate::value::period::value_period;
use crate::value::rrule::check_recur;
use crate::value::text::check_text;

pub(crate) use crate::value::datetime::format_utc_date_time;
pub(crate) use crate::value::text::{escape_text, escape_text_parts, value_status_code};

keyword_kind! {
    /// Value data types defined in RFC 5545 Section 3.3.
    #[derive(strum::EnumIter)]
    enum ValueKind {
        /// Base64 encoded binary data
        Binary => KW_BINARY,
        /// `TRUE` or `FALSE`
        Boolean => KW_BOOLEAN,
        /// A calendar user address, written as a URI
        CalendarUserAddress => KW_CAL_ADDRESS,
        /// A calendar date
        Date => KW_DATE,
        /// A date with a time of day
        DateTime => KW_DATETIME,
        /// A duration of time
        Duration => KW_DURATION,
        /// A real number
        Float => KW_FLOAT,
        /// A 32-bit signed integer
        Integer => KW_INTEGER,
        /// A precise period of time
        Period => KW_PERIOD,
        /// A recurrence rule
        RecurrenceRule => KW_RECUR,
        /// Human-readable text
        Text => KW_TEXT,
        /// A time of day
        Time => KW_TIME,
        /// A uniform resource identifier
        Uri => KW_URI,
        /// An offset from UTC
        UtcOffset => KW_UTC_OFFSET,
    }
}

impl ValueKind {
    /// A one-element slice holding this kind.
    pub(crate) const fn as_slice(self) -> &'static [Self] {
        match self {
            Self::Binary => &[Self::Binary],
            Self::Boolean => &[Self::Boolean],
            Self::CalendarUserAddress => &[Self::CalendarUserAddress],
            Self::Date => &[Self::Date],
            Self::DateTime => &[Self::DateTime],
            Self::Duration => &[Self::Duration],
            Self::Float => &[Self::Float],
            Self::Integer => &[Self::Integer],
            Self::Period => &[Self::Period],
            Self::RecurrenceRule => &[Self::RecurrenceRule],
            Self::Text => &[Self::Text],
            Self::Time => &[Self::Time],
            Self::Uri => &[Self::Uri],
            Self::UtcOffset => &[Self::UtcOffset],
        }
    }

    /// Check `raw` against the grammar of this value type, returning the
    /// reason on failure.
    pub(crate) fn check(self, raw: &str) -> Result<(), String> {
        match self {
            Self::Binary => parse_with(value_binary(), raw),
            Self::Boolean => parse_with(value_boolean(), raw).map(drop),
            Self::CalendarUserAddress | Self::Uri => parse_with(value_uri(), raw),
            Self::Date => parse_with(value_date(), raw)?.check(),
            Self::DateTime => parse_with(value_date_time(), raw)?.date.check(),
            Self::Duration => parse_with(value_duration(), raw).map(drop),
            Self::Float => check_float(&parse_with(value_float(), raw)?),
            Self::Integer => check_integer(&parse_with(value_integer(), raw)?),
            Self::Period => parse_with(value_period(), raw)?.check(),
            Self::RecurrenceRule => check_recur(raw),
            Self::Text => check_text(raw),
            Self::Time => parse_with(value_time(), raw).map(drop),
            Self::UtcOffset => check_utc_offset(parse_with(value_utc_offset(), raw)?),
        }
    }
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Run `parser` over the whole of `raw`, reporting the first error.
pub(crate) fn parse_with<'src, T>(
    parser: impl Parser<'src, &'src str, T, Extra<'src>>,
    raw: &'src str,
) -> Result<T, String> {
    parser
        .then_ignore(end())
        .parse(raw)
        .into_result()
        .map_err(|errs| match errs.first() {
            Some(err) => err.to_string(),
            None => "malformed value".to_string(),
        })
}

/// A property value: a value type and text valid for that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    kind: ValueKind,
    raw: String,
}

impl Value {
    /// Create a value, checking `raw` against the grammar of `kind`.
    ///
    /// The text is kept as given; TEXT values are stored unescaped and
    /// escaped when the owning property is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if `raw` does not match the grammar.
    pub fn new(kind: ValueKind, raw: impl Into<String>) -> Result<Self, Error> {
        let raw = raw.into();
        check(kind, &raw)?;
        Ok(Self { kind, raw })
    }

    /// Create a value from text the caller produced for `kind` itself.
    pub(crate) fn new_unchecked(kind: ValueKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        debug_assert!(kind.check(&raw).is_ok(), "invalid {kind} value: {raw}");
        Self { kind, raw }
    }

    /// The value type, fixed at construction.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The raw text of this value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the value, returning its raw text.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }

    /// Replace the raw text, keeping the value type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if `raw` does not match the grammar;
    /// the previous text is kept in that case.
    pub fn set(&mut self, raw: impl Into<String>) -> Result<(), Error> {
        let raw = raw.into();
        check(self.kind, &raw)?;
        self.raw = raw;
        Ok(())
    }
}

fn check(kind: ValueKind, raw: &str) -> Result<(), Error> {
    kind.check(raw).map_err(|reason| {
        tracing::debug!(%kind, value = raw, %reason, "rejected value");
        Error::InvalidDataType {
            kind,
            value: raw.to_string(),
            reason,
        }
    })
}

macro_rules! value_constructors {
    ($( $(#[$attr:meta])* $fname:ident => $kind:ident ),+ $(,)?) => {
        impl Value {
            $(
                $(#[$attr])*
                ///
                /// # Errors
                ///
                /// Returns [`Error::InvalidDataType`] if `raw` does not match
                /// the grammar.
                pub fn $fname(raw: impl Into<String>) -> Result<Self, Error> {
                    Self::new(ValueKind::$kind, raw)
                }
            )+
        }
    };
}

value_constructors! {
    /// Create a BINARY value from base64 text.
    binary => Binary,
    /// Create a BOOLEAN value.
    boolean => Boolean,
    /// Create a CAL-ADDRESS value, e.g. `mailto:jane@example.com`.
    cal_address => CalendarUserAddress,
    /// Create a DATE value from `YYYYMMDD` text.
    date => Date,
    /// Create a DATE-TIME value from `YYYYMMDDTHHMMSS[Z]` text.
    date_time => DateTime,
    /// Create a DURATION value, e.g. `PT1H30M`.
    duration => Duration,
    /// Create a FLOAT value.
    float => Float,
    /// Create an INTEGER value.
    integer => Integer,
    /// Create a PERIOD value.
    period => Period,
    /// Create a RECUR value, e.g. `FREQ=WEEKLY;COUNT=4`.
    recur => RecurrenceRule,
    /// Create a TEXT value from unescaped text.
    text => Text,
    /// Create a TIME value from `HHMMSS[Z]` text.
    time => Time,
    /// Create a URI value.
    uri => Uri,
    /// Create a UTC-OFFSET value, e.g. `-0500`.
    utc_offset => UtcOffset,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
