// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, time, date-time and UTC offset values (RFC 5545 Sections 3.3.4,
//! 3.3.5, 3.3.12 and 3.3.14).

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::Timestamp;
use jiff::civil;
use jiff::tz::{Offset, TimeZone};

use crate::error::Error;
use crate::value::{Value, ValueKind};

/// Fields of a parsed `date` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

impl DateFields {
    /// Reject dates that match the grammar but do not exist, e.g. `20240230`.
    pub fn check(self) -> Result<(), String> {
        civil::Date::new(self.year, self.month, self.day)
            .map(drop)
            .map_err(|e| e.to_string())
    }
}

/// Fields of a parsed `time` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeFields {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub utc: bool,
}

/// Fields of a parsed `date-time` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateTimeFields {
    pub date: DateFields,
    pub time: TimeFields,
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn value_date<'src, I, E>() -> impl Parser<'src, I, DateFields, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .map(|((year, month), day)| DateFields { year, month, day })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
pub(crate) fn value_time<'src, I, E>() -> impl Parser<'src, I, TimeFields, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| TimeFields {
            hour,
            minute,
            second,
            utc: utc.is_some(),
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
///                            ;value definitions
/// ```
pub(crate) fn value_date_time<'src, I, E>() -> impl Parser<'src, I, DateTimeFields, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| DateTimeFields { date, time })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
///
/// Returns whether the offset is negative and zero.
pub(crate) fn value_utc_offset<'src, I, E>() -> impl Parser<'src, I, bool, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(offset_second().or_not())
        .map(|(((sign, hour), minute), second)| {
            sign == '-' && hour == 0 && minute == 0 && second.unwrap_or(0) == 0
        })
}

/// Check a parsed UTC offset; "-0000" and "-000000" are not allowed.
pub(crate) fn check_utc_offset(negative_zero: bool) -> Result<(), String> {
    if negative_zero {
        Err("negative zero offset is not allowed".to_string())
    } else {
        Ok(())
    }
}

impl Value {
    /// Build a DATE-TIME value in UTC form (`YYYYMMDDTHHMMSSZ`) from an
    /// instant.
    ///
    /// Sub-second precision is truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if the instant falls outside the
    /// four-digit years RFC 5545 can express.
    pub fn from_timestamp(timestamp: Timestamp) -> Result<Self, Error> {
        let datetime = timestamp.to_zoned(TimeZone::UTC).datetime();
        Self::new(ValueKind::DateTime, format_utc_date_time(datetime))
    }

    /// Build a floating DATE-TIME value (`YYYYMMDDTHHMMSS`, no UTC marker).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] for years outside `0000..=9999`.
    pub fn from_civil_datetime(datetime: civil::DateTime) -> Result<Self, Error> {
        let raw = format!(
            "{}T{}",
            format_date(datetime.date()),
            format_time(datetime.time())
        );
        Self::new(ValueKind::DateTime, raw)
    }

    /// Build a DATE value (`YYYYMMDD`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] for years outside `0000..=9999`.
    pub fn from_date(date: civil::Date) -> Result<Self, Error> {
        Self::new(ValueKind::Date, format_date(date))
    }

    /// Build a local TIME value (`HHMMSS`).
    #[must_use]
    pub fn from_civil_time(time: civil::Time) -> Self {
        Self::new_unchecked(ValueKind::Time, format_time(time))
    }

    /// Build a UTC-OFFSET value (`+HHMM` or `+HHMMSS`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if the offset has 24 hours or more,
    /// which RFC 5545 cannot express.
    pub fn from_offset(offset: Offset) -> Result<Self, Error> {
        let total = offset.seconds();
        let sign = if total < 0 { '-' } else { '+' };
        let total = total.unsigned_abs();
        let (hour, minute, second) = (total / 3600, total % 3600 / 60, total % 60);
        let raw = if second == 0 {
            format!("{sign}{hour:02}{minute:02}")
        } else {
            format!("{sign}{hour:02}{minute:02}{second:02}")
        };
        Self::new(ValueKind::UtcOffset, raw)
    }
}

/// Format an instant already converted to UTC as `YYYYMMDDTHHMMSSZ`.
pub(crate) fn format_utc_date_time(datetime: civil::DateTime) -> String {
    format!(
        "{}T{}Z",
        format_date(datetime.date()),
        format_time(datetime.time())
    )
}

fn format_date(date: civil::Date) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

fn format_time(time: civil::Time) -> String {
    format!(
        "{:02}{:02}{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, u8, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, u8, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').then(just('0')).to(60), // leap second
    ))
}

// Offsets have no leap second
fn offset_second<'src, I, E>() -> impl Parser<'src, I, u8, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    time_minute()
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(
            trivial_numeric_casts,
            clippy::cast_lossless,
            clippy::char_lit_as_u8,
            clippy::cast_possible_wrap
        )]
        const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
