// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period value type as defined in RFC 5545 Section 3.3.9.

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil;

use crate::value::datetime::{DateTimeFields, value_date_time};
use crate::value::duration::{DurationFields, value_duration};

/// A parsed `period` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeriodFields {
    /// `date-time "/" date-time`
    Explicit {
        start: DateTimeFields,
        end: DateTimeFields,
    },
    /// `date-time "/" dur-value`
    Duration {
        start: DateTimeFields,
        duration: DurationFields,
    },
}

impl PeriodFields {
    /// Check the constraints the grammar cannot express: real dates, a
    /// consistent UTC form, an end after the start and a positive duration.
    pub fn check(self) -> Result<(), String> {
        match self {
            Self::Explicit { start, end } => {
                start.date.check()?;
                end.date.check()?;
                if start.time.utc != end.time.utc {
                    return Err("period date-times must have consistent timezone".to_string());
                }
                if to_civil(end)? <= to_civil(start)? {
                    return Err("period end must be after its start".to_string());
                }
                Ok(())
            }
            Self::Duration { start, duration } => {
                start.date.check()?;
                if duration.positive && !duration.zero {
                    Ok(())
                } else {
                    Err("period duration must be positive".to_string())
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn to_civil(dt: DateTimeFields) -> Result<civil::DateTime, String> {
    civil::DateTime::new(
        dt.date.year,
        dt.date.month,
        dt.date.day,
        dt.time.hour as i8,
        dt.time.minute as i8,
        dt.time.second.min(59) as i8, // leap second
        0,
    )
    .map_err(|e| e.to_string())
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and end.  The start MUST
/// ; be before the end.
///
/// period-start = date-time "/" dur-value
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and positive duration
/// ; of time.
/// ```
pub(crate) fn value_period<'src, I, E>() -> impl Parser<'src, I, PeriodFields, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let start = value_date_time().then_ignore(just('/'));
    choice((
        start
            .clone()
            .then(value_date_time())
            .map(|(start, end)| PeriodFields::Explicit { start, end }),
        start
            .then(value_duration())
            .map(|(start, duration)| PeriodFields::Duration { start, duration }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::value::ValueKind;

    #[test]
    fn validates_period() {
        let success_cases = [
            // examples from RFC 5545 Section 3.3.9
            "19970101T180000Z/19970102T070000Z",
            "19970101T180000Z/PT5H30M",
            // extra tests
            "19970101T180000/19970101T190000",
            "19970101T180000/+P1D",
        ];
        for src in success_cases {
            assert!(ValueKind::Period.check(src).is_ok(), "{src} should be valid");
        }

        let fail_cases = [
            "19970101T180000Z/19970102T070000",  // mixed UTC and floating
            "19970102T070000Z/19970101T180000Z", // end before start
            "19970101T180000Z/19970101T180000Z", // empty period
            "19970101T180000Z/-PT5H",            // negative duration
            "19970101T180000Z/PT0S",             // zero duration
            "19970101T180000Z/P0DT0H0M",         // zero in every component
            "19970101T180000Z",                  // no end
            "19970101/19970102",                 // dates only
            "19970230T180000Z/PT1H",             // no such date
            "19970101T180000Z/PT5H/PT1H",
        ];
        for src in fail_cases {
            assert!(ValueKind::Period.check(src).is_err(), "{src} should fail");
        }
    }
}
