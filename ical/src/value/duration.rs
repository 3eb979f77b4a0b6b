// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.

use std::fmt::Write;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::SignedDuration;

use crate::value::{Value, ValueKind};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// Returns the sign of the duration and whether it is zero.
pub(crate) fn value_duration<'src, I, E>() -> impl Parser<'src, I, DurationFields, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    // case-sensitive, each component reports whether it is non-zero
    let int = select! { c @ '0'..='9' => c != '0' }
        .repeated()
        .at_least(1)
        .collect::<Vec<bool>>()
        .map(|digits| digits.contains(&true));
    let either = |(a, b): (bool, Option<bool>)| a || b.unwrap_or(false);

    let second = int.clone().then_ignore(just('S'));
    let minute = int
        .clone()
        .then_ignore(just('M'))
        .then(second.clone().or_not())
        .map(either);
    let hour = int
        .clone()
        .then_ignore(just('H'))
        .then(minute.clone().or_not())
        .map(either);

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour, minute, second)));

    let date = int
        .clone()
        .then_ignore(just('D'))
        .then(time.clone().or_not())
        .map(either);
    let week = int.then_ignore(just('W'));

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));

    sign.then_ignore(just('P'))
        .then(choice((date, time, week)))
        .map(|(positive, nonzero)| DurationFields {
            positive,
            zero: !nonzero,
        })
}

/// Sign and size of a parsed `dur-value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DurationFields {
    pub positive: bool,
    /// Every component is zero, as in `PT0S` or `P0D`
    pub zero: bool,
}

impl Value {
    /// Build a DURATION value from a signed duration.
    ///
    /// Whole weeks are written as `PnW`; anything else is split into days,
    /// hours, minutes and seconds. Sub-second precision is truncated and a
    /// zero duration is written as `PT0S`.
    #[must_use]
    pub fn from_signed_duration(duration: SignedDuration) -> Self {
        Self::new_unchecked(ValueKind::Duration, format_duration(duration))
    }
}

fn format_duration(duration: SignedDuration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const WEEK: u64 = 7 * DAY;

    let total = duration.as_secs().unsigned_abs();
    let mut s = String::new();
    if duration.as_secs() < 0 {
        s.push('-');
    }
    s.push('P');

    if total == 0 {
        s.push_str("T0S");
        return s;
    } else if total % WEEK == 0 {
        let _ = write!(s, "{}W", total / WEEK);
        return s;
    }

    let (day, rem) = (total / DAY, total % DAY);
    let (hour, rem) = (rem / HOUR, rem % HOUR);
    let (minute, second) = (rem / MINUTE, rem % MINUTE);

    if day > 0 {
        let _ = write!(s, "{day}D");
    }
    if hour > 0 || minute > 0 || second > 0 {
        s.push('T');
        if hour > 0 {
            let _ = write!(s, "{hour}H");
        }
        // dur-hour cannot be followed directly by dur-second
        if minute > 0 || (hour > 0 && second > 0) {
            let _ = write!(s, "{minute}M");
        }
        if second > 0 {
            let _ = write!(s, "{second}S");
        }
    }
    s
}
