// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type as defined in RFC 5545 Section 3.3.10.
//!
//! Only the shape of a rule is checked; recurrences are never expanded.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::datetime::{DateFields, value_date, value_date_time};
use crate::value::parse_with;

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
enum WeekDay {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
enum RulePart {
    Freq,
    Until,
    Count,
    Interval,
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByMonth,
    BySetPos,
    Wkst,
}

/// A rule part as parsed, before its numbers are range checked.
#[derive(Debug, Clone)]
struct Part {
    rule: RulePart,
    value: PartValue,
}

#[derive(Debug, Clone)]
enum PartValue {
    /// FREQ and WKST, whose keywords the grammar already checked
    Keyword,
    EndDate(DateFields),
    Numbers {
        items: Vec<Number>,
        signed: bool,
        range: RangeInclusive<i32>,
    },
    /// BYDAY entries, keeping the optional ordinal of each weekday
    WeekDays(Vec<Option<Number>>),
}

/// An optionally signed run of digits.
#[derive(Debug, Clone)]
struct Number {
    sign: Option<char>,
    digits: String,
}

impl Number {
    fn check(&self, signed: bool, range: &RangeInclusive<i32>) -> Result<(), String> {
        if self.sign.is_some() && !signed {
            return Err(format!("'{self}' must not be signed"));
        }

        let n = lexical::parse::<i32, _>(&self.digits)
            .map_err(|_| format!("'{self}' is out of range"))?;
        if range.contains(&n) {
            Ok(())
        } else {
            let sign = if signed { "+/-" } else { "" };
            Err(format!(
                "'{self}' is outside {sign}{}..={}",
                range.start(),
                range.end()
            ))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{sign}")?;
        }
        f.write_str(&self.digits)
    }
}

impl Part {
    fn check(&self) -> Result<(), String> {
        match &self.value {
            PartValue::Keyword => Ok(()),
            PartValue::EndDate(date) => date.check(),
            PartValue::Numbers {
                items,
                signed,
                range,
            } => items.iter().try_for_each(|n| n.check(*signed, range)),
            PartValue::WeekDays(days) => days
                .iter()
                .flatten()
                .try_for_each(|n| n.check(true, &(1..=53))),
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
///
/// Names and keywords are matched case-insensitively.
pub(crate) fn check_recur(raw: &str) -> Result<(), String> {
    let parts = parse_with(value_recur(), raw)?;

    let mut seen: Vec<RulePart> = Vec::with_capacity(parts.len());
    for part in &parts {
        if seen.contains(&part.rule) {
            return Err(format!("rule part {} occurs more than once", part.rule));
        }
        seen.push(part.rule);
        part.check()
            .map_err(|reason| format!("{}: {reason}", part.rule))?;
    }

    if !seen.contains(&RulePart::Freq) {
        return Err("FREQ rule part is required".to_string());
    }
    if seen.contains(&RulePart::Until) && seen.contains(&RulePart::Count) {
        return Err("UNTIL and COUNT must not occur together".to_string());
    }
    Ok(())
}

fn value_recur<'src, I, E>() -> impl Parser<'src, I, Vec<Part>, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    recur_rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src, I, E>() -> impl Parser<'src, I, Part, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let part = |rule, value| Part { rule, value };
    let single = |rule, range: RangeInclusive<i32>| {
        rule_name(rule).ignore_then(number()).map(move |n| Part {
            rule,
            value: PartValue::Numbers {
                items: vec![n],
                signed: false,
                range: range.clone(),
            },
        })
    };
    let list = |rule, signed, range: RangeInclusive<i32>| {
        rule_name(rule)
            .ignore_then(number().separated_by(just(',')).at_least(1).collect())
            .map(move |items| Part {
                rule,
                value: PartValue::Numbers {
                    items,
                    signed,
                    range: range.clone(),
                },
            })
    };

    let freq = rule_name(RulePart::Freq)
        .ignore_then(keyword(|s| RecurrenceFrequency::from_str(s).is_ok()))
        .to(part(RulePart::Freq, PartValue::Keyword));

    let until = rule_name(RulePart::Until)
        .ignore_then(choice((value_date_time().map(|dt| dt.date), value_date())))
        .map(move |date| part(RulePart::Until, PartValue::EndDate(date)));

    let by_day = rule_name(RulePart::ByDay)
        .ignore_then(weekday_num().separated_by(just(',')).at_least(1).collect())
        .map(move |days| part(RulePart::ByDay, PartValue::WeekDays(days)));

    let wkst = rule_name(RulePart::Wkst)
        .ignore_then(weekday())
        .to(part(RulePart::Wkst, PartValue::Keyword));

    choice((
        freq,
        until,
        single(RulePart::Count, 1..=i32::MAX),
        single(RulePart::Interval, 1..=i32::MAX),
        list(RulePart::BySecond, false, 0..=60),
        list(RulePart::ByMinute, false, 0..=59),
        list(RulePart::ByHour, false, 0..=23),
        by_day,
        list(RulePart::ByMonthDay, true, 1..=31),
        list(RulePart::ByYearDay, true, 1..=366),
        list(RulePart::ByWeekNo, true, 1..=53),
        list(RulePart::ByMonth, false, 1..=12),
        list(RulePart::BySetPos, true, 1..=366),
        wkst,
    ))
}

/// A rule name followed by `=`.
fn rule_name<'src, I, E>(rule: RulePart) -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    keyword(move |s| RulePart::from_str(s).is_ok_and(|r| r == rule)).then_ignore(just('='))
}

/// A run of ASCII letters accepted by `is_known`.
fn keyword<'src, I, E>(
    is_known: impl Fn(&str) -> bool + Clone,
) -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('a'..='z' | 'A'..='Z') => c }
        .repeated()
        .at_least(1)
        .collect::<String>()
        .filter(move |s| is_known(s.as_str()))
        .ignored()
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ```
fn weekday_num<'src, I, E>() -> impl Parser<'src, I, Option<Number>, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    number().or_not().then_ignore(weekday())
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    keyword(|s| WeekDay::from_str(s).is_ok())
}

/// `[plus / minus] 1*DIGIT`; signs and ranges are checked per rule part.
fn number<'src, I, E>() -> impl Parser<'src, I, Number, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .map(|(sign, digits)| Number { sign, digits })
}
