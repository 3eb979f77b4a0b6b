// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Float and integer values as defined in RFC 5545 Sections 3.3.7 and 3.3.8.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::prelude::*;

use crate::error::Error;
use crate::value::{Value, ValueKind};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
///
/// Yields the matched text; range checks happen in [`check_float`].
pub(crate) fn value_float<'src, I, E>() -> impl Parser<'src, I, String, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let digits = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .collect::<String>();

    sign()
        .or_not()
        .then(digits)
        .then(just('.').ignore_then(digits).or_not())
        .map(|((sign, int_part), frac_part)| {
            let mut s = String::new();
            if let Some(sign) = sign {
                s.push(sign);
            }
            s.push_str(&int_part);
            if let Some(frac) = frac_part {
                s.push('.');
                s.push_str(&frac);
            }
            s
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
///
/// Yields the matched text; range checks happen in [`check_integer`].
pub(crate) fn value_integer<'src, I, E>() -> impl Parser<'src, I, String, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    sign()
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .map(|(sign, digits)| match sign {
            Some(sign) => format!("{sign}{digits}"),
            None => digits,
        })
}

/// The float must be representable as a finite `f64`.
pub(crate) fn check_float(s: &str) -> Result<(), String> {
    match lexical::parse::<f64, _>(s.strip_prefix('+').unwrap_or(s)) {
        Ok(f) if f.is_finite() => Ok(()),
        Ok(_) => Err("float out of range".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// The integer must fit in an `i32`.
pub(crate) fn check_integer(s: &str) -> Result<(), String> {
    lexical::parse::<i32, _>(s.strip_prefix('+').unwrap_or(s))
        .map(drop)
        .map_err(|_| "i32 out of range".to_string())
}

fn sign<'src, I, E>() -> impl Parser<'src, I, char, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! {
        '+' => '+',
        '-' => '-',
    }
}

impl Value {
    /// Build an INTEGER value.
    #[must_use]
    pub fn from_i32(n: i32) -> Self {
        Self::new_unchecked(ValueKind::Integer, n.to_string())
    }

    /// Build a FLOAT value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] for NaN and infinities.
    pub fn from_f64(f: f64) -> Result<Self, Error> {
        // f64's Display never uses exponent notation
        Self::new(ValueKind::Float, f.to_string())
    }
}
