// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text value type as defined in RFC 5545 Section 3.3.11.

use std::borrow::Cow;

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
///    ; Folded according to description above
///
/// TSAFE-CHAR = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-5B /
///              %x5D-7E / NON-US-ASCII
///    ; Any character except CONTROLs not needed by the current
///    ; character set, DQUOTE, ";", ":", "\", ","
/// ```
///
/// Values are stored unescaped, so the check only rejects control
/// characters. TAB, LF and CR are kept; the latter two are encoded by
/// [`escape_text`] when rendering.
pub(crate) fn check_text(raw: &str) -> Result<(), String> {
    match raw.chars().find(|&c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')) {
        Some(c) => Err(format!("control character U+{:04X} is not allowed", u32::from(c))),
        None => Ok(()),
    }
}

/// Backslash-escape a TEXT value for the content line.
///
/// `\`, `;` and `,` are prefixed with a backslash, line feeds become `\n`
/// and carriage returns are dropped.
pub(crate) fn escape_text(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\\', ';', ',', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }

    let mut result = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a TEXT value made of up to `limit` parts joined by `separator`.
///
/// The separators between parts are written as is and each part is escaped
/// with [`escape_text`]. Past `limit`, the separator is part of the last
/// part and gets escaped with it.
pub(crate) fn escape_text_parts(raw: &str, separator: char, limit: usize) -> String {
    let mut result = String::with_capacity(raw.len() + 8);
    for (i, part) in raw.splitn(limit, separator).enumerate() {
        if i > 0 {
            result.push(separator);
        }
        result.push_str(&escape_text(part));
    }
    result
}

/// Status code of a `REQUEST-STATUS` property, RFC 5545 Section 3.8.8.3.
///
/// ```txt
/// statcode   = 1*DIGIT 1*2("." 1*DIGIT)
/// ```
pub(crate) fn value_status_code<'src, I, E>() -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let digits = select! { c @ '0'..='9' => c }.repeated().at_least(1);
    digits
        .clone()
        .then(just('.').then(digits).repeated().at_least(1).at_most(2))
        .ignored()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::value::{ValueKind, parse_with};

    #[test]
    fn validates_text() {
        let success_cases = [
            "",
            "Project XYZ Final Review",
            "Conference Room - F123, Bldg. 002",
            "line one\nline two",
            "tab\tseparated",
            "\"quoted\" and: colon",
            "日本語のテキスト",
        ];
        for src in success_cases {
            assert!(ValueKind::Text.check(src).is_ok(), "{src:?} should be valid");
        }

        for src in ["bell\u{7}", "nul\0", "esc\u{1b}[0m", "del\u{7f}"] {
            assert!(ValueKind::Text.check(src).is_err(), "{src:?} should fail");
        }
    }

    #[test]
    fn escapes_text() {
        #[rustfmt::skip]
        let cases = [
            ("plain text",            "plain text"),
            ("a;b,c",                 "a\\;b\\,c"),
            ("back\\slash",           "back\\\\slash"),
            ("two\nlines",            "two\\nlines"),
            ("windows\r\nline",       "windows\\nline"),
            ("colon: and \"quotes\"", "colon: and \"quotes\""),
        ];
        for (src, expected) in cases {
            assert_eq!(escape_text(src), expected, "Failed to escape {src:?}");
        }
    }

    #[test]
    fn borrows_when_nothing_to_escape() {
        assert!(matches!(escape_text("nothing special"), Cow::Borrowed(_)));
    }

    #[test]
    fn escapes_text_parts_between_separators() {
        #[rustfmt::skip]
        let cases = [
            ("APPOINTMENT,EDUCATION",  ',', usize::MAX, "APPOINTMENT,EDUCATION"),
            ("a;b,c\\nd",              ',', usize::MAX, "a\\;b,c\\\\nd"),
            ("2.0;Success",            ';', 3,          "2.0;Success"),
            ("3.1;Invalid, bad;X;Y",   ';', 3,          "3.1;Invalid\\, bad;X\\;Y"),
            ("",                       ',', usize::MAX, ""),
        ];
        for (src, separator, limit, expected) in cases {
            assert_eq!(escape_text_parts(src, separator, limit), expected, "Failed on {src:?}");
        }
    }

    #[test]
    fn validates_status_code() {
        for src in ["2.0", "3.1", "2.8.1", "10.11.12"] {
            assert!(parse_with(value_status_code(), src).is_ok(), "{src} should be valid");
        }
        for src in ["2", "2.", ".0", "2.0.1.1", "2,0", "A.0", ""] {
            assert!(parse_with(value_status_code(), src).is_err(), "{src} should fail");
        }
    }
}
