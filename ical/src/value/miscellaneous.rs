// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Binary, boolean and URI values as defined in RFC 5545 Sections 3.3.1,
//! 3.3.2, 3.3.3 and 3.3.13.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE};
use crate::value::{Value, ValueKind};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// binary     = *(4b-char) [b-end]
/// ; A "BASE64" encoded character string, as defined by [RFC4648].
///
/// b-end      = (2b-char "==") / (3b-char "=")
///
/// b-char = ALPHA / DIGIT / "+" / "/"
/// ```
pub(crate) fn value_binary<'src, I, E>() -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let b_char = select! {
        'A'..='Z' => (),
        'a'..='z' => (),
        '0'..='9' => (),
        '+' => (),
        '/' => (),
    };

    let quartet = b_char.repeated().exactly(4);

    // b-end = (2b-char "==") / (3b-char "=")
    let b_end = choice((
        b_char.repeated().exactly(2).then_ignore(just('=').then(just('='))),
        b_char.repeated().exactly(3).then_ignore(just('=')),
    ));

    quartet.repeated().ignore_then(b_end.or_not()).ignored()
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// boolean    = "TRUE" / "FALSE"
/// ```
///
/// These values are case-insensitive text.
pub(crate) fn value_boolean<'src, I, E>() -> impl Parser<'src, I, bool, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    // case-insensitive
    let t = choice((just('T'), just('t')))
        .then(choice((just('R'), just('r'))))
        .then(choice((just('U'), just('u'))))
        .then(choice((just('E'), just('e'))))
        .to(true);

    let f = choice((just('F'), just('f')))
        .then(choice((just('A'), just('a'))))
        .then(choice((just('L'), just('l'))))
        .then(choice((just('S'), just('s'))))
        .then(choice((just('E'), just('e'))))
        .to(false);

    choice((t, f))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// uri = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
/// ```
///
/// Only the scheme is checked strictly. The rest may be any run of
/// printable characters except SPACE and DQUOTE.
pub(crate) fn value_uri<'src, I, E>() -> impl Parser<'src, I, (), E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let scheme = select! { c @ ('a'..='z' | 'A'..='Z') => c }.then(
        select! { c @ ('a'..='z' | 'A'..='Z' | '0'..='9' | '+' | '-' | '.') => c }.repeated(),
    );

    // skips SPACE (0x20) and DQUOTE (0x22), controls are filtered by the guard
    let rest = select! { c @ ('!' | '#'..='\u{10FFFF}') if !c.is_control() => c }
        .repeated()
        .at_least(1);

    scheme.then_ignore(just(':')).then(rest).ignored()
}

impl Value {
    /// Build a BOOLEAN value, written as `TRUE` or `FALSE`.
    #[must_use]
    pub fn from_bool(b: bool) -> Self {
        let raw = if b { KW_BOOLEAN_TRUE } else { KW_BOOLEAN_FALSE };
        Self::new_unchecked(ValueKind::Boolean, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_binary() {
        let success_cases = [
            // example from RFC 5545 Section 3.1.3, with the padding fixed
            // (https://www.rfc-editor.org/errata/eid5602)
            "VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4=",
            "QUJDREVG", // "ABCDEF"
            "TQ==",     // "M"
            "TWE=",     // "Ma"
            "+/9a",
            "", // zero quartets
        ];
        for src in success_cases {
            assert!(ValueKind::Binary.check(src).is_ok(), "{src} should be valid");
        }

        let fail_cases = [
            "ABCDEF", // not a multiple of four
            "TQ===",
            "TWFu=",
            "TWFuA",
            "T@Fu",
            "TW Fu",
        ];
        for src in fail_cases {
            assert!(ValueKind::Binary.check(src).is_err(), "{src} should fail");
        }
    }

    #[test]
    fn validates_boolean() {
        for src in ["TRUE", "true", "True", "FALSE", "false", "fAlSe"] {
            assert!(ValueKind::Boolean.check(src).is_ok(), "{src} should be valid");
        }
        for src in ["1", "0", "YES", "TRUE ", " FALSE", "TRUEX", "T", ""] {
            assert!(ValueKind::Boolean.check(src).is_err(), "{src} should fail");
        }
    }

    #[test]
    fn validates_uri() {
        let success_cases = [
            "http://example.com/my-report.txt",
            "mailto:jane_doe@example.com",
            "urn:ietf:rfc:2445",
            "CID:part3.81234@example.com",
            "ftp://example.com/pub/docs/agenda.doc",
            "https://example.com/a?b=c&d=e#frag",
            "x-app+v1.2:data",
            "http://例え.jp/パス",
        ];
        for src in success_cases {
            assert!(ValueKind::Uri.check(src).is_ok(), "{src} should be valid");
            assert!(ValueKind::CalendarUserAddress.check(src).is_ok());
        }

        let fail_cases = [
            "example.com",     // no scheme
            "1http://x",       // scheme must start with a letter
            "mailto:",         // empty hier-part
            "http://a b",      // space
            "http://a\"b",     // DQUOTE
            "http://a\nb",     // control
            "http://a\u{7f}b", // DEL
            "ht_tp://x",       // underscore in scheme
            ":nothing",
            "",
        ];
        for src in fail_cases {
            assert!(ValueKind::Uri.check(src).is_err(), "{src} should fail");
        }
    }

    #[test]
    fn builds_boolean() {
        assert_eq!(Value::from_bool(true).as_str(), "TRUE");
        assert_eq!(Value::from_bool(false).as_str(), "FALSE");
        assert_eq!(Value::from_bool(false).kind(), ValueKind::Boolean);
    }
}
