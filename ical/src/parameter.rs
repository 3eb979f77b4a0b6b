// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.

use std::fmt;

use crate::error::Error;
use crate::keyword::{
    KW_ALTREP, KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE, KW_CN, KW_CUTYPE, KW_CUTYPE_GROUP,
    KW_CUTYPE_INDIVIDUAL, KW_CUTYPE_RESOURCE, KW_CUTYPE_ROOM, KW_CUTYPE_UNKNOWN,
    KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_ENCODING, KW_ENCODING_8BIT,
    KW_ENCODING_BASE64, KW_FBTYPE, KW_FBTYPE_BUSY, KW_FBTYPE_BUSY_TENTATIVE,
    KW_FBTYPE_BUSY_UNAVAILABLE, KW_FBTYPE_FREE, KW_FMTTYPE, KW_LANGUAGE, KW_MEMBER, KW_PARTSTAT,
    KW_PARTSTAT_ACCEPTED, KW_PARTSTAT_COMPLETED, KW_PARTSTAT_DECLINED, KW_PARTSTAT_DELEGATED,
    KW_PARTSTAT_IN_PROCESS, KW_PARTSTAT_NEEDS_ACTION, KW_PARTSTAT_TENTATIVE, KW_RANGE,
    KW_RANGE_THISANDFUTURE, KW_RELATED, KW_RELATED_END, KW_RELATED_START, KW_RELTYPE,
    KW_RELTYPE_CHILD, KW_RELTYPE_PARENT, KW_RELTYPE_SIBLING, KW_ROLE, KW_ROLE_CHAIR,
    KW_ROLE_NON_PARTICIPANT, KW_ROLE_OPT_PARTICIPANT, KW_ROLE_REQ_PARTICIPANT, KW_RSVP,
    KW_SENT_BY, KW_TZID, KW_VALUE,
};
use crate::kind::keyword_kind;
use crate::value::ValueKind;

keyword_kind! {
    /// Kinds of iCalendar parameters
    #[expect(missing_docs)]
    enum ParameterKind {
        AlternateText            => KW_ALTREP,
        CommonName               => KW_CN,
        CalendarUserType         => KW_CUTYPE,
        Delegators               => KW_DELEGATED_FROM,
        Delegatees               => KW_DELEGATED_TO,
        Directory                => KW_DIR,
        Encoding                 => KW_ENCODING,
        FormatType               => KW_FMTTYPE,
        FreeBusyType             => KW_FBTYPE,
        Language                 => KW_LANGUAGE,
        GroupOrListMembership    => KW_MEMBER,
        ParticipationStatus      => KW_PARTSTAT,
        RecurrenceIdRange        => KW_RANGE,
        AlarmTriggerRelationship => KW_RELATED,
        RelationshipType         => KW_RELTYPE,
        ParticipationRole        => KW_ROLE,
        SendBy                   => KW_SENT_BY,
        RsvpExpectation          => KW_RSVP,
        TimeZoneIdentifier       => KW_TZID,
        ValueType                => KW_VALUE,
    }
}

/// How a parameter value may be written.
enum Vocabulary {
    /// Free `paramtext` or quoted string
    Text,
    /// A single calendar user address or URI, always quoted
    Uri,
    /// A comma-separated list of calendar user addresses, each quoted
    UriList,
    /// One of the listed tokens, compared case-insensitively
    Closed(&'static [&'static str]),
    /// One of the listed tokens or an `X-` name
    Extensible(&'static [&'static str]),
}

impl ParameterKind {
    const fn vocabulary(self) -> Vocabulary {
        match self {
            Self::AlternateText | Self::Directory | Self::SendBy => Vocabulary::Uri,
            Self::Delegators | Self::Delegatees | Self::GroupOrListMembership => {
                Vocabulary::UriList
            }
            Self::CommonName | Self::FormatType | Self::Language | Self::TimeZoneIdentifier => {
                Vocabulary::Text
            }
            Self::CalendarUserType => Vocabulary::Extensible(&[
                KW_CUTYPE_INDIVIDUAL,
                KW_CUTYPE_GROUP,
                KW_CUTYPE_RESOURCE,
                KW_CUTYPE_ROOM,
                KW_CUTYPE_UNKNOWN,
            ]),
            Self::Encoding => Vocabulary::Closed(&[KW_ENCODING_8BIT, KW_ENCODING_BASE64]),
            Self::FreeBusyType => Vocabulary::Extensible(&[
                KW_FBTYPE_FREE,
                KW_FBTYPE_BUSY,
                KW_FBTYPE_BUSY_UNAVAILABLE,
                KW_FBTYPE_BUSY_TENTATIVE,
            ]),
            Self::ParticipationStatus => Vocabulary::Extensible(&[
                KW_PARTSTAT_NEEDS_ACTION,
                KW_PARTSTAT_ACCEPTED,
                KW_PARTSTAT_DECLINED,
                KW_PARTSTAT_TENTATIVE,
                KW_PARTSTAT_DELEGATED,
                KW_PARTSTAT_COMPLETED,
                KW_PARTSTAT_IN_PROCESS,
            ]),
            Self::RecurrenceIdRange => Vocabulary::Closed(&[KW_RANGE_THISANDFUTURE]),
            Self::AlarmTriggerRelationship => {
                Vocabulary::Closed(&[KW_RELATED_START, KW_RELATED_END])
            }
            Self::RelationshipType => Vocabulary::Extensible(&[
                KW_RELTYPE_PARENT,
                KW_RELTYPE_CHILD,
                KW_RELTYPE_SIBLING,
            ]),
            Self::ParticipationRole => Vocabulary::Extensible(&[
                KW_ROLE_CHAIR,
                KW_ROLE_REQ_PARTICIPANT,
                KW_ROLE_OPT_PARTICIPANT,
                KW_ROLE_NON_PARTICIPANT,
            ]),
            Self::RsvpExpectation => Vocabulary::Closed(&[KW_BOOLEAN_TRUE, KW_BOOLEAN_FALSE]),
            // checked against ValueKind instead
            Self::ValueType => Vocabulary::Closed(&[]),
        }
    }
}

/// A property parameter: a kind and its validated value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    kind: ParameterKind,
    value: String,
}

impl Parameter {
    /// Create a parameter, validating `value` for `kind`.
    ///
    /// Enumerated values (e.g. `VALUE`, `ENCODING`, `PARTSTAT`) are
    /// normalized to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the value is not valid for the
    /// parameter.
    pub fn new(kind: ParameterKind, value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        match normalize(kind, &value) {
            Ok(normalized) => Ok(Self {
                kind,
                value: normalized.unwrap_or(value),
            }),
            Err(reason) => {
                tracing::debug!(%kind, %value, %reason, "rejected parameter");
                Err(Error::InvalidParameter {
                    parameter: kind,
                    value,
                    reason,
                })
            }
        }
    }

    /// Create a `VALUE` parameter naming `kind`.
    #[must_use]
    pub fn value_type(kind: ValueKind) -> Self {
        Self {
            kind: ParameterKind::ValueType,
            value: kind.name().to_string(),
        }
    }

    /// Create an `ENCODING=BASE64` parameter.
    #[must_use]
    pub fn base64() -> Self {
        Self {
            kind: ParameterKind::Encoding,
            value: KW_ENCODING_BASE64.to_string(),
        }
    }

    /// The parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The parameter name, e.g. `VALUE`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The parameter value, unquoted.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Validate `value`, returning the normalized form when it differs.
fn normalize(kind: ParameterKind, value: &str) -> Result<Option<String>, String> {
    if let Some(c) = value.chars().find(|&c| c == '"' || (c.is_control() && c != '\t')) {
        return Err(format!("character {c:?} is not allowed in a parameter value"));
    }

    match kind.vocabulary() {
        Vocabulary::Text => match kind {
            ParameterKind::FormatType => check_format_type(value).map(|()| None),
            ParameterKind::Language => check_language(value).map(|()| None),
            ParameterKind::TimeZoneIdentifier if value.is_empty() => {
                Err("time zone identifier must not be empty".to_string())
            }
            _ => Ok(None),
        },
        Vocabulary::Uri => ValueKind::Uri.check(value).map(|()| None),
        Vocabulary::UriList => value
            .split(',')
            .try_for_each(|item| ValueKind::CalendarUserAddress.check(item))
            .map(|()| None),
        Vocabulary::Closed(_) if kind == ParameterKind::ValueType => value
            .parse::<ValueKind>()
            .map(|v| Some(v.name().to_string()))
            .map_err(|()| format!("unknown value type '{value}'")),
        Vocabulary::Closed(tokens) => check_token(value, tokens, false),
        Vocabulary::Extensible(tokens) => check_token(value, tokens, true),
    }
}

fn check_token(
    value: &str,
    tokens: &[&str],
    allow_x_name: bool,
) -> Result<Option<String>, String> {
    let upper = value.to_ascii_uppercase();
    if tokens.contains(&upper.as_str()) || (allow_x_name && is_x_name(&upper)) {
        Ok((upper != value).then_some(upper))
    } else {
        Err(format!("expected one of {}", tokens.join(", ")))
    }
}

/// `x-name = "X-" [vendorid "-"] 1*(ALPHA / DIGIT / "-")`
pub(crate) fn is_x_name(s: &str) -> bool {
    s.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("X-"))
        && s.len() > 2
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// `fmttypeparam = type-name "/" subtype-name`
fn check_format_type(value: &str) -> Result<(), String> {
    let restricted = |s: &str| {
        !s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
    };
    match value.split_once('/') {
        Some((ty, subtype)) if restricted(ty) && restricted(subtype) => Ok(()),
        _ => Err("expected a media type such as text/plain".to_string()),
    }
}

/// `languageparam = language` as defined in RFC 5646, checked loosely.
fn check_language(value: &str) -> Result<(), String> {
    let ok = value
        .split('-')
        .all(|tag| (1..=8).contains(&tag.len()) && tag.bytes().all(|b| b.is_ascii_alphanumeric()));
    if ok {
        Ok(())
    } else {
        Err("expected a language tag such as en-US".to_string())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.kind)?;
        match self.kind.vocabulary() {
            Vocabulary::Uri => write!(f, "\"{}\"", self.value),
            Vocabulary::UriList => {
                for (i, item) in self.value.split(',').enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{item}\"")?;
                }
                Ok(())
            }
            _ if self.value.contains([':', ';', ',']) => write!(f, "\"{}\"", self.value),
            _ => f.write_str(&self.value),
        }
    }
}
