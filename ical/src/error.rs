// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while building an iCalendar object graph.

use std::fmt;

use crate::component::ComponentKind;
use crate::parameter::ParameterKind;
use crate::property::PropertyKind;
use crate::value::ValueKind;

/// Error type for construction and mutation of iCalendar objects.
///
/// Every error is raised at the point of the offending input; nothing is
/// attached to a parent object when an error is returned.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The raw text does not satisfy the grammar of its value type.
    #[error("Invalid {kind} value '{value}': {reason}")]
    InvalidDataType {
        /// The value type whose grammar was violated
        kind: ValueKind,
        /// The rejected raw text
        value: String,
        /// Why the text was rejected
        reason: String,
    },

    /// A value of the wrong type was given to a property.
    #[error("Property {property} expects {expected} value, got {found}")]
    BadValueType {
        /// The property that rejected the value
        property: PropertyKind,
        /// The value types the property accepts
        expected: ExpectedKinds,
        /// The value type that was supplied
        found: ValueKind,
    },

    /// A parameter value is not valid for its parameter.
    #[error("Invalid value '{value}' for parameter {parameter}: {reason}")]
    InvalidParameter {
        /// The parameter that rejected the value
        parameter: ParameterKind,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The property may not appear in the given component.
    #[error("Property {property} is not allowed in {component}")]
    PropertyNotAllowed {
        /// Name of the component (or `VCALENDAR`)
        component: &'static str,
        /// The rejected property
        property: PropertyKind,
    },

    /// The component may not be nested in the given parent.
    #[error("Component {child} is not allowed in {parent}")]
    ComponentNotAllowed {
        /// Name of the parent component (or `VCALENDAR`)
        parent: &'static str,
        /// The rejected component
        child: ComponentKind,
    },

    /// A property name is neither a known RFC 5545 property nor an `X-` name.
    #[error("Invalid property name '{name}'")]
    InvalidPropertyName {
        /// The rejected name
        name: String,
    },
}

/// The list of value types a property accepts, as reported in
/// [`Error::BadValueType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedKinds(pub &'static [ValueKind]);

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}
