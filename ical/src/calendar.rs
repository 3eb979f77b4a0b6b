// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The `VCALENDAR` root object, RFC 5545 Section 3.4.

use std::fmt;

use crate::component::{Component, ComponentKind};
use crate::error::Error;
use crate::formatter::FormatOptions;
use crate::keyword::KW_VCALENDAR;
use crate::property::{Property, PropertyKind};
use crate::value::{Value, ValueKind};

/// Product identifier written to `PRODID` unless replaced with
/// [`Calendar::with_product_id`].
pub const DEFAULT_PRODUCT_ID: &str = "-//yzx9//NONSGML icsgen//EN";

/// An iCalendar object: the root of a rendered document.
///
/// `VERSION` and `PRODID` are always written first and are not stored as
/// properties. Other top-level properties and components follow in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    product_id: Value,
    properties: Vec<Property>,
    components: Vec<Component>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            product_id: Value::new_unchecked(ValueKind::Text, DEFAULT_PRODUCT_ID),
            properties: Vec::new(),
            components: Vec::new(),
        }
    }
}

impl Calendar {
    /// Create an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the product identifier written to `PRODID`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataType`] if the text is not a valid TEXT
    /// value.
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Result<Self, Error> {
        self.product_id = Value::text(product_id)?;
        Ok(self)
    }

    /// The product identifier, unescaped.
    #[must_use]
    pub fn product_id(&self) -> &str {
        self.product_id.as_str()
    }

    /// The top-level properties in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The top-level components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Append a top-level property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotAllowed`] unless the property is
    /// `CALSCALE`, `METHOD` or an `X-` property.
    pub fn add_property(&mut self, property: Property) -> Result<(), Error> {
        match property.kind() {
            PropertyKind::CalScale | PropertyKind::Method | PropertyKind::XName(_) => {
                self.properties.push(property);
                Ok(())
            }
            kind => {
                tracing::debug!(property = %kind, "rejected calendar property");
                Err(Error::PropertyNotAllowed {
                    component: KW_VCALENDAR,
                    property: kind.clone(),
                })
            }
        }
    }

    /// Remove the first top-level property equal to `property`. Does nothing
    /// if there is none.
    pub fn remove_property(&mut self, property: &Property) {
        if let Some(i) = self.properties.iter().position(|p| p == property) {
            self.properties.remove(i);
        }
    }

    /// Append a top-level component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentNotAllowed`] for components that only exist
    /// nested in another component: `VALARM`, `STANDARD` and `DAYLIGHT`.
    pub fn add_component(&mut self, component: Component) -> Result<(), Error> {
        match component.kind() {
            ComponentKind::Event
            | ComponentKind::Todo
            | ComponentKind::Journal
            | ComponentKind::FreeBusy
            | ComponentKind::TimeZone => {
                self.components.push(component);
                Ok(())
            }
            kind @ (ComponentKind::Alarm | ComponentKind::Standard | ComponentKind::Daylight) => {
                tracing::debug!(component = %kind, "rejected calendar component");
                Err(Error::ComponentNotAllowed {
                    parent: KW_VCALENDAR,
                    child: kind,
                })
            }
        }
    }

    /// Remove the first top-level component equal to `component`. Does
    /// nothing if there is none.
    pub fn remove_component(&mut self, component: &Component) {
        if let Some(i) = self.components.iter().position(|c| c == component) {
            self.components.remove(i);
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&FormatOptions::plain().display(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_prologue_for_empty_calendar() {
        let calendar = Calendar::new();
        assert_eq!(
            calendar.to_string(),
            format!("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:{DEFAULT_PRODUCT_ID}\nEND:VCALENDAR")
        );
        assert!(calendar.properties().is_empty());
        assert!(calendar.components().is_empty());
    }

    #[test]
    fn rendering_is_pure() {
        let mut calendar = Calendar::new();
        calendar
            .add_component(Component::new(ComponentKind::Todo))
            .unwrap();
        let before = calendar.clone();
        let first = calendar.to_string();
        assert_eq!(calendar.to_string(), first);
        assert_eq!(calendar, before);
    }

    #[test]
    fn escapes_product_id() {
        let calendar = Calendar::new()
            .with_product_id("-//Acme, Inc.//Planner//EN")
            .unwrap();
        assert_eq!(calendar.product_id(), "-//Acme, Inc.//Planner//EN");
        assert!(calendar.to_string().contains("\nPRODID:-//Acme\\, Inc.//Planner//EN\n"));

        assert!(Calendar::new().with_product_id("bad\u{7}").is_err());
    }

    #[test]
    fn restricts_top_level_properties() {
        let mut calendar = Calendar::new();
        let method = Property::new(PropertyKind::Method, Value::text("PUBLISH").unwrap()).unwrap();
        calendar.add_property(method.clone()).unwrap();
        let x_name = PropertyKind::x_name("X-WR-CALNAME").unwrap();
        calendar
            .add_property(Property::new(x_name, Value::text("Work").unwrap()).unwrap())
            .unwrap();

        let err = calendar
            .add_property(Property::summary("nope").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            Error::PropertyNotAllowed {
                component: "VCALENDAR",
                property: PropertyKind::Summary,
            }
        );
        let version = Property::new(PropertyKind::Version, Value::text("2.0").unwrap()).unwrap();
        assert!(calendar.add_property(version).is_err());

        assert_eq!(
            calendar.to_string(),
            format!(
                "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:{DEFAULT_PRODUCT_ID}\n\
                 METHOD:PUBLISH\nX-WR-CALNAME:Work\nEND:VCALENDAR"
            )
        );

        calendar.remove_property(&method);
        assert_eq!(calendar.properties().len(), 1);
    }

    #[test]
    fn restricts_top_level_components() {
        let mut calendar = Calendar::new();
        let err = calendar
            .add_component(Component::new(ComponentKind::Alarm))
            .unwrap_err();
        assert_eq!(
            err,
            Error::ComponentNotAllowed {
                parent: "VCALENDAR",
                child: ComponentKind::Alarm,
            }
        );

        let tz = Component::new(ComponentKind::TimeZone);
        calendar.add_component(tz.clone()).unwrap();
        calendar
            .add_component(Component::new(ComponentKind::Event))
            .unwrap();
        assert_eq!(calendar.components().len(), 2);

        calendar.remove_component(&tz);
        calendar.remove_component(&tz);
        assert_eq!(calendar.components()[0].kind(), ComponentKind::Event);
        assert_eq!(calendar.components().len(), 1);
    }
}
