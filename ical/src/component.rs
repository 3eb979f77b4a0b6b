// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar components as defined in RFC 5545 Section 3.6.
//!
//! A [`Component`] is a named block of properties and nested components.
//! Which properties and sub-components a block may hold depends on its
//! [`ComponentKind`]; the rules are checked on every insertion.

use std::fmt;

use crate::error::Error;
use crate::formatter::{FormatOptions, Formatter, write_component};
use crate::keyword::{
    KW_DAYLIGHT, KW_STANDARD, KW_VALARM, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL, KW_VTIMEZONE,
    KW_VTODO,
};
use crate::kind::keyword_kind;
use crate::property::{Property, PropertyKind};

keyword_kind! {
    /// Kind of iCalendar component.
    enum ComponentKind {
        /// Event component (3.6.1)
        Event => KW_VEVENT,
        /// To-do component (3.6.2)
        Todo => KW_VTODO,
        /// Journal component (3.6.3)
        Journal => KW_VJOURNAL,
        /// Free/busy component (3.6.4)
        FreeBusy => KW_VFREEBUSY,
        /// Time zone component (3.6.5)
        TimeZone => KW_VTIMEZONE,
        /// Alarm component (3.6.6)
        Alarm => KW_VALARM,
        /// Standard time observance of a time zone
        Standard => KW_STANDARD,
        /// Daylight saving time observance of a time zone
        Daylight => KW_DAYLIGHT,
    }
}

impl ComponentKind {
    /// Whether a property of `property` kind may appear in this component.
    ///
    /// `X-` properties are accepted everywhere.
    #[must_use]
    pub fn accepts_property(self, property: &PropertyKind) -> bool {
        use PropertyKind as P;

        if matches!(property, P::XName(_)) {
            return true;
        }

        match self {
            Self::Event => matches!(
                property,
                P::DtStamp
                    | P::Uid
                    | P::DtStart
                    | P::Class
                    | P::Created
                    | P::Description
                    | P::LastModified
                    | P::Location
                    | P::Organizer
                    | P::Priority
                    | P::Sequence
                    | P::Status
                    | P::Summary
                    | P::Transp
                    | P::Url
                    | P::RecurrenceId
                    | P::RRule
                    | P::DtEnd
                    | P::Duration
                    | P::Attach
                    | P::Attendee
                    | P::Categories
                    | P::Comment
                    | P::Contact
                    | P::ExDate
                    | P::RequestStatus
                    | P::RelatedTo
                    | P::Resources
                    | P::RDate
            ),
            Self::Todo => matches!(
                property,
                P::DtStamp
                    | P::Uid
                    | P::Class
                    | P::Completed
                    | P::Created
                    | P::Description
                    | P::DtStart
                    | P::LastModified
                    | P::Location
                    | P::Organizer
                    | P::PercentComplete
                    | P::Priority
                    | P::RecurrenceId
                    | P::Sequence
                    | P::Status
                    | P::Summary
                    | P::Url
                    | P::RRule
                    | P::Due
                    | P::Duration
                    | P::Attach
                    | P::Attendee
                    | P::Categories
                    | P::Comment
                    | P::Contact
                    | P::ExDate
                    | P::RequestStatus
                    | P::RelatedTo
                    | P::Resources
                    | P::RDate
            ),
            Self::Journal => matches!(
                property,
                P::DtStamp
                    | P::Uid
                    | P::Class
                    | P::Created
                    | P::DtStart
                    | P::LastModified
                    | P::Organizer
                    | P::RecurrenceId
                    | P::Sequence
                    | P::Status
                    | P::Summary
                    | P::Url
                    | P::RRule
                    | P::Attach
                    | P::Attendee
                    | P::Categories
                    | P::Comment
                    | P::Contact
                    | P::Description
                    | P::ExDate
                    | P::RelatedTo
                    | P::RDate
                    | P::RequestStatus
            ),
            Self::FreeBusy => matches!(
                property,
                P::DtStamp
                    | P::Uid
                    | P::Contact
                    | P::DtStart
                    | P::DtEnd
                    | P::Organizer
                    | P::Url
                    | P::Attendee
                    | P::Comment
                    | P::FreeBusy
                    | P::RequestStatus
            ),
            Self::TimeZone => matches!(property, P::TzId | P::LastModified | P::TzUrl),
            Self::Standard | Self::Daylight => matches!(
                property,
                P::DtStart
                    | P::TzOffsetTo
                    | P::TzOffsetFrom
                    | P::RRule
                    | P::Comment
                    | P::RDate
                    | P::TzName
            ),
            Self::Alarm => matches!(
                property,
                P::Action
                    | P::Trigger
                    | P::Duration
                    | P::Repeat
                    | P::Attach
                    | P::Description
                    | P::Summary
                    | P::Attendee
            ),
        }
    }

    /// Whether a component of `child` kind may be nested in this component.
    #[must_use]
    pub const fn accepts_component(self, child: Self) -> bool {
        match self {
            Self::Event | Self::Todo => matches!(child, Self::Alarm),
            Self::TimeZone => matches!(child, Self::Standard | Self::Daylight),
            Self::Journal | Self::FreeBusy | Self::Alarm | Self::Standard | Self::Daylight => {
                false
            }
        }
    }
}

/// A calendar component: a `BEGIN`/`END` block of properties and nested
/// components, both kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    kind: ComponentKind,
    properties: Vec<Property>,
    components: Vec<Component>,
}

impl Component {
    /// Create an empty component.
    #[must_use]
    pub const fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// The component kind.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The properties in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// The nested components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Append a property. Properties with the same name may repeat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotAllowed`] if this kind of component does
    /// not accept the property.
    pub fn add_property(&mut self, property: Property) -> Result<(), Error> {
        if !self.kind.accepts_property(property.kind()) {
            tracing::debug!(
                component = %self.kind,
                property = %property.kind(),
                "rejected property"
            );
            return Err(Error::PropertyNotAllowed {
                component: self.kind.name(),
                property: property.kind().clone(),
            });
        }
        self.properties.push(property);
        Ok(())
    }

    /// Append a property, consuming and returning the component.
    ///
    /// # Errors
    ///
    /// See [`Component::add_property`].
    pub fn with_property(mut self, property: Property) -> Result<Self, Error> {
        self.add_property(property)?;
        Ok(self)
    }

    /// Remove the first property equal to `property`. Does nothing if there
    /// is none.
    pub fn remove_property(&mut self, property: &Property) {
        if let Some(i) = self.properties.iter().position(|p| p == property) {
            self.properties.remove(i);
        }
    }

    /// Append a nested component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentNotAllowed`] if `component` may not be
    /// nested in this kind of component.
    pub fn add_component(&mut self, component: Component) -> Result<(), Error> {
        if !self.kind.accepts_component(component.kind) {
            tracing::debug!(parent = %self.kind, child = %component.kind, "rejected component");
            return Err(Error::ComponentNotAllowed {
                parent: self.kind.name(),
                child: component.kind,
            });
        }
        self.components.push(component);
        Ok(())
    }

    /// Remove the first nested component equal to `component`. Does nothing
    /// if there is none.
    pub fn remove_component(&mut self, component: &Component) {
        if let Some(i) = self.components.iter().position(|c| c == component) {
            self.components.remove(i);
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(&mut Formatter::new(f, FormatOptions::plain()), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::value::Value;

    #[test]
    fn parses_component_names() {
        assert_eq!("vevent".parse::<ComponentKind>(), Ok(ComponentKind::Event));
        assert_eq!("VTIMEZONE".parse::<ComponentKind>(), Ok(ComponentKind::TimeZone));
        assert_eq!("Daylight".parse::<ComponentKind>(), Ok(ComponentKind::Daylight));
        assert_eq!("VCALENDAR".parse::<ComponentKind>(), Err(()));
        assert_eq!(ComponentKind::FreeBusy.to_string(), "VFREEBUSY");
    }

    #[test]
    fn renders_empty_component() {
        let event = Component::new(ComponentKind::Event);
        assert_eq!(event.to_string(), "BEGIN:VEVENT\nEND:VEVENT");
    }

    #[test]
    fn renders_properties_in_insertion_order() {
        let mut event = Component::new(ComponentKind::Event);
        event.add_property(Property::summary("B").unwrap()).unwrap();
        event
            .add_property(Property::dt_start(Value::date("20240115").unwrap()).unwrap())
            .unwrap();
        event.add_property(Property::summary("A").unwrap()).unwrap();
        assert_eq!(
            event.to_string(),
            "BEGIN:VEVENT\nSUMMARY:B\nDTSTART;VALUE=DATE:20240115\nSUMMARY:A\nEND:VEVENT"
        );
    }

    #[test]
    fn rejects_property_not_in_component() {
        let mut tz = Component::new(ComponentKind::TimeZone);
        let err = tz.add_property(Property::summary("x").unwrap()).unwrap_err();
        assert_eq!(
            err,
            Error::PropertyNotAllowed {
                component: "VTIMEZONE",
                property: PropertyKind::Summary,
            }
        );
        assert!(tz.properties().is_empty());

        let due = Property::new(PropertyKind::Due, Value::date("20240115").unwrap()).unwrap();
        assert!(Component::new(ComponentKind::Event).add_property(due.clone()).is_err());
        assert!(Component::new(ComponentKind::Todo).add_property(due).is_ok());

        let transp = Property::new(PropertyKind::Transp, Value::text("OPAQUE").unwrap()).unwrap();
        assert!(Component::new(ComponentKind::Todo).add_property(transp.clone()).is_err());
        assert!(Component::new(ComponentKind::Event).add_property(transp).is_ok());
    }

    #[test]
    fn accepts_x_properties_everywhere() {
        let kind = PropertyKind::x_name("X-LIC-LOCATION").unwrap();
        let prop = Property::new(kind, Value::text("Europe/Paris").unwrap()).unwrap();
        for kind in [
            ComponentKind::Event,
            ComponentKind::TimeZone,
            ComponentKind::Alarm,
            ComponentKind::Standard,
        ] {
            assert!(Component::new(kind).add_property(prop.clone()).is_ok());
        }
    }

    #[test]
    fn enforces_nesting_rules() {
        let mut event = Component::new(ComponentKind::Event);
        event.add_component(Component::new(ComponentKind::Alarm)).unwrap();
        let err = event
            .add_component(Component::new(ComponentKind::Event))
            .unwrap_err();
        assert_eq!(
            err,
            Error::ComponentNotAllowed {
                parent: "VEVENT",
                child: ComponentKind::Event,
            }
        );

        let mut tz = Component::new(ComponentKind::TimeZone);
        tz.add_component(Component::new(ComponentKind::Standard)).unwrap();
        tz.add_component(Component::new(ComponentKind::Daylight)).unwrap();
        assert!(tz.add_component(Component::new(ComponentKind::Alarm)).is_err());
        assert_eq!(tz.components().len(), 2);

        let mut journal = Component::new(ComponentKind::Journal);
        assert!(journal.add_component(Component::new(ComponentKind::Alarm)).is_err());
    }

    #[test]
    fn renders_nested_components() {
        let mut alarm = Component::new(ComponentKind::Alarm);
        let action = Property::new(PropertyKind::Action, Value::text("DISPLAY").unwrap()).unwrap();
        alarm.add_property(action).unwrap();
        let mut event = Component::new(ComponentKind::Event);
        event.add_property(Property::summary("Standup").unwrap()).unwrap();
        event.add_component(alarm).unwrap();

        assert_eq!(
            event.to_string(),
            "BEGIN:VEVENT\nSUMMARY:Standup\nBEGIN:VALARM\nACTION:DISPLAY\nEND:VALARM\nEND:VEVENT"
        );
    }

    #[test]
    fn removes_first_equal_property() {
        let summary = Property::summary("Repeat").unwrap();
        let mut event = Component::new(ComponentKind::Event)
            .with_property(summary.clone())
            .unwrap()
            .with_property(Property::summary("Other").unwrap())
            .unwrap()
            .with_property(summary.clone())
            .unwrap();

        event.remove_property(&summary);
        let names: Vec<_> = event
            .properties()
            .iter()
            .map(|p| p.value().as_str())
            .collect();
        assert_eq!(names, ["Other", "Repeat"]);

        let before = event.clone();
        event.remove_property(&Property::summary("Missing").unwrap());
        event.remove_component(&Component::new(ComponentKind::Alarm));
        assert_eq!(event, before);
    }
}
