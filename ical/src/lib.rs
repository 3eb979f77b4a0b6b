// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Build iCalendar (RFC 5545) objects and render them as text.
//!
//! Values are checked against the grammar of their data type, properties
//! against their allowed value types, and components against the properties
//! and sub-components RFC 5545 allows in them. Rendering is a pure read of
//! the object graph.
//!
//! ```
//! use icsgen_ical::{Calendar, Component, ComponentKind, Property, Value};
//!
//! let mut event = Component::new(ComponentKind::Event);
//! event.add_property(Property::uid())?;
//! event.add_property(Property::dt_stamp())?;
//! event.add_property(Property::dt_start(Value::date("20240115")?)?)?;
//! event.add_property(Property::summary("Release day")?)?;
//!
//! let mut calendar = Calendar::new();
//! calendar.add_component(event)?;
//!
//! let text = calendar.to_string();
//! assert!(text.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:"));
//! assert!(text.contains("\nSUMMARY:Release day\nEND:VEVENT\nEND:VCALENDAR"));
//! # Ok::<(), icsgen_ical::Error>(())
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod builder;
mod calendar;
mod component;
mod error;
pub mod formatter;
pub mod keyword;
mod kind;
mod parameter;
mod property;
mod value;

pub use crate::builder::{CalendarBuilder, EventBuilder};
pub use crate::calendar::{Calendar, DEFAULT_PRODUCT_ID};
pub use crate::component::{Component, ComponentKind};
pub use crate::error::{Error, ExpectedKinds};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatted, Formatter, LineEnding, format};
pub use crate::parameter::{Parameter, ParameterKind};
pub use crate::property::{Property, PropertyKind};
pub use crate::value::{Value, ValueKind};
