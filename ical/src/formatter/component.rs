// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Block formatting for the calendar and its components.
//!
//! Each block is written as `BEGIN:<name>`, its property lines, its nested
//! blocks and `END:<name>`, as defined in RFC 5545 Section 3.4 and 3.6.

use std::fmt::{self, Write};

use crate::calendar::Calendar;
use crate::component::Component;
use crate::formatter::Formatter;
use crate::keyword::{KW_BEGIN, KW_END, KW_PRODID, KW_VCALENDAR, KW_VERSION, KW_VERSION_2_0};
use crate::value::escape_text;

/// Format the `VCALENDAR` block: the prologue, top-level properties and
/// components in insertion order.
pub fn write_calendar<W: Write>(f: &mut Formatter<W>, calendar: &Calendar) -> fmt::Result {
    with_block(f, KW_VCALENDAR, |f| {
        f.write_line(format_args!("{KW_VERSION}:{KW_VERSION_2_0}"))?;
        f.write_line(format_args!(
            "{KW_PRODID}:{}",
            escape_text(calendar.product_id())
        ))?;

        for prop in calendar.properties() {
            f.write_line(prop)?;
        }
        for component in calendar.components() {
            write_component(f, component)?;
        }
        Ok(())
    })
}

/// Format a component block, recursing into nested components.
pub fn write_component<W: Write>(f: &mut Formatter<W>, component: &Component) -> fmt::Result {
    with_block(f, component.kind().name(), |f| {
        for prop in component.properties() {
            f.write_line(prop)?;
        }
        for child in component.components() {
            write_component(f, child)?;
        }
        Ok(())
    })
}

/// Wraps the output of `body` in `BEGIN:<name>` and `END:<name>` lines.
fn with_block<W: Write, F>(f: &mut Formatter<W>, name: &str, body: F) -> fmt::Result
where
    F: FnOnce(&mut Formatter<W>) -> fmt::Result,
{
    f.write_line(format_args!("{KW_BEGIN}:{name}"))?;
    body(f)?;
    f.write_line(format_args!("{KW_END}:{name}"))
}
