// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes a [`Calendar`] as RFC 5545 content lines. Line endings,
//! line folding and the final terminator are controlled by [`FormatOptions`].
//!
//! # Example
//!
//! ```
//! use icsgen_ical::{Calendar, Component, ComponentKind, Property, formatter::format};
//!
//! let mut event = Component::new(ComponentKind::Event);
//! event.add_property(Property::summary("Team sync")?)?;
//!
//! let mut calendar = Calendar::new();
//! calendar.add_component(event)?;
//!
//! let ics = format(&calendar);
//! assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
//! assert!(ics.contains("SUMMARY:Team sync\r\n"));
//! # Ok::<(), icsgen_ical::Error>(())
//! ```

mod component;

use std::fmt::{self, Write};
use std::io;

pub(crate) use crate::formatter::component::{write_calendar, write_component};

use crate::calendar::Calendar;

/// Format a [`Calendar`] to a `String` with the default (RFC 5545) options.
#[must_use]
pub fn format(calendar: &Calendar) -> String {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Line terminator between content lines.
    ///
    /// Default: `LineEnding::CrLf` for RFC 5545 compliance.
    pub line_ending: LineEnding,

    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (line ending + SPACE).
    pub folding_style: FoldingStyle,

    /// Whether the last line is followed by a line ending.
    ///
    /// Default: `true`.
    pub terminate_last_line: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::default(),
            folding: Some(75),
            folding_style: FoldingStyle::default(),
            terminate_last_line: true,
        }
    }
}

impl FormatOptions {
    /// Options used by the `Display` implementations: lines joined by a
    /// single `\n`, no folding and no final terminator.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            folding: None,
            folding_style: FoldingStyle::Space,
            terminate_last_line: false,
        }
    }

    /// Set the line ending.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Set whether the last line is followed by a line ending.
    #[must_use]
    pub const fn terminate_last_line(mut self, terminate: bool) -> Self {
        self.terminate_last_line = terminate;
        self
    }

    /// Convenience method to write a [`Calendar`] to any `io::Write`
    /// implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, calendar: &Calendar, w: &mut impl io::Write) -> io::Result<()> {
        tracing::trace!(options = ?self, "writing calendar");
        write!(w, "{}", self.display(calendar))
    }

    /// Convenience method to write a [`Calendar`] to a `String`.
    #[must_use]
    pub fn write_to_string(&self, calendar: &Calendar) -> String {
        tracing::trace!(options = ?self, "formatting calendar");
        self.display(calendar).to_string()
    }

    /// Adapter that renders `calendar` with these options through `Display`.
    #[must_use]
    pub const fn display<'a>(&self, calendar: &'a Calendar) -> Formatted<'a> {
        Formatted {
            calendar,
            options: *self,
        }
    }
}

/// A calendar paired with formatting options, see [`FormatOptions::display`].
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a> {
    calendar: &'a Calendar,
    options: FormatOptions,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new(f, self.options);
        write_calendar(&mut formatter, self.calendar)?;
        formatter.finish()
    }
}

/// Line terminator written between content lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// CRLF (RFC 5545 default)
    #[default]
    CrLf,
    /// A single LF
    Lf,
}

impl LineEnding {
    /// The terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// Line ending + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// Line ending + TAB
    Tab,
}

impl FoldingStyle {
    /// The whitespace character starting a continuation line.
    #[must_use]
    pub(crate) const fn continuation(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Tab => '\t',
        }
    }
}

/// iCalendar formatter that writes content lines to any `fmt::Write`
/// implementer.
///
/// Text written through the `fmt::Write` implementation belongs to the
/// current line and is folded as needed. Lines are started with
/// [`Formatter::write_line`].
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in octets, including a continuation character.
    line_length: usize,
    /// Octets written since the line was started or last folded.
    segment_length: usize,
    /// Number of lines started so far.
    lines: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub const fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
            segment_length: 0,
            lines: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Start a new content line and write `line` into it.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_line(&mut self, line: impl fmt::Display) -> fmt::Result {
        if self.lines > 0 {
            self.writer.write_str(self.options.line_ending.as_str())?;
        }
        self.lines += 1;
        self.line_length = 0;
        self.segment_length = 0;
        write!(self, "{line}")
    }

    /// Write the final line ending, if the options ask for one.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn finish(&mut self) -> fmt::Result {
        if self.options.terminate_last_line && self.lines > 0 {
            self.writer.write_str(self.options.line_ending.as_str())?;
            self.line_length = 0;
            self.segment_length = 0;
        }
        Ok(())
    }

    /// Insert line folding: line ending + whitespace.
    fn insert_fold(&mut self) -> fmt::Result {
        self.writer.write_str(self.options.line_ending.as_str())?;
        self.writer
            .write_char(self.options.folding_style.continuation())?;
        self.line_length = 1; // the continuation character
        self.segment_length = 0;
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            return self.writer.write_str(s);
        };

        // Walk whole characters so a multi-byte UTF-8 sequence is never split
        let mut start = 0;
        for (i, c) in s.char_indices() {
            let len = c.len_utf8();
            if self.line_length + len > max_len && self.segment_length > 0 {
                self.writer.write_str(s.get(start..i).unwrap_or_default())?;
                self.insert_fold()?;
                start = i;
            }
            self.line_length += len;
            self.segment_length += len;
        }
        self.writer.write_str(s.get(start..).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(options: FormatOptions, lines: &[&str]) -> String {
        let mut buffer = String::new();
        let mut f = Formatter::new(&mut buffer, options);
        for line in lines {
            f.write_line(line).unwrap();
        }
        f.finish().unwrap();
        buffer
    }

    #[test]
    fn joins_lines_with_line_ending() {
        let lines = ["BEGIN:VEVENT", "END:VEVENT"];
        assert_eq!(
            render(FormatOptions::default(), &lines),
            "BEGIN:VEVENT\r\nEND:VEVENT\r\n"
        );
        assert_eq!(
            render(FormatOptions::plain(), &lines),
            "BEGIN:VEVENT\nEND:VEVENT"
        );
        assert_eq!(
            render(FormatOptions::plain().terminate_last_line(true), &lines),
            "BEGIN:VEVENT\nEND:VEVENT\n"
        );
        assert_eq!(render(FormatOptions::default(), &[]), "");
    }

    #[test]
    fn folds_long_lines_at_75_octets() {
        let line = format!("DESCRIPTION:{}", "x".repeat(150));
        let output = render(FormatOptions::default(), &[&line]);

        let physical: Vec<_> = output.trim_end_matches("\r\n").split("\r\n").collect();
        assert_eq!(physical.len(), 3);
        assert_eq!(physical[0].len(), 75);
        assert_eq!(physical[1].len(), 75);
        assert!(physical[1].starts_with(' '));
        assert!(physical[2].starts_with(' '));

        // unfolding restores the logical line
        assert_eq!(output.replace("\r\n ", ""), format!("{line}\r\n"));
    }

    #[test]
    fn does_not_fold_short_lines() {
        let line = format!("SUMMARY:{}", "x".repeat(67)); // exactly 75 octets
        assert_eq!(line.len(), 75);
        assert_eq!(
            render(FormatOptions::default(), &[&line]),
            format!("{line}\r\n")
        );
    }

    #[test]
    fn never_splits_utf8_characters() {
        let line = format!("SUMMARY:{}", "日本語".repeat(30));
        let output = render(FormatOptions::default(), &[&line]);

        for physical in output.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(physical.len() <= 75, "line too long: {}", physical.len());
        }
        assert_eq!(output.replace("\r\n ", ""), format!("{line}\r\n"));
    }

    #[test]
    fn folds_with_tab_and_custom_width() {
        let options = FormatOptions::default()
            .folding(Some(10))
            .folding_style(FoldingStyle::Tab)
            .line_ending(LineEnding::Lf);
        let output = render(options, &["SUMMARY:abcdefgh"]);
        assert_eq!(output, "SUMMARY:ab\n\tcdefgh\n");
    }

    #[test]
    fn folding_always_makes_progress() {
        let options = FormatOptions::plain().folding(Some(1));
        let output = render(options, &["ABC"]);
        assert_eq!(output, "A\n B\n C");
    }
}
