//! Column-aware output buffering with deferred wrap decisions.
//!
//! A [`LineWrapper`] sits between the code writer and the real sink. Text is
//! written straight through until a wrapping space (or zero-width space) is
//! requested; from then on text is buffered until it is known whether the
//! pending space fits on the current line or has to become a line break.

use std::fmt::Write;

use crate::error::{Error, Result};

/// Column limit used when none is configured.
pub const DEFAULT_COLUMN_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlushType {
    /// Newline followed by the pending indentation.
    Wrap,
    /// A single space.
    Space,
    /// Nothing at all.
    Empty,
}

/// Pending whitespace decision and the indent level to wrap to.
#[derive(Debug, Clone, Copy)]
struct PendingFlush {
    kind: FlushType,
    indent_level: usize,
}

/// A sink that discards everything written to it.
///
/// Backs the import-collection pass of a two-pass render.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Write for NullSink {
    fn write_str(&mut self, _s: &str) -> std::fmt::Result {
        Ok(())
    }
}

/// Column-bounded text sink.
pub struct LineWrapper<'a> {
    out: &'a mut dyn Write,
    indent: String,
    column_limit: usize,
    closed: bool,
    buffer: String,
    column: usize,
    next_flush: Option<PendingFlush>,
    last_char: Option<char>,
}

impl<'a> LineWrapper<'a> {
    pub fn new(out: &'a mut dyn Write, indent: impl Into<String>, column_limit: usize) -> Self {
        Self {
            out,
            indent: indent.into(),
            column_limit,
            closed: false,
            buffer: String::new(),
            column: 0,
            next_flush: None,
            last_char: None,
        }
    }

    /// The last character handed to the underlying sink.
    ///
    /// Buffered text awaiting a wrap decision is not counted.
    pub fn last_char(&self) -> Option<char> {
        self.last_char
    }

    pub fn column_limit(&self) -> usize {
        self.column_limit
    }

    /// Emit `value`, buffering it while a wrap decision is pending.
    pub fn append(&mut self, value: &str) -> Result<()> {
        self.ensure_open()?;

        if let Some(pending) = self.next_flush {
            let length = value.chars().count();
            let next_newline = value.find('\n').map(|i| value[..i].chars().count());

            // Still fits on the current line: keep buffering, decide later.
            if next_newline.is_none() && self.column + length <= self.column_limit {
                self.buffer.push_str(value);
                self.column += length;
                return Ok(());
            }

            let wrap = match next_newline {
                None => true,
                Some(offset) => self.column + offset > self.column_limit,
            };
            self.flush(if wrap { FlushType::Wrap } else { pending.kind })?;
        }

        self.write_out(value)?;
        self.column = match value.rfind('\n') {
            Some(i) => value[i + 1..].chars().count(),
            None => self.column + value.chars().count(),
        };
        Ok(())
    }

    /// Emit either a space or a newline character, wrapping to `indent_level`.
    pub fn wrapping_space(&mut self, indent_level: usize) -> Result<()> {
        self.ensure_open()?;

        if let Some(pending) = self.next_flush {
            self.flush(pending.kind)?;
        }
        // The space itself is deferred until the next flush.
        self.column += 1;
        self.next_flush = Some(PendingFlush {
            kind: FlushType::Space,
            indent_level,
        });
        Ok(())
    }

    /// Emit a newline character if the line would otherwise exceed the limit.
    pub fn zero_width_space(&mut self, indent_level: usize) -> Result<()> {
        self.ensure_open()?;

        if self.column == 0 {
            return Ok(());
        }
        if let Some(pending) = self.next_flush {
            self.flush(pending.kind)?;
        }
        self.next_flush = Some(PendingFlush {
            kind: FlushType::Empty,
            indent_level,
        });
        Ok(())
    }

    /// Resolve any pending decision and refuse further writes.
    pub fn close(&mut self) -> Result<()> {
        if let Some(pending) = self.next_flush {
            self.flush(pending.kind)?;
        }
        self.closed = true;
        Ok(())
    }

    fn flush(&mut self, kind: FlushType) -> Result<()> {
        let indent_level = self.next_flush.map_or(0, |pending| pending.indent_level);
        match kind {
            FlushType::Wrap => {
                let indent = self.indent.repeat(indent_level);
                self.write_out("\n")?;
                self.write_out(&indent)?;
                self.column = indent.chars().count() + self.buffer.chars().count();
            }
            FlushType::Space => self.write_out(" ")?,
            FlushType::Empty => {}
        }

        let buffer = std::mem::take(&mut self.buffer);
        self.write_out(&buffer)?;
        self.next_flush = None;
        Ok(())
    }

    fn write_out(&mut self, value: &str) -> Result<()> {
        if let Some(last) = value.chars().next_back() {
            self.out.write_str(value)?;
            self.last_char = Some(last);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Box::new(Error::WriterClosed));
        }
        Ok(())
    }
}
