//! TerminalRenderer: flushes composed lines to a real terminal.
//!
//! Frames are diffed line by line against the previous frame; only changed
//! lines are rewritten. Streamed text invalidates the previous frame so the
//! next one is a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::console::Console;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Vec<String>>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Console for TerminalRenderer {
    fn present(&mut self, lines: &[String]) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.len() == lines.len() => encode_diff_into(prev, lines, &mut self.buf)?,
            _ => encode_full_into(lines, &mut self.buf)?,
        }
        self.flush_buf()?;

        copy_lines(self.last.get_or_insert_with(Vec::new), lines);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.invalidate();
        self.buf.clear();
        // Raw mode: a bare \n moves down without returning the cursor.
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.buf.queue(Print("\r\n"))?;
            }
            if !part.is_empty() {
                self.buf.queue(Print(part))?;
            }
        }
        self.flush_buf()
    }
}

/// Copy `src` into `dst`, reusing the existing string buffers.
fn copy_lines(dst: &mut Vec<String>, src: &[String]) {
    dst.truncate(src.len());
    for (d, s) in dst.iter_mut().zip(src) {
        d.clone_from(s);
    }
    let have = dst.len();
    dst.extend(src[have..].iter().cloned());
}

/// Encode a full-screen redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(lines: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    for (y, line) in lines.iter().enumerate() {
        out.queue(Print(line))?;
        if y + 1 < lines.len() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a redraw of only the lines that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &[String], next: &[String], out: &mut Vec<u8>) -> Result<()> {
    for_each_changed_line(prev, next, |y| {
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(Print(&next[usize::from(y)]))?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn for_each_changed_line(
    prev: &[String],
    next: &[String],
    mut f: impl FnMut(u16) -> Result<()>,
) -> Result<()> {
    for (y, line) in next.iter().enumerate() {
        let Ok(y16) = u16::try_from(y) else {
            break;
        };
        if prev.get(y) != Some(line) {
            f(y16)?;
        }
    }
    Ok(())
}
