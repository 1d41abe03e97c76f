//! Output seam between the engine and a screen.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

/// Something frames and streamed text can be written to.
pub trait Console {
    /// Replace the screen contents with `lines`.
    fn present(&mut self, lines: &[String]) -> Result<()>;

    /// Write `text` at the cursor and flush. `\n` starts a new line.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct Recorded {
    frames: Vec<Vec<String>>,
    text: String,
}

/// In-memory console for headless runs and tests.
///
/// Clones share the same recording, so a caller can keep a handle after
/// giving the console away.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    inner: Rc<RefCell<Recorded>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every presented frame, oldest first.
    pub fn frames(&self) -> Vec<Vec<String>> {
        self.inner.borrow().frames.clone()
    }

    pub fn last_frame(&self) -> Option<Vec<String>> {
        self.inner.borrow().frames.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// All streamed text concatenated.
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }
}

impl Console for BufferConsole {
    fn present(&mut self, lines: &[String]) -> Result<()> {
        self.inner.borrow_mut().frames.push(lines.to_vec());
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner.borrow_mut().text.push_str(text);
        Ok(())
    }
}
