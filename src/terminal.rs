use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::borrow::Cow;
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

/// How successive frames reach the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameMode {
    /// Clear the screen and home the cursor before each frame
    Redraw,
    /// Append frames one after another (pipes, logs, tests)
    Print,
}

impl FrameMode {
    /// Redraw only when writing to a terminal and not asked to print
    pub fn select(print: bool, is_tty: bool) -> Self {
        if print || !is_tty {
            FrameMode::Print
        } else {
            FrameMode::Redraw
        }
    }
}

/// Keys that stop a running animation: q, Esc, Ctrl-C
pub fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Frame presenter for the Life driver
pub struct Terminal<W: Write = Stdout> {
    out: W,
    mode: FrameMode,
    raw: bool,
}

impl Terminal<Stdout> {
    /// Presenter on stdout. Redraw mode enters raw mode so that Ctrl-C
    /// arrives as a key and the cursor is always restored.
    pub fn new(mode: FrameMode) -> io::Result<Self> {
        let mut term = Self::with_writer(stdout(), mode)?;
        if mode == FrameMode::Redraw {
            enable_raw_mode()?;
            term.raw = true;
        }
        Ok(term)
    }
}

impl<W: Write> Terminal<W> {
    pub fn with_writer(mut out: W, mode: FrameMode) -> io::Result<Self> {
        if mode == FrameMode::Redraw {
            queue!(out, Hide)?;
            out.flush()?;
        }
        Ok(Self {
            out,
            mode,
            raw: false,
        })
    }

    /// Raw mode does no newline translation
    fn line_endings<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.raw {
            Cow::Owned(text.replace('\n', "\r\n"))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Show one frame
    pub fn present(&mut self, frame: &str) -> io::Result<()> {
        if self.mode == FrameMode::Redraw {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        let frame = self.line_endings(frame);
        queue!(self.out, Print(frame))?;
        self.out.flush()
    }

    /// Write a status line below the last frame
    pub fn println(&mut self, line: &str) -> io::Result<()> {
        let line = self.line_endings(line).into_owned() + &self.line_endings("\n");
        queue!(self.out, Print(line))?;
        self.out.flush()
    }

    /// Pause between frames. Returns true if a quit key was pressed.
    ///
    /// Zero, negative or non-finite delays mean no pause. Keys are only
    /// read in raw mode; otherwise this is a plain sleep.
    pub fn wait(&self, seconds: f32) -> io::Result<bool> {
        let delay = Duration::try_from_secs_f32(seconds).unwrap_or_default();
        if !self.raw {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            return Ok(false);
        }

        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if poll(remaining)? {
                if let Event::Key(key) = read()? {
                    if is_quit_key(key.code, key.modifiers) {
                        return Ok(true);
                    }
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
        }
    }

    fn restore(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
            self.raw = false;
        }
        if self.mode == FrameMode::Redraw {
            let _ = queue!(self.out, Show);
            let _ = self.out.flush();
            self.mode = FrameMode::Print;
        }
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        self.restore();
    }
}
