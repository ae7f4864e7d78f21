//! Audio cue sinks

use std::io::{self, Write};

use crate::AlertError;

/// Plays the alert sound
pub trait AudioSink {
    fn play(&mut self) -> Result<(), AlertError>;
}

/// Rings the terminal bell on the wrapped writer
pub struct TerminalBell<W> {
    writer: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self) -> Result<(), AlertError> {
        self.writer.write_all(b"\x07")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self) -> Result<(), AlertError> {
        Ok(())
    }
}
