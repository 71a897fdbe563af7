//! Completion chime.
//!
//! Rings the terminal bell (`BEL`, 0x07) once per finished countdown.
//! Generic over the writer so tests can capture the output.

use std::io::{self, Write};

use log::info;

use crate::app::ports::{NotificationPort, NotifyError};
use crate::bank::SlotId;

const BELL: &[u8] = b"\x07";

pub struct Chime<W: Write = io::Stdout> {
    out: W,
}

impl Chime<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Chime<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationPort for Chime<W> {
    fn notify_completion(&mut self, slot: SlotId) -> Result<(), NotifyError> {
        self.out
            .write_all(BELL)
            .and_then(|()| self.out.flush())
            .map_err(|_| NotifyError::IoError)?;
        info!("Chime: slot {} finished", slot);
        Ok(())
    }
}
