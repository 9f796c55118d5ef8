//! Correction relay: hex encoded lines in, raw bytes out to the receiver.

use crate::{error::RelayError, stream::Shutdown};
use log::{trace, warn};
use std::io::{BufRead, Write};

/// Decodes one line of hex text, surrounding whitespace ignored
pub fn decode_corrections<L: AsRef<[u8]>>(line: L) -> Result<Vec<u8>, RelayError> {
    Ok(hex::decode(line.as_ref().trim_ascii())?)
}

/// Writes correction data, unmodified, to the receiver transport
pub struct CorrectionRelay<W: Write> {
    writer: W,
    relayed: usize,
}

impl<W: Write> CorrectionRelay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, relayed: 0 }
    }

    /// Total bytes written so far
    pub fn relayed(&self) -> usize {
        self.relayed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Decodes `line` and writes the bytes. Nothing is written when the
    /// line is malformed.
    pub fn relay<L: AsRef<[u8]>>(&mut self, line: L) -> Result<usize, RelayError> {
        let bytes = decode_corrections(line)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        self.relayed += bytes.len();
        trace!("Relayed {} bytes of corrections", bytes.len());
        Ok(bytes.len())
    }

    /// Relays every line of `input` until it ends or `shutdown` is
    /// triggered. Malformed lines are logged and discarded, a failing
    /// transport ends the loop.
    pub fn relay_lines<B: BufRead>(
        &mut self,
        mut input: B,
        shutdown: &Shutdown,
    ) -> Result<(), RelayError> {
        let mut line = Vec::new();
        while !shutdown.is_triggered() {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.trim_ascii().is_empty() {
                continue;
            }
            match self.relay(&line) {
                Ok(_) => {},
                Err(RelayError::Hex(e)) => warn!("Discarding malformed correction line: {e}"),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
