//! Blocking read loop over a byte source.

use crate::{
    decoder::{Decoder, Record},
    error::StreamError,
    synchronizer::Synchronizer,
};
use log::{debug, trace};
use std::{
    collections::VecDeque,
    io::{self, Read},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

const READ_BUF_LEN: usize = 1240;

/// Cooperative stop request shared between the read loop and its owner.
/// Checked between reads.
#[derive(Debug, Default, Clone)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub trait RecordHandler {
    fn handle(&mut self, _record: Record) {}
}

/// Implement handler for simple callbacks / closures
impl<F: FnMut(Record)> RecordHandler for F {
    fn handle(&mut self, record: Record) {
        self(record)
    }
}

/// Outcome of a single read from the byte source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Number of bytes read and fed to the synchronizer
    Data(usize),
    /// The read timed out or would block
    Idle,
    /// The source reported end of stream
    Closed,
}

/// Reads a byte source, synchronizes and decodes it on the calling thread.
pub struct FixStream<R: Read> {
    reader: R,
    sync: Synchronizer,
    decoder: Decoder,
    shutdown: Shutdown,
    buf: Box<[u8]>,
    pending: VecDeque<Record>,
}

impl<R: Read> FixStream<R> {
    pub fn new(reader: R, sync: Synchronizer, decoder: Decoder, shutdown: Shutdown) -> Self {
        Self {
            reader,
            sync,
            decoder,
            shutdown,
            buf: vec![0; READ_BUF_LEN].into_boxed_slice(),
            pending: VecDeque::new(),
        }
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Performs one read and hands every record it completes to `handler`.
    ///
    /// Frames that fail to decode are dropped.
    pub fn poll(&mut self, handler: &mut impl RecordHandler) -> Result<PollStatus, StreamError> {
        let nbytes = match read_port(&mut self.reader, &mut self.buf)? {
            Some(0) => return Ok(PollStatus::Closed),
            Some(n) => n,
            None => return Ok(PollStatus::Idle),
        };

        for event in self.sync.consume(&self.buf[..nbytes]) {
            match self.decoder.decode(event) {
                Ok(Some(record)) => handler.handle(record),
                Ok(None) => {},
                Err(e) => trace!("Malformed frame, ignore it; cause {e}"),
            }
        }
        Ok(PollStatus::Data(nbytes))
    }

    /// Blocks until the next record. `None` once the source is closed or
    /// shutdown was requested.
    pub fn next_record(&mut self) -> Result<Option<Record>, StreamError> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Ok(Some(record));
            }
            if self.stopping() {
                return Ok(None);
            }
            let mut pending = core::mem::take(&mut self.pending);
            let status = self.poll(&mut |record: Record| pending.push_back(record));
            self.pending = pending;
            if status? == PollStatus::Closed {
                debug!("Byte source closed");
                self.sync.reset();
                return Ok(self.pending.pop_front());
            }
        }
    }

    /// Runs until the source closes, shutdown is requested or the source
    /// fails. A partially read frame is abandoned.
    pub fn run(&mut self, handler: &mut impl RecordHandler) -> Result<(), StreamError> {
        while let Some(record) = self.next_record()? {
            handler.handle(record);
        }
        Ok(())
    }

    fn stopping(&mut self) -> bool {
        if self.shutdown.is_triggered() {
            if !self.sync.is_idle() {
                debug!("Shutdown requested, abandoning partial frame");
            }
            self.sync.reset();
            return true;
        }
        false
    }
}

/// Reads the byte source, converting timeouts into "no data received"
fn read_port<R: Read>(reader: &mut R, output: &mut [u8]) -> io::Result<Option<usize>> {
    match reader.read(output) {
        Ok(b) => Ok(Some(b)),
        Err(e) => match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
                Ok(None)
            },
            _ => Err(e),
        },
    }
}
