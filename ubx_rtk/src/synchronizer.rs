//! Byte synchronizer splitting an unstructured receiver stream into UBX
//! frames and NMEA sentences.
//!
//! Every byte seen while idle is classified exactly once: `0xb5` opens the
//! binary path, `$` opens the text path, anything else is noise. Once a
//! frame's class and id are matched against the [FrameTable] the following
//! window is committed to that frame and never re-examined. A byte that
//! breaks a partial header, or a non-ASCII byte inside a sentence, drops the
//! partial state and is classified again as a potential lead byte.

use crate::{
    constants::{
        NMEA_END_CHAR_1, NMEA_END_CHAR_2, MAX_SENTENCE_LINE_LEN, NMEA_SYNC_CHAR,
        UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, DEFAULT_ACCEPTED_TAG,
    },
    frame::{FrameKind, FrameSpec, FrameTable, RawFrame},
    sentence::TextSentence,
};
use log::trace;

/// Output of the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Frame(FrameKind, RawFrame),
    Sentence(TextSentence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekHeader1,
    SeekHeader2,
    SeekClass,
    SeekId { class: u8 },
    ReadPayload(FrameSpec),
    ReadSentence,
}

/// Streaming synchronizer. State survives between calls to
/// [consume](Synchronizer::consume), so frames may be split across reads.
pub struct Synchronizer {
    table: FrameTable,
    accepted_tag: String,
    state: State,
    buf: Vec<u8>,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(FrameTable::default(), DEFAULT_ACCEPTED_TAG)
    }
}

impl Synchronizer {
    pub fn new(table: FrameTable, accepted_tag: impl Into<String>) -> Self {
        Self {
            table,
            accepted_tag: accepted_tag.into(),
            state: State::SeekHeader1,
            buf: Vec::with_capacity(MAX_SENTENCE_LINE_LEN),
        }
    }

    pub fn table(&self) -> &FrameTable {
        &self.table
    }

    pub fn accepted_tag(&self) -> &str {
        &self.accepted_tag
    }

    /// True when no partial frame or sentence is pending
    pub fn is_idle(&self) -> bool {
        self.state == State::SeekHeader1
    }

    /// Abandons any partial frame or sentence
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = State::SeekHeader1;
    }

    /// Feeds `data` and returns an iterator over the events it completes
    pub fn consume<'a>(&'a mut self, data: &'a [u8]) -> SynchronizerIter<'a> {
        SynchronizerIter {
            sync: self,
            data,
            pos: 0,
        }
    }

    /// Feeds a single byte
    pub fn push(&mut self, byte: u8) -> Option<SyncEvent> {
        match self.state {
            State::SeekHeader1 => {
                self.classify(byte);
                None
            },
            State::SeekHeader2 => {
                if byte == UBX_SYNC_CHAR_2 {
                    self.state = State::SeekClass;
                    None
                } else {
                    self.resync(byte)
                }
            },
            State::SeekClass => {
                if self.table.knows_class(byte) {
                    self.state = State::SeekId { class: byte };
                    None
                } else {
                    trace!("Unknown class {:#04x}, resync", byte);
                    self.resync(byte)
                }
            },
            State::SeekId { class } => match self.table.lookup(class, byte) {
                Some(spec) => {
                    let spec = *spec;
                    self.buf.clear();
                    if spec.len == 0 {
                        return Some(self.dispatch(spec));
                    }
                    self.state = State::ReadPayload(spec);
                    None
                },
                None => {
                    trace!("Unknown message {:#04x}/{:#04x}, resync", class, byte);
                    self.resync(byte)
                },
            },
            State::ReadPayload(spec) => {
                self.buf.push(byte);
                if self.buf.len() == spec.len {
                    Some(self.dispatch(spec))
                } else {
                    None
                }
            },
            State::ReadSentence => self.push_sentence(byte),
        }
    }

    fn classify(&mut self, byte: u8) {
        match byte {
            UBX_SYNC_CHAR_1 => self.state = State::SeekHeader2,
            NMEA_SYNC_CHAR => {
                self.buf.clear();
                self.buf.push(byte);
                self.state = State::ReadSentence;
            },
            _ => {},
        }
    }

    fn resync(&mut self, byte: u8) -> Option<SyncEvent> {
        self.reset();
        self.classify(byte);
        None
    }

    fn dispatch(&mut self, spec: FrameSpec) -> SyncEvent {
        let payload = core::mem::take(&mut self.buf);
        self.state = State::SeekHeader1;
        SyncEvent::Frame(spec.kind, RawFrame::new(spec.class, spec.id, payload))
    }

    fn push_sentence(&mut self, byte: u8) -> Option<SyncEvent> {
        match byte {
            NMEA_END_CHAR_2 => {
                self.buf.push(byte);
                self.state = State::SeekHeader1;
                let sentence = TextSentence::accept(&self.buf, &self.accepted_tag);
                if sentence.is_none() {
                    trace!("Dropping sentence {:?}", String::from_utf8_lossy(&self.buf));
                }
                self.buf.clear();
                sentence.map(SyncEvent::Sentence)
            },
            NMEA_SYNC_CHAR => {
                // Unterminated sentence, start over with this one
                self.buf.clear();
                self.buf.push(byte);
                None
            },
            NMEA_END_CHAR_1 | 0x20..=0x7e => {
                self.buf.push(byte);
                // Room must remain for the closing '\n'
                if self.buf.len() >= MAX_SENTENCE_LINE_LEN {
                    trace!("Sentence exceeds {} bytes, dropped", MAX_SENTENCE_LINE_LEN);
                    self.reset();
                }
                None
            },
            _ => self.resync(byte),
        }
    }
}

/// Iterator over the events completed by one [Synchronizer::consume] call
pub struct SynchronizerIter<'a> {
    sync: &'a mut Synchronizer,
    data: &'a [u8],
    pos: usize,
}

impl Iterator for SynchronizerIter<'_> {
    type Item = SyncEvent;

    fn next(&mut self) -> Option<SyncEvent> {
        while let Some(&byte) = self.data.get(self.pos) {
            self.pos += 1;
            if let Some(event) = self.sync.push(byte) {
                return Some(event);
            }
        }
        None
    }
}
