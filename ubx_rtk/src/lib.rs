//! # ubx_rtk
//!
//! Stream decoding for RTK capable u-blox receivers. The receiver output is
//! an unstructured mix of UBX binary frames and NMEA text sentences; this
//! crate cuts it into frames, decodes UBX-NAV-PVT and UBX-NAV-HPPOSLLH into
//! fixes, forwards GGA sentences verbatim and projects fixes to UTM.
//!
//! Synchronizing and decoding
//! ==========================
//!
//! Bytes are fed to a [Synchronizer] using its `consume()` method, which
//! returns an iterator over the events the bytes complete. Partial frames are
//! kept until the next call. Events are turned into [Record]s by a [Decoder],
//! which also carries the fix status of the latest NAV-PVT over to the high
//! precision fixes:
//! ```
//! use ubx_rtk::{Decoder, Record, Synchronizer};
//!
//! let mut sync = Synchronizer::default();
//! let mut decoder = Decoder::default();
//! let my_raw_data = b"$GNGGA,092725.00,4717.11399,N*5B\r\n"; // From your serial port
//! for event in sync.consume(my_raw_data) {
//!     match decoder.decode(event) {
//!         Ok(Some(Record::Sentence(gga))) => assert_eq!(gga.tag(), "GNGGA"),
//!         Ok(Some(_)) => {
//!             // A decoded fix
//!         }
//!         Ok(None) => {
//!             // A frame that is recognized but not decoded
//!         }
//!         Err(_) => {
//!             // Received a malformed frame
//!         }
//!     }
//! }
//! ```
//!
//! Reading a device
//! ================
//!
//! [FixStream] wraps any [std::io::Read] byte source (a serial port, a file,
//! a socket) and drives both stages on the calling thread until the source
//! closes or a [Shutdown] is triggered:
//! ```
//! use std::io::Cursor;
//! use ubx_rtk::{Decoder, FixStream, Record, Shutdown, Synchronizer};
//!
//! let source = Cursor::new(b"\xb5\x62\x02\x32............$GNGGA,1*00\r\n".to_vec());
//! let mut stream = FixStream::new(
//!     source,
//!     Synchronizer::default(),
//!     Decoder::default(),
//!     Shutdown::new(),
//! );
//! let mut sentences = 0;
//! stream
//!     .run(&mut |record| {
//!         if let Record::Sentence(_) = record {
//!             sentences += 1;
//!         }
//!     })
//!     .unwrap();
//! assert_eq!(sentences, 1);
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    aggregator::FixAggregator,
    decoder::{Decoder, Record},
    error::{DateTimeError, FieldError, ParserError, ProjectionError, RelayError, StreamError},
    frame::{FrameKind, FrameSpec, FrameTable, RawFrame},
    projection::{Covariance, ProjectedCoordinate},
    relay::{decode_corrections, CorrectionRelay},
    sentence::TextSentence,
    stream::{FixStream, PollStatus, RecordHandler, Shutdown},
    synchronizer::{SyncEvent, Synchronizer, SynchronizerIter},
    ubx_packets::*,
};

mod aggregator;
pub mod codec;
pub mod constants;
mod decoder;
mod error;
mod frame;
pub mod projection;
mod relay;
mod sentence;
mod stream;
mod synchronizer;
mod ubx_packets;
