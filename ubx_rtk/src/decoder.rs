use crate::{
    aggregator::FixAggregator,
    error::ParserError,
    frame::FrameKind,
    sentence::TextSentence,
    synchronizer::SyncEvent,
    ubx_packets::{nav_pvt, HighPrecisionFix, PvtFix, VerticalAccuracySource},
};
use log::debug;

/// Decoded output of the receiver stream
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Record {
    Pvt(PvtFix),
    HighPrecision(HighPrecisionFix),
    Sentence(TextSentence),
}

/// Turns synchronizer events into [Record]s, carrying the fix status and
/// satellite count from NAV-PVT over to NAV-HPPOSLLH.
#[derive(Debug, Default, Clone)]
pub struct Decoder {
    fix: FixAggregator,
    vertical: VerticalAccuracySource,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertical_accuracy(mut self, vertical: VerticalAccuracySource) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn fix(&self) -> &FixAggregator {
        &self.fix
    }

    /// Decodes one event. Administrative frames yield `Ok(None)`.
    ///
    /// A NAV-PVT updates the fix before the record is returned, so a
    /// NAV-HPPOSLLH of the same epoch already reports it.
    pub fn decode(&mut self, event: SyncEvent) -> Result<Option<Record>, ParserError> {
        match event {
            SyncEvent::Frame(FrameKind::NavPvt, frame) => {
                nav_pvt::decode(&frame.payload, &mut self.fix).map(|pvt| Some(Record::Pvt(pvt)))
            },
            SyncEvent::Frame(FrameKind::NavHpPosLlh, frame) => {
                HighPrecisionFix::decode(&frame.payload, &self.fix, self.vertical)
                    .map(|hp| Some(Record::HighPrecision(hp)))
            },
            SyncEvent::Frame(FrameKind::Administrative, frame) => {
                debug!(
                    "Skipping frame {:#04x}/{:#04x} ({} bytes)",
                    frame.class,
                    frame.id,
                    frame.payload.len()
                );
                Ok(None)
            },
            SyncEvent::Sentence(sentence) => Ok(Some(Record::Sentence(sentence))),
        }
    }
}

impl From<TextSentence> for Record {
    fn from(sentence: TextSentence) -> Self {
        Record::Sentence(sentence)
    }
}
