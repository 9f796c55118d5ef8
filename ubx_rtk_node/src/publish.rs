//! JSON lines publisher, one `{"topic": .., "data": ..}` object per line.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use serde::Serialize;
use std::io::Write;
use ubx_rtk::{
    GeodeticFix, HighPrecisionFix, ProjectedFix, PvtFix, Record, RecordHandler, TextSentence,
    TimestampPair,
};

pub const TOPIC_GPSTIME: &str = "gpstime";
pub const TOPIC_NAVPVT: &str = "navpvt";
pub const TOPIC_NAVSATFIX: &str = "navsatfix";
pub const TOPIC_UTM: &str = "utm";
pub const TOPIC_UTM_HP: &str = "utm_hp";

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    topic: &'a str,
    data: T,
}

/// Planar pose of a high precision fix
#[derive(Debug, Serialize)]
struct Odometry {
    itow: u32,
    zone: u8,
    /// easting, northing, height
    position: [f64; 3],
    covariance: [f64; 9],
}

impl From<&ProjectedFix> for Odometry {
    fn from(fix: &ProjectedFix) -> Self {
        Self {
            itow: fix.itow,
            zone: fix.coordinate.zone,
            position: fix.position(),
            covariance: fix.covariance.row_major(),
        }
    }
}

pub struct Publisher<W: Write> {
    out: W,
    clock: fn() -> DateTime<Utc>,
    published: usize,
}

impl<W: Write> Publisher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clock: Utc::now,
            published: 0,
        }
    }

    /// Replaces the host clock used for `gpstime`
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn published(&self) -> usize {
        self.published
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn publish(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Pvt(pvt) => self.publish_pvt(pvt),
            Record::HighPrecision(hp) => self.publish_high_precision(hp),
            Record::Sentence(sentence) => self.publish_sentence(sentence),
        }
    }

    fn publish_pvt(&mut self, pvt: &PvtFix) -> Result<()> {
        let stamp = TimestampPair::new((self.clock)(), pvt.itow);
        self.emit(TOPIC_GPSTIME, stamp.to_string())?;
        self.emit(TOPIC_NAVPVT, pvt)
    }

    fn publish_high_precision(&mut self, hp: &HighPrecisionFix) -> Result<()> {
        self.emit(TOPIC_NAVSATFIX, GeodeticFix::from(hp))?;
        match ProjectedFix::try_from(hp) {
            Ok(utm) => {
                self.emit(TOPIC_UTM, Odometry::from(&utm))?;
                self.emit(TOPIC_UTM_HP, utm)
            },
            Err(e) => {
                warn!("Cannot project fix at itow {}: {e}", hp.itow);
                Ok(())
            },
        }
    }

    fn publish_sentence(&mut self, sentence: &TextSentence) -> Result<()> {
        let topic = sentence.tag().to_ascii_lowercase();
        self.emit(&topic, sentence.as_str())
    }

    fn emit<T: Serialize>(&mut self, topic: &str, data: T) -> Result<()> {
        serde_json::to_writer(&mut self.out, &Envelope { topic, data })?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.published += 1;
        debug!("Published on '{topic}'");
        Ok(())
    }
}

impl<W: Write> RecordHandler for Publisher<W> {
    fn handle(&mut self, record: Record) {
        if let Err(e) = self.publish(&record) {
            error!("Failed to publish record: {e}");
        }
    }
}
