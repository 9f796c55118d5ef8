use crate::constants::{NMEA_SYNC_CHAR, NMEA_TAG_LEN};
use core::fmt;

/// A text sentence forwarded verbatim, `$` and line terminator included
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TextSentence {
    line: String,
}

impl TextSentence {
    /// Wraps `line` if it starts with `$` followed by the `accepted` tag
    pub fn accept(line: &[u8], accepted: &str) -> Option<Self> {
        if line.first() != Some(&NMEA_SYNC_CHAR) {
            return None;
        }
        let tag = line.get(1..1 + NMEA_TAG_LEN)?;
        if tag != accepted.as_bytes() {
            return None;
        }
        Some(Self {
            line: String::from_utf8_lossy(line).into_owned(),
        })
    }

    /// Talker and sentence type, e.g. `GNGGA`
    pub fn tag(&self) -> &str {
        self.line.get(1..1 + NMEA_TAG_LEN).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn into_string(self) -> String {
        self.line
    }
}

impl fmt::Display for TextSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &[u8] =
        b"$GNGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5B\r\n";

    #[test]
    fn accepts_matching_tag() {
        let sentence = TextSentence::accept(GGA, "GNGGA").unwrap();
        assert_eq!(sentence.tag(), "GNGGA");
        assert_eq!(sentence.as_str().as_bytes(), GGA);
    }

    #[test]
    fn rejects_other_tags() {
        assert!(TextSentence::accept(b"$GNRMC,092725.00,A*00\r\n", "GNGGA").is_none());
        assert!(TextSentence::accept(b"$GPGGA,092725.00*00\r\n", "GNGGA").is_none());
        assert!(TextSentence::accept(b"GNGGA,092725.00*00\r\n", "GNGGA").is_none());
        assert!(TextSentence::accept(b"$GNG", "GNGGA").is_none());
    }
}
