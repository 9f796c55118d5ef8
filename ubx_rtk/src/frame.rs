use crate::constants::{
    NAV_HP_POS_LLH_ID, NAV_HP_POS_LLH_WINDOW_LEN, NAV_PVT_ID, NAV_PVT_WINDOW_LEN, RXM_RTCM_ID,
    RXM_RTCM_WINDOW_LEN, UBX_CLASS_NAV, UBX_CLASS_RXM,
};

/// What the synchronizer does with a frame once its window has been read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UBX-NAV-PVT, decoded into a [PvtFix](crate::PvtFix)
    NavPvt,
    /// UBX-NAV-HPPOSLLH, decoded into a [HighPrecisionFix](crate::HighPrecisionFix)
    NavHpPosLlh,
    /// Recognized but never decoded, the window is drained and dropped
    Administrative,
}

/// One length table entry: the exact window length read after `class`/`id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub class: u8,
    pub id: u8,
    pub len: usize,
    pub kind: FrameKind,
}

impl FrameSpec {
    pub const NAV_PVT: FrameSpec = FrameSpec {
        class: UBX_CLASS_NAV,
        id: NAV_PVT_ID,
        len: NAV_PVT_WINDOW_LEN,
        kind: FrameKind::NavPvt,
    };

    pub const NAV_HP_POS_LLH: FrameSpec = FrameSpec {
        class: UBX_CLASS_NAV,
        id: NAV_HP_POS_LLH_ID,
        len: NAV_HP_POS_LLH_WINDOW_LEN,
        kind: FrameKind::NavHpPosLlh,
    };

    pub const RXM_RTCM: FrameSpec = FrameSpec {
        class: UBX_CLASS_RXM,
        id: RXM_RTCM_ID,
        len: RXM_RTCM_WINDOW_LEN,
        kind: FrameKind::Administrative,
    };
}

/// Explicit (class, id) → window length table.
///
/// Combinations missing from the table are rejected as soon as their id byte
/// is seen, so the synchronizer never starts an open ended read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTable {
    entries: Vec<FrameSpec>,
}

impl Default for FrameTable {
    fn default() -> Self {
        Self::empty()
            .with_entry(FrameSpec::NAV_PVT)
            .with_entry(FrameSpec::NAV_HP_POS_LLH)
            .with_entry(FrameSpec::RXM_RTCM)
    }
}

impl FrameTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `spec`, replacing any entry with the same class and id
    pub fn with_entry(mut self, spec: FrameSpec) -> Self {
        self.entries
            .retain(|entry| (entry.class, entry.id) != (spec.class, spec.id));
        self.entries.push(spec);
        self
    }

    pub fn lookup(&self, class: u8, id: u8) -> Option<&FrameSpec> {
        self.entries
            .iter()
            .find(|entry| entry.class == class && entry.id == id)
    }

    /// Whether at least one entry uses `class`
    pub fn knows_class(&self, class: u8) -> bool {
        self.entries.iter().any(|entry| entry.class == class)
    }

    pub fn entries(&self) -> &[FrameSpec] {
        &self.entries
    }
}

/// A complete binary frame as cut out of the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub class: u8,
    pub id: u8,
    pub payload: Vec<u8>,
}

impl RawFrame {
    pub fn new(class: u8, id: u8, payload: Vec<u8>) -> Self {
        Self { class, id, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let table = FrameTable::default();
        assert_eq!(table.lookup(0x01, 0x07), Some(&FrameSpec::NAV_PVT));
        assert_eq!(table.lookup(0x01, 0x14).map(|s| s.len), Some(36));
        assert_eq!(
            table.lookup(0x02, 0x32).map(|s| s.kind),
            Some(FrameKind::Administrative)
        );
        assert_eq!(table.lookup(0x02, 0x15), None);
        assert_eq!(table.lookup(0x05, 0x01), None);
        assert!(table.knows_class(0x02));
        assert!(!table.knows_class(0x06));
    }

    #[test]
    fn with_entry_replaces() {
        let table = FrameTable::default().with_entry(FrameSpec {
            len: 8,
            ..FrameSpec::RXM_RTCM
        });
        assert_eq!(table.entries().len(), 3);
        assert_eq!(table.lookup(0x02, 0x32).map(|s| s.len), Some(8));
    }
}
