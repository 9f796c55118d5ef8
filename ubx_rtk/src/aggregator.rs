use crate::ubx_packets::FixStatus;

/// Latest fix status and satellite count.
///
/// Only decoded NAV-PVT fixes write it; every record emitted afterwards
/// reads it, NAV-HPPOSLLH carrying neither value itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixAggregator {
    status: FixStatus,
    satellites: u8,
}

impl FixAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, status: FixStatus, satellites: u8) {
        self.status = status;
        self.satellites = satellites;
    }

    pub fn status(&self) -> FixStatus {
        self.status
    }

    pub fn satellites(&self) -> u8 {
        self.satellites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_fix() {
        let fix = FixAggregator::new();
        assert_eq!(fix.status(), FixStatus::None);
        assert_eq!(fix.satellites(), 0);
    }

    #[test]
    fn last_update_wins() {
        let mut fix = FixAggregator::new();
        fix.update(FixStatus::Fixed, 12);
        fix.update(FixStatus::Float, 9);
        assert_eq!(fix.status(), FixStatus::Float);
        assert_eq!(fix.satellites(), 9);
    }
}
