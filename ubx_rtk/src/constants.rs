pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;

pub const UBX_CLASS_NAV: u8 = 0x01;
pub const UBX_CLASS_RXM: u8 = 0x02;

pub const NAV_PVT_ID: u8 = 0x07;
pub const NAV_HP_POS_LLH_ID: u8 = 0x14;
pub const RXM_RTCM_ID: u8 = 0x32;

// Windows start right after the message id, so they cover the 2 length bytes
// before the payload proper (and, for NAV-PVT, the 2 trailing checksum bytes).
pub const NAV_PVT_WINDOW_LEN: usize = 96;
pub const NAV_HP_POS_LLH_WINDOW_LEN: usize = 36;
pub const RXM_RTCM_WINDOW_LEN: usize = 12;

pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub(crate) const NMEA_TAG_LEN: usize = 5; // talker (2) + msg type (3)
// High precision GGA runs past the 82 bytes of standard NMEA
pub(crate) const MAX_SENTENCE_LINE_LEN: usize = 96;

/// Only sentences carrying this tag are forwarded by default
pub const DEFAULT_ACCEPTED_TAG: &str = "GNGGA";
