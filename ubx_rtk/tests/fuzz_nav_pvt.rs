//! A proptest generator for U-Blox NAV-PVT messages.
//!
//! Builds byte-level UBX frames around a randomized 92 byte NAV-PVT payload
//! and checks the decoded fix against the generated field values.

use byteorder::{LittleEndian, WriteBytesExt};
use proptest::prelude::*;
use ubx_rtk::{
    constants::{UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2},
    Decoder, FixStatus, PvtFix, Record, Synchronizer,
};

/// Payload of a UBX-NAV-PVT message, fields in documentation order
#[derive(Debug, Clone)]
pub struct NavPvt {
    pub itow: u32,     // GPS time of week [ms]
    pub year: u16,     // Year (UTC)
    pub month: u8,     // Month, 1..12 (UTC)
    pub day: u8,       // Day of month, 1..31 (UTC)
    pub hour: u8,      // Hour of day, 0..23 (UTC)
    pub min: u8,       // Minute of hour, 0..59 (UTC)
    pub sec: u8,       // Seconds of minute, 0..60 (UTC)
    pub valid: u8,     // Validity flags
    pub t_acc: u32,    // Time accuracy estimate [ns]
    pub nano: i32,     // Fraction of second [ns]
    pub fix_type: u8,  // GNSS fix type
    pub flags: u8,     // Fix status flags
    pub flags2: u8,    // Additional flags
    pub num_sv: u8,    // Number of satellites used
    pub lon: i32,      // Longitude [1e-7 deg]
    pub lat: i32,      // Latitude [1e-7 deg]
    pub height: i32,   // Height above ellipsoid [mm]
    pub h_msl: i32,    // Height above MSL [mm]
    pub h_acc: u32,    // Horizontal accuracy estimate [mm]
    pub v_acc: u32,    // Vertical accuracy estimate [mm]
    pub vel_n: i32,    // NED north velocity [mm/s]
    pub vel_e: i32,    // NED east velocity [mm/s]
    pub vel_d: i32,    // NED down velocity [mm/s]
    pub g_speed: i32,  // Ground speed [mm/s]
    pub head_mot: i32, // Heading of motion
    pub s_acc: u32,    // Speed accuracy estimate [mm/s]
    pub head_acc: u32, // Heading accuracy estimate
    pub p_dop: u16,    // Position DOP [0.01]
    pub head_veh: i32, // Heading of vehicle
}

impl NavPvt {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(92);
        wtr.write_u32::<LittleEndian>(self.itow).unwrap();
        wtr.write_u16::<LittleEndian>(self.year).unwrap();
        wtr.write_u8(self.month).unwrap();
        wtr.write_u8(self.day).unwrap();
        wtr.write_u8(self.hour).unwrap();
        wtr.write_u8(self.min).unwrap();
        wtr.write_u8(self.sec).unwrap();
        wtr.write_u8(self.valid).unwrap();
        wtr.write_u32::<LittleEndian>(self.t_acc).unwrap();
        wtr.write_i32::<LittleEndian>(self.nano).unwrap();
        wtr.write_u8(self.fix_type).unwrap();
        wtr.write_u8(self.flags).unwrap();
        wtr.write_u8(self.flags2).unwrap();
        wtr.write_u8(self.num_sv).unwrap();
        wtr.write_i32::<LittleEndian>(self.lon).unwrap();
        wtr.write_i32::<LittleEndian>(self.lat).unwrap();
        wtr.write_i32::<LittleEndian>(self.height).unwrap();
        wtr.write_i32::<LittleEndian>(self.h_msl).unwrap();
        wtr.write_u32::<LittleEndian>(self.h_acc).unwrap();
        wtr.write_u32::<LittleEndian>(self.v_acc).unwrap();
        wtr.write_i32::<LittleEndian>(self.vel_n).unwrap();
        wtr.write_i32::<LittleEndian>(self.vel_e).unwrap();
        wtr.write_i32::<LittleEndian>(self.vel_d).unwrap();
        wtr.write_i32::<LittleEndian>(self.g_speed).unwrap();
        wtr.write_i32::<LittleEndian>(self.head_mot).unwrap();
        wtr.write_u32::<LittleEndian>(self.s_acc).unwrap();
        wtr.write_u32::<LittleEndian>(self.head_acc).unwrap();
        wtr.write_u16::<LittleEndian>(self.p_dop).unwrap();
        // flags3 and reserved
        wtr.extend_from_slice(&[0u8; 6]);
        wtr.write_i32::<LittleEndian>(self.head_veh).unwrap();
        // magDec, magAcc
        wtr.write_i16::<LittleEndian>(0).unwrap();
        wtr.write_u16::<LittleEndian>(0).unwrap();
        wtr
    }
}

pub fn nav_pvt_payload_strategy() -> impl Strategy<Value = NavPvt> {
    let time = (
        any::<u32>(),
        1999..=2099u16,
        1..=12u8,
        1..=28u8,
        0..=23u8,
        0..=59u8,
        0..=59u8,
    );
    let status = (
        any::<u8>(),
        any::<u32>(),
        any::<i32>(),
        0..=5u8,
        any::<u8>(),
        any::<u8>(),
        0..=64u8,
    );
    let position = (
        (-1800000000..=1800000000i32),
        (-900000000..=900000000i32),
        any::<i32>(),
        any::<i32>(),
        any::<u32>(),
        any::<u32>(),
    );
    let motion = (
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<u32>(),
        any::<u32>(),
        0..=9999u16,
        any::<i32>(),
    );

    (time, status, position, motion).prop_map(
        |(
            (itow, year, month, day, hour, min, sec),
            (valid, t_acc, nano, fix_type, flags, flags2, num_sv),
            (lon, lat, height, h_msl, h_acc, v_acc),
            (vel_n, vel_e, vel_d, g_speed, head_mot, s_acc, head_acc, p_dop, head_veh),
        )| NavPvt {
            itow,
            year,
            month,
            day,
            hour,
            min,
            sec,
            valid,
            t_acc,
            nano,
            fix_type,
            flags,
            flags2,
            num_sv,
            lon,
            lat,
            height,
            h_msl,
            h_acc,
            v_acc,
            vel_n,
            vel_e,
            vel_d,
            g_speed,
            head_mot,
            s_acc,
            head_acc,
            p_dop,
            head_veh,
        },
    )
}

/// Calculates the 8-bit Fletcher-16 checksum used by U-Blox.
fn calculate_checksum(data: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for byte in data {
        ck_a = ck_a.wrapping_add(*byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

pub fn ubx_nav_pvt_frame_strategy() -> impl Strategy<Value = (NavPvt, Vec<u8>)> {
    nav_pvt_payload_strategy().prop_map(|nav_pvt| {
        let payload = nav_pvt.to_bytes();

        let mut frame_core = Vec::with_capacity(4 + payload.len());
        frame_core.push(0x01); // NAV class
        frame_core.push(0x07); // PVT message ID
        frame_core
            .write_u16::<LittleEndian>(payload.len() as u16)
            .unwrap();
        frame_core.extend_from_slice(&payload);

        let (ck_a, ck_b) = calculate_checksum(&frame_core);

        let mut final_frame = Vec::with_capacity(8 + payload.len());
        final_frame.push(UBX_SYNC_CHAR_1);
        final_frame.push(UBX_SYNC_CHAR_2);
        final_frame.extend_from_slice(&frame_core);
        final_frame.push(ck_a);
        final_frame.push(ck_b);

        (nav_pvt, final_frame)
    })
}

fn decode_first(decoder: &mut Decoder, frame: &[u8]) -> PvtFix {
    let mut sync = Synchronizer::default();
    let records: Vec<_> = sync
        .consume(frame)
        .filter_map(|event| decoder.decode(event).ok().flatten())
        .collect();
    match records.as_slice() {
        [Record::Pvt(pvt)] => *pvt,
        other => panic!("Synchronizer failed to cut a valid NAV-PVT frame: {other:?}"),
    }
}

proptest! {
    #[test]
    fn test_synchronizer_with_generated_nav_pvt_frames(
        (expected, frame) in ubx_nav_pvt_frame_strategy()
    ) {
        let mut decoder = Decoder::default();
        let pvt = decode_first(&mut decoder, &frame);

        prop_assert_eq!(pvt.itow, expected.itow);
        prop_assert_eq!(pvt.year, expected.year as i16);
        prop_assert_eq!(
            (pvt.month, pvt.day, pvt.hour, pvt.min, pvt.sec),
            (expected.month, expected.day, expected.hour, expected.min, expected.sec)
        );
        prop_assert_eq!(pvt.flags, expected.flags);
        prop_assert_eq!(pvt.fix_status, FixStatus::from_flags(expected.flags));
        prop_assert_eq!(pvt.num_satellites, expected.num_sv);
        prop_assert_eq!(pvt.lon, expected.lon as f64 / 1e7);
        prop_assert_eq!(pvt.lat, expected.lat as f64 / 1e7);
        prop_assert_eq!(pvt.height, expected.height as f64 / 1e3);
        prop_assert_eq!(pvt.height_msl, expected.h_msl as f64 / 1e3);
        prop_assert_eq!(pvt.h_acc, expected.h_acc as f64);
        prop_assert_eq!(pvt.v_acc, expected.v_acc as f64);
        prop_assert_eq!(pvt.vel_north, expected.vel_n as f64 / 1e3);
        prop_assert_eq!(pvt.vel_east, expected.vel_e as f64 / 1e3);
        prop_assert_eq!(pvt.vel_down, expected.vel_d as f64 / 1e3);
        prop_assert_eq!(pvt.ground_speed, expected.g_speed as f64 / 1e3);
        prop_assert_eq!(pvt.heading_motion, expected.head_mot as f64 / 1e3);
        prop_assert_eq!(pvt.speed_accuracy, expected.s_acc as f64);
        prop_assert_eq!(pvt.heading_accuracy, expected.head_acc as f64);
        prop_assert_eq!(pvt.pdop, expected.p_dop as i16);
        prop_assert_eq!(pvt.heading_vehicle, expected.head_veh as f64 / 1e3);
        prop_assert!(pvt.datetime().is_ok());

        prop_assert_eq!(decoder.fix().status(), pvt.fix_status);
        prop_assert_eq!(decoder.fix().satellites(), expected.num_sv);
    }

    #[test]
    fn test_nav_pvt_decoding_is_deterministic(
        (_expected, frame) in ubx_nav_pvt_frame_strategy()
    ) {
        let a = decode_first(&mut Decoder::default(), &frame);
        let b = decode_first(&mut Decoder::default(), &frame);
        prop_assert_eq!(a, b);
    }
}
