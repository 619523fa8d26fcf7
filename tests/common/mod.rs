//! Builders for synthetic GSF streams.
#![allow(dead_code)]

pub const HEADER: u32 = 1;
pub const PING: u32 = 2;
pub const SVP: u32 = 3;
pub const PROCESSING_PARAMETERS: u32 = 4;
pub const SENSOR_PARAMETERS: u32 = 5;
pub const COMMENT: u32 = 6;
pub const HISTORY: u32 = 7;
pub const NAVIGATION_ERROR: u32 = 8;
pub const HV_NAVIGATION_ERROR: u32 = 11;
pub const ATTITUDE: u32 = 12;

pub const CHECKSUM_FLAG: u32 = 0x8000_0000;

/// Frame `payload` as a record with the given record id.
pub fn frame(record_id: u32, payload: &[u8]) -> Vec<u8> {
    let mut dat = (payload.len() as u32).to_be_bytes().to_vec();
    dat.extend(record_id.to_be_bytes());
    if record_id & CHECKSUM_FLAG != 0 {
        dat.extend(0xcafe_f00du32.to_be_bytes());
    }
    dat.extend(payload);
    dat
}

fn time(sec: u32, nsec: u32) -> Vec<u8> {
    let mut dat = sec.to_be_bytes().to_vec();
    dat.extend(nsec.to_be_bytes());
    dat
}

pub fn header(version: &str) -> Vec<u8> {
    let mut dat = version.as_bytes().to_vec();
    // padded to a multiple of 4
    dat.resize((dat.len() / 4 + 1) * 4, 0);
    dat
}

pub fn comment(sec: u32, text: &str) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend((text.len() as u32 + 1).to_be_bytes());
    dat.extend(text.as_bytes());
    dat.push(0);
    dat
}

pub fn history(sec: u32, fields: [&str; 4]) -> Vec<u8> {
    let mut dat = time(sec, 0);
    for field in fields {
        dat.extend((field.len() as u16).to_be_bytes());
        dat.extend(field.as_bytes());
    }
    dat
}

pub fn processing_parameters(sec: u32, params: &[&str]) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend((params.len() as u16).to_be_bytes());
    for param in params {
        dat.extend((param.len() as u16 + 1).to_be_bytes());
        dat.extend(param.as_bytes());
        dat.push(0);
    }
    dat
}

/// Sound velocity profile at 37.5N 122.5W with `(depth cm, speed cm/s)` points.
pub fn svp(sec: u32, points: &[(u32, u32)]) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend(time(sec + 60, 0));
    dat.extend((-1_225_000_000i32).to_be_bytes());
    dat.extend(375_000_000i32.to_be_bytes());
    dat.extend((points.len() as u32).to_be_bytes());
    for (depth, speed) in points {
        dat.extend(depth.to_be_bytes());
        dat.extend(speed.to_be_bytes());
    }
    dat
}

pub fn navigation_error(sec: u32, lon_err: i32, lat_err: i32) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend(1i32.to_be_bytes());
    dat.extend(lon_err.to_be_bytes());
    dat.extend(lat_err.to_be_bytes());
    dat
}

/// Attitude record of `(millis offset, pitch, roll, heave, heading)` measurements,
/// all in hundredths.
pub fn attitude(sec: u32, measurements: &[(i16, i16, i16, i16, u16)]) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend((measurements.len() as i16).to_be_bytes());
    for (millis, pitch, roll, heave, heading) in measurements {
        dat.extend(millis.to_be_bytes());
        dat.extend(pitch.to_be_bytes());
        dat.extend(roll.to_be_bytes());
        dat.extend(heave.to_be_bytes());
        dat.extend(heading.to_be_bytes());
    }
    dat
}

pub fn subrecord(id: u8, body: &[u8]) -> Vec<u8> {
    let mut dat = vec![id];
    dat.extend(&(body.len() as u32).to_be_bytes()[1..]);
    dat.extend(body);
    dat
}

/// Scale factors subrecord from `(subrecord id, width, multiplier, offset)` entries.
pub fn scale_factors(entries: &[(u8, u8, u32, i32)]) -> Vec<u8> {
    let mut body = (entries.len() as u32).to_be_bytes().to_vec();
    for (id, width, multiplier, offset) in entries {
        body.extend([*id, width << 4, 0, 0]);
        body.extend(multiplier.to_be_bytes());
        body.extend(offset.to_be_bytes());
    }
    subrecord(100, &body)
}

/// Ping envelope at 37.5N 122.5W heading 90 degrees.
#[rustfmt::skip]
pub fn ping_envelope(sec: u32, num_beams: u16) -> Vec<u8> {
    let mut dat = time(sec, 0);
    dat.extend((-1_225_000_000i32).to_be_bytes());
    dat.extend(375_000_000i32.to_be_bytes());
    dat.extend(num_beams.to_be_bytes());
    dat.extend((num_beams / 2).to_be_bytes());
    dat.extend([0x80, 0, 0, 0]);     // ping flags
    dat.extend(0i16.to_be_bytes());  // tide corrector
    dat.extend(0u32.to_be_bytes());  // depth corrector
    dat.extend(9000u16.to_be_bytes()); // heading
    dat.extend(100i16.to_be_bytes());  // pitch
    dat.extend((-100i16).to_be_bytes()); // roll
    dat.extend(10i16.to_be_bytes());   // heave
    dat.extend(9000u16.to_be_bytes()); // course
    dat.extend(500u16.to_be_bytes());  // speed
    dat.extend([0u8; 12]);           // height, separation, gps tide corrector
    dat.extend([0, 0]);
    dat
}

/// Ping with depth (cm) and across track (dm) arrays.
pub fn ping(sec: u32, depth_cm: &[u16], across_dm: &[i16]) -> Vec<u8> {
    assert_eq!(depth_cm.len(), across_dm.len());
    let mut dat = ping_envelope(sec, depth_cm.len() as u16);
    dat.extend(scale_factors(&[(1, 2, 100, 0), (2, 2, 10, 0)]));
    dat.extend(subrecord(
        1,
        &depth_cm.iter().flat_map(|v| v.to_be_bytes()).collect::<Vec<u8>>(),
    ));
    dat.extend(subrecord(
        2,
        &across_dm.iter().flat_map(|v| v.to_be_bytes()).collect::<Vec<u8>>(),
    ));
    dat
}

/// A small survey file exercising every decoded record type.
pub fn survey() -> Vec<u8> {
    let mut dat = frame(HEADER, &header("GSF-v03.09"));
    dat.extend(frame(
        PROCESSING_PARAMETERS,
        &processing_parameters(1000, &["REFERENCE TIME=1970/001 00:00:00", "ROLL_COMPENSATED=YES"]),
    ));
    dat.extend(frame(SVP, &svp(1000, &[(0, 150_000), (10_000, 149_000)])));
    dat.extend(frame(COMMENT | CHECKSUM_FLAG, &comment(1001, "start of line 1")));
    dat.extend(frame(PING, &ping(1002, &[1000, 1050, 1100], &[-250, 0, 250])));
    dat.extend(frame(ATTITUDE, &attitude(1002, &[(0, 100, -100, 5, 9000), (100, 110, -90, 6, 9010)])));
    dat.extend(frame(PING, &ping(1003, &[1010, 1060, 1110], &[-255, 1, 255])));
    dat.extend(frame(NAVIGATION_ERROR, &navigation_error(1003, 15, 25)));
    dat.extend(frame(SENSOR_PARAMETERS, &[0u8; 16]));
    dat.extend(frame(
        HISTORY,
        &history(1004, ["survey-host", "surveyor", "gsf-edit -x", "cleaned"]),
    ));
    dat
}
