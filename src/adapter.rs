//! Bridge from an external, higher-level framed byte stream (a mission protocol) into
//! this crate's message records.
//!
//! The framing layer itself (preamble, length, checksum) is out of scope and opaque:
//! callers provide it through the [`Framer`] trait. This module only owns the unit
//! conversions between the framer's raw fixed-point fields and the ODID logical record,
//! and the reverse conversions for re-exporting a stored record to the framer's shape.

use crate::aggregate::UasData;
use crate::error::Result;
use crate::message::{
    BasicId, HeightType, IdType, Location, Message, MessageType, OperationalStatus, OperatorId,
    OperatorLocationType, SelfId, System, UaType, MESSAGE_SIZE,
};
use crate::scalar::{HorizontalAccuracy, SpeedAccuracy, TimestampAccuracy, VerticalAccuracy};

/// One decoded frame from the external framer, still in its native units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawFrame {
    BasicId(RawBasicId),
    Location(RawLocation),
    SelfId(RawSelfId),
    System(RawSystem),
    OperatorId(RawOperatorId),
}

/// Consumes one byte at a time from an externally framed protocol.
///
/// Implementors own the preamble/length/checksum handling; `feed` returns `Some` the
/// instant a well-formed frame completes, and `None` while more bytes are needed.
pub trait Framer {
    fn feed(&mut self, byte: u8) -> Option<RawFrame>;
}

/// Basic ID fields as carried by the external framer; enum namespaces already line up
/// with [`IdType`]/[`UaType`] so no extra identity mapping table is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBasicId {
    pub id_type: u8,
    pub ua_type: u8,
    pub uas_id: [u8; 20],
}

impl RawBasicId {
    pub fn into_basic_id(self) -> Result<BasicId> {
        Ok(BasicId {
            id_type: id_type_from_raw(self.id_type)?,
            ua_type: ua_type_from_raw(self.ua_type)?,
            uas_id: self.uas_id,
        })
    }

    pub fn from_basic_id(msg: &BasicId) -> Self {
        Self { id_type: msg.id_type as u8, ua_type: msg.ua_type as u8, uas_id: msg.uas_id }
    }
}

fn id_type_from_raw(v: u8) -> Result<IdType> {
    match v {
        0 => Ok(IdType::None),
        1 => Ok(IdType::Serial),
        2 => Ok(IdType::CaaRegistration),
        3 => Ok(IdType::UtmUuid),
        value => Err(crate::error::Error::InvalidEnum { field: "IdType", value }),
    }
}

fn ua_type_from_raw(v: u8) -> Result<UaType> {
    use UaType::*;
    Ok(match v {
        0 => None,
        1 => Aeroplane,
        2 => Rotorcraft,
        3 => Gyroplane,
        4 => HybridLift,
        5 => Ornithopter,
        6 => Glider,
        7 => Kite,
        8 => FreeBalloon,
        9 => CaptiveBalloon,
        10 => Airship,
        11 => FreeFallParachute,
        12 => Rocket,
        13 => TetheredPoweredAircraft,
        14 => GroundObstacle,
        15 => Other,
        value => return Err(crate::error::Error::InvalidEnum { field: "UaType", value }),
    })
}

/// Location fields as carried by the external framer: centidegrees for direction,
/// centimetres/second for speed, and 1e7 fixed-point for latitude/longitude, mirroring
/// the units a mission-protocol telemetry stream typically uses. Altitude, height, and
/// timestamp are already in the framer's native metres/seconds and pass through
/// unscaled other than the ODID quantisation applied at encode time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawLocation {
    pub status: u8,
    pub height_type: u8,
    pub direction_cdeg: u32,
    pub speed_horizontal_cms: i32,
    pub speed_vertical_cms: i32,
    pub latitude_e7: i32,
    pub longitude_e7: i32,
    pub altitude_baro_m: f32,
    pub altitude_geo_m: f32,
    pub height_m: f32,
    pub timestamp_s: f32,
}

impl RawLocation {
    pub fn into_location(self) -> Result<Location> {
        Ok(Location {
            status: operational_status_from_raw(self.status)?,
            height_type: if self.height_type != 0 {
                HeightType::AboveGroundLevel
            } else {
                HeightType::AboveTakeoff
            },
            direction: self.direction_cdeg as f64 / 100.0,
            speed_horizontal: self.speed_horizontal_cms as f64 / 100.0,
            speed_vertical: self.speed_vertical_cms as f64 / 100.0,
            latitude: self.latitude_e7 as f64 / 1e7,
            longitude: self.longitude_e7 as f64 / 1e7,
            altitude_baro: self.altitude_baro_m as f64,
            altitude_geo: self.altitude_geo_m as f64,
            height: self.height_m as f64,
            horizontal_accuracy: HorizontalAccuracy::Unknown,
            vertical_accuracy: VerticalAccuracy::Unknown,
            baro_altitude_accuracy: VerticalAccuracy::Unknown,
            speed_accuracy: SpeedAccuracy::Unknown,
            timestamp: self.timestamp_s as f64,
            timestamp_accuracy: TimestampAccuracy::Unknown,
        })
    }

    pub fn from_location(msg: &Location) -> Self {
        Self {
            status: msg.status as u8,
            height_type: matches!(msg.height_type, HeightType::AboveGroundLevel) as u8,
            direction_cdeg: (msg.direction * 100.0) as u32,
            speed_horizontal_cms: (msg.speed_horizontal * 100.0) as i32,
            speed_vertical_cms: (msg.speed_vertical * 100.0) as i32,
            latitude_e7: (msg.latitude * 1e7) as i32,
            longitude_e7: (msg.longitude * 1e7) as i32,
            altitude_baro_m: msg.altitude_baro as f32,
            altitude_geo_m: msg.altitude_geo as f32,
            height_m: msg.height as f32,
            timestamp_s: msg.timestamp as f32,
        }
    }
}

fn operational_status_from_raw(v: u8) -> Result<OperationalStatus> {
    use OperationalStatus::*;
    Ok(match v {
        0 => Undeclared,
        1 => Ground,
        2 => Airborne,
        3 => Emergency,
        4 => RemoteIdSystemFailure,
        value => return Err(crate::error::Error::InvalidEnum { field: "OperationalStatus", value }),
    })
}

/// Self ID fields as carried by the external framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSelfId {
    pub desc_type: u8,
    pub description: [u8; 23],
}

impl RawSelfId {
    pub fn into_self_id(self) -> SelfId {
        SelfId { desc_type: self.desc_type, description: self.description }
    }

    pub fn from_self_id(msg: &SelfId) -> Self {
        Self { desc_type: msg.desc_type, description: msg.description }
    }
}

/// System fields as carried by the external framer: same 1e7 fixed-point latitude and
/// longitude convention as [`RawLocation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSystem {
    pub operator_location_type: u8,
    pub operator_latitude_e7: i32,
    pub operator_longitude_e7: i32,
    pub area_count: u16,
    pub area_radius_m: f32,
    pub area_ceiling_m: f32,
    pub area_floor_m: f32,
    pub category_eu: u8,
    pub class_eu: u8,
    pub operator_altitude_geo_m: f32,
    pub timestamp: u32,
}

impl RawSystem {
    /// Validates `category_eu`/`class_eu` the same way [`System::encode`] would,
    /// so a frame with a field out of range fails here rather than being stored and
    /// only discovered the next time the aggregate is re-encoded for broadcast.
    pub fn into_system(self) -> Result<System> {
        let system = System {
            operator_location_type: if self.operator_location_type != 0 {
                OperatorLocationType::LiveGnss
            } else {
                OperatorLocationType::TakeOff
            },
            operator_latitude: self.operator_latitude_e7 as f64 / 1e7,
            operator_longitude: self.operator_longitude_e7 as f64 / 1e7,
            area_count: self.area_count,
            area_radius: self.area_radius_m as f64,
            area_ceiling: self.area_ceiling_m as f64,
            area_floor: self.area_floor_m as f64,
            category_eu: self.category_eu,
            class_eu: self.class_eu,
            operator_altitude_geo: self.operator_altitude_geo_m as f64,
            timestamp: self.timestamp,
        };
        let mut scratch = [0u8; MESSAGE_SIZE];
        Message::System(system).encode(&mut scratch)?;
        Ok(system)
    }

    pub fn from_system(msg: &System) -> Self {
        Self {
            operator_location_type: matches!(
                msg.operator_location_type,
                OperatorLocationType::LiveGnss
            ) as u8,
            operator_latitude_e7: (msg.operator_latitude * 1e7) as i32,
            operator_longitude_e7: (msg.operator_longitude * 1e7) as i32,
            area_count: msg.area_count,
            area_radius_m: msg.area_radius as f32,
            area_ceiling_m: msg.area_ceiling as f32,
            area_floor_m: msg.area_floor as f32,
            category_eu: msg.category_eu,
            class_eu: msg.class_eu,
            operator_altitude_geo_m: msg.operator_altitude_geo as f32,
            timestamp: msg.timestamp,
        }
    }
}

/// Operator ID fields as carried by the external framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOperatorId {
    pub operator_id_type: u8,
    pub operator_id: [u8; 20],
}

impl RawOperatorId {
    pub fn into_operator_id(self) -> OperatorId {
        OperatorId { operator_id_type: self.operator_id_type, operator_id: self.operator_id }
    }

    pub fn from_operator_id(msg: &OperatorId) -> Self {
        Self { operator_id_type: msg.operator_id_type, operator_id: msg.operator_id }
    }
}

/// Drives a [`Framer`] byte-by-byte and ingests each completed frame into a [`UasData`].
pub struct InputAdapter<F> {
    framer: F,
}

impl<F: Framer> InputAdapter<F> {
    pub fn new(framer: F) -> Self {
        Self { framer }
    }

    /// Feed one byte from the external stream; if it completes a frame, convert and
    /// store it in `uas`, returning the message kind that was written.
    pub fn feed(&mut self, byte: u8, uas: &mut UasData) -> Result<Option<MessageType>> {
        let Some(frame) = self.framer.feed(byte) else {
            return Ok(None);
        };
        let kind = match frame {
            RawFrame::BasicId(raw) => {
                let index = uas.basic_id.iter().position(|s| s.is_none()).unwrap_or(0);
                uas.basic_id[index] = Some(raw.into_basic_id()?);
                MessageType::BasicId
            }
            RawFrame::Location(raw) => {
                uas.location = Some(raw.into_location()?);
                MessageType::Location
            }
            RawFrame::SelfId(raw) => {
                uas.self_id = Some(raw.into_self_id());
                MessageType::SelfId
            }
            RawFrame::System(raw) => {
                uas.system = Some(raw.into_system()?);
                MessageType::System
            }
            RawFrame::OperatorId(raw) => {
                uas.operator_id = Some(raw.into_operator_id());
                MessageType::OperatorId
            }
        };
        log::debug!("adapter ingested {kind:?} from external framer");
        Ok(Some(kind))
    }
}
