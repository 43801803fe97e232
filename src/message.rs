//! Bit-exact codec between logical ODID message records and their 25-byte wire form.
//!
//! Multi-byte integers are little-endian. Bytes that pack more than one logical field
//! list the low bit first, matching a C bitfield declared LSB-first; those bytes are
//! built and read with explicit shifts and masks rather than any automatic bit-field
//! derive, since the two bit orders are easy to confuse and only one is on the wire.

use crate::error::{Error, Result};
use crate::scalar::{
    self, HorizontalAccuracy, SpeedAccuracy, TimestampAccuracy, VerticalAccuracy,
};

/// Current protocol version written into every prefix byte's low nibble.
pub const PROTOCOL_VERSION: u8 = 0;

/// Size in bytes of every individual ODID message, including the prefix byte.
pub const MESSAGE_SIZE: usize = 25;

/// Upper bound on concurrently tracked Basic ID slots (distinct `id_type` values).
pub const MAX_BASIC_ID: usize = 2;

/// Upper bound on Authentication pages, page 0 plus four continuation pages.
pub const MAX_AUTH_PAGES: usize = 5;

pub(crate) fn prefix_byte(kind: MessageType) -> u8 {
    (kind.to_nibble() << 4) | (PROTOCOL_VERSION & 0x0F)
}

fn check_enum(field: &'static str, value: u8, max_inclusive: u8) -> Result<u8> {
    if value > max_inclusive {
        Err(Error::InvalidEnum { field, value })
    } else {
        Ok(value)
    }
}

fn copy_padded(dst: &mut [u8], src: &[u8]) {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
    for b in &mut dst[n..] {
        *b = 0;
    }
}

/// Read a fixed-width wire string, stopping at the first NUL or the field width.
pub fn str_from_wire(bytes: &[u8]) -> &str {
    let n = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    core::str::from_utf8(&bytes[..n]).unwrap_or("")
}

/// The high nibble of a message's prefix byte: which of the seven variants it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    BasicId,
    Location,
    Authentication,
    SelfId,
    System,
    OperatorId,
    MessagePack,
    /// An unrecognised type nibble; carried rather than rejected so a caller can inspect it.
    Invalid,
}

impl MessageType {
    fn to_nibble(self) -> u8 {
        match self {
            Self::BasicId => 0x0,
            Self::Location => 0x1,
            Self::Authentication => 0x2,
            Self::SelfId => 0x3,
            Self::System => 0x4,
            Self::OperatorId => 0x5,
            Self::MessagePack => 0xF,
            Self::Invalid => 0xE,
        }
    }

    /// Dispatch on the high nibble of a message's first byte.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble {
            0x0 => Self::BasicId,
            0x1 => Self::Location,
            0x2 => Self::Authentication,
            0x3 => Self::SelfId,
            0x4 => Self::System,
            0x5 => Self::OperatorId,
            0xF => Self::MessagePack,
            _ => Self::Invalid,
        }
    }
}

/// UAS ID kind carried by a Basic ID message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    None = 0,
    Serial = 1,
    CaaRegistration = 2,
    UtmUuid = 3,
}

impl IdType {
    fn from_u8(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Self::None),
            1 => Ok(Self::Serial),
            2 => Ok(Self::CaaRegistration),
            3 => Ok(Self::UtmUuid),
            value => Err(Error::InvalidEnum { field: "IdType", value }),
        }
    }
}

/// Category of unmanned aircraft carried by a Basic ID message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UaType {
    None = 0,
    Aeroplane = 1,
    Rotorcraft = 2,
    Gyroplane = 3,
    HybridLift = 4,
    Ornithopter = 5,
    Glider = 6,
    Kite = 7,
    FreeBalloon = 8,
    CaptiveBalloon = 9,
    Airship = 10,
    FreeFallParachute = 11,
    Rocket = 12,
    TetheredPoweredAircraft = 13,
    GroundObstacle = 14,
    Other = 15,
}

impl UaType {
    fn from_u8(v: u8) -> Result<Self> {
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
            value => return Err(Error::InvalidEnum { field: "UaType", value }),
        })
    }
}

/// Basic ID message: the aircraft's identity token and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicId {
    pub id_type: IdType,
    pub ua_type: UaType,
    /// Null-padded UAS identifier, up to 20 bytes.
    pub uas_id: [u8; 20],
}

impl BasicId {
    pub fn uas_id_str(&self) -> &str {
        str_from_wire(&self.uas_id)
    }

    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        buf[0] = prefix_byte(MessageType::BasicId);
        buf[1] = ((self.id_type as u8) << 4) | (self.ua_type as u8);
        copy_padded(&mut buf[2..22], &self.uas_id);
        buf[22..25].fill(0);
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let id_type = IdType::from_u8(buf[1] >> 4)?;
        let ua_type = UaType::from_u8(buf[1] & 0x0F)?;
        let mut uas_id = [0u8; 20];
        uas_id.copy_from_slice(&buf[2..22]);
        Ok(Self { id_type, ua_type, uas_id })
    }
}

/// Broadcast status carried in the Location message's flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalStatus {
    Undeclared = 0,
    Ground = 1,
    Airborne = 2,
    Emergency = 3,
    RemoteIdSystemFailure = 4,
}

impl OperationalStatus {
    fn from_u8(v: u8) -> Result<Self> {
        use OperationalStatus::*;
        Ok(match v {
            0 => Undeclared,
            1 => Ground,
            2 => Airborne,
            3 => Emergency,
            4 => RemoteIdSystemFailure,
            value => return Err(Error::InvalidEnum { field: "OperationalStatus", value }),
        })
    }
}

/// Reference the Location message's height field is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightType {
    AboveTakeoff = 0,
    AboveGroundLevel = 1,
}

/// Location message: the aircraft's current dynamic flight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub status: OperationalStatus,
    pub height_type: HeightType,
    /// Degrees, `[0, 360)`, or `361` for unknown.
    pub direction: f64,
    /// m/s, non-negative, or `255` for unknown.
    pub speed_horizontal: f64,
    /// Signed m/s, or `63` for unknown.
    pub speed_vertical: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Barometric altitude, metres, or `-1000` for unknown.
    pub altitude_baro: f64,
    /// Geodetic altitude, metres, or `-1000` for unknown.
    pub altitude_geo: f64,
    /// Height above the `height_type` reference, metres, or `-1000` for unknown.
    pub height: f64,
    pub horizontal_accuracy: HorizontalAccuracy,
    pub vertical_accuracy: VerticalAccuracy,
    pub baro_altitude_accuracy: VerticalAccuracy,
    pub speed_accuracy: SpeedAccuracy,
    /// Seconds after the hour.
    pub timestamp: f64,
    pub timestamp_accuracy: TimestampAccuracy,
}

impl Location {
    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        buf[0] = prefix_byte(MessageType::Location);

        let (dir_byte, ew_bit) = scalar::encode_direction(self.direction);
        let (speed_byte, mult_bit) = scalar::encode_speed_horizontal(self.speed_horizontal);

        let mut flags = (self.status as u8) << 4;
        if mult_bit {
            flags |= 0b0001;
        }
        if ew_bit {
            flags |= 0b0010;
        }
        if matches!(self.height_type, HeightType::AboveGroundLevel) {
            flags |= 0b0100;
        }
        buf[1] = flags;

        buf[2] = dir_byte;
        buf[3] = speed_byte;
        buf[4] = scalar::encode_speed_vertical(self.speed_vertical) as u8;
        buf[5..9].copy_from_slice(&scalar::encode_lat_lon(self.latitude).to_le_bytes());
        buf[9..13].copy_from_slice(&scalar::encode_lat_lon(self.longitude).to_le_bytes());
        buf[13..15].copy_from_slice(&scalar::encode_altitude(self.altitude_baro).to_le_bytes());
        buf[15..17].copy_from_slice(&scalar::encode_altitude(self.altitude_geo).to_le_bytes());
        buf[17..19].copy_from_slice(&scalar::encode_altitude(self.height).to_le_bytes());
        buf[19] = ((self.vertical_accuracy as u8) << 4) | (self.horizontal_accuracy as u8);
        buf[20] = ((self.baro_altitude_accuracy as u8) << 4) | (self.speed_accuracy as u8);
        buf[21..23].copy_from_slice(&scalar::encode_timestamp(self.timestamp).to_le_bytes());
        buf[23] = self.timestamp_accuracy.to_grade() & 0x0F;
        buf[24] = 0;
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let status = OperationalStatus::from_u8(buf[1] >> 4)?;
        let mult_bit = buf[1] & 0b0001 != 0;
        let ew_bit = buf[1] & 0b0010 != 0;
        let height_type = if buf[1] & 0b0100 != 0 {
            HeightType::AboveGroundLevel
        } else {
            HeightType::AboveTakeoff
        };

        let direction = scalar::decode_direction(buf[2], ew_bit);
        let speed_horizontal = scalar::decode_speed_horizontal(buf[3], mult_bit);
        let speed_vertical = scalar::decode_speed_vertical(buf[4] as i8);
        let latitude = scalar::decode_lat_lon(i32::from_le_bytes(buf[5..9].try_into().unwrap()));
        let longitude = scalar::decode_lat_lon(i32::from_le_bytes(buf[9..13].try_into().unwrap()));
        let altitude_baro =
            scalar::decode_altitude(u16::from_le_bytes(buf[13..15].try_into().unwrap()));
        let altitude_geo =
            scalar::decode_altitude(u16::from_le_bytes(buf[15..17].try_into().unwrap()));
        let height = scalar::decode_altitude(u16::from_le_bytes(buf[17..19].try_into().unwrap()));
        let vertical_accuracy = VerticalAccuracy::from_grade(buf[19] >> 4)?;
        let horizontal_accuracy = HorizontalAccuracy::from_grade(buf[19] & 0x0F)?;
        let baro_altitude_accuracy = VerticalAccuracy::from_grade(buf[20] >> 4)?;
        let speed_accuracy = SpeedAccuracy::from_grade(buf[20] & 0x0F)?;
        let timestamp =
            scalar::decode_timestamp(u16::from_le_bytes(buf[21..23].try_into().unwrap()));
        let timestamp_accuracy = TimestampAccuracy::from_grade(buf[23] & 0x0F)?;

        Ok(Self {
            status,
            height_type,
            direction,
            speed_horizontal,
            speed_vertical,
            latitude,
            longitude,
            altitude_baro,
            altitude_geo,
            height,
            horizontal_accuracy,
            vertical_accuracy,
            baro_altitude_accuracy,
            speed_accuracy,
            timestamp,
            timestamp_accuracy,
        })
    }
}

/// Authentication message: an opaque, paginated signature/attestation blob.
///
/// Content is carried verbatim; this crate never interprets or verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authentication {
    Page0 {
        auth_type: u8,
        last_page_index: u8,
        length: u8,
        timestamp: u32,
        data: [u8; 17],
    },
    PageN {
        auth_type: u8,
        page: u8,
        data: [u8; 23],
    },
}

impl Authentication {
    pub fn page(&self) -> u8 {
        match self {
            Self::Page0 { .. } => 0,
            Self::PageN { page, .. } => *page,
        }
    }

    pub fn auth_type(&self) -> u8 {
        match self {
            Self::Page0 { auth_type, .. } | Self::PageN { auth_type, .. } => *auth_type,
        }
    }

    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        buf[0] = prefix_byte(MessageType::Authentication);
        match self {
            Self::Page0 { auth_type, last_page_index, length, timestamp, data } => {
                check_enum("Authentication.auth_type", *auth_type, 0x0F)?;
                if *last_page_index as usize >= MAX_AUTH_PAGES {
                    return Err(Error::InvalidPage { page: *last_page_index });
                }
                buf[1] = (auth_type << 4) | 0x00;
                buf[2] = *last_page_index;
                buf[3] = *length;
                buf[4..8].copy_from_slice(&timestamp.to_le_bytes());
                buf[8..25].copy_from_slice(data);
            }
            Self::PageN { auth_type, page, data } => {
                check_enum("Authentication.auth_type", *auth_type, 0x0F)?;
                if *page as usize >= MAX_AUTH_PAGES {
                    return Err(Error::InvalidPage { page: *page });
                }
                buf[1] = (auth_type << 4) | (page & 0x0F);
                buf[2..25].copy_from_slice(data);
            }
        }
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let auth_type = buf[1] >> 4;
        let page = buf[1] & 0x0F;
        if page as usize >= MAX_AUTH_PAGES {
            return Err(Error::InvalidPage { page });
        }
        if page == 0 {
            let mut data = [0u8; 17];
            data.copy_from_slice(&buf[8..25]);
            Ok(Self::Page0 {
                auth_type,
                last_page_index: buf[2],
                length: buf[3],
                timestamp: u32::from_le_bytes(buf[4..8].try_into().unwrap()),
                data,
            })
        } else {
            let mut data = [0u8; 23];
            data.copy_from_slice(&buf[2..25]);
            Ok(Self::PageN { auth_type, page, data })
        }
    }
}

/// Self ID message: free-text flight-purpose description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfId {
    pub desc_type: u8,
    /// Null-padded description, up to 23 bytes.
    pub description: [u8; 23],
}

impl SelfId {
    pub fn description_str(&self) -> &str {
        str_from_wire(&self.description)
    }

    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        buf[0] = prefix_byte(MessageType::SelfId);
        buf[1] = self.desc_type;
        copy_padded(&mut buf[2..25], &self.description);
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let mut description = [0u8; 23];
        description.copy_from_slice(&buf[2..25]);
        Ok(Self { desc_type: buf[1], description })
    }
}

/// Where a System message's operator location was determined from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorLocationType {
    TakeOff = 0,
    LiveGnss = 1,
}

/// System message: operator position, area descriptors, and regulatory classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct System {
    pub operator_location_type: OperatorLocationType,
    pub operator_latitude: f64,
    pub operator_longitude: f64,
    pub area_count: u16,
    /// Metres.
    pub area_radius: f64,
    /// Metres.
    pub area_ceiling: f64,
    /// Metres.
    pub area_floor: f64,
    /// EU UAS category, 4-bit field.
    pub category_eu: u8,
    /// EU UAS class, 4-bit field.
    pub class_eu: u8,
    /// Metres.
    pub operator_altitude_geo: f64,
    pub timestamp: u32,
}

impl System {
    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        check_enum("System.category_eu", self.category_eu, 0x0F)?;
        check_enum("System.class_eu", self.class_eu, 0x0F)?;

        buf[0] = prefix_byte(MessageType::System);
        buf[1] = self.operator_location_type as u8 & 0b0000_0001;
        buf[2..6].copy_from_slice(&scalar::encode_lat_lon(self.operator_latitude).to_le_bytes());
        buf[6..10].copy_from_slice(&scalar::encode_lat_lon(self.operator_longitude).to_le_bytes());
        buf[10..12].copy_from_slice(&self.area_count.to_le_bytes());
        buf[12] = scalar::encode_area_radius(self.area_radius);
        buf[13..15].copy_from_slice(&scalar::encode_altitude(self.area_ceiling).to_le_bytes());
        buf[15..17].copy_from_slice(&scalar::encode_altitude(self.area_floor).to_le_bytes());
        buf[17] = (self.class_eu << 4) | self.category_eu;
        buf[18..20]
            .copy_from_slice(&scalar::encode_altitude(self.operator_altitude_geo).to_le_bytes());
        buf[20..24].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[24] = 0;
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let operator_location_type = if buf[1] & 0x01 != 0 {
            OperatorLocationType::LiveGnss
        } else {
            OperatorLocationType::TakeOff
        };
        Ok(Self {
            operator_location_type,
            operator_latitude: scalar::decode_lat_lon(i32::from_le_bytes(
                buf[2..6].try_into().unwrap(),
            )),
            operator_longitude: scalar::decode_lat_lon(i32::from_le_bytes(
                buf[6..10].try_into().unwrap(),
            )),
            area_count: u16::from_le_bytes(buf[10..12].try_into().unwrap()),
            area_radius: scalar::decode_area_radius(buf[12]),
            area_ceiling: scalar::decode_altitude(u16::from_le_bytes(
                buf[13..15].try_into().unwrap(),
            )),
            area_floor: scalar::decode_altitude(u16::from_le_bytes(
                buf[15..17].try_into().unwrap(),
            )),
            category_eu: buf[17] & 0x0F,
            class_eu: buf[17] >> 4,
            operator_altitude_geo: scalar::decode_altitude(u16::from_le_bytes(
                buf[18..20].try_into().unwrap(),
            )),
            timestamp: u32::from_le_bytes(buf[20..24].try_into().unwrap()),
        })
    }
}

/// Operator ID message: the operator's registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorId {
    pub operator_id_type: u8,
    /// Null-padded operator identifier, up to 20 bytes.
    pub operator_id: [u8; 20],
}

impl OperatorId {
    pub fn operator_id_str(&self) -> &str {
        str_from_wire(&self.operator_id)
    }

    fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        buf[0] = prefix_byte(MessageType::OperatorId);
        buf[1] = self.operator_id_type;
        copy_padded(&mut buf[2..22], &self.operator_id);
        buf[22..25].fill(0);
        Ok(())
    }

    fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Self> {
        let mut operator_id = [0u8; 20];
        operator_id.copy_from_slice(&buf[2..22]);
        Ok(Self { operator_id_type: buf[1], operator_id })
    }
}

/// The tagged union over every ODID message variant (excluding the Message Pack
/// container, which lives in [`crate::pack`] since it embeds this type recursively).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    BasicId(BasicId),
    Location(Location),
    Authentication(Authentication),
    SelfId(SelfId),
    System(System),
    OperatorId(OperatorId),
}

impl Message {
    pub fn kind(&self) -> MessageType {
        match self {
            Self::BasicId(_) => MessageType::BasicId,
            Self::Location(_) => MessageType::Location,
            Self::Authentication(_) => MessageType::Authentication,
            Self::SelfId(_) => MessageType::SelfId,
            Self::System(_) => MessageType::System,
            Self::OperatorId(_) => MessageType::OperatorId,
        }
    }

    /// Encode into a caller-owned 25-byte buffer, zeroing every reserved bit.
    pub fn encode(&self, buf: &mut [u8; MESSAGE_SIZE]) -> Result<()> {
        match self {
            Self::BasicId(m) => m.encode(buf),
            Self::Location(m) => m.encode(buf),
            Self::Authentication(m) => m.encode(buf),
            Self::SelfId(m) => m.encode(buf),
            Self::System(m) => m.encode(buf),
            Self::OperatorId(m) => m.encode(buf),
        }
    }
}

/// Decode a 25-byte buffer by dispatching on its prefix byte's high nibble.
pub fn decode(buf: &[u8; MESSAGE_SIZE]) -> Result<Message> {
    match MessageType::from_nibble(buf[0] >> 4) {
        MessageType::BasicId => Ok(Message::BasicId(BasicId::decode(buf)?)),
        MessageType::Location => Ok(Message::Location(Location::decode(buf)?)),
        MessageType::Authentication => Ok(Message::Authentication(Authentication::decode(buf)?)),
        MessageType::SelfId => Ok(Message::SelfId(SelfId::decode(buf)?)),
        MessageType::System => Ok(Message::System(System::decode(buf)?)),
        MessageType::OperatorId => Ok(Message::OperatorId(OperatorId::decode(buf)?)),
        MessageType::MessagePack | MessageType::Invalid => {
            Err(Error::InvalidEnum { field: "MessageType", value: buf[0] >> 4 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uas_id(s: &str) -> [u8; 20] {
        let mut out = [0u8; 20];
        let bytes = s.as_bytes();
        out[..bytes.len()].copy_from_slice(bytes);
        out
    }

    #[test]
    fn basic_id_encode_matches_literal_scenario() {
        let msg = BasicId {
            id_type: IdType::Serial,
            ua_type: UaType::Rotorcraft,
            uas_id: uas_id("12345678901234567890"),
        };
        let mut buf = [0u8; MESSAGE_SIZE];
        msg.encode(&mut buf).unwrap();
        assert_eq!(&buf[0..2], &[0x00, 0x12]);
        let decoded = BasicId::decode(&buf).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn location_round_trips_within_quantisation() {
        let msg = Location {
            status: OperationalStatus::Airborne,
            height_type: HeightType::AboveGroundLevel,
            direction: 215.7,
            speed_horizontal: 5.4,
            speed_vertical: 5.25,
            latitude: 45.539309,
            longitude: -122.966389,
            altitude_baro: 100.0,
            altitude_geo: 110.0,
            height: 80.0,
            horizontal_accuracy: HorizontalAccuracy::ThreeM,
            vertical_accuracy: VerticalAccuracy::OneM,
            baro_altitude_accuracy: VerticalAccuracy::ThreeM,
            speed_accuracy: SpeedAccuracy::ThreeMs,
            timestamp: 360.52,
            timestamp_accuracy: scalar::encode_timestamp_accuracy(0.2),
        };
        let mut buf = [0u8; MESSAGE_SIZE];
        msg.encode(&mut buf).unwrap();
        let decoded = Location::decode(&buf).unwrap();
        assert!((decoded.direction - 215.7).abs() <= 1.0);
        assert!((decoded.speed_horizontal - 5.4).abs() <= scalar::SPEED_LOW);
        assert!((decoded.latitude - 45.539309).abs() < 1e-6);
        assert_eq!(decoded.timestamp, 360.5);

        let mut buf2 = [0u8; MESSAGE_SIZE];
        decoded.encode(&mut buf2).unwrap();
        assert_eq!(Location::decode(&buf2).unwrap(), decoded);
    }

    #[test]
    fn authentication_multi_page_byte_layout() {
        let page0 = Authentication::Page0 {
            auth_type: 1,
            last_page_index: 1,
            length: 40,
            timestamp: 28_000_000,
            data: *b"12345678901234567",
        };
        let page1 = Authentication::PageN { auth_type: 1, page: 1, data: *b"12345678901234567890123" };

        let mut buf0 = [0u8; MESSAGE_SIZE];
        page0.encode(&mut buf0).unwrap();
        assert_eq!(buf0[1], 0x10);

        let mut buf1 = [0u8; MESSAGE_SIZE];
        page1.encode(&mut buf1).unwrap();
        assert_eq!(buf1[1], 0x11);

        assert_eq!(Authentication::decode(&buf0).unwrap(), page0);
        assert_eq!(Authentication::decode(&buf1).unwrap(), page1);
    }

    #[test]
    fn decode_rejects_unknown_enum_value() {
        let mut buf = [0u8; MESSAGE_SIZE];
        buf[0] = 0x00;
        buf[1] = 0xF0; // id_type nibble 0xF is not a valid IdType
        assert!(matches!(
            BasicId::decode(&buf),
            Err(Error::InvalidEnum { field: "IdType", value: 0xF })
        ));
    }

    #[test]
    fn authentication_page_out_of_range_is_rejected() {
        let page = Authentication::PageN { auth_type: 1, page: 9, data: [0u8; 23] };
        let mut buf = [0u8; MESSAGE_SIZE];
        assert!(matches!(page.encode(&mut buf), Err(Error::InvalidPage { page: 9 })));
    }
}
