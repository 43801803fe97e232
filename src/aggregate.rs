//! The per-aircraft set of currently known messages, with per-slot validity.
//!
//! Every slot is modelled as `Option`: `None` means invalid, matching the validity-bit
//! semantics of the wire protocol without a separate flag field to drift out of sync.

use crate::error::{Error, Result};
use crate::message::{
    self, Authentication, BasicId, Location, Message, MessageType, OperatorId, SelfId, System,
    MAX_AUTH_PAGES, MAX_BASIC_ID, MESSAGE_SIZE,
};
use crate::pack::{self, PACK_BUFFER_SIZE};

/// The full set of messages known for one aircraft, one slot per message kind.
///
/// Constructed with all slots empty; a slot becomes populated the moment a successful
/// encode or decode completes for it, and stays populated until the next one overwrites
/// it. Dropping a `UasData` drops every slot together; none can be torn down alone.
#[derive(Debug, Clone, Default)]
pub struct UasData {
    pub basic_id: [Option<BasicId>; MAX_BASIC_ID],
    pub location: Option<Location>,
    pub auth: [Option<Authentication>; MAX_AUTH_PAGES],
    pub self_id: Option<SelfId>,
    pub system: Option<System>,
    pub operator_id: Option<OperatorId>,
}

impl UasData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw 25-byte message and store it into the matching slot.
    ///
    /// Basic ID messages are stored in the first slot whose `id_type` already matches
    /// the incoming message, or else the first empty slot; [`Error::NoFreeSlot`] is
    /// returned if neither exists. Authentication messages are stored by page index.
    /// Decode failures propagate to the caller rather than silently mapping to
    /// [`MessageType::Invalid`], which is reserved for an unrecognised type nibble.
    pub fn ingest_message(&mut self, buf: &[u8; MESSAGE_SIZE]) -> Result<MessageType> {
        let decoded = message::decode(buf)?;
        let kind = decoded.kind();
        match decoded {
            Message::BasicId(msg) => self.store_basic_id(msg)?,
            Message::Location(msg) => self.location = Some(msg),
            Message::Authentication(msg) => {
                let page = msg.page() as usize;
                self.auth[page] = Some(msg);
            }
            Message::SelfId(msg) => self.self_id = Some(msg),
            Message::System(msg) => self.system = Some(msg),
            Message::OperatorId(msg) => self.operator_id = Some(msg),
        }
        log::trace!("ingested {kind:?}");
        Ok(kind)
    }

    /// Decode a message pack and ingest each of its slots in turn.
    ///
    /// Stops and propagates the first failing slot's error; slots ingested before the
    /// failure remain stored (a partially applied pack is not rolled back).
    pub fn ingest_pack(&mut self, buf: &[u8]) -> Result<()> {
        let view = pack::decode(buf)?;
        for slot in view.iter() {
            self.ingest_message(&slot)?;
        }
        Ok(())
    }

    fn store_basic_id(&mut self, msg: BasicId) -> Result<()> {
        let matching = self
            .basic_id
            .iter()
            .position(|slot| slot.map(|existing| existing.id_type == msg.id_type).unwrap_or(false));
        let empty = self.basic_id.iter().position(|slot| slot.is_none());
        match matching.or(empty) {
            Some(index) => {
                self.basic_id[index] = Some(msg);
                Ok(())
            }
            None => {
                log::warn!("no free Basic ID slot for id_type {:?}", msg.id_type);
                Err(Error::NoFreeSlot)
            }
        }
    }

    /// Re-encode the currently stored Basic ID at `index` into `out`.
    ///
    /// Returns `Ok(false)`, leaving `out` untouched, if that slot is empty. An
    /// out-of-range field on the stored record surfaces as `Err` rather than being
    /// swallowed, since a caller re-broadcasting this slot needs to know the encode
    /// actually failed instead of silently retransmitting stale bytes. Re-encoding
    /// from the stored logical record (rather than caching encoded bytes) keeps the
    /// aggregate's logical fields the single source of truth.
    pub fn encode_basic_id(&self, index: usize, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match self.basic_id.get(index).and_then(|s| s.as_ref()) {
            Some(msg) => {
                Message::BasicId(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-encode the currently stored Location message into `out`.
    pub fn encode_location(&self, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match &self.location {
            Some(msg) => {
                Message::Location(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-encode the currently stored Authentication page at `page` into `out`.
    pub fn encode_auth(&self, page: usize, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match self.auth.get(page).and_then(|s| s.as_ref()) {
            Some(msg) => {
                Message::Authentication(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-encode the currently stored Self ID message into `out`.
    pub fn encode_self_id(&self, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match &self.self_id {
            Some(msg) => {
                Message::SelfId(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-encode the currently stored System message into `out`.
    pub fn encode_system(&self, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match &self.system {
            Some(msg) => {
                Message::System(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-encode the currently stored Operator ID message into `out`.
    pub fn encode_operator_id(&self, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        match &self.operator_id {
            Some(msg) => {
                Message::OperatorId(*msg).encode(out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Collect every currently valid slot into a message pack, in the fixed order
    /// Basic ID(s), Location, Authentication page(s), Self ID, System, Operator ID.
    pub fn to_message_pack(&self) -> Result<([u8; PACK_BUFFER_SIZE], usize)> {
        let mut slots: heapless_slots::Slots = heapless_slots::Slots::new();
        for basic_id in self.basic_id.iter().flatten() {
            slots.push(Message::BasicId(*basic_id))?;
        }
        if let Some(location) = &self.location {
            slots.push(Message::Location(*location))?;
        }
        for auth in self.auth.iter().flatten() {
            slots.push(Message::Authentication(*auth))?;
        }
        if let Some(self_id) = &self.self_id {
            slots.push(Message::SelfId(*self_id))?;
        }
        if let Some(system) = &self.system {
            slots.push(Message::System(*system))?;
        }
        if let Some(operator_id) = &self.operator_id {
            slots.push(Message::OperatorId(*operator_id))?;
        }
        pack::encode(slots.as_slice())
    }
}

/// A fixed-capacity, allocation-free stand-in for `Vec<[u8; 25]>` sized to the largest
/// possible message pack, used only while assembling [`UasData::to_message_pack`].
mod heapless_slots {
    use super::*;

    pub struct Slots {
        buf: [[u8; MESSAGE_SIZE]; pack::MAX_PACK_MESSAGES],
        len: usize,
    }

    impl Slots {
        pub fn new() -> Self {
            Self { buf: [[0u8; MESSAGE_SIZE]; pack::MAX_PACK_MESSAGES], len: 0 }
        }

        pub fn push(&mut self, msg: Message) -> Result<()> {
            if self.len >= self.buf.len() {
                return Err(Error::TooManyMessages { count: self.len + 1 });
            }
            msg.encode(&mut self.buf[self.len])?;
            self.len += 1;
            Ok(())
        }

        pub fn as_slice(&self) -> &[[u8; MESSAGE_SIZE]] {
            &self.buf[..self.len]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{HeightType, IdType, OperationalStatus, UaType};
    use crate::scalar::{HorizontalAccuracy, SpeedAccuracy, TimestampAccuracy, VerticalAccuracy};

    fn sample_basic_id() -> BasicId {
        let mut uas_id = [0u8; 20];
        uas_id[..5].copy_from_slice(b"ABCDE");
        BasicId { id_type: IdType::Serial, ua_type: UaType::Rotorcraft, uas_id }
    }

    fn sample_location() -> Location {
        Location {
            status: OperationalStatus::Airborne,
            height_type: HeightType::AboveGroundLevel,
            direction: 90.0,
            speed_horizontal: 10.0,
            speed_vertical: 0.0,
            latitude: 10.0,
            longitude: 10.0,
            altitude_baro: 50.0,
            altitude_geo: 50.0,
            height: 50.0,
            horizontal_accuracy: HorizontalAccuracy::TenM,
            vertical_accuracy: VerticalAccuracy::TenM,
            baro_altitude_accuracy: VerticalAccuracy::TenM,
            speed_accuracy: SpeedAccuracy::OneMs,
            timestamp: 100.0,
            timestamp_accuracy: TimestampAccuracy::Unknown,
        }
    }

    #[test]
    fn ingest_then_encode_round_trips() {
        let mut uas = UasData::new();
        let mut buf = [0u8; MESSAGE_SIZE];
        Message::BasicId(sample_basic_id()).encode(&mut buf).unwrap();
        let kind = uas.ingest_message(&buf).unwrap();
        assert_eq!(kind, MessageType::BasicId);
        assert!(uas.basic_id[0].is_some());

        let mut out = [0u8; MESSAGE_SIZE];
        assert!(uas.encode_basic_id(0, &mut out).unwrap());
        assert_eq!(out, buf);
    }

    #[test]
    fn second_basic_id_with_new_id_type_takes_second_slot() {
        let mut uas = UasData::new();
        let mut first = [0u8; MESSAGE_SIZE];
        Message::BasicId(sample_basic_id()).encode(&mut first).unwrap();
        uas.ingest_message(&first).unwrap();

        let other = BasicId { id_type: IdType::UtmUuid, ..sample_basic_id() };
        let mut second = [0u8; MESSAGE_SIZE];
        Message::BasicId(other).encode(&mut second).unwrap();
        uas.ingest_message(&second).unwrap();

        assert_eq!(uas.basic_id[0].unwrap().id_type, IdType::Serial);
        assert_eq!(uas.basic_id[1].unwrap().id_type, IdType::UtmUuid);
    }

    #[test]
    fn third_distinct_basic_id_has_no_free_slot() {
        let mut uas = UasData::new();
        for id_type in [IdType::Serial, IdType::UtmUuid, IdType::CaaRegistration] {
            let msg = BasicId { id_type, ..sample_basic_id() };
            let mut buf = [0u8; MESSAGE_SIZE];
            Message::BasicId(msg).encode(&mut buf).unwrap();
            let result = uas.ingest_message(&buf);
            if id_type == IdType::CaaRegistration {
                assert!(matches!(result, Err(Error::NoFreeSlot)));
            } else {
                result.unwrap();
            }
        }
    }

    #[test]
    fn to_message_pack_sets_five_validity_bits_round_trip() {
        let mut uas = UasData::new();
        let mut buf = [0u8; MESSAGE_SIZE];

        Message::BasicId(sample_basic_id()).encode(&mut buf).unwrap();
        uas.ingest_message(&buf).unwrap();
        Message::Location(sample_location()).encode(&mut buf).unwrap();
        uas.ingest_message(&buf).unwrap();
        let self_id =
            SelfId { desc_type: 0, description: { let mut d = [0u8; 23]; d[0] = b'X'; d } };
        Message::SelfId(self_id).encode(&mut buf).unwrap();
        uas.ingest_message(&buf).unwrap();
        let system = System {
            operator_location_type: crate::message::OperatorLocationType::TakeOff,
            operator_latitude: 1.0,
            operator_longitude: 1.0,
            area_count: 1,
            area_radius: 10.0,
            area_ceiling: 100.0,
            area_floor: 0.0,
            category_eu: 1,
            class_eu: 1,
            operator_altitude_geo: 100.0,
            timestamp: 1_000,
        };
        Message::System(system).encode(&mut buf).unwrap();
        uas.ingest_message(&buf).unwrap();
        let operator_id =
            OperatorId { operator_id_type: 0, operator_id: { let mut d = [0u8; 20]; d[0] = b'Y'; d } };
        Message::OperatorId(operator_id).encode(&mut buf).unwrap();
        uas.ingest_message(&buf).unwrap();

        let (packed, used) = uas.to_message_pack().unwrap();
        assert_eq!(packed[2], 5);

        let mut fresh = UasData::new();
        fresh.ingest_pack(&packed[..used]).unwrap();
        assert!(fresh.basic_id[0].is_some());
        assert!(fresh.location.is_some());
        assert!(fresh.self_id.is_some());
        assert!(fresh.system.is_some());
        assert!(fresh.operator_id.is_some());
    }

    #[test]
    fn encode_system_propagates_out_of_range_field_instead_of_encoding_stale_bytes() {
        let mut uas = UasData::new();
        uas.system = Some(System {
            operator_location_type: crate::message::OperatorLocationType::TakeOff,
            operator_latitude: 0.0,
            operator_longitude: 0.0,
            area_count: 0,
            area_radius: 0.0,
            area_ceiling: 0.0,
            area_floor: 0.0,
            category_eu: 0xFF,
            class_eu: 0,
            operator_altitude_geo: 0.0,
            timestamp: 0,
        });
        let mut out = [0xAAu8; MESSAGE_SIZE];
        let err = uas.encode_system(&mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidEnum { field: "System.category_eu", value: 0xFF }));
        assert_eq!(out, [0xAAu8; MESSAGE_SIZE]);
    }
}
