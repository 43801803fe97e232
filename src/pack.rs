//! The Message Pack container: a header plus a run of pre-encoded 25-byte messages.

use deku::prelude::*;

use crate::error::{Error, Result};
use crate::message::{self, MessageType, MESSAGE_SIZE};

/// Upper bound on messages a single pack can carry: two Basic ID slots, one Location,
/// every Authentication page, one Self ID, one System and one Operator ID.
pub const MAX_PACK_MESSAGES: usize = 11;

/// Three header bytes, `MAX_PACK_MESSAGES` message slots, and a three-byte reserved tail.
pub const PACK_BUFFER_SIZE: usize = 3 + MAX_PACK_MESSAGES * MESSAGE_SIZE + 3;

/// The pack's three leading bytes. Unlike the message bodies this crate hand-rolls,
/// none of these bytes share bits between unrelated fields, so there's no LSB/MSB
/// ordering hazard and a plain derive is the right tool.
#[derive(Debug, PartialEq, Eq, DekuRead, DekuWrite)]
pub struct PackHeader {
    pub prefix: u8,
    pub single_message_size: u8,
    pub msg_pack_size: u8,
}

/// Build a message pack from a run of already-encoded 25-byte messages.
///
/// Returns the fixed-size wire buffer together with the number of leading bytes that
/// are meaningful (the header, the supplied slots, and nothing past them); trailing
/// slots and the reserved tail are left zeroed.
pub fn encode(slots: &[[u8; MESSAGE_SIZE]]) -> Result<([u8; PACK_BUFFER_SIZE], usize)> {
    if slots.len() > MAX_PACK_MESSAGES {
        return Err(Error::TooManyMessages { count: slots.len() });
    }
    let header = PackHeader {
        prefix: message::prefix_byte(MessageType::MessagePack),
        single_message_size: MESSAGE_SIZE as u8,
        msg_pack_size: slots.len() as u8,
    };
    let header_bytes =
        header.to_bytes().map_err(|_| Error::InvalidArgument("pack header failed to encode"))?;

    let mut buf = [0u8; PACK_BUFFER_SIZE];
    buf[..header_bytes.len()].copy_from_slice(&header_bytes);
    for (i, slot) in slots.iter().enumerate() {
        let start = 3 + i * MESSAGE_SIZE;
        buf[start..start + MESSAGE_SIZE].copy_from_slice(slot);
    }
    Ok((buf, 3 + slots.len() * MESSAGE_SIZE))
}

/// A parsed view over a decoded message pack's header and message slots.
pub struct PackView<'a> {
    count: usize,
    body: &'a [u8],
}

impl<'a> PackView<'a> {
    /// Number of message slots this pack carries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `index`-th 25-byte slot, or `None` past the end of the pack.
    pub fn slot(&self, index: usize) -> Option<[u8; MESSAGE_SIZE]> {
        if index >= self.count {
            return None;
        }
        let start = index * MESSAGE_SIZE;
        let mut out = [0u8; MESSAGE_SIZE];
        out.copy_from_slice(&self.body[start..start + MESSAGE_SIZE]);
        Some(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = [u8; MESSAGE_SIZE]> + '_ {
        (0..self.count).map(move |i| self.slot(i).expect("index within bounds"))
    }
}

/// Validate a message pack's header and return a view over its message slots.
///
/// Rejects a pack whose `single_message_size` is not 25, or whose declared slot
/// count exceeds `MAX_PACK_MESSAGES`; does not itself decode the individual slots,
/// since that dispatch belongs to [`crate::aggregate::UasData::ingest_message`].
pub fn decode(buf: &[u8]) -> Result<PackView<'_>> {
    if buf.len() < 3 {
        return Err(Error::InvalidArgument("pack buffer shorter than its header"));
    }
    let (_, header) = PackHeader::from_bytes((buf, 0))
        .map_err(|_| Error::InvalidArgument("pack header failed to decode"))?;
    if header.single_message_size != MESSAGE_SIZE as u8 {
        return Err(Error::InvalidSize { got: header.single_message_size });
    }
    let count = header.msg_pack_size as usize;
    if count > MAX_PACK_MESSAGES {
        return Err(Error::TooManyMessages { count });
    }
    let needed = 3 + count * MESSAGE_SIZE;
    if buf.len() < needed {
        return Err(Error::InvalidArgument("pack buffer shorter than its declared slot count"));
    }
    Ok(PackView { count, body: &buf[3..needed] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_literal_scenario() {
        let slots = [[0u8; MESSAGE_SIZE]; 5];
        let (buf, used) = encode(&slots).unwrap();
        assert_eq!(&buf[0..3], &[0xF0 | message::PROTOCOL_VERSION, 25, 5]);
        assert_eq!(used, 3 + 5 * MESSAGE_SIZE);
    }

    #[test]
    fn header_round_trips_through_deku() {
        let header = PackHeader { prefix: 0xF0, single_message_size: 25, msg_pack_size: 5 };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes, [0xF0, 25, 5]);
        let (_, decoded) = PackHeader::from_bytes((&bytes, 0)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn too_many_messages_is_rejected() {
        let slots = [[0u8; MESSAGE_SIZE]; MAX_PACK_MESSAGES + 1];
        assert!(matches!(encode(&slots), Err(Error::TooManyMessages { .. })));
    }

    #[test]
    fn decode_rejects_wrong_single_message_size() {
        let mut buf = [0u8; 10];
        buf[1] = 24;
        assert!(matches!(decode(&buf), Err(Error::InvalidSize { got: 24 })));
    }

    #[test]
    fn round_trip_preserves_slot_bytes() {
        let mut slots = [[0u8; MESSAGE_SIZE]; 2];
        slots[0][0] = 0x02;
        slots[1][0] = 0x12;
        let (buf, used) = encode(&slots).unwrap();
        let view = decode(&buf[..used]).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.slot(0).unwrap()[0], 0x02);
        assert_eq!(view.slot(1).unwrap()[0], 0x12);
    }
}
