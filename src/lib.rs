#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/*!
`odid-deku` encodes and decodes Open Drone ID (ODID) broadcast remote-identification
messages, the 25-byte payloads used to identify unmanned aircraft over Bluetooth and
Wi-Fi. It does not touch the radio layer itself: callers hand it and take from it plain
byte buffers, and everything below that (beacon frames, NAN action frames, BLE
advertising) is someone else's concern.

# Message Support
|  Type         |  Module                    |
| ------------- | --------------------------- |
| Basic ID      | [`message::BasicId`]        |
| Location      | [`message::Location`]       |
| Authentication| [`message::Authentication`] |
| Self ID       | [`message::SelfId`]         |
| System        | [`message::System`]         |
| Operator ID   | [`message::OperatorId`]     |
| Message Pack  | [`pack`]                    |

# Example
```rust
use odid_deku::aggregate::UasData;
use odid_deku::message::{BasicId, IdType, Message, UaType};

let mut uas_id = [0u8; 20];
uas_id[..5].copy_from_slice(b"N1234");
let basic_id = BasicId { id_type: IdType::Serial, ua_type: UaType::Rotorcraft, uas_id };

let mut buf = [0u8; 25];
Message::BasicId(basic_id).encode(&mut buf).unwrap();

let mut uas = UasData::new();
uas.ingest_message(&buf).unwrap();
assert!(uas.basic_id[0].is_some());
```

A [`scheduler::Scheduler`] then cycles through whatever is stored in a [`aggregate::UasData`],
re-encoding one message per `tick` while keeping Location's refresh rate within
[`scalar::BC_MIN_STATIC_REFRESH_RATE_S`]. An [`adapter::InputAdapter`] can drive the same
aggregate from a separate, higher-level framed protocol instead of directly-constructed
messages.
*/

extern crate alloc;

pub mod adapter;
pub mod aggregate;
pub mod error;
pub mod message;
pub mod pack;
pub mod scalar;
pub mod scheduler;

pub use aggregate::UasData;
pub use error::{Error, Result};
pub use message::{Message, MessageType};
pub use scheduler::Scheduler;
