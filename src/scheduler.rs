//! Ring-buffer transmission scheduler.
//!
//! Cycles through a fixed-size sequence of message-type tags, re-encoding the
//! currently stored message of each tag on every `tick`. Location occupies every
//! other slot so it gets transmitted twice as often as anything else, keeping a
//! caller that ticks fast enough inside `BC_MIN_STATIC_REFRESH_RATE`.

use crate::aggregate::UasData;
use crate::error::Result;
use crate::message::{MAX_AUTH_PAGES, MAX_BASIC_ID, MESSAGE_SIZE};
use crate::scalar::BC_MIN_STATIC_REFRESH_RATE_S;

/// One ring position: which message kind to re-encode when the cursor reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSlot {
    BasicId,
    Location,
    Auth,
    SelfId,
    System,
    OperatorId,
}

/// A fixed-length ring of [`ScheduleSlot`]s plus the cursors needed to round-robin
/// over multi-valued slots (several Basic IDs, several Authentication pages).
///
/// The cursor is an explicit field rather than function-local static state, so a
/// caller can run several independent broadcasters concurrently, each with its own
/// `Scheduler`.
#[derive(Debug, Clone)]
pub struct Scheduler<const N: usize> {
    ring: [ScheduleSlot; N],
    cursor: usize,
    auth_cursor: usize,
    basic_id_cursor: usize,
}

impl<const N: usize> Scheduler<N> {
    /// Build a scheduler from an explicit ring layout.
    pub fn new(ring: [ScheduleSlot; N]) -> Self {
        Self { ring, cursor: 0, auth_cursor: 0, basic_id_cursor: 0 }
    }

    /// Number of positions in the ring.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// The shortest interval a caller may safely wait between ticks while still
    /// keeping Location's refresh rate within `BC_MIN_STATIC_REFRESH_RATE`.
    pub fn min_tick_interval_seconds(&self) -> f64 {
        if N == 0 {
            BC_MIN_STATIC_REFRESH_RATE_S
        } else {
            BC_MIN_STATIC_REFRESH_RATE_S / N as f64
        }
    }

    /// Re-encode the scheduled message kind at the current cursor into `out`, then
    /// advance the cursor modulo the ring size.
    ///
    /// Returns whether a message was actually copied; an empty slot (no message of
    /// that kind has ever been ingested or set) is skipped, `out` left untouched,
    /// and the cursor still advances. An out-of-range field on the stored message
    /// surfaces as `Err` rather than being swallowed; the cursor still advances so
    /// one bad slot doesn't stall every later one.
    pub fn tick(&mut self, uas: &UasData, out: &mut [u8; MESSAGE_SIZE]) -> Result<bool> {
        if N == 0 {
            return Ok(false);
        }
        let slot = self.ring[self.cursor];
        let result = match slot {
            ScheduleSlot::BasicId => {
                let index = self.basic_id_cursor % MAX_BASIC_ID;
                self.basic_id_cursor = self.basic_id_cursor.wrapping_add(1);
                uas.encode_basic_id(index, out)
            }
            ScheduleSlot::Location => uas.encode_location(out),
            ScheduleSlot::Auth => {
                let index = self.auth_cursor % MAX_AUTH_PAGES;
                self.auth_cursor = self.auth_cursor.wrapping_add(1);
                uas.encode_auth(index, out)
            }
            ScheduleSlot::SelfId => uas.encode_self_id(out),
            ScheduleSlot::System => uas.encode_system(out),
            ScheduleSlot::OperatorId => uas.encode_operator_id(out),
        };
        self.cursor = (self.cursor + 1) % N;
        match result {
            Ok(false) => log::debug!("scheduler skipped empty {slot:?} slot"),
            Err(e) => log::warn!("scheduler failed to encode {slot:?} slot: {e}"),
            Ok(true) => {}
        }
        result
    }
}

/// The canonical 18-slot ring: `2 * (4 + MAX_AUTH_PAGES)`, one Location between every
/// other message kind, with every Authentication page visited in round-robin.
pub fn standard() -> Scheduler<18> {
    use ScheduleSlot::*;
    Scheduler::new([
        BasicId, Location, Auth, Location, Auth, Location, Auth, Location, Auth, Location, Auth,
        Location, SelfId, Location, System, Location, OperatorId, Location,
    ])
}
