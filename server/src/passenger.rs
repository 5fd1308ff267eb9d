//! Passenger-side data and the transport's membership sets.
//!
//! Passengers are owned by the world. A transport only holds their guids; the per-passenger
//! seat (back-reference + local offset) lives in [`MovementInfo`], which the world stores and
//! the transport edits through [`MapService`](crate::world::MapService).
//!
//! Notes:
//! - `PassengerSet` keeps an optional walk cursor pointing at the *next* member to visit.
//!   Removing that member advances the cursor first, so a walk survives removals issued
//!   from inside its own loop body.
//! - Sets are ordered by guid, which makes every walk deterministic.

use shared::{MovementFlag, MovementFlags, ObjectGuid, Pose};
use std::{
    collections::BTreeSet,
    ops::Bound::{Excluded, Unbounded},
};

/// Which relocation path a passenger takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassengerKind {
    Player,
    Creature,
    GameObject,
    /// Transient spell effect object. Cannot cross maps.
    DynamicObject,
}

impl PassengerKind {
    /// Players and creatures.
    #[inline]
    pub fn is_unit(self) -> bool {
        matches!(self, Self::Player | Self::Creature)
    }
}

/// Where a passenger sits on its transport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportSeat {
    pub transport: ObjectGuid,
    /// Pose in the transport's local frame.
    pub offset: Pose,
    /// Leash anchor in the transport's local frame (creatures only).
    pub home_offset: Option<Pose>,
}

/// Movement state of any world object, as far as transports are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInfo {
    pub flags: MovementFlags,
    pub seat: Option<TransportSeat>,
}

impl MovementInfo {
    pub fn board(&mut self, seat: TransportSeat) {
        self.flags.add(MovementFlag::OnTransport);
        self.seat = Some(seat);
    }

    pub fn leave(&mut self) {
        self.flags.remove(MovementFlag::OnTransport);
        self.seat = None;
    }

    #[inline]
    pub fn is_on_transport(&self) -> bool {
        self.flags.has(MovementFlag::OnTransport)
    }

    /// Transport this object rides, if any.
    #[inline]
    pub fn transport(&self) -> Option<ObjectGuid> {
        self.seat.map(|s| s.transport)
    }
}

/// Ordered guid set with a removal-safe walk cursor.
#[derive(Clone, Debug, Default)]
pub struct PassengerSet {
    members: BTreeSet<ObjectGuid>,
    cursor: Option<ObjectGuid>,
}

impl PassengerSet {
    /// Returns `false` if `guid` was already present.
    pub fn insert(&mut self, guid: ObjectGuid) -> bool {
        self.members.insert(guid)
    }

    /// Returns `false` if `guid` was not a member.
    pub fn remove(&mut self, guid: ObjectGuid) -> bool {
        if !self.members.contains(&guid) {
            return false;
        }
        if self.cursor == Some(guid) {
            self.cursor = self.successor(guid);
        }
        self.members.remove(&guid)
    }

    #[inline]
    pub fn contains(&self, guid: ObjectGuid) -> bool {
        self.members.contains(&guid)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<ObjectGuid> {
        self.members.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectGuid> + '_ {
        self.members.iter().copied()
    }

    /// Start a walk at the first member.
    pub fn begin_walk(&mut self) {
        self.cursor = self.first();
    }

    /// Member under the cursor; moves the cursor past it.
    pub fn walk_next(&mut self) -> Option<ObjectGuid> {
        let current = self.cursor?;
        self.cursor = self.successor(current);
        Some(current)
    }

    pub fn end_walk(&mut self) {
        self.cursor = None;
    }

    /// A walk is in progress and has members left.
    #[inline]
    pub fn walking(&self) -> bool {
        self.cursor.is_some()
    }

    fn successor(&self, guid: ObjectGuid) -> Option<ObjectGuid> {
        self.members.range((Excluded(guid), Unbounded)).next().copied()
    }
}
