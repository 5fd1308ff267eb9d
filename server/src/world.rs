//! Collaborator interfaces consumed by transports.
//!
//! This module is responsible for:
//! - [`MapService`]: map/grid management, per-kind relocation, object queries and spawning.
//! - [`SpawnDataStore`]: static-passenger spawn definitions bound to a transport's map.
//! - [`TransportScripts`]: fire-and-forget script hooks (all default to no-ops).
//! - [`TransportContext`]: the three bundled for one call, passed like a reducer context.
//!
//! Design notes
//! - The world owns every object. Transports only see guids and go through these traits.
//! - Relocation calls must be pure repositioning. A generic teleport would strip auras and
//!   reset movement, which riding a transport must never do.
//! - Nothing here is async; every call completes before returning.

use crate::{
    passenger::{MovementInfo, PassengerKind},
    summon::SummonRequest,
};
use shared::{MapId, ObjectGuid, Pose};

/// Region/grid service plus the entity operations a transport needs.
pub trait MapService {
    // --- maps ---

    /// Create-or-fetch a map. Returns `false` if it cannot be hosted.
    fn ensure_map(&mut self, map_id: MapId) -> bool;
    /// Is the streaming grid containing `(x, y)` loaded?
    fn is_grid_loaded(&self, map_id: MapId, x: f32, y: f32) -> bool;
    fn add_transport(&mut self, map_id: MapId, transport: ObjectGuid, pose: &Pose);
    fn remove_transport(&mut self, map_id: MapId, transport: ObjectGuid);
    /// Insert the transport's collision model into the map's dynamic tree.
    fn insert_transport_model(&mut self, map_id: MapId, transport: ObjectGuid);
    fn start_event_scripts(&mut self, map_id: MapId, event_id: u32, source: ObjectGuid);

    // --- object queries ---

    fn passenger_kind(&self, guid: ObjectGuid) -> Option<PassengerKind>;
    fn is_in_world(&self, guid: ObjectGuid) -> bool;
    fn map_of(&self, guid: ObjectGuid) -> Option<MapId>;
    fn position_of(&self, guid: ObjectGuid) -> Option<Pose>;
    fn movement_info(&self, guid: ObjectGuid) -> Option<&MovementInfo>;
    fn movement_info_mut(&mut self, guid: ObjectGuid) -> Option<&mut MovementInfo>;
    /// Vehicle the unit is seated on, if any.
    fn vehicle_base(&self, guid: ObjectGuid) -> Option<ObjectGuid>;
    /// The unit is itself a vehicle carrying passengers.
    fn has_vehicle_kit(&self, guid: ObjectGuid) -> bool;
    fn relocate_vehicle_passengers(&mut self, vehicle: ObjectGuid, pose: &Pose);
    fn set_creature_moving(&mut self, guid: ObjectGuid, moving: bool);
    fn set_home_position(&mut self, guid: ObjectGuid, pose: &Pose);

    // --- relocation ---

    fn creature_relocation(&mut self, guid: ObjectGuid, pose: &Pose);
    fn player_relocation(&mut self, guid: ObjectGuid, pose: &Pose);
    fn game_object_relocation(&mut self, guid: ObjectGuid, pose: &Pose);
    fn dynamic_object_relocation(&mut self, guid: ObjectGuid, pose: &Pose);
    /// Same-map teleport that the client is told about.
    fn near_teleport(&mut self, guid: ObjectGuid, pose: &Pose);
    /// Cross-map teleport keeping transport membership. `false` if it failed.
    fn teleport_player(&mut self, guid: ObjectGuid, map_id: MapId, pose: &Pose) -> bool;

    // --- spawning ---

    /// Build a creature from spawn data at `pose`, not yet added to the map.
    fn load_creature(&mut self, spawn_id: u32, map_id: MapId, pose: &Pose) -> Option<ObjectGuid>;
    /// Build a game object from spawn data at `pose`, not yet added to the map.
    fn load_game_object(&mut self, spawn_id: u32, map_id: MapId, pose: &Pose) -> Option<ObjectGuid>;
    fn summon_creature(&mut self, request: &SummonRequest) -> Option<ObjectGuid>;
    fn add_to_map(&mut self, guid: ObjectGuid) -> bool;
    /// Drop an object that never made it into a map.
    fn discard(&mut self, guid: ObjectGuid);
    /// Schedule an in-world object for destruction.
    fn remove_object(&mut self, guid: ObjectGuid);
}

/// Kind of object a static passenger spawns as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticPassengerKind {
    Creature,
    GameObject,
}

/// One static-passenger spawn definition. `offset` is in the transport's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticPassengerSpawn {
    pub spawn_id: u32,
    pub kind: StaticPassengerKind,
    pub offset: Pose,
}

pub trait SpawnDataStore {
    /// Every spawn bound to the transport map `map_id`.
    fn static_passengers(&self, map_id: MapId) -> Vec<StaticPassengerSpawn>;
}

/// Script hooks. Return values are never consumed.
#[allow(unused_variables)]
pub trait TransportScripts {
    fn on_add_passenger(&mut self, transport: ObjectGuid, player: ObjectGuid) {}
    fn on_remove_passenger(&mut self, transport: ObjectGuid, player: ObjectGuid) {}
    fn on_add_creature_passenger(&mut self, transport: ObjectGuid, creature: ObjectGuid) {}
    /// Node reached; the pose is the node's position.
    fn on_relocate(&mut self, transport: ObjectGuid, node_index: u32, map_id: MapId, pose: &Pose) {}
    fn on_update(&mut self, transport: ObjectGuid, diff_ms: u32) {}
    fn on_event_inform(&mut self, transport: ObjectGuid, event_id: u32) {}
}

/// Script hooks that ignore everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScripts;

impl TransportScripts for NoScripts {}

/// Collaborators for one transport call.
pub struct TransportContext<'a> {
    pub maps: &'a mut dyn MapService,
    pub spawns: &'a dyn SpawnDataStore,
    pub scripts: &'a mut dyn TransportScripts,
}

impl<'a> TransportContext<'a> {
    pub fn new(
        maps: &'a mut dyn MapService,
        spawns: &'a dyn SpawnDataStore,
        scripts: &'a mut dyn TransportScripts,
    ) -> Self {
        Self {
            maps,
            spawns,
            scripts,
        }
    }
}
