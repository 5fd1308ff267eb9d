//! Passenger registry.
//!
//! Two disjoint sets:
//! - dynamic passengers board and leave on their own; the world owns them,
//! - static passengers are spawned by the transport from spawn data and destroyed by it.
//!
//! Static passengers are materialized lazily, while the grid under the transport is loaded.

use super::Transport;
use crate::{
    error::SpawnError,
    passenger::{PassengerKind, TransportSeat},
    summon::{SummonArgs, SummonRequest, summon_mask},
    world::{StaticPassengerKind, StaticPassengerSpawn, TransportContext},
};
use shared::{ObjectGuid, Pose, is_valid_map_coord};

impl Transport {
    /// Board `guid`, keeping its current world pose as the seat.
    pub fn add_passenger(&mut self, ctx: &mut TransportContext<'_>, guid: ObjectGuid) -> bool {
        let Some(world) = ctx.maps.position_of(guid) else {
            return false;
        };
        let offset = self.pose.to_local(&world);
        self.add_passenger_with_offset(ctx, guid, offset)
    }

    /// Board `guid` at an explicit transport-local `offset`.
    ///
    /// No-op (returns `false`) when the transport is not in world or `guid` already rides it.
    pub fn add_passenger_with_offset(
        &mut self,
        ctx: &mut TransportContext<'_>,
        guid: ObjectGuid,
        offset: Pose,
    ) -> bool {
        if !self.in_world || self.static_passengers.contains(guid) {
            return false;
        }
        if !self.passengers.insert(guid) {
            return false;
        }

        let is_creature = ctx.maps.passenger_kind(guid) == Some(PassengerKind::Creature);
        if let Some(info) = ctx.maps.movement_info_mut(guid) {
            info.board(TransportSeat {
                transport: self.guid,
                offset,
                home_offset: is_creature.then_some(offset),
            });
        }
        log::debug!("Object {guid} boarded transport {}", self.name());

        if ctx.maps.passenger_kind(guid) == Some(PassengerKind::Player) {
            ctx.scripts.on_add_passenger(self.guid, guid);
        }
        true
    }

    /// Remove `guid` from whichever set holds it. Safe during a teleport walk.
    pub fn remove_passenger(&mut self, ctx: &mut TransportContext<'_>, guid: ObjectGuid) -> bool {
        let erased = self.passengers.remove(guid) || self.static_passengers.remove(guid);
        if !erased {
            return false;
        }

        if let Some(info) = ctx.maps.movement_info_mut(guid) {
            info.leave();
        }
        log::debug!("Object {guid} removed from transport {}", self.name());

        if ctx.maps.passenger_kind(guid) == Some(PassengerKind::Player) {
            ctx.scripts.on_remove_passenger(self.guid, guid);
        }
        true
    }

    /// Spawn a creature static passenger.
    pub fn create_npc_passenger(
        &mut self,
        ctx: &mut TransportContext<'_>,
        spawn_id: u32,
        offset: Pose,
    ) -> Result<ObjectGuid, SpawnError> {
        log::debug!("Transport {}: create creature passenger from spawn {spawn_id}", self.name());
        if !self.in_world {
            log::error!(
                "Transport {}: cannot spawn passenger {spawn_id}, transport is not in world",
                self.name()
            );
            return Err(SpawnError::TransportNotInWorld);
        }

        let pose = self.pose.to_world(&offset);
        let Some(guid) = ctx.maps.load_creature(spawn_id, self.map_id, &pose) else {
            log::error!(
                "Transport {}: creature spawn {spawn_id} not loaded, spawn data could not be read",
                self.name()
            );
            return Err(SpawnError::NotLoaded { spawn_id });
        };

        ctx.maps.set_home_position(guid, &pose);
        self.place_static_passenger(ctx, guid, offset, Some(offset), &pose)?;
        ctx.scripts.on_add_creature_passenger(self.guid, guid);
        Ok(guid)
    }

    /// Spawn a game object static passenger.
    pub fn create_go_passenger(
        &mut self,
        ctx: &mut TransportContext<'_>,
        spawn_id: u32,
        offset: Pose,
    ) -> Result<ObjectGuid, SpawnError> {
        log::debug!("Transport {}: create game object passenger from spawn {spawn_id}", self.name());
        if !self.in_world {
            log::error!(
                "Transport {}: cannot spawn passenger {spawn_id}, transport is not in world",
                self.name()
            );
            return Err(SpawnError::TransportNotInWorld);
        }

        let pose = self.pose.to_world(&offset);
        let Some(guid) = ctx.maps.load_game_object(spawn_id, self.map_id, &pose) else {
            log::error!(
                "Transport {}: game object spawn {spawn_id} not loaded, spawn data could not be read",
                self.name()
            );
            return Err(SpawnError::NotLoaded { spawn_id });
        };

        self.place_static_passenger(ctx, guid, offset, None, &pose)?;
        Ok(guid)
    }

    /// Summon a temporary creature onto the transport. It is kept with the static passengers.
    pub fn summon_passenger(
        &mut self,
        ctx: &mut TransportContext<'_>,
        args: &SummonArgs,
    ) -> Result<ObjectGuid, SpawnError> {
        log::debug!(
            "Transport {}: summon creature entry {} at ({}, {}, {}) on map {}",
            self.name(),
            args.entry,
            args.offset.x(),
            args.offset.y(),
            args.offset.z(),
            self.map_id
        );
        if !self.in_world {
            log::error!("Transport {}: cannot summon, transport is not in world", self.name());
            return Err(SpawnError::TransportNotInWorld);
        }

        let Some(mask) = summon_mask(args.properties.as_ref()) else {
            log::error!(
                "Transport {}: summon of entry {} rejected, unsupported summon category",
                self.name(),
                args.entry
            );
            return Err(SpawnError::SummonRejected {
                entry: args.entry,
                reason: "unsupported summon category",
            });
        };

        let pose = self.pose.to_world(&args.offset);
        let request = SummonRequest {
            entry: args.entry,
            mask,
            map_id: self.map_id,
            pose,
            despawn_type: args.despawn_type,
            duration_ms: args.duration_ms,
            summoner: args.summoner,
            spell_id: args.spell_id,
            vehicle_id: args.vehicle_id,
        };
        let Some(guid) = ctx.maps.summon_creature(&request) else {
            log::error!(
                "Transport {}: creature entry {} not created",
                self.name(),
                args.entry
            );
            return Err(SpawnError::SummonRejected {
                entry: args.entry,
                reason: "creation failed",
            });
        };

        ctx.maps.set_home_position(guid, &pose);
        self.place_static_passenger(ctx, guid, args.offset, Some(args.offset), &pose)?;
        Ok(guid)
    }

    /// Spawn every static passenger bound to this transport. No-op once any are loaded.
    pub fn load_static_passengers(&mut self, ctx: &mut TransportContext<'_>) {
        let map_id = self.info.passenger_map_id;
        if map_id == 0 || !self.static_passengers.is_empty() {
            return;
        }

        for StaticPassengerSpawn {
            spawn_id,
            kind,
            offset,
        } in ctx.spawns.static_passengers(map_id)
        {
            // Each failure is logged where it happens; the rest still load.
            let _ = match kind {
                StaticPassengerKind::Creature => self.create_npc_passenger(ctx, spawn_id, offset),
                StaticPassengerKind::GameObject => self.create_go_passenger(ctx, spawn_id, offset),
            };
        }
    }

    /// Detach and destroy every static passenger.
    pub fn unload_static_passengers(&mut self, ctx: &mut TransportContext<'_>) {
        while let Some(guid) = self.static_passengers.first() {
            self.remove_passenger(ctx, guid);
            ctx.maps.remove_object(guid);
        }
    }

    /// Seat a freshly loaded object, validate it and put it in the map.
    fn place_static_passenger(
        &mut self,
        ctx: &mut TransportContext<'_>,
        guid: ObjectGuid,
        offset: Pose,
        home_offset: Option<Pose>,
        pose: &Pose,
    ) -> Result<(), SpawnError> {
        if let Some(info) = ctx.maps.movement_info_mut(guid) {
            info.board(TransportSeat {
                transport: self.guid,
                offset,
                home_offset,
            });
        }

        if !is_valid_map_coord(pose.x(), pose.y(), pose.z()) {
            log::error!(
                "Transport {}: passenger {guid} not created, coordinates are not valid (x {}, y {})",
                self.name(),
                pose.x(),
                pose.y()
            );
            ctx.maps.discard(guid);
            return Err(SpawnError::InvalidPosition {
                guid,
                x: pose.x(),
                y: pose.y(),
            });
        }

        if !ctx.maps.add_to_map(guid) {
            log::error!(
                "Transport {}: passenger {guid} not added to map {}",
                self.name(),
                self.map_id
            );
            ctx.maps.discard(guid);
            return Err(SpawnError::RejectedByMap {
                guid,
                map_id: self.map_id,
            });
        }

        self.static_passengers.insert(guid);
        Ok(())
    }
}
