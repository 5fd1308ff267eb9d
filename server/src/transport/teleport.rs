//! Map-transition handler.

use super::Transport;
use crate::{error::TransportError, passenger::PassengerKind, world::TransportContext};
use shared::{MapId, Pose};

/// Outcome of [`Transport::teleport_transport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapChange {
    /// Repositioned inside the current map.
    Same,
    /// Moved to another map.
    Changed,
}

impl Transport {
    /// Move the transport to `destination` on `map_id`, taking passengers along.
    ///
    /// Cross-map: static passengers are unloaded (the destination respawns them), players
    /// are teleported and kept aboard when that succeeds, dynamic objects are destroyed and
    /// everything else is dropped off. Same map: players get an explicit near teleport, then
    /// the regular pose push runs.
    pub fn teleport_transport(
        &mut self,
        ctx: &mut TransportContext<'_>,
        map_id: MapId,
        destination: Pose,
    ) -> Result<MapChange, TransportError> {
        if self.map_id == map_id {
            for guid in self.passengers.iter() {
                if ctx.maps.passenger_kind(guid) != Some(PassengerKind::Player) {
                    continue;
                }
                let offset = ctx
                    .maps
                    .movement_info(guid)
                    .and_then(|m| m.seat)
                    .map(|s| s.offset)
                    .unwrap_or_default();
                ctx.maps.near_teleport(guid, &destination.to_world(&offset));
            }

            self.update_position(ctx, destination);
            return Ok(MapChange::Same);
        }

        if !ctx.maps.ensure_map(map_id) {
            log::error!(
                "Transport {} ({}) cannot teleport: map {map_id} is not available",
                self.entry(),
                self.name()
            );
            return Err(TransportError::MapUnavailable { map_id });
        }

        self.unload_static_passengers(ctx);
        ctx.maps.remove_transport(self.map_id, self.guid);
        self.map_id = map_id;

        self.passengers.begin_walk();
        while let Some(guid) = self.passengers.walk_next() {
            let seat = ctx.maps.movement_info(guid).and_then(|m| m.seat);
            let target = destination.to_world(&seat.map(|s| s.offset).unwrap_or_default());

            match ctx.maps.passenger_kind(guid) {
                Some(PassengerKind::Player) => {
                    if ctx.maps.is_in_world(guid) && ctx.maps.teleport_player(guid, map_id, &target) {
                        continue;
                    }
                    log::warn!(
                        "Player {guid} could not follow transport {} to map {map_id}, dropped off",
                        self.name()
                    );
                    self.remove_passenger(ctx, guid);
                }
                Some(PassengerKind::DynamicObject) => {
                    self.remove_passenger(ctx, guid);
                    ctx.maps.remove_object(guid);
                }
                _ => {
                    self.remove_passenger(ctx, guid);
                }
            }
        }
        self.passengers.end_walk();

        self.pose = destination;
        ctx.maps.add_transport(map_id, self.guid, &self.pose);
        Ok(MapChange::Changed)
    }
}
