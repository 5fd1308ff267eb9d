//! Position synchronizer.
//!
//! Relocates the transport, then every passenger to `transport pose ∘ seat offset`.
//! Static passengers follow the streaming state of the grid under the transport:
//! - grid became active and nothing is loaded: load them,
//! - grid is inactive and the transport crossed into another grid: unload them,
//! - otherwise: relocate them like everyone else.
//!
//! A grid unloading under a stopped transport is handled by the stopped branch of the tick.

use super::Transport;
use crate::{passenger::PassengerKind, world::TransportContext};
use shared::{Pose, differs_grid};

#[derive(Clone, Copy)]
enum Group {
    Dynamic,
    Static,
}

impl Transport {
    /// Move the transport to `pose` and drag every passenger along.
    pub fn update_position(&mut self, ctx: &mut TransportContext<'_>, pose: Pose) {
        let new_active = ctx.maps.is_grid_loaded(self.map_id, pose.x(), pose.y());
        let old_xy = (self.pose.x(), self.pose.y());

        self.pose = pose;
        self.relocate_passengers(ctx, Group::Dynamic);

        if self.static_passengers.is_empty() && new_active {
            self.load_static_passengers(ctx);
        } else if !self.static_passengers.is_empty()
            && !new_active
            && differs_grid(old_xy, (pose.x(), pose.y()))
        {
            self.unload_static_passengers(ctx);
        } else {
            self.relocate_passengers(ctx, Group::Static);
        }
    }

    fn relocate_passengers(&self, ctx: &mut TransportContext<'_>, group: Group) {
        let set = match group {
            Group::Dynamic => &self.passengers,
            Group::Static => &self.static_passengers,
        };

        for guid in set.iter() {
            if !ctx.maps.is_in_world(guid) {
                continue;
            }
            // Transport already teleported, passenger not yet (players in transit).
            if ctx.maps.map_of(guid) != Some(self.map_id) {
                continue;
            }
            // The vehicle it sits on moves it.
            if ctx.maps.vehicle_base(guid).is_some() {
                continue;
            }
            let Some(kind) = ctx.maps.passenger_kind(guid) else {
                continue;
            };
            let Some(seat) = ctx.maps.movement_info(guid).and_then(|m| m.seat) else {
                continue;
            };

            let world = self.pose.to_world(&seat.offset);
            match kind {
                PassengerKind::Creature => {
                    ctx.maps.creature_relocation(guid, &world);
                    if let Some(home) = seat.home_offset {
                        ctx.maps.set_home_position(guid, &self.pose.to_world(&home));
                    }
                }
                PassengerKind::Player => ctx.maps.player_relocation(guid, &world),
                PassengerKind::GameObject => ctx.maps.game_object_relocation(guid, &world),
                PassengerKind::DynamicObject => ctx.maps.dynamic_object_relocation(guid, &world),
            }

            if kind.is_unit() && ctx.maps.has_vehicle_kit(guid) {
                ctx.maps.relocate_vehicle_passengers(guid, &world);
            }
        }
    }
}
