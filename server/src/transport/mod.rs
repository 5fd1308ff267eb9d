//! Moving-platform transport entity (folder-based).
//!
//! Layout:
//! - `motion.rs`: per-tick state machine (progress clock, keyframe cursors, stop/start, events)
//! - `passengers.rs`: dynamic/static passenger registry and static-passenger spawning
//! - `sync.rs`: pushes the transport pose to itself and every passenger
//! - `teleport.rs`: same-map reposition vs cross-map teleport
//!
//! This `mod.rs` owns the `Transport` struct, its creation and its accessors.
//!
//! Notes:
//! - Every mutating call takes a [`TransportContext`]; a transport never reaches the world
//!   any other way.
//! - A transport must be [`despawn`](Transport::despawn)ed before it is dropped. Dropping one
//!   that still holds passengers is a logic error (debug assertion + error log).

mod motion;
mod passengers;
mod sync;
mod teleport;

pub use teleport::MapChange;

use crate::{
    error::TransportError,
    passenger::PassengerSet,
    registry::{TemplateRegistry, TransportInfo},
    settings::TransportSettings,
    world::TransportContext,
};
use shared::{IntervalTimer, MapId, ObjectGuid, PathTemplate, Pose, is_valid_map_coord};
use std::sync::Arc;

/// Game-object state mirrored to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoState {
    /// Running, and may be halted on request.
    Active,
    /// Halted on request, or a transport that can never be halted.
    Ready,
}

pub struct Transport {
    guid: ObjectGuid,
    info: TransportInfo,
    template: Arc<PathTemplate>,

    map_id: MapId,
    pose: Pose,
    in_world: bool,
    go_state: GoState,
    anim_progress: u32,

    /// Milliseconds of travel, never reduced. `% period` gives the path timer.
    path_progress: u64,
    current_frame: usize,
    next_frame: usize,
    is_moving: bool,
    pending_stop: bool,
    delayed_add_model: bool,
    position_timer: IntervalTimer,
    position_update_delay_ms: u32,

    passengers: PassengerSet,
    static_passengers: PassengerSet,
}

impl Transport {
    /// Build a transport of type `entry` at `pose`. It is not in any map until
    /// [`add_to_world`](Self::add_to_world).
    pub fn create(
        registry: &TemplateRegistry,
        settings: &TransportSettings,
        guid: ObjectGuid,
        entry: u32,
        map_id: MapId,
        pose: Pose,
        anim_progress: u32,
    ) -> Result<Self, TransportError> {
        if !is_valid_map_coord(pose.x(), pose.y(), pose.z()) {
            log::error!(
                "Transport (guid {guid}) not created. Suggested coordinates are not valid (x {}, y {})",
                pose.x(),
                pose.y()
            );
            return Err(TransportError::InvalidCoordinates {
                guid,
                x: pose.x(),
                y: pose.y(),
            });
        }

        let Some(info) = registry.info(entry) else {
            log::error!(
                "Transport not created: no game object template for entry {entry}, guid {guid}, map {map_id}"
            );
            return Err(TransportError::MissingGameObjectTemplate { guid, entry });
        };

        let Some(template) = registry.path(entry) else {
            log::error!(
                "Transport {entry} (name: {}) will not be created, missing transport template",
                info.name
            );
            return Err(TransportError::MissingTransportTemplate {
                entry,
                name: info.name.clone(),
            });
        };

        let frame_count = template.keyframes().len();
        let go_state = if info.can_be_stopped {
            GoState::Active
        } else {
            GoState::Ready
        };

        Ok(Self {
            guid,
            info: info.clone(),
            template,
            map_id,
            pose,
            in_world: false,
            go_state,
            anim_progress,
            path_progress: 0,
            current_frame: 0,
            next_frame: 1 % frame_count.max(1),
            is_moving: true,
            pending_stop: false,
            delayed_add_model: false,
            position_timer: IntervalTimer::default(),
            position_update_delay_ms: settings.position_update_delay_ms,
            passengers: PassengerSet::default(),
            static_passengers: PassengerSet::default(),
        })
    }

    /// Put the transport into its map. The collision model follows on the first tick.
    pub fn add_to_world(&mut self, ctx: &mut TransportContext<'_>) -> Result<(), TransportError> {
        if self.in_world {
            return Ok(());
        }
        if !ctx.maps.ensure_map(self.map_id) {
            log::error!("Transport {} ({}): map {} is not available", self.entry(), self.name(), self.map_id);
            return Err(TransportError::MapUnavailable { map_id: self.map_id });
        }

        ctx.maps.add_transport(self.map_id, self.guid, &self.pose);
        self.in_world = true;
        self.delayed_add_model = true;
        log::info!(
            "Transport {} ({}) added to map {} at ({}, {}, {})",
            self.entry(),
            self.name(),
            self.map_id,
            self.pose.x(),
            self.pose.y(),
            self.pose.z()
        );
        Ok(())
    }

    /// Detach every passenger and leave the map. Required before drop.
    pub fn despawn(&mut self, ctx: &mut TransportContext<'_>) {
        self.cleanup_before_delete(ctx);
        if self.in_world {
            ctx.maps.remove_transport(self.map_id, self.guid);
            self.in_world = false;
        }
        log::info!("Transport {} ({}) despawned", self.entry(), self.name());
    }

    /// Unload static passengers, then remove every dynamic one.
    pub fn cleanup_before_delete(&mut self, ctx: &mut TransportContext<'_>) {
        self.unload_static_passengers(ctx);
        while let Some(guid) = self.passengers.first() {
            self.remove_passenger(ctx, guid);
        }
    }

    #[inline]
    pub fn guid(&self) -> ObjectGuid {
        self.guid
    }

    #[inline]
    pub fn entry(&self) -> u32 {
        self.info.entry
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[inline]
    pub fn info(&self) -> &TransportInfo {
        &self.info
    }

    #[inline]
    pub fn template(&self) -> &Arc<PathTemplate> {
        &self.template
    }

    #[inline]
    pub fn map_id(&self) -> MapId {
        self.map_id
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn is_in_world(&self) -> bool {
        self.in_world
    }

    #[inline]
    pub fn go_state(&self) -> GoState {
        self.go_state
    }

    #[inline]
    pub fn anim_progress(&self) -> u32 {
        self.anim_progress
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    #[inline]
    pub fn is_stop_pending(&self) -> bool {
        self.pending_stop
    }

    #[inline]
    pub fn path_progress(&self) -> u64 {
        self.path_progress
    }

    /// Period in milliseconds.
    #[inline]
    pub fn period(&self) -> u32 {
        self.template.path_time()
    }

    /// Position within the current period, in milliseconds.
    pub fn path_timer(&self) -> u32 {
        match self.period() {
            0 => 0,
            period => (self.path_progress % period as u64) as u32,
        }
    }

    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    #[inline]
    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    #[inline]
    pub fn passengers(&self) -> &PassengerSet {
        &self.passengers
    }

    #[inline]
    pub fn static_passengers(&self) -> &PassengerSet {
        &self.static_passengers
    }

    /// Transport-local pose to world.
    #[inline]
    pub fn passenger_world_pose(&self, offset: &Pose) -> Pose {
        self.pose.to_world(offset)
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        if self.passengers.is_empty() && self.static_passengers.is_empty() {
            return;
        }
        log::error!(
            "Transport {} ({}) dropped with {} passengers and {} static passengers",
            self.entry(),
            self.name(),
            self.passengers.len(),
            self.static_passengers.len()
        );
        if cfg!(debug_assertions) && !std::thread::panicking() {
            panic!("transport {} dropped before despawn", self.guid);
        }
    }
}
