//! Per-tick motion state machine.
//!
//! Each tick:
//! 1. advance the progress clock (unless halted on request),
//! 2. inside the current frame's dwell window: fire the arrival event once and stop,
//! 3. outside it while stopped: fire the departure event once and start moving,
//! 4. past the outgoing leg's travel window: step the cursors (teleporting at map boundaries),
//! 5. otherwise push an interpolated pose every `position_update_delay_ms`.
//!
//! A map-boundary step whose teleport fails is undone, so the transport waits at the
//! boundary on its old map until the destination becomes available.
//!
//! Skipping more than one keyframe boundary in a single tick loses the skipped frames' events.
//! The tick driver clamps `diff` to keep that from happening in practice.

use super::{GoState, Transport};
use crate::{passenger::PassengerKind, world::TransportContext};
use shared::{KeyFrame, Pose, facing_from_tangent, segment_position};
use std::sync::Arc;

impl Transport {
    /// Advance the transport by `diff_ms` of simulation time.
    pub fn update(&mut self, ctx: &mut TransportContext<'_>, diff_ms: u32) {
        let template = Arc::clone(&self.template);
        if template.is_stationary() {
            return;
        }

        if self.is_moving || !self.pending_stop {
            self.path_progress += diff_ms as u64;
        }

        let period = template.path_time() as u64;
        let timer = (self.path_progress % period) as u32;
        let frame = template.keyframe(self.current_frame);

        let mut stop_frame = false;
        let mut next_waypoint = true;

        if frame.in_stop_window(timer) {
            if self.is_moving {
                self.do_event_if_any(ctx, frame, false);
                self.set_moving(ctx, false);

                if self.pending_stop && self.go_state != GoState::Ready {
                    self.go_state = GoState::Ready;
                    self.path_progress =
                        (self.path_progress / period) * period + frame.arrive_time as u64;
                }
            }

            stop_frame = true;
            next_waypoint = false;
        }

        if !stop_frame {
            if !self.is_moving {
                self.do_event_if_any(ctx, frame, true);
                self.set_moving(ctx, true);

                if self.info.can_be_stopped {
                    self.go_state = GoState::Active;
                }
            }

            if frame.in_travel_window(timer) {
                next_waypoint = false;
            }
        }

        if next_waypoint {
            let cursors = (self.current_frame, self.next_frame);
            self.move_to_next_waypoint();

            let current = template.keyframe(self.current_frame);
            let node_pose = Pose {
                position: current.node.position,
                orientation: current.initial_orientation,
            };
            ctx.scripts
                .on_relocate(self.guid, current.node.index, current.map_id(), &node_pose);

            log::debug!(
                "Transport {} ({}) moved to node {} {} {} {} {}",
                self.entry(),
                self.name(),
                current.node.index,
                current.map_id(),
                node_pose.x(),
                node_pose.y(),
                node_pose.z()
            );

            if current.is_teleport_frame() {
                let next = template.keyframe(self.next_frame);
                let destination = Pose {
                    position: next.node.position,
                    orientation: next.initial_orientation,
                };
                // Park before the boundary and retry on the next tick.
                if self.teleport_transport(ctx, next.map_id(), destination).is_err() {
                    (self.current_frame, self.next_frame) = cursors;
                }
            }
            return;
        }

        if self.delayed_add_model {
            self.delayed_add_model = false;
            ctx.maps.insert_transport_model(self.map_id, self.guid);
        }

        self.position_timer.update(diff_ms);
        if self.position_timer.passed() {
            self.position_timer.reset(self.position_update_delay_ms);

            if self.is_moving {
                if let Some(pose) = self.interpolated_pose(frame, timer) {
                    self.update_position(ctx, pose);
                }
            } else {
                let grid_active = ctx
                    .maps
                    .is_grid_loaded(self.map_id, self.pose.x(), self.pose.y());

                if self.static_passengers.is_empty() && grid_active {
                    self.load_static_passengers(ctx);
                } else if !self.static_passengers.is_empty() && !grid_active {
                    self.unload_static_passengers(ctx);
                }
            }
        }

        ctx.scripts.on_update(self.guid, diff_ms);
    }

    /// Request a halt at the next arrival (`false`) or clear that request (`true`).
    ///
    /// Only transports that can be stopped honour this.
    pub fn enable_movement(&mut self, enabled: bool) {
        if !self.info.can_be_stopped {
            return;
        }
        self.pending_stop = !enabled;
    }

    fn interpolated_pose(&self, frame: &KeyFrame, timer: u32) -> Option<Pose> {
        let segment = frame.segment.as_ref()?;
        let t = segment_position(&self.template, frame, timer as f32 * 0.001);
        let position = segment.evaluate_percent(t);
        let orientation = facing_from_tangent(&segment.evaluate_derivative(t))
            .unwrap_or(self.pose.orientation);
        Some(Pose::new(position.x, position.y, position.z, orientation))
    }

    fn move_to_next_waypoint(&mut self) {
        let frame_count = self.template.keyframes().len();
        self.current_frame = self.next_frame;
        self.next_frame = (self.next_frame + 1) % frame_count;
    }

    fn set_moving(&mut self, ctx: &mut TransportContext<'_>, moving: bool) {
        self.is_moving = moving;

        for guid in self.static_passengers.iter().chain(self.passengers.iter()) {
            if ctx.maps.passenger_kind(guid) == Some(PassengerKind::Creature) {
                ctx.maps.set_creature_moving(guid, moving);
            }
        }
    }

    fn do_event_if_any(&mut self, ctx: &mut TransportContext<'_>, frame: &KeyFrame, departure: bool) {
        let Some(event_id) = frame.event_id(departure) else {
            return;
        };

        log::debug!(
            "Transport {} {} event {} of node {}",
            self.name(),
            if departure { "departure" } else { "arrival" },
            event_id,
            frame.node.index
        );
        ctx.maps.start_event_scripts(self.map_id, event_id, self.guid);
        ctx.scripts.on_event_inform(self.guid, event_id);
    }
}
