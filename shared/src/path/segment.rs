use super::{KeyFrame, PathTemplate};
use crate::constants::{DIST_EPS, IN_MILLISECONDS};

/// Normalized position `[0, 1]` along `frame`'s outgoing leg at path time `timer_secs`.
///
/// The leg is driven by the template kinematics: accelerate away from the previous stop,
/// cruise, brake into the next stop. Elapsed time is measured from `frame.departure_time`.
/// Pass-through frames pick up the profile where the previous frame left it, via
/// `time_from` / `time_to`.
///
/// Returns `0.0` for legs with no length (map-crossing frames).
pub fn segment_position(template: &PathTemplate, frame: &KeyFrame, timer_secs: f32) -> f32 {
    let leg = frame.next_dist_from_prev;
    if leg <= DIST_EPS {
        return 0.0;
    }

    let kinematics = template.kinematics();
    let elapsed = timer_secs - frame.departure_time as f32 / IN_MILLISECONDS as f32;
    let since_stop = frame.time_from + elapsed;
    let until_stop = frame.time_to - elapsed;

    let position = if since_stop < until_stop {
        kinematics.distance_from_stop(since_stop.max(0.0)) - frame.dist_since_stop
    } else {
        frame.dist_until_stop - kinematics.distance_from_stop(until_stop.max(0.0))
    };

    (position / leg).clamp(0.0, 1.0)
}
