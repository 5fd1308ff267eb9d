//! Path template generation.
//!
//! A template turns an ordered, cyclic list of [`PathNode`]s into [`KeyFrame`]s with:
//! - one Catmull-Rom leg per pair of consecutive nodes on the same map,
//! - stop frames (dwell delay, map-boundary frames and the first frame after one),
//! - distances since the previous / until the next stop,
//! - travel times from the acceleration → cruise → brake profile,
//! - arrival/departure timestamps in milliseconds over one period.
//!
//! The closing leg (last node → first node) is part of the cycle: the period is the time at
//! which the transport arrives back at frame 0.
//!
//! A single node produces a one-frame template; transports treat it as stationary.

use super::{KeyFrame, PathNode, TemplateError};
use crate::{
    constants::IN_MILLISECONDS,
    pose::facing_from_tangent,
    spline::SplineSegment,
};

/// Cruise speed and acceleration shared by every leg of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    /// Cruise speed in units per second.
    pub speed: f32,
    /// Acceleration (and braking) rate in units per second squared.
    pub accel: f32,
}

impl Kinematics {
    pub fn new(speed: f32, accel: f32) -> Result<Self, TemplateError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(speed) || !valid(accel) {
            return Err(TemplateError::InvalidKinematics { speed, accel });
        }
        Ok(Self { speed, accel })
    }

    /// Seconds needed to reach cruise speed from a stop.
    #[inline]
    pub fn accel_time(&self) -> f32 {
        self.speed / self.accel
    }

    /// Distance covered while reaching cruise speed from a stop.
    #[inline]
    pub fn accel_dist(&self) -> f32 {
        0.5 * self.speed * self.speed / self.accel
    }

    /// Distance covered `t` seconds after leaving (or before reaching) a stop.
    #[inline]
    pub fn distance_from_stop(&self, t: f32) -> f32 {
        let accel_time = self.accel_time();
        if t < accel_time {
            0.5 * self.accel * t * t
        } else {
            self.accel_dist() + (t - accel_time) * self.speed
        }
    }

    /// Seconds until the next stop for a frame `since` units past the previous stop and
    /// `until` units before the next one.
    fn time_until_stop(&self, since: f32, until: f32) -> f32 {
        let accel = self.accel;
        let speed = self.speed;
        let accel_dist = self.accel_dist();
        let total = since + until;

        if total < 2.0 * accel_dist {
            // Never reaches cruise speed: accelerate for half the leg, brake for the other half.
            if since < until {
                2.0 * (total / accel).sqrt() - (2.0 * since / accel).sqrt()
            } else {
                (2.0 * until / accel).sqrt()
            }
        } else if since < accel_dist {
            let leg_time = total / speed + speed / accel;
            leg_time - (2.0 * since / accel).sqrt()
        } else if until < accel_dist {
            (2.0 * until / accel).sqrt()
        } else {
            until / speed + 0.5 * speed / accel
        }
    }
}

/// Immutable, precomputed path of one transport type.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTemplate {
    pub entry: u32,
    keyframes: Vec<KeyFrame>,
    /// Period in milliseconds.
    path_time: u32,
    kinematics: Kinematics,
    accel_time: f32,
    accel_dist: f32,
}

impl PathTemplate {
    #[inline]
    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    #[inline]
    pub fn keyframe(&self, index: usize) -> &KeyFrame {
        &self.keyframes[index]
    }

    /// Total path period in milliseconds.
    #[inline]
    pub fn path_time(&self) -> u32 {
        self.path_time
    }

    #[inline]
    pub fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    #[inline]
    pub fn accel_time(&self) -> f32 {
        self.accel_time
    }

    #[inline]
    pub fn accel_dist(&self) -> f32 {
        self.accel_dist
    }

    /// Fewer than two keyframes: the transport never moves.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.keyframes.len() <= 1
    }

    /// Index of the frame whose window `[arrive, next_arrive)` contains `progress` (wrapped
    /// into the period).
    pub fn frame_at(&self, progress: u32) -> usize {
        if self.is_stationary() || self.path_time == 0 {
            return 0;
        }
        let timer = progress % self.path_time;
        self.keyframes
            .iter()
            .position(|f| timer >= f.arrive_time && timer < f.next_arrive_time)
            .unwrap_or(0)
    }

    /// Build a template from cyclic `nodes`.
    pub fn generate(
        entry: u32,
        nodes: &[PathNode],
        kinematics: Kinematics,
    ) -> Result<Self, TemplateError> {
        let n = nodes.len();
        if n == 0 {
            return Err(TemplateError::NoNodes);
        }
        if let Some(bad) = nodes.iter().find(|node| {
            !(node.position.x.is_finite() && node.position.y.is_finite() && node.position.z.is_finite())
        }) {
            return Err(TemplateError::InvalidNode { index: bad.index });
        }

        let prev = |i: usize| (i + n - 1) % n;
        let next = |i: usize| (i + 1) % n;

        // 1) Map boundaries and leg geometry.
        let is_teleport: Vec<bool> = (0..n)
            .map(|i| n > 1 && nodes[next(i)].map_id != nodes[i].map_id)
            .collect();

        let segments: Vec<Option<SplineSegment>> = (0..n)
            .map(|i| {
                if n < 2 || is_teleport[i] {
                    return None;
                }
                // With only two nodes, the neighbours would be the leg's own endpoints.
                let p0 = (n > 2 && !is_teleport[prev(i)]).then(|| nodes[prev(i)].position);
                let p3 = (n > 2 && !is_teleport[next(i)]).then(|| nodes[next(next(i))].position);
                Some(SplineSegment::new(
                    p0,
                    nodes[i].position,
                    nodes[next(i)].position,
                    p3,
                ))
            })
            .collect();

        let next_dist: Vec<f32> = segments
            .iter()
            .map(|s| s.as_ref().map_or(0.0, SplineSegment::length))
            .collect();
        let dist_from_prev: Vec<f32> = (0..n).map(|i| next_dist[prev(i)]).collect();

        // 2) Stop frames.
        let is_stop: Vec<bool> = (0..n)
            .map(|i| nodes[i].delay_secs > 0 || is_teleport[i] || is_teleport[prev(i)])
            .collect();

        if n == 1 {
            let delay_ms = nodes[0].delay_secs.saturating_mul(IN_MILLISECONDS);
            let frame = KeyFrame {
                index: 0,
                node: nodes[0].clone(),
                initial_orientation: 0.0,
                arrive_time: 0,
                departure_time: delay_ms,
                next_arrive_time: delay_ms,
                dist_since_stop: 0.0,
                dist_until_stop: 0.0,
                dist_from_prev: 0.0,
                next_dist_from_prev: 0.0,
                time_from: 0.0,
                time_to: 0.0,
                segment: None,
                is_stop: true,
                is_teleport: false,
            };
            return Ok(Self::assemble(entry, vec![frame], delay_ms, kinematics));
        }

        let (Some(first_stop), Some(last_stop)) = (
            is_stop.iter().position(|&s| s),
            is_stop.iter().rposition(|&s| s),
        ) else {
            return Err(TemplateError::NoStopFrame { count: n });
        };

        // 3) Distances since the previous / until the next stop.
        let mut dist_since_stop = vec![0.0f32; n];
        let mut acc = 0.0;
        for k in 0..n {
            let j = (k + last_stop) % n;
            if is_stop[j] {
                acc = 0.0;
            } else {
                acc += dist_from_prev[j];
            }
            dist_since_stop[j] = acc;
        }

        let mut dist_until_stop = vec![0.0f32; n];
        acc = 0.0;
        for k in (0..n).rev() {
            let j = (k + first_stop) % n;
            acc += dist_from_prev[next(j)];
            dist_until_stop[j] = acc;
            if is_stop[j] {
                acc = 0.0;
            }
        }

        // 4) Travel times.
        let time_to: Vec<f32> = (0..n)
            .map(|i| kinematics.time_until_stop(dist_since_stop[i], dist_until_stop[i]))
            .collect();

        let mut time_from = vec![0.0f32; n];
        let mut leg_time = 0.0;
        for k in 0..n {
            let j = (k + last_stop) % n;
            if is_stop[j] {
                leg_time = time_to[j];
            }
            time_from[j] = leg_time - time_to[j];
        }

        // 5) Timestamps over one period.
        let to_ms = |secs: f64| (secs * IN_MILLISECONDS as f64).round().max(0.0) as u32;
        let mut arrive = vec![0u32; n];
        let mut departure = vec![0u32; n];
        let mut next_arrive = vec![0u32; n];

        let mut cur = if is_stop[0] { nodes[0].delay_secs as f64 } else { 0.0 };
        departure[0] = to_ms(cur);
        for i in 1..n {
            cur += time_to[i - 1] as f64;
            if !is_stop[i] {
                cur -= time_to[i] as f64;
            }
            arrive[i] = to_ms(cur).max(departure[i - 1]);
            next_arrive[i - 1] = arrive[i];
            if is_stop[i] {
                cur += nodes[i].delay_secs as f64;
            }
            departure[i] = to_ms(cur).max(arrive[i]);
        }
        cur += time_to[n - 1] as f64;
        if !is_stop[0] {
            cur -= time_to[0] as f64;
        }
        let path_time = to_ms(cur).max(departure[n - 1]);
        next_arrive[n - 1] = path_time;

        if path_time == 0 {
            return Err(TemplateError::ZeroPeriod { count: n });
        }

        // 6) Facing at the start of each leg; map-boundary frames keep the incoming facing.
        let leaving_facing = |i: usize| -> Option<f32> {
            segments[i]
                .as_ref()
                .and_then(|s| facing_from_tangent(&s.evaluate_derivative(0.0)))
        };
        let arriving_facing = |i: usize| -> Option<f32> {
            segments[prev(i)]
                .as_ref()
                .and_then(|s| facing_from_tangent(&s.evaluate_derivative(1.0)))
        };

        let keyframes = (0..n)
            .map(|i| KeyFrame {
                index: i,
                node: nodes[i].clone(),
                initial_orientation: leaving_facing(i).or_else(|| arriving_facing(i)).unwrap_or(0.0),
                arrive_time: arrive[i],
                departure_time: departure[i],
                next_arrive_time: next_arrive[i],
                dist_since_stop: dist_since_stop[i],
                dist_until_stop: dist_until_stop[i],
                dist_from_prev: dist_from_prev[i],
                next_dist_from_prev: next_dist[i],
                time_from: time_from[i],
                time_to: time_to[i],
                segment: segments[i].clone(),
                is_stop: is_stop[i],
                is_teleport: is_teleport[i],
            })
            .collect();

        log::debug!(
            "Generated transport path {} with {} keyframes, period {} ms",
            entry,
            n,
            path_time
        );

        Ok(Self::assemble(entry, keyframes, path_time, kinematics))
    }

    fn assemble(entry: u32, keyframes: Vec<KeyFrame>, path_time: u32, kinematics: Kinematics) -> Self {
        Self {
            entry,
            keyframes,
            path_time,
            kinematics,
            accel_time: kinematics.accel_time(),
            accel_dist: kinematics.accel_dist(),
        }
    }
}
