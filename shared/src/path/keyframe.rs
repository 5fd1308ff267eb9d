use crate::{MapId, pose::Vec3, spline::SplineSegment};

/// One waypoint of a transport path as stored by the template source.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub index: u32,
    pub map_id: MapId,
    pub position: Vec3,
    /// Dwell time at this node in seconds; `0` means the transport passes through.
    pub delay_secs: u32,
    /// Event script started on arrival (`0` = none).
    pub arrival_event_id: u32,
    /// Event script started on departure (`0` = none).
    pub departure_event_id: u32,
}

impl PathNode {
    pub fn new(index: u32, map_id: MapId, x: f32, y: f32, z: f32) -> Self {
        Self {
            index,
            map_id,
            position: Vec3::new(x, y, z),
            delay_secs: 0,
            arrival_event_id: 0,
            departure_event_id: 0,
        }
    }

    pub fn with_delay(mut self, delay_secs: u32) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    pub fn with_events(mut self, arrival_event_id: u32, departure_event_id: u32) -> Self {
        self.arrival_event_id = arrival_event_id;
        self.departure_event_id = departure_event_id;
        self
    }
}

/// Precomputed timing and geometry for one node of a [`PathTemplate`](super::PathTemplate).
///
/// Times are milliseconds within the path period, distances are spline arc lengths.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFrame {
    /// Position of this frame in the template's sequence.
    pub index: usize,
    pub node: PathNode,
    /// Facing at the start of the outgoing leg.
    pub initial_orientation: f32,

    pub arrive_time: u32,
    pub departure_time: u32,
    /// Arrival time of the following frame; for the last frame this is the period.
    pub next_arrive_time: u32,

    pub dist_since_stop: f32,
    pub dist_until_stop: f32,
    /// Length of the incoming leg.
    pub dist_from_prev: f32,
    /// Length of the outgoing leg.
    pub next_dist_from_prev: f32,

    /// Seconds since the previous stop, measured at departure from this frame.
    pub time_from: f32,
    /// Seconds until the next stop, measured at departure from this frame.
    pub time_to: f32,

    /// Geometry of the outgoing leg; `None` when the leg crosses maps.
    pub segment: Option<SplineSegment>,

    pub(crate) is_stop: bool,
    pub(crate) is_teleport: bool,
}

impl KeyFrame {
    /// The transport dwells at this frame.
    #[inline]
    pub fn is_stop_frame(&self) -> bool {
        self.is_stop
    }

    /// Leaving this frame crosses into another map.
    #[inline]
    pub fn is_teleport_frame(&self) -> bool {
        self.is_teleport
    }

    #[inline]
    pub fn map_id(&self) -> MapId {
        self.node.map_id
    }

    /// Event to start for an arrival (`departure == false`) or a departure.
    #[inline]
    pub fn event_id(&self, departure: bool) -> Option<u32> {
        let id = if departure {
            self.node.departure_event_id
        } else {
            self.node.arrival_event_id
        };
        (id != 0).then_some(id)
    }

    /// `timer` is inside this frame's dwell window `[arrive, departure)`.
    #[inline]
    pub fn in_stop_window(&self, timer: u32) -> bool {
        timer >= self.arrive_time && timer < self.departure_time
    }

    /// `timer` is inside the outgoing leg's travel window `[departure, next_arrive)`.
    #[inline]
    pub fn in_travel_window(&self, timer: u32) -> bool {
        timer >= self.departure_time && timer < self.next_arrive_time
    }
}
