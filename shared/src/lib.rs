pub mod cell;
pub mod constants;
pub mod flags;
pub mod path;
pub mod pose;
pub mod spline;
pub mod timer;

/// Identifies a map instance.
pub type MapId = u32;
/// Linearized grid index within one map.
pub type GridId = u16;
/// Identifies any world object (transport, passenger, spawned object).
pub type ObjectGuid = u64;

pub use cell::{differs_grid, encode_grid_id, is_valid_map_coord};
pub use constants::{DIST_EPS, IN_MILLISECONDS, SIZE_OF_GRIDS};
pub use flags::{FlagBit, Flags, MovementFlag, MovementFlags};
pub use path::{KeyFrame, Kinematics, PathNode, PathTemplate, TemplateError, segment_position};
pub use pose::{Pose, Vec3, facing_from_tangent, normalize_orientation};
pub use spline::SplineSegment;
pub use timer::IntervalTimer;
