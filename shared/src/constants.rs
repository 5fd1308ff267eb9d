/// Milliseconds per second. Path timestamps are stored in milliseconds, kinematics run in seconds.
pub const IN_MILLISECONDS: u32 = 1000;

/// Number of grids along one axis of a map.
pub const MAX_NUMBER_OF_GRIDS: u16 = 64;

/// Size of one streaming grid in world units.
/// All grids are square.
pub const SIZE_OF_GRIDS: f32 = 533.333_3;

/// Grid index that contains the world origin.
pub const CENTER_GRID_ID: u16 = MAX_NUMBER_OF_GRIDS / 2;

/// Offset of the origin inside the center grid.
///
/// Used by `grid_coords()`:
/// - `gx = floor((x - CENTER_GRID_OFFSET) / SIZE_OF_GRIDS + CENTER_GRID_ID + 0.5)`
pub const CENTER_GRID_OFFSET: f32 = SIZE_OF_GRIDS / 2.0;

/// Total span of one map axis in world units.
pub const MAP_SIZE: f32 = SIZE_OF_GRIDS * MAX_NUMBER_OF_GRIDS as f32;

/// Half of [`MAP_SIZE`]; valid coordinates lie within `[-MAP_HALFSIZE, MAP_HALFSIZE]` (minus a margin).
pub const MAP_HALFSIZE: f32 = MAP_SIZE / 2.0;

/// Number of samples used to build a spline segment's arc-length table.
///
/// Higher values give a more uniform speed along strongly curved legs at the cost of memory
/// per keyframe.
pub const SPLINE_LENGTH_SAMPLES: usize = 32;

/// Practical small distance for comparisons (world units).
pub const DIST_EPS: f32 = 1.0e-6;
