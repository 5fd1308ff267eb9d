//! Map grid encoding/decoding helpers.
//!
//! This module centralizes the "grid id" scheme used to decide which streaming partition of a
//! map a position falls in. Maps stream in and out per grid, and a transport only cares about
//! two questions: "is this coordinate representable at all" and "did I just cross into a
//! different grid".
//!
//! # Model
//! - `GridId` is a compact `u16` identifying a grid in a square `MAX_NUMBER_OF_GRIDS` layout.
//! - World units are yards. The origin sits on the minimum corner of [`CENTER_GRID_ID`].
//! - Grid `(0, 0)` covers the most negative corner of the map.
//!
//! # Encoding
//! We compute grid coords:
//! - `gx = floor((x - CENTER_GRID_OFFSET) / SIZE_OF_GRIDS + CENTER_GRID_ID + 0.5)`
//! - `gy = floor((y - CENTER_GRID_OFFSET) / SIZE_OF_GRIDS + CENTER_GRID_ID + 0.5)`
//!
//! Then clamp each into `[0, MAX_NUMBER_OF_GRIDS-1]` and linearize in X-major order:
//! - `id = gx * MAX_NUMBER_OF_GRIDS + gy`

use crate::{
    GridId,
    constants::{CENTER_GRID_ID, CENTER_GRID_OFFSET, MAP_HALFSIZE, MAX_NUMBER_OF_GRIDS, SIZE_OF_GRIDS},
};

/// Returns true if `(x, y)` lies inside the representable map area.
///
/// The half-yard margin keeps positions off the outermost grid edge, where the grid lookup
/// would otherwise round outside the map.
#[inline]
pub fn is_valid_map_coord_xy(x: f32, y: f32) -> bool {
    x.is_finite()
        && y.is_finite()
        && x.abs() <= MAP_HALFSIZE - 0.5
        && y.abs() <= MAP_HALFSIZE - 0.5
}

/// Returns true if the full position is usable for spawning or relocation.
#[inline]
pub fn is_valid_map_coord(x: f32, y: f32, z: f32) -> bool {
    is_valid_map_coord_xy(x, y) && z.is_finite()
}

/// Computes the `(grid_x, grid_y)` pair containing world position `(x, y)`.
#[inline]
pub fn grid_coords(x: f32, y: f32) -> (u16, u16) {
    let side_f = MAX_NUMBER_OF_GRIDS as f32;
    let axis = |v: f32| -> u16 {
        let g = ((v - CENTER_GRID_OFFSET) / SIZE_OF_GRIDS + CENTER_GRID_ID as f32 + 0.5).floor();
        g.clamp(0.0, side_f - 1.0) as u16
    };
    (axis(x), axis(y))
}

/// Encodes world position `(x, y)` into a compact [`GridId`].
#[inline]
pub fn encode_grid_id(x: f32, y: f32) -> GridId {
    let (gx, gy) = grid_coords(x, y);
    gx * MAX_NUMBER_OF_GRIDS + gy
}

/// Decodes a [`GridId`] into `(grid_x, grid_y)` coordinates in `[0, MAX_NUMBER_OF_GRIDS)`.
#[inline]
pub fn decode_grid_coords(id: GridId) -> (u16, u16) {
    (id / MAX_NUMBER_OF_GRIDS, id % MAX_NUMBER_OF_GRIDS)
}

/// Returns true when the two positions fall in different grids.
#[inline]
pub fn differs_grid(a: (f32, f32), b: (f32, f32)) -> bool {
    encode_grid_id(a.0, a.1) != encode_grid_id(b.0, b.1)
}
