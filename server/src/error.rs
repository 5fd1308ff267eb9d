//! Error types for transport creation, teleport and passenger spawning.

use shared::{MapId, ObjectGuid, TemplateError};
use thiserror::Error;

/// Failures that abort a transport operation as a whole.
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    #[error("transport {guid} not created: coordinates are not valid (x {x}, y {y})")]
    InvalidCoordinates { guid: ObjectGuid, x: f32, y: f32 },
    #[error("transport {guid} not created: no game object template for entry {entry}")]
    MissingGameObjectTemplate { guid: ObjectGuid, entry: u32 },
    #[error("transport {entry} ({name}) not created: missing transport template")]
    MissingTransportTemplate { entry: u32, name: String },
    #[error("map {map_id} is not available")]
    MapUnavailable { map_id: MapId },
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// A single passenger could not be materialized. The transport keeps running.
#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    #[error("transport is not in world")]
    TransportNotInWorld,
    #[error("spawn {spawn_id} could not be loaded")]
    NotLoaded { spawn_id: u32 },
    #[error("object {guid} has invalid coordinates (x {x}, y {y})")]
    InvalidPosition { guid: ObjectGuid, x: f32, y: f32 },
    #[error("object {guid} was rejected by map {map_id}")]
    RejectedByMap { guid: ObjectGuid, map_id: MapId },
    #[error("summon of entry {entry} rejected: {reason}")]
    SummonRejected { entry: u32, reason: &'static str },
}
