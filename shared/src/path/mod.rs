//! Path model (folder-based).
//!
//! Layout:
//! - `keyframe.rs`: input nodes and the precomputed per-node keyframe data
//! - `template.rs`: `PathTemplate` and its generation from nodes + kinematic constants
//! - `segment.rs`: acceleration/cruise/brake kinematics → normalized position along a leg
//!
//! A template is immutable once generated and shared read-only (`Arc`) by every transport
//! instance of the same type.

mod keyframe;
mod segment;
mod template;

pub use keyframe::{KeyFrame, PathNode};
pub use segment::segment_position;
pub use template::{Kinematics, PathTemplate};

use thiserror::Error;

/// Why a path template could not be built.
#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("path has no nodes")]
    NoNodes,
    #[error("path with {count} nodes has no stop frame")]
    NoStopFrame { count: usize },
    #[error("kinematic constants must be positive and finite (speed {speed}, accel {accel})")]
    InvalidKinematics { speed: f32, accel: f32 },
    #[error("node {index} has a non-finite position")]
    InvalidNode { index: u32 },
    #[error("path of {count} nodes has a zero-length period")]
    ZeroPeriod { count: usize },
}
