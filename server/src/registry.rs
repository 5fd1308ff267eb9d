//! Transport type registry.
//!
//! Holds two tables keyed by transport entry:
//! - [`TransportInfo`]: the game-object side (name, speed, stoppability, passenger map),
//! - generated [`PathTemplate`]s, shared by every instance of that entry.
//!
//! The registry is filled once at startup and only read afterwards; transports clone the
//! `Arc` they need at creation time.

use crate::error::TransportError;
use shared::{Kinematics, MapId, PathNode, PathTemplate};
use std::{collections::HashMap, sync::Arc};

/// Game-object template data for one transport entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportInfo {
    pub entry: u32,
    pub name: String,
    /// Stops on request at the next arrival (elevators, trams).
    pub can_be_stopped: bool,
    pub move_speed: f32,
    pub accel_rate: f32,
    /// Map holding the transport's static-passenger spawns (`0` = none).
    pub passenger_map_id: MapId,
}

impl TransportInfo {
    pub fn kinematics(&self) -> Result<Kinematics, TransportError> {
        Ok(Kinematics::new(self.move_speed, self.accel_rate)?)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    infos: HashMap<u32, TransportInfo>,
    paths: HashMap<u32, Arc<PathTemplate>>,
}

impl TemplateRegistry {
    pub fn insert_info(&mut self, info: TransportInfo) {
        self.infos.insert(info.entry, info);
    }

    /// Generate and store the path for `entry` from its nodes.
    ///
    /// The info row must be registered first; its speed and acceleration drive the timing.
    pub fn generate_path(
        &mut self,
        entry: u32,
        nodes: &[PathNode],
    ) -> Result<Arc<PathTemplate>, TransportError> {
        let Some(info) = self.infos.get(&entry) else {
            log::error!("Transport path for entry {entry} has no game object template");
            return Err(TransportError::MissingGameObjectTemplate { guid: 0, entry });
        };

        let template = info
            .kinematics()
            .and_then(|k| PathTemplate::generate(entry, nodes, k).map_err(Into::into))
            .inspect_err(|e| log::error!("Transport {entry} ({}) path rejected: {e}", info.name))?;

        let template = Arc::new(template);
        self.paths.insert(entry, Arc::clone(&template));
        Ok(template)
    }

    pub fn info(&self, entry: u32) -> Option<&TransportInfo> {
        self.infos.get(&entry)
    }

    pub fn path(&self, entry: u32) -> Option<Arc<PathTemplate>> {
        self.paths.get(&entry).cloned()
    }
}
