pub mod error;
pub mod passenger;
pub mod registry;
pub mod settings;
pub mod summon;
pub mod tick;
pub mod transport;
pub mod world;

#[cfg(test)]
mod test_support;

pub use error::{SpawnError, TransportError};
pub use passenger::{MovementInfo, PassengerKind, PassengerSet, TransportSeat};
pub use registry::{TemplateRegistry, TransportInfo};
pub use settings::TransportSettings;
pub use tick::tick_transports;
pub use transport::{GoState, MapChange, Transport};
pub use world::{
    MapService, NoScripts, SpawnDataStore, StaticPassengerKind, StaticPassengerSpawn,
    TransportContext, TransportScripts,
};
