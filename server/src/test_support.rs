//! In-memory collaborators for transport tests.
//!
//! - `FakeMaps`: a tiny world. Every object lives in `objects`; every call a transport makes
//!   is either applied there or recorded in a public log field.
//! - `FakeSpawns`: static-passenger spawn definitions per passenger map.
//! - `RecordingScripts`: records hook calls in order.
//! - `Harness`: all of the above plus a registry with a few ready-made transport types.
//!
//! Transport types (all with speed 10, acceleration 5):
//! - ferry: two docks 100 units apart on map 0, 10 s dwell each, events 11/12 and 21/22
//! - elevator: ferry geometry, no events, can be stopped
//! - galleon: ferry-like, with static passengers (one creature, one game object)
//! - buoy: single node, never moves
//! - ship: crosses from map 0 to map 1 and back

use crate::{
    passenger::{MovementInfo, PassengerKind},
    registry::{TemplateRegistry, TransportInfo},
    settings::TransportSettings,
    summon::SummonRequest,
    transport::Transport,
    world::{
        MapService, SpawnDataStore, StaticPassengerKind, StaticPassengerSpawn, TransportContext,
        TransportScripts,
    },
};
use shared::{GridId, MapId, ObjectGuid, PathNode, Pose, encode_grid_id};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const FERRY_ENTRY: u32 = 100;
pub const ELEVATOR_ENTRY: u32 = 101;
pub const GALLEON_ENTRY: u32 = 102;
pub const BUOY_ENTRY: u32 = 103;
pub const SHIP_ENTRY: u32 = 104;

pub const GALLEON_PASSENGER_MAP: MapId = 600;

#[derive(Clone, Debug)]
pub struct FakeObject {
    pub kind: PassengerKind,
    pub map_id: MapId,
    pub pose: Pose,
    pub in_world: bool,
    pub movement: MovementInfo,
    pub vehicle_base: Option<ObjectGuid>,
    pub vehicle_kit: bool,
    /// Last value pushed by `set_creature_moving`.
    pub moving: Option<bool>,
    pub home: Option<Pose>,
}

impl FakeObject {
    fn new(kind: PassengerKind, map_id: MapId, pose: Pose, in_world: bool) -> Self {
        Self {
            kind,
            map_id,
            pose,
            in_world,
            movement: MovementInfo::default(),
            vehicle_base: None,
            vehicle_kit: false,
            moving: None,
            home: None,
        }
    }
}

#[derive(Debug)]
pub struct FakeMaps {
    pub objects: BTreeMap<ObjectGuid, FakeObject>,
    next_guid: ObjectGuid,

    pub unavailable_maps: BTreeSet<MapId>,
    pub inactive_grids: BTreeSet<(MapId, GridId)>,
    pub failing_teleports: BTreeSet<ObjectGuid>,
    pub missing_spawns: BTreeSet<u32>,
    pub reject_add_to_map: bool,

    /// Transport guid -> map it is currently in.
    pub transports: BTreeMap<ObjectGuid, MapId>,
    pub models: Vec<ObjectGuid>,
    pub events: Vec<(MapId, u32)>,
    pub relocations: Vec<(ObjectGuid, PassengerKind, Pose)>,
    pub near_teleports: Vec<(ObjectGuid, Pose)>,
    pub teleport_attempts: Vec<ObjectGuid>,
    pub vehicle_relocations: Vec<ObjectGuid>,
    pub summons: Vec<SummonRequest>,
    pub removed: Vec<ObjectGuid>,
    pub discarded: Vec<ObjectGuid>,
}

impl Default for FakeMaps {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_guid: 1_000,
            unavailable_maps: BTreeSet::new(),
            inactive_grids: BTreeSet::new(),
            failing_teleports: BTreeSet::new(),
            missing_spawns: BTreeSet::new(),
            reject_add_to_map: false,
            transports: BTreeMap::new(),
            models: Vec::new(),
            events: Vec::new(),
            relocations: Vec::new(),
            near_teleports: Vec::new(),
            teleport_attempts: Vec::new(),
            vehicle_relocations: Vec::new(),
            summons: Vec::new(),
            removed: Vec::new(),
            discarded: Vec::new(),
        }
    }
}

impl FakeMaps {
    /// Add an in-world object.
    pub fn spawn_object(&mut self, kind: PassengerKind, map_id: MapId, pose: Pose) -> ObjectGuid {
        self.insert(FakeObject::new(kind, map_id, pose, true))
    }

    pub fn spawn_player(&mut self, map_id: MapId, pose: Pose) -> ObjectGuid {
        self.spawn_object(PassengerKind::Player, map_id, pose)
    }

    pub fn spawn_creature(&mut self, map_id: MapId, pose: Pose) -> ObjectGuid {
        self.spawn_object(PassengerKind::Creature, map_id, pose)
    }

    pub fn object(&self, guid: ObjectGuid) -> &FakeObject {
        &self.objects[&guid]
    }

    pub fn object_mut(&mut self, guid: ObjectGuid) -> &mut FakeObject {
        self.objects.get_mut(&guid).expect("unknown object")
    }

    pub fn movement(&self, guid: ObjectGuid) -> MovementInfo {
        self.object(guid).movement
    }

    pub fn deactivate_grid(&mut self, map_id: MapId, x: f32, y: f32) {
        self.inactive_grids.insert((map_id, encode_grid_id(x, y)));
    }

    fn insert(&mut self, object: FakeObject) -> ObjectGuid {
        let guid = self.next_guid;
        self.next_guid += 1;
        self.objects.insert(guid, object);
        guid
    }

    fn relocate(&mut self, guid: ObjectGuid, pose: &Pose) {
        if let Some(obj) = self.objects.get_mut(&guid) {
            obj.pose = *pose;
            self.relocations.push((guid, obj.kind, *pose));
        }
    }
}

impl MapService for FakeMaps {
    fn ensure_map(&mut self, map_id: MapId) -> bool {
        !self.unavailable_maps.contains(&map_id)
    }

    fn is_grid_loaded(&self, map_id: MapId, x: f32, y: f32) -> bool {
        !self.inactive_grids.contains(&(map_id, encode_grid_id(x, y)))
    }

    fn add_transport(&mut self, map_id: MapId, transport: ObjectGuid, _pose: &Pose) {
        self.transports.insert(transport, map_id);
    }

    fn remove_transport(&mut self, _map_id: MapId, transport: ObjectGuid) {
        self.transports.remove(&transport);
    }

    fn insert_transport_model(&mut self, _map_id: MapId, transport: ObjectGuid) {
        self.models.push(transport);
    }

    fn start_event_scripts(&mut self, map_id: MapId, event_id: u32, _source: ObjectGuid) {
        self.events.push((map_id, event_id));
    }

    fn passenger_kind(&self, guid: ObjectGuid) -> Option<PassengerKind> {
        self.objects.get(&guid).map(|o| o.kind)
    }

    fn is_in_world(&self, guid: ObjectGuid) -> bool {
        self.objects.get(&guid).is_some_and(|o| o.in_world)
    }

    fn map_of(&self, guid: ObjectGuid) -> Option<MapId> {
        self.objects.get(&guid).map(|o| o.map_id)
    }

    fn position_of(&self, guid: ObjectGuid) -> Option<Pose> {
        self.objects.get(&guid).map(|o| o.pose)
    }

    fn movement_info(&self, guid: ObjectGuid) -> Option<&MovementInfo> {
        self.objects.get(&guid).map(|o| &o.movement)
    }

    fn movement_info_mut(&mut self, guid: ObjectGuid) -> Option<&mut MovementInfo> {
        self.objects.get_mut(&guid).map(|o| &mut o.movement)
    }

    fn vehicle_base(&self, guid: ObjectGuid) -> Option<ObjectGuid> {
        self.objects.get(&guid).and_then(|o| o.vehicle_base)
    }

    fn has_vehicle_kit(&self, guid: ObjectGuid) -> bool {
        self.objects.get(&guid).is_some_and(|o| o.vehicle_kit)
    }

    fn relocate_vehicle_passengers(&mut self, vehicle: ObjectGuid, _pose: &Pose) {
        self.vehicle_relocations.push(vehicle);
    }

    fn set_creature_moving(&mut self, guid: ObjectGuid, moving: bool) {
        if let Some(obj) = self.objects.get_mut(&guid) {
            obj.moving = Some(moving);
        }
    }

    fn set_home_position(&mut self, guid: ObjectGuid, pose: &Pose) {
        if let Some(obj) = self.objects.get_mut(&guid) {
            obj.home = Some(*pose);
        }
    }

    fn creature_relocation(&mut self, guid: ObjectGuid, pose: &Pose) {
        self.relocate(guid, pose);
    }

    fn player_relocation(&mut self, guid: ObjectGuid, pose: &Pose) {
        self.relocate(guid, pose);
    }

    fn game_object_relocation(&mut self, guid: ObjectGuid, pose: &Pose) {
        self.relocate(guid, pose);
    }

    fn dynamic_object_relocation(&mut self, guid: ObjectGuid, pose: &Pose) {
        self.relocate(guid, pose);
    }

    fn near_teleport(&mut self, guid: ObjectGuid, pose: &Pose) {
        self.near_teleports.push((guid, *pose));
        if let Some(obj) = self.objects.get_mut(&guid) {
            obj.pose = *pose;
        }
    }

    fn teleport_player(&mut self, guid: ObjectGuid, map_id: MapId, pose: &Pose) -> bool {
        self.teleport_attempts.push(guid);
        if self.failing_teleports.contains(&guid) {
            return false;
        }
        match self.objects.get_mut(&guid) {
            Some(obj) => {
                obj.map_id = map_id;
                obj.pose = *pose;
                true
            }
            None => false,
        }
    }

    fn load_creature(&mut self, spawn_id: u32, map_id: MapId, pose: &Pose) -> Option<ObjectGuid> {
        if self.missing_spawns.contains(&spawn_id) {
            return None;
        }
        Some(self.insert(FakeObject::new(PassengerKind::Creature, map_id, *pose, false)))
    }

    fn load_game_object(&mut self, spawn_id: u32, map_id: MapId, pose: &Pose) -> Option<ObjectGuid> {
        if self.missing_spawns.contains(&spawn_id) {
            return None;
        }
        Some(self.insert(FakeObject::new(PassengerKind::GameObject, map_id, *pose, false)))
    }

    fn summon_creature(&mut self, request: &SummonRequest) -> Option<ObjectGuid> {
        self.summons.push(request.clone());
        Some(self.insert(FakeObject::new(
            PassengerKind::Creature,
            request.map_id,
            request.pose,
            false,
        )))
    }

    fn add_to_map(&mut self, guid: ObjectGuid) -> bool {
        if self.reject_add_to_map {
            return false;
        }
        match self.objects.get_mut(&guid) {
            Some(obj) => {
                obj.in_world = true;
                true
            }
            None => false,
        }
    }

    fn discard(&mut self, guid: ObjectGuid) {
        self.objects.remove(&guid);
        self.discarded.push(guid);
    }

    fn remove_object(&mut self, guid: ObjectGuid) {
        if let Some(obj) = self.objects.get_mut(&guid) {
            obj.in_world = false;
        }
        self.removed.push(guid);
    }
}

#[derive(Debug, Default)]
pub struct FakeSpawns {
    by_map: HashMap<MapId, Vec<StaticPassengerSpawn>>,
}

impl FakeSpawns {
    pub fn add(&mut self, map_id: MapId, spawn: StaticPassengerSpawn) {
        self.by_map.entry(map_id).or_default().push(spawn);
    }
}

impl SpawnDataStore for FakeSpawns {
    fn static_passengers(&self, map_id: MapId) -> Vec<StaticPassengerSpawn> {
        self.by_map.get(&map_id).cloned().unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptEvent {
    AddPassenger(ObjectGuid),
    RemovePassenger(ObjectGuid),
    AddCreaturePassenger(ObjectGuid),
    Relocate { node_index: u32, map_id: MapId },
    EventInform(u32),
}

#[derive(Debug, Default)]
pub struct RecordingScripts {
    pub events: Vec<ScriptEvent>,
    /// `on_update` calls, kept apart so per-tick noise stays out of `events`.
    pub updates: u32,
}

impl RecordingScripts {
    /// Event ids passed to `on_event_inform`, in order.
    pub fn event_ids(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ScriptEvent::EventInform(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl TransportScripts for RecordingScripts {
    fn on_add_passenger(&mut self, _transport: ObjectGuid, player: ObjectGuid) {
        self.events.push(ScriptEvent::AddPassenger(player));
    }

    fn on_remove_passenger(&mut self, _transport: ObjectGuid, player: ObjectGuid) {
        self.events.push(ScriptEvent::RemovePassenger(player));
    }

    fn on_add_creature_passenger(&mut self, _transport: ObjectGuid, creature: ObjectGuid) {
        self.events.push(ScriptEvent::AddCreaturePassenger(creature));
    }

    fn on_relocate(&mut self, _transport: ObjectGuid, node_index: u32, map_id: MapId, _pose: &Pose) {
        self.events.push(ScriptEvent::Relocate { node_index, map_id });
    }

    fn on_update(&mut self, _transport: ObjectGuid, _diff_ms: u32) {
        self.updates += 1;
    }

    fn on_event_inform(&mut self, _transport: ObjectGuid, event_id: u32) {
        self.events.push(ScriptEvent::EventInform(event_id));
    }
}

pub struct Harness {
    pub maps: FakeMaps,
    pub spawns: FakeSpawns,
    pub scripts: RecordingScripts,
    pub registry: TemplateRegistry,
    pub settings: TransportSettings,
}

impl Harness {
    pub fn new() -> Self {
        let mut registry = TemplateRegistry::default();
        let docks = |x0: f32, y0: f32| {
            [
                PathNode::new(1, 0, x0, y0, 0.0).with_delay(10),
                PathNode::new(2, 0, x0 + 100.0, y0, 0.0).with_delay(10),
            ]
        };

        register(&mut registry, info(FERRY_ENTRY, "ferry", false, 0), &[
            PathNode::new(1, 0, 0.0, 0.0, 0.0).with_delay(10).with_events(11, 12),
            PathNode::new(2, 0, 100.0, 0.0, 0.0).with_delay(10).with_events(21, 22),
        ]);
        register(&mut registry, info(ELEVATOR_ENTRY, "elevator", true, 0), &docks(0.0, 0.0));
        register(
            &mut registry,
            info(GALLEON_ENTRY, "galleon", false, GALLEON_PASSENGER_MAP),
            &docks(100.0, 100.0),
        );
        register(&mut registry, info(BUOY_ENTRY, "buoy", false, 0), &[
            PathNode::new(1, 0, 10.0, 10.0, 0.0).with_delay(30),
        ]);
        register(&mut registry, info(SHIP_ENTRY, "ship", false, 0), &[
            PathNode::new(1, 0, 0.0, 0.0, 0.0).with_delay(5),
            PathNode::new(2, 0, 200.0, 0.0, 0.0),
            PathNode::new(3, 1, 5000.0, 5000.0, 0.0),
            PathNode::new(4, 1, 5200.0, 5000.0, 0.0).with_delay(5),
        ]);

        let mut spawns = FakeSpawns::default();
        spawns.add(GALLEON_PASSENGER_MAP, StaticPassengerSpawn {
            spawn_id: 1,
            kind: StaticPassengerKind::Creature,
            offset: Pose::new(1.0, 0.0, 0.0, 0.0),
        });
        spawns.add(GALLEON_PASSENGER_MAP, StaticPassengerSpawn {
            spawn_id: 2,
            kind: StaticPassengerKind::GameObject,
            offset: Pose::new(-1.0, 0.0, 0.0, 0.0),
        });

        Self {
            maps: FakeMaps::default(),
            spawns,
            scripts: RecordingScripts::default(),
            registry,
            settings: TransportSettings::default(),
        }
    }

    pub fn ctx(&mut self) -> TransportContext<'_> {
        TransportContext::new(&mut self.maps, &self.spawns, &mut self.scripts)
    }

    fn create(&self, guid: ObjectGuid, entry: u32, pose: Pose) -> Transport {
        Transport::create(&self.registry, &self.settings, guid, entry, 0, pose, 0)
            .expect("test transport")
    }

    fn spawn(&mut self, guid: ObjectGuid, entry: u32, pose: Pose) -> Transport {
        let mut t = self.create(guid, entry, pose);
        t.add_to_world(&mut self.ctx()).expect("map available");
        t
    }

    /// Ferry that is not in the world yet.
    pub fn create_ferry(&self) -> Transport {
        self.create(1, FERRY_ENTRY, Pose::default())
    }

    pub fn spawn_ferry(&mut self) -> Transport {
        self.spawn(1, FERRY_ENTRY, Pose::default())
    }

    pub fn spawn_elevator(&mut self) -> Transport {
        self.spawn(2, ELEVATOR_ENTRY, Pose::default())
    }

    pub fn spawn_galleon(&mut self) -> Transport {
        self.spawn(3, GALLEON_ENTRY, Pose::new(100.0, 100.0, 0.0, 0.0))
    }

    pub fn spawn_buoy(&mut self) -> Transport {
        self.spawn(4, BUOY_ENTRY, Pose::new(10.0, 10.0, 0.0, 0.0))
    }

    pub fn spawn_ship(&mut self) -> Transport {
        self.spawn(5, SHIP_ENTRY, Pose::default())
    }
}

fn info(entry: u32, name: &str, can_be_stopped: bool, passenger_map_id: MapId) -> TransportInfo {
    TransportInfo {
        entry,
        name: name.into(),
        can_be_stopped,
        move_speed: 10.0,
        accel_rate: 5.0,
        passenger_map_id,
    }
}

fn register(registry: &mut TemplateRegistry, info: TransportInfo, nodes: &[PathNode]) {
    let entry = info.entry;
    registry.insert_info(info);
    registry
        .generate_path(entry, nodes)
        .expect("test path generates");
}
