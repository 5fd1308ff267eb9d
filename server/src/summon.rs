//! Temporary summons spawned directly onto a transport.
//!
//! Summon properties come from client data and carry a category plus a type. Together they
//! decide which unit flavour (`SummonMask`) the world creates:
//!
//! | category             | type                       | mask     |
//! |----------------------|----------------------------|----------|
//! | pet                  | any                        | guardian |
//! | puppet               | any                        | puppet   |
//! | vehicle              | any                        | minion   |
//! | wild / ally / unknown| minion, guardian, guardian2| guardian |
//! | wild / ally / unknown| totem, object              | totem    |
//! | wild / ally / unknown| vehicle, vehicle2          | summon   |
//! | wild / ally / unknown| minipet                    | minion   |
//! | wild / ally / unknown| other + guardian-like flag | guardian |
//!
//! Any other category is rejected. No properties at all yields a plain summon.

use shared::{MapId, ObjectGuid, Pose};

/// Properties flag that forces guardian behaviour (mirror images, gargoyles).
pub const SUMMON_PROP_FLAG_GUARDIAN_LIKE: u32 = 0x200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummonCategory {
    Wild,
    Ally,
    Pet,
    Puppet,
    Vehicle,
    Unknown,
    Other(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummonType {
    Minion,
    Guardian,
    Guardian2,
    Totem,
    Object,
    Vehicle,
    Vehicle2,
    Minipet,
    Other(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummonProperties {
    pub category: SummonCategory,
    pub kind: SummonType,
    pub flags: u32,
}

/// Unit flavour created for a summon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummonMask {
    Summon,
    Guardian,
    Puppet,
    Totem,
    Minion,
}

/// Resolve the unit flavour, or `None` for an unsupported category.
pub fn summon_mask(properties: Option<&SummonProperties>) -> Option<SummonMask> {
    let Some(props) = properties else {
        return Some(SummonMask::Summon);
    };

    match props.category {
        SummonCategory::Pet => Some(SummonMask::Guardian),
        SummonCategory::Puppet => Some(SummonMask::Puppet),
        SummonCategory::Vehicle => Some(SummonMask::Minion),
        SummonCategory::Wild | SummonCategory::Ally | SummonCategory::Unknown => {
            Some(match props.kind {
                SummonType::Minion | SummonType::Guardian | SummonType::Guardian2 => {
                    SummonMask::Guardian
                }
                SummonType::Totem | SummonType::Object => SummonMask::Totem,
                SummonType::Vehicle | SummonType::Vehicle2 => SummonMask::Summon,
                SummonType::Minipet => SummonMask::Minion,
                SummonType::Other(_) if props.flags & SUMMON_PROP_FLAG_GUARDIAN_LIKE != 0 => {
                    SummonMask::Guardian
                }
                SummonType::Other(_) => SummonMask::Summon,
            })
        }
        SummonCategory::Other(_) => None,
    }
}

/// Caller-facing summon parameters. `offset` is in the transport's local frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SummonArgs {
    pub entry: u32,
    pub offset: Pose,
    /// Despawn behaviour, passed through to the world untouched.
    pub despawn_type: u32,
    pub properties: Option<SummonProperties>,
    pub duration_ms: u32,
    pub summoner: Option<ObjectGuid>,
    pub spell_id: u32,
    pub vehicle_id: u32,
}

impl SummonArgs {
    pub fn new(entry: u32, offset: Pose) -> Self {
        Self {
            entry,
            offset,
            despawn_type: 0,
            properties: None,
            duration_ms: 0,
            summoner: None,
            spell_id: 0,
            vehicle_id: 0,
        }
    }
}

/// What the world is asked to create, with the world pose already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct SummonRequest {
    pub entry: u32,
    pub mask: SummonMask,
    pub map_id: MapId,
    pub pose: Pose,
    pub despawn_type: u32,
    pub duration_ms: u32,
    pub summoner: Option<ObjectGuid>,
    pub spell_id: u32,
    pub vehicle_id: u32,
}
