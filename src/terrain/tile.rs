use std::fmt;

use serde::{Deserialize, Serialize};

/// Every kind of tile a generated map can hold. A cell holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[serde(rename = "water_deep")]
    DeepWater,
    Water,
    Sand,
    Grass,
    Forest,
    Mountain,
    MountainSnow,
    Desert,
    Snow,
    Lava,
    Wasteland,
    Swamp,
    Jungle,
    Castle,
    Village,
    Tower,
    Ruins,
    Temple,
    Port,
    Bridge,
    Cave,
    Mine,
    Farm,
    Oasis,
    #[serde(rename = "volcano_active")]
    ActiveVolcano,
    IceCastle,
    CrystalTower,
    Pyramid,
}

impl TileType {
    pub const ALL: [TileType; 28] = [
        TileType::DeepWater,
        TileType::Water,
        TileType::Sand,
        TileType::Grass,
        TileType::Forest,
        TileType::Mountain,
        TileType::MountainSnow,
        TileType::Desert,
        TileType::Snow,
        TileType::Lava,
        TileType::Wasteland,
        TileType::Swamp,
        TileType::Jungle,
        TileType::Castle,
        TileType::Village,
        TileType::Tower,
        TileType::Ruins,
        TileType::Temple,
        TileType::Port,
        TileType::Bridge,
        TileType::Cave,
        TileType::Mine,
        TileType::Farm,
        TileType::Oasis,
        TileType::ActiveVolcano,
        TileType::IceCastle,
        TileType::CrystalTower,
        TileType::Pyramid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TileType::DeepWater => "water_deep",
            TileType::Water => "water",
            TileType::Sand => "sand",
            TileType::Grass => "grass",
            TileType::Forest => "forest",
            TileType::Mountain => "mountain",
            TileType::MountainSnow => "mountain_snow",
            TileType::Desert => "desert",
            TileType::Snow => "snow",
            TileType::Lava => "lava",
            TileType::Wasteland => "wasteland",
            TileType::Swamp => "swamp",
            TileType::Jungle => "jungle",
            TileType::Castle => "castle",
            TileType::Village => "village",
            TileType::Tower => "tower",
            TileType::Ruins => "ruins",
            TileType::Temple => "temple",
            TileType::Port => "port",
            TileType::Bridge => "bridge",
            TileType::Cave => "cave",
            TileType::Mine => "mine",
            TileType::Farm => "farm",
            TileType::Oasis => "oasis",
            TileType::ActiveVolcano => "volcano_active",
            TileType::IceCastle => "ice_castle",
            TileType::CrystalTower => "crystal_tower",
            TileType::Pyramid => "pyramid",
        }
    }

    /// Built features, as opposed to terrain. Placement refuses to put a new
    /// structure next to any of these.
    pub fn is_structure(self) -> bool {
        matches!(
            self,
            TileType::Castle
                | TileType::Village
                | TileType::Tower
                | TileType::Ruins
                | TileType::Temple
                | TileType::Port
                | TileType::Bridge
                | TileType::Cave
                | TileType::Mine
                | TileType::Farm
                | TileType::Oasis
                | TileType::ActiveVolcano
                | TileType::IceCastle
                | TileType::CrystalTower
                | TileType::Pyramid
        )
    }

    pub fn is_water(self) -> bool {
        matches!(self, TileType::Water | TileType::DeepWater)
    }

    /// Anything a bridge may rest on: not water, not lava.
    pub fn is_land(self) -> bool {
        !self.is_water() && self != TileType::Lava
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
