//! Themes as data: each theme is a classification ladder, a settlement style
//! and a recipe of generation steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::terrain::biome::Condition::{
    HeightAbove, HeightBelow, MoistureAbove, MoistureAndTemperatureAbove, Otherwise,
};
use crate::terrain::biome::{Band, Pick};
use crate::terrain::placement::SettlementStyle;
use crate::terrain::tile::TileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Medieval,
    Fantasy,
    Farm,
    Winter,
    Volcanic,
    Desert,
    Swamp,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Medieval,
        Theme::Fantasy,
        Theme::Farm,
        Theme::Winter,
        Theme::Volcanic,
        Theme::Desert,
        Theme::Swamp,
    ];

    /// Parses a theme tag, falling back to medieval for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "fantasy" => Theme::Fantasy,
            "farm" => Theme::Farm,
            "winter" => Theme::Winter,
            "volcanic" => Theme::Volcanic,
            "desert" => Theme::Desert,
            "swamp" => Theme::Swamp,
            _ => Theme::Medieval,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Medieval => "medieval",
            Theme::Fantasy => "fantasy",
            Theme::Farm => "farm",
            Theme::Winter => "winter",
            Theme::Volcanic => "volcanic",
            Theme::Desert => "desert",
            Theme::Swamp => "swamp",
        }
    }

    /// Noise scale each theme was tuned for.
    pub fn default_smoothness(self) -> f64 {
        match self {
            Theme::Medieval => 60.0,
            Theme::Fantasy => 50.0,
            Theme::Farm | Theme::Desert => 45.0,
            Theme::Winter => 40.0,
            Theme::Volcanic | Theme::Swamp => 35.0,
        }
    }

    pub fn profile(self) -> &'static ThemeProfile {
        match self {
            Theme::Medieval => &MEDIEVAL,
            Theme::Fantasy => &FANTASY,
            Theme::Farm => &FARM,
            Theme::Winter => &WINTER,
            Theme::Volcanic => &VOLCANIC,
            Theme::Desert => &DESERT,
            Theme::Swamp => &SWAMP,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional features a caller can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Caves,
    Ruins,
    Temples,
    Towers,
    Villages,
    Bridges,
    Cities,
}

impl Feature {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "caves" => Some(Feature::Caves),
            "ruins" => Some(Feature::Ruins),
            "temples" => Some(Feature::Temples),
            "towers" => Some(Feature::Towers),
            "villages" => Some(Feature::Villages),
            "bridges" => Some(Feature::Bridges),
            "cities" => Some(Feature::Cities),
            _ => None,
        }
    }
}

/// Single-cell structures any theme adds when the matching feature is on,
/// in placement order, with their base counts.
pub const FEATURE_STRUCTURES: [(Feature, TileType, u32); 5] = [
    (Feature::Caves, TileType::Cave, 3),
    (Feature::Ruins, TileType::Ruins, 2),
    (Feature::Temples, TileType::Temple, 2),
    (Feature::Towers, TileType::Tower, 3),
    (Feature::Villages, TileType::Village, 4),
];

/// Base settlement count when `Feature::Cities` is on.
pub const CITY_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Density::Low),
            "medium" => Some(Density::Medium),
            "high" => Some(Density::High),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Density::Low => 0.5,
            Density::Medium => 1.0,
            Density::High => 2.0,
        }
    }

    /// `base` scaled by the multiplier, rounded down.
    pub fn scale(self, base: u32) -> u32 {
        (f64::from(base) * self.multiplier()).floor() as u32
    }
}

/// One step of a theme's post-classification recipe. Counts are base counts,
/// scaled by density unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Rivers(u32),
    LavaRivers(u32),
    /// Bridge pass, only when `Feature::Bridges` is on.
    Bridges,
    Place(TileType, u32),
    /// Theme default that stands in for a feature the caller left off.
    PlaceUnless(Feature, TileType, u32),
    MagicLakes(u32),
    Volcanoes(u32),
    Pyramids(u32),
    /// Between `min` and `max` desert oases, not scaled by density.
    DesertOases { min: u32, max: u32 },
}

#[derive(Debug)]
pub struct ThemeProfile {
    pub ladder: &'static [Band],
    pub settlement: SettlementStyle,
    pub recipe: &'static [Step],
}

const fn tile(t: TileType) -> Pick {
    Pick::Tile(t)
}

const fn chance(above: f64, hit: TileType, miss: TileType) -> Pick {
    Pick::Chance { above, hit, miss }
}

static MEDIEVAL: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.20), tile(TileType::DeepWater)),
        Band::new(HeightBelow(0.30), tile(TileType::Water)),
        Band::new(HeightBelow(0.35), tile(TileType::Sand)),
        Band::new(
            HeightAbove(0.75),
            Pick::ColdSplit {
                below: 0.3,
                cold: TileType::MountainSnow,
                warm: TileType::Mountain,
            },
        ),
        Band::new(MoistureAbove(0.6), tile(TileType::Forest)),
        Band::new(Otherwise, tile(TileType::Grass)),
    ],
    settlement: SettlementStyle::Walled {
        wall: TileType::Mountain,
        fill: TileType::Grass,
    },
    recipe: &[
        Step::Rivers(3),
        Step::Bridges,
        Step::PlaceUnless(Feature::Towers, TileType::Tower, 3),
        Step::PlaceUnless(Feature::Villages, TileType::Village, 4),
        Step::Place(TileType::Castle, 2),
    ],
};

static FANTASY: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.15), tile(TileType::DeepWater)),
        Band::new(HeightBelow(0.25), tile(TileType::Water)),
        Band::new(HeightAbove(0.80), tile(TileType::MountainSnow)),
        Band::new(MoistureAndTemperatureAbove(0.7, 0.6), tile(TileType::Jungle)),
        Band::new(MoistureAbove(0.5), tile(TileType::Forest)),
        Band::new(Otherwise, tile(TileType::Grass)),
    ],
    settlement: SettlementStyle::Diamond {
        core: Some(TileType::MountainSnow),
        fill: TileType::Snow,
        outside: None,
    },
    recipe: &[
        Step::Rivers(2),
        Step::MagicLakes(3),
        Step::Place(TileType::CrystalTower, 3),
    ],
};

static FARM: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.20), tile(TileType::Water)),
        Band::new(HeightAbove(0.80), tile(TileType::Mountain)),
        Band::new(MoistureAbove(0.7), tile(TileType::Forest)),
        Band::new(Otherwise, tile(TileType::Grass)),
    ],
    settlement: SettlementStyle::Checkerboard {
        even: TileType::Grass,
        odd: TileType::Sand,
    },
    recipe: &[
        Step::Rivers(2),
        Step::Place(TileType::Farm, 6),
        Step::PlaceUnless(Feature::Villages, TileType::Village, 3),
        Step::Bridges,
    ],
};

static WINTER: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.25), tile(TileType::Snow)),
        Band::new(HeightAbove(0.70), tile(TileType::MountainSnow)),
        Band::new(
            MoistureAbove(0.6),
            chance(0.7, TileType::Forest, TileType::Snow),
        ),
        Band::new(Otherwise, tile(TileType::Snow)),
    ],
    settlement: SettlementStyle::Walled {
        wall: TileType::MountainSnow,
        fill: TileType::Snow,
    },
    recipe: &[Step::Place(TileType::IceCastle, 2)],
};

static VOLCANIC: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.20), tile(TileType::Lava)),
        Band::new(
            HeightAbove(0.70),
            chance(0.6, TileType::Mountain, TileType::Lava),
        ),
        Band::new(Otherwise, chance(0.7, TileType::Lava, TileType::Wasteland)),
    ],
    settlement: SettlementStyle::Walled {
        wall: TileType::Mountain,
        fill: TileType::Wasteland,
    },
    recipe: &[
        Step::LavaRivers(4),
        Step::Place(TileType::ActiveVolcano, 3),
        Step::Volcanoes(2),
    ],
};

static DESERT: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.15), tile(TileType::Water)),
        Band::new(HeightAbove(0.80), tile(TileType::Mountain)),
        Band::new(HeightAbove(0.60), tile(TileType::Desert)),
        Band::new(HeightAbove(0.40), chance(0.7, TileType::Desert, TileType::Sand)),
        Band::new(Otherwise, tile(TileType::Sand)),
    ],
    settlement: SettlementStyle::Diamond {
        core: None,
        fill: TileType::Mountain,
        outside: Some(TileType::Sand),
    },
    recipe: &[
        Step::Pyramids(3),
        Step::Place(TileType::Oasis, 3),
        // Last, so nothing is placed on the sand rings afterwards.
        Step::DesertOases { min: 1, max: 2 },
    ],
};

static SWAMP: ThemeProfile = ThemeProfile {
    ladder: &[
        Band::new(HeightBelow(0.30), tile(TileType::Water)),
        Band::new(HeightAbove(0.70), tile(TileType::Mountain)),
        Band::new(MoistureAbove(0.5), chance(0.5, TileType::Swamp, TileType::Forest)),
        Band::new(Otherwise, tile(TileType::Swamp)),
    ],
    settlement: SettlementStyle::Diamond {
        core: None,
        fill: TileType::Grass,
        outside: None,
    },
    recipe: &[
        Step::Rivers(5),
        Step::PlaceUnless(Feature::Villages, TileType::Village, 3),
    ],
};
