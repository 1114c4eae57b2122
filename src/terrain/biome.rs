//! Per-cell biome classification from a theme's threshold ladder.

use rand::Rng;

use super::tile::TileType;

/// Test applied to a cell's `(height, moisture, temperature)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    HeightBelow(f64),
    HeightAbove(f64),
    MoistureAbove(f64),
    MoistureAndTemperatureAbove(f64, f64),
    Otherwise,
}

impl Condition {
    fn holds(self, height: f64, moisture: f64, temperature: f64) -> bool {
        match self {
            Condition::HeightBelow(limit) => height < limit,
            Condition::HeightAbove(limit) => height > limit,
            Condition::MoistureAbove(limit) => moisture > limit,
            Condition::MoistureAndTemperatureAbove(m, t) => moisture > m && temperature > t,
            Condition::Otherwise => true,
        }
    }
}

/// What a matching band yields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick {
    Tile(TileType),
    /// `cold` when temperature is below `below`, else `warm`.
    ColdSplit {
        below: f64,
        cold: TileType,
        warm: TileType,
    },
    /// `hit` when a uniform draw exceeds `above`, else `miss`. This is the only
    /// place classification consumes randomness.
    Chance {
        above: f64,
        hit: TileType,
        miss: TileType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub when: Condition,
    pub pick: Pick,
}

impl Band {
    pub const fn new(when: Condition, pick: Pick) -> Self {
        Self { when, pick }
    }
}

/// First band whose condition holds decides the tile. A ladder without a
/// matching band falls back to grass so no cell is ever left unset.
pub fn classify<R: Rng + ?Sized>(
    ladder: &[Band],
    height: f64,
    moisture: f64,
    temperature: f64,
    rng: &mut R,
) -> TileType {
    let Some(band) = ladder
        .iter()
        .find(|band| band.when.holds(height, moisture, temperature))
    else {
        return TileType::Grass;
    };
    match band.pick {
        Pick::Tile(tile) => tile,
        Pick::ColdSplit { below, cold, warm } => {
            if temperature < below {
                cold
            } else {
                warm
            }
        }
        Pick::Chance { above, hit, miss } => {
            if rng.gen::<f64>() > above {
                hit
            } else {
                miss
            }
        }
    }
}
