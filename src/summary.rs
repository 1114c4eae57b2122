use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{
    map::MapModel,
    terrain::{grid::Grid, tile::TileType},
    theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl FieldStats {
    pub fn from_grid(grid: &Grid<f64>) -> Self {
        let values = grid.values();
        if values.is_empty() {
            return Self {
                min: 0.0,
                mean: 0.0,
                max: 0.0,
            };
        }
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        Self {
            min,
            mean: sum / values.len() as f64,
            max,
        }
    }
}

/// Tile census of a finished map.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub theme: Theme,
    pub width: usize,
    pub height: usize,
    /// Keyed by tile name; tiles that never occur are left out.
    pub tiles: BTreeMap<&'static str, usize>,
    pub structures: usize,
    pub land_ratio: f64,
    pub height_field: FieldStats,
    pub moisture_field: FieldStats,
    pub temperature_field: FieldStats,
}

impl MapSummary {
    pub fn from_map(map: &MapModel) -> Self {
        let mut tiles = BTreeMap::new();
        let mut structures = 0;
        let mut land = 0;
        for &tile in map.tiles().values() {
            *tiles.entry(tile.name()).or_insert(0) += 1;
            if tile.is_structure() {
                structures += 1;
            }
            if tile.is_land() {
                land += 1;
            }
        }
        let total = map.tiles().len();
        Self {
            theme: map.theme(),
            width: map.width(),
            height: map.height(),
            tiles,
            structures,
            land_ratio: if total == 0 {
                0.0
            } else {
                land as f64 / total as f64
            },
            height_field: FieldStats::from_grid(map.height_field()),
            moisture_field: FieldStats::from_grid(map.moisture_field()),
            temperature_field: FieldStats::from_grid(map.temperature_field()),
        }
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.get(tile.name()).copied().unwrap_or(0)
    }
}

impl fmt::Display for MapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} map, {}x{}", self.theme, self.width, self.height)?;
        writeln!(
            f,
            "structures: {}  land: {:.1}%",
            self.structures,
            self.land_ratio * 100.0
        )?;
        for (label, stats) in [
            ("height", &self.height_field),
            ("moisture", &self.moisture_field),
            ("temperature", &self.temperature_field),
        ] {
            writeln!(
                f,
                "{label:<12} min {:.3}  mean {:.3}  max {:.3}",
                stats.min, stats.mean, stats.max
            )?;
        }
        for (name, count) in &self.tiles {
            writeln!(f, "  {name:<16} {count}")?;
        }
        Ok(())
    }
}
