use crate::terrain::fields::ScalarFields;
use crate::terrain::grid::{Cell, Grid};
use crate::terrain::tile::TileType;
use crate::theme::Theme;

/// A finished map: the tile grid and the scalar fields it was classified
/// from. Read-only once built.
#[derive(Debug, Clone)]
pub struct MapModel {
    theme: Theme,
    tiles: Grid<TileType>,
    fields: ScalarFields,
}

impl MapModel {
    pub(crate) fn new(theme: Theme, tiles: Grid<TileType>, fields: ScalarFields) -> Self {
        Self {
            theme,
            tiles,
            fields,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn tiles(&self) -> &Grid<TileType> {
        &self.tiles
    }

    pub fn height_field(&self) -> &Grid<f64> {
        &self.fields.height
    }

    pub fn moisture_field(&self) -> &Grid<f64> {
        &self.fields.moisture
    }

    pub fn temperature_field(&self) -> &Grid<f64> {
        &self.fields.temperature
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<TileType> {
        self.tiles.at(Cell::new(x, y))
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.values().iter().filter(|&&t| t == tile).count()
    }

    pub fn cells_of(&self, tile: TileType) -> Vec<Cell> {
        self.tiles
            .iter()
            .filter(|(_, &t)| t == tile)
            .map(|(cell, _)| cell)
            .collect()
    }
}
