//! Cellular-automaton cleanup of classified terrain.

use super::grid::{Cell, Grid};
use super::tile::TileType;

pub const DEFAULT_ITERATIONS: u32 = 3;

/// A cell with at most this many same-type neighbours counts as isolated.
const ISOLATION_LIMIT: usize = 2;
/// Water with at least this many non-water neighbours is eroded.
const EROSION_LIMIT: usize = 5;

/// Runs `iterations` passes. Each pass reads a snapshot taken before it
/// started and writes into `tiles`, so edits never feed back into the same
/// pass. The outermost ring is never touched.
pub fn smooth(tiles: &mut Grid<TileType>, iterations: u32) -> usize {
    let mut changed = 0;
    for _ in 0..iterations {
        let snapshot = tiles.clone();
        changed += smooth_once(&snapshot, tiles);
    }
    changed
}

fn smooth_once(snapshot: &Grid<TileType>, tiles: &mut Grid<TileType>) -> usize {
    let mut changed = 0;
    let (w, h) = (snapshot.width() as i32, snapshot.height() as i32);
    let mut neighbors = Vec::with_capacity(8);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let cell = Cell::new(x, y);
            let Some(current) = snapshot.at(cell) else {
                continue;
            };
            neighbors.clear();
            neighbors.extend(snapshot.neighbors(cell).filter_map(|n| snapshot.at(n)));

            let mut next = current;
            let same = neighbors.iter().filter(|&&n| n == current).count();
            if same <= ISOLATION_LIMIT {
                if let Some(common) = most_common(neighbors.iter().copied()) {
                    next = common;
                }
            }

            if current == TileType::Water {
                let dry = neighbors.iter().copied().filter(|&n| n != TileType::Water);
                if dry.clone().count() >= EROSION_LIMIT {
                    if let Some(common) = most_common(dry) {
                        next = common;
                    }
                }
            }

            if next != current {
                changed += 1;
            }
            tiles.set(cell, next);
        }
    }
    changed
}

/// Most frequent tile. On ties the one that first reached the winning count
/// wins, scanning in neighbourhood order.
pub fn most_common(tiles: impl IntoIterator<Item = TileType>) -> Option<TileType> {
    let mut counts = [0usize; TileType::ALL.len()];
    let mut best: Option<(TileType, usize)> = None;
    for tile in tiles {
        let slot = &mut counts[tile as usize];
        *slot += 1;
        if best.map_or(true, |(_, count)| *slot > count) {
            best = Some((tile, *slot));
        }
    }
    best.map(|(tile, _)| tile)
}
