//! River carving by steepest descent, and lava flows by random walk.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::tile::TileType;

/// Half-width of the window searched for a river's source.
pub const SOURCE_SEARCH_RADIUS: i32 = 5;
pub const LAVA_MIN_LENGTH: u32 = 5;
pub const LAVA_MAX_LENGTH: u32 = 14;

/// Highest cell within the search window around `near`. The start itself wins
/// ties, so a flat window returns `near`.
pub fn find_source(height: &Grid<f64>, near: Cell) -> Cell {
    let Some(mut best_height) = height.at(near) else {
        return near;
    };
    let mut best = near;
    for dy in -SOURCE_SEARCH_RADIUS..=SOURCE_SEARCH_RADIUS {
        for dx in -SOURCE_SEARCH_RADIUS..=SOURCE_SEARCH_RADIUS {
            let candidate = near.offset(dx, dy);
            if let Some(h) = height.at(candidate) {
                if h > best_height {
                    best = candidate;
                    best_height = h;
                }
            }
        }
    }
    best
}

/// Walks downhill from `start`, marking every visited cell as water, until no
/// neighbour is strictly lower. Strict descent means a cell is never visited
/// twice, so the walk is bounded by the cell count.
pub fn carve_river(tiles: &mut Grid<TileType>, height: &Grid<f64>, start: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = start;
    let Some(mut current_height) = height.at(current) else {
        return path;
    };
    loop {
        path.push(current);
        tiles.set(current, TileType::Water);

        let mut lowest: Option<(Cell, f64)> = None;
        for neighbor in height.neighbors(current) {
            let Some(h) = height.at(neighbor) else {
                continue;
            };
            if lowest.map_or(true, |(_, low)| h < low) {
                lowest = Some((neighbor, h));
            }
        }

        match lowest {
            Some((next, h)) if h < current_height => {
                current = next;
                current_height = h;
            }
            _ => break,
        }
    }
    path
}

/// Picks `count` random starts, climbs to the local high point and carves.
/// Returns the path of every river.
pub fn generate_rivers<R: Rng + ?Sized>(
    tiles: &mut Grid<TileType>,
    height: &Grid<f64>,
    count: u32,
    rng: &mut R,
) -> Vec<Vec<Cell>> {
    let (w, h) = (tiles.width() as i32, tiles.height() as i32);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let start = Cell::new(rng.gen_range(0..w), rng.gen_range(0..h));
            let source = find_source(height, start);
            let path = carve_river(tiles, height, source);
            tracing::debug!(?source, length = path.len(), "river carved");
            path
        })
        .collect()
}

/// Drunkard's walk of `LAVA_MIN_LENGTH..=LAVA_MAX_LENGTH` steps, painting lava
/// until it leaves the grid. Ignores the height field.
pub fn lava_flow<R: Rng + ?Sized>(tiles: &mut Grid<TileType>, start: Cell, rng: &mut R) -> Vec<Cell> {
    let length = rng.gen_range(LAVA_MIN_LENGTH..=LAVA_MAX_LENGTH);
    let mut path = Vec::with_capacity(length as usize);
    let mut current = start;
    for _ in 0..length {
        if !tiles.set(current, TileType::Lava) {
            break;
        }
        path.push(current);
        current = current.offset(rng.gen_range(-1..=1), rng.gen_range(-1..=1));
    }
    path
}

pub fn generate_lava_rivers<R: Rng + ?Sized>(
    tiles: &mut Grid<TileType>,
    count: u32,
    rng: &mut R,
) -> Vec<Vec<Cell>> {
    let (w, h) = (tiles.width() as i32, tiles.height() as i32);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let start = Cell::new(rng.gen_range(0..w), rng.gen_range(0..h));
            lava_flow(tiles, start, rng)
        })
        .collect()
}
