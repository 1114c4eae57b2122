//! Rejection-sampled structure placement, settlement and feature stamps, and
//! the bridge pass.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::tile::TileType;

/// Draws per requested instance before giving up on it.
pub const MAX_ATTEMPTS: u32 = 50;
/// Margin of the region random centres are drawn from.
pub const STRUCTURE_MARGIN: i32 = 2;
pub const SETTLEMENT_MARGIN: i32 = 3;
/// Settlements refuse centres with mountain this close (Chebyshev).
pub const SETTLEMENT_CLEARANCE: i32 = 3;

/// How a settlement stamp is laid out around its centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStyle {
    /// Square ring of `wall` at the stamp radius around a `fill` courtyard.
    Walled { wall: TileType, fill: TileType },
    /// Manhattan diamond of `fill`, optional distinct `core` at the centre and
    /// optional `outside` for the rest of the square.
    Diamond {
        core: Option<TileType>,
        fill: TileType,
        outside: Option<TileType>,
    },
    /// Alternating tiles by coordinate parity.
    Checkerboard { even: TileType, odd: TileType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OasisKind {
    /// Grass or forest ring, picked per cell.
    Green,
    /// Sand ring.
    Desert,
}

/// Uniform centre with at least `margin` cells to the left/top and
/// `margin + 1` to the right/bottom edge; `None` when the grid is too small.
pub fn random_interior<R: Rng + ?Sized, T>(grid: &Grid<T>, margin: i32, rng: &mut R) -> Option<Cell> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    if w - margin <= margin || h - margin <= margin {
        return None;
    }
    Some(Cell::new(
        rng.gen_range(margin..w - margin),
        rng.gen_range(margin..h - margin),
    ))
}

/// Generic site test: not deep water or lava, not on the outer ring, and no
/// structure on the cell or anywhere in its 8-neighbourhood.
pub fn is_valid_structure_site(tiles: &Grid<TileType>, cell: Cell) -> bool {
    let Some(tile) = tiles.at(cell) else {
        return false;
    };
    if matches!(tile, TileType::DeepWater | TileType::Lava) {
        return false;
    }
    let (w, h) = (tiles.width() as i32, tiles.height() as i32);
    if cell.x < 1 || cell.x > w - 2 || cell.y < 1 || cell.y > h - 2 {
        return false;
    }
    !std::iter::once(cell)
        .chain(tiles.neighbors(cell))
        .filter_map(|n| tiles.at(n))
        .any(TileType::is_structure)
}

/// Places up to `count` single-cell `structure` tiles. Each instance gets
/// `MAX_ATTEMPTS` draws; instances that never find a valid site are dropped.
/// Returns the cells actually written.
pub fn place_structures<R: Rng + ?Sized>(
    tiles: &mut Grid<TileType>,
    structure: TileType,
    count: u32,
    rng: &mut R,
) -> Vec<Cell> {
    let mut placed = Vec::new();
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS {
            let Some(cell) = random_interior(tiles, STRUCTURE_MARGIN, rng) else {
                break;
            };
            if is_valid_structure_site(tiles, cell) {
                tiles.set(cell, structure);
                placed.push(cell);
                break;
            }
        }
    }
    tracing::debug!(
        structure = structure.name(),
        requested = count,
        placed = placed.len(),
        "structures placed"
    );
    placed
}

/// Settlement centre test: dry land, at least `SETTLEMENT_MARGIN` from every
/// edge, and no mountain within `SETTLEMENT_CLEARANCE` so walls of earlier
/// settlements keep new ones away.
pub fn is_valid_settlement_site(tiles: &Grid<TileType>, cell: Cell) -> bool {
    let Some(tile) = tiles.at(cell) else {
        return false;
    };
    if matches!(tile, TileType::Water | TileType::DeepWater | TileType::Lava) {
        return false;
    }
    let (w, h) = (tiles.width() as i32, tiles.height() as i32);
    if cell.x < SETTLEMENT_MARGIN
        || cell.x > w - SETTLEMENT_MARGIN
        || cell.y < SETTLEMENT_MARGIN
        || cell.y > h - SETTLEMENT_MARGIN
    {
        return false;
    }
    for dy in -SETTLEMENT_CLEARANCE..=SETTLEMENT_CLEARANCE {
        for dx in -SETTLEMENT_CLEARANCE..=SETTLEMENT_CLEARANCE {
            if tiles.at(cell.offset(dx, dy)) == Some(TileType::Mountain) {
                return false;
            }
        }
    }
    true
}

/// Stamps a settlement of the given `radius` (clipped at the edges).
pub fn stamp_settlement(tiles: &mut Grid<TileType>, center: Cell, radius: i32, style: SettlementStyle) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let cell = center.offset(dx, dy);
            let tile = match style {
                SettlementStyle::Walled { wall, fill } => {
                    if center.ring_distance(cell) == radius {
                        Some(wall)
                    } else {
                        Some(fill)
                    }
                }
                SettlementStyle::Diamond {
                    core,
                    fill,
                    outside,
                } => {
                    let d = center.manhattan_distance(cell);
                    if d == 0 && core.is_some() {
                        core
                    } else if d <= radius {
                        Some(fill)
                    } else {
                        outside
                    }
                }
                SettlementStyle::Checkerboard { even, odd } => {
                    if (dx + dy) % 2 == 0 {
                        Some(even)
                    } else {
                        Some(odd)
                    }
                }
            };
            if let Some(tile) = tile {
                tiles.set(cell, tile);
            }
        }
    }
}

/// Places up to `count` settlements of radius 2 or 3, `MAX_ATTEMPTS` draws
/// each. Returns the centres used.
pub fn place_settlements<R: Rng + ?Sized>(
    tiles: &mut Grid<TileType>,
    style: SettlementStyle,
    count: u32,
    rng: &mut R,
) -> Vec<Cell> {
    let mut centers = Vec::new();
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS {
            let Some(cell) = random_interior(tiles, SETTLEMENT_MARGIN, rng) else {
                break;
            };
            if is_valid_settlement_site(tiles, cell) {
                let radius = rng.gen_range(2..=3);
                stamp_settlement(tiles, cell, radius, style);
                centers.push(cell);
                break;
            }
        }
    }
    tracing::debug!(requested = count, placed = centers.len(), "settlements placed");
    centers
}

/// Euclidean disc of water, radius 2.
pub fn stamp_magic_lake(tiles: &mut Grid<TileType>, center: Cell) {
    stamp_disc(tiles, center, 2, |_| TileType::Water);
}

/// Euclidean disc of radius 3: lava at the vent, mountain around it.
pub fn stamp_volcano(tiles: &mut Grid<TileType>, center: Cell) {
    stamp_disc(tiles, center, 3, |d| {
        if d < 1.0 {
            TileType::Lava
        } else {
            TileType::Mountain
        }
    });
}

/// Manhattan diamond of pyramid tiles, radius 2.
pub fn stamp_pyramid(tiles: &mut Grid<TileType>, center: Cell) {
    let radius = 2;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let cell = center.offset(dx, dy);
            if center.manhattan_distance(cell) <= radius {
                tiles.set(cell, TileType::Pyramid);
            }
        }
    }
}

/// Water at `center` ringed on all 8 neighbours, clipped at the edges.
pub fn stamp_oasis<R: Rng + ?Sized>(tiles: &mut Grid<TileType>, center: Cell, kind: OasisKind, rng: &mut R) {
    if !tiles.set(center, TileType::Water) {
        return;
    }
    let ring: Vec<Cell> = tiles.neighbors(center).collect();
    for cell in ring {
        let tile = match kind {
            OasisKind::Green if rng.gen_bool(0.5) => TileType::Grass,
            OasisKind::Green => TileType::Forest,
            OasisKind::Desert => TileType::Sand,
        };
        tiles.set(cell, tile);
    }
}

fn stamp_disc(tiles: &mut Grid<TileType>, center: Cell, radius: i32, tile_at: impl Fn(f64) -> TileType) {
    let limit = f64::from(radius);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = f64::from(dx * dx + dy * dy).sqrt();
            if distance <= limit {
                tiles.set(center.offset(dx, dy), tile_at(distance));
            }
        }
    }
}

/// Up to `count` pyramids on sand or desert centres, `MAX_ATTEMPTS` draws each.
pub fn place_pyramids<R: Rng + ?Sized>(tiles: &mut Grid<TileType>, count: u32, rng: &mut R) -> Vec<Cell> {
    let mut centers = Vec::new();
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS {
            let Some(cell) = random_interior(tiles, STRUCTURE_MARGIN, rng) else {
                break;
            };
            if matches!(tiles.at(cell), Some(TileType::Sand | TileType::Desert)) {
                stamp_pyramid(tiles, cell);
                centers.push(cell);
                break;
            }
        }
    }
    centers
}

/// Converts water cells flanked by land on both horizontal or both vertical
/// sides into bridges. Bridges count as land, so a new bridge can qualify a
/// water cell scanned earlier; scans repeat until one builds nothing, which
/// leaves a second call with no work.
pub fn add_bridges(tiles: &mut Grid<TileType>) -> usize {
    let mut built = 0;
    loop {
        let added = bridge_scan(tiles);
        if added == 0 {
            return built;
        }
        built += added;
    }
}

fn bridge_scan(tiles: &mut Grid<TileType>) -> usize {
    let (w, h) = (tiles.width() as i32, tiles.height() as i32);
    let mut built = 0;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let cell = Cell::new(x, y);
            if tiles.at(cell) != Some(TileType::Water) {
                continue;
            }
            let across = land_at(tiles, cell.offset(-1, 0)) && land_at(tiles, cell.offset(1, 0));
            let along = land_at(tiles, cell.offset(0, -1)) && land_at(tiles, cell.offset(0, 1));
            if across || along {
                tiles.set(cell, TileType::Bridge);
                built += 1;
            }
        }
    }
    built
}

fn land_at(tiles: &Grid<TileType>, cell: Cell) -> bool {
    tiles.at(cell).is_some_and(TileType::is_land)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    #[test]
    fn test_structures_never_touch() {
        let mut tiles = Grid::new(20, 20, TileType::Grass);
        let mut rng = rng();
        let placed = place_structures(&mut tiles, TileType::Castle, 12, &mut rng);
        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            assert_eq!(tiles.at(*a), Some(TileType::Castle));
            for b in &placed[i + 1..] {
                assert!(a.ring_distance(*b) > 1, "{a:?} and {b:?} are adjacent");
            }
        }
    }

    #[test]
    fn test_structures_respect_margin() {
        let mut tiles = Grid::new(9, 7, TileType::Grass);
        let placed = place_structures(&mut tiles, TileType::Tower, 30, &mut rng());
        for cell in placed {
            assert!((2..=6).contains(&cell.x));
            assert!((2..=4).contains(&cell.y));
        }
    }

    #[test]
    fn test_no_site_means_silent_shortfall() {
        let mut tiles = Grid::new(10, 10, TileType::DeepWater);
        let placed = place_structures(&mut tiles, TileType::Castle, 3, &mut rng());
        assert!(placed.is_empty());
        assert!(tiles.values().iter().all(|&t| t == TileType::DeepWater));
    }

    #[test]
    fn test_tiny_grid_places_nothing() {
        let mut tiles = Grid::new(4, 4, TileType::Grass);
        assert!(place_structures(&mut tiles, TileType::Cave, 5, &mut rng()).is_empty());
        assert!(place_settlements(
            &mut tiles,
            SettlementStyle::Checkerboard {
                even: TileType::Grass,
                odd: TileType::Sand
            },
            2,
            &mut rng()
        )
        .is_empty());
    }

    #[test]
    fn test_site_rejects_structure_neighbour() {
        let mut tiles = Grid::new(7, 7, TileType::Grass);
        tiles.set(Cell::new(3, 3), TileType::Village);
        assert!(!is_valid_structure_site(&tiles, Cell::new(4, 4)));
        assert!(is_valid_structure_site(&tiles, Cell::new(5, 5)));
        tiles.set(Cell::new(4, 5), TileType::MountainSnow);
        assert!(is_valid_structure_site(&tiles, Cell::new(5, 5)));
        tiles.set(Cell::new(5, 5), TileType::Lava);
        assert!(!is_valid_structure_site(&tiles, Cell::new(5, 5)));
    }

    #[test]
    fn test_walled_settlement() {
        let mut tiles = Grid::new(11, 11, TileType::Forest);
        stamp_settlement(
            &mut tiles,
            Cell::new(5, 5),
            2,
            SettlementStyle::Walled {
                wall: TileType::Mountain,
                fill: TileType::Grass,
            },
        );
        assert_eq!(tiles.at(Cell::new(3, 3)), Some(TileType::Mountain));
        assert_eq!(tiles.at(Cell::new(7, 5)), Some(TileType::Mountain));
        assert_eq!(tiles.at(Cell::new(4, 6)), Some(TileType::Grass));
        assert_eq!(tiles.at(Cell::new(5, 5)), Some(TileType::Grass));
        assert_eq!(tiles.at(Cell::new(8, 5)), Some(TileType::Forest));
    }

    #[test]
    fn test_diamond_settlement() {
        let mut tiles = Grid::new(9, 9, TileType::Grass);
        stamp_settlement(
            &mut tiles,
            Cell::new(4, 4),
            2,
            SettlementStyle::Diamond {
                core: Some(TileType::MountainSnow),
                fill: TileType::Snow,
                outside: None,
            },
        );
        assert_eq!(tiles.at(Cell::new(4, 4)), Some(TileType::MountainSnow));
        assert_eq!(tiles.at(Cell::new(6, 4)), Some(TileType::Snow));
        assert_eq!(tiles.at(Cell::new(5, 5)), Some(TileType::Snow));
        assert_eq!(tiles.at(Cell::new(6, 6)), Some(TileType::Grass));

        stamp_settlement(
            &mut tiles,
            Cell::new(4, 4),
            2,
            SettlementStyle::Diamond {
                core: None,
                fill: TileType::Mountain,
                outside: Some(TileType::Sand),
            },
        );
        assert_eq!(tiles.at(Cell::new(4, 4)), Some(TileType::Mountain));
        assert_eq!(tiles.at(Cell::new(6, 6)), Some(TileType::Sand));
    }

    #[test]
    fn test_settlements_keep_apart() {
        let mut tiles = Grid::new(40, 40, TileType::Grass);
        let style = SettlementStyle::Walled {
            wall: TileType::Mountain,
            fill: TileType::Grass,
        };
        let centers = place_settlements(&mut tiles, style, 6, &mut rng());
        assert!(!centers.is_empty());
        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                // A later centre must sit clear of the earlier walls.
                assert!(a.ring_distance(*b) > 3);
            }
        }
    }

    #[test]
    fn test_settlement_site_edges() {
        let tiles = Grid::new(12, 12, TileType::Grass);
        assert!(!is_valid_settlement_site(&tiles, Cell::new(2, 6)));
        assert!(is_valid_settlement_site(&tiles, Cell::new(3, 6)));
        let mut wet = tiles.clone();
        wet.set(Cell::new(6, 6), TileType::Water);
        assert!(!is_valid_settlement_site(&wet, Cell::new(6, 6)));
    }

    #[test]
    fn test_volcano_and_lake_shapes() {
        let mut tiles = Grid::new(9, 9, TileType::Wasteland);
        stamp_volcano(&mut tiles, Cell::new(4, 4));
        assert_eq!(tiles.at(Cell::new(4, 4)), Some(TileType::Lava));
        assert_eq!(tiles.at(Cell::new(7, 4)), Some(TileType::Mountain));
        assert_eq!(tiles.at(Cell::new(6, 6)), Some(TileType::Mountain));
        assert_eq!(tiles.at(Cell::new(7, 7)), Some(TileType::Wasteland));
        let lava = tiles.values().iter().filter(|&&t| t == TileType::Lava).count();
        assert_eq!(lava, 1);

        let mut tiles = Grid::new(5, 5, TileType::Grass);
        stamp_magic_lake(&mut tiles, Cell::new(0, 0));
        assert_eq!(tiles.at(Cell::new(2, 0)), Some(TileType::Water));
        assert_eq!(tiles.at(Cell::new(1, 1)), Some(TileType::Water));
        assert_eq!(tiles.at(Cell::new(2, 1)), Some(TileType::Grass));
    }

    #[test]
    fn test_pyramid_needs_sand() {
        let mut tiles = Grid::new(12, 12, TileType::Grass);
        assert!(place_pyramids(&mut tiles, 2, &mut rng()).is_empty());
        let mut tiles = Grid::new(12, 12, TileType::Sand);
        let centers = place_pyramids(&mut tiles, 1, &mut rng());
        assert_eq!(centers.len(), 1);
        let pyramid = tiles.values().iter().filter(|&&t| t == TileType::Pyramid).count();
        assert_eq!(pyramid, 13);
    }

    #[test]
    fn test_oasis_rings() {
        let mut tiles = Grid::new(5, 5, TileType::Desert);
        stamp_oasis(&mut tiles, Cell::new(2, 2), OasisKind::Desert, &mut rng());
        assert_eq!(tiles.at(Cell::new(2, 2)), Some(TileType::Water));
        for n in tiles.neighbors(Cell::new(2, 2)) {
            assert_eq!(tiles.at(n), Some(TileType::Sand));
        }
        assert_eq!(tiles.at(Cell::new(0, 0)), Some(TileType::Desert));

        // Corner stamps clip the ring.
        let mut tiles = Grid::new(5, 5, TileType::Desert);
        stamp_oasis(&mut tiles, Cell::new(0, 0), OasisKind::Green, &mut rng());
        assert_eq!(tiles.at(Cell::new(0, 0)), Some(TileType::Water));
        for n in tiles.neighbors(Cell::new(0, 0)) {
            assert!(matches!(tiles.at(n), Some(TileType::Grass | TileType::Forest)));
        }
        assert_eq!(tiles.at(Cell::new(2, 0)), Some(TileType::Desert));
    }

    #[test]
    fn test_bridges_span_rivers_and_are_idempotent() {
        // Vertical river in column 3.
        let mut tiles = Grid::from_fn(7, 5, |c| {
            if c.x == 3 {
                TileType::Water
            } else {
                TileType::Grass
            }
        });
        let built = add_bridges(&mut tiles);
        assert_eq!(built, 3);
        assert_eq!(tiles.at(Cell::new(3, 0)), Some(TileType::Water));
        assert_eq!(tiles.at(Cell::new(3, 2)), Some(TileType::Bridge));

        let once = tiles.clone();
        assert_eq!(add_bridges(&mut tiles), 0);
        assert_eq!(tiles, once);
    }

    #[test]
    fn test_late_bridge_does_not_leave_work_for_a_second_call() {
        // (2,1) is bridged after (1,1) was scanned, which then has land on
        // both horizontal sides.
        let mut tiles = Grid::new(5, 4, TileType::Grass);
        for (x, y) in [(1, 0), (1, 1), (2, 1), (1, 2)] {
            tiles.set(Cell::new(x, y), TileType::Water);
        }
        assert_eq!(add_bridges(&mut tiles), 3);
        assert_eq!(tiles.at(Cell::new(1, 1)), Some(TileType::Bridge));
        assert_eq!(tiles.at(Cell::new(1, 0)), Some(TileType::Water));

        let once = tiles.clone();
        assert_eq!(add_bridges(&mut tiles), 0);
        assert_eq!(once, tiles);
    }

    #[test]
    fn test_checkerboard_settlement() {
        let mut tiles = Grid::new(9, 9, TileType::Forest);
        let center = Cell::new(4, 4);
        stamp_settlement(
            &mut tiles,
            center,
            2,
            SettlementStyle::Checkerboard {
                even: TileType::Grass,
                odd: TileType::Sand,
            },
        );
        for dy in -2..=2 {
            for dx in -2..=2 {
                let expected = if (dx + dy) % 2 == 0 {
                    TileType::Grass
                } else {
                    TileType::Sand
                };
                assert_eq!(tiles.at(center.offset(dx, dy)), Some(expected), "({dx}, {dy})");
            }
        }
        // Negative odd sums land on the odd tile too.
        assert_eq!(tiles.at(Cell::new(3, 4)), Some(TileType::Sand));
        assert_eq!(tiles.at(Cell::new(2, 3)), Some(TileType::Sand));
        assert_eq!(tiles.at(Cell::new(2, 2)), Some(TileType::Grass));
        assert_eq!(tiles.at(Cell::new(1, 4)), Some(TileType::Forest));
    }

    #[test]
    fn test_open_water_gets_no_bridge() {
        let mut tiles = Grid::new(6, 6, TileType::Water);
        assert_eq!(add_bridges(&mut tiles), 0);
    }
}
