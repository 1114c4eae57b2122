use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{Pass, PassContext},
    rng::PassRng,
    terrain::{
        grid::Grid,
        placement::{
            add_bridges, place_pyramids, place_settlements, place_structures, random_interior,
            stamp_magic_lake, stamp_oasis, stamp_volcano, OasisKind, STRUCTURE_MARGIN,
        },
        tile::TileType,
    },
    theme::{Feature, Step, CITY_COUNT, FEATURE_STRUCTURES},
};

const MAGIC_LAKE_MARGIN: i32 = 3;
const VOLCANO_MARGIN: i32 = 4;

/// Stamps requested features first, then walks the theme recipe. Rivers were
/// carved by the hydrology pass and are skipped here.
pub struct StructurePass;

impl StructurePass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StructurePass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for StructurePass {
    fn name(&self) -> &str {
        "structures"
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        tiles: &mut Grid<TileType>,
        rng: &mut PassRng<'_>,
    ) -> Result<()> {
        let options = ctx.options;
        let density = options.density;

        for (feature, structure, base) in FEATURE_STRUCTURES {
            if options.has(feature) {
                place_structures(tiles, structure, density.scale(base), rng);
            }
        }
        if options.has(Feature::Cities) {
            place_settlements(tiles, ctx.profile.settlement, density.scale(CITY_COUNT), rng);
        }

        for step in ctx.profile.recipe {
            match *step {
                Step::Rivers(_) | Step::LavaRivers(_) => {}
                Step::Bridges => {
                    if options.has(Feature::Bridges) {
                        let built = add_bridges(tiles);
                        tracing::debug!(built, "bridges added");
                    }
                }
                Step::Place(structure, base) => {
                    place_structures(tiles, structure, density.scale(base), rng);
                }
                Step::PlaceUnless(feature, structure, base) => {
                    if !options.has(feature) {
                        place_structures(tiles, structure, density.scale(base), rng);
                    }
                }
                Step::MagicLakes(base) => {
                    for _ in 0..density.scale(base) {
                        if let Some(center) = random_interior(tiles, MAGIC_LAKE_MARGIN, rng) {
                            stamp_magic_lake(tiles, center);
                        }
                    }
                }
                Step::Volcanoes(base) => {
                    for _ in 0..density.scale(base) {
                        if let Some(center) = random_interior(tiles, VOLCANO_MARGIN, rng) {
                            stamp_volcano(tiles, center);
                        }
                    }
                }
                Step::Pyramids(base) => {
                    let requested = density.scale(base);
                    let placed = place_pyramids(tiles, requested, rng);
                    tracing::debug!(requested, placed = placed.len(), "pyramids placed");
                }
                Step::DesertOases { min, max } => {
                    let count = rng.gen_range(min..=max);
                    for _ in 0..count {
                        if let Some(center) = random_interior(tiles, STRUCTURE_MARGIN, rng) {
                            stamp_oasis(tiles, center, OasisKind::Desert, rng);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
