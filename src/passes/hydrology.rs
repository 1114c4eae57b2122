use anyhow::Result;

use crate::{
    engine::{Pass, PassContext},
    rng::PassRng,
    terrain::{
        grid::Grid,
        hydrology::{generate_lava_rivers, generate_rivers},
        tile::TileType,
    },
    theme::Step,
};

/// Carves the water and lava rivers a theme's recipe asks for. River counts
/// are scaled by density like every other count.
pub struct HydrologyPass;

impl HydrologyPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HydrologyPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for HydrologyPass {
    fn name(&self) -> &str {
        "hydrology"
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        tiles: &mut Grid<TileType>,
        rng: &mut PassRng<'_>,
    ) -> Result<()> {
        let density = ctx.options.density;
        for step in ctx.profile.recipe {
            match *step {
                Step::Rivers(count) => {
                    let rivers = generate_rivers(
                        tiles,
                        &ctx.fields.height,
                        density.scale(count),
                        rng,
                    );
                    tracing::debug!(count = rivers.len(), "rivers generated");
                }
                Step::LavaRivers(count) => {
                    let flows = generate_lava_rivers(tiles, density.scale(count), rng);
                    tracing::debug!(count = flows.len(), "lava rivers generated");
                }
                _ => {}
            }
        }
        Ok(())
    }
}
