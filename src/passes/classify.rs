use anyhow::{Context, Result};

use crate::{
    engine::{Pass, PassContext},
    rng::PassRng,
    terrain::{biome::classify, grid::Grid, tile::TileType},
};

/// Assigns every cell a base tile from the theme's ladder.
pub struct ClassifyPass;

impl ClassifyPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassifyPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for ClassifyPass {
    fn name(&self) -> &str {
        "classify"
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        tiles: &mut Grid<TileType>,
        rng: &mut PassRng<'_>,
    ) -> Result<()> {
        let cells: Vec<_> = tiles.cells().collect();
        for cell in cells {
            let (height, moisture, temperature) = ctx
                .fields
                .sample(cell)
                .with_context(|| format!("no field sample at {cell:?}"))?;
            let tile = classify(ctx.profile.ladder, height, moisture, temperature, rng);
            tiles.set(cell, tile);
        }
        Ok(())
    }
}
