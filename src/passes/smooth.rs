use anyhow::Result;

use crate::{
    engine::{Pass, PassContext},
    rng::PassRng,
    terrain::{grid::Grid, smoothing::smooth, tile::TileType},
};

pub struct SmoothPass;

impl SmoothPass {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmoothPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for SmoothPass {
    fn name(&self) -> &str {
        "smooth"
    }

    fn run(
        &mut self,
        ctx: &PassContext,
        tiles: &mut Grid<TileType>,
        _rng: &mut PassRng<'_>,
    ) -> Result<()> {
        let changed = smooth(tiles, ctx.options.smoothing_iterations);
        tracing::debug!(
            iterations = ctx.options.smoothing_iterations,
            changed,
            "terrain smoothed"
        );
        Ok(())
    }
}
