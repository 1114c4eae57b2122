use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Result;

use crate::{
    error::GenerationError,
    map::MapModel,
    passes::{ClassifyPass, HydrologyPass, SmoothPass, StructurePass},
    rng::{PassRng, RngManager},
    terrain::{
        fields::{FieldSynthesizer, ScalarFields},
        grid::{Grid, MAX_DIMENSION},
        smoothing::DEFAULT_ITERATIONS,
        tile::TileType,
    },
    theme::{Density, Feature, Theme, ThemeProfile},
};

/// Everything beyond the five core parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub features: BTreeSet<Feature>,
    pub density: Density,
    /// Fixed seed for the stochastic passes. `None` draws from OS entropy,
    /// so only the scalar fields repeat between runs.
    pub rng_seed: Option<u64>,
    pub smoothing_iterations: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            features: BTreeSet::new(),
            density: Density::default(),
            rng_seed: None,
            smoothing_iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl GenerationOptions {
    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub width: usize,
    pub height: usize,
    pub seed: f64,
    pub smoothness: f64,
    pub theme: Theme,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(width: usize, height: usize, seed: f64, smoothness: f64, theme: Theme) -> Self {
        Self {
            width,
            height,
            seed,
            smoothness,
            theme,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidParameter(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(GenerationError::InvalidParameter(format!(
                "map size {}x{} exceeds the {MAX_DIMENSION} cell limit per side",
                self.width, self.height
            )));
        }
        if !self.smoothness.is_finite() || self.smoothness <= 0.0 {
            return Err(GenerationError::InvalidParameter(format!(
                "smoothness must be a positive number, got {}",
                self.smoothness
            )));
        }
        if !self.seed.is_finite() {
            return Err(GenerationError::InvalidParameter(format!(
                "seed must be finite, got {}",
                self.seed
            )));
        }
        Ok(())
    }
}

pub struct PassContext<'a> {
    pub theme: Theme,
    pub profile: &'static ThemeProfile,
    pub options: &'a GenerationOptions,
    pub fields: &'a ScalarFields,
}

pub trait Pass {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &PassContext,
        tiles: &mut Grid<TileType>,
        rng: &mut PassRng<'_>,
    ) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct PassReport {
    pub name: String,
    pub duration_ms: f64,
}

pub struct Generation {
    pub map: MapModel,
    pub reports: Vec<PassReport>,
}

#[derive(Default)]
pub struct EngineBuilder {
    passes: Vec<Box<dyn Pass>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn push_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    pub fn build(self) -> Engine {
        Engine {
            passes: self.passes,
        }
    }
}

pub struct Engine {
    passes: Vec<Box<dyn Pass>>,
}

impl Engine {
    /// Classification, smoothing, rivers, then structures.
    pub fn standard() -> Self {
        EngineBuilder::new()
            .with_pass(ClassifyPass::new())
            .with_pass(SmoothPass::new())
            .with_pass(HydrologyPass::new())
            .with_pass(StructurePass::new())
            .build()
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn run(&mut self, request: &GenerationRequest) -> Result<Generation, GenerationError> {
        request.validate()?;
        let started = Instant::now();

        let fields = FieldSynthesizer::new(
            request.width,
            request.height,
            request.smoothness,
            request.seed,
        )
        .synthesize();
        let mut tiles = Grid::new(request.width, request.height, TileType::DeepWater);
        let mut rng = match request.options.rng_seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };

        let ctx = PassContext {
            theme: request.theme,
            profile: request.theme.profile(),
            options: &request.options,
            fields: &fields,
        };

        let mut reports = Vec::with_capacity(self.passes.len());
        for pass in &mut self.passes {
            let pass_start = Instant::now();
            let mut stream = rng.stream(pass.name());
            pass.run(&ctx, &mut tiles, &mut stream)
                .map_err(|source| GenerationError::Pass {
                    pass: pass.name().to_string(),
                    source,
                })?;
            let duration_ms = pass_start.elapsed().as_secs_f64() * 1_000.0;
            tracing::debug!(pass = pass.name(), duration_ms, "pass finished");
            reports.push(PassReport {
                name: pass.name().to_string(),
                duration_ms,
            });
        }

        tracing::info!(
            theme = request.theme.as_str(),
            width = request.width,
            height = request.height,
            elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0,
            "map generated"
        );

        Ok(Generation {
            map: MapModel::new(request.theme, tiles, fields),
            reports,
        })
    }
}

/// Runs the standard pipeline once.
pub fn generate(request: &GenerationRequest) -> Result<MapModel, GenerationError> {
    Engine::standard().run(request).map(|generation| generation.map)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FloodPass {
        tile: TileType,
    }

    impl Pass for FloodPass {
        fn name(&self) -> &str {
            "flood"
        }

        fn run(
            &mut self,
            _ctx: &PassContext,
            tiles: &mut Grid<TileType>,
            _rng: &mut PassRng<'_>,
        ) -> Result<()> {
            let cells: Vec<_> = tiles.cells().collect();
            for cell in cells {
                tiles.set(cell, self.tile);
            }
            Ok(())
        }
    }

    struct FailingPass;

    impl Pass for FailingPass {
        fn name(&self) -> &str {
            "failing"
        }

        fn run(
            &mut self,
            _ctx: &PassContext,
            _tiles: &mut Grid<TileType>,
            _rng: &mut PassRng<'_>,
        ) -> Result<()> {
            anyhow::bail!("boom")
        }
    }

    #[test]
    fn test_custom_pipeline_runs_in_order() {
        let mut engine = EngineBuilder::new()
            .with_pass(FloodPass {
                tile: TileType::Sand,
            })
            .with_pass(FloodPass {
                tile: TileType::Snow,
            })
            .build();
        let request = GenerationRequest::new(4, 3, 1.0, 20.0, Theme::Winter);
        let generation = engine.run(&request).unwrap();

        assert_eq!(generation.reports.len(), 2);
        assert_eq!(generation.map.count(TileType::Snow), 12);
    }

    #[test]
    fn test_empty_pipeline_leaves_deep_water() {
        let mut engine = EngineBuilder::new().build();
        let request = GenerationRequest::new(3, 3, 0.0, 10.0, Theme::Medieval);
        let map = engine.run(&request).unwrap().map;
        assert_eq!(map.count(TileType::DeepWater), 9);
    }

    #[test]
    fn test_pass_failure_is_wrapped() {
        let mut engine = EngineBuilder::new().with_pass(FailingPass).build();
        let request = GenerationRequest::new(3, 3, 0.0, 10.0, Theme::Medieval);
        match engine.run(&request) {
            Err(GenerationError::Pass { pass, .. }) => assert_eq!(pass, "failing"),
            other => panic!("expected pass error, got {:?}", other.map(|g| g.reports)),
        }
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let bad = [
            GenerationRequest::new(0, 10, 1.0, 50.0, Theme::Medieval),
            GenerationRequest::new(10, 0, 1.0, 50.0, Theme::Medieval),
            GenerationRequest::new(10, 10, 1.0, 0.0, Theme::Medieval),
            GenerationRequest::new(10, 10, 1.0, -3.0, Theme::Medieval),
            GenerationRequest::new(10, 10, 1.0, f64::NAN, Theme::Medieval),
            GenerationRequest::new(10, 10, f64::INFINITY, 50.0, Theme::Medieval),
            GenerationRequest::new(MAX_DIMENSION + 1, 10, 1.0, 50.0, Theme::Medieval),
            GenerationRequest::new(10, MAX_DIMENSION + 1, 1.0, 50.0, Theme::Medieval),
        ];
        for request in bad {
            assert!(matches!(
                request.validate(),
                Err(GenerationError::InvalidParameter(_))
            ));
        }
        assert!(GenerationRequest::new(1, 1, -7.5, 0.01, Theme::Swamp)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_standard_pass_order() {
        let engine = Engine::standard();
        assert_eq!(
            engine.pass_names(),
            vec!["classify", "smooth", "hydrology", "structures"]
        );
    }
}
