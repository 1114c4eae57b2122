pub mod engine;
pub mod error;
pub mod map;
pub mod passes;
pub mod recipe;
pub mod rng;
pub mod summary;
pub mod terrain;
pub mod theme;

pub use engine::{generate, Engine, EngineBuilder, GenerationOptions, GenerationRequest};
pub use error::GenerationError;
pub use map::MapModel;
pub use recipe::{MapSize, Recipe, RecipeLoader};
pub use summary::MapSummary;
pub use terrain::tile::TileType;
pub use theme::{Density, Feature, Theme};
