pub mod biome;
pub mod fields;
pub mod grid;
pub mod hydrology;
pub mod noise;
pub mod placement;
pub mod smoothing;
pub mod tile;
