mod classify;
mod hydrology;
mod smooth;
mod structures;

pub use classify::ClassifyPass;
pub use hydrology::HydrologyPass;
pub use smooth::SmoothPass;
pub use structures::StructurePass;
