use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{GenerationOptions, GenerationRequest},
    terrain::smoothing::DEFAULT_ITERATIONS,
    theme::{Density, Feature, Theme},
};

fn default_smoothing_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

/// Named map sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MapSize {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "small" => Some(MapSize::Small),
            "medium" => Some(MapSize::Medium),
            "large" => Some(MapSize::Large),
            _ => None,
        }
    }

    /// `(width, height)` in tiles.
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            MapSize::Small => (30, 20),
            MapSize::Medium => (50, 37),
            MapSize::Large => (80, 60),
        }
    }
}

/// A generation request as written in a YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: Option<String>,
    /// Preset used for any dimension not given explicitly.
    #[serde(default)]
    pub size: MapSize,
    pub width: Option<usize>,
    pub height: Option<usize>,
    #[serde(default)]
    pub seed: f64,
    /// Falls back to the theme's default smoothness.
    pub smoothness: Option<f64>,
    /// Free-form tag; anything unrecognised means medieval.
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub density: Density,
    pub rng_seed: Option<u64>,
    #[serde(default = "default_smoothing_iterations")]
    pub smoothing_iterations: u32,
}

impl Recipe {
    pub fn from_yaml(data: &str) -> Result<Self> {
        let recipe = serde_yaml::from_str(data).context("Failed to parse recipe")?;
        Ok(recipe)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_tag(&self.theme)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        let (width, height) = self.size.dimensions();
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }

    pub fn to_request(&self) -> GenerationRequest {
        let theme = self.theme();
        let (width, height) = self.dimensions();
        let smoothness = self
            .smoothness
            .unwrap_or_else(|| theme.default_smoothness());
        let options = GenerationOptions {
            features: self.features.iter().copied().collect(),
            density: self.density,
            rng_seed: self.rng_seed,
            smoothing_iterations: self.smoothing_iterations,
        };
        GenerationRequest::new(width, height, self.seed, smoothness, theme).with_options(options)
    }
}

pub struct RecipeLoader {
    base_dir: PathBuf,
}

impl RecipeLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Recipe> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        let recipe: Recipe = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_recipe_defaults() {
        let recipe = Recipe::from_yaml("name: bare\n").unwrap();
        assert_eq!(recipe.theme(), Theme::Medieval);
        assert_eq!(recipe.dimensions(), (50, 37));
        assert_eq!(recipe.density, Density::Medium);
        assert_eq!(recipe.smoothing_iterations, 3);
        assert!(recipe.features.is_empty());

        let request = recipe.to_request();
        assert_eq!(request.smoothness, 60.0);
        assert_eq!(request.seed, 0.0);
        assert_eq!(request.options.rng_seed, None);
    }

    #[test]
    fn test_full_recipe() {
        let yaml = r#"
name: dunes
size: small
height: 12
seed: 7.5
theme: Desert
features: [caves, cities]
density: high
rng_seed: 99
smoothing_iterations: 1
"#;
        let request = Recipe::from_yaml(yaml).unwrap().to_request();
        assert_eq!((request.width, request.height), (30, 12));
        assert_eq!(request.theme, Theme::Desert);
        assert_eq!(request.smoothness, 45.0);
        assert_eq!(request.seed, 7.5);
        assert!(request.options.has(Feature::Caves));
        assert!(request.options.has(Feature::Cities));
        assert!(!request.options.has(Feature::Bridges));
        assert_eq!(request.options.density, Density::High);
        assert_eq!(request.options.rng_seed, Some(99));
        assert_eq!(request.options.smoothing_iterations, 1);
    }

    #[test]
    fn test_unknown_theme_is_medieval() {
        let recipe = Recipe::from_yaml("name: odd\ntheme: cyberpunk\n").unwrap();
        assert_eq!(recipe.theme(), Theme::Medieval);
    }

    #[test]
    fn test_unknown_feature_is_an_error() {
        assert!(Recipe::from_yaml("name: odd\nfeatures: [dragons]\n").is_err());
    }

    #[test]
    fn test_map_size_presets() {
        assert_eq!(MapSize::Small.dimensions(), (30, 20));
        assert_eq!(MapSize::Medium.dimensions(), (50, 37));
        assert_eq!(MapSize::Large.dimensions(), (80, 60));
        assert_eq!(MapSize::from_tag(" LARGE "), Some(MapSize::Large));
        assert_eq!(MapSize::from_tag("huge"), None);
    }
}
