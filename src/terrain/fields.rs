//! Height, moisture and temperature synthesis from octave-summed noise.

use super::grid::{Cell, Grid};
use super::noise::NoiseField;

pub const HEIGHT_OCTAVES: u32 = 6;
pub const MOISTURE_OCTAVES: u32 = 4;
pub const MOISTURE_SEED_OFFSET: f64 = 1000.0;
pub const TEMPERATURE_SEED_OFFSET: f64 = 2000.0;

/// The three per-cell scalars, each clamped to [0, 1].
#[derive(Debug, Clone)]
pub struct ScalarFields {
    pub height: Grid<f64>,
    pub moisture: Grid<f64>,
    pub temperature: Grid<f64>,
}

impl ScalarFields {
    /// `(height, moisture, temperature)` at `cell`.
    pub fn sample(&self, cell: Cell) -> Option<(f64, f64, f64)> {
        Some((
            self.height.at(cell)?,
            self.moisture.at(cell)?,
            self.temperature.at(cell)?,
        ))
    }
}

pub struct FieldSynthesizer {
    noise: NoiseField,
    width: usize,
    height: usize,
    smoothness: f64,
    seed: f64,
}

impl FieldSynthesizer {
    pub fn new(width: usize, height: usize, smoothness: f64, seed: f64) -> Self {
        Self {
            noise: NoiseField::new(),
            width,
            height,
            smoothness,
            seed,
        }
    }

    pub fn synthesize(&self) -> ScalarFields {
        ScalarFields {
            height: self.height_field(),
            moisture: self.moisture_field(),
            temperature: self.temperature_field(),
        }
    }

    /// Octave sum at `cell`, divided by the summed amplitudes. The result is
    /// centred on zero but not clamped.
    fn octaves(&self, cell: Cell, octaves: u32, seed: f64) -> f64 {
        let mut value = 0.0;
        let mut max_value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0 / self.smoothness;
        for _ in 0..octaves {
            value += self.noise.noise(
                cell.x as f64 * frequency + seed,
                cell.y as f64 * frequency + seed,
            ) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        value / max_value
    }

    /// Noise height averaged with distance from the nearest border, so the
    /// interior rises into a landmass and the rim sinks toward the sea.
    pub fn height_field(&self) -> Grid<f64> {
        let (w, h) = (self.width as f64, self.height as f64);
        let shortest_side = w.min(h);
        Grid::from_fn(self.width, self.height, |cell| {
            let raw = (self.octaves(cell, HEIGHT_OCTAVES, self.seed) + 1.0) / 2.0;
            let (x, y) = (cell.x as f64, cell.y as f64);
            let distance_from_edge = x.min(y).min(w - x).min(h - y) / shortest_side;
            ((raw + distance_from_edge) / 2.0).clamp(0.0, 1.0)
        })
    }

    pub fn moisture_field(&self) -> Grid<f64> {
        let seed = self.seed + MOISTURE_SEED_OFFSET;
        Grid::from_fn(self.width, self.height, |cell| {
            ((self.octaves(cell, MOISTURE_OCTAVES, seed) + 1.0) / 2.0).clamp(0.0, 1.0)
        })
    }

    /// Warm at the vertical centre, cold at the top and bottom rows, with a
    /// single noise octave for local variation.
    pub fn temperature_field(&self) -> Grid<f64> {
        let seed = self.seed + TEMPERATURE_SEED_OFFSET;
        let half = self.height as f64 / 2.0;
        Grid::from_fn(self.width, self.height, |cell| {
            let latitude = (cell.y as f64 - half).abs() / half;
            let variation = self.noise.noise(
                cell.x as f64 / self.smoothness + seed,
                cell.y as f64 / self.smoothness + seed,
            );
            ((1.0 - latitude) * 0.7 + variation * 0.3).clamp(0.0, 1.0)
        })
    }
}
