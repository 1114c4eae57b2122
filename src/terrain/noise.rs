//! 2D gradient noise over a 256-entry permutation lattice.

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128,
    195, 78, 66, 215, 61, 156, 180,
];

#[derive(Clone, Debug)]
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new() -> Self {
        Self::with_permutation(&PERMUTATION)
    }

    pub fn with_permutation(table: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Coherent noise at `(x, y)`. Zero on every lattice point. Gradients are
    /// not unit length, so the magnitude can reach 16; callers normalise.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let x = x - xf;
        let y = y - yf;

        let u = fade(x);
        let v = fade(y);

        let a = self.perm[xi] as usize + yi;
        let b = self.perm[xi + 1] as usize + yi;
        let aa = self.perm[a];
        let ab = self.perm[a + 1];
        let ba = self.perm[b];
        let bb = self.perm[b + 1];

        lerp(
            v,
            lerp(u, grad(aa, x, y), grad(ba, x - 1.0, y)),
            lerp(u, grad(ab, x, y - 1.0), grad(bb, x - 1.0, y - 1.0)),
        )
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// One of 16 gradients: magnitude `1 + (h & 7)`, axis signs from bits 3 and 2.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let g = f64::from(1 + (h & 7));
    let gx = if h & 8 != 0 { -g } else { g };
    let gy = if h & 4 != 0 { -g } else { g };
    gx * x + gy * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_a_permutation() {
        let mut seen = [false; 256];
        for &value in PERMUTATION.iter() {
            assert!(!seen[value as usize], "{value} appears twice");
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(PERMUTATION[255], 180);
    }

    #[test]
    fn test_deterministic() {
        let a = NoiseField::new();
        let b = NoiseField::new();
        for i in 0..50 {
            let x = i as f64 * 0.37 + 12.5;
            let y = i as f64 * 0.91 - 3.25;
            assert_eq!(a.noise(x, y).to_bits(), b.noise(x, y).to_bits());
        }
    }

    #[test]
    fn test_zero_on_lattice() {
        let field = NoiseField::new();
        for x in -3..3 {
            for y in 0..4 {
                assert_eq!(field.noise(x as f64, y as f64), 0.0);
            }
        }
    }

    #[test]
    fn test_continuous_across_cell_boundary() {
        let field = NoiseField::new();
        let left = field.noise(4.0 - 1e-9, 7.3);
        let right = field.noise(4.0 + 1e-9, 7.3);
        assert!((left - right).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_every_256() {
        let field = NoiseField::new();
        assert_eq!(field.noise(3.5, 9.75), field.noise(259.5, 9.75));
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_table() {
        assert_eq!(grad(0, 1.0, 1.0), 2.0);
        assert_eq!(grad(7, 1.0, 0.0), 8.0);
        assert_eq!(grad(12, 1.0, 1.0), -10.0);
        assert_eq!(grad(16, 0.5, 0.0), grad(0, 0.5, 0.0));
    }
}
