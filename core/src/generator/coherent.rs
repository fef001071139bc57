use core::f64::consts::FRAC_1_SQRT_2;

use super::*;

/// Sampled noise above this value becomes a wall.
pub const WALL_THRESHOLD: f64 = 0.1;

/// Lattice cells spanned by the whole arena along each axis.
pub const DEFAULT_FREQUENCY: f64 = 12.0;

/// Generation strategy that thresholds 2D gradient noise.
///
/// Every interior cell `(x, y)` samples the noise at
/// `(x / width, y / height) * frequency`, so the layout scales with the arena
/// instead of tiling. The lattice gradients come from a permutation shuffled
/// by an RNG seeded with the board seed.
#[derive(Clone, Debug, PartialEq)]
pub struct CoherentNoiseGenerator {
    frequency: f64,
    threshold: f64,
}

impl CoherentNoiseGenerator {
    pub fn new(frequency: f64, threshold: f64) -> Self {
        Self {
            frequency,
            threshold,
        }
    }
}

impl Default for CoherentNoiseGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY, WALL_THRESHOLD)
    }
}

impl WallGenerator for CoherentNoiseGenerator {
    fn generate(&self, seed: u64, mut grid: Grid) -> Grid {
        let noise = GradientNoise::new(seed);
        let (width, height) = grid.size();
        let (width, height) = (f64::from(width), f64::from(height));

        let mut walls = 0usize;
        for (x, y) in grid.iter_interior() {
            let sample = noise.sample(
                f64::from(x) / width * self.frequency,
                f64::from(y) / height * self.frequency,
            );
            if sample > self.threshold {
                grid[(x, y)] = CellState::Wall;
                walls += 1;
            }
        }
        log::trace!("coherent noise placed {} interior walls (seed {})", walls, seed);
        grid
    }
}

const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Classic lattice gradient noise, roughly in `[-0.71, 0.71]`.
struct GradientNoise {
    permutation: [u8; 256],
}

impl GradientNoise {
    fn new(seed: u64) -> Self {
        use rand::prelude::*;

        let mut permutation: [u8; 256] = core::array::from_fn(|i| i as u8);
        let mut rng = SmallRng::seed_from_u64(seed);
        permutation.shuffle(&mut rng);
        Self { permutation }
    }

    fn hash(&self, x: usize, y: usize) -> usize {
        let column = self.permutation[x & 0xff] as usize;
        self.permutation[(column + y) & 0xff] as usize
    }

    fn gradient(&self, x: usize, y: usize, dx: f64, dy: f64) -> f64 {
        let (gx, gy) = GRADIENTS[self.hash(x, y) % GRADIENTS.len()];
        gx * dx + gy * dy
    }

    /// Only defined for non-negative coordinates.
    fn sample(&self, x: f64, y: f64) -> f64 {
        // truncation is floor for non-negative input
        let (x0, y0) = (x as usize, y as usize);
        let (dx, dy) = (x - x0 as f64, y - y0 as f64);

        let n00 = self.gradient(x0, y0, dx, dy);
        let n10 = self.gradient(x0 + 1, y0, dx - 1.0, dy);
        let n01 = self.gradient(x0, y0 + 1, dx, dy - 1.0);
        let n11 = self.gradient(x0 + 1, y0 + 1, dx - 1.0, dy - 1.0);

        let (u, v) = (fade(dx), fade(dy));
        lerp(v, lerp(u, n00, n10), lerp(u, n01, n11))
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}
