// ---------------------------------------------------------------------------
// Synthetic map points – illustrative density layer
// ---------------------------------------------------------------------------

/// Midtown Manhattan, the center of the demo density layer.
pub const NYC_CENTER: (f64, f64) = (40.75, -73.98);

/// Standard deviation of the synthetic scatter, in degrees.
pub const SPREAD_DEG: f64 = 0.02;

/// Generate `n` normally-distributed `[lon, lat]` points around `center`.
/// Purely decorative; deterministic for a given seed so the layer does not
/// flicker between frames.
pub fn synthetic_points(n: usize, center: (f64, f64), seed: u64) -> Vec<[f64; 2]> {
    let (lat, lon) = center;
    let mut rng = SimpleRng::new(seed);
    (0..n)
        .map(|_| {
            [
                lon + rng.gauss(0.0, SPREAD_DEG),
                lat + rng.gauss(0.0, SPREAD_DEG),
            ]
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_near_center() {
        let points = synthetic_points(1000, NYC_CENTER, 42);
        assert_eq!(points.len(), 1000);

        // ~10 sigma box; anything outside would mean broken math, not bad luck.
        for [lon, lat] in &points {
            assert!((lat - NYC_CENTER.0).abs() < 0.2);
            assert!((lon - NYC_CENTER.1).abs() < 0.2);
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = synthetic_points(50, NYC_CENTER, 7);
        let b = synthetic_points(50, NYC_CENTER, 7);
        assert_eq!(a, b);
    }
}
