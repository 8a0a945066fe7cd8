use std::fs::File;

use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Hourly demand profile: quiet overnight, morning and evening peaks.
const HOUR_WEIGHTS: [f64; 24] = [
    1.0, 0.7, 0.5, 0.4, 0.5, 1.0, 2.0, 3.5, 4.0, 3.0, 2.5, 2.5, //
    2.8, 2.8, 3.0, 3.5, 4.5, 5.5, 5.5, 4.5, 3.5, 3.0, 2.5, 1.8,
];

const BASES: [&str; 5] = ["B02512", "B02598", "B02617", "B02682", "B02764"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize % bound
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn weighted_hour(rng: &mut SimpleRng) -> u32 {
    let total: f64 = HOUR_WEIGHTS.iter().sum();
    let mut r = rng.next_f64() * total;
    for (hour, &w) in HOUR_WEIGHTS.iter().enumerate() {
        if r < w {
            return hour as u32;
        }
        r -= w;
    }
    23
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 5000;

    let output_path = "sample_pickups.csv.gz";
    let file = File::create(output_path).expect("Failed to create output file");
    let encoder = GzEncoder::new(file, Compression::default());
    let mut writer = csv::Writer::from_writer(encoder);

    // Mixed-case header on purpose: the loader is expected to normalize it.
    writer
        .write_record(["Date/Time", "Lat", "Lon", "Base"])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        let day = 1 + rng.next_usize(30) as u32;
        let hour = weighted_hour(&mut rng);
        let minute = rng.next_usize(60) as u32;
        let second = rng.next_usize(60) as u32;

        let timestamp = NaiveDate::from_ymd_opt(2014, 9, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .expect("valid September 2014 timestamp");

        let lat = rng.gauss(40.75, 0.03);
        let lon = rng.gauss(-73.98, 0.03);
        let base = BASES[rng.next_usize(BASES.len())];

        writer
            .write_record([
                timestamp.format("%-m/%-d/%Y %-H:%M:%S").to_string(),
                format!("{lat:.4}"),
                format!("{lon:.4}"),
                base.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer
        .into_inner()
        .expect("Failed to flush CSV writer")
        .finish()
        .expect("Failed to finish gzip stream");

    println!("Wrote {n_rows} pickups to {output_path}");
}
