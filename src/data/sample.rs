use super::model::{Dataset, Record, Sex, Species};

/// Rows per species in the real palmerpenguins table.
pub const DEFAULT_COUNTS: [(Species, usize); 3] = [
    (Species::Adelie, 152),
    (Species::Gentoo, 124),
    (Species::Chinstrap, 68),
];

/// Share of measurements left out to mimic the `NA`s of field data.
const MISSING_RATE: f64 = 0.01;

// ---------------------------------------------------------------------------
// Per-species distributions
// ---------------------------------------------------------------------------

/// Mean and standard deviation of one measurement.
#[derive(Debug, Clone, Copy)]
struct Normal {
    mean: f64,
    sd: f64,
}

struct Profile {
    islands: &'static [&'static str],
    bill_length: Normal,
    bill_depth: Normal,
    flipper_length: Normal,
    body_mass: Normal,
}

fn profile(species: Species) -> Profile {
    let n = |mean, sd| Normal { mean, sd };
    match species {
        Species::Adelie => Profile {
            islands: &["Torgersen", "Biscoe", "Dream"],
            bill_length: n(38.8, 2.7),
            bill_depth: n(18.3, 1.2),
            flipper_length: n(190.0, 6.5),
            body_mass: n(3700.0, 458.0),
        },
        Species::Gentoo => Profile {
            islands: &["Biscoe"],
            bill_length: n(47.5, 3.1),
            bill_depth: n(15.0, 1.0),
            flipper_length: n(217.0, 6.5),
            body_mass: n(5076.0, 504.0),
        },
        Species::Chinstrap => Profile {
            islands: &["Dream"],
            bill_length: n(48.8, 3.3),
            bill_depth: n(18.4, 1.1),
            flipper_length: n(196.0, 7.1),
            body_mass: n(3733.0, 384.0),
        },
    }
}

// ---------------------------------------------------------------------------
// Deterministic PRNG
// ---------------------------------------------------------------------------

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = (self.next_f64() * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }

    fn measure(&mut self, dist: Normal, decimals: i32) -> Option<f64> {
        if self.next_f64() < MISSING_RATE {
            return None;
        }
        let scale = 10f64.powi(decimals);
        let v = self.gauss(dist.mean, dist.sd).max(0.0);
        Some((v * scale).round() / scale)
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generate a penguin-like dataset. Same seed and counts, same rows.
///
/// Rows are grouped by species in the order of `counts`, as in the real
/// table. Body mass is rounded to 25 g like the field scales.
pub fn generate(seed: u64, counts: &[(Species, usize)]) -> Dataset {
    let mut rng = SimpleRng::new(seed);
    let mut records = Vec::with_capacity(counts.iter().map(|(_, n)| n).sum());

    for &(species, n) in counts {
        let p = profile(species);
        for i in 0..n {
            let island = rng.pick(p.islands).to_string();
            let body_mass_g = rng
                .measure(p.body_mass, 0)
                .map(|m| (m / 25.0).round() * 25.0);
            let sex = if rng.next_f64() < MISSING_RATE * 3.0 {
                None
            } else if i % 2 == 0 {
                Some(Sex::Male)
            } else {
                Some(Sex::Female)
            };
            records.push(Record {
                species,
                island,
                bill_length_mm: rng.measure(p.bill_length, 1),
                bill_depth_mm: rng.measure(p.bill_depth, 1),
                flipper_length_mm: rng.measure(p.flipper_length, 0),
                body_mass_g,
                sex,
                year: Some(2007 + (i % 3) as i32),
            });
        }
    }
    Dataset::new(records)
}
