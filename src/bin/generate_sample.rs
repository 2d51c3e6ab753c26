use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

use bottle_export::config::{EXPORT_COLUMNS, INPUT_PATH, OXYGEN_SENTINEL};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Round to a fixed number of decimals, the way instrument exports do.
fn round_to(v: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    (v * p).round() / p
}

// Rough California Current profile: warm, fresh, light at the surface.
fn temperature_at(depth: f64) -> f64 {
    4.0 + 11.0 * (-depth / 120.0).exp()
}

fn salinity_at(depth: f64) -> f64 {
    33.4 + 0.9 * (1.0 - (-depth / 200.0).exp())
}

fn oxygen_at(depth: f64) -> f64 {
    40.0 + 230.0 * (-depth / 250.0).exp()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let stations = [
        ("93.3 30.0", 33.48, -118.52),
        ("90.0 60.0", 33.18, -120.13),
        ("80.0 80.0", 33.59, -121.85),
    ];
    let depths = [2.0, 10.0, 20.0, 50.0, 100.0, 200.0, 300.0, 500.0];
    let start = NaiveDate::from_ymd_opt(2021, 5, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .context("invalid start date")?;

    let path = Path::new(INPUT_PATH);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header: Vec<&str> = EXPORT_COLUMNS.to_vec();
    header.extend(["Cast", "Station", "bottle_flag"]);
    writer.write_record(&header)?;

    let mut rows = 0usize;
    for cast in 0..4 {
        for (s, &(station, lat, lon)) in stations.iter().enumerate() {
            let cast_time = start + Duration::days(cast * 3) + Duration::hours(s as i64 * 5);

            for (b, &depth) in depths.iter().enumerate() {
                let time = cast_time + Duration::minutes(b as i64 * 4);
                let temperature = round_to(temperature_at(depth) + rng.gauss(0.0, 0.3), 3);
                let salinity = round_to(salinity_at(depth) + rng.gauss(0.0, 0.02), 4);
                let density = round_to(
                    1023.0 + 0.75 * (salinity - 33.0) - 0.18 * (temperature - 10.0)
                        + depth * 0.0045,
                    3,
                );

                // Roughly one bottle in ten misfires and carries the sentinel.
                let misfire = rng.next_f64() < 0.1;
                let oxygen = if misfire {
                    OXYGEN_SENTINEL
                } else {
                    round_to(oxygen_at(depth) + rng.gauss(0.0, 4.0), 1)
                };

                writer.write_record([
                    time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                    format!("{depth}"),
                    format!("{lat}"),
                    format!("{lon}"),
                    format!("{oxygen}"),
                    format!("{density}"),
                    format!("{salinity}"),
                    format!("{temperature}"),
                    format!("{}", cast + 1),
                    station.to_string(),
                    if misfire { "4" } else { "2" }.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} bottle samples to {}", path.display());
    Ok(())
}
