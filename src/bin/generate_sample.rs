//! Writes a synthetic sensor log in the layout the viewer reads:
//! time in column 0, Temp1 in 1, Temp3 in 3, current in 9, chamber in 11.
//!
//! Usage: `generate_sample [OUTPUT]` (default `sample_sensor.csv`).

use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 12] = [
    "Time [m]", "Temp1", "Temp2", "Temp3", "Temp4", "Temp5", "Temp6", "Temp7", "Temp8",
    "Current", "Voltage", "Chamber",
];

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

/// First-order approach of `start` towards `target` with time constant `tau`.
fn settle(start: f64, target: f64, tau: f64, t: f64) -> f64 {
    target + (start - target) * (-t / tau).exp()
}

fn main() -> Result<()> {
    let output: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_sensor.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(HEADER)?;

    // Two hours at one sample per minute: heater on for the first 80 minutes.
    let minutes = 120;
    let mut written = 0;
    for minute in 0..=minutes {
        let t = minute as f64;
        let heating = minute < 80;

        let chamber = if heating {
            settle(22.0, 85.0, 25.0, t)
        } else {
            settle(settle(22.0, 85.0, 25.0, 80.0), 22.0, 30.0, t - 80.0)
        };
        let current = if heating { 120.0 + rng.gauss(0.0, 4.0) } else { rng.gauss(0.0, 0.2).abs() };

        let mut row: Vec<String> = Vec::with_capacity(HEADER.len());
        row.push(format!("{t}"));
        for lag in 0..8 {
            let temp = chamber - 2.0 - lag as f64 * 0.8 + rng.gauss(0.0, 0.3);
            row.push(format!("{temp:.2}"));
        }
        row.push(format!("{current:.2}"));
        row.push(format!("{:.2}", 230.0 + rng.gauss(0.0, 1.0)));
        row.push(format!("{:.2}", chamber + rng.gauss(0.0, 0.1)));

        // Sprinkle in a few rows the viewer is expected to skip.
        if minute % 37 == 36 {
            row[1] = "ERR".to_string();
        }

        writer.write_record(&row)?;
        written += 1;
    }
    writer.flush()?;

    println!("Wrote {written} sensor rows to {}", output.display());
    Ok(())
}
