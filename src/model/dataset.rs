use std::io::ErrorKind;
use std::path::Path;

use anyhow::{anyhow, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const FEATURES: [&str; 5] = [
    "latitude",
    "longitude",
    "elevation_m",
    "proximity_to_river_km",
    "rainfall_annual_mm",
];

pub const TARGET: &str = "risk_score";

pub const SYNTHETIC_SEED: u64 = 42;
pub const SYNTHETIC_SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f64; 5],
    pub risk_score: f64,
}

/// Reads training rows from `path`, falling back to synthetic rows when the
/// file does not exist.
pub fn load(path: &Path) -> anyhow::Result<Vec<Sample>> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_csv(&text).with_context(|| format!("parsing {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::error!(
                "data file not found at {}, generating synthetic data",
                path.display()
            );
            Ok(synthetic(SYNTHETIC_SEED, SYNTHETIC_SAMPLES))
        }
        Err(e) => Err(anyhow!("error reading {}: {e}", path.display())),
    }
}

/// Parses a comma separated table with a header row. Columns may appear in
/// any order; columns other than the features and the target are ignored.
pub fn parse_csv(text: &str) -> anyhow::Result<Vec<Sample>> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or_else(|| anyhow!("missing header row"))?;
    let header: Vec<&str> = header.split(',').map(str::trim).collect();

    let column = |name: &str| {
        header
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| anyhow!("missing column {name}"))
    };

    let mut feature_columns = [0usize; 5];
    for (slot, name) in feature_columns.iter_mut().zip(FEATURES) {
        *slot = column(name)?;
    }
    let target_column = column(TARGET)?;

    let mut samples = Vec::new();

    for (index, line) in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let cell = |col: usize| -> anyhow::Result<f64> {
            let raw = cells
                .get(col)
                .ok_or_else(|| anyhow!("line {}: missing column {}", index + 1, header[col]))?;
            raw.parse::<f64>()
                .map_err(|e| anyhow!("line {}: {}={raw:?}: {e}", index + 1, header[col]))
        };

        let mut features = [0.0; 5];
        for (value, col) in features.iter_mut().zip(feature_columns) {
            *value = cell(col)?;
        }

        samples.push(Sample {
            features,
            risk_score: cell(target_column)?,
        });
    }

    Ok(samples)
}

/// Generates rows around Los Angeles where risk falls with elevation and
/// river distance and rises with rainfall.
pub fn synthetic(seed: u64, n: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let lat = rng.gen_range(33.9..34.2);
            let lon = rng.gen_range(-118.4..-118.1);
            let elevation = normal(&mut rng, 70.0, 30.0);
            let river = normal(&mut rng, 2.0, 1.0).abs();
            let rain = normal(&mut rng, 500.0, 100.0);

            let risk = 100.0 - (0.5 * elevation + 10.0 * river - 0.1 * rain)
                + normal(&mut rng, 0.0, 5.0);

            Sample {
                features: [lat, lon, elevation, river, rain],
                risk_score: risk.clamp(0.0, 100.0).trunc(),
            }
        })
        .collect()
}

// Box-Muller transform.
fn normal(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}
